//! Pratt parser for single-expression lambda bodies.
//!
//! Precedence, loosest to tightest: ternary, `||`, `&&`, equality,
//! comparison, additive, multiplicative, unary, postfix (member/index).

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::LambdaError;
use crate::lexer::{tokenize, Token};

pub fn parse_body(src: &str) -> Result<Expr, LambdaError> {
    let tokens = tokenize(src)?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.ternary()?;
    match parser.peek() {
        None => Ok(expr),
        Some(t) => Err(LambdaError::Body(format!(
            "unexpected trailing token: {:?}",
            t
        ))),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token) -> Result<(), LambdaError> {
        if self.eat(&token) {
            Ok(())
        } else {
            Err(LambdaError::Body(format!(
                "expected {:?}, found {:?}",
                token,
                self.peek()
            )))
        }
    }

    fn ternary(&mut self) -> Result<Expr, LambdaError> {
        let cond = self.binary(0)?;
        if self.eat(&Token::Question) {
            let then = self.ternary()?;
            self.expect(Token::Colon)?;
            let alt = self.ternary()?;
            Ok(Expr::Ternary(Box::new(cond), Box::new(then), Box::new(alt)))
        } else {
            Ok(cond)
        }
    }

    fn binary(&mut self, min_bp: u8) -> Result<Expr, LambdaError> {
        let mut lhs = self.unary()?;
        loop {
            let (op, bp) = match self.peek() {
                Some(Token::OrOr) => (BinaryOp::Or, 1),
                Some(Token::AndAnd) => (BinaryOp::And, 2),
                Some(Token::EqEq) => (BinaryOp::Eq, 3),
                Some(Token::NotEq) => (BinaryOp::Ne, 3),
                Some(Token::Lt) => (BinaryOp::Lt, 4),
                Some(Token::Le) => (BinaryOp::Le, 4),
                Some(Token::Gt) => (BinaryOp::Gt, 4),
                Some(Token::Ge) => (BinaryOp::Ge, 4),
                Some(Token::Plus) => (BinaryOp::Add, 5),
                Some(Token::Minus) => (BinaryOp::Sub, 5),
                Some(Token::Star) => (BinaryOp::Mul, 6),
                Some(Token::Slash) => (BinaryOp::Div, 6),
                Some(Token::Percent) => (BinaryOp::Rem, 6),
                _ => break,
            };
            if bp < min_bp {
                break;
            }
            self.pos += 1;
            let rhs = self.binary(bp + 1)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, LambdaError> {
        if self.eat(&Token::Bang) {
            Ok(Expr::Unary(UnaryOp::Not, Box::new(self.unary()?)))
        } else if self.eat(&Token::Minus) {
            Ok(Expr::Unary(UnaryOp::Neg, Box::new(self.unary()?)))
        } else {
            self.postfix()
        }
    }

    fn postfix(&mut self) -> Result<Expr, LambdaError> {
        let mut expr = self.primary()?;
        loop {
            if self.eat(&Token::Dot) {
                match self.bump() {
                    Some(Token::Ident(name)) => {
                        expr = Expr::Member(Box::new(expr), name);
                    }
                    other => {
                        return Err(LambdaError::Body(format!(
                            "expected member name after '.', found {:?}",
                            other
                        )))
                    }
                }
            } else if self.eat(&Token::LBracket) {
                let index = self.ternary()?;
                self.expect(Token::RBracket)?;
                expr = Expr::Index(Box::new(expr), Box::new(index));
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, LambdaError> {
        match self.bump() {
            Some(Token::Int(i)) => Ok(Expr::Int(i)),
            Some(Token::Float(f)) => Ok(Expr::Float(f)),
            Some(Token::Str(s)) => Ok(Expr::Str(s)),
            Some(Token::True) => Ok(Expr::Bool(true)),
            Some(Token::False) => Ok(Expr::Bool(false)),
            Some(Token::Null) => Ok(Expr::Null),
            Some(Token::This) => Ok(Expr::This),
            Some(Token::Ident(name)) => Ok(Expr::Ident(name)),
            Some(Token::LParen) => {
                let inner = self.ternary()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            other => Err(LambdaError::Body(format!(
                "expected an expression, found {:?}",
                other
            ))),
        }
    }
}
