//! Hand-rolled tokenizer for lambda bodies.

use crate::error::LambdaError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Int(i64),
    Float(f64),
    Str(String),
    Ident(String),
    True,
    False,
    Null,
    This,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,
    Question,
    Colon,
    Dot,
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
}

pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

pub fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

pub fn tokenize(src: &str) -> Result<Vec<Token>, LambdaError> {
    let mut tokens = Vec::new();
    let mut chars = src.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            c if c.is_ascii_digit() => {
                let mut text = String::new();
                let mut is_float = false;
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() {
                        text.push(d);
                        chars.next();
                    } else if d == '.' && !is_float {
                        // Only consume the dot when a digit follows; otherwise
                        // it is member access on a literal.
                        let mut ahead = chars.clone();
                        ahead.next();
                        if ahead.peek().is_some_and(|n| n.is_ascii_digit()) {
                            is_float = true;
                            text.push(d);
                            chars.next();
                        } else {
                            break;
                        }
                    } else {
                        break;
                    }
                }
                if is_float {
                    let f = text
                        .parse::<f64>()
                        .map_err(|e| LambdaError::Body(format!("bad number literal: {}", e)))?;
                    tokens.push(Token::Float(f));
                } else {
                    let i = text
                        .parse::<i64>()
                        .map_err(|e| LambdaError::Body(format!("bad number literal: {}", e)))?;
                    tokens.push(Token::Int(i));
                }
            }
            '\'' | '"' => {
                let quote = c;
                chars.next();
                let mut text = String::new();
                let mut closed = false;
                while let Some(d) = chars.next() {
                    if d == '\\' {
                        match chars.next() {
                            Some('n') => text.push('\n'),
                            Some('t') => text.push('\t'),
                            Some(other) => text.push(other),
                            None => break,
                        }
                    } else if d == quote {
                        closed = true;
                        break;
                    } else {
                        text.push(d);
                    }
                }
                if !closed {
                    return Err(LambdaError::Body("unterminated string literal".into()));
                }
                tokens.push(Token::Str(text));
            }
            c if is_ident_start(c) => {
                let mut name = String::new();
                while let Some(&d) = chars.peek() {
                    if is_ident_continue(d) {
                        name.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(match name.as_str() {
                    "true" => Token::True,
                    "false" => Token::False,
                    "null" => Token::Null,
                    "this" => Token::This,
                    _ => Token::Ident(name),
                });
            }
            _ => {
                chars.next();
                let token = match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Star,
                    '/' => Token::Slash,
                    '%' => Token::Percent,
                    '?' => Token::Question,
                    ':' => Token::Colon,
                    '.' => Token::Dot,
                    ',' => Token::Comma,
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    '[' => Token::LBracket,
                    ']' => Token::RBracket,
                    '!' => {
                        if chars.peek() == Some(&'=') {
                            chars.next();
                            // `!==` collapses to strict inequality.
                            if chars.peek() == Some(&'=') {
                                chars.next();
                            }
                            Token::NotEq
                        } else {
                            Token::Bang
                        }
                    }
                    '=' => {
                        if chars.peek() == Some(&'=') {
                            chars.next();
                            // `===` collapses to strict equality.
                            if chars.peek() == Some(&'=') {
                                chars.next();
                            }
                            Token::EqEq
                        } else {
                            return Err(LambdaError::Body(
                                "assignment is not allowed in a lambda body".into(),
                            ));
                        }
                    }
                    '<' => {
                        if chars.peek() == Some(&'=') {
                            chars.next();
                            Token::Le
                        } else {
                            Token::Lt
                        }
                    }
                    '>' => {
                        if chars.peek() == Some(&'=') {
                            chars.next();
                            Token::Ge
                        } else {
                            Token::Gt
                        }
                    }
                    '&' => {
                        if chars.peek() == Some(&'&') {
                            chars.next();
                            Token::AndAnd
                        } else {
                            return Err(LambdaError::Body("unexpected character: &".into()));
                        }
                    }
                    '|' => {
                        if chars.peek() == Some(&'|') {
                            chars.next();
                            Token::OrOr
                        } else {
                            return Err(LambdaError::Body("unexpected character: |".into()));
                        }
                    }
                    other => {
                        return Err(LambdaError::Body(format!(
                            "unexpected character: {}",
                            other
                        )))
                    }
                };
                tokens.push(token);
            }
        }
    }

    Ok(tokens)
}
