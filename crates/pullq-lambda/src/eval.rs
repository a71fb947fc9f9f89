//! Total evaluator for compiled lambda bodies.
//!
//! Mirrors the loose semantics of the notation's origin: member access on a
//! missing key or a non-map value yields `Null`, arithmetic over non-numeric
//! operands yields `NaN`, and unknown identifiers resolve to `Null`. Nothing
//! here can fail at enumeration time.

use pullq_core::prelude::*;
use std::cmp::Ordering;

use crate::ast::{BinaryOp, Expr, UnaryOp};

/// Per-call binding of parameter names to argument values, plus the optional
/// compile-time context reachable through `this`.
pub struct Scope<'a> {
    pub params: &'a [String],
    pub args: &'a [Value],
    pub context: Option<&'a Value>,
}

impl Scope<'_> {
    fn lookup(&self, name: &str) -> Value {
        match self.params.iter().position(|p| p == name) {
            // Missing arguments pad with Null; extra arguments are ignored.
            Some(i) => self.args.get(i).cloned().unwrap_or(Value::Null),
            None => Value::Null,
        }
    }
}

pub fn evaluate(expr: &Expr, scope: &Scope<'_>) -> Value {
    match expr {
        Expr::Null => Value::Null,
        Expr::Bool(b) => Value::Bool(*b),
        Expr::Int(i) => Value::Int(*i),
        Expr::Float(f) => Value::Float(*f),
        Expr::Str(s) => Value::Str(s.clone()),
        Expr::This => scope.context.cloned().unwrap_or(Value::Null),
        Expr::Ident(name) => scope.lookup(name),
        Expr::Member(recv, name) => {
            let target = evaluate(recv, scope);
            if name == "length" {
                match target.length() {
                    Some(n) => Value::Int(n as i64),
                    None => target.get(name),
                }
            } else {
                target.get(name)
            }
        }
        Expr::Index(recv, idx) => {
            let target = evaluate(recv, scope);
            let index = evaluate(idx, scope);
            target.index(&index)
        }
        Expr::Unary(op, inner) => {
            let v = evaluate(inner, scope);
            match op {
                UnaryOp::Not => Value::Bool(!v.truthy()),
                UnaryOp::Neg => value_neg(&v),
            }
        }
        Expr::Binary(op, lhs, rhs) => match op {
            // Short-circuiting forms evaluate the right side lazily.
            BinaryOp::And => {
                let l = evaluate(lhs, scope);
                if !l.truthy() {
                    Value::Bool(false)
                } else {
                    Value::Bool(evaluate(rhs, scope).truthy())
                }
            }
            BinaryOp::Or => {
                let l = evaluate(lhs, scope);
                if l.truthy() {
                    Value::Bool(true)
                } else {
                    Value::Bool(evaluate(rhs, scope).truthy())
                }
            }
            _ => {
                let l = evaluate(lhs, scope);
                let r = evaluate(rhs, scope);
                match op {
                    BinaryOp::Add => value_add(&l, &r),
                    BinaryOp::Sub => value_sub(&l, &r),
                    BinaryOp::Mul => value_mul(&l, &r),
                    BinaryOp::Div => value_div(&l, &r),
                    BinaryOp::Rem => value_rem(&l, &r),
                    BinaryOp::Eq => Value::Bool(value_eq(&l, &r)),
                    BinaryOp::Ne => Value::Bool(!value_eq(&l, &r)),
                    BinaryOp::Lt => Value::Bool(value_cmp(&l, &r) == Ordering::Less),
                    BinaryOp::Le => Value::Bool(value_cmp(&l, &r) != Ordering::Greater),
                    BinaryOp::Gt => Value::Bool(value_cmp(&l, &r) == Ordering::Greater),
                    BinaryOp::Ge => Value::Bool(value_cmp(&l, &r) != Ordering::Less),
                    BinaryOp::And | BinaryOp::Or => unreachable!("handled above"),
                }
            }
        },
        Expr::Ternary(cond, then, alt) => {
            if evaluate(cond, scope).truthy() {
                evaluate(then, scope)
            } else {
                evaluate(alt, scope)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_body;

    fn eval(src: &str, params: &[&str], args: &[Value]) -> Value {
        let expr = parse_body(src).unwrap();
        let params: Vec<String> = params.iter().map(|s| s.to_string()).collect();
        evaluate(
            &expr,
            &Scope {
                params: &params,
                args,
                context: None,
            },
        )
    }

    #[test]
    fn member_access_on_null_is_null() {
        assert_eq!(eval("x.foo.bar", &["x"], &[Value::Null]), Value::Null);
    }

    #[test]
    fn length_pseudo_property() {
        let arr = Value::array([Value::Int(1), Value::Int(2)]);
        assert_eq!(eval("x.length", &["x"], &[arr]), Value::Int(2));
        assert_eq!(eval("s.length", &["s"], &[Value::str("abc")]), Value::Int(3));
    }

    #[test]
    fn missing_arguments_pad_with_null() {
        assert_eq!(eval("b", &["a", "b"], &[Value::Int(1)]), Value::Null);
    }

    #[test]
    fn ternary_and_comparison() {
        assert_eq!(
            eval("a > b ? a : b", &["a", "b"], &[Value::Int(3), Value::Int(7)]),
            Value::Int(7)
        );
    }

    #[test]
    fn non_numeric_arithmetic_is_nan() {
        let v = eval("x * 2", &["x"], &[Value::array([])]);
        assert!(matches!(v, Value::Float(f) if f.is_nan()));
    }
}
