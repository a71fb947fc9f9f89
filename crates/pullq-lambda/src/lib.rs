#![forbid(unsafe_code)]
//! pullq-lambda: compiles the compact textual lambda notation into a callable.
//!
//! Two textual syntaxes are accepted:
//!
//! - arrow form: `x => x.foo`, `(a, b) => a + b`, `() => 42`
//! - pipe form: `|x| x.foo`, `|a, b| a + b` (parameters required)
//!
//! The body is a single expression; the signature is split on the *first*
//! `=>` only, so a later `=>` inside the body (say, in a string literal)
//! survives verbatim. Compilation happens once per string; callers wanting
//! reuse hold on to the [`Callable`].

pub mod ast;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;

use std::sync::Arc;

use pullq_core::value::Value;

use crate::ast::Expr;
use crate::eval::{evaluate, Scope};
use crate::lexer::{is_ident_continue, is_ident_start};

pub use crate::error::LambdaError;

/// A compiled lambda or a native closure, uniformly invocable with a slice of
/// argument values. Immutable once built; cheap to clone.
#[derive(Clone)]
pub struct Callable {
    kind: CallableKind,
}

#[derive(Clone)]
enum CallableKind {
    Compiled(Arc<Compiled>),
    Native(Arc<dyn Fn(&[Value]) -> Value + Send + Sync>),
}

struct Compiled {
    params: Vec<String>,
    body: Expr,
    context: Option<Value>,
}

impl Callable {
    /// Compile a textual lambda with no bound context.
    pub fn compile(expression: &str) -> Result<Callable, LambdaError> {
        Callable::compile_with(expression, None)
    }

    /// Compile a textual lambda, binding `context` as the value of `this`
    /// inside the body for every call.
    pub fn compile_with(
        expression: &str,
        context: Option<Value>,
    ) -> Result<Callable, LambdaError> {
        let (params, body_src) = split_lambda(expression)?;
        let body = parser::parse_body(body_src)?;
        Ok(Callable {
            kind: CallableKind::Compiled(Arc::new(Compiled {
                params,
                body,
                context,
            })),
        })
    }

    /// Wrap a native Rust closure. The closure owns whatever context it needs.
    pub fn native(f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Callable {
        Callable {
            kind: CallableKind::Native(Arc::new(f)),
        }
    }

    /// Rebind the evaluation context of a compiled lambda. Native closures
    /// carry their own environment and pass through unchanged.
    pub fn with_context(self, context: Value) -> Callable {
        match self.kind {
            CallableKind::Compiled(c) => Callable {
                kind: CallableKind::Compiled(Arc::new(Compiled {
                    params: c.params.clone(),
                    body: c.body.clone(),
                    context: Some(context),
                })),
            },
            native => Callable { kind: native },
        }
    }

    /// Invoke with positional arguments. Missing arguments pad with `Null`;
    /// extras are ignored. Evaluation is total and cannot fail.
    pub fn call(&self, args: &[Value]) -> Value {
        match &self.kind {
            CallableKind::Compiled(c) => evaluate(
                &c.body,
                &Scope {
                    params: &c.params,
                    args,
                    context: c.context.as_ref(),
                },
            ),
            CallableKind::Native(f) => f(args),
        }
    }

    /// Declared parameter count, when known (compiled lambdas only).
    pub fn arity(&self) -> Option<usize> {
        match &self.kind {
            CallableKind::Compiled(c) => Some(c.params.len()),
            CallableKind::Native(_) => None,
        }
    }
}

impl std::fmt::Debug for Callable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            CallableKind::Compiled(c) => f
                .debug_struct("Callable")
                .field("params", &c.params)
                .finish_non_exhaustive(),
            CallableKind::Native(_) => f.write_str("Callable::Native"),
        }
    }
}

/// Split an expression into its parameter list and body text.
fn split_lambda(expression: &str) -> Result<(Vec<String>, &str), LambdaError> {
    let expression = expression.trim();

    // Pipe form: |a, b| body. Params between the pipes must be non-empty.
    if let Some(rest) = expression.strip_prefix('|') {
        if let Some(close) = rest.find('|') {
            if let Some(params) = parse_param_list(&rest[..close]) {
                if !params.is_empty() {
                    let body = rest[close + 1..].trim();
                    if body.is_empty() {
                        return Err(LambdaError::EmptyBody);
                    }
                    return Ok((params, body));
                }
            }
        }
        // Not a well-formed pipe lambda; fall through to the arrow rules.
    }

    // Arrow form: split on the first `=>` only, so the body keeps any later
    // `=>` text verbatim.
    let arrow = expression.find("=>").ok_or(LambdaError::NotALambda)?;
    let signature = expression[..arrow].trim();
    let body = expression[arrow + 2..].trim();

    if signature.is_empty() {
        return Err(LambdaError::SignatureMissing);
    }

    // Strip optional wrapping parentheses, then validate the identifier list.
    let mut inner = signature;
    inner = inner.strip_prefix('(').unwrap_or(inner);
    inner = inner.strip_suffix(')').unwrap_or(inner);
    let params = parse_param_list(inner).ok_or(LambdaError::SignatureInvalid)?;

    if body.is_empty() {
        return Err(LambdaError::EmptyBody);
    }
    Ok((params, body))
}

/// Comma-separated identifier list; empty input is a valid empty list.
/// Returns `None` when any piece fails the identifier grammar.
fn parse_param_list(text: &str) -> Option<Vec<String>> {
    let text = text.trim();
    if text.is_empty() {
        return Some(Vec::new());
    }
    let mut params = Vec::new();
    for piece in text.split(',') {
        let name = piece.trim();
        let mut chars = name.chars();
        match chars.next() {
            Some(c) if is_ident_start(c) => {}
            _ => return None,
        }
        if !chars.all(is_ident_continue) {
            return None;
        }
        params.push(name.to_string());
    }
    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_form_compiles() {
        let f = Callable::compile("x => x * x").unwrap();
        assert_eq!(f.call(&[Value::Int(3)]), Value::Int(9));
        assert_eq!(f.arity(), Some(1));
    }

    #[test]
    fn parenthesized_and_bare_signatures() {
        assert_eq!(
            Callable::compile("(x) => x").unwrap().call(&[Value::Int(1)]),
            Value::Int(1)
        );
        assert_eq!(
            Callable::compile("() => 42").unwrap().call(&[]),
            Value::Int(42)
        );
    }

    #[test]
    fn pipe_form_matches_arrow_form() {
        let arrow = Callable::compile("a, b => a + b").unwrap();
        let pipe = Callable::compile("|a, b| a + b").unwrap();
        let args = [Value::Int(8), Value::Int(16)];
        assert_eq!(arrow.call(&args), Value::Int(24));
        assert_eq!(pipe.call(&args), Value::Int(24));
    }

    #[test]
    fn syntax_error_taxonomy() {
        assert_eq!(
            Callable::compile("x + 1").unwrap_err(),
            LambdaError::NotALambda
        );
        assert_eq!(
            Callable::compile("=> x").unwrap_err(),
            LambdaError::SignatureMissing
        );
        assert_eq!(
            Callable::compile("a b => a").unwrap_err(),
            LambdaError::SignatureInvalid
        );
        assert_eq!(
            Callable::compile("1x => x").unwrap_err(),
            LambdaError::SignatureInvalid
        );
        assert_eq!(
            Callable::compile("() =>").unwrap_err(),
            LambdaError::EmptyBody
        );
        assert_eq!(Callable::compile("|x|").unwrap_err(), LambdaError::EmptyBody);
    }

    #[test]
    fn mandated_messages() {
        assert_eq!(
            LambdaError::NotALambda.to_string(),
            "SyntaxError: Not a valid lambda expression. Example: x => x.foo"
        );
        assert_eq!(
            LambdaError::SignatureMissing.to_string(),
            "SyntaxError: Lambda signature missing. For a parameterless signature, use: () => 42"
        );
        assert_eq!(
            LambdaError::SignatureInvalid.to_string(),
            "SyntaxError: Lambda signature is invalid."
        );
        assert_eq!(
            LambdaError::EmptyBody.to_string(),
            "SyntaxError: Lambda must return something."
        );
    }

    #[test]
    fn body_keeps_later_arrows() {
        let f = Callable::compile("x => 'a => b'").unwrap();
        assert_eq!(f.call(&[Value::Null]), Value::str("a => b"));
    }

    #[test]
    fn context_binds_this() {
        let f = Callable::compile_with("x => this.scale * x", Some(Value::map([(
            "scale".to_string(),
            Value::Int(10),
        )])))
        .unwrap();
        assert_eq!(f.call(&[Value::Int(3)]), Value::Int(30));
    }

    #[test]
    fn native_closures_pass_through() {
        let f = Callable::native(|args| args.first().cloned().unwrap_or(Value::Null));
        assert_eq!(f.call(&[Value::str("hi")]), Value::str("hi"));
        assert_eq!(f.arity(), None);
    }
}
