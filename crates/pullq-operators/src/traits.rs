//! Common operator interfaces: the error type and the selector argument.

use pullq_core::value::Value;
use pullq_lambda::{Callable, LambdaError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpError {
    /// Misuse caught at operator-construction time (missing selector,
    /// bad argument shape). Never deferred to enumeration time.
    #[error("usage error: {0}")]
    Usage(String),

    /// Lambda text that failed to compile. Raised at construction, where the
    /// string is first seen.
    #[error(transparent)]
    Lambda(#[from] LambdaError),
}

pub type OpResult<T> = Result<T, OpError>;

/// Selector/predicate/comparator argument accepted by operators: either
/// lambda text compiled on the spot, or an already-callable function passed
/// through unchanged.
#[derive(Debug, Clone)]
pub enum Selector {
    Expr(String),
    Func(Callable),
}

impl Selector {
    /// A native closure over raw argument slices.
    pub fn func(f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Selector {
        Selector::Func(Callable::native(f))
    }

    pub fn compile(self) -> OpResult<Callable> {
        self.compile_with(None)
    }

    /// Compile, binding `context` as the lambda's `this` when supplied.
    pub fn compile_with(self, context: Option<Value>) -> OpResult<Callable> {
        match self {
            Selector::Expr(src) => {
                let compiled = Callable::compile(&src)?;
                Ok(match context {
                    Some(ctx) => compiled.with_context(ctx),
                    None => compiled,
                })
            }
            Selector::Func(f) => Ok(match context {
                Some(ctx) => f.with_context(ctx),
                None => f,
            }),
        }
    }
}

impl From<&str> for Selector {
    fn from(src: &str) -> Self {
        Selector::Expr(src.to_string())
    }
}

impl From<String> for Selector {
    fn from(src: String) -> Self {
        Selector::Expr(src)
    }
}

impl From<Callable> for Selector {
    fn from(f: Callable) -> Self {
        Selector::Func(f)
    }
}

/// Construction-time guard for operators whose selector is mandatory.
pub fn require(selector: Option<Selector>, what: &str) -> OpResult<Selector> {
    selector.ok_or_else(|| OpError::Usage(format!("a {} is required", what)))
}
