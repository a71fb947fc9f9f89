use thiserror::Error;

/// Compile-time failures of the lambda compiler. The first four carry the
/// exact messages callers match on; `Body` covers expression-grammar errors
/// inside an otherwise well-formed lambda.
///
/// Evaluation is total (missing members and bad arithmetic fold to `Null` and
/// `NaN`), so there is no runtime variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LambdaError {
    #[error("SyntaxError: Not a valid lambda expression. Example: x => x.foo")]
    NotALambda,

    #[error("SyntaxError: Lambda signature missing. For a parameterless signature, use: () => 42")]
    SignatureMissing,

    #[error("SyntaxError: Lambda signature is invalid.")]
    SignatureInvalid,

    #[error("SyntaxError: Lambda must return something.")]
    EmptyBody,

    #[error("Lambda body is invalid: {0}")]
    Body(String),
}
