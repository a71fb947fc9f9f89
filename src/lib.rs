#![forbid(unsafe_code)]
//! pullq: a lazy, pull-based enumeration engine over dynamic values.
//!
//! Sequences are [`Enumerable`] values: replayable descriptions holding an
//! enumerator factory. Operators compose lazily on top of the two-method
//! cursor protocol (`next`/`current`); selectors and predicates are either
//! native Rust closures or compact textual lambdas (`x => x.foo`,
//! `|a, b| a + b`) compiled by [`pullq_lambda`].
//!
//! ```
//! use pullq::prelude::*;
//!
//! let squares = times(10)
//!     .filter("x => x % 2 == 0")?
//!     .select("x => x * x")?
//!     .take(3)
//!     .to_vec();
//! assert_eq!(squares, vec![Value::Int(0), Value::Int(4), Value::Int(16)]);
//! # Ok::<(), pullq::OpError>(())
//! ```

pub use pullq_core;
pub use pullq_lambda;
pub use pullq_operators;

pub use pullq_core::{from, range, range_of, times, Enumerable, Enumerator, IntoEnumerable, Value};
pub use pullq_lambda::{Callable, LambdaError};
pub use pullq_operators::{
    Arg, JoinType, OpError, OpResult, OrderChain, Outcome, QueryExt, Registry, Selector,
};

pub mod prelude {
    pub use pullq_core::prelude::*;
    pub use pullq_lambda::{Callable, LambdaError};
    pub use pullq_operators::{
        Arg, JoinType, OpError, OpResult, OrderChain, Outcome, QueryExt, Registry, Selector,
    };
}
