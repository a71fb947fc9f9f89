//! Convenient re-exports for downstream crates.

pub use crate::enumerate::{Enumerable, Enumerator, EnumeratorBox, IndexCursor};
pub use crate::error::{Error, Result};
pub use crate::source::{from, range, range_of, times, IntoEnumerable};
pub use crate::value::{
    value_add, value_cmp, value_div, value_eq, value_mul, value_neg, value_rem, value_sub, Value,
};
