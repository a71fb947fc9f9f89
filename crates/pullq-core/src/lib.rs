#![forbid(unsafe_code)]
//! pullq-core: dynamic value model, the enumerator protocol, and source adapters.
//!
//! Everything else in the engine builds on the two-method cursor contract in
//! [`enumerate`]: `next()` advances and reports availability, `current()` reads
//! the element under the cursor (or `None` outside valid positions). An
//! [`enumerate::Enumerable`] stores an enumerator *factory*, never a cursor, so
//! the same sequence description can be replayed by any number of independent
//! passes.
//!
//! This crate is pure and synchronous: no I/O, no async, no background work.

pub mod enumerate;
pub mod error;
pub mod prelude;
pub mod source;
pub mod value;

pub use enumerate::{Enumerable, Enumerator, EnumeratorBox};
pub use error::{Error, Result};
pub use source::{from, range, range_of, times, IntoEnumerable};
pub use value::Value;
