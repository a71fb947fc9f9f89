#![forbid(unsafe_code)]
//! pullq-operators: lazy query operators (select/filter/slice/group/sort/join),
//! terminal consumers, and the dynamic operator registry.
//!
//! Design intent:
//! - Every operator is a free function taking the upstream `Enumerable` first;
//!   the fluent surface in [`query`] is a thin forwarding layer.
//! - Constructing an operator does no enumeration work. Lazy operators pull
//!   element-by-element; eager ones (`group_by`, the order chain, `reverse`,
//!   `join`) drain their upstream the moment they are *enumerated*.
//! - Usage errors (missing selector, malformed lambda text) surface at
//!   construction, before any lazy work begins.

pub mod consume;
pub mod distinct;
pub mod filter;
pub mod flatten;
pub mod group;
pub mod join;
pub mod query;
pub mod registry;
pub mod reverse;
pub mod select;
pub mod slice;
pub mod sort;
pub mod traits;
pub mod union;

pub use join::JoinType;
pub use query::QueryExt;
pub use registry::{Arg, Outcome, Registry};
pub use sort::OrderChain;
pub use traits::{OpError, OpResult, Selector};
