//! The enumerator protocol: `next()`/`current()` cursors and the replayable
//! `Enumerable` that manufactures them.
//!
//! Invariants every cursor must uphold:
//! - `current()` before the first successful `next()` returns `None`.
//! - once `next()` has returned `false`, it keeps returning `false` and
//!   `current()` keeps returning `None` (no resurrection).
//!
//! There is no `reset()`. Operators that need a second scan materialize into
//! a `Vec` and build a fresh index cursor instead of rewinding a live one.

use std::sync::Arc;

use crate::value::Value;

/// Stateful forward-only cursor over a sequence of values.
pub trait Enumerator {
    /// Advance the cursor. Returns whether an element is now available.
    fn next(&mut self) -> bool;

    /// Read the element under the cursor, or `None` outside valid positions.
    fn current(&self) -> Option<Value>;
}

pub type EnumeratorBox = Box<dyn Enumerator>;

/// Immutable, replayable sequence description.
///
/// Holds exactly one capability: produce a brand-new, independently-stateful
/// cursor on demand. Two passes over the same `Enumerable` never share state,
/// so it is safe to enumerate from any number of call sites.
#[derive(Clone)]
pub struct Enumerable {
    factory: Arc<dyn Fn() -> EnumeratorBox + Send + Sync>,
}

impl Enumerable {
    pub fn new(factory: impl Fn() -> EnumeratorBox + Send + Sync + 'static) -> Self {
        Self {
            factory: Arc::new(factory),
        }
    }

    /// Manufacture a fresh cursor positioned before the first element.
    pub fn enumerator(&self) -> EnumeratorBox {
        (self.factory)()
    }

    /// Defensive re-wrap: a new `Enumerable` value sharing the same factory.
    /// Wrapping twice yields two distinct values, never an identity passthrough.
    pub fn replay(&self) -> Enumerable {
        Enumerable {
            factory: Arc::clone(&self.factory),
        }
    }

    pub fn empty() -> Enumerable {
        Enumerable::from_vec(Vec::new())
    }

    /// Sequence backed by an in-memory vector, enumerated by index.
    pub fn from_vec(items: Vec<Value>) -> Enumerable {
        let items = Arc::new(items);
        Enumerable::new(move || {
            Box::new(IndexCursor {
                items: Arc::clone(&items),
                index: 0,
                started: false,
            })
        })
    }

    /// Drain one full pass into a vector. Used by every eager operator.
    pub fn materialize(&self) -> Vec<Value> {
        let mut out = Vec::new();
        let mut e = self.enumerator();
        while e.next() {
            if let Some(v) = e.current() {
                out.push(v);
            } else {
                out.push(Value::Null);
            }
        }
        out
    }
}

impl std::fmt::Debug for Enumerable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enumerable").finish_non_exhaustive()
    }
}

/// Index cursor over a shared vector: the workhorse behind array sources and
/// every materializing operator.
pub struct IndexCursor {
    items: Arc<Vec<Value>>,
    index: usize,
    started: bool,
}

impl IndexCursor {
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items: Arc::new(items),
            index: 0,
            started: false,
        }
    }
}

impl Enumerator for IndexCursor {
    fn next(&mut self) -> bool {
        if !self.started {
            self.started = true;
        } else if self.index < self.items.len() {
            self.index += 1;
        }
        self.index < self.items.len()
    }

    fn current(&self) -> Option<Value> {
        if self.started && self.index < self.items.len() {
            Some(self.items[self.index].clone())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_is_none_before_first_next() {
        let e = Enumerable::from_vec(vec![Value::Int(1)]);
        let cursor = e.enumerator();
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn exhausted_cursor_stays_exhausted() {
        let e = Enumerable::from_vec(vec![Value::Int(1)]);
        let mut cursor = e.enumerator();
        assert!(cursor.next());
        assert_eq!(cursor.current(), Some(Value::Int(1)));
        assert!(!cursor.next());
        assert!(!cursor.next());
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn passes_are_independent() {
        let e = Enumerable::from_vec(vec![Value::Int(1), Value::Int(2)]);
        let mut a = e.enumerator();
        let mut b = e.enumerator();
        assert!(a.next());
        assert!(a.next());
        assert!(b.next());
        assert_eq!(b.current(), Some(Value::Int(1)));
        assert_eq!(a.current(), Some(Value::Int(2)));
    }

    #[test]
    fn replay_yields_distinct_wrapper() {
        let e = Enumerable::from_vec(vec![Value::Int(1)]);
        let w = e.replay();
        assert_eq!(w.materialize(), e.materialize());
    }
}
