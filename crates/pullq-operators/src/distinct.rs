//! Duplicate elimination, preserving first-occurrence order.

use pullq_core::prelude::*;
use pullq_lambda::Callable;

use crate::traits::{OpResult, Selector};

/// Drops elements whose (optionally projected) value was already yielded.
/// Comparison is the operator notion of equality (`value_eq`).
pub fn distinct(source: &Enumerable, selector: Option<Selector>) -> OpResult<Enumerable> {
    let sel = match selector {
        Some(s) => Some(s.compile()?),
        None => None,
    };
    let src = source.replay();
    Ok(Enumerable::new(move || {
        Box::new(DistinctCursor {
            inner: src.enumerator(),
            sel: sel.clone(),
            seen: Vec::new(),
        })
    }))
}

struct DistinctCursor {
    inner: EnumeratorBox,
    sel: Option<Callable>,
    seen: Vec<Value>,
}

impl Enumerator for DistinctCursor {
    fn next(&mut self) -> bool {
        while self.inner.next() {
            let item = self.inner.current().unwrap_or(Value::Null);
            let probe = match &self.sel {
                Some(sel) => sel.call(&[item]),
                None => item,
            };
            if !self.seen.iter().any(|s| value_eq(s, &probe)) {
                self.seen.push(probe);
                return true;
            }
        }
        false
    }

    fn current(&self) -> Option<Value> {
        self.inner.current()
    }
}
