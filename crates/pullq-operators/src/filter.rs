//! Filtering: keeps elements for which the predicate is truthy.
//!
//! The predicate receives the element and its 0-based upstream index; an
//! optional context value binds `this` inside a textual predicate.

use pullq_core::prelude::*;
use pullq_lambda::Callable;

use crate::traits::{require, OpResult, Selector};

pub fn filter(
    source: &Enumerable,
    predicate: Option<Selector>,
    context: Option<Value>,
) -> OpResult<Enumerable> {
    let pred = require(predicate, "predicate")?.compile_with(context)?;
    let src = source.replay();
    Ok(Enumerable::new(move || {
        Box::new(FilterCursor {
            inner: src.enumerator(),
            pred: pred.clone(),
            index: 0,
        })
    }))
}

struct FilterCursor {
    inner: EnumeratorBox,
    pred: Callable,
    index: i64,
}

impl Enumerator for FilterCursor {
    fn next(&mut self) -> bool {
        while self.inner.next() {
            let item = self.inner.current().unwrap_or(Value::Null);
            let keep = self.pred.call(&[item, Value::Int(self.index)]).truthy();
            self.index += 1;
            if keep {
                return true;
            }
        }
        false
    }

    fn current(&self) -> Option<Value> {
        self.inner.current()
    }
}
