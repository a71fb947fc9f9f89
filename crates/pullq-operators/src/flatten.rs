//! Flattening projection (`select_many`).
//!
//! Each upstream element expands — through the selector when given, else as
//! itself — into its own enumeration via the source-adapter rule, and the
//! inner enumeration is fully drained before the outer cursor advances.

use pullq_core::prelude::*;
use pullq_lambda::Callable;

use crate::traits::{OpResult, Selector};

pub fn select_many(source: &Enumerable, selector: Option<Selector>) -> OpResult<Enumerable> {
    let sel = match selector {
        Some(s) => Some(s.compile()?),
        None => None,
    };
    let src = source.replay();
    Ok(Enumerable::new(move || {
        Box::new(FlattenCursor {
            outer: src.enumerator(),
            sel: sel.clone(),
            inner: None,
        })
    }))
}

struct FlattenCursor {
    outer: EnumeratorBox,
    sel: Option<Callable>,
    inner: Option<EnumeratorBox>,
}

impl Enumerator for FlattenCursor {
    fn next(&mut self) -> bool {
        loop {
            match &mut self.inner {
                None => {
                    if !self.outer.next() {
                        return false;
                    }
                    let item = self.outer.current().unwrap_or(Value::Null);
                    let expanded = match &self.sel {
                        Some(sel) => sel.call(&[item]),
                        None => item,
                    };
                    self.inner = Some(from(expanded).enumerator());
                }
                Some(cursor) => {
                    if cursor.next() {
                        return true;
                    }
                    self.inner = None;
                }
            }
        }
    }

    fn current(&self) -> Option<Value> {
        self.inner.as_ref().and_then(|c| c.current())
    }
}
