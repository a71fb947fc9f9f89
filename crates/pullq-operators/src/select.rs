//! Projection: maps each element (and its 0-based index) through a selector.

use pullq_core::prelude::*;
use pullq_lambda::Callable;

use crate::traits::{require, OpResult, Selector};

pub fn select(source: &Enumerable, selector: Option<Selector>) -> OpResult<Enumerable> {
    let sel = require(selector, "selector")?.compile()?;
    let src = source.replay();
    Ok(Enumerable::new(move || {
        Box::new(SelectCursor {
            inner: src.enumerator(),
            sel: sel.clone(),
            index: 0,
            current: None,
        })
    }))
}

struct SelectCursor {
    inner: EnumeratorBox,
    sel: Callable,
    index: i64,
    current: Option<Value>,
}

impl Enumerator for SelectCursor {
    fn next(&mut self) -> bool {
        if self.inner.next() {
            let item = self.inner.current().unwrap_or(Value::Null);
            self.current = Some(self.sel.call(&[item, Value::Int(self.index)]));
            self.index += 1;
            true
        } else {
            self.current = None;
            false
        }
    }

    fn current(&self) -> Option<Value> {
        self.current.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::OpError;

    #[test]
    fn maps_elements() {
        let src = Enumerable::from_vec(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        let out = select(&src, Some("x => x * x".into())).unwrap();
        assert_eq!(
            out.materialize(),
            vec![Value::Int(1), Value::Int(4), Value::Int(9)]
        );
    }

    #[test]
    fn passes_zero_based_index() {
        let src = Enumerable::from_vec(vec![Value::Int(100), Value::Int(101)]);
        let out = select(&src, Some("x, i => i".into())).unwrap();
        assert_eq!(out.materialize(), vec![Value::Int(0), Value::Int(1)]);
    }

    #[test]
    fn missing_selector_is_a_usage_error() {
        let src = Enumerable::empty();
        assert!(matches!(select(&src, None), Err(OpError::Usage(_))));
    }
}
