//! Grouping: partitions the upstream by key, preserving first-occurrence
//! key order and the original relative order inside each group.
//!
//! Eager: drains the upstream once per enumeration pass, at the moment the
//! result is enumerated (never at construction).

use pullq_core::prelude::*;

use crate::traits::{require, OpResult, Selector};

pub fn group_by(source: &Enumerable, key_selector: Option<Selector>) -> OpResult<Enumerable> {
    let sel = require(key_selector, "key selector")?.compile()?;
    let src = source.replay();
    Ok(Enumerable::new(move || {
        let mut keys: Vec<Value> = Vec::new();
        let mut buckets: Vec<Vec<Value>> = Vec::new();

        let mut e = src.enumerator();
        while e.next() {
            let item = e.current().unwrap_or(Value::Null);
            let key = sel.call(&[item.clone()]);
            match keys.iter().position(|k| value_eq(k, &key)) {
                Some(i) => buckets[i].push(item),
                None => {
                    keys.push(key);
                    buckets.push(vec![item]);
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(groups = keys.len(), "drained upstream into groups");

        let groups: Vec<Value> = keys
            .into_iter()
            .zip(buckets)
            .map(|(key, items)| Value::group(key, items))
            .collect();
        Box::new(IndexCursor::new(groups))
    }))
}
