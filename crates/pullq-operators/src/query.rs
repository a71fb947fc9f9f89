//! Fluent query surface over [`Enumerable`].
//!
//! Every method forwards to the free operator functions; the trait exists so
//! pipelines read left to right. Fallible methods return `OpResult` because
//! selector compilation happens at the call, before any enumeration.

use std::ops::ControlFlow;

use indexmap::IndexMap;
use pullq_core::prelude::*;

use crate::join::JoinType;
use crate::sort::OrderChain;
use crate::traits::{OpResult, Selector};
use crate::{consume, distinct, filter, flatten, group, join, reverse, select, slice, sort, union};

pub trait QueryExt {
    fn select(&self, selector: impl Into<Selector>) -> OpResult<Enumerable>;
    fn filter(&self, predicate: impl Into<Selector>) -> OpResult<Enumerable>;
    /// Filter with a context value bound as `this` inside the predicate.
    fn filter_with(&self, predicate: impl Into<Selector>, context: Value) -> OpResult<Enumerable>;
    fn take(&self, n: usize) -> Enumerable;
    fn skip(&self, n: usize) -> Enumerable;
    fn step(&self, n: usize) -> Enumerable;
    fn group_by(&self, key_selector: impl Into<Selector>) -> OpResult<Enumerable>;
    fn union(&self, other: impl IntoEnumerable) -> Enumerable;
    fn order_by(&self, selector: impl Into<Selector>) -> OpResult<OrderChain>;
    fn distinct(&self) -> Enumerable;
    fn distinct_by(&self, selector: impl Into<Selector>) -> OpResult<Enumerable>;
    fn reverse(&self) -> Enumerable;
    /// Expand each element through the source-adapter rule and flatten.
    fn flatten(&self) -> Enumerable;
    fn select_many(&self, selector: impl Into<Selector>) -> OpResult<Enumerable>;
    /// Inner join with the default equality comparer.
    fn join(&self, right: impl IntoEnumerable) -> Enumerable;
    fn join_with(
        &self,
        right: impl IntoEnumerable,
        kind: JoinType,
        comparer: Option<Selector>,
    ) -> OpResult<Enumerable>;
    /// Apply an arbitrary function to the whole sequence. Escape hatch; makes
    /// no laziness promise.
    fn pipe<T>(&self, f: impl FnOnce(&Enumerable) -> T) -> T;

    fn each(&self, f: impl FnMut(&Value, usize) -> ControlFlow<()>);
    fn to_vec(&self) -> Vec<Value>;
    fn first(&self) -> Option<Value>;
    fn first_where(&self, predicate: impl Into<Selector>) -> OpResult<Option<Value>>;
    fn last(&self) -> Option<Value>;
    fn count(&self) -> usize;
    fn count_where(&self, predicate: impl Into<Selector>) -> OpResult<usize>;
    fn hash(
        &self,
        key_selector: Option<Selector>,
        value_selector: Option<Selector>,
    ) -> OpResult<IndexMap<String, Value>>;
    fn contains(&self, item: &Value) -> bool;
    fn any(&self) -> bool;
    fn min(&self) -> Option<Value>;
    fn min_by(&self, selector: impl Into<Selector>) -> OpResult<Option<Value>>;
    fn max(&self) -> Option<Value>;
    fn max_by(&self, selector: impl Into<Selector>) -> OpResult<Option<Value>>;
    fn sum(&self) -> Value;
    fn sum_by(&self, selector: impl Into<Selector>) -> OpResult<Value>;
}

impl QueryExt for Enumerable {
    fn select(&self, selector: impl Into<Selector>) -> OpResult<Enumerable> {
        select::select(self, Some(selector.into()))
    }

    fn filter(&self, predicate: impl Into<Selector>) -> OpResult<Enumerable> {
        filter::filter(self, Some(predicate.into()), None)
    }

    fn filter_with(&self, predicate: impl Into<Selector>, context: Value) -> OpResult<Enumerable> {
        filter::filter(self, Some(predicate.into()), Some(context))
    }

    fn take(&self, n: usize) -> Enumerable {
        slice::take(self, n)
    }

    fn skip(&self, n: usize) -> Enumerable {
        slice::skip(self, n)
    }

    fn step(&self, n: usize) -> Enumerable {
        slice::step(self, n)
    }

    fn group_by(&self, key_selector: impl Into<Selector>) -> OpResult<Enumerable> {
        group::group_by(self, Some(key_selector.into()))
    }

    fn union(&self, other: impl IntoEnumerable) -> Enumerable {
        union::union(self, other)
    }

    fn order_by(&self, selector: impl Into<Selector>) -> OpResult<OrderChain> {
        sort::order_by(self, Some(selector.into()))
    }

    fn distinct(&self) -> Enumerable {
        // No selector and no compilation, so this cannot fail.
        match distinct::distinct(self, None) {
            Ok(e) => e,
            Err(_) => Enumerable::empty(),
        }
    }

    fn distinct_by(&self, selector: impl Into<Selector>) -> OpResult<Enumerable> {
        distinct::distinct(self, Some(selector.into()))
    }

    fn reverse(&self) -> Enumerable {
        reverse::reverse(self)
    }

    fn flatten(&self) -> Enumerable {
        match flatten::select_many(self, None) {
            Ok(e) => e,
            Err(_) => Enumerable::empty(),
        }
    }

    fn select_many(&self, selector: impl Into<Selector>) -> OpResult<Enumerable> {
        flatten::select_many(self, Some(selector.into()))
    }

    fn join(&self, right: impl IntoEnumerable) -> Enumerable {
        match join::join(self, right, JoinType::Inner, None) {
            Ok(e) => e,
            Err(_) => Enumerable::empty(),
        }
    }

    fn join_with(
        &self,
        right: impl IntoEnumerable,
        kind: JoinType,
        comparer: Option<Selector>,
    ) -> OpResult<Enumerable> {
        join::join(self, right, kind, comparer)
    }

    fn pipe<T>(&self, f: impl FnOnce(&Enumerable) -> T) -> T {
        f(self)
    }

    fn each(&self, f: impl FnMut(&Value, usize) -> ControlFlow<()>) {
        consume::each(self, f)
    }

    fn to_vec(&self) -> Vec<Value> {
        consume::to_vec(self)
    }

    fn first(&self) -> Option<Value> {
        consume::first(self, None).unwrap_or(None)
    }

    fn first_where(&self, predicate: impl Into<Selector>) -> OpResult<Option<Value>> {
        consume::first(self, Some(predicate.into()))
    }

    fn last(&self) -> Option<Value> {
        consume::last(self)
    }

    fn count(&self) -> usize {
        consume::count(self, None).unwrap_or(0)
    }

    fn count_where(&self, predicate: impl Into<Selector>) -> OpResult<usize> {
        consume::count(self, Some(predicate.into()))
    }

    fn hash(
        &self,
        key_selector: Option<Selector>,
        value_selector: Option<Selector>,
    ) -> OpResult<IndexMap<String, Value>> {
        consume::hash(self, key_selector, value_selector)
    }

    fn contains(&self, item: &Value) -> bool {
        consume::contains(self, item)
    }

    fn any(&self) -> bool {
        consume::any(self)
    }

    fn min(&self) -> Option<Value> {
        consume::min(self, None).unwrap_or(None)
    }

    fn min_by(&self, selector: impl Into<Selector>) -> OpResult<Option<Value>> {
        consume::min(self, Some(selector.into()))
    }

    fn max(&self) -> Option<Value> {
        consume::max(self, None).unwrap_or(None)
    }

    fn max_by(&self, selector: impl Into<Selector>) -> OpResult<Option<Value>> {
        consume::max(self, Some(selector.into()))
    }

    fn sum(&self) -> Value {
        consume::sum(self, None).unwrap_or(Value::Int(0))
    }

    fn sum_by(&self, selector: impl Into<Selector>) -> OpResult<Value> {
        consume::sum(self, Some(selector.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipelines_read_left_to_right() {
        let out = times(10)
            .filter("x => x % 2 == 0")
            .unwrap()
            .select("x => x * x")
            .unwrap()
            .take(3)
            .to_vec();
        assert_eq!(out, vec![Value::Int(0), Value::Int(4), Value::Int(16)]);
    }

    #[test]
    fn pipe_hands_over_the_sequence() {
        let n = times(5).pipe(|e| e.count());
        assert_eq!(n, 5);
    }

    #[test]
    fn order_chain_reads_fluently() {
        let src = Enumerable::from_vec(vec![Value::Int(2), Value::Int(1), Value::Int(3)]);
        let out = src
            .order_by("|x| x")
            .unwrap()
            .descending()
            .materialize();
        assert_eq!(out, vec![Value::Int(3), Value::Int(2), Value::Int(1)]);
    }

    #[test]
    fn laziness_survives_the_fluent_layer() {
        // A selector that would loop forever if select were eager.
        let src = times(1_000_000);
        let out = src.select("x => x").unwrap().take(2).to_vec();
        assert_eq!(out, vec![Value::Int(0), Value::Int(1)]);
    }
}
