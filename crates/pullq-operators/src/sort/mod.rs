//! Ordering: `order_by` and its tie-breaking chain.
//!
//! `order_by` returns an [`OrderChain`], a builder holding an ordered list of
//! comparator stages. The chain is finalized only when the resulting
//! `Enumerable` is enumerated: that pass materializes the upstream, runs a
//! stable sort, and walks the sorted vector. Between construction and first
//! enumeration the chain is caller-owned, single-writer.
//!
//! `descending` flips the sign of a comparison only when the *final* (most
//! specific) stage decided it. Decisions made by an earlier stage stay put,
//! so reversing never undoes an ordering already fixed before the last
//! tie-break. A single-stage chain therefore reverses fully, while a chain
//! with tie-breaks keeps its primary grouping and reverses only inside the
//! tie-broken groups. `descending` consumes the chain and hands back a plain
//! `Enumerable`: a sort is reversed once.

use std::cmp::Ordering;
use std::sync::Arc;

use pullq_core::prelude::*;
use pullq_lambda::Callable;

use crate::traits::{require, OpResult, Selector};

pub fn order_by(source: &Enumerable, selector: Option<Selector>) -> OpResult<OrderChain> {
    let stage = require(selector, "selector")?.compile()?;
    Ok(OrderChain {
        source: source.replay(),
        stages: vec![stage],
    })
}

/// Comparator builder returned by `order_by`.
pub struct OrderChain {
    source: Enumerable,
    stages: Vec<Callable>,
}

impl OrderChain {
    /// Append a tie-breaking stage, consulted only when every earlier stage
    /// reported equality.
    pub fn then_by(mut self, selector: impl Into<Selector>) -> OpResult<OrderChain> {
        let stage = selector.into().compile()?;
        self.stages.push(stage);
        Ok(self)
    }

    /// Registry entry point: same as [`OrderChain::then_by`] but with the
    /// missing-argument check folded in.
    pub fn then_by_opt(self, selector: Option<Selector>) -> OpResult<OrderChain> {
        let stage = require(selector, "selector")?;
        self.then_by(stage)
    }

    /// Finalize in ascending order.
    pub fn to_enumerable(&self) -> Enumerable {
        sorted_enumerable(self.source.replay(), self.stages.clone(), false)
    }

    /// Finalize with the final-stage sign flip. Consumes the chain; the
    /// result is a plain `Enumerable` with no further ordering methods.
    pub fn descending(self) -> Enumerable {
        sorted_enumerable(self.source, self.stages, true)
    }

    /// Convenience: finalize ascending and materialize.
    pub fn to_vec(&self) -> Vec<Value> {
        self.to_enumerable().materialize()
    }
}

impl From<OrderChain> for Enumerable {
    fn from(chain: OrderChain) -> Enumerable {
        chain.to_enumerable()
    }
}

fn sorted_enumerable(source: Enumerable, stages: Vec<Callable>, reversed: bool) -> Enumerable {
    let stages = Arc::new(stages);
    Enumerable::new(move || {
        let mut items = source.materialize();
        #[cfg(feature = "tracing")]
        tracing::trace!(rows = items.len(), stages = stages.len(), "sorting upstream");
        items.sort_by(|x, y| compare(&stages, reversed, x, y));
        Box::new(IndexCursor::new(items))
    })
}

/// Walk stages until one decides; flip the sign only when the deciding stage
/// is the last one and the chain was reversed.
fn compare(stages: &[Callable], reversed: bool, x: &Value, y: &Value) -> Ordering {
    let last = stages.len() - 1;
    for (i, stage) in stages.iter().enumerate() {
        let a = stage.call(&[x.clone()]);
        let b = stage.call(&[y.clone()]);
        let ord = value_cmp(&a, &b);
        if ord != Ordering::Equal {
            return if reversed && i == last { ord.reverse() } else { ord };
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Enumerable {
        Enumerable::from_vec(values.iter().copied().map(Value::Int).collect())
    }

    #[test]
    fn sorts_by_selector() {
        let chain = order_by(&ints(&[3, 1, 2]), Some("|x| x".into())).unwrap();
        assert_eq!(
            chain.to_vec(),
            vec![Value::Int(1), Value::Int(2), Value::Int(3)]
        );
    }

    #[test]
    fn single_stage_descending_reverses_fully() {
        let chain = order_by(&ints(&[1, 2, 3]), Some("|x| x".into())).unwrap();
        assert_eq!(
            chain.descending().materialize(),
            vec![Value::Int(3), Value::Int(2), Value::Int(1)]
        );
    }

    #[test]
    fn descending_does_not_reverse_prior_stages() {
        // Distinct lengths: the primary stage decides everything, so the
        // reversed final stage never fires and the order stays put.
        let rows = vec![
            Value::array([Value::Int(1)]),
            Value::array([Value::Int(2), Value::Int(2)]),
            Value::array([Value::Int(3), Value::Int(3), Value::Int(3)]),
        ];
        let src = Enumerable::from_vec(rows.clone());
        let out = order_by(&src, Some("|x| x.length".into()))
            .unwrap()
            .then_by("|x| x[0]")
            .unwrap()
            .descending()
            .materialize();
        assert_eq!(out, rows);
    }

    #[test]
    fn sort_happens_per_enumeration_pass() {
        let chain = order_by(&ints(&[2, 1]), Some("|x| x".into())).unwrap();
        let sorted = chain.to_enumerable();
        assert_eq!(sorted.materialize(), sorted.materialize());
    }
}
