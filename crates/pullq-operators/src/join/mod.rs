//! Set-wise join over two sequences.
//!
//! Both sides materialize when the result is enumerated. The primary side is
//! driven index by index; the secondary side is scanned for every comparer
//! match. Inner joins pick the shorter side as primary purely to bound the
//! scan — the observable pair order is always the left-driven order, so the
//! heuristic never leaks into results.

use pullq_core::prelude::*;
use pullq_lambda::Callable;

use crate::traits::{OpError, OpResult, Selector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinType {
    #[default]
    Inner,
    Left,
    Right,
}

impl JoinType {
    pub fn parse(text: &str) -> OpResult<JoinType> {
        match text {
            "inner" => Ok(JoinType::Inner),
            "left" => Ok(JoinType::Left),
            "right" => Ok(JoinType::Right),
            other => Err(OpError::Usage(format!(
                "unknown join type '{}'; expected inner, left, or right",
                other
            ))),
        }
    }
}

/// Joins `left` with `right`. Pairs come out as `[leftValue, rightValue]`
/// arrays; outer joins fill the unmatched side with `Null`. The comparer
/// receives `(leftElem, rightElem)` and defaults to `value_eq`.
pub fn join(
    left: &Enumerable,
    right: impl IntoEnumerable,
    kind: JoinType,
    comparer: Option<Selector>,
) -> OpResult<Enumerable> {
    let comparer = match comparer {
        Some(c) => Some(c.compile()?),
        None => None,
    };
    let lhs = left.replay();
    let rhs = right.into_enumerable();
    Ok(Enumerable::new(move || {
        let ls = lhs.materialize();
        let rs = rhs.materialize();
        #[cfg(feature = "tracing")]
        tracing::trace!(left = ls.len(), right = rs.len(), ?kind, "joining sides");
        let pairs = join_pairs(&ls, &rs, kind, comparer.as_ref());
        Box::new(IndexCursor::new(pairs))
    }))
}

fn matches(comparer: Option<&Callable>, l: &Value, r: &Value) -> bool {
    match comparer {
        Some(c) => c.call(&[l.clone(), r.clone()]).truthy(),
        None => value_eq(l, r),
    }
}

fn pair(l: Value, r: Value) -> Value {
    Value::Array(vec![l, r])
}

fn join_pairs(ls: &[Value], rs: &[Value], kind: JoinType, cmp: Option<&Callable>) -> Vec<Value> {
    let mut out = Vec::new();
    match kind {
        JoinType::Left => {
            for l in ls {
                let mut hit = false;
                for r in rs {
                    if matches(cmp, l, r) {
                        hit = true;
                        out.push(pair(l.clone(), r.clone()));
                    }
                }
                if !hit {
                    out.push(pair(l.clone(), Value::Null));
                }
            }
        }
        JoinType::Right => {
            for r in rs {
                let mut hit = false;
                for l in ls {
                    if matches(cmp, l, r) {
                        hit = true;
                        out.push(pair(l.clone(), r.clone()));
                    }
                }
                if !hit {
                    out.push(pair(Value::Null, r.clone()));
                }
            }
        }
        JoinType::Inner => {
            if ls.len() <= rs.len() {
                for l in ls {
                    for r in rs {
                        if matches(cmp, l, r) {
                            out.push(pair(l.clone(), r.clone()));
                        }
                    }
                }
            } else {
                // Shorter right side drives the scan; tag each pair with its
                // left index and restore the left-driven order afterwards.
                let mut tagged: Vec<(usize, Value)> = Vec::new();
                for r in rs {
                    for (li, l) in ls.iter().enumerate() {
                        if matches(cmp, l, r) {
                            tagged.push((li, pair(l.clone(), r.clone())));
                        }
                    }
                }
                tagged.sort_by_key(|(li, _)| *li);
                out.extend(tagged.into_iter().map(|(_, p)| p));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Enumerable {
        Enumerable::from_vec(values.iter().copied().map(Value::Int).collect())
    }

    fn int_pair(l: Option<i64>, r: Option<i64>) -> Value {
        pair(
            l.map(Value::Int).unwrap_or(Value::Null),
            r.map(Value::Int).unwrap_or(Value::Null),
        )
    }

    #[test]
    fn left_join_fills_unmatched_with_null() {
        let out = join(
            &ints(&[1, 2, 3, 4, 5]),
            ints(&[1, 3, 5]),
            JoinType::Left,
            None,
        )
        .unwrap();
        assert_eq!(
            out.materialize(),
            vec![
                int_pair(Some(1), Some(1)),
                int_pair(Some(2), None),
                int_pair(Some(3), Some(3)),
                int_pair(Some(4), None),
                int_pair(Some(5), Some(5)),
            ]
        );
    }

    #[test]
    fn right_join_mirrors_left() {
        let out = join(&ints(&[1, 3]), ints(&[1, 2, 3]), JoinType::Right, None).unwrap();
        assert_eq!(
            out.materialize(),
            vec![
                int_pair(Some(1), Some(1)),
                int_pair(None, Some(2)),
                int_pair(Some(3), Some(3)),
            ]
        );
    }

    #[test]
    fn inner_join_order_is_left_driven_whichever_side_is_shorter() {
        let expected = vec![
            int_pair(Some(1), Some(1)),
            int_pair(Some(3), Some(3)),
            int_pair(Some(5), Some(5)),
        ];
        // Right side shorter: right drives the scan internally.
        let out = join(&ints(&[1, 2, 3, 4, 5]), ints(&[1, 3, 5]), JoinType::Inner, None).unwrap();
        assert_eq!(out.materialize(), expected);
        // Left side shorter: left drives directly. Same observable order.
        let out = join(&ints(&[1, 3, 5]), ints(&[5, 4, 3, 2, 1]), JoinType::Inner, None).unwrap();
        assert_eq!(
            out.materialize(),
            vec![
                int_pair(Some(1), Some(1)),
                int_pair(Some(3), Some(3)),
                int_pair(Some(5), Some(5)),
            ]
        );
    }

    #[test]
    fn custom_comparer() {
        let out = join(
            &ints(&[1, 2]),
            ints(&[10, 20]),
            JoinType::Inner,
            Some("a, b => a * 10 == b".into()),
        )
        .unwrap();
        assert_eq!(
            out.materialize(),
            vec![int_pair(Some(1), Some(10)), int_pair(Some(2), Some(20))]
        );
    }

    #[test]
    fn multiple_matches_emit_contiguously() {
        let out = join(
            &ints(&[1, 2]),
            ints(&[1, 1, 2]),
            JoinType::Left,
            None,
        )
        .unwrap();
        assert_eq!(
            out.materialize(),
            vec![
                int_pair(Some(1), Some(1)),
                int_pair(Some(1), Some(1)),
                int_pair(Some(2), Some(2)),
            ]
        );
    }

    #[test]
    fn join_type_parsing() {
        assert_eq!(JoinType::parse("left").unwrap(), JoinType::Left);
        assert!(JoinType::parse("outer").is_err());
    }
}
