//! Terminal consumers: operations that drain a cursor instead of wrapping it.

use std::ops::ControlFlow;

use indexmap::IndexMap;
use pullq_core::prelude::*;

use crate::traits::{OpResult, Selector};

/// Pulls every element through `f` with its 0-based index. `f` can stop the
/// scan early by returning `ControlFlow::Break`.
pub fn each(source: &Enumerable, mut f: impl FnMut(&Value, usize) -> ControlFlow<()>) {
    let mut cursor = source.enumerator();
    let mut index = 0usize;
    while cursor.next() {
        let item = cursor.current().unwrap_or(Value::Null);
        if f(&item, index).is_break() {
            break;
        }
        index += 1;
    }
}

pub fn to_vec(source: &Enumerable) -> Vec<Value> {
    source.materialize()
}

/// First element, or first element matching the predicate. The predicate
/// receives `(element, index)`.
pub fn first(source: &Enumerable, predicate: Option<Selector>) -> OpResult<Option<Value>> {
    let pred = match predicate {
        Some(p) => Some(p.compile()?),
        None => None,
    };
    let mut cursor = source.enumerator();
    let mut index = 0i64;
    while cursor.next() {
        let item = cursor.current().unwrap_or(Value::Null);
        let keep = match &pred {
            Some(p) => p.call(&[item.clone(), Value::Int(index)]).truthy(),
            None => true,
        };
        if keep {
            return Ok(Some(item));
        }
        index += 1;
    }
    Ok(None)
}

pub fn last(source: &Enumerable) -> Option<Value> {
    let mut cursor = source.enumerator();
    let mut found = None;
    while cursor.next() {
        found = cursor.current();
    }
    found
}

/// Full drain; with a predicate, counts only matches.
pub fn count(source: &Enumerable, predicate: Option<Selector>) -> OpResult<usize> {
    let pred = match predicate {
        Some(p) => Some(p.compile()?),
        None => None,
    };
    let mut cursor = source.enumerator();
    let mut index = 0i64;
    let mut total = 0usize;
    while cursor.next() {
        let keep = match &pred {
            Some(p) => {
                let item = cursor.current().unwrap_or(Value::Null);
                p.call(&[item, Value::Int(index)]).truthy()
            }
            None => true,
        };
        if keep {
            total += 1;
        }
        index += 1;
    }
    Ok(total)
}

/// Drains into an insertion-ordered string-keyed map.
///
/// Without selectors the element's own `"key"` entry names the slot and its
/// `"value"` entry fills it, so a property-map enumeration reassembles into
/// the original map. Elements lacking those entries fall back to the emission
/// index as key and the element itself as value. Later keys overwrite earlier
/// ones.
pub fn hash(
    source: &Enumerable,
    key_selector: Option<Selector>,
    value_selector: Option<Selector>,
) -> OpResult<IndexMap<String, Value>> {
    let key_sel = match key_selector {
        Some(s) => Some(s.compile()?),
        None => None,
    };
    let val_sel = match value_selector {
        Some(s) => Some(s.compile()?),
        None => None,
    };
    let mut out = IndexMap::new();
    let mut cursor = source.enumerator();
    let mut index = 0i64;
    while cursor.next() {
        let item = cursor.current().unwrap_or(Value::Null);
        let key = match &key_sel {
            Some(sel) => sel.call(&[item.clone(), Value::Int(index)]),
            None => match &item {
                Value::Map(m) if m.contains_key("key") => item.get("key"),
                _ => Value::Int(index),
            },
        };
        let value = match &val_sel {
            Some(sel) => sel.call(&[item.clone(), Value::Int(index)]),
            None => match &item {
                Value::Map(m) if m.contains_key("value") => item.get("value"),
                _ => item,
            },
        };
        out.insert(key.to_string(), value);
        index += 1;
    }
    Ok(out)
}

/// Linear scan by `value_eq`, stopping at the first hit.
pub fn contains(source: &Enumerable, item: &Value) -> bool {
    let mut cursor = source.enumerator();
    while cursor.next() {
        if let Some(current) = cursor.current() {
            if value_eq(&current, item) {
                return true;
            }
        }
    }
    false
}

pub fn any(source: &Enumerable) -> bool {
    source.enumerator().next()
}

pub fn min(source: &Enumerable, selector: Option<Selector>) -> OpResult<Option<Value>> {
    extremum(source, selector, std::cmp::Ordering::Less)
}

pub fn max(source: &Enumerable, selector: Option<Selector>) -> OpResult<Option<Value>> {
    extremum(source, selector, std::cmp::Ordering::Greater)
}

fn extremum(
    source: &Enumerable,
    selector: Option<Selector>,
    wanted: std::cmp::Ordering,
) -> OpResult<Option<Value>> {
    let sel = match selector {
        Some(s) => Some(s.compile()?),
        None => None,
    };
    let mut cursor = source.enumerator();
    let mut best: Option<(Value, Value)> = None;
    while cursor.next() {
        let item = cursor.current().unwrap_or(Value::Null);
        let probe = match &sel {
            Some(sel) => sel.call(&[item.clone()]),
            None => item.clone(),
        };
        match &best {
            Some((_, best_probe)) if value_cmp(&probe, best_probe) != wanted => {}
            _ => best = Some((item, probe)),
        }
    }
    Ok(best.map(|(item, _)| item))
}

/// Numeric accumulation with int/float promotion; starts at `Int(0)` so an
/// empty sequence sums to zero.
pub fn sum(source: &Enumerable, selector: Option<Selector>) -> OpResult<Value> {
    let sel = match selector {
        Some(s) => Some(s.compile()?),
        None => None,
    };
    let mut cursor = source.enumerator();
    let mut total = Value::Int(0);
    while cursor.next() {
        let item = cursor.current().unwrap_or(Value::Null);
        let term = match &sel {
            Some(sel) => sel.call(&[item]),
            None => item,
        };
        total = value_add(&total, &term);
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Enumerable {
        Enumerable::from_vec(values.iter().copied().map(Value::Int).collect())
    }

    #[test]
    fn each_stops_on_break() {
        let mut seen = Vec::new();
        each(&ints(&[1, 2, 3, 4]), |v, _| {
            seen.push(v.clone());
            if seen.len() == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(seen, vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn first_and_last() {
        let src = ints(&[4, 5, 6]);
        assert_eq!(first(&src, None).unwrap(), Some(Value::Int(4)));
        assert_eq!(
            first(&src, Some("|x| x > 4".into())).unwrap(),
            Some(Value::Int(5))
        );
        assert_eq!(last(&src), Some(Value::Int(6)));
        assert_eq!(first(&Enumerable::empty(), None).unwrap(), None);
        assert_eq!(last(&Enumerable::empty()), None);
    }

    #[test]
    fn count_with_and_without_predicate() {
        let src = ints(&[1, 2, 3, 4]);
        assert_eq!(count(&src, None).unwrap(), 4);
        assert_eq!(count(&src, Some("|x| x % 2 == 0".into())).unwrap(), 2);
    }

    #[test]
    fn hash_round_trips_pair_maps() {
        let pairs = vec![
            Value::pair("a", Value::Int(1)),
            Value::pair("b", Value::Int(2)),
        ];
        let out = hash(&Enumerable::from_vec(pairs), None, None).unwrap();
        assert_eq!(out.get("a"), Some(&Value::Int(1)));
        assert_eq!(out.get("b"), Some(&Value::Int(2)));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn hash_defaults_to_emission_index_for_plain_elements() {
        let out = hash(&ints(&[10, 20]), None, None).unwrap();
        assert_eq!(out.get("0"), Some(&Value::Int(10)));
        assert_eq!(out.get("1"), Some(&Value::Int(20)));
    }

    #[test]
    fn hash_with_selectors() {
        let out = hash(
            &ints(&[1, 2]),
            Some("|x| x * 10".into()),
            Some("|x| x + 1".into()),
        )
        .unwrap();
        assert_eq!(out.get("10"), Some(&Value::Int(2)));
        assert_eq!(out.get("20"), Some(&Value::Int(3)));
    }

    #[test]
    fn contains_uses_numeric_cross_equality() {
        let src = ints(&[1, 2, 3]);
        assert!(contains(&src, &Value::Float(2.0)));
        assert!(!contains(&src, &Value::Int(9)));
    }

    #[test]
    fn any_is_non_draining_emptiness_probe() {
        assert!(any(&ints(&[1])));
        assert!(!any(&Enumerable::empty()));
    }

    #[test]
    fn min_max_sum() {
        let src = ints(&[3, 1, 2]);
        assert_eq!(min(&src, None).unwrap(), Some(Value::Int(1)));
        assert_eq!(max(&src, None).unwrap(), Some(Value::Int(3)));
        assert_eq!(sum(&src, None).unwrap(), Value::Int(6));
        assert_eq!(sum(&Enumerable::empty(), None).unwrap(), Value::Int(0));
    }

    #[test]
    fn min_with_selector_returns_the_element_not_the_key() {
        let rows = vec![
            Value::map([("n".to_string(), Value::Int(5))]),
            Value::map([("n".to_string(), Value::Int(2))]),
        ];
        let out = min(&Enumerable::from_vec(rows.clone()), Some("|x| x.n".into())).unwrap();
        assert_eq!(out, Some(rows[1].clone()));
    }
}
