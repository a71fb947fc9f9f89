//! Source adapters: wrap arrays, property maps, existing enumerations, or
//! generated integer sequences into an `Enumerable`.
//!
//! Polymorphic input is modeled as a small closed set of `IntoEnumerable`
//! impls dispatched statically, not by inheritance or runtime shape probing.

use crate::enumerate::Enumerable;
use crate::error::{Error, Result};
use crate::value::Value;

/// Closed set of things that can act as a sequence source.
pub trait IntoEnumerable {
    fn into_enumerable(self) -> Enumerable;
}

impl IntoEnumerable for Enumerable {
    /// Defensive re-wrap, never identity: `from` called twice on the same
    /// enumerable yields two distinct `Enumerable` values.
    fn into_enumerable(self) -> Enumerable {
        self.replay()
    }
}

impl IntoEnumerable for &Enumerable {
    fn into_enumerable(self) -> Enumerable {
        self.replay()
    }
}

impl IntoEnumerable for Vec<Value> {
    fn into_enumerable(self) -> Enumerable {
        Enumerable::from_vec(self)
    }
}

impl IntoEnumerable for Value {
    fn into_enumerable(self) -> Enumerable {
        from_value(&self)
    }
}

impl IntoEnumerable for &Value {
    fn into_enumerable(self) -> Enumerable {
        from_value(self)
    }
}

/// Wrap any supported source into an `Enumerable`.
pub fn from(source: impl IntoEnumerable) -> Enumerable {
    source.into_enumerable()
}

/// Shape-directed adaptation of a dynamic value:
/// - arrays enumerate by index;
/// - maps eagerly snapshot into ordered `{key, value}` pairs;
/// - strings enumerate their characters (the array-like rule);
/// - `Null` is empty;
/// - any other scalar enumerates as a single element.
fn from_value(v: &Value) -> Enumerable {
    match v {
        Value::Null => Enumerable::empty(),
        Value::Array(items) => Enumerable::from_vec(items.clone()),
        Value::Map(m) => Enumerable::from_vec(
            m.iter()
                .map(|(k, v)| Value::pair(k.clone(), v.clone()))
                .collect(),
        ),
        Value::Str(s) => {
            Enumerable::from_vec(s.chars().map(|c| Value::Str(c.to_string())).collect())
        }
        scalar => Enumerable::from_vec(vec![scalar.clone()]),
    }
}

/// Integers `0..n-1`. Non-positive `n` yields an empty enumeration.
pub fn times(n: i64) -> Enumerable {
    Enumerable::from_vec((0..n.max(0)).map(Value::Int).collect())
}

/// Inclusive integer sequence `start..=end`; empty when `start > end`.
pub fn range(start: i64, end: i64) -> Enumerable {
    Enumerable::from_vec((start..=end).map(Value::Int).collect())
}

/// `range` over a 2-element `[start, end]` array value.
pub fn range_of(bounds: &Value) -> Result<Enumerable> {
    match bounds {
        Value::Array(items) => match items.as_slice() {
            [Value::Int(start), Value::Int(end)] => Ok(range(*start, *end)),
            _ => Err(Error::Usage(
                "range expects a 2-element [start, end] integer array".into(),
            )),
        },
        _ => Err(Error::Usage(
            "range expects a 2-element [start, end] integer array".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_generates_zero_based_sequence() {
        assert_eq!(
            times(3).materialize(),
            vec![Value::Int(0), Value::Int(1), Value::Int(2)]
        );
        assert!(times(0).materialize().is_empty());
        assert!(times(-2).materialize().is_empty());
    }

    #[test]
    fn range_is_inclusive_and_empty_when_reversed() {
        assert_eq!(
            range(2, 4).materialize(),
            vec![Value::Int(2), Value::Int(3), Value::Int(4)]
        );
        assert!(range(4, 2).materialize().is_empty());
    }

    #[test]
    fn range_of_parses_bounds_array() {
        let bounds = Value::array([Value::Int(1), Value::Int(3)]);
        assert_eq!(range_of(&bounds).unwrap().materialize().len(), 3);
        assert!(range_of(&Value::Int(1)).is_err());
    }

    #[test]
    fn map_source_yields_ordered_pairs() {
        let m = Value::map([
            ("a".to_string(), Value::Int(1)),
            ("b".to_string(), Value::Int(2)),
        ]);
        let pairs = from(&m).materialize();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].get("key"), Value::str("a"));
        assert_eq!(pairs[0].get("value"), Value::Int(1));
        assert_eq!(pairs[1].get("key"), Value::str("b"));
    }

    #[test]
    fn null_source_is_empty() {
        assert!(from(&Value::Null).materialize().is_empty());
    }
}
