//! Dynamic element type flowing through every enumerator.
//!
//! Operators never know the concrete shape of their elements, so comparison,
//! equality, truthiness, and arithmetic are all defined here once and shared
//! by the operator library and the lambda evaluator.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<Value>),
    /// Insertion-ordered map. Property-map sources and `group_by` output both
    /// rely on the order being preserved.
    Map(IndexMap<String, Value>),
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(items.into_iter().collect())
    }

    pub fn map(entries: impl IntoIterator<Item = (String, Value)>) -> Self {
        Value::Map(entries.into_iter().collect())
    }

    /// `{key, value}` pair shape produced by property-map enumeration.
    pub fn pair(key: impl Into<String>, value: Value) -> Self {
        let mut m = IndexMap::new();
        m.insert("key".to_string(), Value::Str(key.into()));
        m.insert("value".to_string(), value);
        Value::Map(m)
    }

    /// `{key, items}` group shape produced by `group_by`.
    pub fn group(key: Value, items: Vec<Value>) -> Self {
        let mut m = IndexMap::new();
        m.insert("key".to_string(), key);
        m.insert("items".to_string(), Value::Array(items));
        Value::Map(m)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Truthiness: `Null`, `false`, `0`, `0.0`, and `""` are falsy.
    /// Empty arrays and maps are truthy.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Array(_) | Value::Map(_) => true,
        }
    }

    /// Member lookup on maps; `Null` for missing keys or non-map receivers.
    pub fn get(&self, key: &str) -> Value {
        match self {
            Value::Map(m) => m.get(key).cloned().unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }

    /// Element count for sequence-shaped values (the `.length` pseudo-property).
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::Array(items) => Some(items.len()),
            Value::Map(m) => Some(m.len()),
            _ => None,
        }
    }

    /// Index lookup: arrays by position, maps by string rendering of the index,
    /// strings by character position. Out-of-range or unsupported → `Null`.
    pub fn index(&self, idx: &Value) -> Value {
        match (self, idx) {
            (Value::Array(items), Value::Int(i)) => {
                usize::try_from(*i)
                    .ok()
                    .and_then(|i| items.get(i).cloned())
                    .unwrap_or(Value::Null)
            }
            (Value::Str(s), Value::Int(i)) => usize::try_from(*i)
                .ok()
                .and_then(|i| s.chars().nth(i))
                .map(|c| Value::Str(c.to_string()))
                .unwrap_or(Value::Null),
            (Value::Map(m), key) => m.get(&key.to_string()).cloned().unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }
}

/// Assign a numeric order to value kinds for mixed-kind comparisons.
fn kind_order(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::Float(_) => 2,
        Value::Str(_) => 3,
        Value::Array(_) => 4,
        Value::Map(_) => 5,
    }
}

/// Total ordering over values.
///
/// Nulls sort first; ints and floats compare numerically across kinds; NaN
/// sorts after every other number; arrays compare lexicographically; maps
/// compare by their entry lists. Mixed kinds order by kind rank.
pub fn value_cmp(a: &Value, b: &Value) -> Ordering {
    use Value::*;

    match (a, b) {
        (Null, Null) => Ordering::Equal,
        (Null, _) => Ordering::Less,
        (_, Null) => Ordering::Greater,
        (Bool(x), Bool(y)) => x.cmp(y),
        (Int(x), Int(y)) => x.cmp(y),
        (Str(x), Str(y)) => x.cmp(y),
        (Array(x), Array(y)) => {
            for (u, v) in x.iter().zip(y.iter()) {
                match value_cmp(u, v) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
            x.len().cmp(&y.len())
        }
        (Map(x), Map(y)) => {
            for ((kx, vx), (ky, vy)) in x.iter().zip(y.iter()) {
                match kx.cmp(ky) {
                    Ordering::Equal => {}
                    other => return other,
                }
                match value_cmp(vx, vy) {
                    Ordering::Equal => {}
                    other => return other,
                }
            }
            x.len().cmp(&y.len())
        }
        // Remaining numeric pairs (Float/Float, Int/Float) compare numerically;
        // anything else orders by kind rank.
        _ => match (numeric(a), numeric(b)) {
            (Some(x), Some(y)) => float_cmp(x, y),
            _ => kind_order(a).cmp(&kind_order(b)),
        },
    }
}

fn numeric(v: &Value) -> Option<f64> {
    match v {
        Value::Int(i) => Some(*i as f64),
        Value::Float(f) => Some(*f),
        _ => None,
    }
}

fn float_cmp(x: f64, y: f64) -> Ordering {
    if x.is_nan() && y.is_nan() {
        Ordering::Equal
    } else if x.is_nan() {
        Ordering::Greater
    } else if y.is_nan() {
        Ordering::Less
    } else {
        x.partial_cmp(&y).unwrap_or(Ordering::Equal)
    }
}

/// Operator notion of equality: structural, with `Int`/`Float` comparing
/// numerically. Used by `distinct`, `contains`, and the default join comparer.
pub fn value_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(x), Value::Float(y)) | (Value::Float(y), Value::Int(x)) => *x as f64 == *y,
        _ => a == b,
    }
}

/// Addition with the string-concatenation rule: if either side is a string,
/// both render to text and concatenate; otherwise numeric with int/float
/// promotion. Non-numeric operands yield `Float(NaN)`.
pub fn value_add(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Str(_), _) | (_, Value::Str(_)) => Value::Str(format!("{}{}", a, b)),
        (Value::Int(x), Value::Int(y)) => Value::Int(x.wrapping_add(*y)),
        _ => numeric_binop(a, b, |x, y| x + y),
    }
}

pub fn value_sub(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Value::Int(x.wrapping_sub(*y)),
        _ => numeric_binop(a, b, |x, y| x - y),
    }
}

pub fn value_mul(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Value::Int(x.wrapping_mul(*y)),
        _ => numeric_binop(a, b, |x, y| x * y),
    }
}

/// Division always goes through floats, then narrows back to `Int` when the
/// result is exact. `x / 0` follows float semantics (infinity or NaN).
pub fn value_div(a: &Value, b: &Value) -> Value {
    let v = numeric_binop(a, b, |x, y| x / y);
    narrow(v)
}

pub fn value_rem(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) if *y != 0 => Value::Int(x.wrapping_rem(*y)),
        _ => numeric_binop(a, b, |x, y| x % y),
    }
}

pub fn value_neg(a: &Value) -> Value {
    match a {
        Value::Int(i) => Value::Int(i.wrapping_neg()),
        _ => match a.as_f64() {
            Some(f) => Value::Float(-f),
            None => Value::Float(f64::NAN),
        },
    }
}

fn numeric_binop(a: &Value, b: &Value, f: impl Fn(f64, f64) -> f64) -> Value {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => Value::Float(f(x, y)),
        _ => Value::Float(f64::NAN),
    }
}

fn narrow(v: Value) -> Value {
    match v {
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Value::Int(f as i64)
        }
        other => other,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Value::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_kind_numeric_compare() {
        assert_eq!(value_cmp(&Value::Int(2), &Value::Float(2.5)), Ordering::Less);
        assert!(value_eq(&Value::Int(1), &Value::Float(1.0)));
        assert!(!value_eq(&Value::Int(1), &Value::Str("1".into())));
    }

    #[test]
    fn nulls_sort_first_nan_sorts_last() {
        assert_eq!(value_cmp(&Value::Null, &Value::Int(-5)), Ordering::Less);
        assert_eq!(
            value_cmp(&Value::Float(f64::NAN), &Value::Float(1.0)),
            Ordering::Greater
        );
    }

    #[test]
    fn string_concat_rule() {
        assert_eq!(
            value_add(&Value::str("a"), &Value::Int(1)),
            Value::str("a1")
        );
        assert_eq!(value_add(&Value::Int(8), &Value::Int(16)), Value::Int(24));
    }

    #[test]
    fn division_narrows_when_exact() {
        assert_eq!(value_div(&Value::Int(6), &Value::Int(3)), Value::Int(2));
        assert_eq!(value_div(&Value::Int(1), &Value::Int(2)), Value::Float(0.5));
    }

    #[test]
    fn falsy_values() {
        for v in [
            Value::Null,
            Value::Bool(false),
            Value::Int(0),
            Value::Float(0.0),
            Value::str(""),
        ] {
            assert!(!v.truthy(), "{:?} should be falsy", v);
        }
        assert!(Value::Array(vec![]).truthy());
    }
}
