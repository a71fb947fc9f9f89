//! Dynamic operator table: name → boxed operator function.
//!
//! Host bindings and user extensions register operators by name instead of
//! mutating any shared type; `with_builtins` pre-loads the whole operator and
//! consumer set under the camelCase names the textual surface uses. Arguments
//! arrive as a uniform [`Arg`] slice and results come back as an [`Outcome`],
//! so one dispatch signature covers both sequence-producing operators and
//! terminal consumers.

use std::sync::Arc;

use indexmap::IndexMap;
use pullq_core::prelude::*;
use pullq_lambda::Callable;

use crate::join::JoinType;
use crate::traits::{OpError, OpResult, Selector};
use crate::{consume, distinct, filter, flatten, group, join, reverse, select, slice, sort, union};

/// An argument passed through the dynamic surface.
#[derive(Clone)]
pub enum Arg {
    Value(Value),
    Lambda(Callable),
    Seq(Enumerable),
}

/// What an operator hands back: another sequence, or a terminal value.
pub enum Outcome {
    Seq(Enumerable),
    Value(Value),
}

impl Outcome {
    pub fn into_seq(self) -> OpResult<Enumerable> {
        match self {
            Outcome::Seq(e) => Ok(e),
            Outcome::Value(_) => Err(OpError::Usage(
                "operator produced a value, not a sequence".to_string(),
            )),
        }
    }

    pub fn into_value(self) -> OpResult<Value> {
        match self {
            Outcome::Value(v) => Ok(v),
            Outcome::Seq(_) => Err(OpError::Usage(
                "operator produced a sequence, not a value".to_string(),
            )),
        }
    }
}

pub type OperatorFn = Arc<dyn Fn(&Enumerable, &[Arg]) -> OpResult<Outcome> + Send + Sync>;

#[derive(Clone, Default)]
pub struct Registry {
    ops: IndexMap<String, OperatorFn>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Register or replace an operator under `name`.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        op: impl Fn(&Enumerable, &[Arg]) -> OpResult<Outcome> + Send + Sync + 'static,
    ) {
        self.ops.insert(name.into(), Arc::new(op));
    }

    pub fn invoke(&self, name: &str, source: &Enumerable, args: &[Arg]) -> OpResult<Outcome> {
        match self.ops.get(name) {
            Some(op) => op(source, args),
            None => Err(OpError::Usage(format!("unknown operator '{}'", name))),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ops.keys().map(String::as_str)
    }

    /// A registry pre-loaded with the full built-in operator and consumer set.
    pub fn with_builtins() -> Registry {
        let mut r = Registry::new();

        r.register("select", |src, args| {
            Ok(Outcome::Seq(select::select(src, opt_selector(args, 0)?)?))
        });
        r.register("where", |src, args| {
            Ok(Outcome::Seq(filter::filter(
                src,
                opt_selector(args, 0)?,
                opt_value(args, 1),
            )?))
        });
        r.register("take", |src, args| {
            Ok(Outcome::Seq(slice::take(src, want_count(args, 0)?)))
        });
        r.register("skip", |src, args| {
            Ok(Outcome::Seq(slice::skip(src, want_count(args, 0)?)))
        });
        r.register("step", |src, args| {
            Ok(Outcome::Seq(slice::step(src, want_count(args, 0)?)))
        });
        r.register("groupBy", |src, args| {
            Ok(Outcome::Seq(group::group_by(src, opt_selector(args, 0)?)?))
        });
        r.register("union", |src, args| {
            Ok(Outcome::Seq(union::union(src, want_seq(args, 0)?)))
        });
        r.register("distinct", |src, args| {
            Ok(Outcome::Seq(distinct::distinct(src, opt_selector(args, 0)?)?))
        });
        r.register("reverse", |src, _| Ok(Outcome::Seq(reverse::reverse(src))));
        r.register("selectMany", |src, args| {
            Ok(Outcome::Seq(flatten::select_many(src, opt_selector(args, 0)?)?))
        });

        // Each extra selector argument is a tie-breaking stage.
        r.register("orderBy", |src, args| {
            Ok(Outcome::Seq(order_chain(src, args)?.to_enumerable()))
        });
        r.register("orderByDescending", |src, args| {
            Ok(Outcome::Seq(order_chain(src, args)?.descending()))
        });

        // join([type], right[, comparer]); a leading "inner"/"left"/"right"
        // string names the join type, which defaults to inner.
        r.register("join", |src, args| {
            let (kind, rest) = match args.first() {
                Some(Arg::Value(Value::Str(s))) if JoinType::parse(s).is_ok() => {
                    (JoinType::parse(s)?, &args[1..])
                }
                _ => (JoinType::default(), args),
            };
            let right = want_seq(rest, 0)?;
            let comparer = opt_selector(rest, 1)?;
            Ok(Outcome::Seq(join::join(src, right, kind, comparer)?))
        });

        r.register("toArray", |src, _| {
            Ok(Outcome::Value(Value::Array(consume::to_vec(src))))
        });
        r.register("first", |src, args| {
            let found = consume::first(src, opt_selector(args, 0)?)?;
            Ok(Outcome::Value(found.unwrap_or(Value::Null)))
        });
        r.register("last", |src, _| {
            Ok(Outcome::Value(consume::last(src).unwrap_or(Value::Null)))
        });
        r.register("count", |src, args| {
            let n = consume::count(src, opt_selector(args, 0)?)?;
            Ok(Outcome::Value(Value::Int(n as i64)))
        });
        r.register("toObject", |src, args| {
            let map = consume::hash(src, opt_selector(args, 0)?, opt_selector(args, 1)?)?;
            Ok(Outcome::Value(Value::Map(map)))
        });
        r.register("contains", |src, args| {
            let probe = opt_value(args, 0)
                .ok_or_else(|| OpError::Usage("contains needs a value to look for".to_string()))?;
            Ok(Outcome::Value(Value::Bool(consume::contains(src, &probe))))
        });
        r.register("any", |src, _| {
            Ok(Outcome::Value(Value::Bool(consume::any(src))))
        });
        r.register("min", |src, args| {
            let found = consume::min(src, opt_selector(args, 0)?)?;
            Ok(Outcome::Value(found.unwrap_or(Value::Null)))
        });
        r.register("max", |src, args| {
            let found = consume::max(src, opt_selector(args, 0)?)?;
            Ok(Outcome::Value(found.unwrap_or(Value::Null)))
        });
        r.register("sum", |src, args| {
            Ok(Outcome::Value(consume::sum(src, opt_selector(args, 0)?)?))
        });

        // Callback per element; a strict `false` return stops the scan.
        r.register("each", |src, args| {
            let f = match opt_selector(args, 0)? {
                Some(sel) => sel.compile()?,
                None => return Err(OpError::Usage("each needs a callback".to_string())),
            };
            consume::each(src, |item, index| {
                let out = f.call(&[item.clone(), Value::Int(index as i64)]);
                if out == Value::Bool(false) {
                    std::ops::ControlFlow::Break(())
                } else {
                    std::ops::ControlFlow::Continue(())
                }
            });
            Ok(Outcome::Value(Value::Null))
        });

        r
    }
}

fn order_chain(src: &Enumerable, args: &[Arg]) -> OpResult<sort::OrderChain> {
    let mut chain = sort::order_by(src, opt_selector(args, 0)?)?;
    let mut i = 1;
    while i < args.len() {
        chain = chain.then_by_opt(opt_selector(args, i)?)?;
        i += 1;
    }
    Ok(chain)
}

/// Lambda-shaped argument at `index`: lambda text, a pre-built callable, or
/// absent. A non-lambda value there is a usage error.
fn opt_selector(args: &[Arg], index: usize) -> OpResult<Option<Selector>> {
    match args.get(index) {
        None => Ok(None),
        Some(Arg::Lambda(f)) => Ok(Some(Selector::Func(f.clone()))),
        Some(Arg::Value(Value::Str(s))) => Ok(Some(Selector::Expr(s.clone()))),
        Some(Arg::Value(Value::Null)) => Ok(None),
        Some(Arg::Value(other)) => Err(OpError::Usage(format!(
            "argument {} must be a lambda, got {}",
            index, other
        ))),
        Some(Arg::Seq(_)) => Err(OpError::Usage(format!(
            "argument {} must be a lambda, got a sequence",
            index
        ))),
    }
}

fn opt_value(args: &[Arg], index: usize) -> Option<Value> {
    match args.get(index) {
        Some(Arg::Value(v)) => Some(v.clone()),
        _ => None,
    }
}

fn want_count(args: &[Arg], index: usize) -> OpResult<usize> {
    match args.get(index) {
        Some(Arg::Value(Value::Int(n))) if *n >= 0 => Ok(*n as usize),
        Some(Arg::Value(other)) => Err(OpError::Usage(format!(
            "argument {} must be a non-negative count, got {}",
            index, other
        ))),
        _ => Err(OpError::Usage(format!(
            "argument {} must be a non-negative count",
            index
        ))),
    }
}

/// Sequence-shaped argument: an `Enumerable`, or any value coerced through
/// the source-adapter rule.
fn want_seq(args: &[Arg], index: usize) -> OpResult<Enumerable> {
    match args.get(index) {
        Some(Arg::Seq(e)) => Ok(e.replay()),
        Some(Arg::Value(v)) => Ok(from(v.clone())),
        Some(Arg::Lambda(_)) => Err(OpError::Usage(format!(
            "argument {} must be a sequence, got a lambda",
            index
        ))),
        None => Err(OpError::Usage(format!("argument {} is required", index))),
    }
}
