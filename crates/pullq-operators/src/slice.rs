//! Positional slicing: `take`, `skip`, and `step`.

use pullq_core::prelude::*;

pub fn take(source: &Enumerable, n: usize) -> Enumerable {
    let src = source.replay();
    Enumerable::new(move || {
        Box::new(TakeCursor {
            inner: src.enumerator(),
            remaining: n,
            done: false,
        })
    })
}

pub fn skip(source: &Enumerable, n: usize) -> Enumerable {
    let src = source.replay();
    Enumerable::new(move || {
        Box::new(SkipCursor {
            inner: src.enumerator(),
            to_skip: n,
        })
    })
}

/// Keeps the first element, then every `n`-th element after it.
/// `n <= 1` is the identity.
pub fn step(source: &Enumerable, n: usize) -> Enumerable {
    let src = source.replay();
    Enumerable::new(move || {
        Box::new(StepCursor {
            inner: src.enumerator(),
            stride: n,
            started: false,
        })
    })
}

struct TakeCursor {
    inner: EnumeratorBox,
    remaining: usize,
    done: bool,
}

impl Enumerator for TakeCursor {
    fn next(&mut self) -> bool {
        if self.done {
            return false;
        }
        if self.remaining == 0 || !self.inner.next() {
            self.done = true;
            return false;
        }
        self.remaining -= 1;
        true
    }

    fn current(&self) -> Option<Value> {
        if self.done {
            None
        } else {
            self.inner.current()
        }
    }
}

struct SkipCursor {
    inner: EnumeratorBox,
    to_skip: usize,
}

impl Enumerator for SkipCursor {
    fn next(&mut self) -> bool {
        while self.to_skip > 0 {
            if !self.inner.next() {
                self.to_skip = 0;
                return false;
            }
            self.to_skip -= 1;
        }
        self.inner.next()
    }

    fn current(&self) -> Option<Value> {
        if self.to_skip > 0 {
            None
        } else {
            self.inner.current()
        }
    }
}

struct StepCursor {
    inner: EnumeratorBox,
    stride: usize,
    started: bool,
}

impl Enumerator for StepCursor {
    fn next(&mut self) -> bool {
        if !self.started {
            self.started = true;
            return self.inner.next();
        }
        let mut advanced = 1;
        while advanced < self.stride {
            if !self.inner.next() {
                return false;
            }
            advanced += 1;
        }
        self.inner.next()
    }

    fn current(&self) -> Option<Value> {
        self.inner.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Enumerable {
        Enumerable::from_vec(values.iter().copied().map(Value::Int).collect())
    }

    #[test]
    fn take_stops_early() {
        assert_eq!(
            take(&ints(&[1, 2, 3]), 2).materialize(),
            vec![Value::Int(1), Value::Int(2)]
        );
        assert!(take(&ints(&[1]), 0).materialize().is_empty());
        assert_eq!(take(&ints(&[1]), 5).materialize().len(), 1);
    }

    #[test]
    fn take_cursor_is_absent_after_stop() {
        let out = take(&ints(&[1, 2, 3]), 1);
        let mut e = out.enumerator();
        assert!(e.next());
        assert!(!e.next());
        assert_eq!(e.current(), None);
    }

    #[test]
    fn skip_discards_prefix() {
        assert_eq!(skip(&ints(&[1, 2, 3]), 2).materialize(), vec![Value::Int(3)]);
        assert!(skip(&ints(&[1, 2]), 5).materialize().is_empty());
    }

    #[test]
    fn step_keeps_first_then_every_nth() {
        assert_eq!(
            step(&ints(&[1, 2, 3]), 2).materialize(),
            vec![Value::Int(1), Value::Int(3)]
        );
        assert_eq!(step(&ints(&[1, 2, 3]), 1).materialize().len(), 3);
        assert_eq!(
            step(&ints(&[0, 1, 2, 3, 4, 5, 6]), 3).materialize(),
            vec![Value::Int(0), Value::Int(3), Value::Int(6)]
        );
    }
}
