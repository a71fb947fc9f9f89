//! Concatenation: all of self, then all of the other sequence.

use pullq_core::prelude::*;

pub fn union(source: &Enumerable, other: impl IntoEnumerable) -> Enumerable {
    let first = source.replay();
    let second = other.into_enumerable();
    Enumerable::new(move || {
        Box::new(UnionCursor {
            first: first.enumerator(),
            second: second.enumerator(),
            on_second: false,
        })
    })
}

struct UnionCursor {
    first: EnumeratorBox,
    second: EnumeratorBox,
    on_second: bool,
}

impl Enumerator for UnionCursor {
    fn next(&mut self) -> bool {
        if !self.on_second {
            if self.first.next() {
                return true;
            }
            self.on_second = true;
        }
        self.second.next()
    }

    fn current(&self) -> Option<Value> {
        if self.on_second {
            self.second.current()
        } else {
            self.first.current()
        }
    }
}
