//! Reversal. Eager: materializes the upstream when enumerated, then walks
//! the vector back-to-front.

use pullq_core::prelude::*;

pub fn reverse(source: &Enumerable) -> Enumerable {
    let src = source.replay();
    Enumerable::new(move || {
        let mut items = src.materialize();
        #[cfg(feature = "tracing")]
        tracing::trace!(rows = items.len(), "reversing upstream");
        items.reverse();
        Box::new(IndexCursor::new(items))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_back_to_front() {
        let src = Enumerable::from_vec(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(
            reverse(&src).materialize(),
            vec![Value::Int(3), Value::Int(2), Value::Int(1)]
        );
    }

    #[test]
    fn empty_upstream_stays_empty() {
        assert!(reverse(&Enumerable::empty()).materialize().is_empty());
    }
}
