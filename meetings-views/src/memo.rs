//! Last-call memo slots.
//!
//! A [`Memo`] remembers the inputs and output of the most recent
//! computation. When the next call's inputs are the same (by pointer for
//! shared data, by value for parameters) the stored output is handed back;
//! otherwise the output is recomputed and replaces the old one.
//!
//! The slot keeps its last `Arc` inputs alive, so a pointer it compares
//! against can never be freed and reused by an unrelated value.

use log::trace;
use std::sync::Arc;

/// Input identity used to decide whether a memo slot is still valid.
pub(crate) trait SameInput {
    fn same_input(&self, other: &Self) -> bool;
}

impl<T: ?Sized> SameInput for Arc<T> {
    fn same_input(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: SameInput> SameInput for Option<T> {
    fn same_input(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same_input(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<A: SameInput, B: SameInput> SameInput for (A, B) {
    fn same_input(&self, other: &Self) -> bool {
        self.0.same_input(&other.0) && self.1.same_input(&other.1)
    }
}

/// Compares a plain value (parameters) by equality.
#[derive(Clone, Debug)]
pub(crate) struct ByValue<P>(pub P);

impl<P: PartialEq> SameInput for ByValue<P> {
    fn same_input(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

/// Compares a listing by the identity of its elements rather than of the
/// listing itself, so a listing rebuilt from unchanged entities still
/// matches.
#[derive(Debug)]
pub(crate) struct ByElements<T>(pub Arc<[Arc<T>]>);

impl<T> SameInput for ByElements<T> {
    fn same_input(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(other.0.iter())
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

#[derive(Debug)]
struct Cached<K, V> {
    inputs: K,
    output: V,
}

#[derive(Debug)]
pub(crate) struct Memo<K, V> {
    name: &'static str,
    cached: Option<Cached<K, V>>,
    recomputations: u64,
}

impl<K: SameInput, V: Clone> Memo<K, V> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            cached: None,
            recomputations: 0,
        }
    }

    pub(crate) fn get_or_compute(&mut self, inputs: K, compute: impl FnOnce() -> V) -> V {
        match self.try_get_or_compute::<std::convert::Infallible>(inputs, || Ok(compute())) {
            Ok(output) => output,
            Err(never) => match never {},
        }
    }

    /// Like [`get_or_compute`](Self::get_or_compute), but a failed
    /// computation leaves the previous entry in place.
    pub(crate) fn try_get_or_compute<E>(
        &mut self,
        inputs: K,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(cached) = &self.cached {
            if cached.inputs.same_input(&inputs) {
                return Ok(cached.output.clone());
            }
        }

        let output = compute()?;
        self.recomputations += 1;
        trace!(
            "Recomputed view {} ({} times)",
            self.name,
            self.recomputations
        );
        self.cached = Some(Cached {
            inputs,
            output: output.clone(),
        });

        Ok(output)
    }

    /// Number of times this slot has run its computation.
    #[cfg(test)]
    pub(crate) fn recomputations(&self) -> u64 {
        self.recomputations
    }

    #[cfg(test)]
    pub(crate) fn is_cached(&self) -> bool {
        self.cached.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_cached_initially() {
        let memo: Memo<Arc<u32>, u32> = Memo::new("test");
        assert!(!memo.is_cached());
        assert_eq!(memo.recomputations(), 0);
    }

    #[test]
    fn same_pointer_reuses_output() {
        let input = Arc::new(1u32);
        let mut memo: Memo<Arc<u32>, Arc<String>> = Memo::new("test");

        let first = memo.get_or_compute(input.clone(), || Arc::new("one".to_string()));
        let second = memo.get_or_compute(input.clone(), || Arc::new("two".to_string()));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*second, "one");
        assert_eq!(memo.recomputations(), 1);
    }

    #[test]
    fn equal_value_behind_new_pointer_recomputes() {
        let mut memo: Memo<Arc<u32>, Arc<String>> = Memo::new("test");

        let first = memo.get_or_compute(Arc::new(1), || Arc::new("one".to_string()));
        let second = memo.get_or_compute(Arc::new(1), || Arc::new("one".to_string()));

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(memo.recomputations(), 2);
    }

    #[test]
    fn only_the_last_call_is_remembered() {
        let a = Arc::new(1u32);
        let b = Arc::new(2u32);
        let mut memo: Memo<Arc<u32>, u32> = Memo::new("test");

        memo.get_or_compute(a.clone(), || 1);
        memo.get_or_compute(b.clone(), || 2);
        memo.get_or_compute(a.clone(), || 1);

        assert_eq!(memo.recomputations(), 3);
    }

    #[test]
    fn params_compare_by_value() {
        let state = Arc::new(0u32);
        let mut memo: Memo<(Arc<u32>, ByValue<Option<i64>>), u32> = Memo::new("test");

        memo.get_or_compute((state.clone(), ByValue(Some(4))), || 4);
        memo.get_or_compute((state.clone(), ByValue(Some(4))), || 4);
        assert_eq!(memo.recomputations(), 1);

        memo.get_or_compute((state.clone(), ByValue(None)), || 0);
        assert_eq!(memo.recomputations(), 2);
    }

    #[test]
    fn optional_inputs() {
        let a = Arc::new(1u32);
        assert!(Some(a.clone()).same_input(&Some(a.clone())));
        assert!(None::<Arc<u32>>.same_input(&None));
        assert!(!Some(a.clone()).same_input(&None));
        assert!(!Some(a).same_input(&Some(Arc::new(1))));
    }

    #[test]
    fn listings_compare_by_elements() {
        let one = Arc::new(1u32);
        let two = Arc::new(2u32);
        let listing: Arc<[Arc<u32>]> = Arc::from(vec![one.clone(), two.clone()]);
        let rebuilt: Arc<[Arc<u32>]> = Arc::from(vec![one.clone(), two.clone()]);
        let reordered: Arc<[Arc<u32>]> = Arc::from(vec![two.clone(), one.clone()]);
        let shorter: Arc<[Arc<u32>]> = Arc::from(vec![one.clone()]);
        let copied: Arc<[Arc<u32>]> = Arc::from(vec![one, Arc::new(2)]);

        let key = ByElements(listing);
        assert!(key.same_input(&ByElements(rebuilt)));
        assert!(!key.same_input(&ByElements(reordered)));
        assert!(!key.same_input(&ByElements(shorter)));
        assert!(!key.same_input(&ByElements(copied)));
    }

    #[test]
    fn failed_computation_keeps_previous_entry() {
        let a = Arc::new(1u32);
        let mut memo: Memo<Arc<u32>, u32> = Memo::new("test");

        memo.get_or_compute(a.clone(), || 7);
        let result: Result<u32, &str> = memo.try_get_or_compute(Arc::new(2), || Err("boom"));
        assert_eq!(result, Err("boom"));

        let again: Result<u32, &str> = memo.try_get_or_compute(a, || Ok(8));
        assert_eq!(again, Ok(7));
        assert_eq!(memo.recomputations(), 1);
    }
}
