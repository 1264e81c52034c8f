//! Ready-made [`Summary`] / [`Update`] implementations.

use crate::types::{Summary, Update};

/// Sum and maximum over an `i64` subtree. Both are invariant under
/// reversal, as [`Summary`] requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SumMax {
    pub sum: i64,
    pub max: i64,
}

impl Summary<i64> for SumMax {
    fn combine(left: Option<&Self>, value: &i64, right: Option<&Self>) -> Self {
        let mut sum = *value;
        let mut max = *value;
        if let Some(l) = left {
            sum += l.sum;
            max = max.max(l.max);
        }
        if let Some(r) = right {
            sum += r.sum;
            max = max.max(r.max);
        }
        SumMax { sum, max }
    }
}

/// Range-add tag for `i64` payloads: shifts every element, the subtree sum
/// by `delta * count`, and the subtree max by `delta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddDelta(pub i64);

impl Update<i64, SumMax> for AddDelta {
    fn identity() -> Self {
        AddDelta(0)
    }

    fn is_identity(&self) -> bool {
        self.0 == 0
    }

    fn apply_to_value(&self, value: &mut i64) {
        *value += self.0;
    }

    fn apply_to_summary(&self, summary: &mut SumMax, count: u32) {
        summary.sum += self.0 * count as i64;
        summary.max += self.0;
    }

    fn compose(&mut self, later: &Self) {
        self.0 += later.0;
    }
}

/// No aggregate at all, for containers that only need ordering and sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoSummary;

impl<V> Summary<V> for NoSummary {
    fn combine(_: Option<&Self>, _: &V, _: Option<&Self>) -> Self {
        NoSummary
    }
}

/// The always-identity update, for containers without range updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoUpdate;

impl<V, S> Update<V, S> for NoUpdate {
    fn identity() -> Self {
        NoUpdate
    }

    fn is_identity(&self) -> bool {
        true
    }

    fn apply_to_value(&self, _: &mut V) {}

    fn apply_to_summary(&self, _: &mut S, _: u32) {}

    fn compose(&mut self, _: &Self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_max_combines_children() {
        let l = SumMax { sum: 3, max: 2 };
        let r = SumMax { sum: 10, max: 9 };
        let s = SumMax::combine(Some(&l), &5, Some(&r));
        assert_eq!(s, SumMax { sum: 18, max: 9 });
        // Reversal invariance.
        assert_eq!(SumMax::combine(Some(&r), &5, Some(&l)), s);
        assert_eq!(SumMax::combine(None, &-7, None), SumMax { sum: -7, max: -7 });
    }

    #[test]
    fn add_delta_composes_by_summing() {
        let mut pending = AddDelta(4);
        pending.compose(&AddDelta(-1));
        assert_eq!(pending, AddDelta(3));
        assert!(AddDelta(0).is_identity());

        let mut s = SumMax { sum: 10, max: 6 };
        AddDelta(3).apply_to_summary(&mut s, 4);
        assert_eq!(s, SumMax { sum: 22, max: 9 });
    }
}
