//! Trait seams shared by every treap container.
//!
//! All tree "pointers" are `Option<NodeId>` indices into a per-tree
//! [`NodeArena`](crate::arena::NodeArena); no raw pointers anywhere.
//!
//! Deferred range updates are expressed through the [`Update`] trait
//! instead of an ad-hoc numeric tag field, so a new tag kind (e.g. a
//! range-assign) is a new impl rather than a change to the engine.

/// Handle to a node slot inside a [`NodeArena`](crate::arena::NodeArena).
pub type NodeId = u32;

/// A statistic aggregated over a whole subtree (sum, max, …).
///
/// `combine` must be invariant under reversal of the in-order sequence:
/// `combine(l, v, r)` and `combine(r, v, l)` describe the same multiset of
/// elements and must yield the same summary. This is what lets a pending
/// additive update and a pending reversal be pushed down independently.
pub trait Summary<V>: Clone {
    /// Recompute the summary of a node from its child summaries (absent
    /// children are `None`) and its own value.
    fn combine(left: Option<&Self>, value: &V, right: Option<&Self>) -> Self;
}

/// A deferred range update (a lazy tag).
///
/// A node's `pending` update has already been applied to the node's own
/// `value` and `summary`, and is a promise to apply it to both children the
/// next time they are visited.
pub trait Update<V, S>: Clone {
    /// The update that changes nothing.
    fn identity() -> Self;

    /// `true` iff applying `self` is a no-op, so push-down can skip it.
    fn is_identity(&self) -> bool;

    /// Apply to a single element.
    fn apply_to_value(&self, value: &mut V);

    /// Apply to the summary of a subtree containing `count` elements.
    fn apply_to_summary(&self, summary: &mut S, count: u32);

    /// Absorb `later` into `self`, where `self` was pending first.
    /// Applying the result must equal applying `self`, then `later`.
    fn compose(&mut self, later: &Self);
}
