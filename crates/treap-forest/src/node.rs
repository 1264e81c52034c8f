//! The node record stored in the arena.

use crate::types::{NodeId, Summary, Update};

/// One element of a treap, living in a slot of a
/// [`NodeArena`](crate::arena::NodeArena).
///
/// A node exclusively owns its children: every live node is referenced by
/// exactly one parent link (or is the root), and handles are moved between
/// trees, never duplicated.
#[derive(Debug, Clone)]
pub struct TreapNode<V, S, U> {
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    /// Drawn once from the tree's PRNG at allocation, fixed for the node's
    /// lifetime. Max-heap convention: a parent's priority is >= both
    /// children's.
    pub priority: u64,
    /// Subtree node count, self included.
    pub size: u32,
    pub value: V,
    /// `Summary::combine` over the subtree. Reflects the node's own
    /// `pending` update but not any pending update above it.
    pub summary: S,
    /// Deferred update not yet applied to the children.
    pub pending: U,
    /// Deferred "swap children, recursively" toggle.
    pub reversed: bool,
}

impl<V, S, U> TreapNode<V, S, U>
where
    S: Summary<V>,
    U: Update<V, S>,
{
    /// A fresh singleton: no children, size 1, tags cleared.
    pub fn new(value: V, priority: u64) -> Self {
        let summary = S::combine(None, &value, None);
        TreapNode {
            left: None,
            right: None,
            priority,
            size: 1,
            value,
            summary,
            pending: U::identity(),
            reversed: false,
        }
    }
}
