//! Slot arena backing one tree instance.
//!
//! Each tree owns its own arena, so multiple independent trees coexist
//! without any shared or global state. Freed slots go on a free list and
//! are reused by later allocations.

use crate::node::TreapNode;
use crate::types::NodeId;

#[derive(Debug, Clone)]
pub struct NodeArena<V, S, U> {
    slots: Vec<Option<TreapNode<V, S, U>>>,
    free: Vec<NodeId>,
}

impl<V, S, U> NodeArena<V, S, U> {
    pub fn new() -> Self {
        NodeArena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store a node, reusing a freed slot when one is available.
    pub fn alloc(&mut self, node: TreapNode<V, S, U>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id as usize] = Some(node);
                id
            }
            None => {
                let id = self.slots.len() as NodeId;
                self.slots.push(Some(node));
                id
            }
        }
    }

    /// Take the node out of its slot and recycle the slot.
    ///
    /// The handle is dead afterwards; using it again is a bug in this
    /// crate, not a caller-facing error.
    pub fn free(&mut self, id: NodeId) -> TreapNode<V, S, U> {
        let node = self.slots[id as usize]
            .take()
            .expect("treap-forest: free of a vacant arena slot");
        self.free.push(id);
        node
    }

    pub fn node(&self, id: NodeId) -> &TreapNode<V, S, U> {
        self.slots[id as usize]
            .as_ref()
            .expect("treap-forest: stale node handle")
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut TreapNode<V, S, U> {
        self.slots[id as usize]
            .as_mut()
            .expect("treap-forest: stale node handle")
    }

    /// Size of an optional subtree; `None` is the empty tree.
    pub fn subtree_size(&self, root: Option<NodeId>) -> u32 {
        root.map(|id| self.node(id).size).unwrap_or(0)
    }

    /// Drop every node and reset the free list.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<V, S, U> Default for NodeArena<V, S, U> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{AddDelta, SumMax};

    fn n(value: i64) -> TreapNode<i64, SumMax, AddDelta> {
        TreapNode::new(value, 7)
    }

    #[test]
    fn alloc_free_reuses_slots() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(n(1));
        let b = arena.alloc(n(2));
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.node(a).value, 1);

        let freed = arena.free(a);
        assert_eq!(freed.value, 1);
        assert_eq!(arena.len(), 1);

        // The recycled slot comes back under the same id.
        let c = arena.alloc(n(3));
        assert_eq!(c, a);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.node(b).value, 2);
        assert_eq!(arena.node(c).value, 3);
    }

    #[test]
    fn clear_empties_everything() {
        let mut arena = NodeArena::new();
        arena.alloc(n(1));
        arena.alloc(n(2));
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.subtree_size(None), 0);
    }
}
