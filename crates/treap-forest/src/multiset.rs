//! Explicit-key ordered multiset: duplicates allowed, one node per
//! element, rank / order-statistic / neighbour queries by plain descent.
//!
//! Carries no lazy tags, so read-only descents need no push-down.

use std::fmt::Debug;

use rand::{rngs::OsRng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::arena::NodeArena;
use crate::node::TreapNode;
use crate::ops;
use crate::stats::{NoSummary, NoUpdate};
use crate::types::NodeId;

/// Ordered multiset of `K` kept in a randomized treap.
///
/// Same priority policy as [`TreapList`](crate::list::TreapList): a
/// per-tree PRNG seeded from `OsRng`, with [`with_seed`](Self::with_seed)
/// for reproducible tests.
pub struct TreapMultiset<K> {
    arena: NodeArena<K, NoSummary, NoUpdate>,
    root: Option<NodeId>,
    rng: Xoshiro256StarStar,
}

impl<K: Ord> TreapMultiset<K> {
    pub fn new() -> Self {
        let mut seed = [0u8; 32];
        OsRng.fill_bytes(&mut seed);
        Self::from_rng(Xoshiro256StarStar::from_seed(seed))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(Xoshiro256StarStar::seed_from_u64(seed))
    }

    fn from_rng(rng: Xoshiro256StarStar) -> Self {
        TreapMultiset {
            arena: NodeArena::new(),
            root: None,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.subtree_size(self.root) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert one occurrence of `key`.
    pub fn insert(&mut self, key: K) {
        let (left, right) = ops::split_by(&mut self.arena, self.root.take(), &|v| *v < key);
        let priority = self.rng.next_u64();
        let id = self.arena.alloc(TreapNode::new(key, priority));
        let left = ops::merge(&mut self.arena, left, Some(id));
        self.root = ops::merge(&mut self.arena, left, right);
    }

    /// Remove one occurrence of `key`; `false` (a no-op) when absent.
    pub fn remove(&mut self, key: &K) -> bool {
        let (left, rest) = ops::split_by(&mut self.arena, self.root.take(), &|v| v < key);
        let (equal, right) = ops::split_by(&mut self.arena, rest, &|v| v <= key);
        let (single, equal_rest) = ops::split_at(&mut self.arena, equal, 1);
        let removed = match single {
            Some(id) => {
                self.arena.free(id);
                true
            }
            None => false,
        };
        let joined = ops::merge(&mut self.arena, left, equal_rest);
        self.root = ops::merge(&mut self.arena, joined, right);
        removed
    }

    pub fn contains(&self, key: &K) -> bool {
        let mut cur = self.root;
        while let Some(id) = cur {
            let n = self.arena.node(id);
            cur = match key.cmp(&n.value) {
                std::cmp::Ordering::Less => n.left,
                std::cmp::Ordering::Greater => n.right,
                std::cmp::Ordering::Equal => return true,
            };
        }
        false
    }

    /// 1-based rank: one plus the number of elements strictly below `key`.
    /// Defined for absent keys too (their insertion point).
    pub fn rank(&self, key: &K) -> usize {
        self.count_below(key, false) + 1
    }

    /// The `k`-th smallest element, 1-based; `None` outside `[1, len]`.
    pub fn kth(&self, k: usize) -> Option<&K> {
        if k == 0 || k > self.len() {
            return None;
        }
        let mut k = k as u32;
        let mut cur = self.root;
        while let Some(id) = cur {
            let n = self.arena.node(id);
            let left_size = self.arena.subtree_size(n.left);
            if k <= left_size {
                cur = n.left;
            } else if k == left_size + 1 {
                return Some(&n.value);
            } else {
                k -= left_size + 1;
                cur = n.right;
            }
        }
        None
    }

    /// Greatest element strictly below `key`.
    pub fn predecessor(&self, key: &K) -> Option<&K> {
        let mut best = None;
        let mut cur = self.root;
        while let Some(id) = cur {
            let n = self.arena.node(id);
            if n.value < *key {
                best = Some(id);
                cur = n.right;
            } else {
                cur = n.left;
            }
        }
        best.map(|id| &self.arena.node(id).value)
    }

    /// Least element strictly above `key`.
    pub fn successor(&self, key: &K) -> Option<&K> {
        let mut best = None;
        let mut cur = self.root;
        while let Some(id) = cur {
            let n = self.arena.node(id);
            if n.value > *key {
                best = Some(id);
                cur = n.left;
            } else {
                cur = n.right;
            }
        }
        best.map(|id| &self.arena.node(id).value)
    }

    /// Multiplicity of `key`.
    pub fn count(&self, key: &K) -> usize {
        self.count_below(key, true) - self.count_below(key, false)
    }

    pub fn first(&self) -> Option<&K> {
        self.kth(1)
    }

    pub fn last(&self) -> Option<&K> {
        self.kth(self.len())
    }

    /// Ascending snapshot.
    pub fn to_vec(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        ops::collect_into(&self.arena, self.root, &NoUpdate, false, &mut out);
        out
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.arena.clear();
    }

    /// Debug rendering of the tree shape.
    pub fn print(&self) -> String
    where
        K: Debug,
    {
        ops::print(&self.arena, self.root, "")
    }

    /// Validate sizes, heap priorities, key order and arena bookkeeping.
    pub fn check(&self) -> Result<(), String>
    where
        K: Clone,
    {
        if self.arena.len() != self.len() {
            return Err(format!(
                "arena holds {} live nodes for {} elements",
                self.arena.len(),
                self.len()
            ));
        }
        ops::validate(&self.arena, self.root)?;
        let keys = self.to_vec();
        if keys.windows(2).any(|w| w[0] > w[1]) {
            return Err("keys out of order".to_string());
        }
        Ok(())
    }

    /// Elements `< key` (or `<= key` when `inclusive`), counted by summing
    /// left-subtree sizes on the way down; no split.
    fn count_below(&self, key: &K, inclusive: bool) -> usize {
        let mut acc = 0usize;
        let mut cur = self.root;
        while let Some(id) = cur {
            let n = self.arena.node(id);
            let belongs_below = if inclusive {
                n.value <= *key
            } else {
                n.value < *key
            };
            if belongs_below {
                acc += self.arena.subtree_size(n.left) as usize + 1;
                cur = n.right;
            } else {
                cur = n.left;
            }
        }
        acc
    }
}

impl<K: Ord> Default for TreapMultiset<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> FromIterator<K> for TreapMultiset<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        for key in iter {
            set.insert(key);
        }
        set
    }
}
