//! Implicit-key sequence: an array with O(log n) insert/remove anywhere,
//! range updates, range reversal, and range summaries.
//!
//! Positions are 0-based; range arguments take any `RangeBounds<usize>`.

use std::fmt::Debug;
use std::ops::{Bound, RangeBounds};

use rand::{rngs::OsRng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use thiserror::Error;

use crate::arena::NodeArena;
use crate::node::TreapNode;
use crate::ops;
use crate::stats::{AddDelta, SumMax};
use crate::types::{NodeId, Summary, Update};

/// Rejected operand, reported before the tree is touched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    #[error("position {pos} out of bounds for length {len}")]
    PositionOutOfBounds { pos: usize, len: usize },
    #[error("range {start}..{end} out of bounds for length {len}")]
    RangeOutOfBounds {
        start: usize,
        end: usize,
        len: usize,
    },
}

/// Sequence of `V` kept in a randomized treap, one arena per list.
///
/// `S` is the per-subtree statistic served by [`summary`](Self::summary);
/// `U` is the deferred range update accepted by [`update`](Self::update).
/// Balance comes solely from node priorities drawn from the list's own
/// PRNG, seeded from `OsRng` at construction so tree shapes are not
/// predictable from outside the process. [`with_seed`](Self::with_seed)
/// trades that unpredictability for reproducibility.
pub struct TreapList<V, S, U> {
    arena: NodeArena<V, S, U>,
    root: Option<NodeId>,
    rng: Xoshiro256StarStar,
}

/// `i64` sequence with range-add, range-sum and range-max.
pub type TreapNumList = TreapList<i64, SumMax, AddDelta>;

impl<V, S, U> TreapList<V, S, U>
where
    S: Summary<V>,
    U: Update<V, S>,
{
    pub fn new() -> Self {
        let mut seed = [0u8; 32];
        OsRng.fill_bytes(&mut seed);
        Self::from_rng(Xoshiro256StarStar::from_seed(seed))
    }

    /// Deterministic priorities; for tests and reproduction only.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(Xoshiro256StarStar::seed_from_u64(seed))
    }

    fn from_rng(rng: Xoshiro256StarStar) -> Self {
        TreapList {
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

    /// Insert `value` so that it ends up at position `pos`.
    /// `pos == len()` appends.
    pub fn insert(&mut self, pos: usize, value: V) -> Result<(), ListError> {
        let len = self.len();
        if pos > len {
            return Err(ListError::PositionOutOfBounds { pos, len });
        }
        self.insert_at(pos as u32, value);
        Ok(())
    }

    pub fn push_back(&mut self, value: V) {
        let len = self.len() as u32;
        self.insert_at(len, value);
    }

    pub fn push_front(&mut self, value: V) {
        self.insert_at(0, value);
    }

    /// Remove and return the element at `pos`.
    pub fn remove(&mut self, pos: usize) -> Result<V, ListError> {
        let len = self.len();
        if pos >= len {
            return Err(ListError::PositionOutOfBounds { pos, len });
        }
        let (left, rest) = ops::split_at(&mut self.arena, self.root.take(), pos as u32);
        let (single, right) = ops::split_at(&mut self.arena, rest, 1);
        let value = match single {
            Some(id) => self.arena.free(id).value,
            // Unreachable after the bounds check; keep the tree anyway.
            None => {
                self.root = ops::merge(&mut self.arena, left, right);
                return Err(ListError::PositionOutOfBounds { pos, len });
            }
        };
        self.root = ops::merge(&mut self.arena, left, right);
        Ok(value)
    }

    /// Apply `update` to every element of `range` in O(log n): the middle
    /// piece is tagged at its root and the tag trickles down lazily.
    pub fn update(&mut self, range: impl RangeBounds<usize>, update: U) -> Result<(), ListError> {
        let (start, end) = self.bounds(range)?;
        self.with_range(start, end, |arena, mid| {
            if let Some(id) = mid {
                let n = arena.node_mut(id);
                update.apply_to_value(&mut n.value);
                let count = n.size;
                update.apply_to_summary(&mut n.summary, count);
                n.pending.compose(&update);
            }
        });
        Ok(())
    }

    /// Reverse the order of the elements in `range`, O(log n).
    pub fn reverse(&mut self, range: impl RangeBounds<usize>) -> Result<(), ListError> {
        let (start, end) = self.bounds(range)?;
        self.with_range(start, end, |arena, mid| {
            if let Some(id) = mid {
                let n = arena.node_mut(id);
                n.reversed = !n.reversed;
            }
        });
        Ok(())
    }

    /// Summary over `range`; `None` when the range is empty. The tree is
    /// split to isolate the range and reassembled even though this is a
    /// pure read, because split is destructive.
    pub fn summary(&mut self, range: impl RangeBounds<usize>) -> Result<Option<S>, ListError> {
        let (start, end) = self.bounds(range)?;
        let out = self.with_range(start, end, |arena, mid| {
            mid.map(|id| arena.node(id).summary.clone())
        });
        Ok(out)
    }

    /// The element at `pos`, by tag-aware descent; no split, no mutation.
    pub fn get(&self, pos: usize) -> Option<V>
    where
        V: Clone,
    {
        if pos >= self.len() {
            return None;
        }
        ops::value_at(&self.arena, self.root, pos as u32)
    }

    pub fn first(&self) -> Option<V>
    where
        V: Clone,
    {
        self.get(0)
    }

    pub fn last(&self) -> Option<V>
    where
        V: Clone,
    {
        self.len().checked_sub(1).and_then(|pos| self.get(pos))
    }

    /// In-order snapshot of the logical sequence.
    pub fn to_vec(&self) -> Vec<V>
    where
        V: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        ops::collect_into(&self.arena, self.root, &U::identity(), false, &mut out);
        out
    }

    /// Split the list in two: `self` keeps the first `pos` elements, the
    /// returned list gets the rest (with its own arena and PRNG).
    pub fn split_off(&mut self, pos: usize) -> Result<Self, ListError> {
        let len = self.len();
        if pos > len {
            return Err(ListError::PositionOutOfBounds { pos, len });
        }
        let (left, right) = ops::split_at(&mut self.arena, self.root.take(), pos as u32);
        self.root = left;
        let mut other = Self::from_rng(Xoshiro256StarStar::seed_from_u64(self.rng.next_u64()));
        other.root = ops::transplant(&mut self.arena, right, &mut other.arena);
        Ok(other)
    }

    /// Move every element of `other` to the end of `self`, leaving `other`
    /// empty.
    pub fn append(&mut self, other: &mut Self) {
        let moved = ops::transplant(&mut other.arena, other.root.take(), &mut self.arena);
        other.arena.clear();
        self.root = ops::merge(&mut self.arena, self.root.take(), moved);
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.arena.clear();
    }

    /// Debug rendering of the tree shape.
    pub fn print(&self) -> String
    where
        V: Debug,
    {
        ops::print(&self.arena, self.root, "")
    }

    /// Validate sizes, heap priorities, summaries and arena bookkeeping.
    /// Test support; a failure is a bug in this crate.
    pub fn check(&self) -> Result<(), String>
    where
        S: PartialEq + Debug,
    {
        if self.arena.len() != self.len() {
            return Err(format!(
                "arena holds {} live nodes for {} elements",
                self.arena.len(),
                self.len()
            ));
        }
        ops::validate(&self.arena, self.root)
    }

    fn insert_at(&mut self, pos: u32, value: V) {
        let priority = self.rng.next_u64();
        let id = self.arena.alloc(TreapNode::new(value, priority));
        let (left, right) = ops::split_at(&mut self.arena, self.root.take(), pos);
        let left = ops::merge(&mut self.arena, left, Some(id));
        self.root = ops::merge(&mut self.arena, left, right);
    }

    /// Isolate `[start, end)`, hand the middle root to `f`, reassemble.
    fn with_range<R>(
        &mut self,
        start: usize,
        end: usize,
        f: impl FnOnce(&mut NodeArena<V, S, U>, Option<NodeId>) -> R,
    ) -> R {
        let (left, rest) = ops::split_at(&mut self.arena, self.root.take(), start as u32);
        let (mid, right) = ops::split_at(&mut self.arena, rest, (end - start) as u32);
        let out = f(&mut self.arena, mid);
        let joined = ops::merge(&mut self.arena, left, mid);
        self.root = ops::merge(&mut self.arena, joined, right);
        out
    }

    fn bounds(&self, range: impl RangeBounds<usize>) -> Result<(usize, usize), ListError> {
        let len = self.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e + 1,
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        };
        if start > end || end > len {
            return Err(ListError::RangeOutOfBounds { start, end, len });
        }
        Ok((start, end))
    }
}

impl<V, S, U> Default for TreapList<V, S, U>
where
    S: Summary<V>,
    U: Update<V, S>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S, U> FromIterator<V> for TreapList<V, S, U>
where
    S: Summary<V>,
    U: Update<V, S>,
{
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.push_back(value);
        }
        list
    }
}
