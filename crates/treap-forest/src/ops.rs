//! The split/merge engine.
//!
//! Every public container operation decomposes the tree into at most three
//! pieces with [`split_at`] / [`split_by`], touches or reads one piece, and
//! reassembles with [`merge`]. Nothing here rotates: [`merge`] picking the
//! higher-priority root is the sole balancing mechanism.
//!
//! `split_*` and `merge` consume their root arguments. The precondition of
//! `merge` (all of `a` precedes all of `b`) is guaranteed by construction
//! at every call site and never checked on the hot path.

use std::fmt::Debug;

use crate::arena::NodeArena;
use crate::types::{NodeId, Summary, Update};

/// Recompute `size` and `summary` of `id` from its up-to-date children.
pub fn pull_up<V, S, U>(arena: &mut NodeArena<V, S, U>, id: NodeId)
where
    S: Summary<V>,
    U: Update<V, S>,
{
    let (left, right) = {
        let n = arena.node(id);
        (n.left, n.right)
    };
    let ls = left.map(|l| (arena.node(l).size, arena.node(l).summary.clone()));
    let rs = right.map(|r| (arena.node(r).size, arena.node(r).summary.clone()));
    let size = 1 + ls.as_ref().map_or(0, |x| x.0) + rs.as_ref().map_or(0, |x| x.0);
    let n = arena.node_mut(id);
    n.size = size;
    n.summary = S::combine(
        ls.as_ref().map(|x| &x.1),
        &n.value,
        rs.as_ref().map(|x| &x.1),
    );
}

/// Push the pending tags of `id` one level down and clear them.
///
/// The reversal toggle XORs into each child (two pending reversals cancel);
/// the pending update lands on each child's value and summary and composes
/// onto the child's own pending update, newest last. Summaries are
/// reversal-invariant, so the two tag kinds commute and the order here is
/// free.
pub fn push_down<V, S, U>(arena: &mut NodeArena<V, S, U>, id: NodeId)
where
    S: Summary<V>,
    U: Update<V, S>,
{
    let (left, right, reversed, pending) = {
        let n = arena.node_mut(id);
        let reversed = n.reversed;
        if reversed {
            std::mem::swap(&mut n.left, &mut n.right);
            n.reversed = false;
        }
        let pending = std::mem::replace(&mut n.pending, U::identity());
        (n.left, n.right, reversed, pending)
    };
    if reversed {
        for child in [left, right].into_iter().flatten() {
            let c = arena.node_mut(child);
            c.reversed = !c.reversed;
        }
    }
    if !pending.is_identity() {
        for child in [left, right].into_iter().flatten() {
            let c = arena.node_mut(child);
            pending.apply_to_value(&mut c.value);
            let count = c.size;
            pending.apply_to_summary(&mut c.summary, count);
            c.pending.compose(&pending);
        }
    }
}

/// Split by rank: the left result holds the first `count` elements in
/// order, the right result the rest. Consumes `root`.
pub fn split_at<V, S, U>(
    arena: &mut NodeArena<V, S, U>,
    root: Option<NodeId>,
    count: u32,
) -> (Option<NodeId>, Option<NodeId>)
where
    S: Summary<V>,
    U: Update<V, S>,
{
    let Some(id) = root else {
        return (None, None);
    };
    push_down(arena, id);
    let left = arena.node(id).left;
    let left_size = arena.subtree_size(left);
    if count <= left_size {
        let (a, b) = split_at(arena, left, count);
        arena.node_mut(id).left = b;
        pull_up(arena, id);
        (a, Some(id))
    } else {
        let right = arena.node(id).right;
        let (a, b) = split_at(arena, right, count - left_size - 1);
        arena.node_mut(id).right = a;
        pull_up(arena, id);
        (Some(id), b)
    }
}

/// Split by a monotone predicate: the left result holds the in-order
/// prefix of elements for which `pred` is true. With keys in ascending
/// order, `|v| v < key` and `|v| v <= key` give the classic key splits.
/// Consumes `root`.
pub fn split_by<V, S, U, F>(
    arena: &mut NodeArena<V, S, U>,
    root: Option<NodeId>,
    pred: &F,
) -> (Option<NodeId>, Option<NodeId>)
where
    S: Summary<V>,
    U: Update<V, S>,
    F: Fn(&V) -> bool,
{
    let Some(id) = root else {
        return (None, None);
    };
    push_down(arena, id);
    if pred(&arena.node(id).value) {
        let right = arena.node(id).right;
        let (a, b) = split_by(arena, right, pred);
        arena.node_mut(id).right = a;
        pull_up(arena, id);
        (Some(id), b)
    } else {
        let left = arena.node(id).left;
        let (a, b) = split_by(arena, left, pred);
        arena.node_mut(id).left = b;
        pull_up(arena, id);
        (a, Some(id))
    }
}

/// Join two trees where all of `a` precedes all of `b`. Consumes both.
pub fn merge<V, S, U>(
    arena: &mut NodeArena<V, S, U>,
    a: Option<NodeId>,
    b: Option<NodeId>,
) -> Option<NodeId>
where
    S: Summary<V>,
    U: Update<V, S>,
{
    let (x, y) = match (a, b) {
        (None, other) | (other, None) => return other,
        (Some(x), Some(y)) => (x, y),
    };
    if arena.node(x).priority >= arena.node(y).priority {
        push_down(arena, x);
        let right = arena.node(x).right;
        let joined = merge(arena, right, Some(y));
        arena.node_mut(x).right = joined;
        pull_up(arena, x);
        Some(x)
    } else {
        push_down(arena, y);
        let left = arena.node(y).left;
        let joined = merge(arena, Some(x), left);
        arena.node_mut(y).left = joined;
        pull_up(arena, y);
        Some(y)
    }
}

/// Move a whole subtree out of `src` into `dst`, preserving structure and
/// priorities. Used when a tree changes owners (`split_off` / `append`).
pub fn transplant<V, S, U>(
    src: &mut NodeArena<V, S, U>,
    root: Option<NodeId>,
    dst: &mut NodeArena<V, S, U>,
) -> Option<NodeId> {
    let id = root?;
    let mut node = src.free(id);
    let (left, right) = (node.left, node.right);
    node.left = transplant(src, left, dst);
    node.right = transplant(src, right, dst);
    Some(dst.alloc(node))
}

/// Tag-aware point read: the element at in-order position `pos`, with every
/// ancestor's pending update applied, without disturbing the tree.
///
/// Pendings nearer the root are newer (splits push older tags below newer
/// ones), so the accumulated update is built oldest-first on the way down.
pub fn value_at<V, S, U>(
    arena: &NodeArena<V, S, U>,
    mut root: Option<NodeId>,
    mut pos: u32,
) -> Option<V>
where
    V: Clone,
    S: Summary<V>,
    U: Update<V, S>,
{
    let mut acc = U::identity();
    let mut flipped = false;
    while let Some(id) = root {
        let n = arena.node(id);
        let eff = flipped ^ n.reversed;
        let (first, second) = if eff {
            (n.right, n.left)
        } else {
            (n.left, n.right)
        };
        let first_size = arena.subtree_size(first);
        if pos == first_size {
            let mut value = n.value.clone();
            acc.apply_to_value(&mut value);
            return Some(value);
        }
        let mut below = n.pending.clone();
        below.compose(&acc);
        acc = below;
        flipped = eff;
        if pos < first_size {
            root = first;
        } else {
            pos -= first_size + 1;
            root = second;
        }
    }
    None
}

/// Tag-aware in-order snapshot into `out`, read-only.
pub fn collect_into<V, S, U>(
    arena: &NodeArena<V, S, U>,
    root: Option<NodeId>,
    inherited: &U,
    flipped: bool,
    out: &mut Vec<V>,
) where
    V: Clone,
    S: Summary<V>,
    U: Update<V, S>,
{
    let Some(id) = root else {
        return;
    };
    let n = arena.node(id);
    let eff = flipped ^ n.reversed;
    let mut below = n.pending.clone();
    below.compose(inherited);
    let (first, second) = if eff {
        (n.right, n.left)
    } else {
        (n.left, n.right)
    };
    collect_into(arena, first, &below, eff, out);
    let mut value = n.value.clone();
    inherited.apply_to_value(&mut value);
    out.push(value);
    collect_into(arena, second, &below, eff, out);
}

/// Debug renderer in the `L=` / `R=` nested style.
pub fn print<V, S, U>(arena: &NodeArena<V, S, U>, node: Option<NodeId>, tab: &str) -> String
where
    V: Debug,
{
    match node {
        None => "∅".to_string(),
        Some(id) => {
            let n = arena.node(id);
            let left = print(arena, n.left, &format!("{tab}  "));
            let right = print(arena, n.right, &format!("{tab}  "));
            let rev = if n.reversed { " rev" } else { "" };
            format!(
                "Node[{id}] [size={}{rev}] {{ {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.size, n.value
            )
        }
    }
}

/// Structural validator used by tests: checks the size field, the max-heap
/// priority property, and that each stored summary matches a recomputation
/// from the children (children adjusted by the node's pending update, which
/// they have not absorbed yet).
pub fn validate<V, S, U>(
    arena: &NodeArena<V, S, U>,
    root: Option<NodeId>,
) -> Result<(), String>
where
    S: Summary<V> + PartialEq + Debug,
    U: Update<V, S>,
{
    fn walk<V, S, U>(
        arena: &NodeArena<V, S, U>,
        id: NodeId,
    ) -> Result<(u32, u64, S), String>
    where
        S: Summary<V> + PartialEq + Debug,
        U: Update<V, S>,
    {
        let n = arena.node(id);
        let left = n.left.map(|l| walk(arena, l)).transpose()?;
        let right = n.right.map(|r| walk(arena, r)).transpose()?;

        let size = 1
            + left.as_ref().map_or(0, |x| x.0)
            + right.as_ref().map_or(0, |x| x.0);
        if n.size != size {
            return Err(format!(
                "size mismatch at node {id}: stored {}, actual {size}",
                n.size
            ));
        }
        for child in [&left, &right].into_iter().flatten() {
            if child.1 > n.priority {
                return Err(format!("heap property violated at node {id}"));
            }
        }

        let adjust = |child: &(u32, u64, S)| {
            let mut s = child.2.clone();
            n.pending.apply_to_summary(&mut s, child.0);
            s
        };
        let ls = left.as_ref().map(adjust);
        let rs = right.as_ref().map(adjust);
        let expected = S::combine(ls.as_ref(), &n.value, rs.as_ref());
        if n.summary != expected {
            return Err(format!(
                "summary mismatch at node {id}: stored {:?}, expected {expected:?}",
                n.summary
            ));
        }
        Ok((size, n.priority, n.summary.clone()))
    }

    match root {
        None => Ok(()),
        Some(id) => walk(arena, id).map(|_| ()),
    }
}
