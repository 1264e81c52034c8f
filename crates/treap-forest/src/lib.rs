//! Arena-based randomized treap containers.
//!
//! Two containers share one split/merge engine:
//!
//! - [`TreapList`] — implicit-key sequence: an array with O(log n)
//!   insert/remove at any position, lazy range updates (e.g. range-add),
//!   range reversal, and range summaries (e.g. sum/max).
//! - [`TreapMultiset`] — explicit-key ordered multiset with rank, k-th,
//!   predecessor and successor queries by plain descent.
//!
//! Instead of raw pointers, all tree links are `Option<u32>` indices into
//! a per-tree [`NodeArena`]: each container owns its arena, so any number
//! of independent trees coexist without shared state.
//!
//! Balance is randomized, not rotational: [`merge`](ops::merge) always
//! promotes the higher-priority node, and priorities are i.i.d. draws from
//! the tree's own PRNG, giving expected O(log n) height. That bound is
//! only as good as the priority source: each tree seeds a xoshiro256**
//! generator from `OsRng` at construction, so shapes are not predictable
//! from outside the process. `with_seed` on either container forfeits that
//! for reproducibility and belongs in tests.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`NodeId`], [`Summary`] and [`Update`] trait seams |
//! | [`node`] | [`TreapNode`] record |
//! | [`arena`] | [`NodeArena`] slot pool with free-list reuse |
//! | [`ops`] | `pull_up` / `push_down` / `split_at` / `split_by` / `merge` |
//! | [`stats`] | [`SumMax`], [`AddDelta`], [`NoSummary`], [`NoUpdate`] |
//! | [`list`] | [`TreapList`], [`TreapNumList`], [`ListError`] |
//! | [`multiset`] | [`TreapMultiset`] |

pub mod arena;
pub mod list;
pub mod multiset;
pub mod node;
pub mod ops;
pub mod stats;
pub mod types;

pub use arena::NodeArena;
pub use list::{ListError, TreapList, TreapNumList};
pub use multiset::TreapMultiset;
pub use node::TreapNode;
pub use stats::{AddDelta, NoSummary, NoUpdate, SumMax};
pub use types::{NodeId, Summary, Update};
