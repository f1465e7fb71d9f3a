//! The lazy tree materialization and patch engine.
//!
//! Holds a partial, incrementally fetched copy of the remote note tree,
//! reveals target paths by prefix expansion, merges fetched fragments
//! without discarding loaded siblings, flattens the tree for linear
//! rendering, and answers sibling queries over the flattened rows.

pub mod expand;
pub mod flatten;
pub mod node;
pub mod patch;
pub mod siblings;

pub use expand::{expand_path, ExpandError, ExpandReport};
pub use flatten::{flatten, DisplayRow};
pub use node::{parent_path, TreeNode};
pub use patch::{delete, replace_children, replace_tags, PatchOutcome};
pub use siblings::{find_siblings, Siblings};
