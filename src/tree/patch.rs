//! In-place structural edits on the materialized tree.
//!
//! All three operations locate their target through exact path equality and
//! report the result as a [`PatchOutcome`] instead of a bare boolean, so
//! callers can surface a miss instead of silently dropping it. A miss never
//! mutates the tree and never panics.

use crate::tree::TreeNode;

/// Result of a structural edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The node was found and the edit applied.
    Patched { path: String },
    /// No node with the given path exists in the materialized tree.
    NotFound { path: String },
}

impl PatchOutcome {
    pub fn was_applied(&self) -> bool {
        matches!(self, PatchOutcome::Patched { .. })
    }

    /// The path the edit targeted, whatever the outcome.
    pub fn path(&self) -> &str {
        match self {
            PatchOutcome::Patched { path } | PatchOutcome::NotFound { path } => path,
        }
    }
}

/// Replace the children of the node at `path`.
///
/// `has_children` is never downgraded: once the store has reported that
/// children exist, an empty replacement leaves the node in the lazy sentinel
/// state rather than turning it into a leaf, since an empty fetch window may
/// reflect depth truncation rather than absence. Idempotent for identical
/// replacements.
pub fn replace_children(tree: &mut TreeNode, path: &str, new_children: Vec<TreeNode>) -> PatchOutcome {
    match tree.find_mut(path) {
        Some(node) => {
            node.has_children = node.has_children || !new_children.is_empty();
            node.children = new_children;
            PatchOutcome::Patched { path: path.to_string() }
        }
        None => PatchOutcome::NotFound { path: path.to_string() },
    }
}

/// Replace the tag set of the node at `path`.
pub fn replace_tags(tree: &mut TreeNode, path: &str, new_tags: Vec<String>) -> PatchOutcome {
    match tree.find_mut(path) {
        Some(node) => {
            node.tags = new_tags;
            PatchOutcome::Patched { path: path.to_string() }
        }
        None => PatchOutcome::NotFound { path: path.to_string() },
    }
}

/// Remove the node at `path` (and its subtree) from the tree.
///
/// Direct children of each visited node are checked for an exact match
/// first; recursion only descends into children whose path is a prefix of
/// the target, and stops scanning further siblings as soon as the deletion
/// succeeds anywhere below. The root itself cannot be deleted.
pub fn delete(tree: &mut TreeNode, path: &str) -> PatchOutcome {
    if delete_below(tree, path) {
        PatchOutcome::Patched { path: path.to_string() }
    } else {
        PatchOutcome::NotFound { path: path.to_string() }
    }
}

fn delete_below(node: &mut TreeNode, path: &str) -> bool {
    if let Some(pos) = node.children.iter().position(|c| c.path == path) {
        node.children.remove(pos);
        return true;
    }
    for child in node.children.iter_mut() {
        if path.starts_with(&child.path) && delete_below(child, path) {
            return true;
        }
    }
    false
}
