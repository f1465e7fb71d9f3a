//! Lazy prefix expansion of a target path.
//!
//! Navigation to a path fetches the subtree at every non-empty prefix of the
//! target, shortest first, and splices each fetched window of children into
//! the in-memory tree. Branches materialized by earlier navigations are left
//! untouched; prefixes are re-fetched even when already expanded, so the
//! operation is safe to repeat but does no deduplication.

use thiserror::Error;

use crate::store::{NodeStore, StoreError};
use crate::tree::{replace_children, TreeNode};

/// Failure inside [`expand_path`]. Prefixes patched before the failure stay
/// materialized, so a partial view can still be rendered.
#[derive(Debug, Error)]
pub enum ExpandError {
    #[error("fetching subtree at {path:?} failed: {source}")]
    Fetch {
        path: String,
        #[source]
        source: StoreError,
    },
}

/// What an expansion actually did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandReport {
    /// Prefixes whose children were fetched and spliced in.
    pub patched: Vec<String>,
    /// Prefixes fetched from the store but absent from the local tree, e.g.
    /// after a concurrent local prune. These are skipped, not fatal.
    pub missing: Vec<String>,
}

impl ExpandReport {
    /// True when every prefix of the target was found and patched.
    pub fn fully_revealed(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Reveal `target` by sequentially fetching and merging every non-empty
/// prefix, in increasing-length order. Each fetch is completed before the
/// next is issued. A transport or decode failure aborts the walk and
/// propagates; a locally missing prefix is recorded and the walk continues.
pub fn expand_path(
    tree: &mut TreeNode,
    store: &dyn NodeStore,
    target: &str,
    max_depth: usize,
) -> Result<ExpandReport, ExpandError> {
    let mut report = ExpandReport::default();

    for (idx, ch) in target.char_indices() {
        let prefix = &target[..idx + ch.len_utf8()];

        let fetched = store.fetch_subtree(prefix, max_depth).map_err(|source| {
            ExpandError::Fetch { path: prefix.to_string(), source }
        })?;

        let outcome = replace_children(tree, prefix, fetched.children);
        if outcome.was_applied() {
            report.patched.push(prefix.to_string());
        } else {
            report.missing.push(prefix.to_string());
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    use super::*;
    use crate::tree::flatten;

    /// Store stub backed by a fully materialized tree; records every
    /// fetch_subtree call in order.
    struct FixtureStore {
        tree: TreeNode,
        calls: RefCell<Vec<(String, usize)>>,
        fail_on: Option<String>,
    }

    impl FixtureStore {
        fn new(tree: TreeNode) -> Self {
            Self { tree, calls: RefCell::new(Vec::new()), fail_on: None }
        }

        fn failing_on(tree: TreeNode, path: &str) -> Self {
            Self { tree, calls: RefCell::new(Vec::new()), fail_on: Some(path.to_string()) }
        }

        /// Clone `node` with children materialized `levels` deep; deeper
        /// nodes degrade to the lazy sentinel.
        fn window(node: &TreeNode, levels: usize) -> TreeNode {
            let mut out = node.clone();
            if levels == 0 {
                out.children = Vec::new();
            } else {
                out.children =
                    node.children.iter().map(|c| Self::window(c, levels - 1)).collect();
            }
            out
        }
    }

    impl NodeStore for FixtureStore {
        fn fetch_subtree(&self, path: &str, max_depth: usize) -> Result<TreeNode, StoreError> {
            self.calls.borrow_mut().push((path.to_string(), max_depth));
            if self.fail_on.as_deref() == Some(path) {
                return Err(StoreError::Malformed("injected fault".to_string()));
            }
            let node = self
                .tree
                .find(path)
                .ok_or_else(|| StoreError::Malformed(format!("no node at {path:?}")))?;
            Ok(Self::window(node, max_depth))
        }

        fn fetch_tags(&self) -> Result<Vec<String>, StoreError> {
            Ok(Vec::new())
        }

        fn fetch_bookmarks(&self) -> Result<BTreeMap<String, String>, StoreError> {
            Ok(BTreeMap::new())
        }
    }

    fn node(path: &str, children: Vec<TreeNode>) -> TreeNode {
        let mut n = TreeNode::new(path, format!("node {path}"));
        n.has_children = !children.is_empty();
        n.children = children;
        n
    }

    fn store_tree() -> TreeNode {
        node(
            "",
            vec![
                node(
                    "1",
                    vec![
                        node("1a", vec![node("1ab", vec![node("1abc", vec![])])]),
                        node("1b", vec![]),
                    ],
                ),
                node("2", vec![node("21", vec![])]),
            ],
        )
    }

    /// A freshly seeded local tree: root window only, depth-1 sentinels.
    fn seeded_local_tree() -> TreeNode {
        let mut root = node("", vec![]);
        root.has_children = true;
        let mut one = TreeNode::new("1", "node 1");
        one.has_children = true;
        let mut two = TreeNode::new("2", "node 2");
        two.has_children = true;
        root.children = vec![one, two];
        root
    }

    #[test]
    fn test_expand_fetches_each_prefix_in_order() {
        let store = FixtureStore::new(store_tree());
        let mut tree = seeded_local_tree();

        let report = expand_path(&mut tree, &store, "1a", 2).unwrap();

        assert_eq!(
            *store.calls.borrow(),
            vec![("1".to_string(), 2), ("1a".to_string(), 2)]
        );
        assert_eq!(report.patched, ["1", "1a"]);
        assert!(report.fully_revealed());

        // Every node on the ancestor chain is materialized or a sentinel.
        assert!(tree.find("1").unwrap().children_shown());
        assert!(tree.find("1a").unwrap().children_shown());
        let deep = tree.find("1ab").unwrap();
        assert!(deep.children_shown() || deep.is_unfetched());
    }

    #[test]
    fn test_expand_preserves_unrelated_branches() {
        let store = FixtureStore::new(store_tree());
        let mut tree = seeded_local_tree();
        expand_path(&mut tree, &store, "2", 1).unwrap();
        let two_before = tree.find("2").unwrap().clone();

        expand_path(&mut tree, &store, "1a", 2).unwrap();

        assert_eq!(tree.find("2").unwrap(), &two_before);
    }

    #[test]
    fn test_expand_refetches_already_expanded_prefixes() {
        let store = FixtureStore::new(store_tree());
        let mut tree = seeded_local_tree();
        expand_path(&mut tree, &store, "1a", 2).unwrap();
        expand_path(&mut tree, &store, "1a", 2).unwrap();
        // No deduplication: both calls walk both prefixes.
        assert_eq!(store.calls.borrow().len(), 4);
    }

    #[test]
    fn test_expand_records_locally_missing_prefixes_and_continues() {
        let store = FixtureStore::new(store_tree());
        // The "1" branch was pruned locally; the store still knows it.
        let mut tree = seeded_local_tree();
        tree.children.retain(|c| c.path != "1");

        let report = expand_path(&mut tree, &store, "1a", 2).unwrap();

        assert!(!report.fully_revealed());
        assert_eq!(report.missing, ["1", "1a"]);
        // Both prefixes were still fetched.
        assert_eq!(store.calls.borrow().len(), 2);
    }

    #[test]
    fn test_fetch_failure_propagates_but_keeps_earlier_patches() {
        let store = FixtureStore::failing_on(store_tree(), "1a");
        let mut tree = seeded_local_tree();

        let err = expand_path(&mut tree, &store, "1a", 2).unwrap_err();
        let ExpandError::Fetch { path, .. } = err;
        assert_eq!(path, "1a");

        // The first prefix was patched before the fault; the partial view
        // still flattens and renders.
        assert!(tree.find("1").unwrap().children_shown());
        assert_eq!(flatten(&tree).len(), tree.node_count());
    }

    #[test]
    fn test_expand_empty_target_is_a_no_op() {
        let store = FixtureStore::new(store_tree());
        let mut tree = seeded_local_tree();
        let report = expand_path(&mut tree, &store, "", 2).unwrap();
        assert!(report.patched.is_empty());
        assert!(store.calls.borrow().is_empty());
    }
}
