//! Flattening of the note tree into an ordered list of display rows.
//!
//! The tree is walked pre-order; every node becomes one row annotated with
//! box-drawing glyphs that encode its position among its siblings at every
//! ancestor depth, so the renderer can draw the hierarchy line by line.

use serde::Serialize;

use crate::tree::TreeNode;

/// Connector for a child that is not the last of its siblings.
pub const GLYPH_TEE: char = '├';
/// Connector for the last child of a sibling group.
pub const GLYPH_ELBOW: char = '└';
/// Continuation column for an ancestor that has further siblings below.
pub const GLYPH_GUIDE: char = '┆';
/// Blank column for an ancestor that was itself a last child.
pub const GLYPH_BLANK: char = '\u{a0}';

/// One line of the flattened tree, ready for linear rendering.
///
/// Rows are rebuilt on every flatten call and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    /// Decoration prefix built from box-drawing glyphs, empty for the root.
    pub indention: String,
    pub depth: usize,
    pub path: String,
    pub title: String,
    pub first_paragraph: String,
    pub more_text: bool,
    pub tags: Vec<String>,
    pub has_children: bool,
    pub children_shown: bool,
}

/// Flatten `root` into pre-order display rows.
///
/// Read-only over the node graph; the number of rows always equals the
/// materialized node count.
pub fn flatten(root: &TreeNode) -> Vec<DisplayRow> {
    let mut rows = Vec::with_capacity(root.node_count());
    let mut ancestors_last: Vec<bool> = Vec::new();
    flatten_into(root, 0, String::new(), &mut ancestors_last, &mut rows);
    rows
}

fn flatten_into(
    node: &TreeNode,
    depth: usize,
    indention: String,
    ancestors_last: &mut Vec<bool>,
    rows: &mut Vec<DisplayRow>,
) {
    rows.push(DisplayRow {
        indention,
        depth,
        path: node.path.clone(),
        title: node.title.clone(),
        first_paragraph: node.first_paragraph.clone(),
        more_text: node.more_text,
        tags: node.tags.clone(),
        has_children: node.has_children,
        children_shown: node.children_shown(),
    });

    let len = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        let is_last = i == len - 1;
        let connector = if is_last { GLYPH_ELBOW } else { GLYPH_TEE };

        let mut child_indention = String::new();
        for &ancestor_last in ancestors_last.iter() {
            child_indention.push(if ancestor_last { GLYPH_BLANK } else { GLYPH_GUIDE });
        }
        child_indention.push(connector);

        // The stack frame must not leak into the next sibling's subtree.
        ancestors_last.push(is_last);
        flatten_into(child, depth + 1, child_indention, ancestors_last, rows);
        ancestors_last.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(path: &str, children: Vec<TreeNode>) -> TreeNode {
        let mut n = TreeNode::new(path, format!("node {path}"));
        n.has_children = !children.is_empty();
        n.children = children;
        n
    }

    #[test]
    fn test_row_count_matches_node_count() {
        let tree = node(
            "",
            vec![
                node("1", vec![node("11", vec![]), node("12", vec![node("12a", vec![])])]),
                node("2", vec![]),
                node("3", vec![node("31", vec![])]),
            ],
        );
        let rows = flatten(&tree);
        assert_eq!(rows.len(), tree.node_count());
        assert_eq!(rows.len(), 8);
    }

    #[test]
    fn test_single_node_tree() {
        let tree = TreeNode::new("", "root");
        let rows = flatten(&tree);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].indention, "");
        assert_eq!(rows[0].depth, 0);
    }

    #[test]
    fn test_preorder_and_depth() {
        let tree = node("", vec![node("1", vec![node("11", vec![])]), node("2", vec![])]);
        let rows = flatten(&tree);
        let paths: Vec<&str> = rows.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["", "1", "11", "2"]);
        let depths: Vec<usize> = rows.iter().map(|r| r.depth).collect();
        assert_eq!(depths, [0, 1, 2, 1]);
    }

    #[test]
    fn test_exactly_one_elbow_per_sibling_group() {
        let tree = node(
            "",
            vec![
                node("1", vec![node("11", vec![]), node("12", vec![]), node("13", vec![])]),
                node("2", vec![]),
            ],
        );
        let rows = flatten(&tree);

        let connector = |path: &str| {
            rows.iter()
                .find(|r| r.path == path)
                .and_then(|r| r.indention.chars().last())
                .unwrap()
        };
        assert_eq!(connector("1"), GLYPH_TEE);
        assert_eq!(connector("2"), GLYPH_ELBOW);
        assert_eq!(connector("11"), GLYPH_TEE);
        assert_eq!(connector("12"), GLYPH_TEE);
        assert_eq!(connector("13"), GLYPH_ELBOW);
    }

    #[test]
    fn test_ancestor_columns() {
        // "1" has a sibling below, so its descendants carry the guide glyph;
        // "2" is last, so its descendants carry the blank column.
        let tree = node(
            "",
            vec![node("1", vec![node("11", vec![])]), node("2", vec![node("21", vec![])])],
        );
        let rows = flatten(&tree);

        let indention = |path: &str| {
            rows.iter().find(|r| r.path == path).map(|r| r.indention.clone()).unwrap()
        };
        assert_eq!(indention("11"), format!("{GLYPH_GUIDE}{GLYPH_ELBOW}"));
        assert_eq!(indention("21"), format!("{GLYPH_BLANK}{GLYPH_ELBOW}"));
    }

    #[test]
    fn test_sentinel_row_flags() {
        let mut pending = TreeNode::new("1", "pending");
        pending.has_children = true;
        let tree = node("", vec![pending]);
        let rows = flatten(&tree);
        assert!(rows[1].has_children);
        assert!(!rows[1].children_shown);
    }

    #[test]
    fn test_flatten_after_patch_scenario() {
        let mut pending = TreeNode::new("1", "pending");
        pending.has_children = true;
        let mut tree = node("", vec![pending]);

        let outcome = crate::tree::replace_children(
            &mut tree,
            "1",
            vec![TreeNode::new("11", "fresh child")],
        );
        assert!(outcome.was_applied());

        let rows = flatten(&tree);
        let paths: Vec<&str> = rows.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["", "1", "11"]);
        assert!(rows[1].children_shown);
    }
}
