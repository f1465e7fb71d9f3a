use serde::{Deserialize, Serialize};

/// A node of the remote note tree, possibly only partially materialized.
///
/// Paths grow by exactly one character per level: the root is `""`, its
/// children are `"1"`, `"2"`, ..., a child of `"1"` is `"11"` and so on.
/// Path length therefore encodes depth and ancestry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub path: String,
    pub title: String,
    #[serde(default)]
    pub first_paragraph: String,
    #[serde(default)]
    pub more_text: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    /// True when the store reports children exist, whether or not they are
    /// currently fetched into `children`.
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            first_paragraph: String::new(),
            more_text: false,
            tags: Vec::new(),
            has_children: false,
            children: Vec::new(),
        }
    }

    /// Distance from the root, derived from the path.
    pub fn depth(&self) -> usize {
        self.path.chars().count()
    }

    /// Lazy sentinel: children exist in the store but are not fetched.
    pub fn is_unfetched(&self) -> bool {
        self.has_children && self.children.is_empty()
    }

    /// Whether materialized children are present for display.
    pub fn children_shown(&self) -> bool {
        self.has_children && !self.children.is_empty()
    }

    /// Total nodes reachable through `children`, this node included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Depth-first search for the node with exactly this path.
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(path))
    }

    /// Mutable variant of [`find`](Self::find).
    pub fn find_mut(&mut self, path: &str) -> Option<&mut TreeNode> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(path))
    }
}

/// Strip the last path segment (one character), yielding the parent path.
///
/// Returns `None` for the root path.
pub fn parent_path(path: &str) -> Option<&str> {
    let (idx, _) = path.char_indices().last()?;
    Some(&path[..idx])
}
