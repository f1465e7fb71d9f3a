//! Remote note store access for notewalk.
//!
//! The engine consumes exactly one remote operation, `fetch_subtree`; tags
//! and bookmarks are auxiliary lookups for the surrounding UI. Responses are
//! deserialized into the [`TreeNode`] schema and validated at this boundary,
//! so malformed payloads are rejected early instead of propagating untyped
//! structures into the tree.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::tree::TreeNode;

/// Errors crossing the store boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to note store failed: {0}")]
    Transport(#[from] Box<ureq::Error>),
    #[error("could not decode note store response: {0}")]
    Decode(#[from] std::io::Error),
    #[error("note store returned a malformed payload: {0}")]
    Malformed(String),
}

/// Read access to the remote note store.
pub trait NodeStore {
    /// Fetch the subtree rooted at `path`, with children materialized up to
    /// `max_depth` additional levels. Levels beyond that are reported as
    /// lazy sentinels (`has_children = true`, empty `children`).
    ///
    /// Transport faults surface as errors; they are never conflated with
    /// "no children".
    fn fetch_subtree(&self, path: &str, max_depth: usize) -> Result<TreeNode, StoreError>;

    /// All tag labels known to the store, in display order.
    fn fetch_tags(&self) -> Result<Vec<String>, StoreError>;

    /// Bookmark label to path mapping.
    fn fetch_bookmarks(&self) -> Result<BTreeMap<String, String>, StoreError>;
}

/// HTTP+JSON implementation of [`NodeStore`].
pub struct HttpStore {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpStore {
    /// `base_url` is the server root, e.g. `http://localhost:7119`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new()
                .timeout(std::time::Duration::from_secs(10))
                .build(),
        }
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, StoreError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut request = self.agent.get(&url);
        for (k, v) in query {
            request = request.query(k, v);
        }
        let response = request.call().map_err(Box::new)?;
        Ok(response.into_json::<T>()?)
    }
}

impl NodeStore for HttpStore {
    fn fetch_subtree(&self, path: &str, max_depth: usize) -> Result<TreeNode, StoreError> {
        let node: TreeNode = self.get_json(
            &tree_endpoint(path),
            &[("max_depth", &max_depth.to_string())],
        )?;
        validate_subtree(&node, path)?;
        Ok(node)
    }

    fn fetch_tags(&self) -> Result<Vec<String>, StoreError> {
        self.get_json("api/tags", &[])
    }

    fn fetch_bookmarks(&self) -> Result<BTreeMap<String, String>, StoreError> {
        self.get_json("api/bookmarks", &[])
    }
}

/// The subtree endpoint for `path`, with the path segment percent-encoded
/// so reserved characters cannot truncate or reroute the request.
fn tree_endpoint(path: &str) -> String {
    format!("api/tree/{}", urlencoding::encode(path))
}

/// Check that a fetched subtree is rooted where requested and that every
/// child path extends its parent's by exactly one character. Paths only ever
/// originate from the store, so a violation here is a store bug and the
/// payload is refused outright.
pub fn validate_subtree(node: &TreeNode, expected_path: &str) -> Result<(), StoreError> {
    if node.path != expected_path {
        return Err(StoreError::Malformed(format!(
            "subtree rooted at {:?}, requested {:?}",
            node.path, expected_path
        )));
    }
    validate_children(node)
}

fn validate_children(node: &TreeNode) -> Result<(), StoreError> {
    for child in &node.children {
        let extends_parent = child.path.strip_prefix(node.path.as_str())
            .is_some_and(|rest| rest.chars().count() == 1);
        if !extends_parent {
            return Err(StoreError::Malformed(format!(
                "child path {:?} does not extend parent path {:?} by one segment",
                child.path, node.path
            )));
        }
        validate_children(child)?;
    }
    Ok(())
}
