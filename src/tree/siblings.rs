//! Previous/next sibling lookup over a flattened row list.
//!
//! Depth is inferred purely from path length, so the answer is always
//! consistent with the row sequence it was derived from; the tree is never
//! re-walked. Scans stop at the first row with a shorter path (an ancestor
//! boundary), keeping the cost linear in the distance to the nearest
//! sibling rather than the full list.

use crate::tree::node::parent_path;
use crate::tree::DisplayRow;

/// Paths of the rows flanking a target row within its sibling group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Siblings {
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// Locate the previous and next sibling of `rows[index]`.
///
/// The root row, rows at the top level of the view (empty parent path), and
/// out-of-range indices yield no siblings.
pub fn find_siblings(rows: &[DisplayRow], index: usize) -> Siblings {
    let Some(target) = rows.get(index) else {
        return Siblings::default();
    };
    let Some(parent) = parent_path(&target.path) else {
        return Siblings::default();
    };
    if parent.is_empty() {
        return Siblings::default();
    }
    let target_len = target.path.chars().count();

    let is_sibling = |row: &DisplayRow| {
        row.path.chars().count() == target_len && row.path.starts_with(parent)
    };
    let is_boundary = |row: &DisplayRow| row.path.chars().count() < target_len;

    let mut prev = None;
    for row in rows[..index].iter().rev() {
        if is_sibling(row) {
            prev = Some(row.path.clone());
            break;
        }
        if is_boundary(row) {
            break;
        }
    }

    let mut next = None;
    for row in rows[index + 1..].iter() {
        if is_sibling(row) {
            next = Some(row.path.clone());
            break;
        }
        if is_boundary(row) {
            break;
        }
    }

    Siblings { prev, next }
}
