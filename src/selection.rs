//! Selection state and re-resolution across rebuilds.
//!
//! The selection is a single optional identity string, not a reference into a
//! snapshot. After every rebuild the identity is resolved against the new
//! forest; a node that vanished simply resolves to `None` ("no selection"),
//! which is a normal state, never an error.

use crate::sync::HierarchyItem;

/// The current selection: at most one identity string.
#[derive(Default)]
pub struct SelectionState {
    selected: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the item with the given identity.
    pub fn select(&mut self, identity: impl Into<String>) {
        self.selected = Some(identity.into());
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// The selected identity, if any.
    pub fn identity(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }
}

/// Find the selected item in the current forest.
///
/// Recursive pre-order search; the first identity match wins (identities are
/// expected unique — a duplicate is a data-consistency bug upstream). Returns
/// `None` when the identity is unset, stale, or absent.
pub fn resolve_selection<'a>(
    forest: &'a [HierarchyItem],
    identity: Option<&str>,
) -> Option<&'a HierarchyItem> {
    let identity = identity?;
    find_by_identity(forest, identity)
}

fn find_by_identity<'a>(items: &'a [HierarchyItem], identity: &str) -> Option<&'a HierarchyItem> {
    for item in items {
        if item.identity == identity {
            return Some(item);
        }
        if let Some(found) = find_by_identity(&item.children, identity) {
            return Some(found);
        }
    }
    None
}
