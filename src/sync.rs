//! Keeps a hierarchy of editable nodes synchronized with the live tree.
//!
//! Every structural-change notification (and one eager pass at mount time)
//! rebuilds the whole forest from the container's current children. The
//! previous snapshot is replaced wholesale, never patched: the trees being
//! observed are editor overlays, small enough that correctness beats update
//! cost. Cross-rebuild identity lives only in the `(module_id, node_id)`
//! marker pair and the identity string derived from it.

use crate::identity::node_identity;
use crate::live_tree::{ElementRef, LiveNode, LiveTree, MutationSubscription};
use crate::node_registry::{NodeInfo, NodeRegistry};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// One editable node in the rebuilt hierarchy.
///
/// Transient: owned by the current snapshot and superseded, not mutated, on
/// the next rebuild.
#[derive(Clone)]
pub struct HierarchyItem {
    /// Registry metadata for this node.
    pub node_info: NodeInfo,
    pub module_id: String,
    pub node_id: String,
    /// Derived identity, a pure function of `(module_id, node_id)`.
    pub identity: String,
    pub children: Vec<HierarchyItem>,
}

/// A registry-consistency violation found during a rebuild.
///
/// An identified element whose markers have no registry entry means the
/// marker-injecting tooling and the registry have fallen out of sync. This is
/// surfaced loudly instead of skipping the node, which would silently produce
/// an inconsistent tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncError {
    UnknownModule { module_id: String, node_id: String },
    UnknownNode { module_id: String, node_id: String },
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownModule { module_id, node_id } => write!(
                f,
                "element claims identity ({}, {}) but module {} is not in the node registry",
                module_id, node_id, module_id
            ),
            Self::UnknownNode { module_id, node_id } => write!(
                f,
                "element claims identity ({}, {}) but node {} is not registered in module {}",
                module_id, node_id, node_id, module_id
            ),
        }
    }
}

impl std::error::Error for SyncError {}

/// Rebuilds the hierarchy forest from the observed container.
///
/// Clone this synchronizer to share it across callbacks; clones see the same
/// snapshot and subscription.
#[derive(Clone)]
pub struct TreeSynchronizer {
    registry: Rc<RefCell<NodeRegistry>>,
    forest: Rc<RefCell<Rc<Vec<HierarchyItem>>>>,
    subscription: Rc<RefCell<Option<MutationSubscription>>>,
}

impl TreeSynchronizer {
    /// Create a synchronizer reading from the given node registry.
    pub fn new(registry: Rc<RefCell<NodeRegistry>>) -> Self {
        Self {
            registry,
            forest: Rc::new(RefCell::new(Rc::new(Vec::new()))),
            subscription: Rc::new(RefCell::new(None)),
        }
    }

    /// The current forest snapshot.
    pub fn forest(&self) -> Rc<Vec<HierarchyItem>> {
        self.forest.borrow().clone()
    }

    /// Rebuild the forest from the container's current children.
    ///
    /// Idempotent: redundant rebuilds recompute the same snapshot from the
    /// live structure. Fails only on a registry-consistency violation, in
    /// which case the previous snapshot is left in place.
    pub fn rebuild_from(&self, container: &ElementRef) -> Result<(), SyncError> {
        let items = {
            let registry = self.registry.borrow();
            build_items(container, &registry)?
        };
        *self.forest.borrow_mut() = Rc::new(items);
        Ok(())
    }

    /// Start observing `tree`: one eager rebuild, then a rebuild per
    /// mutation batch.
    ///
    /// A registry-consistency violation inside the notification callback has
    /// no `Result` channel to the host, so it is treated as the assertion
    /// failure it is and panics with the error's message.
    pub fn mount(&self, tree: &LiveTree) -> Result<(), SyncError> {
        let container = tree.root();
        self.rebuild_from(&container)?;

        let sync = self.clone();
        let subscription = tree.subscribe(move |_batch| {
            if let Err(err) = sync.rebuild_from(&container) {
                panic!("{}", err);
            }
        });
        *self.subscription.borrow_mut() = Some(subscription);
        Ok(())
    }

    /// Stop observing; releases the mutation subscription.
    pub fn unmount(&self) {
        self.subscription.borrow_mut().take();
    }

    /// Whether a mutation subscription is currently held.
    pub fn is_mounted(&self) -> bool {
        self.subscription.borrow().is_some()
    }
}

/// Depth-first walk of `element`'s children.
///
/// Identified elements become items; transparent elements contribute their
/// children directly to the parent's list (one-level flattening); non-element
/// nodes are ignored. The child list is copied before recursing — the walked
/// structure is externally owned and only treated as a snapshot at the moment
/// of traversal.
fn build_items(
    element: &ElementRef,
    registry: &NodeRegistry,
) -> Result<Vec<HierarchyItem>, SyncError> {
    let children = element.borrow().children_snapshot();
    let mut items = Vec::new();
    for child in children {
        let child = match child {
            LiveNode::Element(element) => element,
            LiveNode::Text(_) => continue,
        };
        let markers = child
            .borrow()
            .markers()
            .map(|(module, node)| (module.to_string(), node.to_string()));
        match markers {
            Some((module_id, node_id)) => {
                let info = lookup_node(registry, &module_id, &node_id)?;
                let identity = node_identity(&module_id, &node_id);
                let nested = build_items(&child, registry)?;
                items.push(HierarchyItem {
                    node_info: info,
                    module_id,
                    node_id,
                    identity,
                    children: nested,
                });
            }
            None => items.extend(build_items(&child, registry)?),
        }
    }
    Ok(items)
}

fn lookup_node(
    registry: &NodeRegistry,
    module_id: &str,
    node_id: &str,
) -> Result<NodeInfo, SyncError> {
    let module = registry.get(module_id).ok_or_else(|| SyncError::UnknownModule {
        module_id: module_id.to_string(),
        node_id: node_id.to_string(),
    })?;
    let info = module.get(node_id).ok_or_else(|| SyncError::UnknownNode {
        module_id: module_id.to_string(),
        node_id: node_id.to_string(),
    })?;
    Ok(info.clone())
}
