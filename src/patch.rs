//! Minimal structural diffs and the persistence hand-off.
//!
//! An edit never mutates the hierarchy item it came from. The emitter builds
//! the node's post-edit composite value, diffs it against the pre-edit value,
//! and forwards the operations to the persistence collaborator. Whether the
//! edit "took" is only ever decided by the next externally-driven rebuild.

use crate::sync::HierarchyItem;
use crate::value::{CompositeValue, PropertyValue};
use std::rc::Rc;

/// One structural diff operation.
///
/// Paths are property-key sequences rooted at the node's composite value.
#[derive(Clone, Debug, PartialEq)]
pub enum PatchOp {
    Replace { path: Vec<String>, value: PropertyValue },
    Add { path: Vec<String>, value: PropertyValue },
    Remove { path: Vec<String> },
}

impl PatchOp {
    pub fn path(&self) -> &[String] {
        match self {
            PatchOp::Replace { path, .. } | PatchOp::Add { path, .. } | PatchOp::Remove { path } => {
                path
            }
        }
    }
}

/// Compute the ordered operation list turning `current` into `next`.
///
/// Minimal: untouched keys produce no operation. Output order follows the
/// composite value's key order, so equal inputs always produce equal patches.
pub fn diff(current: &CompositeValue, next: &CompositeValue) -> Vec<PatchOp> {
    let mut ops = Vec::new();
    for (key, value) in next {
        match current.get(key) {
            Some(existing) if existing == value => {}
            Some(_) => ops.push(PatchOp::Replace {
                path: vec![key.clone()],
                value: value.clone(),
            }),
            None => ops.push(PatchOp::Add {
                path: vec![key.clone()],
                value: value.clone(),
            }),
        }
    }
    for key in current.keys() {
        if !next.contains_key(key) {
            ops.push(PatchOp::Remove {
                path: vec![key.clone()],
            });
        }
    }
    ops
}

/// Persistence collaborator interface.
///
/// Fire-and-forget from the core's side: no completion wait, no retry. A
/// failed save is the collaborator's concern.
pub trait SaveNodeProperties {
    fn save_node_properties(&self, module_id: &str, node_id: &str, patches: Vec<PatchOp>);
}

/// The node's pre-edit composite value: its static attributes only.
///
/// Dynamic attributes are not editable and do not participate in diffs.
pub fn composite_value(item: &HierarchyItem) -> CompositeValue {
    item.node_info
        .attributes
        .iter()
        .filter(|attr| attr.kind == crate::node_registry::AttributeKind::Static)
        .map(|attr| (attr.name.clone(), attr.value.clone()))
        .collect()
}

/// Turns single-property edits into persisted patches.
#[derive(Clone)]
pub struct PatchEmitter {
    sink: Rc<dyn SaveNodeProperties>,
}

impl PatchEmitter {
    pub fn new(sink: Rc<dyn SaveNodeProperties>) -> Self {
        Self { sink }
    }

    /// Emit the patch for setting `key` to `new_value` on `item`.
    ///
    /// A no-op edit (the diff comes out empty) is not forwarded.
    pub fn emit_property_change(&self, item: &HierarchyItem, key: &str, new_value: PropertyValue) {
        let current = composite_value(item);
        let mut next = current.clone();
        next.insert(key.to_string(), new_value);

        let patches = diff(&current, &next);
        if patches.is_empty() {
            return;
        }
        self.sink
            .save_node_properties(&item.module_id, &item.node_id, patches);
    }
}
