//! Test harness for inspector integration tests.
//!
//! Provides a complete setup with a node registry, a live tree, an attached
//! controller, and a persistence recorder, plus helper methods for building
//! scenes and reading back the synchronized hierarchy.

#![allow(dead_code)]

use super::PersistenceRecorder;
use slint_live_inspector::{
    Element, ElementRef, HierarchyItem, InspectorController, LiveNode, LiveTree, NodeInfo,
    NodeRegistry,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Test harness wiring the controller to a fresh tree and registry.
pub struct InspectorTestHarness {
    pub ctrl: InspectorController,
    pub tree: LiveTree,
    pub registry: Rc<RefCell<NodeRegistry>>,
    pub recorder: PersistenceRecorder,
}

impl InspectorTestHarness {
    /// Create a harness with an empty registry and an empty, attached tree.
    pub fn new() -> Self {
        let registry = Rc::new(RefCell::new(NodeRegistry::new()));
        let recorder = PersistenceRecorder::new();
        let ctrl = InspectorController::new(registry.clone(), Rc::new(recorder.clone()));
        let tree = LiveTree::new();
        ctrl.attach(&tree).expect("empty tree attaches cleanly");
        Self {
            ctrl,
            tree,
            registry,
            recorder,
        }
    }

    /// Register node metadata under `(module_id, node_id)`.
    pub fn register_node(&self, module_id: &str, node_id: &str, info: NodeInfo) {
        self.registry
            .borrow_mut()
            .register_node(module_id, node_id, info);
    }

    /// Register metadata and append a matching identified element to `parent`.
    ///
    /// Returns the element so children can be added beneath it.
    pub fn mount_node(
        &self,
        parent: &ElementRef,
        tag: &str,
        module_id: &str,
        node_id: &str,
        info: NodeInfo,
    ) -> ElementRef {
        self.register_node(module_id, node_id, info);
        let element = Element::identified(tag, module_id, node_id);
        self.tree
            .insert_child(parent, LiveNode::Element(element.clone()));
        element
    }

    /// Append an unidentified wrapper element to `parent`.
    pub fn mount_wrapper(&self, parent: &ElementRef, tag: &str) -> ElementRef {
        let element = Element::new(tag);
        self.tree
            .insert_child(parent, LiveNode::Element(element.clone()));
        element
    }

    /// Deliver pending mutations (one event-loop turn).
    pub fn flush(&self) {
        self.tree.flush();
    }

    /// Node ids of the current forest, flattened pre-order.
    pub fn forest_node_ids(&self) -> Vec<String> {
        fn collect(items: &[HierarchyItem], out: &mut Vec<String>) {
            for item in items {
                out.push(item.node_id.clone());
                collect(&item.children, out);
            }
        }
        let mut out = Vec::new();
        collect(&self.ctrl.forest(), &mut out);
        out
    }
}

impl Default for InspectorTestHarness {
    fn default() -> Self {
        Self::new()
    }
}
