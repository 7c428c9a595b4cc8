//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use slint_live_inspector::{PatchOp, SaveNodeProperties};
use std::cell::RefCell;
use std::rc::Rc;

/// One recorded `save_node_properties` call.
#[derive(Clone)]
pub struct SaveCall {
    pub module_id: String,
    pub node_id: String,
    pub patches: Vec<PatchOp>,
}

/// Records persistence calls for testing.
#[derive(Default, Clone)]
pub struct PersistenceRecorder {
    pub calls: Rc<RefCell<Vec<SaveCall>>>,
}

impl PersistenceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl SaveNodeProperties for PersistenceRecorder {
    fn save_node_properties(&self, module_id: &str, node_id: &str, patches: Vec<PatchOp>) {
        self.calls.borrow_mut().push(SaveCall {
            module_id: module_id.to_string(),
            node_id: node_id.to_string(),
            patches,
        });
    }
}
