//! # Slint Live Inspector Library
//!
//! A headless library for inspecting and editing the properties of live UI
//! components inside a running application, and persisting those edits as
//! minimal structural patches.
//!
//! ## Features
//!
//! - **Identity-Preserving Hierarchy** - Rebuilds a stable forest of editable
//!   nodes from an arbitrarily mutating rendered tree
//! - **Batched Mutation Observation** - One rebuild per event-loop turn, no
//!   matter how many structural changes occurred
//! - **Trait-Based Editor Contracts** - Components declare editable properties
//!   via `EditableProperties`; editor widgets stay external
//! - **Minimal Patches** - An edit produces exactly the diff operations the
//!   persistence layer needs, nothing else
//! - **Selection Stability** - Selections survive full tree rebuilds and
//!   resolve to "no selection" when a node vanishes
//!
//! ## Quick Start
//!
//! ```ignore
//! use slint_live_inspector::{InspectorController, LiveTree};
//!
//! let ctrl = InspectorController::new(node_registry, persistence);
//! ctrl.register_component("Button", button_info());
//! ctrl.attach(&tree)?;
//!
//! // After each turn of the host event loop:
//! tree.flush();
//! ctrl.sync_hierarchy_to_model(&hierarchy_model);
//! ```
//!
//! ## Core Components
//!
//! - [`LiveTree`] - The observed container and its mutation subscription
//! - [`TreeSynchronizer`] - Rebuilds the hierarchy forest on every change
//! - [`NodeRegistry`] - Externally populated static node metadata
//! - [`ComponentRegistry`] - Per-component property-editing contracts
//! - [`PatchEmitter`] - Turns single-property edits into persisted diffs
//! - [`InspectorController`] - Wires everything together for a host

pub mod components;
pub mod identity;
pub mod inspector;
pub mod live_tree;
pub mod node_registry;
pub mod patch;
pub mod selection;
pub mod sync;
pub mod value;

// Re-export traits and functions
pub use components::{
    ComponentInfo, ComponentRegistry, EditableProperties, PropertyEditor, PropertyInfo,
};
pub use identity::node_identity;
pub use inspector::{HierarchyRow, InspectorController, PropertyRow};
pub use live_tree::{
    Element, ElementRef, LiveNode, LiveTree, MutationBatch, MutationKind, MutationRecord,
    MutationSubscription,
};
pub use node_registry::{Attribute, AttributeKind, ModuleNodes, NodeInfo, NodeRegistry};
pub use patch::{composite_value, diff, PatchEmitter, PatchOp, SaveNodeProperties};
pub use selection::{resolve_selection, SelectionState};
pub use sync::{HierarchyItem, SyncError, TreeSynchronizer};
pub use value::{CompositeValue, PropertyValue};
