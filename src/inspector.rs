//! High-level controller for live-inspector hosts.
//!
//! The [`InspectorController`] wires the synchronizer, the selection, the
//! component registry, and the patch emitter together so a host only has to
//! attach it to a [`LiveTree`] and connect callbacks.
//!
//! # Example
//!
//! ```ignore
//! use slint_live_inspector::{InspectorController, LiveTree};
//! use slint::VecModel;
//! use std::rc::Rc;
//!
//! let ctrl = InspectorController::new(node_registry, persistence);
//! ctrl.register_component("Button", button_component_info());
//! ctrl.attach(&tree)?;
//!
//! // Hierarchy view
//! let rows = Rc::new(VecModel::default());
//! window.set_hierarchy(slint::ModelRc::from(rows.clone()));
//! window.on_item_clicked(ctrl.select_callback());
//!
//! // After each event-loop turn:
//! tree.flush();
//! ctrl.sync_hierarchy_to_model(&rows);
//! ctrl.render_editors();
//! ```

use crate::components::{ComponentInfo, ComponentRegistry, EditableProperties};
use crate::live_tree::LiveTree;
use crate::node_registry::NodeRegistry;
use crate::patch::{composite_value, PatchEmitter, SaveNodeProperties};
use crate::selection::{resolve_selection, SelectionState};
use crate::sync::{HierarchyItem, SyncError, TreeSynchronizer};
use crate::value::PropertyValue;
use slint::{Model, SharedString, VecModel};
use std::cell::RefCell;
use std::rc::Rc;

/// One row of the property panel for the selected item.
#[derive(Clone)]
pub struct PropertyRow {
    pub key: String,
    /// Current static attribute value; `None` when the attribute is absent
    /// or dynamic.
    pub value: Option<PropertyValue>,
    /// `false` means "no editor available" — shown as a placeholder, not an
    /// error.
    pub editable: bool,
}

/// One row of the flattened hierarchy view.
#[derive(Clone)]
pub struct HierarchyRow {
    pub identity: SharedString,
    pub tag: SharedString,
    pub component: SharedString,
    pub depth: i32,
    pub selected: bool,
}

/// Controller that owns the inspector's state and provides callback
/// implementations.
///
/// Clone this controller to share it across callbacks.
#[derive(Clone)]
pub struct InspectorController {
    components: Rc<RefCell<ComponentRegistry>>,
    sync: TreeSynchronizer,
    selection: Rc<RefCell<SelectionState>>,
    emitter: PatchEmitter,
}

impl InspectorController {
    /// Create a controller reading node metadata from `node_registry` and
    /// persisting edits through `sink`.
    pub fn new(node_registry: Rc<RefCell<NodeRegistry>>, sink: Rc<dyn SaveNodeProperties>) -> Self {
        Self {
            components: Rc::new(RefCell::new(ComponentRegistry::new())),
            sync: TreeSynchronizer::new(node_registry),
            selection: Rc::new(RefCell::new(SelectionState::new())),
            emitter: PatchEmitter::new(sink),
        }
    }

    // === Lifecycle ===

    /// Start observing `tree`; performs one eager rebuild.
    pub fn attach(&self, tree: &LiveTree) -> Result<(), SyncError> {
        self.sync.mount(tree)
    }

    /// Stop observing; releases the mutation subscription.
    pub fn detach(&self) {
        self.sync.unmount();
    }

    // === Registration ===

    /// Register (or overwrite) a component's editing contract.
    pub fn register_component(&self, name: impl Into<String>, info: ComponentInfo) {
        self.components.borrow_mut().register(name, info);
    }

    /// Register through the [`EditableProperties`] capability.
    pub fn register_editable(&self, name: impl Into<String>, component: &dyn EditableProperties) {
        self.components.borrow_mut().register_component(name, component);
    }

    // === Selection ===

    /// Select the item with the given identity.
    pub fn select(&self, identity: impl Into<String>) {
        self.selection.borrow_mut().select(identity);
    }

    /// Clear the selection.
    pub fn clear_selection(&self) {
        self.selection.borrow_mut().clear();
    }

    /// The selected identity, if any.
    pub fn selected_identity(&self) -> Option<String> {
        self.selection.borrow().identity().map(str::to_string)
    }

    /// Resolve the selection against the current snapshot.
    ///
    /// `None` when nothing is selected or the node vanished in a rebuild.
    pub fn selected_item(&self) -> Option<HierarchyItem> {
        let forest = self.sync.forest();
        let selection = self.selection.borrow();
        resolve_selection(&forest, selection.identity()).cloned()
    }

    /// Returns a callback for hierarchy-view item clicks.
    pub fn select_callback(&self) -> impl Fn(SharedString) {
        let selection = self.selection.clone();
        move |identity| {
            selection.borrow_mut().select(identity.as_str());
        }
    }

    // === Property panel ===

    fn component_info_for(&self, item: &HierarchyItem) -> Rc<ComponentInfo> {
        let components = self.components.borrow();
        match &item.node_info.component {
            Some(name) => components.lookup(name),
            None => components.empty_info(),
        }
    }

    /// Property rows for the selected item, in stable key order.
    ///
    /// Empty when nothing is selected or the component declares no editable
    /// properties.
    pub fn property_rows(&self) -> Vec<PropertyRow> {
        let item = match self.selected_item() {
            Some(item) => item,
            None => return Vec::new(),
        };
        let info = self.component_info_for(&item);
        let values = composite_value(&item);
        info.properties
            .iter()
            .map(|(key, property)| PropertyRow {
                key: key.clone(),
                value: values.get(key).cloned(),
                editable: property.editor.is_some(),
            })
            .collect()
    }

    /// Invoke every registered property editor for the selected item.
    ///
    /// Each editor receives the current static attribute value (or `None`)
    /// and an `on_change` wired to the patch emitter; the emitted patch
    /// carries the item's `(module_id, node_id)`.
    pub fn render_editors(&self) {
        let item = match self.selected_item() {
            Some(item) => item,
            None => return,
        };
        let info = self.component_info_for(&item);
        let values = composite_value(&item);
        for (key, property) in &info.properties {
            let editor = match &property.editor {
                Some(editor) => editor.clone(),
                None => continue,
            };
            let emitter = self.emitter.clone();
            let item = item.clone();
            let key_for_change = key.clone();
            let on_change = move |value: PropertyValue| {
                emitter.emit_property_change(&item, &key_for_change, value);
            };
            editor.render(values.get(key), &on_change);
        }
    }

    // === Hierarchy view ===

    /// The current forest snapshot, for hosts rendering their own tree view.
    pub fn forest(&self) -> Rc<Vec<HierarchyItem>> {
        self.sync.forest()
    }

    /// Flattened pre-order rows of the current forest.
    pub fn hierarchy_rows(&self) -> Vec<HierarchyRow> {
        let forest = self.sync.forest();
        let selection = self.selection.borrow();
        let mut rows = Vec::new();
        flatten_rows(&forest, 0, selection.identity(), &mut rows);
        rows
    }

    /// Sync the flattened hierarchy into a Slint `VecModel`.
    pub fn sync_hierarchy_to_model(&self, model: &VecModel<HierarchyRow>) {
        let rows = self.hierarchy_rows();
        // Clear and repopulate to ensure exact match
        while model.row_count() > 0 {
            model.remove(0);
        }
        for row in rows {
            model.push(row);
        }
    }
}

fn flatten_rows(
    items: &[HierarchyItem],
    depth: i32,
    selected: Option<&str>,
    out: &mut Vec<HierarchyRow>,
) {
    for item in items {
        out.push(HierarchyRow {
            identity: SharedString::from(item.identity.as_str()),
            tag: SharedString::from(item.node_info.tag_name.as_str()),
            component: SharedString::from(item.node_info.component.as_deref().unwrap_or("")),
            depth,
            selected: selected == Some(item.identity.as_str()),
        });
        flatten_rows(&item.children, depth + 1, selected, out);
    }
}
