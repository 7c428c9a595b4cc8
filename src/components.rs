//! Per-component property-editing contracts.
//!
//! Components declare which of their properties are editable and which editor
//! widget handles each one. Registration is keyed by the component's stable
//! name rather than by reference identity, so lookups survive module reloads.
//!
//! # Example
//!
//! ```ignore
//! use slint_live_inspector::{ComponentInfo, ComponentRegistry, PropertyInfo};
//!
//! let mut registry = ComponentRegistry::new();
//! registry.register(
//!     "Button",
//!     ComponentInfo::new()
//!         .with_property("color", PropertyInfo::with_editor(color_picker))
//!         .with_property("elevation", PropertyInfo::display_only()),
//! );
//!
//! // Unregistered components fall back to an empty entry, never an error.
//! let info = registry.lookup("Unknown");
//! assert!(info.properties.is_empty());
//! ```

use crate::value::PropertyValue;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::rc::Rc;

/// Contract implemented by external property-editor widgets.
///
/// `render` receives the current static attribute value (`None` when the
/// attribute is absent or dynamic) and an `on_change` callback wired to the
/// patch emitter. How the editor draws itself is its own business.
pub trait PropertyEditor {
    fn render(&self, value: Option<&PropertyValue>, on_change: &dyn Fn(PropertyValue));
}

/// Blanket impl so plain closures can serve as editors in simple hosts.
impl<F> PropertyEditor for F
where
    F: Fn(Option<&PropertyValue>, &dyn Fn(PropertyValue)),
{
    fn render(&self, value: Option<&PropertyValue>, on_change: &dyn Fn(PropertyValue)) {
        self(value, on_change)
    }
}

/// The editing contract for one declared property.
#[derive(Clone)]
pub struct PropertyInfo {
    /// The editor widget, or `None` for a property that is surfaced but not
    /// editable. A missing editor is a normal display state, not a fault.
    pub editor: Option<Rc<dyn PropertyEditor>>,
}

impl PropertyInfo {
    /// A property with an attached editor.
    pub fn with_editor(editor: impl PropertyEditor + 'static) -> Self {
        Self {
            editor: Some(Rc::new(editor)),
        }
    }

    /// A property surfaced without an editor ("no editor available").
    pub fn display_only() -> Self {
        Self { editor: None }
    }
}

/// The declared editable-property set of one component.
///
/// Keys iterate in a stable order so the property panel renders
/// deterministically.
#[derive(Clone, Default)]
pub struct ComponentInfo {
    pub properties: BTreeMap<String, PropertyInfo>,
}

impl ComponentInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, key: impl Into<String>, info: PropertyInfo) -> Self {
        self.properties.insert(key.into(), info);
        self
    }
}

/// Capability interface for component descriptions.
///
/// Implementing this on a component description type replaces identity-based
/// table population: the description itself says what is editable.
pub trait EditableProperties {
    fn component_info(&self) -> ComponentInfo;
}

/// Process-wide table mapping a component name to its editing contract.
///
/// Write-rarely, read-often; no synchronization beyond the host's
/// single-threaded event model. There is no removal operation.
pub struct ComponentRegistry {
    entries: HashMap<String, Rc<ComponentInfo>>,
    empty: Rc<ComponentInfo>,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            empty: Rc::new(ComponentInfo::default()),
        }
    }

    /// Store (or overwrite) the entry for a component name.
    pub fn register(&mut self, name: impl Into<String>, info: ComponentInfo) {
        self.entries.insert(name.into(), Rc::new(info));
    }

    /// Register through the [`EditableProperties`] capability.
    pub fn register_component(&mut self, name: impl Into<String>, component: &dyn EditableProperties) {
        self.register(name, component.component_info());
    }

    /// The stored entry, or the shared empty entry if unregistered.
    ///
    /// Never fails: an unknown component simply has nothing editable.
    pub fn lookup(&self, name: &str) -> Rc<ComponentInfo> {
        self.entries
            .get(name)
            .cloned()
            .unwrap_or_else(|| self.empty.clone())
    }

    /// The shared empty entry, for nodes with no declared component.
    pub fn empty_info(&self) -> Rc<ComponentInfo> {
        self.empty.clone()
    }
}
