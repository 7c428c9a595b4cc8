//! Static node metadata, keyed by identity markers.
//!
//! The node registry is populated by the build-time tooling that also injects
//! the identity markers into the rendered markup; the inspector only reads it.
//! The two are expected to stay in sync: an identified element whose markers
//! have no registry entry is a contract violation, not a recoverable state.

use crate::value::PropertyValue;
use std::collections::HashMap;

/// How an attribute's value was declared in source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    /// Declared with a literal value; editable.
    Static,
    /// Computed at runtime; visible in the hierarchy but not editable.
    Dynamic,
}

/// One declared attribute of a node, in declaration order.
#[derive(Clone, Debug)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
    pub value: PropertyValue,
}

impl Attribute {
    /// A statically declared attribute.
    pub fn fixed(name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Static,
            value: value.into(),
        }
    }

    /// A runtime-computed attribute.
    pub fn dynamic(name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Dynamic,
            value: value.into(),
        }
    }
}

/// Static metadata for one identified node.
#[derive(Clone, Debug)]
pub struct NodeInfo {
    /// The tag name as written in source.
    pub tag_name: String,
    /// Stable name of the component this node instantiates, if any.
    pub component: Option<String>,
    /// Declared attributes, in declaration order.
    pub attributes: Vec<Attribute>,
}

impl NodeInfo {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            component: None,
            attributes: Vec::new(),
        }
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Look up a static attribute value by name.
    ///
    /// Dynamic attributes are deliberately invisible here: they are not
    /// editable, and the editor receives an absent value for them rather
    /// than an error.
    pub fn static_attribute(&self, name: &str) -> Option<&PropertyValue> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name && attr.kind == AttributeKind::Static)
            .map(|attr| &attr.value)
    }
}

/// The nodes of one module, keyed by node id.
#[derive(Default)]
pub struct ModuleNodes {
    nodes: HashMap<String, NodeInfo>,
}

impl ModuleNodes {
    pub fn get(&self, node_id: &str) -> Option<&NodeInfo> {
        self.nodes.get(node_id)
    }
}

/// Process-wide mapping from `(module_id, node_id)` to static node metadata.
///
/// Dependency-injected into the synchronizer rather than held as an ambient
/// singleton, so the core stays testable in isolation. Initialized empty,
/// populated through [`register_node`](Self::register_node); no teardown.
#[derive(Default)]
pub struct NodeRegistry {
    modules: HashMap<String, ModuleNodes>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store (or overwrite) the metadata for one node.
    pub fn register_node(
        &mut self,
        module_id: impl Into<String>,
        node_id: impl Into<String>,
        info: NodeInfo,
    ) {
        self.modules
            .entry(module_id.into())
            .or_default()
            .nodes
            .insert(node_id.into(), info);
    }

    /// All nodes of one module, if the module is known.
    pub fn get(&self, module_id: &str) -> Option<&ModuleNodes> {
        self.modules.get(module_id)
    }

    /// Convenience lookup of a single node.
    pub fn node(&self, module_id: &str, node_id: &str) -> Option<&NodeInfo> {
        self.modules
            .get(module_id)
            .and_then(|module| module.nodes.get(node_id))
    }
}
