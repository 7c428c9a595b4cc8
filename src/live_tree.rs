//! The observed element tree and its mutation subscription.
//!
//! The host application owns the rendered output; this module models it as a
//! tree of [`Element`]s under a [`LiveTree`] container that the inspector
//! watches. Structural changes go through the [`LiveTree`] API so they can be
//! recorded, and are delivered to subscribers as a single batched
//! [`MutationBatch`] per [`flush`](LiveTree::flush) — one event-loop turn may
//! collapse any number of mutations into one notification.
//!
//! # Example
//!
//! ```ignore
//! use slint_live_inspector::{Element, LiveNode, LiveTree};
//!
//! let tree = LiveTree::new();
//! let button = Element::identified("Button", "src/app.slint", "button-1");
//! tree.insert_child(&tree.root(), LiveNode::Element(button));
//!
//! let sub = tree.subscribe(|batch| {
//!     println!("{} structural changes", batch.records.len());
//! });
//!
//! tree.flush(); // delivers one batch
//! drop(sub);    // tears down observation
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Shared handle to an element in the live tree.
pub type ElementRef = Rc<RefCell<Element>>;

/// A node in the rendered output: an element, or non-element content.
///
/// Non-element nodes never become hierarchy items; the synchronizer skips
/// them entirely.
#[derive(Clone)]
pub enum LiveNode {
    Element(ElementRef),
    Text(String),
}

/// An element in the rendered output.
///
/// An element carrying both identity markers is an *identified* element and
/// maps to a node registry entry. An element with either marker missing is
/// transparent scaffolding: it produces no hierarchy item of its own, but its
/// children are still walked.
pub struct Element {
    pub tag: String,
    module_marker: Option<String>,
    node_marker: Option<String>,
    children: Vec<LiveNode>,
}

impl Element {
    /// Create an unidentified (transparent) element.
    pub fn new(tag: impl Into<String>) -> ElementRef {
        Rc::new(RefCell::new(Element {
            tag: tag.into(),
            module_marker: None,
            node_marker: None,
            children: Vec::new(),
        }))
    }

    /// Create an element carrying both identity markers.
    pub fn identified(
        tag: impl Into<String>,
        module_id: impl Into<String>,
        node_id: impl Into<String>,
    ) -> ElementRef {
        Rc::new(RefCell::new(Element {
            tag: tag.into(),
            module_marker: Some(module_id.into()),
            node_marker: Some(node_id.into()),
            children: Vec::new(),
        }))
    }

    /// Create an element carrying only one of the two markers.
    ///
    /// A single marker does not identify an element; the synchronizer treats
    /// it as transparent, same as no marker at all.
    pub fn with_markers(
        tag: impl Into<String>,
        module_id: Option<String>,
        node_id: Option<String>,
    ) -> ElementRef {
        Rc::new(RefCell::new(Element {
            tag: tag.into(),
            module_marker: module_id,
            node_marker: node_id,
            children: Vec::new(),
        }))
    }

    /// The `(module_id, node_id)` marker pair, if the element is identified.
    pub fn markers(&self) -> Option<(&str, &str)> {
        match (&self.module_marker, &self.node_marker) {
            (Some(module), Some(node)) => Some((module.as_str(), node.as_str())),
            _ => None,
        }
    }

    /// Copy of the current child list.
    ///
    /// Walkers take this copy before recursing; the underlying list is
    /// externally owned and can mutate between turns.
    pub fn children_snapshot(&self) -> Vec<LiveNode> {
        self.children.clone()
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// The kind of a recorded structural change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationKind {
    Inserted,
    Removed,
}

/// One recorded structural change.
#[derive(Clone, Debug)]
pub struct MutationRecord {
    pub kind: MutationKind,
}

/// A batch of structural changes delivered in one notification.
pub struct MutationBatch {
    pub records: Vec<MutationRecord>,
}

type WatcherCallback = Rc<dyn Fn(&MutationBatch)>;

#[derive(Default)]
struct WatcherTable {
    next_id: u64,
    watchers: Vec<(u64, WatcherCallback)>,
}

/// The designated root container the inspector observes.
///
/// All structural mutations go through this handle so they can be recorded
/// and batched. Cloning shares the same container and watcher table.
#[derive(Clone)]
pub struct LiveTree {
    root: ElementRef,
    watchers: Rc<RefCell<WatcherTable>>,
    pending: Rc<RefCell<Vec<MutationRecord>>>,
}

impl Default for LiveTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveTree {
    /// Create an empty container.
    pub fn new() -> Self {
        Self {
            root: Element::new("container"),
            watchers: Rc::new(RefCell::new(WatcherTable::default())),
            pending: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// The root container element.
    pub fn root(&self) -> ElementRef {
        self.root.clone()
    }

    /// Append a child to `parent` and record the insertion.
    pub fn insert_child(&self, parent: &ElementRef, node: LiveNode) {
        parent.borrow_mut().children.push(node);
        self.record(MutationKind::Inserted);
    }

    /// Insert a child at `index` and record the insertion.
    pub fn insert_child_at(&self, parent: &ElementRef, index: usize, node: LiveNode) {
        parent.borrow_mut().children.insert(index, node);
        self.record(MutationKind::Inserted);
    }

    /// Remove the child at `index`, recording the removal.
    ///
    /// Returns the removed node, or `None` if the index is out of range.
    pub fn remove_child(&self, parent: &ElementRef, index: usize) -> Option<LiveNode> {
        let mut element = parent.borrow_mut();
        if index >= element.children.len() {
            return None;
        }
        let removed = element.children.remove(index);
        drop(element);
        self.record(MutationKind::Removed);
        Some(removed)
    }

    /// Remove all children of `parent`, recording one removal per child.
    pub fn clear_children(&self, parent: &ElementRef) {
        let count = {
            let mut element = parent.borrow_mut();
            let count = element.children.len();
            element.children.clear();
            count
        };
        for _ in 0..count {
            self.record(MutationKind::Removed);
        }
    }

    fn record(&self, kind: MutationKind) {
        self.pending.borrow_mut().push(MutationRecord { kind });
    }

    /// Deliver all pending mutations to every subscriber as one batch.
    ///
    /// The host calls this once per event-loop turn. With no pending
    /// mutations nothing is delivered; redundant flushes are harmless.
    pub fn flush(&self) {
        let records: Vec<MutationRecord> = self.pending.borrow_mut().drain(..).collect();
        if records.is_empty() {
            return;
        }
        let batch = MutationBatch { records };
        // Snapshot the watcher list: a callback may drop its own subscription.
        let callbacks: Vec<WatcherCallback> = self
            .watchers
            .borrow()
            .watchers
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for callback in callbacks {
            callback(&batch);
        }
    }

    /// Subscribe to batched mutation notifications.
    ///
    /// The returned guard unregisters the watcher when dropped; holding it is
    /// what keeps the observation alive.
    #[must_use = "dropping the subscription immediately tears down observation"]
    pub fn subscribe(&self, callback: impl Fn(&MutationBatch) + 'static) -> MutationSubscription {
        let mut table = self.watchers.borrow_mut();
        let id = table.next_id;
        table.next_id += 1;
        table.watchers.push((id, Rc::new(callback)));
        MutationSubscription {
            id,
            table: Rc::downgrade(&self.watchers),
        }
    }

    /// Number of active watchers. Useful for asserting teardown.
    pub fn watcher_count(&self) -> usize {
        self.watchers.borrow().watchers.len()
    }
}

/// RAII guard for a mutation subscription.
pub struct MutationSubscription {
    id: u64,
    table: Weak<RefCell<WatcherTable>>,
}

impl Drop for MutationSubscription {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            table.borrow_mut().watchers.retain(|(id, _)| *id != self.id);
        }
    }
}
