//! Level 5: End-to-End Inspector Sessions
//!
//! Full sessions across the controller: mount a scene, select through the
//! view callback, edit through a registered editor, and follow the host's
//! rebuild after persistence.

mod common;

use common::harness::InspectorTestHarness;
use slint_live_inspector::{
    node_identity, Attribute, ComponentInfo, HierarchyRow, NodeInfo, PatchOp, PropertyInfo,
    PropertyValue,
};
use slint::{Model, SharedString, VecModel};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_select_edit_persist_session() {
    let harness = InspectorTestHarness::new();
    let root = harness.tree.root();
    harness.mount_node(
        &root,
        "Button",
        "m",
        "btn",
        NodeInfo::new("Button")
            .with_component("Button")
            .with_attribute(Attribute::fixed("color", "red")),
    );
    harness.flush();

    // The editor observes the current value and pushes an edit.
    let seen = Rc::new(RefCell::new(None));
    harness.ctrl.register_component(
        "Button",
        ComponentInfo::new().with_property(
            "color",
            PropertyInfo::with_editor({
                let seen = seen.clone();
                move |value: Option<&PropertyValue>, on_change: &dyn Fn(PropertyValue)| {
                    *seen.borrow_mut() = value.cloned();
                    on_change(PropertyValue::from("blue"));
                }
            }),
        ),
    );

    let select = harness.ctrl.select_callback();
    select(SharedString::from(node_identity("m", "btn")));
    harness.ctrl.render_editors();

    assert_eq!(*seen.borrow(), Some(PropertyValue::from("red")));
    let calls = harness.recorder.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].module_id, "m");
    assert_eq!(calls[0].node_id, "btn");
    assert_eq!(
        calls[0].patches,
        vec![PatchOp::Replace {
            path: vec!["color".into()],
            value: "blue".into()
        }]
    );
}

#[test]
fn test_host_rebuild_after_persistence_updates_the_panel() {
    let harness = InspectorTestHarness::new();
    let root = harness.tree.root();
    harness.mount_node(
        &root,
        "Button",
        "m",
        "btn",
        NodeInfo::new("Button")
            .with_component("Button")
            .with_attribute(Attribute::fixed("color", "red")),
    );
    harness.flush();

    harness.ctrl.register_component(
        "Button",
        ComponentInfo::new().with_property(
            "color",
            PropertyInfo::with_editor(
                |_: Option<&PropertyValue>, on_change: &dyn Fn(PropertyValue)| {
                    on_change(PropertyValue::from("blue"));
                },
            ),
        ),
    );
    harness.ctrl.select(node_identity("m", "btn"));
    harness.ctrl.render_editors();
    assert_eq!(harness.recorder.count(), 1);

    // The host applies the save: it updates the registered metadata and
    // replaces the element, which is what drives the next rebuild.
    harness.register_node(
        "m",
        "btn",
        NodeInfo::new("Button")
            .with_component("Button")
            .with_attribute(Attribute::fixed("color", "blue")),
    );
    let _ = harness.tree.remove_child(&root, 0);
    harness.mount_node(
        &root,
        "Button",
        "m",
        "btn",
        NodeInfo::new("Button")
            .with_component("Button")
            .with_attribute(Attribute::fixed("color", "blue")),
    );
    harness.flush();

    // Same identity, so the selection carries over to the new snapshot.
    let rows = harness.ctrl.property_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].value, Some(PropertyValue::from("blue")));
}

#[test]
fn test_hierarchy_model_follows_a_session() {
    let harness = InspectorTestHarness::new();
    let root = harness.tree.root();
    let panel = harness.mount_node(
        &root,
        "Panel",
        "m",
        "panel",
        NodeInfo::new("Panel").with_component("Panel"),
    );
    harness.mount_node(&panel, "Button", "m", "btn", NodeInfo::new("Button"));
    harness.flush();

    let model: Rc<VecModel<HierarchyRow>> = Rc::new(VecModel::default());
    harness.ctrl.sync_hierarchy_to_model(&model);
    assert_eq!(model.row_count(), 2);
    assert_eq!(model.row_data(0).unwrap().depth, 0);
    assert_eq!(model.row_data(1).unwrap().depth, 1);

    let select = harness.ctrl.select_callback();
    select(model.row_data(1).unwrap().identity.clone());
    harness.ctrl.sync_hierarchy_to_model(&model);
    assert!(model.row_data(1).unwrap().selected);
    assert_eq!(harness.ctrl.selected_item().unwrap().node_id, "btn");

    harness.tree.clear_children(&panel);
    harness.flush();
    harness.ctrl.sync_hierarchy_to_model(&model);
    assert_eq!(model.row_count(), 1);
    assert!(harness.ctrl.selected_item().is_none());
}

#[test]
fn test_editing_one_of_several_nodes_targets_the_right_one() {
    let harness = InspectorTestHarness::new();
    let root = harness.tree.root();
    for id in ["first", "second", "third"] {
        harness.mount_node(
            &root,
            "Button",
            "m",
            id,
            NodeInfo::new("Button")
                .with_component("Button")
                .with_attribute(Attribute::fixed("color", "red")),
        );
    }
    harness.flush();

    harness.ctrl.register_component(
        "Button",
        ComponentInfo::new().with_property(
            "color",
            PropertyInfo::with_editor(
                |_: Option<&PropertyValue>, on_change: &dyn Fn(PropertyValue)| {
                    on_change(PropertyValue::from("green"));
                },
            ),
        ),
    );
    harness.ctrl.select(node_identity("m", "second"));
    harness.ctrl.render_editors();

    let calls = harness.recorder.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].node_id, "second");
}

#[test]
fn test_unmarked_component_selects_but_offers_no_editors() {
    let harness = InspectorTestHarness::new();
    let root = harness.tree.root();
    // Registered node metadata, but no component association.
    harness.mount_node(&root, "Rectangle", "m", "box", NodeInfo::new("Rectangle"));
    harness.flush();

    harness.ctrl.select(node_identity("m", "box"));
    assert!(harness.ctrl.selected_item().is_some());
    assert!(harness.ctrl.property_rows().is_empty());

    harness.ctrl.render_editors();
    assert_eq!(harness.recorder.count(), 0);
}
