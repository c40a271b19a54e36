//! End-to-end pointer gesture tests: screen coordinates in, events out.
//! The view transform starts at identity, so screen and world coincide
//! unless a test pans or zooms first.

use wiregraph::{
    GraphEvent, GraphView, Link, Node, NodeKind, Rejection, SocketKind, SocketRef, Vec2,
};

fn node(id: &str, x: f32, y: f32, inputs: &[&str], outputs: &[&str]) -> Node {
    Node {
        id: id.into(),
        title: id.into(),
        pov_id: "pov1".into(),
        book_id: "book1".into(),
        kind: NodeKind::Prose,
        content: String::new(),
        x: Some(x),
        y: Some(y),
        inputs: inputs.iter().map(|s| s.to_string()).collect(),
        outputs: outputs.iter().map(|s| s.to_string()).collect(),
        dirty: false,
    }
}

fn link(id: &str, source: &str, source_label: &str, target: &str, target_label: &str) -> Link {
    Link {
        id: id.into(),
        source: source.into(),
        target: target.into(),
        source_label: source_label.into(),
        target_label: target_label.into(),
        is_inlined: false,
    }
}

fn socket_point(g: &GraphView, node: &str, kind: SocketKind, label: &str) -> Vec2 {
    let layout = g.layout();
    layout
        .get(&SocketRef::new(node, kind, label))
        .unwrap_or_else(|| panic!("no layout for {}::{}", node, label))
        .point
}

#[test]
fn drag_beyond_threshold_commits_position_once() {
    let mut g = GraphView::new();
    g.set_data(vec![node("a", 100.0, 100.0, &[], &[])], vec![]);

    g.pointer_down(200.0, 155.0);
    g.pointer_move(240.0, 185.0);
    g.pointer_up(240.0, 185.0);

    let events = g.drain_events();
    assert_eq!(
        events,
        vec![GraphEvent::NodePositionChange { id: "a".into(), x: 140.0, y: 130.0 }]
    );
}

#[test]
fn sub_threshold_release_is_a_click() {
    let mut g = GraphView::new();
    g.set_data(vec![node("a", 100.0, 100.0, &[], &[])], vec![]);

    g.pointer_down(200.0, 155.0);
    g.pointer_move(202.0, 156.0);
    g.pointer_up(202.0, 156.0);

    let events = g.drain_events();
    assert_eq!(events, vec![GraphEvent::SelectEntry { id: "a".into() }]);
}

#[test]
fn click_on_input_leaf_focuses_value_field() {
    let mut g = GraphView::new();
    let mut leaf = node("v", 100.0, 100.0, &[], &["value"]);
    leaf.kind = NodeKind::InputLeaf;
    g.set_data(vec![leaf], vec![]);

    g.pointer_down(200.0, 155.0);
    g.pointer_up(200.0, 155.0);

    assert_eq!(g.drain_events(), vec![GraphEvent::FocusValueInput { id: "v".into() }]);
}

#[test]
fn click_on_output_leaf_is_inert() {
    let mut g = GraphView::new();
    let mut leaf = node("o", 100.0, 100.0, &["value"], &[]);
    leaf.kind = NodeKind::OutputLeaf;
    g.set_data(vec![leaf], vec![]);

    // Body click, away from the fixed socket.
    g.pointer_down(250.0, 155.0);
    g.pointer_up(250.0, 155.0);

    assert_eq!(g.drain_events(), vec![]);
}

#[test]
fn escape_reverts_a_drag_in_progress() {
    let mut g = GraphView::new();
    g.set_data(vec![node("a", 100.0, 100.0, &[], &[])], vec![]);

    g.pointer_down(200.0, 155.0);
    g.pointer_move(300.0, 255.0);
    assert_eq!(g.dragged_node().unwrap().1, Vec2::new(200.0, 200.0));
    g.escape();

    let events = g.drain_events();
    assert_eq!(
        events,
        vec![GraphEvent::NodePositionChange { id: "a".into(), x: 100.0, y: 100.0 }]
    );
    // Gesture is gone; a later release does nothing.
    g.pointer_up(300.0, 255.0);
    assert_eq!(g.drain_events(), vec![]);
}

#[test]
fn socket_to_socket_drag_creates_relationship() {
    let mut g = GraphView::new();
    g.set_data(
        vec![
            node("a", 0.0, 0.0, &[], &["out1"]),
            node("b", 400.0, 0.0, &["in1"], &[]),
        ],
        vec![],
    );

    let from = socket_point(&g, "a", SocketKind::Output, "out1");
    let to = socket_point(&g, "b", SocketKind::Input, "in1");
    g.pointer_down(from.x, from.y);
    g.pointer_move(to.x, to.y);
    g.pointer_up(to.x, to.y);

    assert_eq!(
        g.drain_events(),
        vec![GraphEvent::AddRelationship {
            source: "a".into(),
            source_label: "out1".into(),
            target: "b".into(),
            target_label: "in1".into(),
        }]
    );
}

#[test]
fn drag_from_input_end_still_orients_output_to_input() {
    let mut g = GraphView::new();
    g.set_data(
        vec![
            node("a", 0.0, 0.0, &[], &["out1"]),
            node("b", 400.0, 0.0, &["in1"], &[]),
        ],
        vec![],
    );

    let from = socket_point(&g, "b", SocketKind::Input, "in1");
    let to = socket_point(&g, "a", SocketKind::Output, "out1");
    g.pointer_down(from.x, from.y);
    g.pointer_move(to.x, to.y);
    g.pointer_up(to.x, to.y);

    assert_eq!(
        g.drain_events(),
        vec![GraphEvent::AddRelationship {
            source: "a".into(),
            source_label: "out1".into(),
            target: "b".into(),
            target_label: "in1".into(),
        }]
    );
}

#[test]
fn second_connection_into_occupied_input_is_rejected() {
    let mut g = GraphView::new();
    g.set_data(
        vec![
            node("a", 0.0, 0.0, &[], &["out1"]),
            node("b", 400.0, 0.0, &["in1"], &[]),
            node("c", 0.0, 300.0, &[], &["out"]),
        ],
        vec![link("l1", "a", "out1", "b", "in1")],
    );

    let from = socket_point(&g, "c", SocketKind::Output, "out");
    let to = socket_point(&g, "b", SocketKind::Input, "in1");
    g.pointer_down(from.x, from.y);
    g.pointer_move(to.x, to.y);
    g.pointer_up(to.x, to.y);

    assert_eq!(
        g.drain_events(),
        vec![GraphEvent::Rejected { reason: Rejection::InputOccupied }]
    );
}

#[test]
fn redropping_an_identical_link_toggles_it_inlined() {
    let mut g = GraphView::new();
    g.set_data(
        vec![
            node("a", 0.0, 0.0, &[], &["out1"]),
            node("b", 400.0, 0.0, &["in1"], &[]),
        ],
        vec![link("l1", "a", "out1", "b", "in1")],
    );

    let from = socket_point(&g, "a", SocketKind::Output, "out1");
    let to = socket_point(&g, "b", SocketKind::Input, "in1");
    g.pointer_down(from.x, from.y);
    g.pointer_move(to.x, to.y);
    g.pointer_up(to.x, to.y);

    assert_eq!(
        g.drain_events(),
        vec![GraphEvent::ToggleRelationshipInlined { link: "l1".into() }]
    );
}

#[test]
fn drop_on_node_body_auto_creates_an_input_socket() {
    let mut g = GraphView::new();
    g.set_data(
        vec![
            node("a", 0.0, 0.0, &[], &["out1"]),
            node("b", 400.0, 0.0, &[], &[]),
        ],
        vec![],
    );

    let from = socket_point(&g, "a", SocketKind::Output, "out1");
    g.pointer_down(from.x, from.y);
    g.pointer_move(500.0, 55.0);
    g.pointer_up(500.0, 55.0);

    assert_eq!(
        g.drain_events(),
        vec![GraphEvent::AddSocketAndConnect {
            node: "b".into(),
            kind: SocketKind::Input,
            label: "Input 1".into(),
            source: "a".into(),
            source_label: "out1".into(),
            target: "b".into(),
            target_label: "Input 1".into(),
        }]
    );
}

#[test]
fn auto_socket_names_skip_taken_suffixes() {
    let mut g = GraphView::new();
    g.set_data(
        vec![
            node("a", 0.0, 0.0, &[], &["out1"]),
            node("b", 400.0, 300.0, &["Input 1", "Input 2"], &[]),
        ],
        vec![],
    );

    let from = socket_point(&g, "a", SocketKind::Output, "out1");
    g.pointer_down(from.x, from.y);
    // Body center, well away from b's two left-side sockets.
    g.pointer_move(560.0, 355.0);
    g.pointer_up(560.0, 355.0);

    match g.drain_events().as_slice() {
        [GraphEvent::AddSocketAndConnect { label, target_label, .. }] => {
            assert_eq!(label, "Input 3");
            assert_eq!(target_label, "Input 3");
        }
        other => panic!("unexpected events: {:?}", other),
    }
}

#[test]
fn cross_book_body_drop_is_rejected() {
    let mut g = GraphView::new();
    let mut other = node("b", 400.0, 0.0, &[], &[]);
    other.book_id = "book2".into();
    g.set_data(vec![node("a", 0.0, 0.0, &[], &["out1"]), other], vec![]);

    let from = socket_point(&g, "a", SocketKind::Output, "out1");
    g.pointer_down(from.x, from.y);
    g.pointer_move(500.0, 55.0);
    g.pointer_up(500.0, 55.0);

    assert_eq!(
        g.drain_events(),
        vec![GraphEvent::Rejected { reason: Rejection::CrossBook }]
    );
}

#[test]
fn background_click_reports_world_coordinates() {
    let mut g = GraphView::new();
    g.set_data(vec![node("a", 0.0, 0.0, &[], &[])], vec![]);

    g.pointer_down(700.0, 500.0);
    g.pointer_up(700.0, 500.0);
    assert_eq!(
        g.drain_events(),
        vec![GraphEvent::BackgroundClick { x: 700.0, y: 500.0 }]
    );
}

#[test]
fn pan_drag_moves_view_without_background_click() {
    let mut g = GraphView::new();
    g.set_data(vec![node("a", 0.0, 0.0, &[], &[])], vec![]);

    g.pointer_down(700.0, 500.0);
    g.pointer_move(760.0, 560.0);
    g.pointer_up(760.0, 560.0);

    assert_eq!(g.drain_events(), vec![]);
    assert!((g.transform().x - 60.0).abs() < 1e-4);
    assert!((g.transform().y - 60.0).abs() < 1e-4);
}

#[test]
fn wheel_zoom_keeps_cursor_world_point_fixed() {
    let mut g = GraphView::new();
    g.set_data(vec![node("a", 0.0, 0.0, &[], &[])], vec![]);

    let before = g.transform().screen_to_world(320.0, 240.0);
    g.wheel(-100.0, 320.0, 240.0);
    let after = g.transform().screen_to_world(320.0, 240.0);

    assert!((g.transform().k - 1.6508).abs() < 1e-3);
    assert!((before.x - after.x).abs() < 1e-3);
    assert!((before.y - after.y).abs() < 1e-3);
}

#[test]
fn press_on_occupied_input_does_not_start_a_gesture() {
    let mut g = GraphView::new();
    g.set_data(
        vec![
            node("a", 0.0, 0.0, &[], &["out1"]),
            node("b", 400.0, 0.0, &["in1"], &[]),
        ],
        vec![link("l1", "a", "out1", "b", "in1")],
    );

    let p = socket_point(&g, "b", SocketKind::Input, "in1");
    g.pointer_down(p.x, p.y);
    assert!(g.drag_wire().is_none());
    g.pointer_up(p.x, p.y);
    assert_eq!(g.drain_events(), vec![]);
}

#[test]
fn dangling_links_are_never_rendered() {
    let mut g = GraphView::new();
    g.set_data(
        vec![node("a", 0.0, 0.0, &[], &["out1"])],
        vec![link("l1", "a", "out1", "gone", "in1")],
    );

    assert!(g.valid_links().is_empty());
    assert!(g.link_paths().is_empty());
}
