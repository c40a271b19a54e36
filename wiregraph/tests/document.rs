//! JSON projection boundary tests.

use wiregraph::{GraphView, SocketKind, SocketRef};

#[test]
fn ingests_projection_and_drops_dangling_links() {
    let mut g = GraphView::new();
    g.set_data_json(
        r#"{
            "nodes": [
                {"id": "a", "title": "Opening", "kind": "prose",
                 "x": 0.0, "y": 0.0, "outputs": ["out1"]},
                {"id": "b", "title": "Scene", "kind": "prose",
                 "x": 400.0, "y": 0.0, "inputs": ["in1"]}
            ],
            "links": [
                {"id": "l1", "source": "a", "target": "b",
                 "source_label": "out1", "target_label": "in1"},
                {"id": "l2", "source": "a", "target": "missing",
                 "source_label": "out1", "target_label": "in1"}
            ]
        }"#,
    )
    .expect("projection parses");

    assert_eq!(g.nodes().len(), 2);
    assert_eq!(g.valid_links().len(), 1);
    assert_eq!(g.link_paths().len(), 1);
}

#[test]
fn rejects_malformed_json() {
    let mut g = GraphView::new();
    assert!(g.set_data_json("{nodes: oops").is_err());
}

#[test]
fn layout_json_lists_every_socket() {
    let mut g = GraphView::new();
    g.set_data_json(
        r#"{
            "nodes": [
                {"id": "a", "title": "A", "kind": "code",
                 "x": 0.0, "y": 0.0, "inputs": ["x", "y"], "outputs": ["result"]}
            ],
            "links": []
        }"#,
    )
    .unwrap();

    let entries: serde_json::Value = serde_json::from_str(&g.layout_json()).unwrap();
    assert_eq!(entries.as_array().unwrap().len(), 3);

    // Defaults hold with no links to pull sockets elsewhere.
    let layout = g.layout();
    let placed = layout.get(&SocketRef::new("a", SocketKind::Output, "result")).unwrap();
    assert_eq!(placed.side, wiregraph::Side::Right);
}
