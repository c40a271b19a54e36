use wasm_bindgen::prelude::*;

use wiregraph::{Hit, SocketKind};

use crate::error;
use crate::interop::{arr_f32, new_obj, set_kv};
use crate::GraphView;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn parse_kind(kind: &str) -> Option<SocketKind> {
    match kind {
        "input" => Some(SocketKind::Input),
        "output" => Some(SocketKind::Output),
        _ => None,
    }
}

#[wasm_bindgen]
impl GraphView {
    #[wasm_bindgen(constructor)]
    pub fn new() -> GraphView {
        crate::GraphView::rs_new()
    }

    pub fn data_version(&self) -> u64 {
        self.rs_data_version()
    }

    /// Replace the document projection from a `{nodes, links}` JSON string.
    pub fn set_data(&mut self, json: &str) -> JsValue {
        match self.inner.set_data_json(json) {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::bad_document(e.to_string()),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.inner.resize(width, height);
    }

    // Pointer interaction

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.inner.pointer_down(x, y);
    }
    pub fn pointer_down_res(&mut self, x: f32, y: f32) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        self.inner.pointer_down(x, y);
        error::ok(JsValue::TRUE)
    }
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.inner.pointer_move(x, y);
    }
    pub fn pointer_up(&mut self, x: f32, y: f32) {
        self.inner.pointer_up(x, y);
    }
    pub fn escape(&mut self) {
        self.inner.escape();
    }
    pub fn wheel(&mut self, delta_y: f32, x: f32, y: f32) {
        self.inner.wheel(delta_y, x, y);
    }
    pub fn wheel_res(&mut self, delta_y: f32, x: f32, y: f32) -> JsValue {
        if !delta_y.is_finite() {
            return error::non_finite("delta_y");
        }
        self.inner.wheel(delta_y, x, y);
        error::ok(JsValue::from_f64(self.inner.transform().k as f64))
    }

    /// Queued callback events since the last drain, oldest first.
    pub fn drain_events(&mut self) -> JsValue {
        let events = self.inner.drain_events();
        serde_wasm_bindgen::to_value(&events).unwrap_or(JsValue::NULL)
    }

    // View transform

    pub fn transform(&self) -> JsValue {
        let t = self.inner.transform();
        let o = new_obj();
        set_kv(&o, "x", &JsValue::from_f64(t.x as f64));
        set_kv(&o, "y", &JsValue::from_f64(t.y as f64));
        set_kv(&o, "k", &JsValue::from_f64(t.k as f64));
        o.into()
    }

    // Layout queries

    /// Solved socket placements as a JSON string (side, slot, index, count,
    /// world point per socket).
    pub fn layout_json(&self) -> String {
        self.inner.layout_json()
    }

    /// Flat `[x0, y0, x1, y1, ..]` of all solved socket anchor points.
    pub fn socket_points(&self) -> JsValue {
        let layout = self.inner.layout();
        let mut flat = Vec::with_capacity(layout.len() * 2);
        for (_, placed) in layout.iter() {
            flat.push(placed.point.x);
            flat.push(placed.point.y);
        }
        let o = new_obj();
        set_kv(&o, "count", &JsValue::from_f64((flat.len() / 2) as f64));
        set_kv(&o, "positions", &arr_f32(&flat).into());
        o.into()
    }

    /// Connector paths and arrowheads for every rendered link.
    pub fn link_paths(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.link_paths()).unwrap_or(JsValue::NULL)
    }

    /// The wire following the cursor during a connection drag, or null.
    pub fn drag_wire(&self) -> JsValue {
        match self.inner.drag_wire() {
            Some(geo) => serde_wasm_bindgen::to_value(&geo).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    /// Live position of the node being dragged, or null.
    pub fn dragged_node(&self) -> JsValue {
        match self.inner.dragged_node() {
            Some((id, pos)) => {
                let o = new_obj();
                set_kv(&o, "id", &JsValue::from_str(id));
                set_kv(&o, "x", &JsValue::from_f64(pos.x as f64));
                set_kv(&o, "y", &JsValue::from_f64(pos.y as f64));
                o.into()
            }
            None => JsValue::NULL,
        }
    }

    pub fn hit_test(&self, x: f32, y: f32) -> JsValue {
        let o = new_obj();
        match self.inner.hit_test(wiregraph::Vec2::new(x, y)) {
            Hit::Socket { socket, dist } => {
                set_kv(&o, "type", &JsValue::from_str("socket"));
                set_kv(&o, "node", &JsValue::from_str(&socket.node));
                let kind = match socket.kind {
                    SocketKind::Input => "input",
                    SocketKind::Output => "output",
                };
                set_kv(&o, "kind", &JsValue::from_str(kind));
                set_kv(&o, "label", &JsValue::from_str(&socket.label));
                set_kv(&o, "dist", &JsValue::from_f64(dist as f64));
            }
            Hit::Node { id } => {
                set_kv(&o, "type", &JsValue::from_str("node"));
                set_kv(&o, "id", &JsValue::from_str(&id));
            }
            Hit::Background => {
                set_kv(&o, "type", &JsValue::from_str("background"));
            }
        }
        o.into()
    }

    // Socket editing

    pub fn add_socket(&mut self, node: &str, kind: &str) -> JsValue {
        let Some(kind) = parse_kind(kind) else {
            return error::invalid_socket_kind(kind);
        };
        if self.inner.node(node).is_none() {
            return error::invalid_id("node", node);
        }
        self.inner.add_socket(node, kind);
        error::ok(JsValue::TRUE)
    }

    pub fn begin_socket_edit(&mut self, node: &str, kind: &str, label: &str, is_new: bool) -> JsValue {
        let Some(kind) = parse_kind(kind) else {
            return error::invalid_socket_kind(kind);
        };
        let started = self.inner.begin_socket_edit(node, kind, label, is_new);
        error::ok(JsValue::from_bool(started))
    }

    pub fn set_socket_edit_value(&mut self, value: &str) {
        self.inner.set_socket_edit_value(value);
    }

    pub fn commit_socket_edit(&mut self) {
        self.inner.commit_socket_edit();
    }

    pub fn cancel_socket_edit(&mut self) {
        self.inner.cancel_socket_edit();
    }

    // Inlined relationships

    pub fn update_inlined_value(&mut self, link: &str, value: &str) {
        self.inner.update_inlined_value(link, value);
    }

    pub fn toggle_relationship_inlined(&mut self, link: &str) {
        self.inner.toggle_relationship_inlined(link);
    }

    pub fn eject_inlined(&mut self, link: &str) {
        self.inner.eject_inlined(link);
    }

    // Entry-level passthroughs

    pub fn edit_relationship(&mut self, link: &str) {
        self.inner.edit_relationship(link);
    }

    pub fn delete_entry(&mut self, node: &str) {
        self.inner.delete_entry(node);
    }

    pub fn set_node_content(&mut self, node: &str, content: &str) {
        self.inner.set_node_content(node, content);
    }

    pub fn generate_ideas(&mut self, node: &str) {
        self.inner.generate_ideas(node);
    }

    pub fn recompute_code(&mut self, node: &str) {
        self.inner.recompute_code(node);
    }

    pub fn recompute_nl(&mut self, node: &str) {
        self.inner.recompute_nl(node);
    }
}
