//! JSON boundary for the document projection and the layout snapshot.
//!
//! The parent application recomputes its `{nodes, links}` projection on
//! every relevant document change and feeds it in here; the solved layout
//! goes back out as plain JSON for whatever renders it.

use serde::{Deserialize, Serialize};

use crate::model::{Link, Node, Side, SocketKind, SocketSlot};
use crate::GraphView;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Document {
    pub fn from_json(json: &str) -> Result<Document, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[derive(Clone, Debug, Serialize)]
struct LayoutEntry<'a> {
    node: &'a str,
    kind: SocketKind,
    label: &'a str,
    side: Side,
    slot: SocketSlot,
    index: usize,
    count: usize,
    x: f32,
    y: f32,
}

impl GraphView {
    /// Ingest a document projection. Links with a missing endpoint are
    /// dropped up front; they must never reach rendering or layout.
    pub fn set_data_json(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let doc = Document::from_json(json)?;
        let nodes = doc.nodes;
        let links = doc
            .links
            .into_iter()
            .filter(|l| {
                let ok = nodes.iter().any(|n| n.id == l.source)
                    && nodes.iter().any(|n| n.id == l.target);
                if !ok {
                    log::debug!("dropping link {} with missing endpoint", l.id);
                }
                ok
            })
            .collect();
        self.set_data(nodes, links);
        Ok(())
    }

    /// Solved socket placements as a JSON array.
    pub fn layout_json(&self) -> String {
        let layout = self.layout();
        let entries: Vec<LayoutEntry<'_>> = layout
            .iter()
            .map(|(socket, placed)| LayoutEntry {
                node: &socket.node,
                kind: socket.kind,
                label: &socket.label,
                side: placed.side,
                slot: placed.slot,
                index: placed.index,
                count: placed.count,
                x: placed.point.x,
                y: placed.point.y,
            })
            .collect();
        serde_json::to_string(&entries).unwrap_or_default()
    }
}
