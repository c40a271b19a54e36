use serde::Serialize;

use crate::geometry::connector::{connection_geometry, ConnectionGeometry};
use crate::interact::Interaction;
use crate::GraphView;

/// Routed connector for one rendered link.
#[derive(Clone, Debug, Serialize)]
pub struct LinkPath {
    pub link: String,
    pub geometry: ConnectionGeometry,
}

pub fn link_paths_impl(g: &GraphView) -> Vec<LinkPath> {
    let layout = g.layout();
    let mut paths = Vec::new();
    for link in g.valid_links() {
        // Inlined relationships collapse into the socket; no wire.
        if link.is_inlined {
            continue;
        }
        let source = match layout.get(&link.output_ref()) {
            Some(s) => s,
            None => continue,
        };
        let target = match layout.get(&link.input_ref()) {
            Some(t) => t,
            None => continue,
        };
        paths.push(LinkPath {
            link: link.id.clone(),
            geometry: connection_geometry(source.point, source.side, target.point, target.side),
        });
    }
    paths
}

pub fn drag_wire_impl(g: &GraphView) -> Option<ConnectionGeometry> {
    match &g.interaction {
        Interaction::Connecting { source_point, source_side, end, .. } => Some(connection_geometry(
            *source_point,
            *source_side,
            *end,
            source_side.opposite(),
        )),
        _ => None,
    }
}
