//! Explicit hit-testing over the solved layout.
//!
//! The cursor is resolved against the socket-position map first, then node
//! rectangles, then the background, so interaction code never probes a
//! render tree to recover what is under the pointer.

use crate::model::{SocketRef, Vec2};
use crate::GraphView;

/// World-space pick radius around a socket anchor; scales with zoom like the
/// sockets themselves.
pub const SOCKET_HIT_RADIUS: f32 = 12.0;

#[derive(Clone, Debug, PartialEq)]
pub enum Hit {
    Socket { socket: SocketRef, dist: f32 },
    Node { id: String },
    Background,
}

pub fn hit_test_impl(g: &GraphView, p: Vec2) -> Hit {
    // Sockets first
    let mut best: Option<(SocketRef, f32)> = None;
    {
        let layout = g.layout();
        let r2 = SOCKET_HIT_RADIUS * SOCKET_HIT_RADIUS;
        for (socket, placed) in layout.iter() {
            let d2 = p.dist_sq(placed.point);
            if d2 <= r2 && best.as_ref().map_or(true, |(_, bd)| d2 < *bd) {
                best = Some((socket.clone(), d2));
            }
        }
    }
    if let Some((socket, d2)) = best {
        return Hit::Socket { socket, dist: d2.sqrt() };
    }

    // Node bodies, topmost (last in data order) first
    for node in g.nodes().iter().rev() {
        if let Some(pos) = g.node_pos(&node.id) {
            let w = g.params().node_w;
            let h = g.params().node_h;
            if p.x >= pos.x && p.x <= pos.x + w && p.y >= pos.y && p.y <= pos.y + h {
                return Hit::Node { id: node.id.clone() };
            }
        }
    }

    Hit::Background
}
