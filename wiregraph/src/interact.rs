//! Pointer interaction state machine.
//!
//! A single gesture is active at a time: panning the view, dragging a node,
//! or dragging a new connection. The state lives outside the render cycle;
//! pointer moves mutate it in place and nothing is committed until
//! pointer-up, when the outcome is queued as a [`GraphEvent`]. The shell
//! forwards raw pointer coordinates (screen space) and is expected to swallow
//! pointer-downs on its own controls (delete buttons, text inputs) rather
//! than forwarding them here.

use crate::events::{GraphEvent, Rejection};
use crate::layout::hit::Hit;
use crate::model::{NodeKind, Side, SocketKind, SocketRef, Vec2};
use crate::GraphView;

/// A gesture only counts as a drag once total pointer travel exceeds this
/// many screen pixels; anything shorter is reinterpreted as a click.
pub const DRAG_THRESHOLD_PX: f32 = 5.0;

#[derive(Clone, Debug, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Panning {
        start: (f32, f32),
        origin: (f32, f32),
        has_dragged: bool,
    },
    DraggingNode {
        id: String,
        /// Position at grab time, restored on Escape.
        origin: Vec2,
        /// World offset from cursor to the node's top-left corner.
        grab: Vec2,
        current: Vec2,
        start: (f32, f32),
        has_dragged: bool,
    },
    Connecting {
        source: SocketRef,
        source_side: Side,
        source_point: Vec2,
        end: Vec2,
        start: (f32, f32),
        has_dragged: bool,
    },
}

impl GraphView {
    pub fn pointer_down(&mut self, sx: f32, sy: f32) {
        if !matches!(self.interaction, Interaction::Idle) {
            return;
        }
        let world = self.transform.screen_to_world(sx, sy);
        match self.hit_test(world) {
            Hit::Socket { socket, .. } => {
                // An occupied input can only be re-grabbed from an
                // output-leaf node's raw socket; elsewhere the press is
                // swallowed.
                if socket.kind == SocketKind::Input
                    && self.input_occupied(&socket.node, &socket.label).is_some()
                    && self.node(&socket.node).map(|n| n.kind) != Some(NodeKind::OutputLeaf)
                {
                    log::debug!("press on occupied input {}::{} ignored", socket.node, socket.label);
                    return;
                }
                let (side, point) = {
                    let layout = self.layout();
                    match layout.get(&socket) {
                        Some(placed) => (placed.side, placed.point),
                        None => return,
                    }
                };
                self.interaction = Interaction::Connecting {
                    source: socket,
                    source_side: side,
                    source_point: point,
                    end: world,
                    start: (sx, sy),
                    has_dragged: false,
                };
            }
            Hit::Node { id } => {
                let Some(pos) = self.node_pos(&id) else { return };
                self.interaction = Interaction::DraggingNode {
                    id,
                    origin: pos,
                    grab: Vec2::new(world.x - pos.x, world.y - pos.y),
                    current: pos,
                    start: (sx, sy),
                    has_dragged: false,
                };
            }
            Hit::Background => {
                self.interaction = Interaction::Panning {
                    start: (sx, sy),
                    origin: (self.transform.x, self.transform.y),
                    has_dragged: false,
                };
            }
        }
    }

    pub fn pointer_move(&mut self, sx: f32, sy: f32) {
        let world = self.transform.screen_to_world(sx, sy);
        let mut pan_to: Option<(f32, f32)> = None;
        match &mut self.interaction {
            Interaction::Idle => {}
            Interaction::Panning { start, origin, has_dragged } => {
                *has_dragged = *has_dragged || past_threshold(*start, sx, sy);
                pan_to = Some((origin.0 + (sx - start.0), origin.1 + (sy - start.1)));
            }
            Interaction::DraggingNode { grab, current, start, has_dragged, .. } => {
                *has_dragged = *has_dragged || past_threshold(*start, sx, sy);
                *current = Vec2::new(world.x - grab.x, world.y - grab.y);
            }
            Interaction::Connecting { end, start, has_dragged, .. } => {
                *has_dragged = *has_dragged || past_threshold(*start, sx, sy);
                *end = world;
            }
        }
        if let Some((x, y)) = pan_to {
            self.transform.x = x;
            self.transform.y = y;
        }
    }

    pub fn pointer_up(&mut self, sx: f32, sy: f32) {
        let world = self.transform.screen_to_world(sx, sy);
        match std::mem::take(&mut self.interaction) {
            Interaction::Idle => {}
            Interaction::Panning { has_dragged, .. } => {
                if !has_dragged {
                    self.push(GraphEvent::background_click(world));
                }
            }
            Interaction::DraggingNode { id, current, has_dragged, .. } => {
                if has_dragged {
                    self.commit_node_position(&id, current);
                } else {
                    match self.node(&id).map(|n| n.kind) {
                        Some(NodeKind::InputLeaf) => self.push(GraphEvent::FocusValueInput { id }),
                        // Raw-output displays are not interactive.
                        Some(NodeKind::OutputLeaf) => {}
                        Some(_) => self.push(GraphEvent::SelectEntry { id }),
                        None => {}
                    }
                }
            }
            Interaction::Connecting { source, .. } => {
                self.finish_connection(source, world);
            }
        }
    }

    /// Abort the current gesture. A dragged node snaps back to where it was
    /// grabbed.
    pub fn escape(&mut self) {
        if let Interaction::DraggingNode { id, origin, .. } = std::mem::take(&mut self.interaction) {
            self.commit_node_position(&id, origin);
        }
    }

    pub fn wheel(&mut self, delta_y: f32, sx: f32, sy: f32) {
        self.transform.zoom_about(delta_y, sx, sy);
    }

    fn finish_connection(&mut self, source: SocketRef, drop: Vec2) {
        match self.hit_test(drop) {
            Hit::Socket { socket, .. } => {
                // Direction must be complementary: output to input.
                if socket.kind != source.kind.opposite() {
                    return;
                }
                let (out_ref, in_ref) = orient(&source, &socket);
                self.connect(out_ref, in_ref);
            }
            Hit::Node { id } => {
                if id == source.node {
                    return;
                }
                self.connect_to_body(source, &id);
            }
            Hit::Background => {}
        }
    }

    /// Drop on a socket: toggle an identical link inlined rather than
    /// duplicating it, otherwise create the relationship if the input end is
    /// free.
    fn connect(&mut self, out_ref: SocketRef, in_ref: SocketRef) {
        let existing = self.valid_links().into_iter().find(|l| {
            l.source == out_ref.node
                && l.source_label == out_ref.label
                && l.target == in_ref.node
                && l.target_label == in_ref.label
        });
        if let Some(link) = existing {
            if !link.is_inlined {
                let id = link.id.clone();
                self.push(GraphEvent::ToggleRelationshipInlined { link: id });
            }
            return;
        }
        if self.input_occupied(&in_ref.node, &in_ref.label).is_some() {
            self.reject(Rejection::InputOccupied);
            return;
        }
        self.push(GraphEvent::AddRelationship {
            source: out_ref.node,
            source_label: out_ref.label,
            target: in_ref.node,
            target_label: in_ref.label,
        });
    }

    /// Drop on a node's free body: auto-create a socket of the opposite type
    /// on the target and connect to it.
    fn connect_to_body(&mut self, source: SocketRef, target_id: &str) {
        let (source_book, target_book, target_fixed) =
            match (self.node(&source.node), self.node(target_id)) {
                (Some(s), Some(t)) => (s.book_id.clone(), t.book_id.clone(), t.kind.has_fixed_sockets()),
                _ => return,
            };
        if target_book != source_book {
            self.reject(Rejection::CrossBook);
            return;
        }
        if target_fixed {
            self.reject(Rejection::FixedSocket);
            return;
        }
        let new_kind = source.kind.opposite();
        let label = self.next_socket_name(target_id, new_kind);
        let new_ref = SocketRef::new(target_id, new_kind, label.clone());
        let (out_ref, in_ref) = orient(&source, &new_ref);
        if self.input_occupied(&in_ref.node, &in_ref.label).is_some() {
            self.reject(Rejection::InputOccupied);
            return;
        }
        self.push(GraphEvent::AddSocketAndConnect {
            node: target_id.to_string(),
            kind: new_kind,
            label,
            source: out_ref.node,
            source_label: out_ref.label,
            target: in_ref.node,
            target_label: in_ref.label,
        });
    }
}

fn past_threshold(start: (f32, f32), sx: f32, sy: f32) -> bool {
    let dx = sx - start.0;
    let dy = sy - start.1;
    (dx * dx + dy * dy).sqrt() > DRAG_THRESHOLD_PX
}

/// Order a complementary socket pair as (output, input) regardless of which
/// end the drag started from.
fn orient(a: &SocketRef, b: &SocketRef) -> (SocketRef, SocketRef) {
    if a.kind == SocketKind::Output {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}
