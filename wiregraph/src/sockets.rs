//! Socket bookkeeping: auto-naming, inline label editing, and the inlined
//! leaf-value affordances.

use crate::events::{GraphEvent, Rejection};
use crate::model::{NodeKind, SocketKind, SocketRef, Vec2};
use crate::GraphView;

/// Inlined values longer than this render as a node-like card instead of the
/// compact in-socket form.
pub const INLINE_CARD_THRESHOLD: usize = 30;

/// World-units offset, beside the reference node, where an ejected leaf
/// lands.
pub const EJECT_OFFSET: f32 = 240.0;

/// How an inlined relationship renders at its socket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InlineDisplay {
    Compact,
    Card,
}

/// A socket rename in progress. Entered on mouse-down on the socket label,
/// committed on blur/Enter, cancelled on Escape.
#[derive(Clone, Debug)]
pub struct InlineEdit {
    pub socket: SocketRef,
    pub value: String,
    /// Freshly auto-created sockets are deleted again if the rename is
    /// cancelled.
    pub is_new: bool,
}

impl GraphView {
    /// First unused `Input N` / `Output N` name on a node.
    pub fn next_socket_name(&self, node_id: &str, kind: SocketKind) -> String {
        let prefix = match kind {
            SocketKind::Input => "Input",
            SocketKind::Output => "Output",
        };
        let node = self.node(node_id);
        let mut n = 1usize;
        loop {
            let candidate = format!("{} {}", prefix, n);
            match node {
                Some(node) if node.has_socket(kind, &candidate) => n += 1,
                _ => return candidate,
            }
        }
    }

    /// Request a new auto-named socket on a node.
    pub fn add_socket(&mut self, node_id: &str, kind: SocketKind) {
        let Some(node) = self.node(node_id) else { return };
        if node.kind.has_fixed_sockets() {
            self.reject(Rejection::FixedSocket);
            return;
        }
        let label = self.next_socket_name(node_id, kind);
        self.push(GraphEvent::AddSocket {
            node: node_id.to_string(),
            kind,
            label,
        });
    }

    /// Begin inline-renaming a socket. Returns false if there is nothing to
    /// edit; fixed leaf sockets are rejected with an alertable event.
    pub fn begin_socket_edit(&mut self, node_id: &str, kind: SocketKind, label: &str, is_new: bool) -> bool {
        let Some(node) = self.node(node_id) else { return false };
        if !node.has_socket(kind, label) {
            return false;
        }
        if node.kind.has_fixed_sockets() {
            self.reject(Rejection::FixedSocket);
            return false;
        }
        self.editing = Some(InlineEdit {
            socket: SocketRef::new(node_id, kind, label),
            value: label.to_string(),
            is_new,
        });
        true
    }

    pub fn socket_edit(&self) -> Option<&InlineEdit> {
        self.editing.as_ref()
    }

    pub fn set_socket_edit_value(&mut self, value: &str) {
        if let Some(edit) = self.editing.as_mut() {
            edit.value = value.to_string();
        }
    }

    /// Commit the rename (blur/Enter). A duplicate name on the same node
    /// keeps the edit session open; an empty name behaves like cancel.
    pub fn commit_socket_edit(&mut self) {
        let Some(edit) = self.editing.clone() else { return };
        let value = edit.value.trim().to_string();
        if value.is_empty() {
            self.cancel_socket_edit();
            return;
        }
        if value == edit.socket.label {
            self.editing = None;
            return;
        }
        let duplicate = self
            .node(&edit.socket.node)
            .map(|n| n.has_socket(edit.socket.kind, &value))
            .unwrap_or(false);
        if duplicate {
            self.reject(Rejection::DuplicateSocketName);
            return;
        }
        self.editing = None;
        self.push(GraphEvent::UpdateSocketLabel {
            node: edit.socket.node,
            kind: edit.socket.kind,
            old_label: edit.socket.label,
            new_label: value,
        });
    }

    /// Cancel the rename (Escape). A placeholder socket that was created for
    /// this edit is removed again.
    pub fn cancel_socket_edit(&mut self) {
        if let Some(edit) = self.editing.take() {
            if edit.is_new {
                self.push(GraphEvent::RemoveSocket {
                    node: edit.socket.node,
                    kind: edit.socket.kind,
                    label: edit.socket.label,
                });
            }
        }
    }

    /// The leaf node collapsed into a socket by an inlined relationship.
    pub fn inlined_peer(&self, link_id: &str) -> Option<&crate::model::Node> {
        let link = self.link(link_id)?;
        if !link.is_inlined {
            return None;
        }
        let source = self.node(&link.source)?;
        if source.kind == NodeKind::InputLeaf {
            return Some(source);
        }
        let target = self.node(&link.target)?;
        if target.kind == NodeKind::OutputLeaf {
            return Some(target);
        }
        None
    }

    /// Compact in-socket form for short values, card form above the
    /// threshold.
    pub fn inline_display(&self, link_id: &str) -> Option<InlineDisplay> {
        let peer = self.inlined_peer(link_id)?;
        if peer.content.chars().count() > INLINE_CARD_THRESHOLD {
            Some(InlineDisplay::Card)
        } else {
            Some(InlineDisplay::Compact)
        }
    }

    /// Edit the value shown in an inlined socket; only meaningful while the
    /// peer is a leaf node.
    pub fn update_inlined_value(&mut self, link_id: &str, value: &str) {
        if self.inlined_peer(link_id).is_none() {
            return;
        }
        self.push(GraphEvent::UpdateInlinedValue {
            link: link_id.to_string(),
            value: value.to_string(),
        });
    }

    /// Convert an inlined leaf back into a standalone floating node placed
    /// beside the node it was collapsed into.
    pub fn eject_inlined(&mut self, link_id: &str) {
        let Some(peer) = self.inlined_peer(link_id) else { return };
        let link = match self.link(link_id) {
            Some(l) => l,
            None => return,
        };
        // The reference node is the non-leaf end.
        let reference = if peer.id == link.source { &link.target } else { &link.source };
        let Some(pos) = self.node_pos(reference) else { return };
        self.push(GraphEvent::EjectInlined {
            link: link_id.to_string(),
            x: pos.x + EJECT_OFFSET,
            y: pos.y,
        });
    }

    pub fn toggle_relationship_inlined(&mut self, link_id: &str) {
        if self.link(link_id).is_some() {
            self.push(GraphEvent::ToggleRelationshipInlined {
                link: link_id.to_string(),
            });
        }
    }

    pub fn edit_relationship(&mut self, link_id: &str) {
        if self.link(link_id).is_some() {
            self.push(GraphEvent::EditRelationship {
                id: link_id.to_string(),
            });
        }
    }

    pub fn delete_entry(&mut self, node_id: &str) {
        if self.node(node_id).is_some() {
            self.push(GraphEvent::DeleteEntry {
                id: node_id.to_string(),
            });
        }
    }

    pub fn set_node_content(&mut self, node_id: &str, content: &str) {
        if self.node(node_id).is_some() {
            self.push(GraphEvent::NodeContentChange {
                id: node_id.to_string(),
                content: content.to_string(),
            });
        }
    }

    // Opaque triggers into the surrounding execution subsystems.

    pub fn generate_ideas(&mut self, node_id: &str) {
        if self.node(node_id).is_some() {
            self.push(GraphEvent::GenerateIdeas { id: node_id.to_string() });
        }
    }

    pub fn recompute_code(&mut self, node_id: &str) {
        if self.node(node_id).is_some() {
            self.push(GraphEvent::RecomputeCode { id: node_id.to_string() });
        }
    }

    pub fn recompute_nl(&mut self, node_id: &str) {
        if self.node(node_id).is_some() {
            self.push(GraphEvent::RecomputeNl { id: node_id.to_string() });
        }
    }
}
