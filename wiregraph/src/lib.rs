//! Node-graph layout and interaction engine for a hierarchical writing tool.
//!
//! The engine holds a projection of the parent application's document (one
//! node per writing entry, one link per relationship), solves socket-side
//! placement, routes connectors, and runs the pointer interaction state
//! machine. It owns no durable state: every committed gesture goes out as a
//! [`GraphEvent`] and the parent answers with a fresh [`GraphView::set_data`].

pub mod model;
pub mod events;
pub mod view;
pub mod geometry {
    pub mod bezier;
    pub mod connector;
    pub mod tolerance;
}
pub mod layout {
    pub mod hit;
    pub mod sides;
}
mod interact;
mod json;
mod sockets;
mod svg;

pub use events::{GraphEvent, Rejection};
pub use interact::{Interaction, DRAG_THRESHOLD_PX};
pub use json::Document;
pub use layout::hit::Hit;
pub use layout::sides::{LayoutParams, SideLayout, SocketLayout};
pub use model::{Link, Node, NodeKind, Side, SocketKind, SocketRef, SocketSlot, Vec2};
pub use sockets::{InlineDisplay, InlineEdit};
pub use svg::LinkPath;
pub use view::ViewTransform;

use std::cell::{Ref, RefCell};
use std::collections::{HashMap, VecDeque};

pub struct GraphView {
    pub(crate) nodes: Vec<Node>,
    pub(crate) links: Vec<Link>,
    pub(crate) transform: ViewTransform,
    pub(crate) viewport: (f32, f32),
    pub(crate) params: LayoutParams,
    pub(crate) interaction: Interaction,
    pub(crate) editing: Option<InlineEdit>,
    pub(crate) events: VecDeque<GraphEvent>,
    pub(crate) data_ver: u64,
    // Solved layout cache: (built_data_ver, layout)
    pub(crate) layout_cache: RefCell<Option<(u64, SideLayout)>>,
}

impl Default for GraphView {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphView {
    pub fn new() -> Self {
        GraphView {
            nodes: Vec::new(),
            links: Vec::new(),
            transform: ViewTransform::default(),
            viewport: (800.0, 600.0),
            params: LayoutParams::default(),
            interaction: Interaction::Idle,
            editing: None,
            events: VecDeque::new(),
            data_ver: 1,
            layout_cache: RefCell::new(None),
        }
    }

    /// Replace the document projection. Called by the parent whenever its
    /// node/link arrays change.
    pub fn set_data(&mut self, nodes: Vec<Node>, links: Vec<Link>) {
        self.nodes = nodes;
        self.links = links;
        self.data_ver += 1;
        // A gesture may reference an entry the parent just deleted.
        if let Interaction::DraggingNode { ref id, .. } = self.interaction {
            if self.node(id).is_none() {
                self.interaction = Interaction::Idle;
            }
        }
        if let Interaction::Connecting { ref source, .. } = self.interaction {
            if self.node(&source.node).is_none() {
                self.interaction = Interaction::Idle;
            }
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = (width.max(1.0), height.max(1.0));
    }

    pub fn data_version(&self) -> u64 {
        self.data_ver
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn link(&self, id: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    /// Links whose source and target entries both exist. Everything the
    /// engine renders or lays out goes through this filter.
    pub fn valid_links(&self) -> Vec<&Link> {
        self.links
            .iter()
            .filter(|l| self.node(&l.source).is_some() && self.node(&l.target).is_some())
            .collect()
    }

    /// The link currently occupying an input socket, if any. An input may be
    /// the target of at most one link; outputs fan out freely.
    pub fn input_occupied(&self, node_id: &str, label: &str) -> Option<&Link> {
        self.valid_links()
            .into_iter()
            .find(|l| l.target == node_id && l.target_label == label)
    }

    /// Effective world position of a node: the live drag position while a
    /// gesture is active, the stored position otherwise, or the container
    /// center for nodes the user has never placed.
    pub fn node_pos(&self, id: &str) -> Option<Vec2> {
        let node = self.node(id)?;
        if let Interaction::DraggingNode { id: ref drag_id, current, .. } = self.interaction {
            if drag_id == id {
                return Some(current);
            }
        }
        match (node.x, node.y) {
            (Some(x), Some(y)) => Some(Vec2::new(x, y)),
            _ => {
                let center = self
                    .transform
                    .screen_to_world(self.viewport.0 * 0.5, self.viewport.1 * 0.5);
                Some(Vec2::new(
                    center.x - self.params.node_w * 0.5,
                    center.y - self.params.node_h * 0.5,
                ))
            }
        }
    }

    pub(crate) fn positions(&self) -> HashMap<String, Vec2> {
        self.nodes
            .iter()
            .filter_map(|n| self.node_pos(&n.id).map(|p| (n.id.clone(), p)))
            .collect()
    }

    /// The solved socket-side layout, memoized on the data version so
    /// unrelated re-renders never re-run the `4^k` search.
    pub fn layout(&self) -> Ref<'_, SideLayout> {
        let fresh = matches!(&*self.layout_cache.borrow(), Some((v, _)) if *v == self.data_ver);
        if !fresh {
            let positions = self.positions();
            let links: Vec<Link> = self.valid_links().into_iter().cloned().collect();
            let solved = layout::sides::solve(&self.nodes, &links, &positions, &self.params);
            *self.layout_cache.borrow_mut() = Some((self.data_ver, solved));
        }
        Ref::map(self.layout_cache.borrow(), |c| &c.as_ref().unwrap().1)
    }

    pub fn hit_test(&self, p: Vec2) -> Hit {
        layout::hit::hit_test_impl(self, p)
    }

    /// Connector geometry for every rendered (valid, non-inlined) link.
    pub fn link_paths(&self) -> Vec<LinkPath> {
        svg::link_paths_impl(self)
    }

    /// The wire following the cursor during a connection drag.
    pub fn drag_wire(&self) -> Option<geometry::connector::ConnectionGeometry> {
        svg::drag_wire_impl(self)
    }

    /// Snapshot of the dragged node for the render layer, without exposing
    /// the rest of the interaction state.
    pub fn dragged_node(&self) -> Option<(&str, Vec2)> {
        match self.interaction {
            Interaction::DraggingNode { ref id, current, .. } => Some((id.as_str(), current)),
            _ => None,
        }
    }

    pub fn drain_events(&mut self) -> Vec<GraphEvent> {
        self.events.drain(..).collect()
    }

    pub(crate) fn push(&mut self, event: GraphEvent) {
        self.events.push_back(event);
    }

    pub(crate) fn reject(&mut self, reason: Rejection) {
        log::debug!("rejected: {}", reason);
        self.push(GraphEvent::Rejected { reason });
    }

    /// Commit a node position. The local projection mirrors the mutation so
    /// layout stays coherent until the parent's next `set_data`.
    pub(crate) fn commit_node_position(&mut self, id: &str, pos: Vec2) {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
            node.x = Some(pos.x);
            node.y = Some(pos.y);
            self.data_ver += 1;
            self.push(GraphEvent::NodePositionChange {
                id: id.to_string(),
                x: pos.x,
                y: pos.y,
            });
        }
    }
}
