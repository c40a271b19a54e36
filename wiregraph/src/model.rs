use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn dist_sq(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Which edge of a node rectangle a socket sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    /// Unit normal pointing away from the node body.
    pub fn outward_normal(self) -> Vec2 {
        match self {
            Side::Top => Vec2::new(0.0, -1.0),
            Side::Right => Vec2::new(1.0, 0.0),
            Side::Bottom => Vec2::new(0.0, 1.0),
            Side::Left => Vec2::new(-1.0, 0.0),
        }
    }
}

/// Fine-grained socket placement: the four sides plus a corner bias used
/// when two or three sockets share a side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SocketSlot {
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocketKind {
    Input,
    Output,
}

impl SocketKind {
    pub fn opposite(self) -> SocketKind {
        match self {
            SocketKind::Input => SocketKind::Output,
            SocketKind::Output => SocketKind::Input,
        }
    }

    /// Default side before the solver has run.
    pub fn default_side(self) -> Side {
        match self {
            SocketKind::Input => Side::Left,
            SocketKind::Output => Side::Right,
        }
    }
}

/// A named socket on a specific node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocketRef {
    pub node: String,
    pub kind: SocketKind,
    pub label: String,
}

impl SocketRef {
    pub fn new(node: impl Into<String>, kind: SocketKind, label: impl Into<String>) -> Self {
        SocketRef {
            node: node.into(),
            kind,
            label: label.into(),
        }
    }
}

/// Kind of writing entry a node projects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Prose,
    Code,
    NlPrompt,
    InputLeaf,
    OutputLeaf,
}

impl NodeKind {
    /// Leaf nodes carry a single fixed socket that cannot be renamed or
    /// extended.
    pub fn has_fixed_sockets(self) -> bool {
        matches!(self, NodeKind::InputLeaf | NodeKind::OutputLeaf)
    }
}

/// One writing entry, projected into the graph by the parent application.
///
/// Position is optional; a node without one floats at the container center
/// until the user drags it somewhere.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub pov_id: String,
    #[serde(default)]
    pub book_id: String,
    pub kind: NodeKind,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
    #[serde(default)]
    pub dirty: bool,
}

impl Node {
    pub fn socket_count(&self) -> usize {
        self.inputs.len() + self.outputs.len()
    }

    pub fn has_socket(&self, kind: SocketKind, label: &str) -> bool {
        match kind {
            SocketKind::Input => self.inputs.iter().any(|l| l == label),
            SocketKind::Output => self.outputs.iter().any(|l| l == label),
        }
    }

    /// All sockets in enumeration order: inputs first, then outputs.
    pub fn sockets(&self) -> impl Iterator<Item = (SocketKind, &str)> {
        self.inputs
            .iter()
            .map(|l| (SocketKind::Input, l.as_str()))
            .chain(self.outputs.iter().map(|l| (SocketKind::Output, l.as_str())))
    }
}

/// A directed labeled wire from one node's output socket to another node's
/// input socket.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_label: String,
    pub target_label: String,
    #[serde(default)]
    pub is_inlined: bool,
}

impl Link {
    pub fn output_ref(&self) -> SocketRef {
        SocketRef::new(self.source.clone(), SocketKind::Output, self.source_label.clone())
    }

    pub fn input_ref(&self) -> SocketRef {
        SocketRef::new(self.target.clone(), SocketKind::Input, self.target_label.clone())
    }
}
