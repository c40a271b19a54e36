//! Outbound callback contract with the surrounding application.
//!
//! The engine never mutates the document itself; every committed gesture or
//! edit request is queued as a `GraphEvent` which the shell drains, applies
//! to its document store, and answers with a fresh `set_data`.

use serde::Serialize;
use std::fmt;

use crate::model::{SocketKind, Vec2};

/// Validation rejections. These are surfaced to the user (the browser shell
/// shows a blocking alert) and the offending mutation is simply not queued;
/// the engine stays in its prior state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rejection {
    DuplicateSocketName,
    FixedSocket,
    CrossBook,
    InputOccupied,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Rejection::DuplicateSocketName => "a socket with that name already exists",
            Rejection::FixedSocket => "sockets on input/output nodes cannot be changed",
            Rejection::CrossBook => "entries in different books cannot be connected",
            Rejection::InputOccupied => "that input is already connected",
        };
        f.write_str(msg)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GraphEvent {
    SelectEntry {
        id: String,
    },
    EditRelationship {
        id: String,
    },
    DeleteEntry {
        id: String,
    },
    /// Click on empty canvas; world coordinates where the parent should
    /// create a new entry.
    BackgroundClick {
        x: f32,
        y: f32,
    },
    NodePositionChange {
        id: String,
        x: f32,
        y: f32,
    },
    NodeContentChange {
        id: String,
        content: String,
    },
    AddRelationship {
        source: String,
        source_label: String,
        target: String,
        target_label: String,
    },
    AddSocket {
        node: String,
        kind: SocketKind,
        label: String,
    },
    UpdateSocketLabel {
        node: String,
        kind: SocketKind,
        old_label: String,
        new_label: String,
    },
    RemoveSocket {
        node: String,
        kind: SocketKind,
        label: String,
    },
    /// Drop on a node body: create `label` on `node` and wire it up in the
    /// same document mutation.
    AddSocketAndConnect {
        node: String,
        kind: SocketKind,
        label: String,
        source: String,
        source_label: String,
        target: String,
        target_label: String,
    },
    UpdateInlinedValue {
        link: String,
        value: String,
    },
    ToggleRelationshipInlined {
        link: String,
    },
    /// Convert an inlined leaf back into a standalone floating node at the
    /// given world position.
    EjectInlined {
        link: String,
        x: f32,
        y: f32,
    },
    /// Click on an input-leaf node body: the shell focuses its raw value
    /// field instead of opening the entry.
    FocusValueInput {
        id: String,
    },
    GenerateIdeas {
        id: String,
    },
    RecomputeCode {
        id: String,
    },
    RecomputeNl {
        id: String,
    },
    Rejected {
        reason: Rejection,
    },
}

impl GraphEvent {
    pub fn background_click(p: Vec2) -> Self {
        GraphEvent::BackgroundClick { x: p.x, y: p.y }
    }
}
