//! Inputs delivered by the host, one at a time, from its frame loop.

use crate::{Anchor, AnchorId};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An event raised by the AR session or the view hosting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// The session started tracking a new anchor.
    AnchorAdded {
        /// Snapshot at the time of detection.
        anchor: Anchor,
    },
    /// A tracked anchor was refined.
    AnchorUpdated {
        /// Snapshot after the update.
        anchor: Anchor,
    },
    /// The session stopped tracking an anchor.
    AnchorRemoved {
        /// Identity of the dropped anchor.
        id: AnchorId,
    },
    /// The user touched the view.
    Touch {
        /// View-space point in points, origin top-left.
        point: Vec2,
    },
}

impl HostEvent {
    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            HostEvent::AnchorAdded { .. } => "anchor_added",
            HostEvent::AnchorUpdated { .. } => "anchor_updated",
            HostEvent::AnchorRemoved { .. } => "anchor_removed",
            HostEvent::Touch { .. } => "touch",
        }
    }
}
