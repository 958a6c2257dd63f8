use serde::{Deserialize, Serialize};

use crate::availability::SelectionMode;

/// A single mutation of a schedule collection.
///
/// Returned by the selection engine's entry points whenever the owned
/// collection actually changed; no-op events produce nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SlotChange {
    Added {
        day: u8,
        time: u32,
        mode: SelectionMode,
    },
    ModeChanged {
        day: u8,
        time: u32,
        from: SelectionMode,
        to: SelectionMode,
    },
    Removed {
        day: u8,
        time: u32,
        mode: SelectionMode,
    },
}

impl SlotChange {
    pub fn key(&self) -> (u8, u32) {
        match *self {
            SlotChange::Added { day, time, .. }
            | SlotChange::ModeChanged { day, time, .. }
            | SlotChange::Removed { day, time, .. } => (day, time),
        }
    }
}
