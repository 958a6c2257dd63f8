use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GesturePhase {
    #[default]
    Idle,
    Painting,
}

/// What a drag does to the cells it enters, fixed by the cell it started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintAction {
    #[default]
    Apply,
    Remove,
}

/// Transient state of one pointer-down-to-up interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GestureState {
    pub phase: GesturePhase,
    /// Only meaningful while painting.
    pub paint_action: PaintAction,
}

impl GestureState {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn painting(paint_action: PaintAction) -> Self {
        Self {
            phase: GesturePhase::Painting,
            paint_action,
        }
    }

    pub fn is_painting(&self) -> bool {
        self.phase == GesturePhase::Painting
    }
}
