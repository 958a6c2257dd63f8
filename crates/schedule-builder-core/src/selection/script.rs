//! Recorded pointer input, replayable against an engine.
//!
//! ```json
//! [
//!   { "action": "down", "day": 1, "time": 480 },
//!   { "action": "enter", "day": 1, "time": 540 },
//!   { "action": "mode", "mode": "preferred" },
//!   { "action": "up" }
//! ]
//! ```

use serde::{Deserialize, Serialize};

use super::SelectionEngine;
use crate::availability::SelectionMode;
use crate::events::SlotChange;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum GestureStep {
    Down { day: u8, time: u32 },
    Enter { day: u8, time: u32 },
    Up,
    Leave,
    Mode { mode: SelectionMode },
    Disable,
    Enable,
}

impl GestureStep {
    pub fn apply(&self, engine: &mut SelectionEngine) -> Option<SlotChange> {
        match *self {
            GestureStep::Down { day, time } => engine.pointer_down(day, time),
            GestureStep::Enter { day, time } => engine.pointer_enter(day, time),
            GestureStep::Up => {
                engine.pointer_up();
                None
            }
            GestureStep::Leave => {
                engine.pointer_leave();
                None
            }
            GestureStep::Mode { mode } => {
                engine.set_mode(mode);
                None
            }
            GestureStep::Disable => {
                engine.set_disabled(true);
                None
            }
            GestureStep::Enable => {
                engine.set_disabled(false);
                None
            }
        }
    }
}

/// Feed every step to the engine in order and collect the resulting changes.
pub fn replay(engine: &mut SelectionEngine, steps: &[GestureStep]) -> Vec<SlotChange> {
    steps.iter().filter_map(|step| step.apply(engine)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_replays_script() {
        let json = r#"[
            {"action":"down","day":1,"time":480},
            {"action":"enter","day":1,"time":540},
            {"action":"mode","mode":"prefer-not"},
            {"action":"enter","day":1,"time":600},
            {"action":"up"},
            {"action":"enter","day":1,"time":660}
        ]"#;
        let steps: Vec<GestureStep> = serde_json::from_str(json).unwrap();
        let mut engine = SelectionEngine::new(SelectionMode::Available);
        let changes = replay(&mut engine, &steps);

        assert_eq!(changes.len(), 3);
        assert_eq!(engine.schedule().get(1, 600), Some(SelectionMode::PreferNot));
        assert!(!engine.schedule().contains(1, 660));
    }

    #[test]
    fn disable_step_blocks_following_input() {
        let steps = vec![
            GestureStep::Down { day: 2, time: 480 },
            GestureStep::Disable,
            GestureStep::Enter { day: 2, time: 540 },
            GestureStep::Enable,
            GestureStep::Enter { day: 2, time: 600 },
        ];
        let mut engine = SelectionEngine::new(SelectionMode::Cannot);
        assert_eq!(replay(&mut engine, &steps).len(), 1);
    }
}
