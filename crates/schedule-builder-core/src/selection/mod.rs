mod engine;
mod gesture;
pub mod script;

pub use engine::{ScheduleObserver, SelectionEngine};
pub use gesture::{GesturePhase, GestureState, PaintAction};
pub use script::{replay, GestureStep};
