//! Availability data shared by the grid, the selection engine and the store.

mod mode;
mod slot;

pub use mode::{SelectionMode, UnknownModeError};
pub use slot::{ScheduleCollection, SlotKey, TimeSlot};
