//! Selection engine implementation.
//!
//! The engine turns pointer events over the availability grid into slot
//! mutations. It owns the collection being edited and publishes every change
//! synchronously to registered observers as the complete new collection.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --pointer_down--> Painting(Apply | Remove) --pointer_up/leave--> Idle
//!                    set_disabled(true) from any state --> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = SelectionEngine::new(SelectionMode::Available);
//! engine.on_schedule_changed(|slots| store.replace(slots.clone()));
//! engine.pointer_down(1, 480);
//! engine.pointer_enter(1, 540);
//! engine.pointer_up();
//! ```

use std::fmt;

use tracing::debug;

use super::gesture::{GestureState, PaintAction};
use crate::availability::{ScheduleCollection, SelectionMode, TimeSlot};
use crate::events::SlotChange;

/// Callback receiving the full collection after each change.
pub type ScheduleObserver = Box<dyn FnMut(&ScheduleCollection)>;

/// Gesture interpreter for one entity's schedule.
///
/// The current mode is read at every event, so switching modes mid-drag only
/// affects cells visited afterwards.
pub struct SelectionEngine {
    schedule: ScheduleCollection,
    mode: SelectionMode,
    gesture: GestureState,
    disabled: bool,
    observers: Vec<ScheduleObserver>,
}

impl SelectionEngine {
    /// Create an idle, enabled engine over an empty collection.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            schedule: ScheduleCollection::new(),
            mode,
            gesture: GestureState::idle(),
            disabled: false,
            observers: Vec::new(),
        }
    }

    pub fn with_schedule(mode: SelectionMode, schedule: ScheduleCollection) -> Self {
        let mut engine = Self::new(mode);
        engine.schedule = schedule;
        engine
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn schedule(&self) -> &ScheduleCollection {
        &self.schedule
    }

    // ── Host wiring ──────────────────────────────────────────────────

    /// Register an observer. Observers run in registration order.
    pub fn on_schedule_changed<F>(&mut self, observer: F)
    where
        F: FnMut(&ScheduleCollection) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn set_mode(&mut self, mode: SelectionMode) {
        if self.mode != mode {
            debug!(from = %self.mode, to = %mode, "selection mode changed");
        }
        self.mode = mode;
    }

    /// Swap in the collection of a newly selected entity.
    ///
    /// Does not notify observers and abandons any gesture in progress.
    pub fn load_schedule(&mut self, schedule: ScheduleCollection) {
        self.schedule = schedule;
        self.gesture = GestureState::idle();
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        if disabled && self.gesture.is_painting() {
            debug!("gesture aborted by disable");
        }
        self.disabled = disabled;
        if disabled {
            self.gesture = GestureState::idle();
        }
    }

    // ── Pointer events ───────────────────────────────────────────────

    /// Start a gesture on a cell.
    ///
    /// An empty cell or a cell with another mode is painted with the current
    /// mode and the drag applies; a cell already in the current mode is
    /// cleared and the drag removes.
    pub fn pointer_down(&mut self, day: u8, time: u32) -> Option<SlotChange> {
        if self.disabled {
            return None;
        }

        let change = match self.schedule.get(day, time) {
            Some(existing) if existing == self.mode => {
                self.gesture = GestureState::painting(PaintAction::Remove);
                self.remove(day, time)
            }
            _ => {
                self.gesture = GestureState::painting(PaintAction::Apply);
                self.apply(day, time)
            }
        };
        debug!(day, time, action = ?self.gesture.paint_action, "gesture started");
        change
    }

    /// Continue the gesture into another cell. No-op while idle.
    pub fn pointer_enter(&mut self, day: u8, time: u32) -> Option<SlotChange> {
        if self.disabled || !self.gesture.is_painting() {
            return None;
        }
        match self.gesture.paint_action {
            PaintAction::Apply => self.apply(day, time),
            PaintAction::Remove => self.remove(day, time),
        }
    }

    pub fn pointer_up(&mut self) {
        self.end_gesture();
    }

    /// Pointer left the interactive surface; ends the gesture like `pointer_up`.
    pub fn pointer_leave(&mut self) {
        self.end_gesture();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn end_gesture(&mut self) {
        if self.gesture.is_painting() {
            debug!("gesture ended");
        }
        self.gesture = GestureState::idle();
    }

    fn apply(&mut self, day: u8, time: u32) -> Option<SlotChange> {
        let mode = self.mode;
        let change = match self.schedule.upsert(TimeSlot::new(day, time, mode)) {
            None => SlotChange::Added { day, time, mode },
            Some(previous) if previous == mode => return None,
            Some(previous) => SlotChange::ModeChanged {
                day,
                time,
                from: previous,
                to: mode,
            },
        };
        self.emit(change);
        Some(change)
    }

    fn remove(&mut self, day: u8, time: u32) -> Option<SlotChange> {
        let mode = self.schedule.remove(day, time)?;
        let change = SlotChange::Removed { day, time, mode };
        self.emit(change);
        Some(change)
    }

    fn emit(&mut self, change: SlotChange) {
        debug!(?change, slots = self.schedule.len(), "schedule changed");
        for observer in &mut self.observers {
            observer(&self.schedule);
        }
    }
}

impl fmt::Debug for SelectionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionEngine")
            .field("schedule", &self.schedule)
            .field("mode", &self.mode)
            .field("gesture", &self.gesture)
            .field("disabled", &self.disabled)
            .field("observers", &self.observers.len())
            .finish()
    }
}
