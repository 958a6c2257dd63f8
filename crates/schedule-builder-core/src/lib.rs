//! # Schedule Builder Core Library
//!
//! This library collects weekly availability for students and educators.
//! People paint preference levels onto a grid of time blocks with
//! click-and-drag gestures; the library turns those gestures into a
//! de-duplicated schedule per person. It does not build timetables.
//!
//! ## Architecture
//!
//! - **Grid**: pure derivation of selectable days and time rows from a
//!   [`GridConfig`]
//! - **Selection**: a synchronous state machine that interprets pointer
//!   events and publishes whole-collection replacements to observers
//! - **People**: the store owning each person's attributes and schedule
//! - **Session**: host wiring that routes engine output to the selected person
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`compute_grid`]: Grid derivation
//! - [`SelectionEngine`]: Gesture state machine
//! - [`EntityStore`]: People and their schedules
//! - [`Session`]: Store + engine wiring
//! - [`Config`]: Application configuration management

pub mod availability;
pub mod error;
pub mod events;
pub mod grid;
pub mod people;
pub mod report;
pub mod selection;
pub mod session;
pub mod storage;

pub use availability::{ScheduleCollection, SelectionMode, SlotKey, TimeSlot};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use events::SlotChange;
pub use grid::{compute_grid, day_label, time_label, GridConfig, GridModel, BLOCK_SIZE_CHOICES};
pub use people::{
    Attribute, Attributes, Entity, EntityKind, EntityStore, MeetingRequirement, RequiredAttribute,
};
pub use report::AvailabilityReport;
pub use selection::{GesturePhase, GestureState, GestureStep, PaintAction, SelectionEngine};
pub use session::Session;
pub use storage::Config;
