//! Students, educators and the store that owns their schedules.

mod attributes;
mod entity;
mod requirements;
mod store;

pub use attributes::{Attribute, Attributes};
pub use entity::{Entity, EntityKind};
pub use requirements::{parse_allowed_values, MeetingRequirement, RequiredAttribute};
pub use store::EntityStore;
