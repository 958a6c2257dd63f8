use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Attributes, MeetingRequirement};
use crate::availability::ScheduleCollection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Student,
    Educator,
}

/// A student or educator with their own availability schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub kind: EntityKind,
    pub name: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub schedule: ScheduleCollection,
    /// Students only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meeting_requirements: Vec<MeetingRequirement>,
    /// Educators only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Entity {
    pub(crate) fn new(kind: EntityKind, name: String, attributes: Attributes) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            name,
            attributes,
            schedule: ScheduleCollection::new(),
            meeting_requirements: Vec::new(),
            subjects: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_student(&self) -> bool {
        self.kind == EntityKind::Student
    }

    pub fn is_educator(&self) -> bool {
        self.kind == EntityKind::Educator
    }
}
