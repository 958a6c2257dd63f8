use serde::{Deserialize, Serialize};

use super::Attributes;
use crate::error::ValidationError;

/// Attribute every student must carry when enrolled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredAttribute {
    pub name: String,
    /// Allowed values; `None` accepts free-form text.
    pub values: Option<Vec<String>>,
}

impl RequiredAttribute {
    pub fn check(&self, attributes: &Attributes) -> Result<(), ValidationError> {
        let value = attributes
            .get(&self.name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ValidationError::MissingRequiredAttribute {
                name: self.name.clone(),
            })?;

        if let Some(allowed) = &self.values {
            if !allowed.iter().any(|a| a == value) {
                return Err(ValidationError::DisallowedAttributeValue {
                    name: self.name.clone(),
                    value: value.to_string(),
                    allowed: allowed.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Parse the comma-separated "values" field of the required-attribute form.
///
/// Blank text means free-form; blank items are dropped.
pub fn parse_allowed_values(text: &str) -> Option<Vec<String>> {
    let values: Vec<String> = text
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

/// How often a student must meet a given educator each week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRequirement {
    pub educator_id: String,
    pub meetings_per_week: u8,
    pub meeting_duration_minutes: u32,
}

impl MeetingRequirement {
    pub const MAX_MEETINGS_PER_WEEK: u8 = 7;
    pub const DURATION_STEP_MINUTES: u32 = 5;

    pub fn new(
        educator_id: impl Into<String>,
        meetings_per_week: u8,
        meeting_duration_minutes: u32,
    ) -> Self {
        Self {
            educator_id: educator_id.into(),
            meetings_per_week,
            meeting_duration_minutes,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=Self::MAX_MEETINGS_PER_WEEK).contains(&self.meetings_per_week) {
            return Err(ValidationError::InvalidValue {
                field: "meetings_per_week".into(),
                message: format!(
                    "must be between 1 and {}, got {}",
                    Self::MAX_MEETINGS_PER_WEEK,
                    self.meetings_per_week
                ),
            });
        }
        let step = Self::DURATION_STEP_MINUTES;
        if self.meeting_duration_minutes < step || self.meeting_duration_minutes % step != 0 {
            return Err(ValidationError::InvalidValue {
                field: "meeting_duration_minutes".into(),
                message: format!(
                    "must be a positive multiple of {step}, got {}",
                    self.meeting_duration_minutes
                ),
            });
        }
        Ok(())
    }
}
