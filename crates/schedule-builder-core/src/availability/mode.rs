use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Preference label painted onto a time slot.
///
/// The serialized strings are consumed by presentation styling outside the
/// core and must stay stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionMode {
    Cannot,
    PreferNot,
    #[default]
    Available,
    Preferred,
}

impl SelectionMode {
    pub const ALL: [SelectionMode; 4] = [
        SelectionMode::Cannot,
        SelectionMode::PreferNot,
        SelectionMode::Available,
        SelectionMode::Preferred,
    ];

    /// Wire identifier, e.g. `"prefer-not"`.
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionMode::Cannot => "cannot",
            SelectionMode::PreferNot => "prefer-not",
            SelectionMode::Available => "available",
            SelectionMode::Preferred => "preferred",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SelectionMode::Cannot => "Cannot Schedule",
            SelectionMode::PreferNot => "Prefer Not",
            SelectionMode::Available => "Available",
            SelectionMode::Preferred => "Preferred",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SelectionMode::Cannot => "This time is completely unavailable.",
            SelectionMode::PreferNot => {
                "Avoid scheduling at this time if possible, but it is not strictly forbidden."
            }
            SelectionMode::Available => {
                "This time is fine for scheduling, but not a strong preference."
            }
            SelectionMode::Preferred => "This is the best time for scheduling.",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names none of the four modes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown selection mode '{0}' (expected cannot, prefer-not, available or preferred)")]
pub struct UnknownModeError(pub String);

impl FromStr for SelectionMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SelectionMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s.trim())
            .ok_or_else(|| UnknownModeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_strings_are_stable() {
        let json = serde_json::to_string(&SelectionMode::ALL).unwrap();
        assert_eq!(json, r#"["cannot","prefer-not","available","preferred"]"#);
    }

    #[test]
    fn parses_from_wire_string() {
        assert_eq!("prefer-not".parse::<SelectionMode>(), Ok(SelectionMode::PreferNot));
        assert_eq!(" preferred ".parse::<SelectionMode>(), Ok(SelectionMode::Preferred));
        assert!("PreferNot".parse::<SelectionMode>().is_err());
    }

    #[test]
    fn defaults_to_available() {
        assert_eq!(SelectionMode::default(), SelectionMode::Available);
    }

    #[test]
    fn display_matches_serde() {
        for mode in SelectionMode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{mode}\""));
        }
    }
}
