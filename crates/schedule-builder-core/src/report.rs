//! Availability report handed to an external scheduler.
//!
//! Collects every person's painted slots grouped by mode. Slots the current
//! grid does not render are kept in the report and counted as hidden; they
//! are never dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::availability::{SelectionMode, TimeSlot};
use crate::grid::GridModel;
use crate::people::{Entity, EntityKind, EntityStore, MeetingRequirement};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeSlots {
    pub mode: SelectionMode,
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityAvailability {
    pub id: String,
    pub name: String,
    pub kind: EntityKind,
    /// One entry per mode, in [`SelectionMode::ALL`] order, empty modes included.
    pub by_mode: Vec<ModeSlots>,
    pub total_slots: usize,
    /// Slots outside the current grid.
    pub hidden_slots: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meeting_requirements: Vec<MeetingRequirement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityReport {
    pub generated_at: DateTime<Utc>,
    pub grid: GridModel,
    pub students: Vec<EntityAvailability>,
    pub educators: Vec<EntityAvailability>,
    /// Students who have not painted any slot yet.
    pub students_without_availability: Vec<String>,
}

impl AvailabilityReport {
    pub fn build(store: &EntityStore, grid: &GridModel) -> Self {
        let students: Vec<_> = store.students().map(|e| summarize(e, grid)).collect();
        let educators = store.educators().map(|e| summarize(e, grid)).collect();
        let students_without_availability = students
            .iter()
            .filter(|s| s.total_slots == 0)
            .map(|s| s.name.clone())
            .collect();

        Self {
            generated_at: Utc::now(),
            grid: grid.clone(),
            students,
            educators,
            students_without_availability,
        }
    }
}

fn summarize(entity: &Entity, grid: &GridModel) -> EntityAvailability {
    let by_mode = SelectionMode::ALL
        .into_iter()
        .map(|mode| ModeSlots {
            mode,
            slots: entity.schedule.iter().filter(|s| s.mode == mode).collect(),
        })
        .collect();
    let hidden_slots = entity
        .schedule
        .iter()
        .filter(|s| !grid.contains(s.day, s.time))
        .count();

    EntityAvailability {
        id: entity.id.clone(),
        name: entity.name.clone(),
        kind: entity.kind,
        by_mode,
        total_slots: entity.schedule.len(),
        hidden_slots,
        meeting_requirements: entity.meeting_requirements.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{compute_grid, GridConfig};
    use crate::people::Attributes;

    #[test]
    fn groups_slots_and_counts_hidden_ones() {
        let mut store = EntityStore::new();
        let ada = store.add_student("Ada", Attributes::new(), Vec::new()).unwrap();
        store.add_student("Bo", Attributes::new(), Vec::new()).unwrap();
        store
            .replace_schedule(
                &ada,
                vec![
                    TimeSlot::new(1, 480, SelectionMode::Preferred),
                    TimeSlot::new(1, 540, SelectionMode::Cannot),
                    // Sunday is not on the default grid
                    TimeSlot::new(0, 480, SelectionMode::Preferred),
                ]
                .into(),
            )
            .unwrap();

        let report = AvailabilityReport::build(&store, &compute_grid(&GridConfig::default()));
        let ada = &report.students[0];
        assert_eq!(ada.total_slots, 3);
        assert_eq!(ada.hidden_slots, 1);
        assert_eq!(ada.by_mode.len(), 4);
        assert_eq!(ada.by_mode[3].mode, SelectionMode::Preferred);
        assert_eq!(ada.by_mode[3].slots.len(), 2);
        assert!(ada.by_mode[2].slots.is_empty());
        assert_eq!(report.students_without_availability, vec!["Bo".to_string()]);
        assert!(report.educators.is_empty());
    }
}
