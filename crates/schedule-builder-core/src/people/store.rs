//! In-process owner of every person's data.
//!
//! The store never edits a schedule slot by slot: it only accepts whole
//! collections through [`EntityStore::replace_schedule`] and
//! [`EntityStore::replace_selected_schedule`], which is how the selection
//! engine's changes arrive.
//!
//! A deserialized store goes through the same checks as the mutating API:
//! names, attribute keys, meeting requirements and the selection must all be
//! valid or the load fails.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Attributes, Entity, EntityKind, MeetingRequirement, RequiredAttribute};
use crate::availability::ScheduleCollection;
use crate::error::{CoreError, Result, StoreError, ValidationError};

/// Unchecked wire form of [`EntityStore`].
#[derive(Deserialize)]
struct StoreSnapshot {
    #[serde(default)]
    entities: Vec<Entity>,
    #[serde(default)]
    required_attributes: Vec<RequiredAttribute>,
    #[serde(default)]
    selected: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoreSnapshot")]
pub struct EntityStore {
    #[serde(default)]
    entities: Vec<Entity>,
    #[serde(default)]
    required_attributes: Vec<RequiredAttribute>,
    #[serde(default)]
    selected: Option<String>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn students(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_student())
    }

    pub fn educators(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_educator())
    }

    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn required_attributes(&self) -> &[RequiredAttribute] {
        &self.required_attributes
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&Entity> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    // ── Entities ─────────────────────────────────────────────────────

    /// Enroll a student. Every required attribute must be satisfied and every
    /// meeting requirement must name a known educator.
    pub fn add_student(
        &mut self,
        name: &str,
        attributes: Attributes,
        meeting_requirements: Vec<MeetingRequirement>,
    ) -> Result<String> {
        let name = validate_name(name)?;
        for required in &self.required_attributes {
            required.check(&attributes)?;
        }
        for requirement in &meeting_requirements {
            self.check_meeting_requirement(requirement)?;
        }

        let mut entity = Entity::new(EntityKind::Student, name, attributes);
        for requirement in meeting_requirements {
            upsert_requirement(&mut entity.meeting_requirements, requirement);
        }
        info!(id = %entity.id, name = %entity.name, "student added");
        let id = entity.id.clone();
        self.entities.push(entity);
        Ok(id)
    }

    pub fn add_educator(
        &mut self,
        name: &str,
        attributes: Attributes,
        subjects: Vec<String>,
    ) -> Result<String> {
        let name = validate_name(name)?;
        let mut entity = Entity::new(EntityKind::Educator, name, attributes);
        entity.subjects = subjects
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        info!(id = %entity.id, name = %entity.name, "educator added");
        let id = entity.id.clone();
        self.entities.push(entity);
        Ok(id)
    }

    /// Remove an entity. Removing an educator also drops the meeting
    /// requirements that point at it; removing the selection deselects.
    pub fn remove(&mut self, id: &str) -> Result<Entity, StoreError> {
        let index = self
            .entities
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| StoreError::UnknownEntity(id.to_string()))?;
        let removed = self.entities.remove(index);

        if removed.is_educator() {
            for student in self.entities.iter_mut().filter(|e| e.is_student()) {
                student.meeting_requirements.retain(|r| r.educator_id != id);
            }
        }
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        info!(id, name = %removed.name, "entity removed");
        Ok(removed)
    }

    pub fn select(&mut self, id: &str) -> Result<(), StoreError> {
        if self.get(id).is_none() {
            return Err(StoreError::UnknownEntity(id.to_string()));
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    // ── Schedules ────────────────────────────────────────────────────

    /// Replace an entity's whole schedule.
    pub fn replace_schedule(
        &mut self,
        id: &str,
        schedule: ScheduleCollection,
    ) -> Result<(), StoreError> {
        let entity = self.entity_mut(id)?;
        entity.schedule = schedule;
        Ok(())
    }

    pub fn replace_selected_schedule(
        &mut self,
        schedule: ScheduleCollection,
    ) -> Result<(), StoreError> {
        let id = self.selected.clone().ok_or(StoreError::NothingSelected)?;
        self.replace_schedule(&id, schedule)
    }

    pub fn clear_selected_schedule(&mut self) -> Result<(), StoreError> {
        self.replace_selected_schedule(ScheduleCollection::new())
    }

    // ── Attributes ───────────────────────────────────────────────────

    pub fn add_attribute(&mut self, id: &str, key: &str, value: &str) -> Result<usize, StoreError> {
        self.entity_mut(id)?.attributes.push(key, value)
    }

    pub fn update_attribute(
        &mut self,
        id: &str,
        index: usize,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        self.entity_mut(id)?.attributes.update(index, key, value)
    }

    pub fn remove_attribute(&mut self, id: &str, index: usize) -> Result<(), StoreError> {
        self.entity_mut(id)?.attributes.remove(index).map(|_| ())
    }

    // ── Required attributes ──────────────────────────────────────────

    /// Applies to students enrolled afterwards; existing students are not
    /// re-validated.
    pub fn add_required_attribute(&mut self, name: &str, values: Option<Vec<String>>) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "name".into(),
                message: "required attribute name must not be empty".into(),
            }
            .into());
        }
        if self.required_attributes.iter().any(|r| r.name == name) {
            return Err(StoreError::DuplicateRequiredAttribute(name.to_string()).into());
        }
        self.required_attributes.push(RequiredAttribute {
            name: name.to_string(),
            values,
        });
        Ok(())
    }

    pub fn remove_required_attribute(&mut self, name: &str) -> Result<RequiredAttribute, StoreError> {
        let index = self
            .required_attributes
            .iter()
            .position(|r| r.name == name)
            .ok_or_else(|| StoreError::UnknownRequiredAttribute(name.to_string()))?;
        Ok(self.required_attributes.remove(index))
    }

    pub fn update_required_attribute_values(
        &mut self,
        name: &str,
        values: Option<Vec<String>>,
    ) -> Result<(), StoreError> {
        let required = self
            .required_attributes
            .iter_mut()
            .find(|r| r.name == name)
            .ok_or_else(|| StoreError::UnknownRequiredAttribute(name.to_string()))?;
        required.values = values;
        Ok(())
    }

    // ── Meeting requirements ─────────────────────────────────────────

    /// Add a requirement, replacing any existing one for the same educator.
    pub fn add_meeting_requirement(
        &mut self,
        student_id: &str,
        requirement: MeetingRequirement,
    ) -> Result<()> {
        self.check_meeting_requirement(&requirement)?;
        let student = self.entity_mut(student_id)?;
        if !student.is_student() {
            return Err(StoreError::NotAStudent(student_id.to_string()).into());
        }
        upsert_requirement(&mut student.meeting_requirements, requirement);
        Ok(())
    }

    /// Returns whether a requirement was removed.
    pub fn remove_meeting_requirement(
        &mut self,
        student_id: &str,
        educator_id: &str,
    ) -> Result<bool, StoreError> {
        let student = self.entity_mut(student_id)?;
        let before = student.meeting_requirements.len();
        student
            .meeting_requirements
            .retain(|r| r.educator_id != educator_id);
        Ok(student.meeting_requirements.len() != before)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn entity_mut(&mut self, id: &str) -> Result<&mut Entity, StoreError> {
        self.entities
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::UnknownEntity(id.to_string()))
    }

    fn check_meeting_requirement(&self, requirement: &MeetingRequirement) -> Result<()> {
        requirement.validate()?;
        let known = self
            .educators()
            .any(|e| e.id == requirement.educator_id);
        if !known {
            return Err(StoreError::UnknownEducator(requirement.educator_id.clone()).into());
        }
        Ok(())
    }
}

impl TryFrom<StoreSnapshot> for EntityStore {
    type Error = CoreError;

    /// Loaded students are not re-checked against required attributes, same
    /// as students enrolled before a requirement was added.
    fn try_from(snapshot: StoreSnapshot) -> Result<Self> {
        let mut store = EntityStore::new();
        for required in snapshot.required_attributes {
            store.add_required_attribute(&required.name, required.values)?;
        }

        for mut entity in snapshot.entities {
            entity.name = validate_name(&entity.name)?;
            if store.get(&entity.id).is_some() {
                return Err(StoreError::DuplicateEntity(entity.id).into());
            }
            store.entities.push(entity);
        }

        for entity in &store.entities {
            if entity.is_educator() && !entity.meeting_requirements.is_empty() {
                return Err(StoreError::NotAStudent(entity.id.clone()).into());
            }
            for requirement in &entity.meeting_requirements {
                store.check_meeting_requirement(requirement)?;
            }
        }

        if let Some(id) = snapshot.selected {
            store.select(&id)?;
        }
        Ok(store)
    }
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name.to_string())
}

fn upsert_requirement(list: &mut Vec<MeetingRequirement>, requirement: MeetingRequirement) {
    match list
        .iter_mut()
        .find(|r| r.educator_id == requirement.educator_id)
    {
        Some(existing) => *existing = requirement,
        None => list.push(requirement),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::{SelectionMode, TimeSlot};
    use crate::error::CoreError;

    fn store_with_educator() -> (EntityStore, String) {
        let mut store = EntityStore::new();
        let id = store
            .add_educator("Ms. Rivera", Attributes::new(), vec!["speech".into()])
            .unwrap();
        (store, id)
    }

    #[test]
    fn add_student_checks_required_attributes() {
        let mut store = EntityStore::new();
        store
            .add_required_attribute("grade", Some(vec!["1".into(), "2".into()]))
            .unwrap();

        let err = store
            .add_student("Ada", Attributes::new(), Vec::new())
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MissingRequiredAttribute { .. })
        ));

        let attrs = Attributes::from_pairs([("grade", "2")]).unwrap();
        let id = store.add_student("Ada", attrs, Vec::new()).unwrap();
        assert_eq!(store.get(&id).unwrap().name, "Ada");
        assert_eq!(store.students().count(), 1);
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut store = EntityStore::new();
        assert!(matches!(
            store.add_educator("  ", Attributes::new(), Vec::new()),
            Err(CoreError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn meeting_requirements_need_known_educator() {
        let (mut store, educator) = store_with_educator();
        let err = store
            .add_student(
                "Ada",
                Attributes::new(),
                vec![MeetingRequirement::new("nobody", 2, 30)],
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::Store(StoreError::UnknownEducator(_))));

        let student = store
            .add_student(
                "Ada",
                Attributes::new(),
                vec![MeetingRequirement::new(&educator, 2, 30)],
            )
            .unwrap();
        store
            .add_meeting_requirement(&student, MeetingRequirement::new(&educator, 3, 45))
            .unwrap();
        let reqs = &store.get(&student).unwrap().meeting_requirements;
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].meetings_per_week, 3);
    }

    #[test]
    fn requirements_only_attach_to_students() {
        let (mut store, educator) = store_with_educator();
        let err = store
            .add_meeting_requirement(&educator, MeetingRequirement::new(&educator, 1, 30))
            .unwrap_err();
        assert!(matches!(err, CoreError::Store(StoreError::NotAStudent(_))));
    }

    #[test]
    fn removing_educator_drops_its_requirements() {
        let (mut store, educator) = store_with_educator();
        let student = store
            .add_student(
                "Ada",
                Attributes::new(),
                vec![MeetingRequirement::new(&educator, 1, 30)],
            )
            .unwrap();
        store.remove(&educator).unwrap();
        assert!(store.get(&student).unwrap().meeting_requirements.is_empty());
    }

    #[test]
    fn remove_meeting_requirement_reports_change() {
        let (mut store, educator) = store_with_educator();
        let student = store
            .add_student(
                "Ada",
                Attributes::new(),
                vec![MeetingRequirement::new(&educator, 1, 30)],
            )
            .unwrap();
        assert_eq!(store.remove_meeting_requirement(&student, &educator), Ok(true));
        assert_eq!(store.remove_meeting_requirement(&student, &educator), Ok(false));
    }

    #[test]
    fn selection_and_full_replace() {
        let (mut store, educator) = store_with_educator();
        assert_eq!(
            store.replace_selected_schedule(ScheduleCollection::new()),
            Err(StoreError::NothingSelected)
        );

        store.select(&educator).unwrap();
        let slots: ScheduleCollection =
            vec![TimeSlot::new(1, 480, SelectionMode::Preferred)].into();
        store.replace_selected_schedule(slots.clone()).unwrap();
        assert_eq!(store.selected().unwrap().schedule, slots);

        store.clear_selected_schedule().unwrap();
        assert!(store.selected().unwrap().schedule.is_empty());
    }

    #[test]
    fn removing_selected_entity_deselects() {
        let (mut store, educator) = store_with_educator();
        store.select(&educator).unwrap();
        store.remove(&educator).unwrap();
        assert!(store.selected().is_none());
        assert_eq!(
            store.select(&educator),
            Err(StoreError::UnknownEntity(educator.clone()))
        );
    }

    #[test]
    fn attribute_edits_go_through_ordered_mapping() {
        let (mut store, educator) = store_with_educator();
        store.add_attribute(&educator, "room", "12").unwrap();
        store.add_attribute(&educator, "phone", "555").unwrap();
        assert_eq!(
            store.update_attribute(&educator, 1, "room", "x"),
            Err(StoreError::DuplicateAttributeKey { key: "room".into() })
        );
        store.update_attribute(&educator, 1, "ext", "42").unwrap();
        store.remove_attribute(&educator, 0).unwrap();

        let attrs = &store.get(&educator).unwrap().attributes;
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("ext"), Some("42"));
    }

    #[test]
    fn required_attribute_management() {
        let mut store = EntityStore::new();
        store.add_required_attribute("grade", None).unwrap();
        assert!(matches!(
            store.add_required_attribute(" grade ", None),
            Err(CoreError::Store(StoreError::DuplicateRequiredAttribute(_)))
        ));
        store
            .update_required_attribute_values("grade", Some(vec!["K".into()]))
            .unwrap();
        assert_eq!(
            store.required_attributes()[0].values,
            Some(vec!["K".to_string()])
        );
        store.remove_required_attribute("grade").unwrap();
        assert!(store.required_attributes().is_empty());
        assert!(store.remove_required_attribute("grade").is_err());
    }

    #[test]
    fn roster_roundtrips_through_json() {
        let (mut store, educator) = store_with_educator();
        store.select(&educator).unwrap();
        let json = serde_json::to_string(&store).unwrap();
        let parsed: EntityStore = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, store);
    }

    fn roster(entities: &str, selected: &str) -> String {
        format!(r#"{{"entities":[{entities}],"selected":{selected}}}"#)
    }

    fn entity(id: &str, kind: &str, name: &str, extra: &str) -> String {
        format!(
            r#"{{"id":"{id}","kind":"{kind}","name":"{name}","created_at":"2024-01-01T00:00:00Z"{extra}}}"#
        )
    }

    #[test]
    fn loading_trims_names_and_keeps_selection() {
        let json = roster(
            &[
                entity("e1", "educator", " Ms. Rivera ", ""),
                entity(
                    "s1",
                    "student",
                    "Ada",
                    r#","meeting_requirements":[{"educator_id":"e1","meetings_per_week":2,"meeting_duration_minutes":30}]"#,
                ),
            ]
            .join(","),
            r#""s1""#,
        );
        let store: EntityStore = serde_json::from_str(&json).unwrap();
        assert_eq!(store.get("e1").unwrap().name, "Ms. Rivera");
        assert_eq!(store.selected_id(), Some("s1"));
        assert_eq!(store.selected().unwrap().meeting_requirements.len(), 1);
    }

    #[test]
    fn loading_rejects_blank_name() {
        let json = roster(&entity("s1", "student", "   ", ""), "null");
        let err = serde_json::from_str::<EntityStore>(&json).unwrap_err();
        assert!(err.to_string().contains("Name must not be empty"));
    }

    #[test]
    fn loading_rejects_repeated_attribute_keys() {
        let json = roster(
            &entity(
                "s1",
                "student",
                "Ada",
                r#","attributes":[{"key":"grade","value":"1"},{"key":"grade","value":"2"}]"#,
            ),
            "null",
        );
        assert!(serde_json::from_str::<EntityStore>(&json).is_err());
    }

    #[test]
    fn loading_rejects_requirement_for_unknown_educator() {
        let json = roster(
            &entity(
                "s1",
                "student",
                "Ada",
                r#","meeting_requirements":[{"educator_id":"ghost","meetings_per_week":2,"meeting_duration_minutes":30}]"#,
            ),
            "null",
        );
        let err = serde_json::from_str::<EntityStore>(&json).unwrap_err();
        assert!(err.to_string().contains("No educator with id 'ghost'"));
    }

    #[test]
    fn loading_rejects_requirement_out_of_bounds() {
        let json = roster(
            &[
                entity("e1", "educator", "Ms. Rivera", ""),
                entity(
                    "s1",
                    "student",
                    "Ada",
                    r#","meeting_requirements":[{"educator_id":"e1","meetings_per_week":0,"meeting_duration_minutes":30}]"#,
                ),
            ]
            .join(","),
            "null",
        );
        let err = serde_json::from_str::<EntityStore>(&json).unwrap_err();
        assert!(err.to_string().contains("meetings_per_week"));
    }

    #[test]
    fn loading_rejects_dangling_selection() {
        let json = roster(&entity("s1", "student", "Ada", ""), r#""nobody""#);
        let err = serde_json::from_str::<EntityStore>(&json).unwrap_err();
        assert!(err.to_string().contains("No entity with id 'nobody'"));
    }

    #[test]
    fn loading_rejects_duplicate_ids() {
        let json = roster(
            &[
                entity("x", "student", "Ada", ""),
                entity("x", "educator", "Bo", ""),
            ]
            .join(","),
            "null",
        );
        let err = serde_json::from_str::<EntityStore>(&json).unwrap_err();
        assert!(err.to_string().contains("appears more than once"));
    }
}
