use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::SelectionMode;

/// One `(day, time)` cell tagged with a preference mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// 0=Sun ... 6=Sat
    pub day: u8,
    /// Minutes since midnight, aligned to the grid that produced it.
    pub time: u32,
    pub mode: SelectionMode,
}

impl TimeSlot {
    pub fn new(day: u8, time: u32, mode: SelectionMode) -> Self {
        Self { day, time, mode }
    }

    pub fn key(&self) -> SlotKey {
        SlotKey {
            day: self.day,
            time: self.time,
        }
    }
}

/// Identity of a slot inside a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey {
    pub day: u8,
    pub time: u32,
}

/// One entity's painted slots, keyed by `(day, time)`.
///
/// Serializes as a plain array of [`TimeSlot`]. Deserializing an array that
/// repeats a key keeps the last occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<TimeSlot>", into = "Vec<TimeSlot>")]
pub struct ScheduleCollection {
    slots: BTreeMap<SlotKey, SelectionMode>,
}

impl ScheduleCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, day: u8, time: u32) -> Option<SelectionMode> {
        self.slots.get(&SlotKey { day, time }).copied()
    }

    pub fn contains(&self, day: u8, time: u32) -> bool {
        self.get(day, time).is_some()
    }

    /// Insert or overwrite. Returns the mode previously stored at the key.
    pub fn upsert(&mut self, slot: TimeSlot) -> Option<SelectionMode> {
        self.slots.insert(slot.key(), slot.mode)
    }

    pub fn remove(&mut self, day: u8, time: u32) -> Option<SelectionMode> {
        self.slots.remove(&SlotKey { day, time })
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Slots ordered by day, then time.
    pub fn iter(&self) -> impl Iterator<Item = TimeSlot> + '_ {
        self.slots
            .iter()
            .map(|(key, mode)| TimeSlot::new(key.day, key.time, *mode))
    }

    pub fn count_mode(&self, mode: SelectionMode) -> usize {
        self.slots.values().filter(|m| **m == mode).count()
    }

    pub fn to_vec(&self) -> Vec<TimeSlot> {
        self.iter().collect()
    }
}

impl From<Vec<TimeSlot>> for ScheduleCollection {
    fn from(slots: Vec<TimeSlot>) -> Self {
        slots.into_iter().collect()
    }
}

impl From<ScheduleCollection> for Vec<TimeSlot> {
    fn from(collection: ScheduleCollection) -> Self {
        collection.to_vec()
    }
}

impl FromIterator<TimeSlot> for ScheduleCollection {
    fn from_iter<I: IntoIterator<Item = TimeSlot>>(iter: I) -> Self {
        let mut collection = ScheduleCollection::new();
        for slot in iter {
            collection.upsert(slot);
        }
        collection
    }
}
