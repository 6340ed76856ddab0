use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use uuid::Uuid;

pub const SEVERITY_RANGE: RangeInclusive<u8> = 1..=10;

/// One logged occurrence of a symptom.
///
/// Entries are never edited in place; a change replaces the whole record
/// (see `SymptomStore::replace`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SymptomEntry {
    pub id: Uuid,
    pub symptom: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub still_experiencing: bool,
    pub severity: u8,
}

impl SymptomEntry {
    pub fn new(symptom: impl Into<String>, severity: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            symptom: symptom.into(),
            note: String::new(),
            still_experiencing: false,
            severity,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_still_experiencing(mut self, still: bool) -> Self {
        self.still_experiencing = still;
        self
    }

    pub fn has_valid_severity(&self) -> bool {
        SEVERITY_RANGE.contains(&self.severity)
    }
}
