use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SymptomLogError};
use crate::model::symptom::SymptomEntry;
use crate::time::{day_to_epoch_days, epoch_days_to_day};

/// All entries grouped by calendar day.
///
/// A day present in the map always has at least one entry. Entries within a
/// day keep the order they were appended in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymptomLog {
    days: BTreeMap<NaiveDate, Vec<SymptomEntry>>,
}

impl SymptomLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, day: NaiveDate, entry: SymptomEntry) {
        self.days.entry(day).or_default().push(entry);
    }

    pub fn remove(&mut self, day: NaiveDate, index: usize) -> Result<SymptomEntry> {
        let entries = self.days.get_mut(&day).ok_or(SymptomLogError::IndexOutOfRange {
            day,
            index,
            len: 0,
        })?;
        if index >= entries.len() {
            return Err(SymptomLogError::IndexOutOfRange {
                day,
                index,
                len: entries.len(),
            });
        }

        let removed = entries.remove(index);
        if entries.is_empty() {
            self.days.remove(&day);
        }
        Ok(removed)
    }

    pub fn replace(&mut self, day: NaiveDate, index: usize, entry: SymptomEntry) -> Result<SymptomEntry> {
        let len = self.entries_on(day).len();
        match self.days.get_mut(&day).and_then(|entries| entries.get_mut(index)) {
            Some(slot) => Ok(std::mem::replace(slot, entry)),
            None => Err(SymptomLogError::IndexOutOfRange { day, index, len }),
        }
    }

    pub fn entries_on(&self, day: NaiveDate) -> &[SymptomEntry] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_day(&self, day: NaiveDate) -> bool {
        self.days.contains_key(&day)
    }

    /// Days in ascending order with their entries.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (NaiveDate, &[SymptomEntry])> {
        self.days.iter().map(|(day, entries)| (*day, entries.as_slice()))
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn entry_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(SymptomLogError::Encode)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| SymptomLogError::Decode(e.to_string()))
    }
}

// Stored as {"<days since 1970-01-01>": [entry, ...]}.
impl Serialize for SymptomLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let stored: BTreeMap<i64, &Vec<SymptomEntry>> = self
            .days
            .iter()
            .map(|(day, entries)| (day_to_epoch_days(*day), entries))
            .collect();
        stored.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SymptomLog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let stored = BTreeMap::<i64, Vec<SymptomEntry>>::deserialize(deserializer)?;
        let mut days = BTreeMap::new();
        for (key, entries) in stored {
            let day = epoch_days_to_day(key)
                .ok_or_else(|| serde::de::Error::custom(format!("day key {} out of range", key)))?;
            if entries.is_empty() {
                warn!("dropping stored day {} with no entries", day);
                continue;
            }
            days.insert(day, entries);
        }
        Ok(Self { days })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut log = SymptomLog::new();
        let d = day(2024, 9, 26);
        log.append(d, SymptomEntry::new("Weight loss", 2));
        log.append(d, SymptomEntry::new("Increased fatigue", 5));

        let names: Vec<_> = log.entries_on(d).iter().map(|e| e.symptom.as_str()).collect();
        assert_eq!(names, vec!["Weight loss", "Increased fatigue"]);
        assert_eq!(log.day_count(), 1);
        assert_eq!(log.entry_count(), 2);
    }

    #[test]
    fn test_remove_last_entry_drops_day() {
        let mut log = SymptomLog::new();
        let d = day(2024, 9, 26);
        log.append(d, SymptomEntry::new("Weight loss", 2));

        let removed = log.remove(d, 0).unwrap();
        assert_eq!(removed.symptom, "Weight loss");
        assert!(!log.contains_day(d));
        assert!(log.is_empty());
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut log = SymptomLog::new();
        let d = day(2024, 9, 26);
        log.append(d, SymptomEntry::new("Weight loss", 2));
        let before = log.clone();

        assert!(matches!(
            log.remove(d, 1),
            Err(SymptomLogError::IndexOutOfRange { index: 1, len: 1, .. })
        ));
        assert!(matches!(
            log.remove(day(2024, 9, 27), 0),
            Err(SymptomLogError::IndexOutOfRange { len: 0, .. })
        ));
        assert_eq!(log, before);
    }

    #[test]
    fn test_replace_swaps_whole_record() {
        let mut log = SymptomLog::new();
        let d = day(2024, 9, 26);
        let original = SymptomEntry::new("Weight loss", 2);
        log.append(d, original.clone());

        let replacement = SymptomEntry::new("Weight loss", 6).with_note("worse");
        let old = log.replace(d, 0, replacement.clone()).unwrap();
        assert_eq!(old, original);
        assert_eq!(log.entries_on(d), &[replacement]);

        assert!(log.replace(d, 3, SymptomEntry::new("x", 1)).is_err());
    }

    #[test]
    fn test_json_keys_are_epoch_days() {
        let mut log = SymptomLog::new();
        log.append(day(1970, 1, 2), SymptomEntry::new("Weight loss", 3));

        let value: serde_json::Value = serde_json::from_slice(&log.to_json().unwrap()).unwrap();
        let entries = value["1"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["severity"], 3);
    }

    #[test]
    fn test_json_round_trip() {
        let mut log = SymptomLog::new();
        log.append(day(2024, 9, 26), SymptomEntry::new("Weight loss", 3));
        log.append(day(2024, 9, 26), SymptomEntry::new("Increased fatigue", 8).with_note("n"));
        log.append(day(1965, 3, 1), SymptomEntry::new("Other", 1).with_still_experiencing(true));

        let decoded = SymptomLog::from_json(&log.to_json().unwrap()).unwrap();
        assert_eq!(decoded, log);
    }

    #[test]
    fn test_decode_drops_empty_days_and_rejects_garbage() {
        let decoded = SymptomLog::from_json(br#"{"19000": []}"#).unwrap();
        assert!(decoded.is_empty());

        assert!(matches!(SymptomLog::from_json(b"not json"), Err(SymptomLogError::Decode(_))));
        assert!(matches!(
            SymptomLog::from_json(br#"{"abc": []}"#),
            Err(SymptomLogError::Decode(_))
        ));
        assert!(matches!(
            SymptomLog::from_json(br#"{"9223372036854775807": []}"#),
            Err(SymptomLogError::Decode(_))
        ));
    }
}
