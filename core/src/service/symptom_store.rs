use chrono::NaiveDate;
use log::{debug, warn};

use crate::config::DEFAULT_BLOB_KEY;
use crate::error::{Result, SymptomLogError};
use crate::model::symptom::SymptomEntry;
use crate::model::symptom_log::SymptomLog;
use crate::repository::BlobStore;
use crate::time::CalendarDay;

/// Owns the symptom log and writes it through to a [`BlobStore`] after every change.
///
/// `add`, `delete`, `replace`, `load` and `save` never fail from the caller's
/// point of view: persistence problems are logged and the in-memory log stays
/// authoritative. The `try_*` variants report the same failures as errors.
pub struct SymptomStore<B: BlobStore> {
    backend: B,
    key: String,
    log: SymptomLog,
}

impl<B: BlobStore> SymptomStore<B> {
    /// Empty store; nothing is read until [`load`](Self::load).
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_BLOB_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            log: SymptomLog::new(),
        }
    }

    /// Creates the store and loads whatever is persisted.
    pub fn open(backend: B) -> Self {
        let mut store = Self::new(backend);
        store.load();
        store
    }

    pub fn log(&self) -> &SymptomLog {
        &self.log
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn entries_on(&self, date: impl CalendarDay) -> &[SymptomEntry] {
        self.log.entries_on(date.calendar_day())
    }

    /// Days with their entries, most recent day first.
    pub fn days_newest_first(&self) -> impl Iterator<Item = (NaiveDate, &[SymptomEntry])> {
        self.log.iter().rev()
    }

    pub fn add(&mut self, date: impl CalendarDay, entry: SymptomEntry) {
        let day = date.calendar_day();
        debug!("adding '{}' (severity {}) on {}", entry.symptom, entry.severity, day);
        self.log.append(day, entry);
        self.save();
    }

    pub fn delete(&mut self, date: impl CalendarDay, index: usize) {
        if let Err(e) = self.try_delete(date, index) {
            match e {
                SymptomLogError::IndexOutOfRange { .. } => debug!("delete ignored: {}", e),
                _ => warn!("delete not persisted: {}", e),
            }
        }
    }

    /// Removes and returns the entry. An out-of-range index leaves the log
    /// untouched and writes nothing.
    pub fn try_delete(&mut self, date: impl CalendarDay, index: usize) -> Result<SymptomEntry> {
        let removed = self.log.remove(date.calendar_day(), index)?;
        self.try_save()?;
        Ok(removed)
    }

    pub fn replace(&mut self, date: impl CalendarDay, index: usize, entry: SymptomEntry) {
        if let Err(e) = self.try_replace(date, index, entry) {
            match e {
                SymptomLogError::IndexOutOfRange { .. } => debug!("replace ignored: {}", e),
                _ => warn!("replace not persisted: {}", e),
            }
        }
    }

    pub fn try_replace(
        &mut self,
        date: impl CalendarDay,
        index: usize,
        entry: SymptomEntry,
    ) -> Result<SymptomEntry> {
        let previous = self.log.replace(date.calendar_day(), index, entry)?;
        self.try_save()?;
        Ok(previous)
    }

    pub fn load(&mut self) {
        if let Err(e) = self.try_load() {
            warn!("starting with an empty symptom log: {}", e);
        }
    }

    /// Replaces the in-memory log with the persisted one. On any failure the
    /// log is left empty and the error is returned.
    pub fn try_load(&mut self) -> Result<()> {
        self.log = SymptomLog::new();
        let Some(bytes) = self.backend.get_blob(&self.key)? else {
            debug!("no stored symptom log under '{}'", self.key);
            return Ok(());
        };
        self.log = SymptomLog::from_json(&bytes)?;
        debug!(
            "loaded {} entries over {} days",
            self.log.entry_count(),
            self.log.day_count()
        );
        Ok(())
    }

    pub fn save(&self) {
        if let Err(e) = self.try_save() {
            warn!("symptom log not saved: {}", e);
        }
    }

    pub fn try_save(&self) -> Result<()> {
        let bytes = self.log.to_json()?;
        self.backend.set_blob(&self.key, &bytes)?;
        Ok(())
    }
}
