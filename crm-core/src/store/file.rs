//! JSON file backed event store.

use std::path::{Path, PathBuf};

use crate::date_range::DateRange;
use crate::error::{CrmError, CrmResult};
use crate::event::CalendarEvent;

use super::EventStore;

/// Events kept as a JSON array in a single file.
///
/// The file is re-read on every call so that the CLI and the server see
/// each other's writes. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_all(&self) -> CrmResult<Vec<CalendarEvent>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content)
            .map_err(|e| CrmError::Store(format!("Could not parse {}: {}", self.path.display(), e)))
    }

    fn write_all(&self, events: &[CalendarEvent]) -> CrmResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(events)?;
        std::fs::write(&self.path, content)?;

        tracing::debug!(path = %self.path.display(), count = events.len(), "wrote event store");
        Ok(())
    }
}

impl EventStore for FileStore {
    fn events_in_range(&self, range: &DateRange) -> CrmResult<Vec<CalendarEvent>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|e| range.contains(&e.date_time))
            .collect())
    }

    fn get(&self, id: &str) -> CrmResult<Option<CalendarEvent>> {
        Ok(self.load_all()?.into_iter().find(|e| e.id == id))
    }

    fn save(&mut self, event: &CalendarEvent) -> CrmResult<()> {
        let mut events = self.load_all()?;
        match events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event.clone(),
            None => events.push(event.clone()),
        }
        self.write_all(&events)
    }

    fn delete(&mut self, id: &str) -> CrmResult<bool> {
        let mut events = self.load_all()?;
        let before = events.len();
        events.retain(|e| e.id != id);

        if events.len() == before {
            return Ok(false);
        }
        self.write_all(&events)?;
        Ok(true)
    }
}
