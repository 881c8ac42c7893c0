use crate::date_range::DateRange;
use crate::error::CrmResult;
use crate::event::CalendarEvent;

use super::EventStore;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    events: Vec<CalendarEvent>,
}

impl MemoryStore {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        MemoryStore { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventStore for MemoryStore {
    fn events_in_range(&self, range: &DateRange) -> CrmResult<Vec<CalendarEvent>> {
        Ok(self
            .events
            .iter()
            .filter(|e| range.contains(&e.date_time))
            .cloned()
            .collect())
    }

    fn get(&self, id: &str) -> CrmResult<Option<CalendarEvent>> {
        Ok(self.events.iter().find(|e| e.id == id).cloned())
    }

    fn save(&mut self, event: &CalendarEvent) -> CrmResult<()> {
        match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event.clone(),
            None => self.events.push(event.clone()),
        }
        Ok(())
    }

    fn delete(&mut self, id: &str) -> CrmResult<bool> {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        Ok(self.events.len() != before)
    }
}
