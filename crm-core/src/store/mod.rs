//! Event Store contract.
//!
//! The calendar screen only needs a range query plus the writes its quick
//! actions and editor produce. `MemoryStore` backs tests and embedders;
//! `FileStore` keeps a JSON file on disk for the CLI and server.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::date_range::DateRange;
use crate::error::CrmResult;
use crate::event::CalendarEvent;

pub trait EventStore {
    /// Events whose instant falls within `range`, in store order.
    fn events_in_range(&self, range: &DateRange) -> CrmResult<Vec<CalendarEvent>>;

    fn get(&self, id: &str) -> CrmResult<Option<CalendarEvent>>;

    /// Insert, or replace the event with the same id.
    fn save(&mut self, event: &CalendarEvent) -> CrmResult<()>;

    /// Returns true when an event was removed.
    fn delete(&mut self, id: &str) -> CrmResult<bool>;
}
