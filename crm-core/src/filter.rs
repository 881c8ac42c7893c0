//! Filter engine for the calendar screen.
//!
//! Categories combine with AND, values inside a category with OR. An empty
//! category places no restriction.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::event::{CalendarEvent, EventStatus, EventType, Priority};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub types: BTreeSet<EventType>,
    #[serde(default)]
    pub priorities: BTreeSet<Priority>,
    #[serde(default)]
    pub statuses: BTreeSet<EventStatus>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.priorities.is_empty() && self.statuses.is_empty()
    }

    /// Category membership only; the date is checked by `filter_events`.
    pub fn matches(&self, event: &CalendarEvent) -> bool {
        allows(&self.types, &event.event_type)
            && allows(&self.priorities, &event.priority)
            && allows(&self.statuses, &event.status)
    }

    pub fn toggle_type(&mut self, value: EventType) {
        toggle(&mut self.types, value);
    }

    pub fn toggle_priority(&mut self, value: Priority) {
        toggle(&mut self.priorities, value);
    }

    pub fn toggle_status(&mut self, value: EventStatus) {
        toggle(&mut self.statuses, value);
    }

    pub fn clear(&mut self) {
        *self = FilterState::default();
    }
}

fn allows<T: Ord>(selected: &BTreeSet<T>, value: &T) -> bool {
    selected.is_empty() || selected.contains(value)
}

fn toggle<T: Ord>(selected: &mut BTreeSet<T>, value: T) {
    if !selected.remove(&value) {
        selected.insert(value);
    }
}

/// Events on `day` that pass `filter`, in input order.
pub fn filter_events<'a>(
    events: &'a [CalendarEvent],
    day: NaiveDate,
    filter: &FilterState,
) -> Vec<&'a CalendarEvent> {
    events
        .iter()
        .filter(|event| event.date() == day && filter.matches(event))
        .collect()
}
