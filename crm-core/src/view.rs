//! Day, week and month projections of the calendar.
//!
//! A projection is plain data: the CLI colors it, a GUI would lay it out.
//! Nothing here mutates events.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::NOTE_EXCERPT_CHARS;
use crate::date_range::{DateRange, month_bounds, week_bounds};
use crate::error::CrmError;
use crate::event::{CalendarEvent, EventStatus, EventType, Priority};
use crate::filter::FilterState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    #[default]
    Day,
    Week,
    Month,
}

impl ViewMode {
    /// Days covered by this mode around `anchor`.
    pub fn bounds(&self, anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            ViewMode::Day => (anchor, anchor),
            ViewMode::Week => week_bounds(anchor),
            ViewMode::Month => month_bounds(anchor),
        }
    }

    pub fn range(&self, anchor: NaiveDate) -> DateRange {
        match self {
            ViewMode::Day => DateRange::day(anchor),
            ViewMode::Week => DateRange::week(anchor),
            ViewMode::Month => DateRange::month(anchor),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewMode::Day => "day",
            ViewMode::Week => "week",
            ViewMode::Month => "month",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ViewMode {
    type Err = CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(ViewMode::Day),
            "week" => Ok(ViewMode::Week),
            "month" => Ok(ViewMode::Month),
            other => Err(CrmError::Parse(format!("unknown view '{}'", other))),
        }
    }
}

/// Compact card for one event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventCard {
    pub id: String,
    /// "HH:MM"
    pub time: String,
    pub priority: Priority,
    pub event_type: EventType,
    pub title: String,
    pub contact: Option<String>,
    pub note_excerpt: Option<String>,
    pub status: EventStatus,
    pub reminder: bool,
}

impl From<&CalendarEvent> for EventCard {
    fn from(event: &CalendarEvent) -> Self {
        EventCard {
            id: event.id.clone(),
            time: event.date_time.format("%H:%M").to_string(),
            priority: event.priority,
            event_type: event.event_type,
            title: event.title.clone(),
            contact: event.client_contact.clone(),
            note_excerpt: event.notes.as_deref().and_then(excerpt),
            status: event.status,
            reminder: event.reminder,
        }
    }
}

/// First line of the notes, cut to NOTE_EXCERPT_CHARS characters.
fn excerpt(notes: &str) -> Option<String> {
    let line = notes.lines().map(str::trim).find(|l| !l.is_empty())?;
    if line.chars().count() <= NOTE_EXCERPT_CHARS {
        return Some(line.to_string());
    }
    let cut: String = line.chars().take(NOTE_EXCERPT_CHARS).collect();
    Some(format!("{}…", cut.trim_end()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub cards: Vec<EventCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarView {
    pub mode: ViewMode,
    pub anchor: NaiveDate,
    pub days: Vec<DayColumn>,
}

impl CalendarView {
    pub fn card_count(&self) -> usize {
        self.days.iter().map(|d| d.cards.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.card_count() == 0
    }
}

/// Project `events` onto the days of `mode` around `anchor`.
///
/// Every day of the window gets a column, empty or not. Cards within a day
/// are ordered by time; events at the same instant keep their input order.
pub fn project(events: &[CalendarEvent], anchor: NaiveDate, mode: ViewMode, filter: &FilterState) -> CalendarView {
    let (first, last) = mode.bounds(anchor);

    let mut days = Vec::new();
    let mut date = first;
    while date <= last {
        let mut todays: Vec<&CalendarEvent> = events
            .iter()
            .filter(|e| e.date() == date && filter.matches(e))
            .collect();
        todays.sort_by_key(|e| e.date_time);

        days.push(DayColumn {
            date,
            cards: todays.into_iter().map(EventCard::from).collect(),
        });

        match date.checked_add_days(Days::new(1)) {
            Some(next) => date = next,
            None => break,
        }
    }

    CalendarView { mode, anchor, days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(id: &str, day: u32, hour: u32) -> CalendarEvent {
        CalendarEvent::new(id, format!("Event {id}"), Utc.with_ymd_and_hms(2025, 3, day, hour, 15, 0).unwrap())
    }

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
    }

    #[test]
    fn test_day_view_sorts_cards_by_time() {
        let events = vec![event("late", 20, 16), event("early", 20, 8), event("other", 21, 9)];
        let view = project(&events, anchor(), ViewMode::Day, &FilterState::default());

        assert_eq!(view.days.len(), 1);
        let ids: Vec<_> = view.days[0].cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
        assert_eq!(view.days[0].cards[0].time, "08:15");
    }

    #[test]
    fn test_week_view_has_seven_columns() {
        let events = vec![event("mon", 17, 9), event("sun", 23, 9), event("next", 24, 9)];
        let view = project(&events, anchor(), ViewMode::Week, &FilterState::default());

        assert_eq!(view.days.len(), 7);
        assert_eq!(view.days[0].date, NaiveDate::from_ymd_opt(2025, 3, 17).unwrap());
        assert_eq!(view.card_count(), 2);
    }

    #[test]
    fn test_month_view_covers_every_day() {
        let view = project(&[], anchor(), ViewMode::Month, &FilterState::default());
        assert_eq!(view.days.len(), 31);
        assert!(view.is_empty());
    }

    #[test]
    fn test_filter_applies_to_projection() {
        let mut high = event("high", 20, 9);
        high.priority = Priority::High;
        let events = vec![high, event("medium", 20, 10)];

        let mut filter = FilterState::default();
        filter.toggle_priority(Priority::High);
        let view = project(&events, anchor(), ViewMode::Day, &filter);

        assert_eq!(view.card_count(), 1);
        assert_eq!(view.days[0].cards[0].id, "high");
    }

    #[test]
    fn test_card_shows_contact_and_note_excerpt() {
        let mut e = event("a", 20, 9);
        e.client_contact = Some("Ana Ruiz".into());
        e.notes = Some(format!("\n{}\nsecond line", "x".repeat(80)));

        let card = EventCard::from(&e);
        assert_eq!(card.contact.as_deref(), Some("Ana Ruiz"));
        let note = card.note_excerpt.unwrap();
        assert!(note.ends_with('…'));
        assert_eq!(note.chars().count(), NOTE_EXCERPT_CHARS + 1);
    }

    #[test]
    fn test_blank_notes_have_no_excerpt() {
        let mut e = event("a", 20, 9);
        e.notes = Some("   \n  ".into());
        assert_eq!(EventCard::from(&e).note_excerpt, None);
    }
}
