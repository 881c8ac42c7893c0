pub mod edit;
pub mod new;
pub mod products;
pub mod quick;
pub mod view;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use crm_core::editor::{EventEditor, ListField};
use crm_core::screen::CalendarScreen;
use crm_core::store::EventStore;
use crm_core::view::ViewMode;

use crate::EventFields;

/// Parse "YYYY-MM-DD HH:MM", "YYYY-MM-DDTHH:MM" or "YYYY-MM-DD" (noon), as UTC.
pub fn parse_when(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();

    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(dt.and_utc());
        }
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("Could not parse '{}'. Expected YYYY-MM-DD or YYYY-MM-DD HH:MM", input))?;

    date.and_hms_opt(12, 0, 0)
        .map(|dt| dt.and_utc())
        .with_context(|| format!("Invalid date '{}'", input))
}

/// Today in UTC, the calendar's day boundary.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Copy every field given on the command line into the editor's draft.
pub fn apply_fields(editor: &mut EventEditor, fields: EventFields) -> Result<()> {
    let draft = &mut editor.draft;

    if let Some(at) = fields.at {
        draft.date_time = parse_when(&at)?;
    }
    if let Some(t) = fields.event_type {
        draft.event_type = t.parse()?;
    }
    if let Some(p) = fields.priority {
        draft.priority = p.parse()?;
    }
    if let Some(s) = fields.status {
        draft.status = s.parse()?;
    }
    if let Some(p) = fields.phase {
        draft.phase = p.parse()?;
    }
    if fields.contact.is_some() {
        draft.client_contact = fields.contact;
    }
    if fields.responsible.is_some() {
        draft.internal_responsible = fields.responsible;
    }
    if fields.notes.is_some() {
        draft.notes = fields.notes;
    }
    if fields.remind {
        draft.reminder = true;
    }

    let lists = [
        (ListField::ReferenceCodes, fields.reference_codes),
        (ListField::RequiredDocuments, fields.required_documents),
        (ListField::FollowUpActions, fields.follow_up_actions),
        (ListField::Attachments, fields.attachments),
    ];
    for (field, items) in lists {
        for item in items {
            editor.add_item(field, &item);
        }
    }

    Ok(())
}

/// A day screen holding the event `id`, loaded from `store`.
pub fn screen_for_event<S: EventStore>(store: &S, id: &str) -> Result<CalendarScreen> {
    let event = store
        .get(id)?
        .with_context(|| format!("Event '{}' not found", id))?;

    let mut screen = CalendarScreen::new(event.date(), ViewMode::Day);
    screen.load(store)?;
    Ok(screen)
}
