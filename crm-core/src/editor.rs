//! Event editor.
//!
//! The editor keeps a draft of every event field. In create mode the draft
//! starts from the documented defaults and gets a fresh id; in edit mode it
//! is a copy of the existing event and keeps its id. Submitting hands the
//! finished record to a caller-supplied callback; the editor never touches
//! a store itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CrmError, CrmResult};
use crate::event::{CalendarEvent, EventStatus, EventType, Phase, Priority};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit,
}

/// The ordered text lists the user can append to or remove from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListField {
    ReferenceCodes,
    RequiredDocuments,
    FollowUpActions,
    Attachments,
}

/// Editable copy of an event's fields
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub event_type: EventType,
    pub date_time: DateTime<Utc>,
    pub status: EventStatus,
    pub priority: Priority,
    pub phase: Phase,
    pub reference_codes: Vec<String>,
    pub internal_responsible: Option<String>,
    pub client_contact: Option<String>,
    pub notes: Option<String>,
    pub reminder: bool,
    pub required_documents: Vec<String>,
    pub follow_up_actions: Vec<String>,
    pub attachments: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EventEditor {
    id: String,
    mode: EditorMode,
    pub draft: EventDraft,
    /// The draft as it was opened; untouched fields are submitted verbatim.
    loaded: EventDraft,
}

impl EventEditor {
    /// Open the editor on `existing`, or on a blank event at `now` when
    /// there is none.
    pub fn new(existing: Option<&CalendarEvent>, now: DateTime<Utc>) -> Self {
        match existing {
            Some(event) => Self::edit(event),
            None => Self::create(now),
        }
    }

    pub fn create(date_time: DateTime<Utc>) -> Self {
        let blank = CalendarEvent::new(uuid::Uuid::new_v4().to_string(), "", date_time);
        EventEditor {
            mode: EditorMode::Create,
            ..Self::edit(&blank)
        }
    }

    pub fn edit(event: &CalendarEvent) -> Self {
        let event = event.clone();
        let draft = EventDraft {
            title: event.title,
            event_type: event.event_type,
            date_time: event.date_time,
            status: event.status,
            priority: event.priority,
            phase: event.phase,
            reference_codes: event.reference_codes,
            internal_responsible: event.internal_responsible,
            client_contact: event.client_contact,
            notes: event.notes,
            reminder: event.reminder,
            required_documents: event.required_documents,
            follow_up_actions: event.follow_up_actions,
            attachments: event.attachments,
        };
        EventEditor {
            id: event.id,
            mode: EditorMode::Edit,
            loaded: draft.clone(),
            draft,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn list(&self, field: ListField) -> &[String] {
        match field {
            ListField::ReferenceCodes => &self.draft.reference_codes,
            ListField::RequiredDocuments => &self.draft.required_documents,
            ListField::FollowUpActions => &self.draft.follow_up_actions,
            ListField::Attachments => &self.draft.attachments,
        }
    }

    fn list_mut(&mut self, field: ListField) -> &mut Vec<String> {
        match field {
            ListField::ReferenceCodes => &mut self.draft.reference_codes,
            ListField::RequiredDocuments => &mut self.draft.required_documents,
            ListField::FollowUpActions => &mut self.draft.follow_up_actions,
            ListField::Attachments => &mut self.draft.attachments,
        }
    }

    /// Append an item; blank input is ignored. Returns whether it was added.
    pub fn add_item(&mut self, field: ListField, item: &str) -> bool {
        let item = item.trim();
        if item.is_empty() {
            return false;
        }
        self.list_mut(field).push(item.to_string());
        true
    }

    /// Remove the item at `index`, if there is one.
    pub fn remove_item(&mut self, field: ListField, index: usize) -> Option<String> {
        let list = self.list_mut(field);
        (index < list.len()).then(|| list.remove(index))
    }

    /// The record that submitting now would produce.
    pub fn to_event(&self) -> CrmResult<CalendarEvent> {
        if self.draft.title.trim().is_empty() {
            return Err(CrmError::Validation("title is required".into()));
        }

        let loaded = &self.loaded;
        let draft = self.draft.clone();
        let title = if draft.title == loaded.title {
            draft.title
        } else {
            draft.title.trim().to_string()
        };
        Ok(CalendarEvent {
            id: self.id.clone(),
            title,
            event_type: draft.event_type,
            date_time: draft.date_time,
            status: draft.status,
            priority: draft.priority,
            phase: draft.phase,
            reference_codes: draft.reference_codes,
            internal_responsible: edited_text(draft.internal_responsible, &loaded.internal_responsible),
            client_contact: edited_text(draft.client_contact, &loaded.client_contact),
            notes: edited_text(draft.notes, &loaded.notes),
            reminder: draft.reminder,
            required_documents: draft.required_documents,
            follow_up_actions: draft.follow_up_actions,
            attachments: draft.attachments,
        })
    }

    /// Hand the finished record to `on_submit`. The callback is not invoked
    /// when the title is empty.
    pub fn submit<F>(&self, on_submit: F) -> CrmResult<()>
    where
        F: FnOnce(CalendarEvent),
    {
        let event = self.to_event()?;
        on_submit(event);
        Ok(())
    }
}

/// Optional text fields that were cleared in the form become absent.
/// Values still equal to what was loaded are kept as stored.
fn edited_text(value: Option<String>, loaded: &Option<String>) -> Option<String> {
    if value == *loaded {
        return value;
    }
    value.filter(|v| !v.trim().is_empty())
}
