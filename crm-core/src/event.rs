//! Calendar event types.
//!
//! A `CalendarEvent` is one entry on the CRM calendar: a product milestone,
//! a customer visit, a delivery. Events come out of an `EventStore`, pass
//! through the filter and view projections, and are created or modified by
//! the `EventEditor`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CrmError;

/// A calendar event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Opaque unique identifier, never changed once assigned
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub date_time: DateTime<Utc>,
    pub status: EventStatus,
    pub priority: Priority,
    #[serde(default)]
    pub phase: Phase,

    /// Product or order reference codes, in the order they were entered
    #[serde(default)]
    pub reference_codes: Vec<String>,
    pub internal_responsible: Option<String>,
    pub client_contact: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub reminder: bool,

    // Editor lists
    #[serde(default)]
    pub required_documents: Vec<String>,
    #[serde(default)]
    pub follow_up_actions: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl CalendarEvent {
    /// Create an event with the documented defaults for everything but
    /// the identifier, title and instant.
    pub fn new(id: impl Into<String>, title: impl Into<String>, date_time: DateTime<Utc>) -> Self {
        CalendarEvent {
            id: id.into(),
            title: title.into(),
            event_type: EventType::default(),
            date_time,
            status: EventStatus::default(),
            priority: Priority::default(),
            phase: Phase::default(),
            reference_codes: Vec::new(),
            internal_responsible: None,
            client_contact: None,
            notes: None,
            reminder: false,
            required_documents: Vec::new(),
            follow_up_actions: Vec::new(),
            attachments: Vec::new(),
        }
    }

    /// Calendar day the event falls on (UTC).
    pub fn date(&self) -> NaiveDate {
        self.date_time.date_naive()
    }

    pub fn is_completed(&self) -> bool {
        self.status == EventStatus::Completed
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    #[default]
    ProductDevelopment,
    TechnicalTest,
    Delivery,
    CommercialVisit,
    PostSale,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        EventType::ProductDevelopment,
        EventType::TechnicalTest,
        EventType::Delivery,
        EventType::CommercialVisit,
        EventType::PostSale,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::ProductDevelopment => "product-development",
            EventType::TechnicalTest => "technical-test",
            EventType::Delivery => "delivery",
            EventType::CommercialVisit => "commercial-visit",
            EventType::PostSale => "post-sale",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventType::ProductDevelopment => "Product development",
            EventType::TechnicalTest => "Technical test",
            EventType::Delivery => "Delivery",
            EventType::CommercialVisit => "Commercial visit",
            EventType::PostSale => "Post-sale",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub const ALL: [EventStatus; 3] = [
        EventStatus::Pending,
        EventStatus::Completed,
        EventStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Pending => "pending",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::Pending => "Pending",
            EventStatus::Completed => "Completed",
            EventStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

/// Stage of the customer relationship the event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    #[default]
    Communication,
    Proposal,
    Negotiation,
    Closing,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::Communication,
        Phase::Proposal,
        Phase::Negotiation,
        Phase::Closing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Communication => "communication",
            Phase::Proposal => "proposal",
            Phase::Negotiation => "negotiation",
            Phase::Closing => "closing",
        }
    }
}

/// Parse by matching the lowercase input against each variant's wire name.
fn parse_variant<T: Copy>(s: &str, all: &[T], name: fn(&T) -> &'static str, what: &str) -> Result<T, CrmError> {
    let wanted = s.trim().to_lowercase();
    all.iter()
        .find(|v| name(v) == wanted)
        .copied()
        .ok_or_else(|| {
            let valid: Vec<_> = all.iter().map(name).collect();
            CrmError::Parse(format!("unknown {} '{}' (expected one of: {})", what, s, valid.join(", ")))
        })
}

impl FromStr for EventType {
    type Err = CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, &EventType::ALL, EventType::as_str, "event type")
    }
}

impl FromStr for EventStatus {
    type Err = CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, &EventStatus::ALL, EventStatus::as_str, "status")
    }
}

impl FromStr for Priority {
    type Err = CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, &Priority::ALL, Priority::as_str, "priority")
    }
}

impl FromStr for Phase {
    type Err = CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, &Phase::ALL, Phase::as_str, "phase")
    }
}
