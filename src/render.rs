//! TUI rendering traits for crm types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to crm-core types using owo_colors.

use chrono::{Datelike, NaiveDate};
use crm_core::product::Product;
use crm_core::view::{CalendarView, DayColumn, EventCard, ViewMode};
use crm_core::{EventStatus, Priority};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Priority {
    fn render(&self) -> String {
        let badge = format!("[{}]", self.label());
        match self {
            Priority::High => badge.red().to_string(),
            Priority::Medium => badge.yellow().to_string(),
            Priority::Low => badge.green().to_string(),
        }
    }
}

impl Render for EventStatus {
    fn render(&self) -> String {
        match self {
            EventStatus::Pending => self.label().dimmed().to_string(),
            EventStatus::Completed => format!("✓ {}", self.label()).green().to_string(),
            EventStatus::Cancelled => format!("✗ {}", self.label()).red().to_string(),
        }
    }
}

impl Render for EventCard {
    fn render(&self) -> String {
        let title = if self.status == EventStatus::Completed {
            self.title.strikethrough().to_string()
        } else {
            self.title.bold().to_string()
        };
        let reminder = if self.reminder { " 🔔" } else { "" };

        let mut lines = vec![format!(
            "  {} {} {} {}{}",
            self.time.cyan(),
            self.priority.render(),
            format!("({})", self.event_type.label()).blue(),
            title,
            reminder
        )];

        if let Some(contact) = &self.contact {
            lines.push(format!("        {} {}", "contact:".dimmed(), contact));
        }
        if let Some(note) = &self.note_excerpt {
            lines.push(format!("        {}", note.italic()));
        }
        lines.push(format!("        {} {}", self.status.render(), self.id.dimmed()));

        lines.join("\n")
    }
}

impl Render for DayColumn {
    fn render(&self) -> String {
        let mut lines = vec![format_date_label(self.date).bold().to_string()];

        if self.cards.is_empty() {
            lines.push(format!("  {}", "No events".dimmed()));
        } else {
            lines.extend(self.cards.iter().map(|card| card.render()));
        }

        lines.join("\n")
    }
}

impl Render for CalendarView {
    fn render(&self) -> String {
        match self.mode {
            ViewMode::Day | ViewMode::Week => self
                .days
                .iter()
                .map(|day| day.render())
                .collect::<Vec<_>>()
                .join("\n\n"),
            ViewMode::Month => render_month(self),
        }
    }
}

/// Month grid with per-day counts, followed by the days that have events
fn render_month(view: &CalendarView) -> String {
    let mut lines = vec![
        view.anchor.format("%B %Y").to_string().bold().to_string(),
        "  Mo  Tu  We  Th  Fr  Sa  Su".dimmed().to_string(),
    ];

    let leading = view
        .days
        .first()
        .map(|d| d.date.weekday().num_days_from_monday() as usize)
        .unwrap_or(0);

    let mut cells: Vec<String> = vec!["    ".to_string(); leading];
    for day in &view.days {
        let cell = format!("{:>4}", day.date.day());
        cells.push(if day.cards.is_empty() {
            cell
        } else {
            cell.bold().yellow().to_string()
        });
    }
    for week in cells.chunks(7) {
        lines.push(week.concat());
    }

    let busy: Vec<_> = view.days.iter().filter(|d| !d.cards.is_empty()).collect();
    if !busy.is_empty() {
        lines.push(String::new());
        lines.extend(busy.iter().map(|day| day.render()));
    }

    lines.join("\n")
}

impl Render for Product {
    fn render(&self) -> String {
        let sku = if self.sku.is_empty() { "-" } else { self.sku.as_str() };
        let price = if self.price.is_empty() { "-" } else { self.price.as_str() };
        format!(
            "  {} {} {} {} {}",
            format!("#{}", self.id).dimmed(),
            self.name.bold(),
            format!("[{}]", sku).cyan(),
            price.green(),
            format!("{} · {}", self.categories.join(", "), self.status).dimmed()
        )
    }
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn format_date_label(date: NaiveDate) -> String {
    let today = crate::commands::today();

    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}
