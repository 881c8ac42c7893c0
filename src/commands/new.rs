use anyhow::Result;
use chrono::{DateTime, Utc};
use crm_core::screen::CalendarScreen;
use crm_core::store::EventStore;
use crm_core::view::ViewMode;
use crm_core::{EventType, Priority};
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;

use crate::EventFields;

pub fn run<S: EventStore>(store: &mut S, title: Option<String>, mut fields: EventFields) -> Result<()> {
    let interactive = title.is_none();

    // --- Title ---
    let title = match title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  Title")
            .interact_text()?,
    };

    // --- When ---
    let date_time = match fields.at.take() {
        Some(at) => super::parse_when(&at)?,
        None if interactive => prompt_when()?,
        None => super::parse_when(&super::today().to_string())?,
    };

    if interactive {
        prompt_details(&mut fields)?;
    }

    let mut screen = CalendarScreen::new(date_time.date_naive(), ViewMode::Day);
    screen.load(store)?;
    screen.open_editor(None)?;

    if let Some(editor) = screen.editor_mut() {
        editor.draft.title = title;
        editor.draft.date_time = date_time;
        super::apply_fields(editor, fields)?;
    }

    let event = screen.submit_editor(store)?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created: {} ({})", event.title, event.id).green());

    Ok(())
}

/// Prompt until the input parses.
fn prompt_when() -> Result<DateTime<Utc>> {
    loop {
        let input: String = Input::new()
            .with_prompt("  When? (YYYY-MM-DD [HH:MM])")
            .interact_text()?;
        match super::parse_when(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// Ask for type, priority, contact and notes unless given as flags.
fn prompt_details(fields: &mut EventFields) -> Result<()> {
    if fields.event_type.is_none() {
        let labels: Vec<_> = EventType::ALL.iter().map(|t| t.label()).collect();
        let selection = Select::new()
            .with_prompt("  Type")
            .items(&labels)
            .default(0)
            .interact()?;
        fields.event_type = Some(EventType::ALL[selection].as_str().to_string());
    }

    if fields.priority.is_none() {
        let labels: Vec<_> = Priority::ALL.iter().map(|p| p.label()).collect();
        let default = Priority::ALL
            .iter()
            .position(|p| *p == Priority::default())
            .unwrap_or(0);
        let selection = Select::new()
            .with_prompt("  Priority")
            .items(&labels)
            .default(default)
            .interact()?;
        fields.priority = Some(Priority::ALL[selection].as_str().to_string());
    }

    if fields.contact.is_none() {
        fields.contact = optional_input("  Client contact? (skip)")?;
    }

    if fields.notes.is_none() {
        fields.notes = optional_input("  Notes? (skip)")?;
    }

    Ok(())
}

fn optional_input(prompt: &str) -> Result<Option<String>> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .default(String::new())
        .show_default(false)
        .interact_text()?;
    Ok(if value.is_empty() { None } else { Some(value) })
}
