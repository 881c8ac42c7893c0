use anyhow::{Context, Result};
use crm_core::editor::ListField;
use crm_core::store::EventStore;
use owo_colors::OwoColorize;

use crate::EventFields;

pub fn run<S: EventStore>(
    store: &mut S,
    id: &str,
    title: Option<String>,
    fields: EventFields,
    mut remove_refs: Vec<usize>,
) -> Result<()> {
    let mut screen = super::screen_for_event(store, id)?;
    screen.open_editor(Some(id))?;

    let editor = screen.editor_mut().context("Editor did not open")?;

    // Highest index first so earlier removals don't shift later ones
    remove_refs.sort_unstable_by(|a, b| b.cmp(a));
    remove_refs.dedup();
    for index in remove_refs {
        if editor.remove_item(ListField::ReferenceCodes, index).is_none() {
            anyhow::bail!("No reference code at position {}", index);
        }
    }

    if let Some(title) = title {
        editor.draft.title = title;
    }
    super::apply_fields(editor, fields)?;

    let event = screen.submit_editor(store)?;
    println!("{}", format!("  Updated: {}", event.title).green());

    Ok(())
}
