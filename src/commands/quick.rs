use anyhow::Result;
use crm_core::screen::QuickAction;
use crm_core::store::EventStore;
use owo_colors::OwoColorize;

pub fn run<S: EventStore>(store: &mut S, id: &str, action: QuickAction) -> Result<()> {
    let mut screen = super::screen_for_event(store, id)?;
    let title = screen
        .events()
        .iter()
        .find(|e| e.id == id)
        .map(|e| e.title.clone())
        .unwrap_or_else(|| id.to_string());

    screen.open_quick_actions(id)?;
    screen.apply_quick_action(action, store)?;

    let message = match action {
        QuickAction::Complete => format!("  Completed: {}", title),
        QuickAction::Remind => format!("  Reminder on: {}", title),
        QuickAction::Delete => format!("  Deleted: {}", title),
        QuickAction::Edit => format!("  Use `crm edit {}` to change fields", id),
    };
    println!("{}", message.green());

    Ok(())
}
