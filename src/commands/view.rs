use anyhow::Result;
use crm_core::date_range::parse_date;
use crm_core::screen::CalendarScreen;
use crm_core::store::EventStore;
use crm_core::view::ViewMode;

use crate::ViewArgs;
use crate::render::Render;

pub fn run<S: EventStore>(store: &S, mode: ViewMode, args: ViewArgs) -> Result<()> {
    let date = match args.date.as_deref() {
        Some(d) => parse_date(d)?,
        None => super::today(),
    };

    let mut screen = CalendarScreen::new(date, mode);

    let filter = screen.filter_mut();
    for t in &args.types {
        filter.types.insert(t.parse()?);
    }
    for p in &args.priority {
        filter.priorities.insert(p.parse()?);
    }
    for s in &args.status {
        filter.statuses.insert(s.parse()?);
    }

    screen.load(store)?;
    println!("{}", screen.view().render());

    Ok(())
}
