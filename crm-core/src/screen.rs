//! Calendar screen controller.
//!
//! Ties the pieces together: events loaded from an `EventStore` for the
//! current window, narrowed by the filter, projected by the view, and
//! changed through gesture actions, quick actions and the editor.

use std::time::Duration;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_REFRESH_DELAY_MS;
use crate::editor::EventEditor;
use crate::error::{CrmError, CrmResult};
use crate::event::{CalendarEvent, EventStatus};
use crate::filter::{FilterState, filter_events};
use crate::gesture::{GestureAction, GestureRecognizer};
use crate::store::EventStore;
use crate::view::{CalendarView, ViewMode, project};

/// Shortcuts offered by the quick-actions sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuickAction {
    Complete,
    Edit,
    Remind,
    Delete,
}

pub struct CalendarScreen {
    events: Vec<CalendarEvent>,
    selected_date: NaiveDate,
    mode: ViewMode,
    filter: FilterState,
    gestures: GestureRecognizer,
    quick_actions: Option<String>,
    editor: Option<EventEditor>,
    refresh_delay: Duration,
}

impl CalendarScreen {
    pub fn new(selected_date: NaiveDate, mode: ViewMode) -> Self {
        CalendarScreen {
            events: Vec::new(),
            selected_date,
            mode,
            filter: FilterState::default(),
            gestures: GestureRecognizer::new(),
            quick_actions: None,
            editor: None,
            refresh_delay: Duration::from_millis(DEFAULT_REFRESH_DELAY_MS),
        }
    }

    pub fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = delay;
        self
    }

    /// Reload the events of the current window from `store`.
    pub fn load<S: EventStore>(&mut self, store: &S) -> CrmResult<()> {
        let range = self.mode.range(self.selected_date);
        self.events = store.events_in_range(&range)?;
        tracing::debug!(mode = %self.mode, date = %self.selected_date, count = self.events.len(), "loaded events");
        Ok(())
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    /// Changing the day or mode needs a `load` to pick up the new window.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut FilterState {
        &mut self.filter
    }

    /// Filtered events of the selected day.
    pub fn visible_events(&self) -> Vec<&CalendarEvent> {
        filter_events(&self.events, self.selected_date, &self.filter)
    }

    pub fn view(&self) -> CalendarView {
        project(&self.events, self.selected_date, self.mode, &self.filter)
    }

    pub fn gestures(&self) -> &GestureRecognizer {
        &self.gestures
    }

    pub fn gestures_mut(&mut self) -> &mut GestureRecognizer {
        &mut self.gestures
    }

    pub fn is_refreshing(&self) -> bool {
        self.gestures.is_refreshing()
    }

    // =========================================================================
    // Gesture actions
    // =========================================================================

    pub async fn dispatch<S: EventStore>(&mut self, action: GestureAction, store: &mut S) -> CrmResult<()> {
        match action {
            GestureAction::OpenQuickActions(id) => self.open_quick_actions(&id),
            GestureAction::MarkCompleted(id) => self.set_status(&id, EventStatus::Completed, store),
            GestureAction::OpenEditor(id) => self.open_editor(Some(&id)),
            GestureAction::Refresh => self.refresh(&*store).await,
        }
    }

    /// Reload after the placeholder delay. Refreshing and pulling are
    /// cleared whether or not the reload succeeds.
    /// Dropping the future mid-delay also clears them.
    pub async fn refresh<S: EventStore>(&mut self, store: &S) -> CrmResult<()> {
        let delay = self.refresh_delay;
        let mut guard = SettleRefresh(self);

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let result = guard.0.load(store);
        drop(guard);

        if let Err(e) = &result {
            tracing::warn!(error = %e, "refresh failed");
        }
        result
    }

    // =========================================================================
    // Quick actions
    // =========================================================================

    pub fn open_quick_actions(&mut self, id: &str) -> CrmResult<()> {
        self.find(id)?;
        self.quick_actions = Some(id.to_string());
        Ok(())
    }

    pub fn quick_actions_for(&self) -> Option<&str> {
        self.quick_actions.as_deref()
    }

    pub fn close_quick_actions(&mut self) {
        self.quick_actions = None;
    }

    /// Apply `action` to the event the sheet is open for, closing the sheet.
    pub fn apply_quick_action<S: EventStore>(&mut self, action: QuickAction, store: &mut S) -> CrmResult<()> {
        let id = self
            .quick_actions
            .take()
            .ok_or_else(|| CrmError::Validation("quick actions are not open".into()))?;

        match action {
            QuickAction::Complete => self.set_status(&id, EventStatus::Completed, store),
            QuickAction::Edit => self.open_editor(Some(&id)),
            QuickAction::Remind => self.update(&id, store, |event| event.reminder = true),
            QuickAction::Delete => {
                if !store.delete(&id)? {
                    return Err(CrmError::EventNotFound(id));
                }
                self.events.retain(|e| e.id != id);
                tracing::info!(event = %id, "deleted event");
                Ok(())
            }
        }
    }

    // =========================================================================
    // Editor
    // =========================================================================

    pub fn editor(&self) -> Option<&EventEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut EventEditor> {
        self.editor.as_mut()
    }

    /// Open the editor on an existing event, or blank at noon of the
    /// selected day.
    pub fn open_editor(&mut self, id: Option<&str>) -> CrmResult<()> {
        let editor = match id {
            Some(id) => EventEditor::edit(self.find(id)?),
            None => {
                let noon = self
                    .selected_date
                    .and_hms_opt(12, 0, 0)
                    .map(|dt| dt.and_utc())
                    .unwrap_or_else(Utc::now);
                EventEditor::create(noon)
            }
        };
        self.editor = Some(editor);
        Ok(())
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Submit the open editor, persisting the record it produces. The
    /// editor stays open when validation fails.
    pub fn submit_editor<S: EventStore>(&mut self, store: &mut S) -> CrmResult<CalendarEvent> {
        let editor = self
            .editor
            .as_ref()
            .ok_or_else(|| CrmError::Validation("editor is not open".into()))?;

        let mut submitted = None;
        editor.submit(|event| submitted = Some(event))?;
        let event = submitted.ok_or_else(|| CrmError::Validation("editor produced no event".into()))?;

        store.save(&event)?;
        self.upsert_local(event.clone());
        self.editor = None;

        tracing::info!(event = %event.id, "saved event from editor");
        Ok(event)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn find(&self, id: &str) -> CrmResult<&CalendarEvent> {
        self.events
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| CrmError::EventNotFound(id.to_string()))
    }

    fn set_status<S: EventStore>(&mut self, id: &str, status: EventStatus, store: &mut S) -> CrmResult<()> {
        self.update(id, store, |event| event.status = status)
    }

    fn update<S, F>(&mut self, id: &str, store: &mut S, change: F) -> CrmResult<()>
    where
        S: EventStore,
        F: FnOnce(&mut CalendarEvent),
    {
        let mut event = self.find(id)?.clone();
        change(&mut event);
        store.save(&event)?;
        self.upsert_local(event);
        Ok(())
    }

    fn upsert_local(&mut self, event: CalendarEvent) {
        let in_window = self.mode.range(self.selected_date).contains(&event.date_time);
        let position = self.events.iter().position(|e| e.id == event.id);

        match (position, in_window) {
            (Some(i), true) => self.events[i] = event,
            (Some(i), false) => {
                self.events.remove(i);
            }
            (None, true) => self.events.push(event),
            (None, false) => {}
        }
    }
}

/// Settles the pull-to-refresh state when dropped.
struct SettleRefresh<'a>(&'a mut CalendarScreen);

impl Drop for SettleRefresh<'_> {
    fn drop(&mut self) {
        self.0.gestures.refresh_settled();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{Point, TouchId};
    use crate::store::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
    }

    fn event(id: &str, d: u32) -> CalendarEvent {
        CalendarEvent::new(id, format!("Event {id}"), Utc.with_ymd_and_hms(2025, 3, d, 10, 0, 0).unwrap())
    }

    fn setup() -> (CalendarScreen, MemoryStore) {
        let store = MemoryStore::new(vec![event("a", 20), event("b", 20), event("c", 22)]);
        let mut screen = CalendarScreen::new(day(), ViewMode::Day).with_refresh_delay(Duration::ZERO);
        screen.load(&store).unwrap();
        (screen, store)
    }

    #[test]
    fn test_load_uses_window_of_current_mode() {
        let (mut screen, store) = setup();
        assert_eq!(screen.events().len(), 2);

        screen.set_mode(ViewMode::Week);
        screen.load(&store).unwrap();
        assert_eq!(screen.events().len(), 3);
        assert_eq!(screen.visible_events().len(), 2);
    }

    #[tokio::test]
    async fn test_swipe_right_persists_completion() {
        let (mut screen, mut store) = setup();

        let gestures = screen.gestures_mut();
        gestures.press(TouchId(1), "a", 0, Point::new(50.0, 50.0));
        let action = gestures.moved(TouchId(1), 60, Point::new(200.0, 55.0)).unwrap();
        screen.dispatch(action, &mut store).await.unwrap();

        assert_eq!(store.get("a").unwrap().unwrap().status, EventStatus::Completed);
        assert!(screen.events().iter().any(|e| e.id == "a" && e.is_completed()));
    }

    #[tokio::test]
    async fn test_long_press_then_delete_removes_everywhere() {
        let (mut screen, mut store) = setup();

        screen.gestures_mut().press(TouchId(1), "b", 0, Point::new(50.0, 50.0));
        let actions = screen.gestures_mut().poll(500);
        assert_eq!(actions, vec![GestureAction::OpenQuickActions("b".into())]);
        screen.dispatch(actions[0].clone(), &mut store).await.unwrap();
        assert_eq!(screen.quick_actions_for(), Some("b"));

        screen.apply_quick_action(QuickAction::Delete, &mut store).unwrap();
        assert!(store.get("b").unwrap().is_none());
        assert_eq!(screen.visible_events().len(), 1);
        assert_eq!(screen.quick_actions_for(), None);
    }

    #[tokio::test]
    async fn test_remind_sets_flag() {
        let (mut screen, mut store) = setup();
        screen
            .dispatch(GestureAction::OpenQuickActions("a".into()), &mut store)
            .await
            .unwrap();
        screen.apply_quick_action(QuickAction::Remind, &mut store).unwrap();
        assert!(store.get("a").unwrap().unwrap().reminder);
    }

    #[test]
    fn test_quick_action_without_open_sheet_fails() {
        let (mut screen, mut store) = setup();
        assert!(screen.apply_quick_action(QuickAction::Complete, &mut store).is_err());
    }

    #[tokio::test]
    async fn test_double_tap_opens_editor_and_submit_saves() {
        let (mut screen, mut store) = setup();

        for t in [0, 150] {
            let gestures = screen.gestures_mut();
            gestures.press(TouchId(7), "a", t, Point::new(10.0, 10.0));
            if let Some(action) = gestures.release(TouchId(7), t + 30) {
                screen.dispatch(action, &mut store).await.unwrap();
            }
        }

        let editor = screen.editor_mut().expect("editor should be open");
        editor.draft.title = "Renamed".into();
        let saved = screen.submit_editor(&mut store).unwrap();

        assert_eq!(saved.id, "a");
        assert_eq!(store.get("a").unwrap().unwrap().title, "Renamed");
        assert!(screen.editor().is_none());
    }

    #[test]
    fn test_new_event_from_editor_lands_on_selected_day() {
        let (mut screen, mut store) = setup();
        screen.open_editor(None).unwrap();
        screen.editor_mut().unwrap().draft.title = "Kickoff".into();

        let saved = screen.submit_editor(&mut store).unwrap();
        assert_eq!(saved.date(), day());
        assert_eq!(screen.visible_events().len(), 3);
    }

    #[test]
    fn test_invalid_editor_stays_open() {
        let (mut screen, mut store) = setup();
        screen.open_editor(None).unwrap();
        assert!(screen.submit_editor(&mut store).is_err());
        assert!(screen.editor().is_some());
    }

    #[tokio::test]
    async fn test_pull_to_refresh_reloads_and_settles() {
        let (mut screen, mut store) = setup();
        store.save(&event("d", 20)).unwrap();

        let gestures = screen.gestures_mut();
        gestures.pull_start(0.0, 0.0);
        gestures.pull_move(50.0);
        let action = gestures.pull_release().unwrap();
        assert!(screen.is_refreshing());

        // A second pull while the first is in flight does nothing
        let gestures = screen.gestures_mut();
        gestures.pull_start(0.0, 0.0);
        gestures.pull_move(50.0);
        assert_eq!(gestures.pull_release(), None);

        screen.dispatch(action, &mut store).await.unwrap();
        assert!(!screen.is_refreshing());
        assert_eq!(screen.events().len(), 3);
    }

    #[tokio::test]
    async fn test_abandoned_refresh_still_settles() {
        let (screen, mut store) = setup();
        let mut screen = screen.with_refresh_delay(Duration::from_secs(60));

        let gestures = screen.gestures_mut();
        gestures.pull_start(0.0, 0.0);
        gestures.pull_move(50.0);
        let action = gestures.pull_release().unwrap();
        assert!(screen.is_refreshing());

        let pending = screen.dispatch(action, &mut store);
        assert!(tokio::time::timeout(Duration::from_millis(10), pending).await.is_err());
        assert!(!screen.is_refreshing());

        let gestures = screen.gestures_mut();
        gestures.pull_start(0.0, 0.0);
        gestures.pull_move(50.0);
        assert_eq!(gestures.pull_release(), Some(GestureAction::Refresh));
    }

    #[tokio::test]
    async fn test_unknown_event_is_reported() {
        let (mut screen, mut store) = setup();
        let result = screen
            .dispatch(GestureAction::MarkCompleted("missing".into()), &mut store)
            .await;
        assert!(matches!(result, Err(CrmError::EventNotFound(_))));
    }
}
