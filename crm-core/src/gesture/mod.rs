//! Gesture recognition for the calendar screen.
//!
//! Touch input arrives as press / move / release calls stamped with a
//! monotonic millisecond clock supplied by the caller. Timers are deadlines
//! checked on `poll`, so nothing here owns a thread or a runtime.
//!
//! Per touch sequence exactly one gesture wins:
//! - long-press (500 ms held) opens quick actions
//! - swipe right past 100 units marks the event completed
//! - swipe left past 100 units opens quick actions
//! - a plain tap released within 300 ms of the previous tap opens the editor
//!
//! Pull-to-refresh is tracked separately for the list container.

mod pull;
mod sequence;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::DOUBLE_TAP_MS;

pub use pull::PullToRefresh;
pub use sequence::{Release, Resolution, SequenceState, TouchSequence};

/// Milliseconds on the caller's monotonic clock
pub type Millis = u64;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Identifies one finger's press..release sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TouchId(pub u64);

/// Semantic action produced by a recognized gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureAction {
    OpenQuickActions(String),
    MarkCompleted(String),
    OpenEditor(String),
    Refresh,
}

#[derive(Debug, Default)]
pub struct GestureRecognizer {
    sequences: BTreeMap<TouchId, TouchSequence>,
    last_tap: Option<Millis>,
    pull: PullToRefresh,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finger down on an event card. A press reusing a live touch id
    /// replaces the old sequence.
    pub fn press(&mut self, touch: TouchId, event_id: &str, at: Millis, point: Point) {
        self.sequences.insert(touch, TouchSequence::press(event_id, at, point));
    }

    pub fn moved(&mut self, touch: TouchId, at: Millis, point: Point) -> Option<GestureAction> {
        self.sequences.get_mut(&touch)?.moved(at, point)
    }

    /// Fire every long-press whose deadline has passed.
    pub fn poll(&mut self, now: Millis) -> Vec<GestureAction> {
        self.sequences
            .values_mut()
            .filter_map(|seq| seq.poll(now))
            .collect()
    }

    pub fn release(&mut self, touch: TouchId, at: Millis) -> Option<GestureAction> {
        let sequence = self.sequences.remove(&touch)?;
        let event_id = sequence.event_id().to_string();

        match sequence.release(at) {
            Release::Tap => match self.last_tap.take() {
                Some(previous) if at.saturating_sub(previous) < DOUBLE_TAP_MS => {
                    tracing::debug!(event = %event_id, "double-tap");
                    Some(GestureAction::OpenEditor(event_id))
                }
                _ => {
                    self.last_tap = Some(at);
                    None
                }
            },
            Release::LongPress(action) => {
                self.last_tap = None;
                Some(action)
            }
            Release::Ignored => {
                self.last_tap = None;
                None
            }
        }
    }

    /// Drop a sequence without interpreting it (e.g. the card scrolled away).
    pub fn cancel(&mut self, touch: TouchId) {
        self.sequences.remove(&touch);
    }

    pub fn sequence(&self, touch: TouchId) -> Option<&TouchSequence> {
        self.sequences.get(&touch)
    }

    pub fn active_sequences(&self) -> usize {
        self.sequences.len()
    }

    // =========================================================================
    // Pull-to-refresh
    // =========================================================================

    pub fn pull_start(&mut self, y: f64, scroll_top: f64) {
        self.pull.start(y, scroll_top);
    }

    pub fn pull_move(&mut self, y: f64) {
        self.pull.moved(y);
    }

    pub fn pull_release(&mut self) -> Option<GestureAction> {
        self.pull.release().then_some(GestureAction::Refresh)
    }

    pub fn refresh_settled(&mut self) {
        self.pull.settle();
    }

    pub fn is_pulling(&self) -> bool {
        self.pull.is_pulling()
    }

    pub fn is_refreshing(&self) -> bool {
        self.pull.is_refreshing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD_A: TouchId = TouchId(1);
    const CARD_B: TouchId = TouchId(2);

    fn at(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn tap(rec: &mut GestureRecognizer, touch: TouchId, event: &str, t: Millis) -> Option<GestureAction> {
        rec.press(touch, event, t, at(100.0, 100.0));
        rec.release(touch, t + 40)
    }

    #[test]
    fn test_release_before_threshold_never_opens_quick_actions() {
        let mut rec = GestureRecognizer::new();
        rec.press(CARD_A, "evt-a", 0, at(100.0, 100.0));
        assert!(rec.poll(499).is_empty());
        assert_eq!(rec.release(CARD_A, 499), None);
        assert!(rec.poll(10_000).is_empty());
    }

    #[test]
    fn test_sustained_press_opens_quick_actions_exactly_once() {
        let mut rec = GestureRecognizer::new();
        rec.press(CARD_A, "evt-a", 0, at(100.0, 100.0));

        assert_eq!(rec.poll(500), vec![GestureAction::OpenQuickActions("evt-a".into())]);
        assert!(rec.poll(800).is_empty());
        assert_eq!(rec.release(CARD_A, 900), None);
    }

    #[test]
    fn test_unpolled_deadline_fires_on_release() {
        let mut rec = GestureRecognizer::new();
        rec.press(CARD_A, "evt-a", 0, at(100.0, 100.0));
        assert_eq!(
            rec.release(CARD_A, 700),
            Some(GestureAction::OpenQuickActions("evt-a".into()))
        );
    }

    #[test]
    fn test_double_tap_opens_editor_once_per_pair() {
        let mut rec = GestureRecognizer::new();
        assert_eq!(tap(&mut rec, CARD_A, "evt-a", 0), None);
        assert_eq!(
            tap(&mut rec, CARD_A, "evt-a", 200),
            Some(GestureAction::OpenEditor("evt-a".into()))
        );
        // Third quick tap starts a new pair instead of re-triggering
        assert_eq!(tap(&mut rec, CARD_A, "evt-a", 400), None);
    }

    #[test]
    fn test_double_tap_across_cards_opens_second_card() {
        let mut rec = GestureRecognizer::new();
        tap(&mut rec, CARD_A, "evt-a", 0);
        assert_eq!(
            tap(&mut rec, CARD_B, "evt-b", 150),
            Some(GestureAction::OpenEditor("evt-b".into()))
        );
    }

    #[test]
    fn test_taps_spaced_out_never_open_editor() {
        let mut rec = GestureRecognizer::new();
        // Releases at 40, 340, 640: exactly 300 ms apart
        for t in [0, 300, 600] {
            assert_eq!(tap(&mut rec, CARD_A, "evt-a", t), None);
        }
    }

    #[test]
    fn test_swipe_right_marks_completed() {
        let mut rec = GestureRecognizer::new();
        rec.press(CARD_A, "evt-a", 0, at(100.0, 100.0));
        assert_eq!(
            rec.moved(CARD_A, 80, at(250.0, 100.0)),
            Some(GestureAction::MarkCompleted("evt-a".into()))
        );
        // Resolved: no long-press and no tap afterwards
        assert!(rec.poll(600).is_empty());
        assert_eq!(rec.release(CARD_A, 650), None);
    }

    #[test]
    fn test_swipe_left_opens_quick_actions() {
        let mut rec = GestureRecognizer::new();
        rec.press(CARD_A, "evt-a", 0, at(300.0, 100.0));
        assert_eq!(
            rec.moved(CARD_A, 80, at(150.0, 100.0)),
            Some(GestureAction::OpenQuickActions("evt-a".into()))
        );
    }

    #[test]
    fn test_vertical_dominant_move_resolves_nothing() {
        let mut rec = GestureRecognizer::new();
        rec.press(CARD_A, "evt-a", 0, at(100.0, 100.0));
        assert_eq!(rec.moved(CARD_A, 80, at(150.0, 180.0)), None);
        assert!(matches!(
            rec.sequence(CARD_A).map(|s| s.state()),
            Some(SequenceState::LongPressArmed { .. })
        ));
    }

    #[test]
    fn test_swipe_resolution_clears_pending_tap() {
        let mut rec = GestureRecognizer::new();
        tap(&mut rec, CARD_A, "evt-a", 0);

        rec.press(CARD_A, "evt-a", 100, at(100.0, 100.0));
        rec.moved(CARD_A, 120, at(260.0, 100.0));
        rec.release(CARD_A, 140);

        assert_eq!(tap(&mut rec, CARD_A, "evt-a", 160), None);
    }

    #[test]
    fn test_concurrent_touches_keep_separate_timers() {
        let mut rec = GestureRecognizer::new();
        rec.press(CARD_A, "evt-a", 0, at(100.0, 100.0));
        rec.press(CARD_B, "evt-b", 300, at(100.0, 400.0));

        assert_eq!(rec.release(CARD_B, 400), None);
        assert_eq!(rec.poll(500), vec![GestureAction::OpenQuickActions("evt-a".into())]);
        assert_eq!(rec.active_sequences(), 1);
    }

    #[test]
    fn test_pull_to_refresh_is_serialized() {
        let mut rec = GestureRecognizer::new();
        rec.pull_start(0.0, 0.0);
        rec.pull_move(50.0);
        assert!(rec.is_pulling());
        assert_eq!(rec.pull_release(), Some(GestureAction::Refresh));
        assert!(rec.is_refreshing());

        rec.pull_start(0.0, 0.0);
        rec.pull_move(50.0);
        assert_eq!(rec.pull_release(), None);

        rec.refresh_settled();
        assert!(!rec.is_refreshing());
    }
}
