//! A single touch sequence on an event card.
//!
//! Each press owns its own sequence, so the long-press deadline lives with
//! the touch that armed it. The first gesture that resolves consumes the
//! sequence: later moves, deadlines and the release are ignored for it.

use crate::constants::{LONG_PRESS_MS, SWIPE_SLOP, SWIPE_THRESHOLD};

use super::{GestureAction, Millis, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequenceState {
    /// Finger down, long-press timer armed
    LongPressArmed { fires_at: Millis },
    /// Horizontal drag in progress, long-press disarmed
    Swiping,
    /// A gesture consumed the sequence
    Resolved(Resolution),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    LongPress,
    SwipeRight,
    SwipeLeft,
}

/// What a release means for the sequence being ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Release {
    /// Nothing moved and nothing resolved: counts toward a double-tap
    Tap,
    /// The long-press deadline passed without being polled
    LongPress(GestureAction),
    /// Dragged or already resolved
    Ignored,
}

#[derive(Debug, Clone)]
pub struct TouchSequence {
    event_id: String,
    origin: Point,
    state: SequenceState,
}

impl TouchSequence {
    pub fn press(event_id: impl Into<String>, at: Millis, origin: Point) -> Self {
        TouchSequence {
            event_id: event_id.into(),
            origin,
            state: SequenceState::LongPressArmed {
                fires_at: at.saturating_add(LONG_PRESS_MS),
            },
        }
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    /// Fire the long-press if its deadline has passed.
    pub fn poll(&mut self, now: Millis) -> Option<GestureAction> {
        match self.state {
            SequenceState::LongPressArmed { fires_at } if now >= fires_at => {
                self.state = SequenceState::Resolved(Resolution::LongPress);
                Some(GestureAction::OpenQuickActions(self.event_id.clone()))
            }
            _ => None,
        }
    }

    pub fn moved(&mut self, now: Millis, to: Point) -> Option<GestureAction> {
        if let Some(action) = self.poll(now) {
            return Some(action);
        }
        if matches!(self.state, SequenceState::Resolved(_)) {
            return None;
        }

        let dx = to.x - self.origin.x;
        let dy = to.y - self.origin.y;

        // Vertical-dominant movement leaves the sequence untouched
        if dx.abs() <= dy.abs() {
            return None;
        }

        if dx > SWIPE_THRESHOLD {
            self.state = SequenceState::Resolved(Resolution::SwipeRight);
            Some(GestureAction::MarkCompleted(self.event_id.clone()))
        } else if dx < -SWIPE_THRESHOLD {
            self.state = SequenceState::Resolved(Resolution::SwipeLeft);
            Some(GestureAction::OpenQuickActions(self.event_id.clone()))
        } else {
            if dx.abs() > SWIPE_SLOP {
                self.state = SequenceState::Swiping;
            }
            None
        }
    }

    pub fn release(mut self, now: Millis) -> Release {
        if let Some(action) = self.poll(now) {
            return Release::LongPress(action);
        }
        match self.state {
            SequenceState::LongPressArmed { .. } => Release::Tap,
            SequenceState::Swiping | SequenceState::Resolved(_) => Release::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Point {
        Point::new(200.0, 300.0)
    }

    #[test]
    fn test_long_press_fires_once_at_deadline() {
        let mut seq = TouchSequence::press("evt", 1_000, origin());
        assert_eq!(seq.poll(1_499), None);
        assert_eq!(seq.poll(1_500), Some(GestureAction::OpenQuickActions("evt".into())));
        assert_eq!(seq.poll(2_000), None);
        assert_eq!(seq.state(), SequenceState::Resolved(Resolution::LongPress));
    }

    #[test]
    fn test_press_near_clock_limit_does_not_overflow() {
        let mut seq = TouchSequence::press("evt", Millis::MAX - 10, origin());
        assert_eq!(seq.poll(Millis::MAX - 1), None);
        assert_eq!(seq.poll(Millis::MAX), Some(GestureAction::OpenQuickActions("evt".into())));
    }

    #[test]
    fn test_small_horizontal_drag_disarms_long_press() {
        let mut seq = TouchSequence::press("evt", 0, origin());
        assert_eq!(seq.moved(100, Point::new(230.0, 305.0)), None);
        assert_eq!(seq.state(), SequenceState::Swiping);
        assert_eq!(seq.poll(600), None);
        assert_eq!(seq.release(700), Release::Ignored);
    }

    #[test]
    fn test_jitter_below_slop_is_still_a_tap() {
        let mut seq = TouchSequence::press("evt", 0, origin());
        seq.moved(50, Point::new(204.0, 301.0));
        assert_eq!(seq.release(120), Release::Tap);
    }

    #[test]
    fn test_swipe_after_deadline_is_consumed_by_long_press() {
        let mut seq = TouchSequence::press("evt", 0, origin());
        let action = seq.moved(650, Point::new(400.0, 300.0));
        assert_eq!(action, Some(GestureAction::OpenQuickActions("evt".into())));
        assert_eq!(seq.moved(660, Point::new(420.0, 300.0)), None);
    }
}
