//! Pull-to-refresh tracking for the scrollable event list.

use crate::constants::PULL_THRESHOLD;

#[derive(Debug, Clone, Default)]
pub struct PullToRefresh {
    start_y: Option<f64>,
    pulling: bool,
    refreshing: bool,
}

impl PullToRefresh {
    /// Arm tracking. Only a list scrolled to the top can be pulled, and a
    /// new pull cannot start while a refresh is still in flight.
    pub fn start(&mut self, y: f64, scroll_top: f64) {
        self.pulling = false;
        self.start_y = (scroll_top <= 0.0 && !self.refreshing).then_some(y);
    }

    pub fn moved(&mut self, y: f64) {
        let Some(start) = self.start_y else {
            return;
        };
        let distance = y - start;
        if distance > 0.0 && distance < PULL_THRESHOLD {
            self.pulling = true;
        }
    }

    /// End the pull. Returns true when a refresh should start; the tracker
    /// is then refreshing until `settle` is called.
    pub fn release(&mut self) -> bool {
        let triggered = self.pulling && !self.refreshing;
        self.start_y = None;
        self.pulling = false;
        if triggered {
            self.refreshing = true;
        }
        triggered
    }

    /// The refresh finished, successfully or not.
    pub fn settle(&mut self) {
        self.refreshing = false;
        self.pulling = false;
        self.start_y = None;
    }

    pub fn is_pulling(&self) -> bool {
        self.pulling
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }
}
