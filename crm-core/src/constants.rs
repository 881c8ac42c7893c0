//! Shared thresholds and defaults.

/// How long a press must be held before quick actions open.
pub const LONG_PRESS_MS: u64 = 500;

/// Two taps closer together than this open the editor.
pub const DOUBLE_TAP_MS: u64 = 300;

/// Horizontal travel needed to resolve a swipe on an event card.
pub const SWIPE_THRESHOLD: f64 = 100.0;

/// Horizontal travel after which a press is treated as a drag and the
/// long-press timer is disarmed.
pub const SWIPE_SLOP: f64 = 10.0;

/// Upper bound (exclusive) of the vertical pull that flags "pulling".
pub const PULL_THRESHOLD: f64 = 100.0;

/// Characters of the notes shown on an event card.
pub const NOTE_EXCERPT_CHARS: usize = 60;

/// Placeholder duration of a pull-to-refresh reload.
pub const DEFAULT_REFRESH_DELAY_MS: u64 = 1000;

/// Maximum number of products requested from WooCommerce in one call.
pub const WOO_PAGE_SIZE: u32 = 100;

pub const DEFAULT_SERVER_PORT: u16 = 4096;
