//! Engine-wide timing and layout constants.
//! Keeping them in a single place makes it easier to tweak magic numbers.

use std::time::Duration;

/// How long a pin's entrance transition runs.
pub const PIN_ENTER: Duration = Duration::from_millis(300);

/// How long a pin's exit transition runs; the node detaches only after
/// this much time has elapsed since `remove` was called.
pub const PIN_EXIT: Duration = Duration::from_millis(400);

/// Vertical offset (pixels) a pin starts above its anchor before the
/// entrance transition drops it into place, and drifts up to on exit.
pub const PIN_RISE: f64 = 14.0;

/// Tooltip auto-hide dwell on touch devices (touch has no leave event).
pub const TOOLTIP_DWELL: Duration = Duration::from_millis(1400);

/// Offset of the tooltip from the pointer position.
pub const TOOLTIP_OFFSET: (f64, f64) = (12.0, -28.0);
