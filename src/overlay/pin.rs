use crate::core::{geometry::Point, palette::Color, province::ProvinceId};
use crate::prelude::{Duration, Instant};

/// Cubic ease-out for pin transitions
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) - 1.0;
    t * t * t + 1.0
}

/// Lifecycle phase of a pin.
///
/// A freshly added pin sits in `Staged` until the next frame commits its
/// initial style (offset above the anchor, opacity zero); only then does
/// the entrance transition start. Skipping that commit frame would drop
/// the entrance animation entirely, so the two steps are explicit states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinPhase {
    /// Created; initial style not yet committed.
    Staged,
    /// Entrance transition running since the given instant.
    Entering { since: Instant },
    /// At rest on its anchor, fully opaque.
    Settled,
    /// Exit transition running; detaches once the exit duration elapses.
    Leaving { since: Instant },
}

/// A marker overlay anchored to a visited province's shape.
#[derive(Debug, Clone)]
pub struct Pin {
    province: ProvinceId,
    color: Color,
    anchor: Point,
    phase: PinPhase,
    enter: Duration,
    exit: Duration,
    rise: f64,
}

impl Pin {
    pub fn new(
        province: ProvinceId,
        color: Color,
        anchor: Point,
        enter: Duration,
        exit: Duration,
        rise: f64,
    ) -> Self {
        Self {
            province,
            color,
            anchor,
            phase: PinPhase::Staged,
            enter,
            exit,
            rise,
        }
    }

    pub fn province(&self) -> &ProvinceId {
        &self.province
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Instantaneous anchor update (no animation), used on reposition.
    pub fn set_anchor(&mut self, anchor: Point) {
        self.anchor = anchor;
    }

    pub fn phase(&self) -> PinPhase {
        self.phase
    }

    pub fn is_leaving(&self) -> bool {
        matches!(self.phase, PinPhase::Leaving { .. })
    }

    /// Whether the exit transition has fully elapsed and the node may be
    /// detached from the overlay.
    pub fn is_detachable(&self, now: Instant) -> bool {
        match self.phase {
            PinPhase::Leaving { since } => now.duration_since(since) >= self.exit,
            _ => false,
        }
    }

    /// Starts the exit transition. No-op if already leaving.
    pub fn begin_exit(&mut self, now: Instant) {
        if !self.is_leaving() {
            self.phase = PinPhase::Leaving { since: now };
        }
    }

    /// Cancels a pending detach and animates the pin back in. The node is
    /// reused rather than duplicated.
    pub fn cancel_exit(&mut self, now: Instant) {
        if self.is_leaving() {
            self.phase = PinPhase::Entering { since: now };
        }
    }

    /// Advances the phase machine by one frame.
    pub fn frame(&mut self, now: Instant) {
        match self.phase {
            PinPhase::Staged => {
                // Initial style committed; the transition may start.
                self.phase = PinPhase::Entering { since: now };
            }
            PinPhase::Entering { since } => {
                if now.duration_since(since) >= self.enter {
                    self.phase = PinPhase::Settled;
                }
            }
            PinPhase::Settled | PinPhase::Leaving { .. } => {}
        }
    }

    /// Current rendered position and opacity, derived from the phase.
    pub fn render_state(&self, now: Instant) -> (Point, f64) {
        match self.phase {
            PinPhase::Staged => (Point::new(self.anchor.x, self.anchor.y - self.rise), 0.0),
            PinPhase::Entering { since } => {
                let t = ease_out_cubic(self.progress(since, self.enter, now));
                (
                    Point::new(self.anchor.x, self.anchor.y - self.rise * (1.0 - t)),
                    t,
                )
            }
            PinPhase::Settled => (self.anchor, 1.0),
            PinPhase::Leaving { since } => {
                let t = ease_out_cubic(self.progress(since, self.exit, now));
                (
                    Point::new(self.anchor.x, self.anchor.y - self.rise * t),
                    1.0 - t,
                )
            }
        }
    }

    fn progress(&self, since: Instant, duration: Duration, now: Instant) -> f64 {
        if duration.is_zero() {
            return 1.0;
        }
        (now.duration_since(since).as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}
