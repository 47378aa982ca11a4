use crate::core::{constants, geometry::Point};
use crate::prelude::{Duration, Instant};

/// Visual options for the tooltip.
#[derive(Debug, Clone)]
pub struct TooltipOptions {
    /// Auto-hide dwell after a touch gesture.
    pub dwell: Duration,
    /// Offset from the pointer position.
    pub offset: (f64, f64),
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            dwell: constants::TOOLTIP_DWELL,
            offset: constants::TOOLTIP_OFFSET,
        }
    }
}

/// Visibility state of the tooltip.
#[derive(Debug, Clone, PartialEq)]
pub enum TooltipState {
    Hidden,
    Shown { content: String, position: Point },
}

/// The single floating label that follows the pointer.
///
/// One controller exists per map mount. `show` on an already-shown
/// tooltip updates content in place, never hide-then-show. Touch shows
/// arm a dwell timer that is cancelled and re-armed by every later
/// show/move; a stale timer can never hide a newer gesture's tooltip.
pub struct TooltipController {
    state: TooltipState,
    options: TooltipOptions,
    dwell_deadline: Option<Instant>,
}

impl TooltipController {
    pub fn new() -> Self {
        Self::with_options(TooltipOptions::default())
    }

    pub fn with_options(options: TooltipOptions) -> Self {
        Self {
            state: TooltipState::Hidden,
            options,
            dwell_deadline: None,
        }
    }

    /// Shows the tooltip at a pointer position, updating in place when
    /// already visible. Cancels any armed dwell timer.
    pub fn show(&mut self, content: impl Into<String>, pointer: Point) {
        self.dwell_deadline = None;
        self.state = TooltipState::Shown {
            content: content.into(),
            position: self.offset(pointer),
        };
    }

    /// Touch variant of `show`: arms the auto-hide dwell timer, replacing
    /// (never stacking on) any previously armed one.
    pub fn show_touch(&mut self, content: impl Into<String>, pointer: Point, now: Instant) {
        self.state = TooltipState::Shown {
            content: content.into(),
            position: self.offset(pointer),
        };
        self.dwell_deadline = Some(now + self.options.dwell);
    }

    /// Repositions a visible tooltip; no-op when hidden. An armed dwell
    /// timer restarts from this gesture.
    pub fn move_to(&mut self, pointer: Point, now: Instant) {
        if let TooltipState::Shown { position, .. } = &mut self.state {
            *position = self.options.offset_point(pointer);
            if self.dwell_deadline.is_some() {
                self.dwell_deadline = Some(now + self.options.dwell);
            }
        }
    }

    pub fn hide(&mut self) {
        self.state = TooltipState::Hidden;
        self.dwell_deadline = None;
    }

    /// Fires a due dwell timeout.
    pub fn frame(&mut self, now: Instant) {
        if let Some(deadline) = self.dwell_deadline {
            if now >= deadline {
                self.hide();
            }
        }
    }

    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    pub fn is_shown(&self) -> bool {
        matches!(self.state, TooltipState::Shown { .. })
    }

    pub fn content(&self) -> Option<&str> {
        match &self.state {
            TooltipState::Shown { content, .. } => Some(content),
            TooltipState::Hidden => None,
        }
    }

    pub fn position(&self) -> Option<Point> {
        match &self.state {
            TooltipState::Shown { position, .. } => Some(*position),
            TooltipState::Hidden => None,
        }
    }

    fn offset(&self, pointer: Point) -> Point {
        self.options.offset_point(pointer)
    }
}

impl TooltipOptions {
    fn offset_point(&self, pointer: Point) -> Point {
        Point::new(pointer.x + self.offset.0, pointer.y + self.offset.1)
    }
}

impl Default for TooltipController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tooltip() -> TooltipController {
        TooltipController::with_options(TooltipOptions {
            dwell: Duration::from_millis(1400),
            offset: (0.0, 0.0),
        })
    }

    #[test]
    fn test_show_updates_in_place() {
        let mut tip = tooltip();
        tip.show("Hà Nội", Point::new(10.0, 10.0));
        assert!(tip.is_shown());
        tip.show("Đà Nẵng", Point::new(20.0, 30.0));
        assert_eq!(tip.content(), Some("Đà Nẵng"));
        assert_eq!(tip.position(), Some(Point::new(20.0, 30.0)));
    }

    #[test]
    fn test_move_ignored_when_hidden() {
        let mut tip = tooltip();
        tip.move_to(Point::new(5.0, 5.0), Instant::now());
        assert!(!tip.is_shown());
    }

    #[test]
    fn test_touch_dwell_auto_hides() {
        let mut tip = tooltip();
        let t0 = Instant::now();
        tip.show_touch("Hà Nội", Point::new(10.0, 10.0), t0);
        tip.frame(t0 + Duration::from_millis(1000));
        assert!(tip.is_shown());
        tip.frame(t0 + Duration::from_millis(1400));
        assert!(!tip.is_shown());
    }

    #[test]
    fn test_retrigger_cancels_stale_timer() {
        let mut tip = tooltip();
        let t0 = Instant::now();
        tip.show_touch("Hà Nội", Point::new(10.0, 10.0), t0);
        // New gesture just before the first timer fires.
        let t1 = t0 + Duration::from_millis(1300);
        tip.show_touch("Đà Nẵng", Point::new(40.0, 40.0), t1);
        // The first deadline passes without hiding the new tooltip.
        tip.frame(t0 + Duration::from_millis(1450));
        assert!(tip.is_shown());
        tip.frame(t1 + Duration::from_millis(1400));
        assert!(!tip.is_shown());
    }

    #[test]
    fn test_mouse_show_disarms_dwell() {
        let mut tip = tooltip();
        let t0 = Instant::now();
        tip.show_touch("Hà Nội", Point::new(10.0, 10.0), t0);
        tip.show("Hà Nội", Point::new(12.0, 10.0));
        tip.frame(t0 + Duration::from_millis(2000));
        assert!(tip.is_shown());
    }

    #[test]
    fn test_move_rearms_dwell() {
        let mut tip = tooltip();
        let t0 = Instant::now();
        tip.show_touch("Hà Nội", Point::new(10.0, 10.0), t0);
        let t1 = t0 + Duration::from_millis(1200);
        tip.move_to(Point::new(15.0, 10.0), t1);
        tip.frame(t0 + Duration::from_millis(1400));
        assert!(tip.is_shown());
        tip.frame(t1 + Duration::from_millis(1400));
        assert!(!tip.is_shown());
    }
}
