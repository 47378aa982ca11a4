use crate::core::{
    constants,
    geometry::Point,
    palette::Color,
    province::ProvinceId,
    registry::{compute_anchor, LayoutProbe},
};
use crate::overlay::pin::Pin;
use crate::prelude::{Duration, HashMap, HashSet, Instant};

/// Timing options for pin enter/exit transitions.
#[derive(Debug, Clone)]
pub struct PinAnimationOptions {
    pub enter: Duration,
    pub exit: Duration,
    pub rise: f64,
}

impl Default for PinAnimationOptions {
    fn default() -> Self {
        Self {
            enter: constants::PIN_ENTER,
            exit: constants::PIN_EXIT,
            rise: constants::PIN_RISE,
        }
    }
}

/// Owns every pin on the overlay, keyed by province identifier.
///
/// At most one pin exists per province. A pin stays tracked through its
/// exit animation so that a rapid remove-then-add reuses the node instead
/// of duplicating it.
pub struct PinOverlay {
    pins: HashMap<ProvinceId, Pin>,
    options: PinAnimationOptions,
    // Scroll/resize events only mark geometry dirty; the next frame
    // applies a single reposition pass no matter how many events arrived.
    needs_reposition: bool,
}

impl PinOverlay {
    pub fn new() -> Self {
        Self::with_options(PinAnimationOptions::default())
    }

    pub fn with_options(options: PinAnimationOptions) -> Self {
        Self {
            pins: HashMap::default(),
            options,
            needs_reposition: false,
        }
    }

    /// Adds a pin for a province. Adding onto an already-active pin is a
    /// logged no-op; adding onto a pin mid-exit cancels the pending
    /// detach and animates the node back in with the new color.
    pub fn add(&mut self, province: ProvinceId, color: Color, anchor: Point, now: Instant) {
        if let Some(pin) = self.pins.get_mut(&province) {
            if pin.is_leaving() {
                pin.cancel_exit(now);
                pin.set_color(color);
                pin.set_anchor(anchor);
            } else {
                log::warn!("duplicate pin add for {}, ignoring", province);
            }
            return;
        }
        let pin = Pin::new(
            province.clone(),
            color,
            anchor,
            self.options.enter,
            self.options.exit,
            self.options.rise,
        );
        self.pins.insert(province, pin);
    }

    /// Starts the exit animation for a province's pin. The pin remains
    /// tracked until the detach actually occurs on a later frame. No-op
    /// if absent or already leaving.
    pub fn remove(&mut self, province: &ProvinceId, now: Instant) {
        match self.pins.get_mut(province) {
            Some(pin) => pin.begin_exit(now),
            None => log::debug!("remove for unpinned province {}, ignoring", province),
        }
    }

    /// Marks geometry dirty; the next frame recomputes every anchor.
    pub fn reposition(&mut self) {
        self.needs_reposition = true;
    }

    /// Advances one frame: applies a pending reposition pass, steps every
    /// pin's phase machine, and detaches pins whose exit has elapsed.
    pub fn frame(&mut self, now: Instant, probe: &dyn LayoutProbe) {
        if self.needs_reposition {
            self.needs_reposition = false;
            for (province, pin) in self.pins.iter_mut() {
                match compute_anchor(probe, province) {
                    Some(anchor) => pin.set_anchor(anchor),
                    // Shape detached from the layout tree: keep the last
                    // known anchor instead of failing.
                    None => log::debug!("stale anchor kept for {}", province),
                }
            }
        }

        for pin in self.pins.values_mut() {
            pin.frame(now);
        }

        self.pins.retain(|_, pin| !pin.is_detachable(now));
    }

    /// Removes any pin whose province is no longer in the visited set.
    /// Such a pin is a bug; this sweep repairs the tri-state invariant.
    pub fn retain_visited(&mut self, visited: &HashSet<ProvinceId>, now: Instant) {
        for (province, pin) in self.pins.iter_mut() {
            if !visited.contains(province) && !pin.is_leaving() {
                log::warn!("pin {} not in visited set, removing", province);
                pin.begin_exit(now);
            }
        }
    }

    /// Whether a province has a pin that is not on its way out.
    pub fn is_active(&self, province: &ProvinceId) -> bool {
        self.pins
            .get(province)
            .map(|pin| !pin.is_leaving())
            .unwrap_or(false)
    }

    /// Whether a province has a pin at all, including one mid-exit.
    pub fn is_tracked(&self, province: &ProvinceId) -> bool {
        self.pins.contains_key(province)
    }

    pub fn get(&self, province: &ProvinceId) -> Option<&Pin> {
        self.pins.get(province)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pin> {
        self.pins.values()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

impl Default for PinOverlay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::{ContainerLayout, LayoutRect};
    use crate::core::palette::PALETTE;
    use crate::core::registry::FixedLayout;

    fn probe() -> FixedLayout {
        let mut probe = FixedLayout::new(ContainerLayout::new(
            LayoutRect::new(0.0, 0.0, 800.0, 600.0),
            0.0,
            0.0,
        ));
        probe.set_shape("HaNoi", LayoutRect::new(180.0, 80.0, 40.0, 40.0));
        probe.set_shape("DaNang", LayoutRect::new(400.0, 300.0, 40.0, 40.0));
        probe
    }

    fn id(s: &str) -> ProvinceId {
        ProvinceId::from(s)
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let mut pins = PinOverlay::new();
        let now = Instant::now();
        pins.add(id("HaNoi"), PALETTE[0], Point::new(200.0, 100.0), now);
        pins.add(id("HaNoi"), PALETTE[1], Point::new(999.0, 999.0), now);
        assert_eq!(pins.len(), 1);
        let pin = pins.get(&id("HaNoi")).unwrap();
        assert_eq!(pin.color(), PALETTE[0]);
        assert_eq!(pin.anchor(), Point::new(200.0, 100.0));
    }

    #[test]
    fn test_remove_then_add_reuses_node() {
        let mut pins = PinOverlay::new();
        let probe = probe();
        let t0 = Instant::now();
        pins.add(id("HaNoi"), PALETTE[0], Point::new(200.0, 100.0), t0);
        pins.frame(t0, &probe);
        pins.remove(&id("HaNoi"), t0);
        // Re-add mid-exit: detach cancelled, node re-enters.
        let t1 = t0 + Duration::from_millis(200);
        pins.add(id("HaNoi"), PALETTE[2], Point::new(200.0, 100.0), t1);
        assert_eq!(pins.len(), 1);
        assert!(pins.is_active(&id("HaNoi")));
        // Well past the original detach deadline the pin is still there.
        pins.frame(t0 + Duration::from_millis(800), &probe);
        assert!(pins.is_tracked(&id("HaNoi")));
        assert_eq!(pins.get(&id("HaNoi")).unwrap().color(), PALETTE[2]);
    }

    #[test]
    fn test_detach_after_exit_duration() {
        let mut pins = PinOverlay::new();
        let probe = probe();
        let t0 = Instant::now();
        pins.add(id("HaNoi"), PALETTE[0], Point::new(200.0, 100.0), t0);
        pins.frame(t0, &probe);
        pins.remove(&id("HaNoi"), t0);
        pins.frame(t0 + Duration::from_millis(200), &probe);
        assert!(pins.is_tracked(&id("HaNoi")));
        pins.frame(t0 + Duration::from_millis(400), &probe);
        assert!(!pins.is_tracked(&id("HaNoi")));
    }

    #[test]
    fn test_remove_twice_is_idempotent() {
        let mut pins = PinOverlay::new();
        let probe = probe();
        let t0 = Instant::now();
        pins.add(id("HaNoi"), PALETTE[0], Point::new(200.0, 100.0), t0);
        pins.frame(t0, &probe);
        pins.remove(&id("HaNoi"), t0);
        pins.frame(t0 + Duration::from_millis(400), &probe);
        pins.remove(&id("HaNoi"), t0 + Duration::from_millis(450));
        pins.frame(t0 + Duration::from_millis(450), &probe);
        assert!(pins.is_empty());
    }

    #[test]
    fn test_reposition_is_debounced_to_one_pass() {
        let mut pins = PinOverlay::new();
        let mut probe = probe();
        let t0 = Instant::now();
        let anchor = compute_anchor(&probe, &id("HaNoi")).unwrap();
        pins.add(id("HaNoi"), PALETTE[0], anchor, t0);
        pins.frame(t0, &probe);

        probe.scroll_by(30.0, 0.0);
        pins.reposition();
        probe.scroll_by(0.0, -20.0);
        pins.reposition();

        pins.frame(t0 + Duration::from_millis(16), &probe);
        let moved = pins.get(&id("HaNoi")).unwrap().anchor();
        assert_eq!(moved, anchor.add(&Point::new(30.0, -20.0)));
    }

    #[test]
    fn test_probe_miss_keeps_stale_anchor() {
        let mut pins = PinOverlay::new();
        let mut probe = probe();
        let t0 = Instant::now();
        let anchor = compute_anchor(&probe, &id("HaNoi")).unwrap();
        pins.add(id("HaNoi"), PALETTE[0], anchor, t0);
        probe.remove_shape(&id("HaNoi"));
        pins.reposition();
        pins.frame(t0 + Duration::from_millis(16), &probe);
        assert_eq!(pins.get(&id("HaNoi")).unwrap().anchor(), anchor);
    }

    #[test]
    fn test_retain_visited_sweeps_orphans() {
        let mut pins = PinOverlay::new();
        let probe = probe();
        let t0 = Instant::now();
        pins.add(id("HaNoi"), PALETTE[0], Point::new(200.0, 100.0), t0);
        pins.add(id("DaNang"), PALETTE[1], Point::new(420.0, 320.0), t0);
        pins.frame(t0, &probe);

        let mut visited = HashSet::default();
        visited.insert(id("HaNoi"));
        pins.retain_visited(&visited, t0);
        assert!(pins.is_active(&id("HaNoi")));
        assert!(!pins.is_active(&id("DaNang")));
        pins.frame(t0 + Duration::from_millis(400), &probe);
        assert!(!pins.is_tracked(&id("DaNang")));
    }
}
