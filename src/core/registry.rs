//! Geometry registry: turns live layout boxes into overlay anchors.
//!
//! The engine never touches the host's layout tree directly; a
//! [`LayoutProbe`] reports the current bounding boxes and the anchor math
//! lives here. Anchors are a pure function of the probe's current answer
//! and are recomputed (never cached) on scroll, resize and pin creation.

use crate::core::{
    geometry::{ContainerLayout, LayoutRect, Point},
    province::ProvinceId,
};

/// Host seam reporting current layout geometry.
///
/// `None` means the queried node is not attached to the live layout tree
/// right now; callers fall back to their last known anchor rather than
/// failing (minor positional drift beats a crash).
pub trait LayoutProbe {
    /// Bounding box of a province shape, in viewport coordinates.
    fn shape_rect(&self, id: &ProvinceId) -> Option<LayoutRect>;

    /// Content box and scroll offsets of the overlay container.
    fn container(&self) -> Option<ContainerLayout>;
}

/// Computes the overlay anchor for a province shape: the shape's visual
/// center expressed relative to the container's content box, corrected
/// for the container's current scroll offsets in both axes.
pub fn compute_anchor(probe: &dyn LayoutProbe, id: &ProvinceId) -> Option<Point> {
    let shape = probe.shape_rect(id)?;
    let container = probe.container()?;
    Some(container.to_local(shape.center()))
}

/// A probe backed by fixed rects, for tests and headless sessions.
#[derive(Default)]
pub struct FixedLayout {
    shapes: fxhash::FxHashMap<ProvinceId, LayoutRect>,
    container: Option<ContainerLayout>,
}

impl FixedLayout {
    pub fn new(container: ContainerLayout) -> Self {
        Self {
            shapes: fxhash::FxHashMap::default(),
            container: Some(container),
        }
    }

    pub fn set_shape(&mut self, id: impl Into<ProvinceId>, rect: LayoutRect) {
        self.shapes.insert(id.into(), rect);
    }

    pub fn remove_shape(&mut self, id: &ProvinceId) {
        self.shapes.remove(id);
    }

    pub fn set_container(&mut self, container: ContainerLayout) {
        self.container = Some(container);
    }

    /// Adjusts the container's scroll offsets by a delta, as a host would
    /// after a scroll event.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        if let Some(container) = self.container.as_mut() {
            container.scroll_x += dx;
            container.scroll_y += dy;
        }
    }

    /// All province identifiers the asset currently exposes.
    pub fn province_ids(&self) -> impl Iterator<Item = &ProvinceId> {
        self.shapes.keys()
    }

    pub fn province_count(&self) -> usize {
        self.shapes.len()
    }
}

impl LayoutProbe for FixedLayout {
    fn shape_rect(&self, id: &ProvinceId) -> Option<LayoutRect> {
        self.shapes.get(id).copied()
    }

    fn container(&self) -> Option<ContainerLayout> {
        self.container
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe() -> FixedLayout {
        let mut probe = FixedLayout::new(ContainerLayout::new(
            LayoutRect::new(100.0, 50.0, 800.0, 600.0),
            0.0,
            0.0,
        ));
        probe.set_shape("HaNoi", LayoutRect::new(300.0, 150.0, 40.0, 60.0));
        probe
    }

    #[test]
    fn test_anchor_is_container_relative_center() {
        let probe = probe();
        let anchor = compute_anchor(&probe, &ProvinceId::from("HaNoi")).unwrap();
        assert_eq!(anchor, Point::new(220.0, 130.0));
    }

    #[test]
    fn test_anchor_tracks_scroll() {
        let mut probe = probe();
        probe.scroll_by(25.0, -10.0);
        let anchor = compute_anchor(&probe, &ProvinceId::from("HaNoi")).unwrap();
        assert_eq!(anchor, Point::new(245.0, 120.0));
    }

    #[test]
    fn test_detached_shape_yields_none() {
        let probe = probe();
        assert!(compute_anchor(&probe, &ProvinceId::from("DaNang")).is_none());
    }

    #[test]
    fn test_detached_container_yields_none() {
        let mut probe = probe();
        probe.container = None;
        assert!(compute_anchor(&probe, &ProvinceId::from("HaNoi")).is_none());
    }
}
