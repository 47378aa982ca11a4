use serde::{Deserialize, Serialize};

/// Represents a point in overlay (container-relative) pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Axis-aligned bounding box of a shape, in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Visual center of the rect, still in viewport coordinates
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Translates the rect by a pixel delta
    pub fn translated(&self, dx: f64, dy: f64) -> LayoutRect {
        LayoutRect::new(self.left + dx, self.top + dy, self.width, self.height)
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.left
            && point.x <= self.left + self.width
            && point.y >= self.top
            && point.y <= self.top + self.height
    }
}

/// Layout snapshot of the overlay container: its content box in viewport
/// coordinates plus the current scroll offsets in both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerLayout {
    pub rect: LayoutRect,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

impl ContainerLayout {
    pub fn new(rect: LayoutRect, scroll_x: f64, scroll_y: f64) -> Self {
        Self {
            rect,
            scroll_x,
            scroll_y,
        }
    }

    /// Converts a viewport-space point into container content-box space,
    /// correcting for the container's scroll position.
    pub fn to_local(&self, point: Point) -> Point {
        Point::new(
            point.x - self.rect.left + self.scroll_x,
            point.y - self.rect.top + self.scroll_y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_center() {
        let rect = LayoutRect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn test_container_to_local_accounts_for_scroll() {
        let container = ContainerLayout::new(LayoutRect::new(50.0, 40.0, 800.0, 600.0), 30.0, 10.0);
        let local = container.to_local(Point::new(250.0, 140.0));
        assert_eq!(local, Point::new(230.0, 110.0));
    }

    #[test]
    fn test_point_math() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(0.0, 0.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(a.add(&b), a);
        assert_eq!(a.subtract(&a), Point::default());
    }

    #[test]
    fn test_rect_contains() {
        let rect = LayoutRect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(&Point::new(5.0, 5.0)));
        assert!(!rect.contains(&Point::new(11.0, 5.0)));
    }
}
