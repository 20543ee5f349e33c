//! Points and axis-aligned rectangles in host (CSS pixel) coordinates.

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Displacement from `origin` to `self`.
    pub fn delta_from(&self, origin: Point) -> (f32, f32) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// An axis-aligned rectangle, as returned by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check whether `other` lies fully inside these bounds (edges inclusive).
    pub fn contains(&self, other: &Bounds) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_full_and_partial() {
        let viewport = Bounds::new(0.0, 0.0, 100.0, 400.0);

        assert!(viewport.contains(&Bounds::new(10.0, 10.0, 75.0, 75.0)));
        // Touching the edge still counts as visible
        assert!(viewport.contains(&Bounds::new(0.0, 325.0, 75.0, 75.0)));
        // Half scrolled out at the bottom
        assert!(!viewport.contains(&Bounds::new(0.0, 360.0, 75.0, 75.0)));
        // Above the top
        assert!(!viewport.contains(&Bounds::new(0.0, -20.0, 75.0, 75.0)));
    }

    #[test]
    fn test_point_delta() {
        let delta = Point::new(30.0, 5.0).delta_from(Point::new(100.0, 0.0));
        assert_eq!(delta, (-70.0, 5.0));
    }
}
