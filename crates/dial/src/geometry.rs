use std::f64::consts::PI;

/// Deflation applied to the host rectangle so the handle path stays inside the ring.
pub const BOUNDS_INSET: f64 = 6.0;
pub const HANDLE_RADIUS: f64 = 15.0;
/// Rotates atan2's zero reference from "right" to "up" and wraps into [0, 360).
const ANGLE_SHIFT: f64 = 450.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `size` centered on `center`.
    pub fn centered(center: Point, size: f64) -> Self {
        Self::new(center.x - size / 2.0, center.y - size / 2.0, size, size)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn outer_radius(&self) -> f64 {
        self.width.min(self.height) / 2.0
    }

    /// Shrinks the rectangle by `offset` on every edge.
    pub fn inset(&self, offset: f64) -> Self {
        Self::new(
            self.x + offset,
            self.y + offset,
            (self.width - 2.0 * offset).max(0.0),
            (self.height - 2.0 * offset).max(0.0),
        )
    }

    /// True if `p` falls inside the circle inscribed in this rectangle.
    pub fn circle_contains(&self, p: Point) -> bool {
        p.distance(self.center()) <= self.outer_radius()
    }
}

/// Cached on-screen geometry of a slider.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub center: Point,
}

impl Bounds {
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width - BOUNDS_INSET,
            height: rect.height - BOUNDS_INSET,
            center: rect.center(),
        }
    }

    /// Angle of `p` around the center in degrees, 0 pointing up and growing clockwise.
    pub fn angle_at(&self, p: Point) -> f64 {
        let (dx, dy) = (p.x - self.center.x, p.y - self.center.y);
        (dy.atan2(dx) * 180.0 / PI + ANGLE_SHIFT) % 360.0
    }
}

/// Angular state of the handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    /// Arc span in degrees, drives the progress fill.
    pub deg: f64,
    /// Handle angle in radians, offset by -90° so zero points up.
    pub tan: f64,
    /// Last pointer angle seen by the debounce guard.
    pub prev: Option<f64>,
}

impl Default for Corner {
    fn default() -> Self {
        Self {
            deg: 0.0,
            tan: -PI / 2.0,
            prev: None,
        }
    }
}
