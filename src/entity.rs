use std::f64::consts::{PI, TAU};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Heading (radians) from this point towards `other`
    pub fn angle_to(&self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    pub fn advanced(&self, angle: f64, distance: f64) -> Self {
        Point::new(
            self.x + angle.cos() * distance,
            self.y + angle.sin() * distance,
        )
    }

    /// Teleport to the opposite edge when outside `[0, width] x [0, height]`.
    /// Returns the wrapped point and whether a wrap happened.
    pub fn wrapped(&self, width: f64, height: f64) -> (Self, bool) {
        let mut p = *self;
        let mut wrapped = false;

        if p.x > width {
            p.x = 0.0;
            wrapped = true;
        } else if p.x < 0.0 {
            p.x = width;
            wrapped = true;
        }

        if p.y > height {
            p.y = 0.0;
            wrapped = true;
        } else if p.y < 0.0 {
            p.y = height;
            wrapped = true;
        }

        (p, wrapped)
    }
}

/// Fold an angular difference into `(-PI, PI]`
pub fn normalize_angle(mut diff: f64) -> f64 {
    if !diff.is_finite() {
        return 0.0;
    }
    while diff > PI {
        diff -= TAU;
    }
    while diff <= -PI {
        diff += TAU;
    }
    diff
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// Rectangle of the given size centered in a `width` x `height` area
    pub fn centered(width: f64, height: f64, rect_width: f64, rect_height: f64) -> Self {
        let left = (width - rect_width) / 2.0;
        let top = (height - rect_height) / 2.0;
        Self {
            left,
            top,
            right: left + rect_width,
            bottom: top + rect_height,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_angle_range() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-9);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-9, "-PI folds to PI");
        assert!((normalize_angle(1.5 * PI) + 0.5 * PI).abs() < 1e-9);
        assert!((normalize_angle(-7.0 * PI / 2.0) - PI / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_all_four_bounds() {
        let (p, w) = Point::new(800.0001, 300.0).wrapped(800.0, 600.0);
        assert!(w);
        assert_eq!(p, Point::new(0.0, 300.0));

        let (p, w) = Point::new(-0.5, 300.0).wrapped(800.0, 600.0);
        assert!(w);
        assert_eq!(p, Point::new(800.0, 300.0));

        let (p, w) = Point::new(10.0, 600.1).wrapped(800.0, 600.0);
        assert!(w);
        assert_eq!(p, Point::new(10.0, 0.0));

        let (p, w) = Point::new(10.0, -3.0).wrapped(800.0, 600.0);
        assert!(w);
        assert_eq!(p, Point::new(10.0, 600.0));

        // On the bound itself is still inside
        let (p, w) = Point::new(800.0, 0.0).wrapped(800.0, 600.0);
        assert!(!w);
        assert_eq!(p, Point::new(800.0, 0.0));
    }

    #[test]
    fn test_angle_to_and_advanced() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.0, 10.0);
        let angle = a.angle_to(b);
        assert!((angle - PI / 2.0).abs() < 1e-9);

        let moved = a.advanced(angle, 10.0);
        assert!(moved.distance(b) < 1e-9);
    }

    #[test]
    fn test_centered_rect() {
        let r = Rect::centered(800.0, 600.0, 320.0, 200.0);
        assert_eq!(r, Rect { left: 240.0, top: 200.0, right: 560.0, bottom: 400.0 });
        assert!(r.contains(Point::new(400.0, 300.0)));
        assert!(!r.contains(Point::new(100.0, 300.0)));
    }
}
