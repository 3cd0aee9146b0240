use crate::entity::Point;
use std::collections::VecDeque;

/// History of head positions, most recent first.
/// Used both to draw the body and for self-collision sampling.
#[derive(Clone, Debug, Default)]
pub struct Trail {
    points: VecDeque<Point>,
}

impl Trail {
    pub fn new() -> Self {
        Self {
            points: VecDeque::new(),
        }
    }

    /// Replace the contents with a straight segment of `len` points ending at
    /// `head`, laid out behind it against `angle`, `spacing` apart.
    /// Points that fall outside the arena continue from the opposite edge.
    pub fn reset_straight(
        &mut self,
        head: Point,
        angle: f64,
        spacing: f64,
        len: usize,
        bounds: (f64, f64),
    ) {
        self.points.clear();
        let back = angle + std::f64::consts::PI;

        for i in 0..len {
            let p = head.advanced(back, spacing * i as f64);
            self.points
                .push_back(Point::new(p.x.rem_euclid(bounds.0), p.y.rem_euclid(bounds.1)));
        }
    }

    pub fn push_head(&mut self, p: Point) {
        self.points.push_front(p);
    }

    /// Drop the oldest points until at most `cap` remain
    pub fn truncate_to(&mut self, cap: usize) {
        while self.points.len() > cap {
            self.points.pop_back();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn head(&self) -> Option<Point> {
        self.points.front().copied()
    }

    pub fn get(&self, i: usize) -> Option<Point> {
        self.points.get(i).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    /// Consecutive (newer, older) pairs, front to back
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.iter().zip(self.points.iter().skip(1)).map(|(a, b)| (*a, *b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_basic() {
        let mut trail = Trail::new();

        trail.push_head(Point::new(1.0, 1.0));
        trail.push_head(Point::new(2.0, 1.0));
        trail.push_head(Point::new(3.0, 1.0));

        assert_eq!(trail.len(), 3);
        assert_eq!(trail.head(), Some(Point::new(3.0, 1.0)));
        assert_eq!(trail.get(2), Some(Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_truncate_drops_oldest() {
        let mut trail = Trail::new();
        for i in 0..10 {
            trail.push_head(Point::new(i as f64, 0.0));
        }

        trail.truncate_to(6);

        assert_eq!(trail.len(), 6, "Trail should respect cap");
        assert_eq!(trail.head(), Some(Point::new(9.0, 0.0)));
        assert_eq!(trail.get(5), Some(Point::new(4.0, 0.0)), "Oldest points go first");
    }

    #[test]
    fn test_reset_straight_lays_points_behind_head() {
        let mut trail = Trail::new();
        trail.reset_straight(Point::new(100.0, 100.0), 0.0, 3.0, 20, (800.0, 600.0));

        assert_eq!(trail.len(), 20);
        assert_eq!(trail.head(), Some(Point::new(100.0, 100.0)));

        let last = trail.get(19).unwrap();
        assert!((last.x - 43.0).abs() < 1e-9);
        assert!((last.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_straight_wraps_points_off_the_edge() {
        let mut trail = Trail::new();
        trail.reset_straight(Point::new(10.0, 50.0), 0.0, 3.0, 10, (800.0, 600.0));

        for p in trail.iter() {
            assert!(p.x >= 0.0 && p.x < 800.0, "x {} out of arena", p.x);
        }
        assert_eq!(trail.get(4).unwrap().x, 798.0, "Continues from the right edge");
    }

    #[test]
    fn test_segments_pairs() {
        let mut trail = Trail::new();
        trail.push_head(Point::new(0.0, 0.0));
        trail.push_head(Point::new(1.0, 0.0));
        trail.push_head(Point::new(2.0, 0.0));

        let segs: Vec<_> = trail.segments().collect();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0], (Point::new(2.0, 0.0), Point::new(1.0, 0.0)));
    }
}
