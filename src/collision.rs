use crate::config::SnakeConfig;
use crate::entity::Point;
use crate::trail::Trail;

/// Food pickup check. Exactly on the radius is not a pickup.
pub fn food_hit(head: Point, food: Point, pickup_radius: f64) -> bool {
    head.distance(food) < pickup_radius
}

/// Sampled self-intersection check against the trail.
///
/// The `collision_skip` newest points are ignored, then every
/// `collision_stride`-th point is compared with the head. A sampled point whose
/// distance to its newer neighbour exceeds `wrap_jump` sits on a wrap
/// teleport and is never a hit.
pub fn self_hit(head: Point, trail: &Trail, cfg: &SnakeConfig) -> bool {
    let stride = cfg.collision_stride.max(1);
    let start = cfg.collision_skip.max(1);

    let mut i = start;
    while i < trail.len() {
        if let (Some(p), Some(prev)) = (trail.get(i), trail.get(i - 1)) {
            let is_jump = p.distance(prev) > cfg.wrap_jump;
            if !is_jump && head.distance(p) < cfg.collision_radius {
                return true;
            }
        }
        i += stride;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Trail from newest to oldest
    fn trail_of(pts: &[Point]) -> Trail {
        let mut trail = Trail::new();
        for p in pts.iter().rev() {
            trail.push_head(*p);
        }
        trail
    }

    /// Head at (300, 300) with 14 older points climbing straight up from it
    fn climbing(head: Point) -> Vec<Point> {
        (0..15).map(|i| Point::new(head.x, head.y - 3.0 * i as f64)).collect()
    }

    #[test]
    fn test_food_hit_strict_threshold() {
        let head = Point::new(0.0, 0.0);
        assert!(food_hit(head, Point::new(14.9, 0.0), 15.0));
        assert!(!food_hit(head, Point::new(15.0, 0.0), 15.0), "Exactly 15 is not a pickup");
        assert!(!food_hit(head, Point::new(30.0, 0.0), 15.0));
    }

    #[test]
    fn test_self_hit_detects_overlap() {
        let cfg = SnakeConfig::default();
        let head = Point::new(300.0, 300.0);

        // Index 15 loops back next to the head; its neighbour is 42 units away.
        let mut pts = climbing(head);
        pts.push(Point::new(302.0, 300.0));
        let trail = trail_of(&pts);

        assert!(self_hit(head, &trail, &cfg));
    }

    #[test]
    fn test_self_hit_ignores_recent_points() {
        let cfg = SnakeConfig::default();
        let head = Point::new(300.0, 300.0);

        // A tight curl where every point is near the head but all within the skip window
        let mut trail = Trail::new();
        for i in (1..cfg.collision_skip).rev() {
            trail.push_head(Point::new(300.0 + (i as f64) * 0.1, 300.0));
        }
        trail.push_head(head);

        assert_eq!(trail.len(), cfg.collision_skip);
        assert!(!self_hit(head, &trail, &cfg));
    }

    #[test]
    fn test_self_hit_ignores_wrap_jump() {
        let cfg = SnakeConfig::default();
        let head = Point::new(800.0, 300.0);

        // Index 15 is within 5 units of the head but its newer neighbour (index 14)
        // is on the far side of the screen: a wrap teleport.
        let mut pts: Vec<Point> = (0..15).map(|i| Point::new(3.0 * i as f64, 300.0)).collect();
        pts[0] = head;
        pts.push(Point::new(798.0, 300.0));
        pts.push(Point::new(795.0, 300.0));

        let mut trail = Trail::new();
        for p in pts.iter().rev() {
            trail.push_head(*p);
        }

        assert_eq!(trail.get(15), Some(Point::new(798.0, 300.0)));
        assert!(trail.get(15).unwrap().distance(trail.get(14).unwrap()) > cfg.wrap_jump);
        assert!(head.distance(trail.get(15).unwrap()) < cfg.collision_radius);
        assert!(!self_hit(head, &trail, &cfg), "Wrap discontinuity must not collide");
    }

    #[test]
    fn test_self_hit_exact_radius_is_miss() {
        let cfg = SnakeConfig::default();
        let head = Point::new(300.0, 300.0);

        let mut pts = climbing(head);
        pts.push(Point::new(305.0, 300.0));
        assert!(!self_hit(head, &trail_of(&pts), &cfg), "Exactly 5 units is not a hit");

        let mut pts = climbing(head);
        pts.push(Point::new(304.0, 300.0));
        assert!(self_hit(head, &trail_of(&pts), &cfg));
    }

    #[test]
    fn test_self_hit_only_samples_on_stride() {
        let cfg = SnakeConfig::default();
        let head = Point::new(300.0, 300.0);

        // Index 16 is off the 15, 19, 23... sampling grid
        let mut pts = climbing(head);
        pts.push(Point::new(300.0, 255.0));
        pts.push(Point::new(301.0, 300.0));
        pts.push(Point::new(300.0, 252.0));
        assert!(!self_hit(head, &trail_of(&pts), &cfg));
    }

    proptest! {
        #[test]
        fn prop_straight_line_never_self_hits(
            len in 1usize..600,
            angle in -3.14f64..3.14,
        ) {
            let cfg = SnakeConfig::default();
            let head = Point::new(0.0, 0.0);

            let mut trail = Trail::new();
            for i in (0..len).rev() {
                trail.push_head(head.advanced(angle + std::f64::consts::PI, cfg.speed * i as f64));
            }

            prop_assert!(!self_hit(head, &trail, &cfg));
        }
    }
}
