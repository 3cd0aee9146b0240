use crate::entity::{Point, Rect};

/// Tuning constants for the simulation.
///
/// The collision skip/stride pair is empirical tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeConfig {
    pub speed: f64,
    pub turn_rate: f64,
    pub base_length: usize,
    pub growth_per_food: usize,
    pub segment_spacing: usize,

    pub pickup_radius: f64,
    pub collision_radius: f64,
    pub collision_skip: usize,
    pub collision_stride: usize,
    pub wrap_jump: f64,

    pub spawn_margin: f64,
    pub spawn_attempts: usize,
    pub exclusion_width: f64,
    pub exclusion_height: f64,

    pub start: Point,
    pub start_angle: f64,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            speed: 3.0,
            turn_rate: 0.15,
            base_length: 20,
            growth_per_food: 10,
            segment_spacing: 4,

            pickup_radius: 15.0,
            collision_radius: 5.0,
            collision_skip: 15,
            collision_stride: 4,
            wrap_jump: 50.0,

            spawn_margin: 40.0,
            spawn_attempts: 100,
            exclusion_width: 320.0,
            exclusion_height: 200.0,

            start: Point::new(100.0, 100.0),
            start_angle: 0.0,
        }
    }
}

impl SnakeConfig {
    /// Maximum number of trail points for a given score
    pub fn trail_cap(&self, score: u32) -> usize {
        (self.base_length + score as usize * self.growth_per_food) * self.segment_spacing
    }

    /// Overlay region where food must not spawn
    pub fn exclusion_zone(&self, width: f64, height: f64) -> Rect {
        Rect::centered(width, height, self.exclusion_width, self.exclusion_height)
    }

    /// Where food goes when rejection sampling gives up
    pub fn fallback_food(&self) -> Point {
        Point::new(self.spawn_margin, self.spawn_margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_cap_formula() {
        let cfg = SnakeConfig::default();
        assert_eq!(cfg.trail_cap(0), 80);
        assert_eq!(cfg.trail_cap(1), 120);
        assert_eq!(cfg.trail_cap(10), 480);
    }

    #[test]
    fn test_turn_rate_is_fractional() {
        let cfg = SnakeConfig::default();
        assert!(cfg.turn_rate > 0.0 && cfg.turn_rate < 1.0);
    }
}
