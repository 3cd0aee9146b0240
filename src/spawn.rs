use crate::config::SnakeConfig;
use crate::entity::Point;
use log::warn;
use rand::Rng;

/// Pick a food position inside the margin-inset arena and outside the
/// centered exclusion zone, by rejection sampling.
///
/// Falls back to the corner at `(margin, margin)` when every attempt lands in
/// the exclusion zone or the arena is too small to sample from.
pub fn spawn_food<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64, cfg: &SnakeConfig) -> Point {
    let margin = cfg.spawn_margin;
    let (max_x, max_y) = (width - margin, height - margin);

    if !(max_x >= margin && max_y >= margin) {
        warn!(
            "Arena {}x{} too small for spawn margin {}, using fallback food position",
            width, height, margin
        );
        return cfg.fallback_food();
    }

    let exclusion = cfg.exclusion_zone(width, height);

    for _ in 0..cfg.spawn_attempts {
        let p = Point::new(rng.gen_range(margin..=max_x), rng.gen_range(margin..=max_y));
        if !exclusion.contains(p) {
            return p;
        }
    }

    warn!(
        "No food position found outside the exclusion zone after {} attempts",
        cfg.spawn_attempts
    );
    cfg.fallback_food()
}
