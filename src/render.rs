use crate::game::Game;

// Colors
pub const COLOR_BACKGROUND: &str = "#000000";
pub const COLOR_FOOD: &str = "#FF5555";
pub const COLOR_FOOD_RING: &str = "#FFAAAA";
pub const COLOR_TRAIL: &str = "#55FF55";
pub const COLOR_HEAD: &str = "#FFFFFF";

pub const FOOD_RADIUS: f64 = 6.0;
pub const FOOD_RING_RADIUS: f64 = 10.0;
pub const HEAD_RADIUS: f64 = 5.0;
pub const TRAIL_WIDTH: f64 = 6.0;

/// The drawing primitives a frame needs.
/// Backends map these onto a canvas, a character grid, etc.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn set_fill_style(&mut self, color: &str);
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    /// Round line caps and joins
    fn set_line_round(&mut self);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64);
    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self);
}

/// Draw one frame: food, trail, head on top.
pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, game: &Game) {
    surface.clear(game.width, game.height);

    draw_food(surface, game);
    draw_trail(surface, game);

    surface.set_fill_style(COLOR_HEAD);
    surface.fill_circle(game.head.x, game.head.y, HEAD_RADIUS);
}

fn draw_food<S: Surface + ?Sized>(surface: &mut S, game: &Game) {
    surface.set_fill_style(COLOR_FOOD);
    surface.fill_circle(game.food.x, game.food.y, FOOD_RADIUS);

    surface.set_stroke_style(COLOR_FOOD_RING);
    surface.set_line_width(1.0);
    surface.stroke_circle(game.food.x, game.food.y, FOOD_RING_RADIUS);
}

/// Polyline through the trail. Wrap teleports lift the pen so they never
/// show up as a streak across the screen.
fn draw_trail<S: Surface + ?Sized>(surface: &mut S, game: &Game) {
    let Some(first) = game.trail.head() else {
        return;
    };

    let jump_sq = game.config.wrap_jump * game.config.wrap_jump;

    surface.set_stroke_style(COLOR_TRAIL);
    surface.set_line_width(TRAIL_WIDTH);
    surface.set_line_round();
    surface.begin_path();
    surface.move_to(first.x, first.y);

    for (prev, p) in game.trail.segments() {
        if prev.distance_squared(p) > jump_sq {
            surface.move_to(p.x, p.y);
        } else {
            surface.line_to(p.x, p.y);
        }
    }

    surface.stroke();
}
