use crate::game::Game;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Pointer down / touch start, in game coordinates
    Pointer { x: f64, y: f64 },
    /// Start or restart a round
    Start,
    /// Viewport changed, in game coordinates
    Resize { width: f64, height: f64 },
    Quit,
}

/// Trait that abstracts the host backend.
/// This allows for different rendering backends (CLI, Web, etc.)
pub trait Renderer {
    /// Initialize the renderer
    fn init(&mut self) -> io::Result<()>;

    /// Render the current game state
    fn render(&mut self, game: &Game) -> io::Result<()>;

    /// Clean up and restore terminal/display state
    fn cleanup(&mut self) -> io::Result<()>;

    /// Poll for input from the user
    fn poll_input(&mut self) -> io::Result<Option<Input>>;
}

/// Route one input to the game. Returns false on `Quit`.
pub fn apply_input(game: &mut Game, input: Input) -> bool {
    match input {
        Input::Pointer { x, y } => game.point_at(crate::entity::Point::new(x, y)),
        Input::Start => game.start(),
        Input::Resize { width, height } => game.resize(width, height),
        Input::Quit => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;

    #[test]
    fn test_apply_input_routes() {
        let mut game = Game::with_seed(800.0, 600.0, 9);

        assert!(apply_input(&mut game, Input::Start));
        assert_eq!(game.state, GameState::Playing);

        assert!(apply_input(&mut game, Input::Pointer { x: 100.0, y: 200.0 }));
        assert!((game.target_angle - std::f64::consts::FRAC_PI_2).abs() < 1e-9);

        assert!(apply_input(&mut game, Input::Resize { width: 1024.0, height: 768.0 }));
        assert_eq!((game.width, game.height), (1024.0, 768.0));

        assert!(!apply_input(&mut game, Input::Quit));
    }
}
