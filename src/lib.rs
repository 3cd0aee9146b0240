pub mod collision;
pub mod config;
pub mod entity;
pub mod error;
pub mod game;
pub mod lifecycle;
pub mod render;
pub mod renderer;
pub mod spawn;
pub mod trail;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli_renderer;

#[cfg(target_arch = "wasm32")]
pub mod web_main;
#[cfg(target_arch = "wasm32")]
pub mod web_renderer;

pub use config::SnakeConfig;
pub use entity::{Point, Rect};
pub use error::SnakeError;
pub use game::{Game, GameState, Snapshot, Tick};
pub use lifecycle::{CancelToken, TickClock};
pub use render::{draw_frame, Surface};
pub use renderer::{apply_input, Input, Renderer};
pub use trail::Trail;

#[cfg(not(target_arch = "wasm32"))]
pub use cli_renderer::CliRenderer;
