use crossterm::terminal;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::env;
use std::fs::File;
use std::time::Instant;
use wrapsnake::cli_renderer::{arena_for_terminal, CELL_H, CELL_W};
use wrapsnake::{
    apply_input, CancelToken, CliRenderer, Game, Renderer, SnakeConfig, SnakeError, Tick, TickClock,
};

// One logical step per 60 Hz frame
const TICK_MS: f64 = 1000.0 / 60.0;
const MAX_TICKS_PER_FRAME: u32 = 4;

/// Log file path; logging is off when unset since the screen belongs to the game
const LOG_ENV: &str = "WRAPSNAKE_LOG";
/// Fixed RNG seed for reproducible food placement
const SEED_ENV: &str = "WRAPSNAKE_SEED";

fn init_logging() -> Result<(), SnakeError> {
    if let Ok(path) = env::var(LOG_ENV) {
        if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), File::create(path)?) {
            eprintln!("Logging disabled: {}", e);
        }
    }
    Ok(())
}

/// Terminal-sized config: the food exclusion zone covers the centered start prompt
fn terminal_config() -> SnakeConfig {
    SnakeConfig {
        exclusion_width: 56.0 * CELL_W,
        exclusion_height: 3.0 * CELL_H,
        ..SnakeConfig::default()
    }
}

fn main() -> Result<(), SnakeError> {
    init_logging()?;

    let (term_width, term_height) = terminal::size()?;
    let config = terminal_config();
    let (width, height) = arena_for_terminal(term_width, term_height, &config)?;

    let rng = match env::var(SEED_ENV).ok().and_then(|s| s.parse::<u64>().ok()) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut renderer = CliRenderer::with_config(&config);
    let mut game = Game::with_config(width, height, config, rng);

    renderer.init()?;
    info!("Arena {}x{} units for {}x{} terminal", width, height, term_width, term_height);

    let token = CancelToken::new();
    let mut clock = TickClock::new(TICK_MS, MAX_TICKS_PER_FRAME);
    let started = Instant::now();

    while !token.is_cancelled() {
        // Poll for input
        if let Some(input) = renderer.poll_input()? {
            if !apply_input(&mut game, input) {
                token.cancel();
                continue;
            }
        }

        // Update game logic at fixed rate
        let now = started.elapsed().as_secs_f64() * 1000.0;
        for _ in 0..clock.advance(now) {
            if let Tick::Collided { score } = game.update() {
                info!("Round over with score {}", score);
            }
        }

        // Let renderer decide when to actually render
        // (it manages its own frame rate internally)
        if let Err(e) = renderer.render(&game) {
            error!("Render failed: {}", e);
            return Err(e.into());
        }
    }

    renderer.cleanup()?;
    info!("Exited cleanly");
    Ok(())
}
