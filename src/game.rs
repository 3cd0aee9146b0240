use crate::collision::{food_hit, self_hit};
use crate::config::SnakeConfig;
use crate::entity::{normalize_angle, Point};
use crate::spawn::spawn_food;
use crate::trail::Trail;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Waiting for the player to start
    Idle,
    Playing,
}

/// What a single `update` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Idle,
    Moved { wrapped: bool },
    Ate { score: u32 },
    /// Self-collision; carries the score reached before the reset
    Collided { score: u32 },
}

/// Display-only copy of the state the surrounding UI cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub score: u32,
    pub state: GameState,
}

pub struct Game {
    pub width: f64,
    pub height: f64,
    pub config: SnakeConfig,
    pub head: Point,
    pub angle: f64,
    pub target_angle: f64,
    pub trail: Trail,
    pub food: Point,
    pub score: u32,
    pub state: GameState,
    rng: StdRng,
}

impl Game {
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_config(width, height, SnakeConfig::default(), StdRng::from_entropy())
    }

    /// Deterministic food placement, for tests and reproducible runs
    pub fn with_seed(width: f64, height: f64, seed: u64) -> Self {
        Self::with_config(width, height, SnakeConfig::default(), StdRng::seed_from_u64(seed))
    }

    pub fn with_config(width: f64, height: f64, config: SnakeConfig, rng: StdRng) -> Self {
        let mut game = Self {
            width,
            height,
            head: config.start,
            angle: config.start_angle,
            target_angle: config.start_angle,
            config,
            trail: Trail::new(),
            food: Point::new(0.0, 0.0),
            score: 0,
            state: GameState::Idle,
            rng,
        };
        game.reset();
        game
    }

    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score,
            state: self.state,
        }
    }

    /// Start (or restart) a round from the initial position
    pub fn start(&mut self) {
        self.reset();
        self.state = GameState::Playing;
        info!("Round started in {}x{} arena", self.width, self.height);
    }

    /// Back to the initial state, idle
    pub fn reset(&mut self) {
        let (head, _) = self.config.start.wrapped(self.width, self.height);
        self.head = head;
        self.angle = self.config.start_angle;
        self.target_angle = self.config.start_angle;
        self.score = 0;
        self.trail.reset_straight(
            head,
            self.angle,
            self.config.speed,
            self.config.trail_cap(0),
            (self.width, self.height),
        );
        self.food = spawn_food(&mut self.rng, self.width, self.height, &self.config);
        self.state = GameState::Idle;
    }

    /// Steer towards a pointer position. Ignored while idle; the latest call wins.
    pub fn point_at(&mut self, target: Point) {
        if !self.is_playing() {
            return;
        }
        self.target_angle = self.head.angle_to(target);
    }

    /// New arena size, picked up by the next tick
    pub fn resize(&mut self, width: f64, height: f64) {
        debug!("Arena resized to {}x{}", width, height);
        self.width = width;
        self.height = height;
    }

    pub fn update(&mut self) -> Tick {
        if !self.is_playing() {
            return Tick::Idle;
        }

        // Ease the heading along the shorter arc
        let diff = normalize_angle(self.target_angle - self.angle);
        self.angle += diff * self.config.turn_rate;

        let (head, wrapped) = self
            .head
            .advanced(self.angle, self.config.speed)
            .wrapped(self.width, self.height);
        self.head = head;
        if wrapped {
            debug!("Head wrapped to ({:.1}, {:.1})", head.x, head.y);
        }

        self.trail.push_head(head);
        self.trail.truncate_to(self.config.trail_cap(self.score));

        let ate = food_hit(head, self.food, self.config.pickup_radius);
        if ate {
            self.score += 1;
            self.food = spawn_food(&mut self.rng, self.width, self.height, &self.config);
            debug!("Food eaten, score {}", self.score);
        }

        if self_hit(head, &self.trail, &self.config) {
            let score = self.score;
            info!("Self collision at score {}, back to idle", score);
            self.reset();
            return Tick::Collided { score };
        }

        if ate {
            Tick::Ate { score: self.score }
        } else {
            Tick::Moved { wrapped }
        }
    }
}
