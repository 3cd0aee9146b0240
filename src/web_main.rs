use crate::game::{Game, Snapshot, Tick};
use crate::lifecycle::{CancelToken, TickClock};
use crate::renderer::{apply_input, Renderer};
use crate::web_renderer::{PendingInput, WebRenderer};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const TICK_MS: f64 = 1000.0 / 60.0; // One logical step per 60 Hz frame
const MAX_TICKS_PER_FRAME: u32 = 4;

struct GameLoop {
    game: Game,
    renderer: WebRenderer,
    clock: TickClock,
}

impl GameLoop {
    fn new(canvas_id: &str) -> Result<Self, JsValue> {
        let mut renderer =
            WebRenderer::new(canvas_id).map_err(|e| JsValue::from_str(&e.to_string()))?;
        renderer.init().map_err(|e| JsValue::from_str(&e.to_string()))?;

        let (width, height) = renderer.viewport_size();
        let game = Game::new(width, height);

        Ok(Self {
            game,
            renderer,
            clock: TickClock::new(TICK_MS, MAX_TICKS_PER_FRAME),
        })
    }

    fn update_frame(&mut self, current_time: f64) -> Result<(), JsValue> {
        while let Some(input) = self
            .renderer
            .poll_input()
            .map_err(|e| JsValue::from_str(&e.to_string()))?
        {
            apply_input(&mut self.game, input);
        }

        for _ in 0..self.clock.advance(current_time) {
            if let Tick::Collided { score } = self.game.update() {
                web_sys::console::log_1(&format!("[WASM] Collision at score {}", score).into());
            }
        }

        self.renderer
            .render(&self.game)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(())
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle the surrounding page keeps to drive the game
#[wasm_bindgen]
pub struct SnakeHandle {
    game_loop: Rc<RefCell<GameLoop>>,
    pending_input: Rc<RefCell<PendingInput>>,
    snapshot: Rc<Cell<Snapshot>>,
    token: CancelToken,
    frame_id: Rc<Cell<Option<i32>>>,
    frame_callback: FrameCallback,
}

#[wasm_bindgen]
impl SnakeHandle {
    /// Start or restart a round
    pub fn start(&self) {
        self.pending_input.borrow_mut().start = true;
    }

    pub fn score(&self) -> u32 {
        self.snapshot.get().score
    }

    pub fn is_playing(&self) -> bool {
        self.snapshot.get().state == crate::game::GameState::Playing
    }

    /// Stop scheduling frames and detach every listener
    pub fn stop(&self) {
        if self.token.is_cancelled() {
            return;
        }
        self.token.cancel();

        if let (Some(id), Some(window)) = (self.frame_id.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }

        if let Err(e) = self.game_loop.borrow_mut().renderer.cleanup() {
            web_sys::console::error_1(&format!("[WASM] Cleanup failed: {}", e).into());
        }

        // Breaks the callback's reference to itself
        self.frame_callback.borrow_mut().take();

        web_sys::console::log_1(&"[WASM] Snake stopped".into());
    }
}

fn request_frame(callback: &FrameCallback) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let borrowed = callback.borrow();
    let closure = borrowed.as_ref().ok_or("frame callback dropped")?;
    window.request_animation_frame(closure.as_ref().unchecked_ref())
}

#[wasm_bindgen]
pub fn start_snake(canvas_id: &str) -> Result<SnakeHandle, JsValue> {
    // Set panic hook for better error messages
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    web_sys::console::log_1(&"[WASM] Starting snake...".into());

    let window = web_sys::window().ok_or("no window")?;
    let performance = window.performance().ok_or("no performance")?;

    // No drawing surface, no loop
    let game_loop = match GameLoop::new(canvas_id) {
        Ok(gl) => Rc::new(RefCell::new(gl)),
        Err(e) => {
            web_sys::console::error_1(&format!("[WASM] Failed to create game loop: {:?}", e).into());
            return Err(e);
        }
    };

    let pending_input = game_loop.borrow().renderer.pending_input();
    let snapshot = Rc::new(Cell::new(game_loop.borrow().game.snapshot()));
    let token = CancelToken::new();
    let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    // Create closure for animation frame
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();

    let loop_clone = game_loop.clone();
    let snapshot_clone = snapshot.clone();
    let token_clone = token.clone();
    let frame_id_clone = frame_id.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_id_clone.set(None);
        if token_clone.is_cancelled() {
            return;
        }

        let current_time = performance.now();
        {
            let mut gl = loop_clone.borrow_mut();
            if let Err(e) = gl.update_frame(current_time) {
                web_sys::console::error_1(&e);
                return; // Stop loop on error
            }
            snapshot_clone.set(gl.game.snapshot());
        }

        // Schedule next frame
        match request_frame(&f) {
            Ok(id) => frame_id_clone.set(Some(id)),
            Err(e) => web_sys::console::error_1(&e),
        }
    }) as Box<dyn FnMut()>));

    // Start the loop
    match request_frame(&g) {
        Ok(id) => frame_id.set(Some(id)),
        Err(e) => {
            g.borrow_mut().take();
            if let Err(cleanup_err) = game_loop.borrow_mut().renderer.cleanup() {
                web_sys::console::error_1(&format!("[WASM] Cleanup failed: {}", cleanup_err).into());
            }
            return Err(e);
        }
    }

    web_sys::console::log_1(&"[WASM] Snake loop started".into());

    Ok(SnakeHandle {
        game_loop,
        pending_input,
        snapshot,
        token,
        frame_id,
        frame_callback: g,
    })
}
