use crate::error::SnakeError;
use crate::game::Game;
use crate::render::{self, Surface};
use crate::renderer::{Input, Renderer};
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::io;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent};

/// Inputs collected by the event listeners between frames.
/// Pointer and resize are last-write-wins.
#[derive(Default, Debug)]
pub struct PendingInput {
    pub start: bool,
    pub resize: Option<(f64, f64)>,
    pub pointer: Option<(f64, f64)>,
}

impl PendingInput {
    fn take_next(&mut self) -> Option<Input> {
        if let Some((width, height)) = self.resize.take() {
            return Some(Input::Resize { width, height });
        }
        if std::mem::take(&mut self.start) {
            return Some(Input::Start);
        }
        self.pointer.take().map(|(x, y)| Input::Pointer { x, y })
    }
}

/// 2D canvas context as a frame surface
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
        self.context.set_fill_style_str(render::COLOR_BACKGROUND);
        self.context.fill_rect(0.0, 0.0, width, height);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.context.set_fill_style_str(color);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.context.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn set_line_round(&mut self) {
        self.context.set_line_cap("round");
        self.context.set_line_join("round");
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.context.begin_path();
        if self.context.arc(x, y, radius, 0.0, TAU).is_ok() {
            self.context.fill();
        }
    }

    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.context.begin_path();
        if self.context.arc(x, y, radius, 0.0, TAU).is_ok() {
            self.context.stroke();
        }
    }

    fn begin_path(&mut self) {
        self.context.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
    }

    fn stroke(&mut self) {
        self.context.stroke();
    }
}

pub struct WebRenderer {
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    window: web_sys::Window,
    device_pixel_ratio: f64,
    size: (f64, f64),

    pending_input: Rc<RefCell<PendingInput>>,

    // Kept so they can be detached again on cleanup
    resize_listener: Option<Closure<dyn FnMut()>>,
    pointer_listener: Option<Closure<dyn FnMut(MouseEvent)>>,
    touch_listener: Option<Closure<dyn FnMut(TouchEvent)>>,
}

fn js_err(e: JsValue) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{:?}", e))
}

impl WebRenderer {
    pub fn new(canvas_id: &str) -> Result<Self, SnakeError> {
        let unavailable = |what: &str| SnakeError::SurfaceUnavailable(what.to_string());

        let window = web_sys::window().ok_or_else(|| unavailable("no window"))?;
        let document = window.document().ok_or_else(|| unavailable("no document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| unavailable(&format!("canvas #{} not found", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| unavailable("element is not a canvas"))?;

        let context = canvas
            .get_context("2d")
            .map_err(|_| unavailable("getContext failed"))?
            .ok_or_else(|| unavailable("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| unavailable("no 2d context"))?;

        // Get device pixel ratio for high DPI displays
        let device_pixel_ratio = window.device_pixel_ratio();

        Ok(Self {
            canvas,
            surface: CanvasSurface { context },
            window,
            device_pixel_ratio,
            size: (0.0, 0.0),
            pending_input: Rc::new(RefCell::new(PendingInput::default())),
            resize_listener: None,
            pointer_listener: None,
            touch_listener: None,
        })
    }

    /// Handle the UI layer uses to queue a start/restart
    pub fn pending_input(&self) -> Rc<RefCell<PendingInput>> {
        self.pending_input.clone()
    }

    /// Current viewport size in CSS pixels, which are also game units
    pub fn viewport_size(&self) -> (f64, f64) {
        viewport_size(&self.window)
    }

    fn setup_resize_listener(&mut self) -> io::Result<()> {
        let pending_input = self.pending_input.clone();
        let window = self.window.clone();

        let closure = Closure::wrap(Box::new(move || {
            pending_input.borrow_mut().resize = Some(viewport_size(&window));
        }) as Box<dyn FnMut()>);

        self.window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        self.resize_listener = Some(closure);
        Ok(())
    }

    fn setup_pointer_listeners(&mut self) -> io::Result<()> {
        let pending_input = self.pending_input.clone();
        let canvas = self.canvas.clone();
        let pointer_closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            let rect = canvas.get_bounding_client_rect();
            let x = event.client_x() as f64 - rect.left();
            let y = event.client_y() as f64 - rect.top();
            pending_input.borrow_mut().pointer = Some((x, y));
        }) as Box<dyn FnMut(MouseEvent)>);

        self.window
            .add_event_listener_with_callback("pointerdown", pointer_closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        self.pointer_listener = Some(pointer_closure);

        let pending_input = self.pending_input.clone();
        let canvas = self.canvas.clone();
        let touch_closure = Closure::wrap(Box::new(move |event: TouchEvent| {
            event.prevent_default(); // Prevent zooming, scrolling, etc.

            if let Some(touch) = event.touches().item(0) {
                let rect = canvas.get_bounding_client_rect();
                let x = touch.client_x() as f64 - rect.left();
                let y = touch.client_y() as f64 - rect.top();
                pending_input.borrow_mut().pointer = Some((x, y));
            }
        }) as Box<dyn FnMut(TouchEvent)>);

        self.canvas
            .add_event_listener_with_callback("touchstart", touch_closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        self.touch_listener = Some(touch_closure);

        Ok(())
    }

    fn fit_canvas(&mut self, width: f64, height: f64) -> io::Result<()> {
        if self.size == (width, height) {
            return Ok(());
        }
        self.size = (width, height);

        // Internal resolution (actual pixels, scaled for high DPI)
        self.canvas.set_width((width * self.device_pixel_ratio) as u32);
        self.canvas.set_height((height * self.device_pixel_ratio) as u32);

        // CSS display size
        let element: &HtmlElement = self.canvas.unchecked_ref();
        element
            .style()
            .set_property("width", &format!("{}px", width))
            .map_err(js_err)?;
        element
            .style()
            .set_property("height", &format!("{}px", height))
            .map_err(js_err)?;

        // Setting width/height resets the context transform
        self.surface
            .context
            .scale(self.device_pixel_ratio, self.device_pixel_ratio)
            .map_err(js_err)?;
        Ok(())
    }
}

fn viewport_size(window: &web_sys::Window) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(600.0);
    (width, height)
}

impl Renderer for WebRenderer {
    fn init(&mut self) -> io::Result<()> {
        self.setup_resize_listener()?;
        self.setup_pointer_listeners()?;
        Ok(())
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        self.fit_canvas(game.width, game.height)?;
        render::draw_frame(&mut self.surface, game);
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        if let Some(closure) = self.resize_listener.take() {
            self.window
                .remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
                .map_err(js_err)?;
        }
        if let Some(closure) = self.pointer_listener.take() {
            self.window
                .remove_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())
                .map_err(js_err)?;
        }
        if let Some(closure) = self.touch_listener.take() {
            self.canvas
                .remove_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())
                .map_err(js_err)?;
        }
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        Ok(self.pending_input.borrow_mut().take_next())
    }
}

impl Drop for WebRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
