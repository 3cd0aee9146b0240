use crate::config::SnakeConfig;
use crate::entity::Point;
use crate::error::SnakeError;
use crate::game::{Game, GameState};
use crate::render::{self, Surface};
use crate::renderer::{Input, Renderer};
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, MouseEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::f64::consts::{FRAC_PI_2, PI};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Game units covered by one terminal column / row
pub const CELL_W: f64 = 6.0;
pub const CELL_H: f64 = 12.0;

/// Lines reserved below the arena for the score line
pub const INFO_LINES: u16 = 2;

const MIN_COLS: u16 = 20;
const MIN_ROWS: u16 = 8;

/// How far ahead of the head an arrow key places the virtual pointer
const ARROW_REACH: f64 = 120.0;

pub const START_PROMPT: &str = "SPACE to start | click or arrows to steer | Q to quit";

/// Narrowest terminal that holds the starting body in one row.
///
/// The straight starting trail spans `(trail_cap(0) - 1) * speed` units and is
/// continued modulo the arena, so the arena must be wider than that plus the
/// collision radius or the wrapped tail sits on the head.
pub fn min_cols(cfg: &SnakeConfig) -> u16 {
    let body = cfg.trail_cap(0).saturating_sub(1) as f64 * cfg.speed + cfg.collision_radius;
    let cols = (body / CELL_W).floor() as u16;
    cols.saturating_add(1).max(MIN_COLS)
}

/// Arena size in game units for a terminal of `cols` x `rows`
pub fn arena_for_terminal(
    cols: u16,
    rows: u16,
    cfg: &SnakeConfig,
) -> Result<(f64, f64), SnakeError> {
    if cols < min_cols(cfg) || rows < MIN_ROWS + INFO_LINES {
        return Err(SnakeError::ArenaTooSmall {
            width: cols,
            height: rows,
        });
    }
    Ok((cols as f64 * CELL_W, (rows - INFO_LINES) as f64 * CELL_H))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Empty,
    Trail,
    Food,
    Ring,
    Head,
}

impl Glyph {
    fn for_color(color: &str) -> Glyph {
        match color {
            render::COLOR_TRAIL => Glyph::Trail,
            render::COLOR_FOOD => Glyph::Food,
            render::COLOR_FOOD_RING => Glyph::Ring,
            render::COLOR_HEAD => Glyph::Head,
            _ => Glyph::Empty,
        }
    }
}

/// Character grid the frame primitives are rasterized onto
pub struct CharGrid {
    cols: usize,
    rows: usize,
    cells: Vec<Glyph>,
    fill: Glyph,
    stroke: Glyph,
    pen: Option<(f64, f64)>,
    path: Vec<((f64, f64), (f64, f64))>,
}

impl CharGrid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Glyph::Empty; cols * rows],
            fill: Glyph::Empty,
            stroke: Glyph::Empty,
            pen: None,
            path: Vec::new(),
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn glyph_at(&self, col: usize, row: usize) -> Glyph {
        if col >= self.cols || row >= self.rows {
            return Glyph::Empty;
        }
        self.cells[row * self.cols + col]
    }

    fn cell_of(x: f64, y: f64) -> (i64, i64) {
        ((x / CELL_W).floor() as i64, (y / CELL_H).floor() as i64)
    }

    fn put(&mut self, col: i64, row: i64, glyph: Glyph) {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return;
        }
        self.cells[row as usize * self.cols + col as usize] = glyph;
    }

    fn rasterize_line(&mut self, from: (f64, f64), to: (f64, f64), glyph: Glyph) {
        let (c0, r0) = Self::cell_of(from.0, from.1);
        let (c1, r1) = Self::cell_of(to.0, to.1);
        let steps = (c1 - c0).abs().max((r1 - r0).abs()).max(1);

        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let x = from.0 + (to.0 - from.0) * t;
            let y = from.1 + (to.1 - from.1) * t;
            let (c, r) = Self::cell_of(x, y);
            self.put(c, r, glyph);
        }
    }

    /// Cells in the bounding box of a circle, with their center's distance to (x, y)
    fn cells_around(&self, x: f64, y: f64, radius: f64) -> Vec<(i64, i64, f64)> {
        let (c0, r0) = Self::cell_of(x - radius, y - radius);
        let (c1, r1) = Self::cell_of(x + radius, y + radius);

        let mut out = Vec::new();
        for r in r0..=r1 {
            for c in c0..=c1 {
                let center = Point::new((c as f64 + 0.5) * CELL_W, (r as f64 + 0.5) * CELL_H);
                out.push((c, r, center.distance(Point::new(x, y))));
            }
        }
        out
    }
}

impl Surface for CharGrid {
    fn clear(&mut self, _width: f64, _height: f64) {
        self.cells.fill(Glyph::Empty);
        self.pen = None;
        self.path.clear();
    }

    fn set_fill_style(&mut self, color: &str) {
        self.fill = Glyph::for_color(color);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.stroke = Glyph::for_color(color);
    }

    fn set_line_width(&mut self, _width: f64) {}

    fn set_line_round(&mut self) {}

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        let glyph = self.fill;
        for (c, r, d) in self.cells_around(x, y, radius) {
            if d <= radius {
                self.put(c, r, glyph);
            }
        }
        // Always at least the cell under the center
        let (c, r) = Self::cell_of(x, y);
        self.put(c, r, glyph);
    }

    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64) {
        let glyph = self.stroke;
        let (center_c, center_r) = Self::cell_of(x, y);
        for (c, r, d) in self.cells_around(x, y, radius + CELL_W) {
            let on_ring = (d - radius).abs() <= CELL_W / 2.0;
            let free = c >= 0 && r >= 0 && self.glyph_at(c as usize, r as usize) == Glyph::Empty;
            if on_ring && free && (c, r) != (center_c, center_r) {
                self.put(c, r, glyph);
            }
        }
    }

    fn begin_path(&mut self) {
        self.pen = None;
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.pen = Some((x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if let Some(from) = self.pen {
            self.path.push((from, (x, y)));
        }
        self.pen = Some((x, y));
    }

    fn stroke(&mut self) {
        let glyph = self.stroke;
        let path = std::mem::take(&mut self.path);
        for (from, to) in path {
            self.rasterize_line(from, to, glyph);
        }
    }
}

pub struct CliRenderer {
    grid: CharGrid,
    last_render: Instant,
    target_frame_time: Duration,
    poll_timeout: Duration,
    last_head: Point,
    min_cols: u16,
    active: bool,
}

impl CliRenderer {
    pub fn new() -> Self {
        Self::with_config(&SnakeConfig::default())
    }

    /// Renderer whose resize handling keeps the arena playable for `cfg`
    pub fn with_config(cfg: &SnakeConfig) -> Self {
        Self {
            grid: CharGrid::new(0, 0),
            last_render: Instant::now(),
            // Target 30 FPS for smooth rendering
            target_frame_time: Duration::from_millis(33),
            poll_timeout: Duration::from_millis(4),
            last_head: Point::new(0.0, 0.0),
            min_cols: min_cols(cfg),
            active: false,
        }
    }

    fn draw_glyph(&self, glyph: Glyph, stdout: &mut io::Stdout) -> io::Result<()> {
        match glyph {
            Glyph::Empty => {
                queue!(stdout, SetBackgroundColor(Color::Black), Print(" "))?;
            }
            Glyph::Trail => {
                queue!(stdout, SetBackgroundColor(Color::Green), Print(" "))?;
            }
            Glyph::Food => {
                queue!(
                    stdout,
                    SetBackgroundColor(Color::Red),
                    SetForegroundColor(Color::White),
                    Print("*")
                )?;
            }
            Glyph::Ring => {
                queue!(
                    stdout,
                    SetBackgroundColor(Color::Black),
                    SetForegroundColor(Color::DarkRed),
                    Print(".")
                )?;
            }
            Glyph::Head => {
                queue!(
                    stdout,
                    SetBackgroundColor(Color::White),
                    SetForegroundColor(Color::Black),
                    Print("@")
                )?;
            }
        }
        Ok(())
    }

    fn draw_info(&self, game: &Game, stdout: &mut io::Stdout) -> io::Result<()> {
        let rows = self.grid.rows() as u16;

        queue!(
            stdout,
            cursor::MoveTo(0, rows),
            ResetColor,
            terminal::Clear(ClearType::CurrentLine),
            Print(format!("Score: {}  Length: {}", game.score, game.trail.len()))
        )?;

        if game.state == GameState::Idle {
            // Centered over the arena, inside the food exclusion zone
            let col = (self.grid.cols() as u16).saturating_sub(START_PROMPT.len() as u16) / 2;
            queue!(
                stdout,
                cursor::MoveTo(col, rows / 2),
                SetForegroundColor(Color::Yellow),
                Print(START_PROMPT),
                ResetColor
            )?;
        }

        Ok(())
    }

    fn arrow_pointer(&self, angle: f64) -> Input {
        let p = self.last_head.advanced(angle, ARROW_REACH);
        Input::Pointer { x: p.x, y: p.y }
    }
}

impl Renderer for CliRenderer {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            EnableMouseCapture,
            cursor::Hide
        )?;
        self.active = true;
        Ok(())
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        self.last_head = game.head;

        // Frame rate limiting: skip rendering if not enough time has passed
        if self.last_render.elapsed() < self.target_frame_time {
            return Ok(());
        }

        self.last_render = Instant::now();

        let cols = (game.width / CELL_W).floor() as usize;
        let rows = (game.height / CELL_H).floor() as usize;
        if self.grid.cols() != cols || self.grid.rows() != rows {
            self.grid = CharGrid::new(cols, rows);
            execute!(io::stdout(), terminal::Clear(ClearType::All))?;
        }

        render::draw_frame(&mut self.grid, game);

        let mut stdout = io::stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        for row in 0..rows {
            for col in 0..cols {
                self.draw_glyph(self.grid.glyph_at(col, row), &mut stdout)?;
            }
            queue!(stdout, ResetColor, Print("\r\n"))?;
        }

        self.draw_info(game, &mut stdout)?;

        stdout.flush()?;
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        // Already restored, or never taken over
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let mut stdout = io::stdout();
        execute!(
            stdout,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        if !event::poll(self.poll_timeout)? {
            return Ok(None);
        }

        let input = match event::read()? {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Input::Quit),
                KeyCode::Char(' ') | KeyCode::Enter => Some(Input::Start),
                KeyCode::Up => Some(self.arrow_pointer(-FRAC_PI_2)),
                KeyCode::Down => Some(self.arrow_pointer(FRAC_PI_2)),
                KeyCode::Left => Some(self.arrow_pointer(PI)),
                KeyCode::Right => Some(self.arrow_pointer(0.0)),
                _ => None,
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(_) => Some(Input::Pointer {
                    x: (mouse.column as f64 + 0.5) * CELL_W,
                    y: (mouse.row as f64 + 0.5) * CELL_H,
                }),
                _ => None,
            },
            Event::Resize(cols, rows) => {
                let cols = cols.max(self.min_cols);
                let rows = rows.max(MIN_ROWS + INFO_LINES);
                Some(Input::Resize {
                    width: cols as f64 * CELL_W,
                    height: (rows - INFO_LINES) as f64 * CELL_H,
                })
            }
            _ => None,
        };

        Ok(input)
    }
}

impl Drop for CliRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
