/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into the `front` buffer (array of Cell)
///   2. Compare each cell with the `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// One maze cell spans two terminal columns so tiles come out roughly
/// square. Draw order per frame: background, wall tiles, player, coin
/// markers, HUD text.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::sim::world::WorldState;

// ── Palette (from the jungle theme) ──

const JUNGLE_GREEN: Color = Color::Rgb { r: 34, g: 139, b: 34 };
const WALL_BROWN: Color = Color::Rgb { r: 139, g: 69, b: 19 };
const PLAYER_RED: Color = Color::Rgb { r: 220, g: 40, b: 40 };
const COIN_YELLOW: Color = Color::Rgb { r: 255, g: 255, b: 0 };

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: JUNGLE_GREEN };

    /// Sentinel that differs from any real cell, so every position
    /// diffs as changed (forces a full repaint).
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Cell { ch, fg, bg });
            cx += 1;
        }
    }
}

// ── Renderer ──

/// Each maze cell is 2 terminal columns wide.
const CELL_W: usize = 2;

const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(JUNGLE_GREEN),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame.
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, world: &WorldState) -> io::Result<()> {
        // Detect terminal resize → full repaint
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(JUNGLE_GREEN), Clear(ClearType::All))?;
        }

        self.front.clear();

        let need_w = world.maze.cols * CELL_W;
        let need_h = MAP_ROW + world.maze.rows + 2;
        if self.term_w < need_w || self.term_h < need_h {
            let msg = format!(
                "Terminal too small: need {}x{}, have {}x{}",
                need_w, need_h, self.term_w, self.term_h
            );
            self.front.put_str(0, 0, &msg, Color::White, JUNGLE_GREEN);
        } else {
            self.compose_game(world);
        }

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Compose: build front buffer content ──

    fn compose_game(&mut self, world: &WorldState) {
        let maze = &world.maze;

        // Wall tiles; Floor and Coin cells stay background.
        for y in 0..maze.rows {
            for x in 0..maze.cols {
                if maze.cell_at(x, y).is_wall() {
                    self.put_tile(x, y, ' ', WALL_BROWN, WALL_BROWN);
                }
            }
        }

        // Player tile.
        self.put_tile(world.player.x, world.player.y, ' ', PLAYER_RED, PLAYER_RED);

        // Coin markers, drawn from the pruned coin list.
        for &(x, y) in &maze.coins {
            self.put_tile(x, y, 'o', COIN_YELLOW, JUNGLE_GREEN);
        }

        // HUD
        let hud = format!(
            " Level {}/{}   Score: {}   High Score: {}   Coins: {} ",
            world.level + 1,
            world.total_levels,
            world.tracker.score(),
            world.tracker.high_score(),
            world.player.coins_collected,
        );
        self.front.put_str(1, HUD_ROW, &hud, Color::White, JUNGLE_GREEN);

        // Transient message line below the map.
        if !world.message.is_empty() {
            let row = MAP_ROW + maze.rows + 1;
            let col = (self.term_w.saturating_sub(world.message.len())) / 2;
            self.front.put_str(col, row, &world.message, Color::White, JUNGLE_GREEN);
        }
    }

    /// Paint one maze cell (2 terminal columns). The marker char sits in
    /// the left column.
    fn put_tile(&mut self, x: usize, y: usize, ch: char, fg: Color, bg: Color) {
        let tx = x * CELL_W;
        let ty = MAP_ROW + y;
        self.front.set(tx, ty, Cell { ch, fg, bg });
        self.front.set(tx + 1, ty, Cell { ch: ' ', fg, bg });
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = JUNGLE_GREEN;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        queue!(
            self.writer,
            SetForegroundColor(last_fg),
            SetBackgroundColor(last_bg),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                queue!(self.writer, Print(cell.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }
}
