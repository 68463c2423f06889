/// Presentation layer: double-buffered, diff-based terminal surface.
///
/// How it works:
///   1. Surface calls (`clear`, `draw_text`, ...) build the next frame into
///      the `front` buffer (array of Cell)
///   2. `present` compares each cell with the `back` buffer (previous frame)
///   3. Only cells that changed produce terminal commands
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// Coordinates coming in are virtual pixels. One terminal cell is
/// `CELL_PX_W` x `CELL_PX_H` pixels, so a 20px text line is one row.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, SetTitle},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::error::GameError;
use super::surface::{Align, Font, Surface, TextMeasure};

pub const CELL_PX_W: f32 = 10.0;
pub const CELL_PX_H: f32 = 20.0;

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: [u8; 4],
    ch_len: u8,
    fg: Color,
    bg: Color,
    bold: bool,
    wide: bool,    // true = this char occupies 2 terminal columns
    cont: bool,    // true = continuation of previous wide char (skip render)
}

impl Cell {
    const fn blank(bg: Color) -> Self {
        Cell {
            ch: [b' ', 0, 0, 0],
            ch_len: 1,
            fg: Color::White,
            bg,
            bold: false,
            wide: false,
            cont: false,
        }
    }

    /// Sentinel cell used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell {
        ch: [b'?', 0, 0, 0],
        ch_len: 1,
        fg: Color::Magenta,
        bg: Color::Magenta,
        bold: true,
        wide: false,
        cont: false,
    };

    fn from_char(c: char, fg: Color, bg: Color, bold: bool, wide: bool) -> Self {
        let mut cell = Self::blank(bg);
        let len = c.encode_utf8(&mut cell.ch).len() as u8;
        cell.ch_len = len;
        cell.fg = fg;
        cell.bold = bold;
        cell.wide = wide;
        cell
    }

    fn continuation(bg: Color) -> Self {
        Cell { ch: [0; 4], ch_len: 0, cont: true, ..Self::blank(bg) }
    }

    fn as_str(&self) -> &str {
        std::str::from_utf8(&self.ch[..self.ch_len as usize]).unwrap_or(" ")
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer {
            width: w,
            height: h,
            cells: vec![Cell::blank(Color::Black); w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::blank(Color::Black); w * h];
        }
    }

    fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.cells[y as usize * self.width + x as usize] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::blank(Color::Black)
        }
    }
}

// ── Renderer ──

/// A terminal with no rows or no columns has nothing to draw on.
fn check_surface(cols: u16, rows: u16) -> Result<(), GameError> {
    if cols == 0 || rows == 0 {
        return Err(GameError::SurfaceUnavailable { cols, rows });
    }
    Ok(())
}

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    bg: Color,
    font: Font,
    /// Origin (px) and rotation applied to `draw_text`.
    transform: (f32, f32, f32),
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            bg: Color::Black,
            font: Font::Alien,
            transform: (0.0, 0.0, 0.0),
        }
    }

    /// Enter raw mode + alternate screen. Fails when the terminal is
    /// unusable or reports a zero-sized area; nothing is drawn then.
    pub fn init(&mut self) -> Result<(), GameError> {
        let (tw, th) = terminal::size().map_err(GameError::TerminalInit)?;
        check_surface(tw, th)?;

        terminal::enable_raw_mode().map_err(GameError::TerminalInit)?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(self.bg),
            Clear(ClearType::All)
        ).map_err(GameError::TerminalInit)?;

        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame: back ≠ front for every cell.
        self.back.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            SetAttribute(Attribute::Reset),
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn set_title(&mut self, title: &str) -> io::Result<()> {
        execute!(self.writer, SetTitle(title))
    }

    /// Pick up a terminal size change. Returns the new size in pixels
    /// when it changed.
    pub fn sync_size(&mut self) -> io::Result<Option<(f32, f32)>> {
        let (tw, th) = terminal::size()?;
        if tw as usize == self.term_w && th as usize == self.term_h {
            return Ok(None);
        }
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint after resize.
        self.back.fill(Cell::INVALID);
        queue!(self.writer, SetBackgroundColor(self.bg), Clear(ClearType::All))?;
        Ok(Some(self.size()))
    }

    /// Diff the composed frame against the last one and emit it.
    pub fn present(&mut self) -> io::Result<()> {
        self.flush_diff()?;
        // Swap: current front becomes next back
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = self.bg;
        let mut last_bold = false;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        queue!(self.writer,
            SetAttribute(Attribute::NormalIntensity),
            SetForegroundColor(last_fg),
            SetBackgroundColor(last_bg),
        )?;

        for y in 0..self.front.height {
            let mut x = 0;
            while x < self.front.width {
                let cell = self.front.get(x, y);
                let prev = self.back.get(x, y);

                // Skip continuation cells (right half of wide glyphs)
                if cell.cont {
                    if cell != prev { need_move = true; }
                    x += 1;
                    continue;
                }

                let cont_changed = cell.wide
                    && x + 1 < self.front.width
                    && self.front.get(x + 1, y) != self.back.get(x + 1, y);

                if cell == prev && !cont_changed {
                    need_move = true;
                    x += 1;
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
                if cell.bold != last_bold {
                    let attr = if cell.bold { Attribute::Bold } else { Attribute::NormalIntensity };
                    queue!(self.writer, SetAttribute(attr))?;
                    last_bold = cell.bold;
                }

                queue!(self.writer, Print(cell.as_str()))?;

                if cell.wide {
                    last_x = x + 1;
                    x += 2;
                } else {
                    last_x = x;
                    x += 1;
                }
                last_y = y;
            }
        }

        self.writer.flush()
    }
}

impl TextMeasure for Renderer {
    fn measure_text(&self, text: &str) -> f32 {
        text_width_px(text)
    }
}

impl Surface for Renderer {
    fn size(&self) -> (f32, f32) {
        (self.term_w as f32 * CELL_PX_W, self.term_h as f32 * CELL_PX_H)
    }

    fn clear(&mut self, color: Color) {
        self.bg = color;
        self.front.fill(Cell::blank(color));
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn set_transform(&mut self, x: f32, y: f32, angle: f32) {
        self.transform = (x, y, angle);
    }

    fn reset_transform(&mut self) {
        self.transform = (0.0, 0.0, 0.0);
    }

    /// Terminal glyphs can't be rotated; rotation is rendered as a
    /// vertical shear along the baseline (each glyph drops by
    /// `advance * sin(angle)`).
    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Color, align: Align) {
        let (ox, oy, angle) = self.transform;
        let width = text_width_px(text);
        let start_x = ox + x - match align {
            Align::Start => 0.0,
            Align::Center => width / 2.0,
            Align::End => width,
        };
        let bold = self.font == Font::Hud;
        let slope = angle.sin();

        let mut advance = 0.0;
        for ch in text.chars() {
            let cols = ch.width().unwrap_or(0);
            if cols == 0 {
                continue;
            }
            let col = px_to_col(start_x + advance);
            let row = px_to_row(oy + y + advance * slope);
            let wide = cols > 1;
            self.front.set(col, row, Cell::from_char(ch, color, self.bg, bold, wide));
            if wide {
                self.front.set(col + 1, row, Cell::continuation(self.bg));
            }
            advance += cols as f32 * CELL_PX_W;
        }
    }
}

pub fn text_width_px(text: &str) -> f32 {
    UnicodeWidthStr::width(text) as f32 * CELL_PX_W
}

fn px_to_col(px: f32) -> i32 {
    (px / CELL_PX_W).floor() as i32
}

fn px_to_row(px: f32) -> i32 {
    (px / CELL_PX_H).floor() as i32
}
