/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next screen into the `front` buffer (array of Cell)
///   2. Compare each cell with the `back` buffer (previous screen)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!` and flushed once at the end
///   5. Swap front/back
///
/// Redrawing only the changed cells keeps the screen from flickering.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::error::{GameError, GameResult};
use crate::sim::frame::Frame;

/// Where frames and messages go.
pub trait DisplaySink {
    /// Draw one play-screen frame.
    fn present(&mut self, frame: &Frame) -> GameResult<()>;

    /// Replace the screen with a block of text (prompts, round summary).
    fn show_message(&mut self, lines: &[String]) -> GameResult<()>;
}

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
}

impl Cell {
    const BLANK: Cell = Cell { ch: ' ', fg: Color::White };

    /// Sentinel used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell { ch: '\0', fg: Color::Magenta };

    /// Colour for a map glyph. Anything else is plain text.
    fn map_glyph(ch: char) -> Self {
        let fg = match ch {
            'H' => Color::DarkGrey,
            'P' => Color::Yellow,
            'X' => Color::Red,
            'O' => Color::Green,
            _ => Color::White,
        };
        Cell { ch, fg }
    }

    fn text(ch: char) -> Self {
        Cell { ch, fg: Color::White }
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

    fn invalidate(&mut self) {
        self.cells.fill(Cell::INVALID);
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

    /// Write one line starting at column 0. Clipped at the buffer edge.
    fn put_line(&mut self, y: usize, s: &str, make: fn(char) -> Cell) {
        for (x, ch) in s.chars().enumerate() {
            if x >= self.width { break; }
            self.set(x, y, make(ch));
        }
    }
}

// ── Renderer ──

pub struct TerminalRenderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        TerminalRenderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
        }
    }

    /// Enter raw mode and the alternate screen.
    pub fn init(&mut self) -> GameResult<()> {
        terminal::enable_raw_mode().map_err(GameError::Display)?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )
        .map_err(GameError::Display)?;
        self.sync_size(false)?;
        Ok(())
    }

    /// Restore the terminal. Safe to call after a failed `init`.
    pub fn cleanup(&mut self) -> GameResult<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )
        .map_err(GameError::Display)?;
        terminal::disable_raw_mode().map_err(GameError::Display)
    }

    /// Pick up the terminal size; on change, force a full repaint.
    fn sync_size(&mut self, clear: bool) -> GameResult<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.invalidate();
            if clear {
                queue!(self.writer, Clear(ClearType::All)).map_err(GameError::Display)?;
            }
        }
        Ok(())
    }

    fn draw(&mut self, compose: impl FnOnce(&mut FrameBuffer)) -> GameResult<()> {
        self.sync_size(true)?;
        self.front.clear();
        compose(&mut self.front);
        self.flush_diff().map_err(GameError::Display)?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        queue!(self.writer, SetForegroundColor(Color::White))?;

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
                queue!(self.writer, Print(cell.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }
}

impl DisplaySink for TerminalRenderer {
    fn present(&mut self, frame: &Frame) -> GameResult<()> {
        self.draw(|buf| {
            for (y, row) in frame.rows.iter().enumerate() {
                buf.put_line(y, row, Cell::map_glyph);
            }
            let top = frame.rows.len();
            for (i, line) in frame.status.iter().enumerate() {
                buf.put_line(top + i, line, Cell::text);
            }
        })
    }

    fn show_message(&mut self, lines: &[String]) -> GameResult<()> {
        self.draw(|buf| {
            for (y, line) in lines.iter().enumerate() {
                buf.put_line(y, line, Cell::text);
            }
        })
    }
}

/// Keeps everything it was asked to show, for tests.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingDisplay {
    pub frames: Vec<Frame>,
    pub messages: Vec<Vec<String>>,
}

#[cfg(test)]
impl DisplaySink for RecordingDisplay {
    fn present(&mut self, frame: &Frame) -> GameResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn show_message(&mut self, lines: &[String]) -> GameResult<()> {
        self.messages.push(lines.to_vec());
        Ok(())
    }
}
