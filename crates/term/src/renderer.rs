//! TerminalRenderer: flushes the display buffer to a character stream.
//!
//! Every cell is printed as its glyph repeated `cell_width` times on a
//! background of the cell color. Terminal glyphs are roughly twice as tall as
//! they are wide, so the default width of 2 gives square pixels. Before each
//! new frame the cursor moves back up over the previous one and the line is
//! cleared, which keeps the redraw in place without an alternate screen.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor},
    terminal, QueueableCommand,
};

use crate::core::PixelBuffer;
use crate::types::{Color, DEFAULT_CELL_WIDTH};

pub struct TerminalRenderer {
    out: Box<dyn Write>,
    cell_width: u16,
    /// Rows printed by the previous frame, rewound before the next one.
    drawn_rows: Option<u16>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    /// Renderer writing to stdout.
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    /// Renderer writing to any sink, e.g. a `Vec<u8>` in tests.
    pub fn with_writer(out: Box<dyn Write>) -> Self {
        Self {
            out,
            cell_width: DEFAULT_CELL_WIDTH,
            drawn_rows: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Terminal columns per cell. Values below 1 are raised to 1.
    pub fn with_cell_width(mut self, cell_width: u16) -> Self {
        self.cell_width = cell_width.max(1);
        self
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_width
    }

    pub fn enter(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(cursor::Hide)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(cursor::Show)?;
        self.flush_buf()
    }

    /// Clear the whole screen and home the cursor.
    pub fn clear_screen(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.buf.queue(cursor::MoveTo(0, 0))?;
        self.flush_buf()?;
        self.drawn_rows = None;
        Ok(())
    }

    /// Print one line of plain text, e.g. the start prompt.
    pub fn message(&mut self, text: &str) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(Print(text))?;
        self.buf.queue(Print("\r\n"))?;
        self.flush_buf()
    }

    /// Draw one frame, rewinding over the previous one first.
    pub fn present(&mut self, display: &PixelBuffer) -> Result<()> {
        self.buf.clear();
        // left untouched until the new frame is flushed
        if let Some(rows) = self.drawn_rows {
            encode_rewind_into(rows, &mut self.buf)?;
        }
        encode_frame_into(display, self.cell_width, &mut self.buf)?;
        self.flush_buf()?;
        self.drawn_rows = Some(display.height());
        Ok(())
    }

    /// Forget the previous frame so the next one is drawn below the cursor
    /// instead of over it.
    pub fn invalidate(&mut self) {
        self.drawn_rows = None;
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode one frame, row by row, into `out`.
///
/// The background color is only re-sent when it changes along a row. Each row
/// ends with a color reset and `\r\n` so the stream stays correct whether or
/// not the terminal is in raw mode.
pub fn encode_frame_into(display: &PixelBuffer, cell_width: u16, out: &mut Vec<u8>) -> Result<()> {
    for y in 0..display.height() {
        let Some(row) = display.row(y) else {
            break;
        };
        let mut current: Option<Color> = None;
        for cell in row {
            if current != Some(cell.color) {
                out.queue(SetBackgroundColor(to_term_color(cell.color)))?;
                current = Some(cell.color);
            }
            for _ in 0..cell_width {
                out.queue(Print(cell.glyph))?;
            }
        }
        out.queue(ResetColor)?;
        out.queue(Print("\r\n"))?;
    }
    Ok(())
}

/// Move the cursor up over `rows` printed rows and clear the line it lands on.
pub fn encode_rewind_into(rows: u16, out: &mut Vec<u8>) -> Result<()> {
    if rows > 0 {
        out.queue(cursor::MoveUp(rows))?;
    }
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    Ok(())
}

fn to_term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}
