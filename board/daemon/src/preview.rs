//! Terminal Preview Display
//!
//! Renders committed frames into the terminal with half-block characters,
//! two panel rows per text row. Useful anywhere real matrix hardware is not
//! attached: development, demos, and eyeballing layout changes.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Colors, Print, ResetColor, SetColors};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;

use stockboard_core::{DisplayError, DisplayTarget, Frame, Rgb};

fn term_color(color: Rgb) -> Color {
    Color::Rgb {
        r: color.0,
        g: color.1,
        b: color.2,
    }
}

/// A [`DisplayTarget`] that paints frames into the terminal
pub struct TerminalPreview {
    out: Stdout,
    staged: Frame,
}

impl TerminalPreview {
    /// Claim the terminal: clear it and hide the cursor
    pub fn new() -> Result<Self, DisplayError> {
        let mut out = io::stdout();
        out.queue(Clear(ClearType::All))?;
        out.queue(Hide)?;
        out.flush()?;
        Ok(Self {
            out,
            staged: Frame::new(),
        })
    }
}

impl DisplayTarget for TerminalPreview {
    fn commit(&mut self, frame: &Frame, origin: (i32, i32)) -> Result<(), DisplayError> {
        if origin == (0, 0) {
            self.staged = frame.clone();
        } else {
            self.staged.clear();
            for y in 0..frame.height() {
                for x in 0..frame.width() {
                    self.staged
                        .set_pixel(x + origin.0, y + origin.1, frame.pixel(x, y));
                }
            }
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        let result = self.draw();
        // A vanished terminal is the preview's version of unplugged hardware.
        if let Err(e) = &result {
            if e.kind() == io::ErrorKind::BrokenPipe {
                return Err(DisplayError::Unavailable("terminal stream closed".into()));
            }
        }
        result.map_err(DisplayError::from)
    }
}

impl TerminalPreview {
    fn draw(&mut self) -> io::Result<()> {
        for row in 0..(self.staged.height() / 2) {
            self.out.queue(MoveTo(0, row as u16))?;
            for x in 0..self.staged.width() {
                let upper = self.staged.pixel(x, row * 2);
                let lower = self.staged.pixel(x, row * 2 + 1);
                self.out.queue(SetColors(Colors::new(
                    term_color(upper),
                    term_color(lower),
                )))?;
                self.out.queue(Print('\u{2580}'))?;
            }
        }
        self.out.queue(ResetColor)?;
        self.out.flush()
    }
}

impl Drop for TerminalPreview {
    fn drop(&mut self) {
        let _ = self.out.queue(ResetColor);
        let _ = self.out.queue(Show);
        let _ = self.out.flush();
    }
}
