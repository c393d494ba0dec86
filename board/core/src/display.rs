//! Display Boundary
//!
//! The physical panel is a black box behind [`DisplayTarget`]: commit a pixel
//! grid at an origin, then present it. Hardware refresh timing, panel
//! addressing, and frame-buffer transfer all live on the far side of this
//! trait. The core only assumes that the most recently presented grid is what
//! is shown.
//!
//! [`MemoryDisplay`] is the in-process implementation used by tests and by
//! anything that wants to inspect composed frames.

use thiserror::Error;

use crate::frame::Frame;

/// Errors surfaced by a display implementation
#[derive(Debug, Error)]
pub enum DisplayError {
    /// The display hardware or backing stream is gone
    ///
    /// This is the one fault the render loop treats as fatal.
    #[error("Display unavailable: {0}")]
    Unavailable(String),

    /// A commit or present failed transiently
    #[error("Display I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The commit-a-pixel-grid boundary in front of the physical panel
pub trait DisplayTarget: Send {
    /// Stage a frame at the given origin offset
    fn commit(&mut self, frame: &Frame, origin: (i32, i32)) -> Result<(), DisplayError>;

    /// Swap the staged frame into visible output
    fn present(&mut self) -> Result<(), DisplayError>;
}

/// An in-memory display that records what was committed and presented
#[derive(Clone, Debug, Default)]
pub struct MemoryDisplay {
    staged: Frame,
    visible: Frame,
    presents: u64,
}

impl MemoryDisplay {
    /// Create an empty in-memory display
    pub fn new() -> Self {
        Self::default()
    }

    /// The frame most recently swapped into visible output
    pub fn visible(&self) -> &Frame {
        &self.visible
    }

    /// How many times `present` has been called
    pub fn presents(&self) -> u64 {
        self.presents
    }
}

impl DisplayTarget for MemoryDisplay {
    fn commit(&mut self, frame: &Frame, origin: (i32, i32)) -> Result<(), DisplayError> {
        if origin == (0, 0) {
            self.staged = frame.clone();
        } else {
            // Origin offsets shift the grid; anything off-panel is dropped.
            let mut staged = Frame::new();
            for y in 0..frame.height() {
                for x in 0..frame.width() {
                    staged.set_pixel(x + origin.0, y + origin.1, frame.pixel(x, y));
                }
            }
            self.staged = staged;
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.visible = self.staged.clone();
        self.presents += 1;
        Ok(())
    }
}
