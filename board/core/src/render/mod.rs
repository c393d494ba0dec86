//! Render State Machine
//!
//! The phase model driving the panel: splash -> waiting -> starting ->
//! active -> postgame -> waiting, re-derived from a fresh state snapshot on
//! every tick. Scene drawing lives in [`scenes`]; the tick driver and phase
//! transitions live in [`machine`].

mod machine;
mod scenes;

pub use machine::RenderMachine;
pub use scenes::{build_background, draw_overlay, draw_postgame, draw_splash, draw_waiting};

use thiserror::Error;

use crate::display::DisplayError;

/// What the panel is showing right now
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderPhase {
    /// One-shot boot animation, never revisited
    Splash,
    /// Idle animation while no match is known
    Waiting,
    /// Building the static background layer for a new match
    Starting,
    /// Background cached, overlay redrawn every tick
    Active,
    /// Winner screen held for a fixed duration
    Postgame,
}

/// Errors surfaced by a render tick
#[derive(Debug, Error)]
pub enum RenderError {
    /// The snapshot named a player count no layout exists for
    ///
    /// Indicates corrupted state; the tick is skipped and the board keeps
    /// running.
    #[error("No layout for {player_count} players (grid: {grid_mode})")]
    NoLayout {
        /// Player count from the snapshot
        player_count: usize,
        /// Grid-mode flag from the snapshot
        grid_mode: bool,
    },

    /// The display boundary rejected the frame
    #[error(transparent)]
    Display(#[from] DisplayError),
}

impl RenderError {
    /// Whether the render loop should give up entirely
    ///
    /// Everything except a vanished display degrades to a skipped tick.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RenderError::Display(DisplayError::Unavailable(_)))
    }
}
