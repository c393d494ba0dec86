//! Tick Driver
//!
//! [`RenderMachine`] owns the display and turns state snapshots into frames.
//! Each call to [`RenderMachine::tick`] takes one fresh snapshot, picks the
//! phase to show, draws it, and returns how long the caller should sleep
//! before the next tick. The machine never blocks and never holds the state
//! lock across a draw.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::scenes::{self, SPLASH_GROW_STEPS, SPLASH_TOTAL_STEPS};
use super::{RenderError, RenderPhase};
use crate::config::{ColorConfig, TimingConfig};
use crate::display::DisplayTarget;
use crate::frame::Frame;
use crate::icons::IconSource;
use crate::state::{MatchPhase, MatchState, MatchStore};

/// Delay between splash grow steps
const SPLASH_GROW_DELAY: Duration = Duration::from_millis(12);

/// Delay between splash fade steps
const SPLASH_FADE_DELAY: Duration = Duration::from_millis(100);

/// Upper bound on how long a postgame hold tick sleeps
///
/// Keeps the machine responsive to a new match starting mid-hold.
const POSTGAME_POLL: Duration = Duration::from_millis(100);

/// The render state machine
///
/// Phase priority is re-derived from the store on every tick, so a match
/// ending mid-splash or starting mid-postgame preempts whatever is on
/// screen on the very next tick.
pub struct RenderMachine<D: DisplayTarget> {
    store: MatchStore,
    display: D,
    icons: Box<dyn IconSource>,
    colors: ColorConfig,
    timing: TimingConfig,
    phase: RenderPhase,
    seen_splash: bool,
    splash_step: u32,
    waiting_step: usize,
    background: Option<(u64, Frame)>,
    postgame_until: Option<Instant>,
}

impl<D: DisplayTarget> RenderMachine<D> {
    /// Create a machine that starts at the boot splash
    pub fn new(
        store: MatchStore,
        display: D,
        icons: Box<dyn IconSource>,
        colors: ColorConfig,
        timing: TimingConfig,
    ) -> Self {
        Self {
            store,
            display,
            icons,
            colors,
            timing,
            phase: RenderPhase::Splash,
            seen_splash: false,
            splash_step: 0,
            waiting_step: 0,
            background: None,
            postgame_until: None,
        }
    }

    /// The phase shown by the most recent tick
    pub fn phase(&self) -> RenderPhase {
        self.phase
    }

    /// Consume the machine, returning the display
    pub fn into_display(self) -> D {
        self.display
    }

    /// Run one render tick, returning the delay before the next one
    pub fn tick(&mut self, now: Instant) -> Result<Duration, RenderError> {
        let snapshot = self.store.snapshot();

        let next = match snapshot.phase {
            MatchPhase::Ended => RenderPhase::Postgame,
            MatchPhase::Live => RenderPhase::Active,
            MatchPhase::Starting if snapshot.player_count() != 0 => RenderPhase::Starting,
            _ => {
                if self.seen_splash {
                    RenderPhase::Waiting
                } else {
                    RenderPhase::Splash
                }
            }
        };

        if next != self.phase {
            info!(from = ?self.phase, to = ?next, "Render phase changed");
            if next != RenderPhase::Postgame {
                self.postgame_until = None;
            }
            self.phase = next;
        }

        match next {
            RenderPhase::Splash => self.tick_splash(),
            RenderPhase::Waiting => self.tick_waiting(),
            RenderPhase::Starting => self.tick_starting(&snapshot),
            RenderPhase::Active => self.tick_active(&snapshot),
            RenderPhase::Postgame => self.tick_postgame(&snapshot, now),
        }
    }

    fn tick_splash(&mut self) -> Result<Duration, RenderError> {
        let mut frame = Frame::new();
        scenes::draw_splash(&mut frame, self.splash_step);
        self.display.commit(&frame, (0, 0))?;
        self.display.present()?;

        self.splash_step += 1;
        if self.splash_step >= SPLASH_TOTAL_STEPS {
            debug!("Splash complete");
            self.seen_splash = true;
        }

        if self.splash_step < SPLASH_GROW_STEPS {
            Ok(SPLASH_GROW_DELAY)
        } else {
            Ok(SPLASH_FADE_DELAY)
        }
    }

    fn tick_waiting(&mut self) -> Result<Duration, RenderError> {
        let mut frame = Frame::new();
        scenes::draw_waiting(&mut frame, self.waiting_step);
        self.display.commit(&frame, (0, 0))?;
        self.display.present()?;

        self.waiting_step = self.waiting_step.wrapping_add(1);
        Ok(Duration::from_millis(self.timing.waiting_step_ms))
    }

    fn tick_starting(
        &mut self,
        snapshot: &MatchState,
    ) -> Result<Duration, RenderError> {
        // A match starting during boot supersedes the rest of the splash.
        self.seen_splash = true;
        self.waiting_step = 0;

        let background = scenes::build_background(snapshot, &self.colors, self.icons.as_ref())?;
        self.background = Some((snapshot.generation, background));
        // Stale when another match started during the build; the store keeps
        // the new match in Starting and the next tick rebuilds.
        self.store.mark_live(snapshot.generation);
        debug!(players = snapshot.player_count(), stage = %snapshot.stage.name, "Background built");
        Ok(Duration::ZERO)
    }

    fn tick_active(
        &mut self,
        snapshot: &MatchState,
    ) -> Result<Duration, RenderError> {
        // Rebuilt when the cached layer is missing or belongs to an earlier
        // match, e.g. after a fault dropped it or a start raced the build.
        let stale = !matches!(
            &self.background,
            Some((generation, _)) if *generation == snapshot.generation
        );
        if stale {
            warn!("Rebuilding match background");
            let background = scenes::build_background(snapshot, &self.colors, self.icons.as_ref())?;
            self.background = Some((snapshot.generation, background));
        }
        let mut frame = match &self.background {
            Some((_, background)) => background.clone(),
            None => Frame::new(),
        };
        scenes::draw_overlay(&mut frame, snapshot)?;
        self.display.commit(&frame, (0, 0))?;
        self.display.present()?;
        Ok(Duration::from_millis(self.timing.active_frame_ms))
    }

    fn tick_postgame(
        &mut self,
        snapshot: &MatchState,
        now: Instant,
    ) -> Result<Duration, RenderError> {
        // A board that showed a winner screen has shown a match; the splash
        // never follows it, even when the end event beat the first tick.
        self.seen_splash = true;

        let until = match self.postgame_until {
            Some(until) => until,
            None => {
                // First postgame tick draws the winner screen once; the hold
                // ticks after it just wait the clock out.
                let frame = scenes::draw_postgame(snapshot, self.icons.as_ref());
                self.display.commit(&frame, (0, 0))?;
                self.display.present()?;
                self.background = None;

                let hold = Duration::from_millis(self.timing.postgame_hold_ms);
                let until = now + hold;
                self.postgame_until = Some(until);
                info!(winner = ?snapshot.winner, hold_ms = self.timing.postgame_hold_ms, "Holding winner screen");
                until
            }
        };

        if now >= until {
            self.postgame_until = None;
            self.waiting_step = 0;
            self.store.reset();
            return Ok(Duration::ZERO);
        }
        Ok((until - now).min(POSTGAME_POLL))
    }
}

// =============================================================================
// Tests
// =============================================================================
