//! Match State Store
//!
//! The one object shared between the ingest context and the render context:
//! what is true about the current match right now. Ingest applies field-level
//! mutations; the render machine takes a snapshot once per tick and never
//! holds the lock across drawing.
//!
//! Every mutation method acquires the write lock once, so a multi-field
//! update (a stock count hitting zero together with its damage-sentinel flip)
//! is visible to readers as a unit. No cross-update transactional consistency
//! is promised - a render tick seeing an update one tick late is fine.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::color::{IconKey, Rgb};

/// Number of physical seats
pub const MAX_SLOTS: usize = 4;

/// Stock count every player starts a match with
pub const STARTING_STOCKS: u32 = 4;

/// Coarse match phase as ingest sees it
///
/// Render-only phases (splash, waiting) live in the render machine; this is
/// only what the telemetry stream has established.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchPhase {
    /// No match known
    #[default]
    Idle,
    /// A start event arrived; the static background has not been built yet
    Starting,
    /// Background built, overlay updating every tick
    Live,
    /// An end event arrived; slots are frozen until the next start
    Ended,
}

/// What a seat's damage readout shows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageDisplay {
    /// A live percentage
    Percent(i64),
    /// The fixed no-stock sentinel, shown from elimination until next start
    NoStock,
}

impl Default for DamageDisplay {
    fn default() -> Self {
        DamageDisplay::Percent(0)
    }
}

impl fmt::Display for DamageDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DamageDisplay::Percent(p) => write!(f, "{p}%"),
            DamageDisplay::NoStock => f.write_str("-"),
        }
    }
}

/// Everything known about one occupied seat
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerSlot {
    /// Stocks remaining
    pub stocks: u32,
    /// Damage readout
    pub damage: DamageDisplay,
    /// Character name (short form when the feed provides one)
    pub character: String,
    /// Costume/color variant name
    pub variant: String,
    /// Resolved text/stock-box color
    pub foreground: Rgb,
    /// Resolved seat background color
    pub background: Rgb,
    /// Resolved icon key
    pub icon: IconKey,
    /// Connect display name
    pub display_name: String,
    /// In-game nametag
    pub tag: String,
}

/// Stage name after abbreviation, with its precomputed text anchor
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StageText {
    /// Display form of the stage name
    pub name: String,
    /// Left edge of the stage text
    pub anchor_x: i32,
}

/// One player's entry in a start event, already resolved by ingest
#[derive(Clone, Debug)]
pub struct RosterEntry {
    /// Physical seat index, 0-3
    pub index: u8,
    /// The populated slot
    pub slot: PlayerSlot,
}

/// The mutable snapshot of the current match
#[derive(Clone, Debug, Default)]
pub struct MatchState {
    /// Coarse phase
    pub phase: MatchPhase,
    /// Occupied seat indices in arrival order; length equals the player count
    pub seats: Vec<u8>,
    /// Use the 2x2 grid at four players (startup configuration)
    pub grid_view: bool,
    /// Stage name and anchor
    pub stage: StageText,
    /// Team match flag, needed for the winner screen
    pub is_teams: bool,
    /// Winning seat index once the match ended
    pub winner: Option<u8>,
    /// Raw end-method code from the feed
    pub end_method: Option<i32>,
    /// Monotonic match counter, bumped by every start event
    ///
    /// Lets the render side tell whether work it did against an earlier
    /// snapshot still belongs to the match that is current now.
    pub generation: u64,
    /// Per-seat slots; `None` for seats not in this match
    slots: [Option<PlayerSlot>; MAX_SLOTS],
}

impl MatchState {
    /// Number of players in the current match (0 when idle)
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    /// The slot at a physical seat index, if occupied
    pub fn slot(&self, index: u8) -> Option<&PlayerSlot> {
        self.slots.get(index as usize).and_then(Option::as_ref)
    }

    /// Seats in arrival order paired with their slots
    ///
    /// Arrival position drives layout placement; the seat index only
    /// identifies the player.
    pub fn seats_in_arrival_order(&self) -> impl Iterator<Item = (u8, &PlayerSlot)> {
        self.seats
            .iter()
            .filter_map(|&index| self.slot(index).map(|slot| (index, slot)))
    }
}

/// Shared handle to the match state
///
/// Cheap to clone; one clone lives in the ingest context, one in the render
/// context. All mutations go through the methods here so each is atomic as
/// a unit.
#[derive(Clone, Debug)]
pub struct MatchStore {
    inner: Arc<RwLock<MatchState>>,
}

impl MatchStore {
    /// Create an idle store
    pub fn new(grid_view: bool) -> Self {
        let state = MatchState {
            grid_view,
            ..MatchState::default()
        };
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// Clone the current state for one render tick
    pub fn snapshot(&self) -> MatchState {
        self.inner.read().clone()
    }

    /// Reset for a new match and populate the roster in arrival order
    pub fn begin_match(&self, roster: Vec<RosterEntry>, stage: StageText, is_teams: bool) {
        let mut state = self.inner.write();
        let grid_view = state.grid_view;
        let generation = state.generation + 1;
        *state = MatchState {
            phase: MatchPhase::Starting,
            grid_view,
            stage,
            is_teams,
            generation,
            ..MatchState::default()
        };
        for entry in roster {
            state.seats.push(entry.index);
            state.slots[entry.index as usize] = Some(entry.slot);
        }
    }

    /// Update a seat's damage percentage
    ///
    /// Dropped when the seat is not in the match, has no stocks left (the
    /// sentinel must not be overwritten by late updates), or the match has
    /// already ended.
    pub fn set_percent(&self, index: u8, percent: i64) {
        let mut state = self.inner.write();
        if state.phase == MatchPhase::Ended {
            return;
        }
        let Some(slot) = state
            .slots
            .get_mut(index as usize)
            .and_then(Option::as_mut)
        else {
            tracing::debug!(slot = index, "Percent update for inactive seat dropped");
            return;
        };
        if slot.stocks == 0 {
            tracing::debug!(slot = index, percent, "Late percent for eliminated seat dropped");
            return;
        }
        slot.damage = DamageDisplay::Percent(percent);
    }

    /// Update a seat's stock count
    ///
    /// Hitting zero forces the damage readout to the sentinel in the same
    /// write, so no reader can see zero stocks with a stale percentage.
    pub fn set_stocks(&self, index: u8, remaining: u32) {
        let mut state = self.inner.write();
        if state.phase == MatchPhase::Ended {
            return;
        }
        let Some(slot) = state
            .slots
            .get_mut(index as usize)
            .and_then(Option::as_mut)
        else {
            tracing::debug!(slot = index, "Stock update for inactive seat dropped");
            return;
        };
        slot.stocks = remaining;
        if remaining == 0 {
            slot.damage = DamageDisplay::NoStock;
        }
    }

    /// Record the match end; slots freeze until the next start
    ///
    /// Ignored while idle: an end event with no match behind it must not
    /// conjure a winner screen out of nothing.
    pub fn end_match(&self, winner: Option<u8>, end_method: i32) {
        let mut state = self.inner.write();
        if state.phase == MatchPhase::Idle {
            tracing::warn!(method = end_method, "End event with no match in progress dropped");
            return;
        }
        state.phase = MatchPhase::Ended;
        state.winner = winner;
        state.end_method = Some(end_method);
    }

    /// Starting -> Live, called by the render machine once the static
    /// background layer is built
    ///
    /// The caller passes the generation of the snapshot it built against;
    /// if another match started in the meantime the transition is stale and
    /// discarded, leaving the new match in `Starting` for a fresh build.
    pub fn mark_live(&self, generation: u64) {
        let mut state = self.inner.write();
        if state.phase == MatchPhase::Starting && state.generation == generation {
            state.phase = MatchPhase::Live;
        }
    }

    /// Back to the no-match condition (render machine, end of postgame hold)
    pub fn reset(&self) {
        let mut state = self.inner.write();
        let grid_view = state.grid_view;
        let generation = state.generation;
        *state = MatchState {
            grid_view,
            generation,
            ..MatchState::default()
        };
    }
}
