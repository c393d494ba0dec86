//! Event Ingest
//!
//! Consumes decoded telemetry messages and applies them as mutations to the
//! match state store. Ingest resolves player identity (colors, icon key) and
//! stage anchoring at match start so the render side only ever reads settled
//! values; it never touches rendering itself and never blocks the render
//! tick beyond a field-level write lock.
//!
//! Malformed or out-of-range input is dropped with a diagnostic - a bad
//! message must never take the board down.

mod server;

pub use server::serve;

use thiserror::Error;

use crate::color::Resolver;
use crate::events::TelemetryEvent;
use crate::layout::{abbreviate_stage, stage_anchor_x};
use crate::state::{
    DamageDisplay, MatchStore, PlayerSlot, RosterEntry, StageText, MAX_SLOTS, STARTING_STOCKS,
};

/// Errors surfaced by the ingest context
#[derive(Debug, Error)]
pub enum IngestError {
    /// The listener socket failed
    #[error("Ingest socket error: {0}")]
    Io(#[from] std::io::Error),

    /// A line was not a valid telemetry message
    #[error("Malformed telemetry message: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Applies telemetry messages to the shared match state
#[derive(Clone, Debug)]
pub struct Ingest {
    store: MatchStore,
    resolver: Resolver,
}

impl Ingest {
    /// Create an ingest front-end over a store and a color resolver
    pub fn new(store: MatchStore, resolver: Resolver) -> Self {
        Self { store, resolver }
    }

    /// Parse one wire line and apply it
    ///
    /// # Errors
    ///
    /// Returns the parse error for a malformed line; the caller logs it and
    /// moves on.
    pub fn apply_json(&self, line: &str) -> Result<(), IngestError> {
        let event: TelemetryEvent = serde_json::from_str(line)?;
        self.apply(event);
        Ok(())
    }

    /// Apply one decoded event
    pub fn apply(&self, event: TelemetryEvent) {
        match event {
            TelemetryEvent::PlayerPercent { player_index, percent } => {
                if !valid_seat(player_index) {
                    tracing::warn!(slot = player_index, "Percent update for impossible seat dropped");
                    return;
                }
                // The feed sends fractional percentages; the panel shows whole ones.
                self.store.set_percent(player_index, percent as i64);
            }

            TelemetryEvent::CountChange { player_index, stocks_remaining } => {
                if !valid_seat(player_index) {
                    tracing::warn!(slot = player_index, "Stock update for impossible seat dropped");
                    return;
                }
                tracing::debug!(slot = player_index, stocks = stocks_remaining, "Stock change");
                self.store.set_stocks(player_index, stocks_remaining);
            }

            TelemetryEvent::GameStart { players, stage_info, is_teams } => {
                self.start_match(players, &stage_info.name, is_teams);
            }

            TelemetryEvent::GameEnd { game_end_method, winner_player_index } => {
                let winner = u8::try_from(winner_player_index)
                    .ok()
                    .filter(|&w| valid_seat(w));
                if winner.is_none() {
                    tracing::info!(
                        winner_index = winner_player_index,
                        "Match ended without a resolvable winner"
                    );
                }
                tracing::info!(method = game_end_method, winner = ?winner, "Match ended");
                self.store.end_match(winner, game_end_method);
            }
        }
    }

    fn start_match(
        &self,
        players: Vec<crate::events::PlayerEntry>,
        stage_name: &str,
        is_teams: bool,
    ) {
        if !(2..=MAX_SLOTS).contains(&players.len()) {
            tracing::warn!(
                players = players.len(),
                "Start event with unsupported player count dropped"
            );
            return;
        }

        let mut seen = [false; MAX_SLOTS];
        let mut roster = Vec::with_capacity(players.len());
        for player in players {
            let index = player.player_index;
            if !valid_seat(index) || seen[index as usize] {
                tracing::warn!(slot = index, "Start event with invalid roster dropped");
                return;
            }
            seen[index as usize] = true;

            let character = player.character_info.panel_name().to_string();
            let variant = player.character_color_name;
            let identity = self.resolver.resolve(&character, &variant);
            roster.push(RosterEntry {
                index,
                slot: PlayerSlot {
                    stocks: STARTING_STOCKS,
                    damage: DamageDisplay::default(),
                    character,
                    variant,
                    foreground: identity.foreground,
                    background: identity.background,
                    icon: identity.icon,
                    display_name: player.display_name,
                    tag: player.nametag,
                },
            });
        }

        let name = abbreviate_stage(stage_name).to_string();
        let stage = StageText {
            anchor_x: stage_anchor_x(&name),
            name,
        };

        tracing::info!(
            players = roster.len(),
            stage = %stage.name,
            is_teams,
            "Match started"
        );
        self.store.begin_match(roster, stage, is_teams);
    }
}

/// Seat indices are 0-3
fn valid_seat(index: u8) -> bool {
    (index as usize) < MAX_SLOTS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{IconKey, Rgb};
    use crate::config::ColorConfig;
    use crate::state::MatchPhase;
    use pretty_assertions::assert_eq;

    fn ingest() -> (Ingest, MatchStore) {
        let store = MatchStore::new(false);
        let ingest = Ingest::new(store.clone(), Resolver::new(ColorConfig::default()));
        (ingest, store)
    }

    fn start_json(indices: &[u8]) -> String {
        let players: Vec<String> = indices
            .iter()
            .map(|i| {
                format!(
                    r#"{{"playerIndex":{i},"nametag":"","displayName":"P{i}",
                        "CharacterColorName":"Red",
                        "characterInfo":{{"name":"Fox"}}}}"#
                )
            })
            .collect();
        format!(
            r#"{{"messageType":"gameStart","players":[{}],
                "stageInfo":{{"name":"Final Destination"}},"isTeams":false}}"#,
            players.join(",")
        )
    }

    #[test]
    fn game_start_resolves_identity_and_stage() {
        let (ingest, store) = ingest();
        ingest.apply_json(&start_json(&[0, 1])).unwrap();

        let snap = store.snapshot();
        assert_eq!(snap.phase, MatchPhase::Starting);
        assert_eq!(snap.seats, vec![0, 1]);
        // Abbreviated, then centered: "Final Dest." is 11 chars -> (64-44)/2
        assert_eq!(snap.stage.name, "Final Dest.");
        assert_eq!(snap.stage.anchor_x, 10);

        let slot = snap.slot(0).unwrap();
        assert_eq!(slot.background, Rgb(102, 0, 0));
        assert_eq!(slot.icon, IconKey::new("Fox", "Red"));
    }

    #[test]
    fn arrival_order_is_preserved_not_sorted() {
        let (ingest, store) = ingest();
        ingest.apply_json(&start_json(&[2, 0, 1])).unwrap();
        assert_eq!(store.snapshot().seats, vec![2, 0, 1]);
    }

    #[test]
    fn bad_rosters_are_dropped() {
        let (ingest, store) = ingest();
        // Too few players
        ingest.apply_json(&start_json(&[0])).unwrap();
        assert_eq!(store.snapshot().phase, MatchPhase::Idle);
        // Duplicate seat
        ingest.apply_json(&start_json(&[0, 0])).unwrap();
        assert_eq!(store.snapshot().phase, MatchPhase::Idle);
        // Impossible seat
        ingest.apply_json(&start_json(&[0, 7])).unwrap();
        assert_eq!(store.snapshot().phase, MatchPhase::Idle);
    }

    #[test]
    fn percent_truncates_to_whole_display_value() {
        let (ingest, store) = ingest();
        ingest.apply_json(&start_json(&[0, 1])).unwrap();
        ingest
            .apply_json(r#"{"messageType":"playerPercent","playerIndex":0,"percent":42.9}"#)
            .unwrap();
        assert_eq!(
            store.snapshot().slot(0).unwrap().damage,
            DamageDisplay::Percent(42)
        );
    }

    #[test]
    fn malformed_lines_error_without_mutating() {
        let (ingest, store) = ingest();
        assert!(ingest.apply_json("not json").is_err());
        assert!(ingest
            .apply_json(r#"{"messageType":"mystery"}"#)
            .is_err());
        assert_eq!(store.snapshot().phase, MatchPhase::Idle);
    }

    #[test]
    fn game_end_before_any_start_is_dropped() {
        let (ingest, store) = ingest();
        ingest
            .apply_json(r#"{"messageType":"gameEnd","gameEndMethod":2,"winnerPlayerIndex":0}"#)
            .unwrap();
        assert_eq!(store.snapshot().phase, MatchPhase::Idle);
        assert_eq!(store.snapshot().winner, None);
    }

    #[test]
    fn negative_winner_index_means_no_winner() {
        let (ingest, store) = ingest();
        ingest.apply_json(&start_json(&[0, 1])).unwrap();
        ingest
            .apply_json(r#"{"messageType":"gameEnd","gameEndMethod":7,"winnerPlayerIndex":-1}"#)
            .unwrap();
        let snap = store.snapshot();
        assert_eq!(snap.phase, MatchPhase::Ended);
        assert_eq!(snap.winner, None);
        assert_eq!(snap.end_method, Some(7));
    }
}
