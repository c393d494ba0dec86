//! Telemetry Wire Events
//!
//! The inbound message envelope: line-delimited JSON records discriminated by
//! `messageType`, with the field names the realtime feed actually sends
//! (camelCase, plus the feed's idiosyncratic `CharacterColorName`). These
//! types are the wire contract only - ingest turns them into state-store
//! mutations and nothing here touches rendering.

use serde::{Deserialize, Serialize};

/// One decoded telemetry message
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "messageType")]
pub enum TelemetryEvent {
    /// A player's damage percentage changed
    #[serde(rename = "playerPercent")]
    PlayerPercent {
        /// Physical seat index, 0-3
        #[serde(rename = "playerIndex")]
        player_index: u8,
        /// New percentage; the feed sends fractional values
        percent: f64,
    },

    /// A player's stock count changed
    #[serde(rename = "countChange")]
    CountChange {
        /// Physical seat index, 0-3
        #[serde(rename = "playerIndex")]
        player_index: u8,
        /// Stocks remaining after the change
        #[serde(rename = "stocksRemaining")]
        stocks_remaining: u32,
    },

    /// A new match started
    #[serde(rename = "gameStart")]
    GameStart {
        /// Players in the order the feed listed them (drives placement)
        players: Vec<PlayerEntry>,
        /// Stage metadata
        #[serde(rename = "stageInfo")]
        stage_info: StageInfo,
        /// Team match flag
        #[serde(rename = "isTeams")]
        is_teams: bool,
    },

    /// The match ended
    #[serde(rename = "gameEnd")]
    GameEnd {
        /// Raw end-method code from the feed
        #[serde(rename = "gameEndMethod")]
        game_end_method: i32,
        /// Winning seat index; negative when there is no winner
        #[serde(rename = "winnerPlayerIndex")]
        winner_player_index: i32,
    },
}

/// One player's entry in a `gameStart` message
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerEntry {
    /// Physical seat index, 0-3
    #[serde(rename = "playerIndex")]
    pub player_index: u8,
    /// In-game nametag
    #[serde(default)]
    pub nametag: String,
    /// Connect display name
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    /// Costume/color variant name
    #[serde(rename = "CharacterColorName")]
    pub character_color_name: String,
    /// Character metadata
    #[serde(rename = "characterInfo")]
    pub character_info: CharacterInfo,
}

/// Character metadata inside a player entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CharacterInfo {
    /// Full character name
    pub name: String,
    /// Abbreviated name, preferred for display when present
    #[serde(rename = "shortName", skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
}

impl CharacterInfo {
    /// The name shown on the panel
    pub fn panel_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }
}

/// Stage metadata inside a `gameStart` message
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StageInfo {
    /// Full stage name as the feed reports it
    pub name: String,
}
