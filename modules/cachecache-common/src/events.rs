//! The game event stream wire format.
//!
//! Events arrive as JSON tagged unions on the `kind` field, exactly as the
//! game service publishes them. Optional fields are simply absent on the wire,
//! so every one of them defaults on deserialization; the reducer must accept
//! partial payloads without failing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A domain event pushed by the game service over server-sent events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum GameEvent {
    /// A new game session started. `hiders` maps player name to hiding place.
    #[serde(rename = "NEW_GAME", rename_all = "camelCase")]
    NewGame {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        game_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seeker: Option<String>,
        #[serde(default, skip_serializing_if = "HashMap::is_empty")]
        hiders: HashMap<String, String>,
    },

    /// A hider took position. Only emitted before game start in some stream
    /// variants; `NEW_GAME` already carries the full hider/place mapping.
    #[serde(rename = "HIDER", rename_all = "camelCase")]
    Hider {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        game_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hider: Option<String>,
        place: String,
    },

    /// The seeker travelled from `place` to `destination`, taking `duration`
    /// milliseconds.
    #[serde(rename = "SEEKER_MOVE", rename_all = "camelCase")]
    SeekerMove {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        game_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seeker: Option<String>,
        place: String,
        destination: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        distance: Option<f64>,
        duration: f64,
    },

    /// The seeker found a hider at `place`.
    #[serde(rename = "PLAYER_DISCOVERED", rename_all = "camelCase")]
    PlayerDiscovered {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        game_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seeker: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hider: Option<String>,
        place: String,
    },

    /// The game ended. Terminal for the session; no marker state changes.
    #[serde(rename = "GAME_OVER", rename_all = "camelCase")]
    GameOver {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        game_id: Option<String>,
        seeker_won: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        non_discovered_players: Option<u32>,
    },

    /// Transport keep-alive. Filtered out before the reducer.
    #[serde(rename = "PING")]
    Ping,
}

impl GameEvent {
    /// The wire `kind` tag for this event.
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::NewGame { .. } => "NEW_GAME",
            GameEvent::Hider { .. } => "HIDER",
            GameEvent::SeekerMove { .. } => "SEEKER_MOVE",
            GameEvent::PlayerDiscovered { .. } => "PLAYER_DISCOVERED",
            GameEvent::GameOver { .. } => "GAME_OVER",
            GameEvent::Ping => "PING",
        }
    }

    pub fn is_ping(&self) -> bool {
        matches!(self, GameEvent::Ping)
    }
}
