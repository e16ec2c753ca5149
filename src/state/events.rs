//! Room event payloads.
//!
//! Every message crossing the room boundary is an explicit tagged type:
//! [`ClientCommand`] for client intents, [`Ack`] for per-request replies,
//! and [`Broadcast`] for server-to-room fan-out. The transport layer only
//! ever ships these — loosely-shaped payloads are rejected at the serde
//! boundary before they can reach state-mutating logic.

use serde::{Deserialize, Serialize};

use crate::state::room::GameState;
use crate::state::tile::{BoardTile, Tile};

/// A client intent, tagged by event name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientCommand {
    CreateRoom {
        player_name: String,
    },
    JoinRoom {
        pin: String,
        player_name: String,
    },
    ToggleReady,
    StartGame,
    Peel,
    Dump {
        tile_id: String,
    },
    UpdateBoard {
        board_tiles: Vec<BoardTile>,
    },
    /// Client-reported count; the server recomputes and rebroadcasts its
    /// own number instead of trusting this one.
    UpdateHandSize {
        hand_size: usize,
    },
    /// Client-reported tile moves; same trust policy as `UpdateHandSize`.
    UpdateTileLocations {
        #[serde(default)]
        tiles_moved_to_board: Vec<String>,
        #[serde(default)]
        tiles_moved_to_hand: Vec<String>,
    },
    GetPlayerDetails {
        player_name: String,
    },
    KickPlayer {
        player_id: String,
    },
    Disconnect,
}

/// Per-request reply carried on the acknowledgement callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Ack {
    /// Success with no payload
    Ok,
    RoomCreated {
        pin: String,
        game_id: String,
    },
    RoomJoined {
        game_id: String,
    },
    Peeled {
        won: bool,
    },
    Dumped {
        new_tiles: Vec<Tile>,
    },
    PlayerDetails(PlayerDetails),
}

/// Public per-player summary. Counts are recomputed from tile ownership at
/// broadcast time, never read from a cached field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub id: String,
    pub name: String,
    pub is_host: bool,
    pub is_ready: bool,
    pub hand_size: usize,
    pub board_size: usize,
}

/// Room snapshot broadcast on every membership or supply change. Late
/// joiners are brought up to date with one of these alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub id: String,
    pub pin: String,
    pub host: String,
    pub game_state: GameState,
    pub players: Vec<PlayerSummary>,
    pub remaining_tiles: usize,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A player's full tile payload, sent only inside `GameStart` and
/// `PeelCalled` where each client picks out its own entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerTilesView {
    pub id: String,
    pub name: String,
    /// Hand tiles only (tiles not placed on the board)
    pub tiles: Vec<Tile>,
    pub board_tiles: Vec<BoardTile>,
}

/// Reply payload for `GetPlayerDetails`: hand letters only, no ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDetails {
    pub player_name: String,
    pub tiles_in_hand: Vec<char>,
    pub board_tiles: Vec<BoardTile>,
    pub hand_size: usize,
    pub board_size: usize,
}

/// Server-to-client fan-out, tagged by event name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Broadcast {
    RoomUpdate(RoomSummary),
    GameStart {
        players: Vec<PlayerTilesView>,
        remaining_tiles: usize,
    },
    PeelCalled {
        caller_name: String,
        players: Vec<PlayerTilesView>,
        remaining_tiles: usize,
        is_last_round: bool,
    },
    GameWon {
        winner_id: String,
        winner_name: String,
    },
    PlayerDumped {
        player_id: String,
        player_name: String,
        remaining_tiles: usize,
    },
    PlayerBoardUpdate {
        player_id: String,
        player_name: String,
        board_tiles: Vec<BoardTile>,
        hand_size: usize,
        board_size: usize,
    },
    PlayerHandUpdate {
        player_id: String,
        player_name: String,
        hand_size: usize,
    },
    PlayerKicked {
        player_id: String,
        player_name: String,
    },
    /// Sent directly to the kicked client only
    Kicked {
        reason: String,
    },
    PlayerLeft {
        player_id: String,
        player_name: String,
        room: RoomSummary,
    },
}

/// Who a broadcast is addressed to. The transport resolves membership at
/// delivery time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    /// Every current member of the room
    Room,
    /// Every member except one (the acting player already knows)
    Others { except: String },
    /// One specific connection
    Player(String),
}

/// An addressed broadcast. Handlers return these in delivery order; the
/// order is part of the contract (e.g. `GameStart` before `RoomUpdate`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub audience: Audience,
    pub event: Broadcast,
}

impl Outbound {
    pub fn room(event: Broadcast) -> Self {
        Self {
            audience: Audience::Room,
            event,
        }
    }

    pub fn others(except: impl Into<String>, event: Broadcast) -> Self {
        Self {
            audience: Audience::Others {
                except: except.into(),
            },
            event,
        }
    }

    pub fn player(id: impl Into<String>, event: Broadcast) -> Self {
        Self {
            audience: Audience::Player(id.into()),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_command_wire_format() {
        let command = ClientCommand::JoinRoom {
            pin: "1234".to_string(),
            player_name: "Alice".to_string(),
        };
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "event": "joinRoom",
                "pin": "1234",
                "playerName": "Alice"
            })
        );
    }

    #[test]
    fn test_command_rejects_malformed_payload() {
        // Unknown event name
        let unknown = serde_json::json!({"event": "reshuffleBag"});
        assert!(serde_json::from_value::<ClientCommand>(unknown).is_err());

        // Missing required field
        let missing = serde_json::json!({"event": "dump"});
        assert!(serde_json::from_value::<ClientCommand>(missing).is_err());
    }

    #[test]
    fn test_tile_location_deltas_default_empty() {
        let sparse = serde_json::json!({
            "event": "updateTileLocations",
            "tilesMovedToBoard": ["tile-1"]
        });
        let command: ClientCommand = serde_json::from_value(sparse).unwrap();
        assert_eq!(
            command,
            ClientCommand::UpdateTileLocations {
                tiles_moved_to_board: vec!["tile-1".to_string()],
                tiles_moved_to_hand: Vec::new(),
            }
        );
    }

    #[test]
    fn test_broadcast_round_trip() {
        let event = Broadcast::PlayerHandUpdate {
            player_id: "conn-1".to_string(),
            player_name: "Bob".to_string(),
            hand_size: 4,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: Broadcast = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
        assert!(json.contains("\"event\":\"playerHandUpdate\""));
    }
}
