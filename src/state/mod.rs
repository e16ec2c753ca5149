//! State management module for TileRush.
//!
//! This module provides the core state types and the room store:
//!
//! - `tile` - tiles, board positions, per-room tile id generation
//! - `bag` - the finite letter bag (frequency-table multiset)
//! - `room` - rooms, players, and the event handlers that mutate them
//! - `events` - tagged client commands, acks, and room broadcasts
//! - `mirror` - per-client projection of room broadcasts
//! - `snapshot` - versioned local persistence for the solo game
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          RoomStore                               │
//! │                                                                  │
//! │   pin → Room { players, game_state, letter_bag, tile_ids }       │
//! │   player_id → pin                                                │
//! │                                                                  │
//! │   ClientCommand ──▶ handler ──▶ (Ack, [Outbound broadcasts])     │
//! │                        │                                         │
//! │                        └─ read-modify-broadcast, run to          │
//! │                           completion per event: the store is     │
//! │                           the single serialization point         │
//! └──────────────────────────────────────────────────────────────────┘
//!                                │
//!                    transport delivers Outbound
//!                                │
//! ┌──────────────────────────────▼───────────────────────────────────┐
//! │  ClientGameState (one per client)                                 │
//! │                                                                   │
//! │  own hand/board: optimistic local arrays, id-union merges         │
//! │  other players:  summary-only, server counts are the truth        │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rooms progress `Waiting → Playing → Finished`. From deal to room death
//! the letter bag plus every player's tiles always total 98; handlers move
//! tiles between bag and hands, never create or destroy them.

pub mod bag;
pub mod events;
pub mod mirror;
pub mod room;
pub mod snapshot;
pub mod tile;

// Re-export commonly used types
pub use bag::{LetterBag, LETTER_DISTRIBUTION, TOTAL_TILES};
pub use events::{
    Ack, Audience, Broadcast, ClientCommand, Outbound, PlayerDetails, PlayerSummary,
    PlayerTilesView, RoomSummary,
};
pub use mirror::{ClientGameState, RemotePlayer};
pub use room::{
    tiles_per_player, CreatedRoom, GameState, Player, Room, RoomConfig, RoomError, RoomStore,
    DEFAULT_MIN_PLAYERS, MAX_ROOM_PLAYERS,
};
pub use snapshot::{
    deserialize_game_state, serialize_game_state, SavedGame, SnapshotError, GAME_STATE_VERSION,
};
pub use tile::{BoardTile, CellPos, Tile, TileIdGen, MULTIPLAYER_GRID_SIZE, SOLO_GRID_SIZE};
