//! Client-side mirror of room state.
//!
//! One [`ClientGameState`] per client. The player's own hand and board are
//! optimistic local arrays (the player may be mid-drag when a broadcast
//! lands), while every other player is tracked summary-only with the
//! server's derived counts as the presentation source of truth.
//!
//! Broadcasts can arrive in any order relative to local edits, so hand
//! payloads merge by tile-id union - a blind replace could drop a tile the
//! player just moved onto the board before the server heard about it.

use std::collections::HashMap;

use crate::state::events::{Broadcast, RoomSummary};
use crate::state::room::GameState;
use crate::state::tile::{BoardTile, Tile};

/// Summary-only view of another player in the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePlayer {
    pub name: String,
    pub is_host: bool,
    pub is_ready: bool,
    pub hand_size: usize,
    pub board_size: usize,
}

/// One player's local mirror of the shared game.
#[derive(Debug, Clone)]
pub struct ClientGameState {
    player_id: String,
    player_name: String,

    /// Own board layout (optimistic)
    pub board_tiles: Vec<BoardTile>,

    /// Own hand (optimistic)
    pub hand: Vec<Tile>,

    /// Bag count as last reported by the server
    pub remaining_tiles: usize,

    pub game_state: GameState,

    /// Set when the server warned this peel round may be the last
    pub is_last_round: bool,

    /// `(winner_id, winner_name)` once the game finished
    pub winner: Option<(String, String)>,

    /// Reason text if this client was kicked
    pub kicked: Option<String>,

    /// Other players by id
    others: HashMap<String, RemotePlayer>,

    /// Source for locally minted tile ids (board-to-hand splits)
    local_tile_seq: u64,
}

impl ClientGameState {
    pub fn new(player_id: impl Into<String>, player_name: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            player_name: player_name.into(),
            board_tiles: Vec::new(),
            hand: Vec::new(),
            remaining_tiles: 0,
            game_state: GameState::Waiting,
            is_last_round: false,
            winner: None,
            kicked: None,
            others: HashMap::new(),
            local_tile_seq: 0,
        }
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    pub fn board_size(&self) -> usize {
        self.board_tiles.len()
    }

    pub fn others(&self) -> impl Iterator<Item = (&String, &RemotePlayer)> {
        self.others.iter()
    }

    pub fn other(&self, player_id: &str) -> Option<&RemotePlayer> {
        self.others.get(player_id)
    }

    /// Apply one server broadcast to the mirror.
    pub fn apply(&mut self, event: &Broadcast) {
        match event {
            Broadcast::RoomUpdate(summary) => self.apply_summary(summary),

            Broadcast::GameStart {
                players,
                remaining_tiles,
            } => {
                self.game_state = GameState::Playing;
                self.remaining_tiles = *remaining_tiles;
                if let Some(own) = players.iter().find(|p| p.id == self.player_id) {
                    self.merge_hand(&own.tiles);
                }
            }

            Broadcast::PeelCalled {
                players,
                remaining_tiles,
                is_last_round,
                ..
            } => {
                self.remaining_tiles = *remaining_tiles;
                self.is_last_round = *is_last_round;
                if let Some(own) = players.iter().find(|p| p.id == self.player_id) {
                    self.merge_hand(&own.tiles);
                }
            }

            Broadcast::GameWon {
                winner_id,
                winner_name,
            } => {
                self.game_state = GameState::Finished;
                self.winner = Some((winner_id.clone(), winner_name.clone()));
            }

            Broadcast::PlayerDumped {
                remaining_tiles, ..
            } => {
                self.remaining_tiles = *remaining_tiles;
            }

            Broadcast::PlayerBoardUpdate {
                player_id,
                player_name,
                hand_size,
                board_size,
                ..
            } => {
                // Own state stays optimistic; the server echo carries
                // nothing the local arrays do not already know
                if *player_id != self.player_id {
                    let entry = self.remote_entry(player_id, player_name);
                    entry.hand_size = *hand_size;
                    entry.board_size = *board_size;
                }
            }

            Broadcast::PlayerHandUpdate {
                player_id,
                player_name,
                hand_size,
            } => {
                if *player_id != self.player_id {
                    self.remote_entry(player_id, player_name).hand_size = *hand_size;
                }
            }

            Broadcast::PlayerKicked { player_id, .. } => {
                self.others.remove(player_id);
            }

            Broadcast::Kicked { reason } => {
                self.kicked = Some(reason.clone());
            }

            Broadcast::PlayerLeft {
                player_id, room, ..
            } => {
                self.others.remove(player_id);
                self.apply_summary(room);
            }
        }
    }

    /// Adopt a room snapshot: authoritative for phase, bag count, and
    /// every other player's summary. Own tiles are left alone.
    fn apply_summary(&mut self, summary: &RoomSummary) {
        self.game_state = summary.game_state;
        self.remaining_tiles = summary.remaining_tiles;

        self.others = summary
            .players
            .iter()
            .filter(|p| p.id != self.player_id)
            .map(|p| {
                (
                    p.id.clone(),
                    RemotePlayer {
                        name: p.name.clone(),
                        is_host: p.is_host,
                        is_ready: p.is_ready,
                        hand_size: p.hand_size,
                        board_size: p.board_size,
                    },
                )
            })
            .collect();
    }

    fn remote_entry(&mut self, player_id: &str, player_name: &str) -> &mut RemotePlayer {
        self.others
            .entry(player_id.to_string())
            .or_insert_with(|| RemotePlayer {
                name: player_name.to_string(),
                is_host: false,
                is_ready: false,
                hand_size: 0,
                board_size: 0,
            })
    }

    /// Union-merge incoming hand tiles: anything already in the local hand
    /// or already placed on the local board keeps its spot.
    fn merge_hand(&mut self, incoming: &[Tile]) {
        for tile in incoming {
            let known = self.hand.iter().any(|t| t.id == tile.id)
                || self.board_tiles.iter().any(|t| t.id == tile.id);
            if !known {
                self.hand.push(tile.clone());
            }
        }
    }

    /// Dump acknowledgement: the traded tile leaves, replacements join.
    pub fn apply_dump_result(&mut self, old_tile_id: &str, new_tiles: &[Tile]) {
        self.hand.retain(|t| t.id != old_tile_id);
        self.merge_hand(new_tiles);
    }

    /// Optimistically move a hand tile onto the board.
    pub fn move_to_board(&mut self, tile_id: &str, position: usize) -> bool {
        let Some(index) = self.hand.iter().position(|t| t.id == tile_id) else {
            return false;
        };
        if self.board_tiles.iter().any(|t| t.position == position) {
            return false;
        }
        let tile = self.hand.remove(index);
        self.board_tiles
            .push(BoardTile::new(tile.id, tile.letter, position));
        true
    }

    /// Optimistically move a board tile back into the hand.
    pub fn move_to_hand(&mut self, tile_id: &str) -> bool {
        let Some(index) = self.board_tiles.iter().position(|t| t.id == tile_id) else {
            return false;
        };
        let tile = self.board_tiles.remove(index);
        self.hand.push(Tile::new(tile.id, tile.letter));
        true
    }

    /// Mint a local-only tile id (never collides with server ids, which
    /// carry the room salt).
    pub fn next_local_tile_id(&mut self) -> String {
        self.local_tile_seq += 1;
        format!("local-{}", self.local_tile_seq)
    }

    /// Add a loose letter to the hand under a local id.
    pub fn add_letter_to_hand(&mut self, letter: char) -> String {
        let id = self.next_local_tile_id();
        self.hand.push(Tile::new(id.clone(), letter));
        id
    }
}
