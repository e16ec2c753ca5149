//! Room state management.
//!
//! A room is the server-authoritative container for one game: its players,
//! lifecycle state, and the shared letter bag. All mutation happens inside
//! [`RoomStore`] handlers, each of which runs read-modify-broadcast to
//! completion before the next event for that room — the store's `&mut self`
//! receivers are the per-room serialization point. Multi-worker
//! deployments must pin a store (or at least a room) to one worker, or wrap
//! the store in a mutex.
//!
//! Every handler that changes a room re-derives the per-player
//! `hand_size`/`board_size` it broadcasts from the player's tile ownership,
//! never from a cached field. A tile is "in hand" iff its id is not among
//! the player's board tile ids.

use std::collections::HashMap;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::state::bag::LetterBag;
use crate::state::events::{
    Ack, Broadcast, ClientCommand, Outbound, PlayerDetails, PlayerSummary, PlayerTilesView,
    RoomSummary,
};
use crate::state::tile::{BoardTile, Tile, TileIdGen};

/// Maximum players per room.
pub const MAX_ROOM_PLAYERS: usize = 8;

/// Default minimum players required to start. Set `min_players` to 1 in
/// [`RoomConfig`] to allow solo practice.
pub const DEFAULT_MIN_PLAYERS: usize = 2;

/// Tiles dealt to each player at game start.
pub fn tiles_per_player(player_count: usize) -> usize {
    if player_count <= 4 {
        21
    } else if player_count <= 6 {
        15
    } else {
        11
    }
}

/// Room lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    /// Lobby: players joining and readying up
    #[default]
    Waiting,
    /// Tiles dealt, peels and dumps live
    Playing,
    /// Someone won; terminal
    Finished,
}

impl GameState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Playing => "playing",
            Self::Finished => "finished",
        }
    }

    /// Check if the game can receive play actions.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Playing)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

/// A player's seat in a room.
#[derive(Debug, Clone)]
pub struct Player {
    /// Connection-scoped id
    pub id: String,

    /// Display name
    pub name: String,

    pub is_host: bool,

    pub is_ready: bool,

    /// Every tile this player owns, in hand or placed
    pub tiles: Vec<Tile>,

    /// The player's current board layout
    pub board_tiles: Vec<BoardTile>,
}

impl Player {
    pub fn new(id: String, name: String, is_host: bool) -> Self {
        Self {
            id,
            name,
            is_host,
            is_ready: false,
            tiles: Vec::new(),
            board_tiles: Vec::new(),
        }
    }

    /// Whether the tile with this id is placed on the board.
    pub fn is_on_board(&self, tile_id: &str) -> bool {
        self.board_tiles.iter().any(|bt| bt.id == tile_id)
    }

    /// Tiles currently in hand (owned but not placed).
    pub fn hand(&self) -> Vec<&Tile> {
        self.tiles
            .iter()
            .filter(|tile| !self.is_on_board(&tile.id))
            .collect()
    }

    pub fn hand_size(&self) -> usize {
        self.hand().len()
    }

    pub fn board_size(&self) -> usize {
        self.board_tiles.len()
    }

    fn summary(&self) -> PlayerSummary {
        PlayerSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            is_host: self.is_host,
            is_ready: self.is_ready,
            hand_size: self.hand_size(),
            board_size: self.board_size(),
        }
    }

    fn tiles_view(&self) -> PlayerTilesView {
        PlayerTilesView {
            id: self.id.clone(),
            name: self.name.clone(),
            tiles: self.hand().into_iter().cloned().collect(),
            board_tiles: self.board_tiles.clone(),
        }
    }
}

/// Room state.
#[derive(Debug, Clone)]
pub struct Room {
    /// Unique room/game id
    pub id: String,

    /// Human-shareable 4-digit join code
    pub pin: String,

    /// Current host's player id
    pub host: String,

    /// Players in join order
    players: Vec<Player>,

    pub game_state: GameState,

    pub letter_bag: LetterBag,

    /// Per-room tile id source
    tile_ids: TileIdGen,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Room {
    fn new(id: String, pin: String, salt: String, host: Player) -> Self {
        let host_id = host.id.clone();
        Self {
            id,
            pin,
            host: host_id,
            players: vec![host],
            game_state: GameState::Waiting,
            letter_bag: LetterBag::empty(),
            tile_ids: TileIdGen::new(salt),
            created_at: chrono::Utc::now(),
        }
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    fn player_mut(&mut self, player_id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Check if every non-host player has readied up.
    pub fn all_ready(&self) -> bool {
        self.players.iter().all(|p| p.is_ready || p.is_host)
    }

    /// Bag plus every player's owned tiles. Constant at
    /// [`crate::state::bag::TOTAL_TILES`] from deal until the room dies
    /// (players leaving mid-game take their tiles with them).
    pub fn total_tiles(&self) -> usize {
        self.letter_bag.remaining() + self.players.iter().map(|p| p.tiles.len()).sum::<usize>()
    }

    /// Derived snapshot for clients. Counts are recomputed here, fresh.
    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            id: self.id.clone(),
            pin: self.pin.clone(),
            host: self.host.clone(),
            game_state: self.game_state,
            players: self.players.iter().map(Player::summary).collect(),
            remaining_tiles: self.letter_bag.remaining(),
            created_at: self.created_at,
        }
    }

    /// Deal `count` fresh tiles to one player. A short bag deals what it
    /// has; never errors.
    fn deal<R: Rng + ?Sized>(&mut self, rng: &mut R, player_index: usize, count: usize, prefix: &str) {
        for _ in 0..count {
            match self.letter_bag.draw_one(rng) {
                Some(letter) => {
                    let id = self.tile_ids.next(prefix);
                    self.players[player_index].tiles.push(Tile::new(id, letter));
                }
                None => break,
            }
        }
    }

    /// Remove a player, transferring host to the first remaining player in
    /// join order when the host leaves.
    fn remove_player(&mut self, player_id: &str) -> Option<Player> {
        let index = self.players.iter().position(|p| p.id == player_id)?;
        let removed = self.players.remove(index);

        if self.host == removed.id {
            if let Some(next) = self.players.first_mut() {
                next.is_host = true;
                self.host = next.id.clone();
            }
        }

        Some(removed)
    }
}

/// Room errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomError {
    InvalidPin,
    RoomNotFound,
    RoomFull,
    GameInProgress,
    GameNotActive,
    NotHost,
    PlayersNotReady,
    NotEnoughPlayers,
    PlayerNotFound,
    TileNotFound,
    StillHasTiles,
    InsufficientBagSupply,
    CannotKickSelf,
    CannotKickDuringGame,
}

impl std::fmt::Display for RoomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPin => write!(f, "PIN must be 4 digits"),
            Self::RoomNotFound => write!(f, "Room not found"),
            Self::RoomFull => write!(f, "Room is full (max {} players)", MAX_ROOM_PLAYERS),
            Self::GameInProgress => write!(f, "Game already in progress"),
            Self::GameNotActive => write!(f, "Game is not active"),
            Self::NotHost => write!(f, "Only the host can do that"),
            Self::PlayersNotReady => write!(f, "Not all players are ready"),
            Self::NotEnoughPlayers => write!(f, "Not enough players to start"),
            Self::PlayerNotFound => write!(f, "Player not found"),
            Self::TileNotFound => write!(f, "Tile not found"),
            Self::StillHasTiles => write!(f, "You still have tiles in your hand"),
            Self::InsufficientBagSupply => write!(f, "Not enough tiles in the bag"),
            Self::CannotKickSelf => write!(f, "You cannot kick yourself"),
            Self::CannotKickDuringGame => write!(f, "Cannot kick players during an active game"),
        }
    }
}

impl std::error::Error for RoomError {}

/// Store policy knobs.
#[derive(Debug, Clone)]
pub struct RoomConfig {
    /// Minimum players for `start_game`; 1 allows solo practice
    pub min_players: usize,

    /// Maximum players per room
    pub max_players: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            min_players: DEFAULT_MIN_PLAYERS,
            max_players: MAX_ROOM_PLAYERS,
        }
    }
}

/// Outcome of `create_room`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRoom {
    pub pin: String,
    pub game_id: String,
}

/// Room store - owns every live room.
///
/// An explicit object with no ambient global state: construct one per
/// server process (or per test) and route every room event through it.
#[derive(Debug, Default)]
pub struct RoomStore {
    config: RoomConfig,

    /// Rooms by pin
    rooms: HashMap<String, Room>,

    /// Player id to pin mapping
    player_index: HashMap<String, String>,

    /// Sequence for room id generation
    room_seq: u64,
}

impl RoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RoomConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn room(&self, pin: &str) -> Option<&Room> {
        self.rooms.get(pin)
    }

    pub fn room_for_player(&self, player_id: &str) -> Option<&Room> {
        self.player_index
            .get(player_id)
            .and_then(|pin| self.rooms.get(pin))
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    fn room_for_player_mut(&mut self, player_id: &str) -> Result<&mut Room, RoomError> {
        let pin = self
            .player_index
            .get(player_id)
            .ok_or(RoomError::RoomNotFound)?;
        self.rooms.get_mut(pin).ok_or(RoomError::RoomNotFound)
    }

    /// Generate a pin that collides with no live room. Pins are reusable
    /// once their room is deleted.
    fn generate_pin<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        loop {
            let pin = rng.gen_range(1000..10000).to_string();
            if !self.rooms.contains_key(&pin) {
                return pin;
            }
        }
    }

    /// Create a room with the caller as sole host player.
    pub fn create_room<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        player_id: &str,
        player_name: &str,
    ) -> (CreatedRoom, Vec<Outbound>) {
        let pin = self.generate_pin(rng);
        let salt: String = (&mut *rng)
            .sample_iter(&Alphanumeric)
            .take(8)
            .map(|b| char::from(b).to_ascii_lowercase())
            .collect();
        self.room_seq += 1;
        let game_id = format!("game-{}-{}", self.room_seq, salt);

        let host = Player::new(player_id.to_string(), player_name.to_string(), true);
        let room = Room::new(game_id.clone(), pin.clone(), salt, host);
        let update = Outbound::room(Broadcast::RoomUpdate(room.summary()));

        self.player_index.insert(player_id.to_string(), pin.clone());
        self.rooms.insert(pin.clone(), room);

        tracing::info!(%pin, game_id = %game_id, player = player_name, "room created");

        (CreatedRoom { pin, game_id }, vec![update])
    }

    /// Join an existing room by pin.
    pub fn join_room(
        &mut self,
        player_id: &str,
        pin: &str,
        player_name: &str,
    ) -> Result<(String, Vec<Outbound>), RoomError> {
        if pin.len() != 4 || !pin.chars().all(|c| c.is_ascii_digit()) {
            return Err(RoomError::InvalidPin);
        }

        let max_players = self.config.max_players;
        let room = self.rooms.get_mut(pin).ok_or(RoomError::RoomNotFound)?;

        if room.player_count() >= max_players {
            return Err(RoomError::RoomFull);
        }
        if room.game_state != GameState::Waiting {
            return Err(RoomError::GameInProgress);
        }

        room.players
            .push(Player::new(player_id.to_string(), player_name.to_string(), false));
        let game_id = room.id.clone();
        let update = Outbound::room(Broadcast::RoomUpdate(room.summary()));

        self.player_index
            .insert(player_id.to_string(), pin.to_string());

        tracing::info!(%pin, player = player_name, "player joined");

        Ok((game_id, vec![update]))
    }

    /// Flip the caller's ready flag. A no-op (no broadcasts) when the
    /// caller is in no room.
    pub fn toggle_ready(&mut self, player_id: &str) -> Vec<Outbound> {
        let Ok(room) = self.room_for_player_mut(player_id) else {
            return Vec::new();
        };
        let Some(player) = room.player_mut(player_id) else {
            return Vec::new();
        };

        player.is_ready = !player.is_ready;
        vec![Outbound::room(Broadcast::RoomUpdate(room.summary()))]
    }

    /// Start the game: build the bag and deal. Host-only, everyone ready,
    /// player count within configured bounds.
    ///
    /// Emits `GameStart` and then `RoomUpdate` - the order is the contract,
    /// clients initialize their hands from the first and their sidebars
    /// from the second.
    pub fn start_game<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        player_id: &str,
    ) -> Result<Vec<Outbound>, RoomError> {
        let min_players = self.config.min_players;
        let room = self.room_for_player_mut(player_id)?;

        if room.host != player_id {
            return Err(RoomError::NotHost);
        }
        if room.game_state != GameState::Waiting {
            return Err(RoomError::GameInProgress);
        }
        if room.player_count() < min_players {
            return Err(RoomError::NotEnoughPlayers);
        }
        if !room.all_ready() {
            return Err(RoomError::PlayersNotReady);
        }

        room.letter_bag = LetterBag::standard();
        let per_player = tiles_per_player(room.player_count());
        for index in 0..room.player_count() {
            room.players[index].tiles.clear();
            room.players[index].board_tiles.clear();
            room.deal(rng, index, per_player, "start");
        }
        room.game_state = GameState::Playing;

        tracing::info!(
            pin = %room.pin,
            players = room.player_count(),
            per_player,
            remaining = room.letter_bag.remaining(),
            "game started"
        );

        Ok(vec![
            Outbound::room(Broadcast::GameStart {
                players: room.players.iter().map(Player::tiles_view).collect(),
                remaining_tiles: room.letter_bag.remaining(),
            }),
            Outbound::room(Broadcast::RoomUpdate(room.summary())),
        ])
    }

    /// Caller emptied their hand: either they win (bag cannot supply one
    /// tile per player) or everyone draws one tile.
    pub fn peel<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        player_id: &str,
    ) -> Result<(bool, Vec<Outbound>), RoomError> {
        let room = self.room_for_player_mut(player_id)?;

        if !room.game_state.is_active() {
            return Err(RoomError::GameNotActive);
        }
        let caller = room.player(player_id).ok_or(RoomError::PlayerNotFound)?;
        if caller.hand_size() > 0 {
            return Err(RoomError::StillHasTiles);
        }
        let caller_name = caller.name.clone();

        // Wins-on-last-peel: the game ends the instant the bag cannot give
        // every player one tile, not when it is literally empty.
        if room.letter_bag.remaining() < room.player_count() {
            room.game_state = GameState::Finished;
            tracing::info!(pin = %room.pin, winner = %caller_name, "game won");
            return Ok((
                true,
                vec![Outbound::room(Broadcast::GameWon {
                    winner_id: player_id.to_string(),
                    winner_name: caller_name,
                })],
            ));
        }

        // Computed before dealing, so "remaining == player_count" still
        // reports a last round
        let is_last_round = room.letter_bag.remaining() < room.player_count() * 2;

        for index in 0..room.player_count() {
            room.deal(rng, index, 1, "peel");
        }

        tracing::debug!(
            pin = %room.pin,
            caller = %caller_name,
            remaining = room.letter_bag.remaining(),
            is_last_round,
            "peel"
        );

        Ok((
            false,
            vec![
                Outbound::room(Broadcast::PeelCalled {
                    caller_name,
                    players: room.players.iter().map(Player::tiles_view).collect(),
                    remaining_tiles: room.letter_bag.remaining(),
                    is_last_round,
                }),
                Outbound::room(Broadcast::RoomUpdate(room.summary())),
            ],
        ))
    }

    /// Trade one hand tile for three fresh ones. The dumped tile's id is
    /// retired; its letter returns to the bag before the new tiles are
    /// drawn, so it may come straight back under a new id.
    pub fn dump<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        player_id: &str,
        tile_id: &str,
    ) -> Result<(Vec<Tile>, Vec<Outbound>), RoomError> {
        let room = self.room_for_player_mut(player_id)?;

        if !room.game_state.is_active() {
            return Err(RoomError::GameNotActive);
        }

        let player_index = room
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(RoomError::PlayerNotFound)?;

        let tile_index = {
            let player = &room.players[player_index];
            player
                .tiles
                .iter()
                .position(|t| t.id == tile_id && !player.is_on_board(&t.id))
                .ok_or(RoomError::TileNotFound)?
        };

        if room.letter_bag.remaining() < 3 {
            return Err(RoomError::InsufficientBagSupply);
        }

        let dumped = room.players[player_index].tiles.remove(tile_index);
        room.letter_bag.put_back(dumped.letter);

        let before = room.players[player_index].tiles.len();
        room.deal(rng, player_index, 3, "dump");
        let new_tiles: Vec<Tile> = room.players[player_index].tiles[before..].to_vec();

        let player_name = room.players[player_index].name.clone();
        tracing::debug!(
            pin = %room.pin,
            player = %player_name,
            dumped = %dumped.letter,
            remaining = room.letter_bag.remaining(),
            "dump"
        );

        Ok((
            new_tiles,
            vec![
                Outbound::room(Broadcast::PlayerDumped {
                    player_id: player_id.to_string(),
                    player_name,
                    remaining_tiles: room.letter_bag.remaining(),
                }),
                Outbound::room(Broadcast::RoomUpdate(room.summary())),
            ],
        ))
    }

    /// Replace the caller's recorded board layout and tell everyone else
    /// the recomputed counts.
    pub fn update_board(
        &mut self,
        player_id: &str,
        board_tiles: Vec<BoardTile>,
    ) -> Result<Vec<Outbound>, RoomError> {
        let room = self.room_for_player_mut(player_id)?;

        if !room.game_state.is_active() {
            return Err(RoomError::GameNotActive);
        }
        let player = room
            .player_mut(player_id)
            .ok_or(RoomError::PlayerNotFound)?;

        player.board_tiles = board_tiles;

        let event = Broadcast::PlayerBoardUpdate {
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            board_tiles: player.board_tiles.clone(),
            hand_size: player.hand_size(),
            board_size: player.board_size(),
        };
        Ok(vec![Outbound::others(player_id, event)])
    }

    /// Client-reported hand size. The claim is logged and discarded; the
    /// broadcast always carries the count recomputed from tile ownership.
    pub fn update_hand_size(
        &mut self,
        player_id: &str,
        claimed: usize,
    ) -> Result<Vec<Outbound>, RoomError> {
        let room = self.room_for_player_mut(player_id)?;

        if !room.game_state.is_active() {
            return Err(RoomError::GameNotActive);
        }
        let player = room.player(player_id).ok_or(RoomError::PlayerNotFound)?;

        let hand_size = player.hand_size();
        if claimed != hand_size {
            tracing::debug!(
                pin = %room.pin,
                player = %player.name,
                claimed,
                recomputed = hand_size,
                "ignoring client-reported hand size"
            );
        }

        Ok(vec![Outbound::room(Broadcast::PlayerHandUpdate {
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            hand_size,
        })])
    }

    /// Client-reported tile moves. Authoritative layout comes from
    /// `update_board`; the deltas only trigger a recomputed hand-size
    /// broadcast.
    pub fn update_tile_locations(
        &mut self,
        player_id: &str,
        moved_to_board: &[String],
        moved_to_hand: &[String],
    ) -> Result<Vec<Outbound>, RoomError> {
        let room = self.room_for_player_mut(player_id)?;

        if !room.game_state.is_active() {
            return Err(RoomError::GameNotActive);
        }
        let player = room.player(player_id).ok_or(RoomError::PlayerNotFound)?;

        tracing::debug!(
            pin = %room.pin,
            player = %player.name,
            to_board = moved_to_board.len(),
            to_hand = moved_to_hand.len(),
            "tile location report"
        );

        Ok(vec![Outbound::room(Broadcast::PlayerHandUpdate {
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            hand_size: player.hand_size(),
        })])
    }

    /// Another player's visible details: hand letters only, full board.
    pub fn player_details(
        &self,
        player_id: &str,
        target_name: &str,
    ) -> Result<PlayerDetails, RoomError> {
        let room = self.room_for_player(player_id).ok_or(RoomError::RoomNotFound)?;

        if !room.game_state.is_active() {
            return Err(RoomError::GameNotActive);
        }
        let target = room
            .player_by_name(target_name)
            .ok_or(RoomError::PlayerNotFound)?;

        Ok(PlayerDetails {
            player_name: target.name.clone(),
            tiles_in_hand: target.hand().iter().map(|t| t.letter).collect(),
            board_tiles: target.board_tiles.clone(),
            hand_size: target.hand_size(),
            board_size: target.board_size(),
        })
    }

    /// Remove a player from the lobby. Host-only, waiting-only, never
    /// yourself. The kicked client is notified directly before the room.
    pub fn kick_player(
        &mut self,
        player_id: &str,
        target_id: &str,
    ) -> Result<Vec<Outbound>, RoomError> {
        let room = self.room_for_player_mut(player_id)?;

        if room.host != player_id {
            return Err(RoomError::NotHost);
        }
        if room.game_state != GameState::Waiting {
            return Err(RoomError::CannotKickDuringGame);
        }
        if target_id == player_id {
            return Err(RoomError::CannotKickSelf);
        }
        let target = room
            .remove_player(target_id)
            .ok_or(RoomError::PlayerNotFound)?;

        let outbound = vec![
            Outbound::player(
                target_id,
                Broadcast::Kicked {
                    reason: "You have been kicked from the room by the host".to_string(),
                },
            ),
            Outbound::room(Broadcast::PlayerKicked {
                player_id: target.id.clone(),
                player_name: target.name.clone(),
            }),
            Outbound::room(Broadcast::RoomUpdate(room.summary())),
        ];

        tracing::info!(pin = %room.pin, kicked = %target.name, "player kicked");
        self.player_index.remove(target_id);

        Ok(outbound)
    }

    /// Release a player's seat. Deletes the room when it empties,
    /// otherwise reassigns host to the first remaining player in join
    /// order.
    pub fn disconnect(&mut self, player_id: &str) -> Vec<Outbound> {
        let Some(pin) = self.player_index.remove(player_id) else {
            return Vec::new();
        };
        let Some(room) = self.rooms.get_mut(&pin) else {
            return Vec::new();
        };

        let Some(removed) = room.remove_player(player_id) else {
            return Vec::new();
        };

        if room.is_empty() {
            self.rooms.remove(&pin);
            tracing::info!(%pin, "room deleted");
            return Vec::new();
        }

        tracing::info!(%pin, player = %removed.name, "player left");

        vec![Outbound::room(Broadcast::PlayerLeft {
            player_id: removed.id,
            player_name: removed.name,
            room: room.summary(),
        })]
    }

    /// Dispatch one tagged command to its handler. The transport maps
    /// `Err` to a `{success: false, error}` acknowledgement; the room is
    /// left unchanged on any error.
    pub fn handle_command<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        player_id: &str,
        command: ClientCommand,
    ) -> Result<(Ack, Vec<Outbound>), RoomError> {
        match command {
            ClientCommand::CreateRoom { player_name } => {
                let (created, outbound) = self.create_room(rng, player_id, &player_name);
                Ok((
                    Ack::RoomCreated {
                        pin: created.pin,
                        game_id: created.game_id,
                    },
                    outbound,
                ))
            }
            ClientCommand::JoinRoom { pin, player_name } => {
                let (game_id, outbound) = self.join_room(player_id, &pin, &player_name)?;
                Ok((Ack::RoomJoined { game_id }, outbound))
            }
            ClientCommand::ToggleReady => Ok((Ack::Ok, self.toggle_ready(player_id))),
            ClientCommand::StartGame => Ok((Ack::Ok, self.start_game(rng, player_id)?)),
            ClientCommand::Peel => {
                let (won, outbound) = self.peel(rng, player_id)?;
                Ok((Ack::Peeled { won }, outbound))
            }
            ClientCommand::Dump { tile_id } => {
                let (new_tiles, outbound) = self.dump(rng, player_id, &tile_id)?;
                Ok((Ack::Dumped { new_tiles }, outbound))
            }
            ClientCommand::UpdateBoard { board_tiles } => {
                Ok((Ack::Ok, self.update_board(player_id, board_tiles)?))
            }
            ClientCommand::UpdateHandSize { hand_size } => {
                Ok((Ack::Ok, self.update_hand_size(player_id, hand_size)?))
            }
            ClientCommand::UpdateTileLocations {
                tiles_moved_to_board,
                tiles_moved_to_hand,
            } => Ok((
                Ack::Ok,
                self.update_tile_locations(player_id, &tiles_moved_to_board, &tiles_moved_to_hand)?,
            )),
            ClientCommand::GetPlayerDetails { player_name } => Ok((
                Ack::PlayerDetails(self.player_details(player_id, &player_name)?),
                Vec::new(),
            )),
            ClientCommand::KickPlayer { player_id: target } => {
                Ok((Ack::Ok, self.kick_player(player_id, &target)?))
            }
            ClientCommand::Disconnect => Ok((Ack::Ok, self.disconnect(player_id))),
        }
    }
}
