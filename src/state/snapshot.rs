//! Local game snapshots.
//!
//! Best-effort persistence for the solo game: the board, the hand, the
//! bag, and the tile counter, serialized as versioned JSON text. Importing
//! is deliberately forgiving - a version mismatch warns and proceeds, and
//! empty or malformed input initializes a fresh game instead of failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::bag::LetterBag;
use crate::state::tile::{BoardTile, Tile};

/// Current snapshot format version.
pub const GAME_STATE_VERSION: &str = "1.0";

/// A complete solo game state as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    pub version: String,

    /// Board tiles
    pub tiles: Vec<BoardTile>,

    pub player_hand: Vec<Tile>,

    /// Bag contents flattened to letters
    pub letter_bag: Vec<char>,

    /// Next local tile counter value
    pub tile_counter: u64,

    pub timestamp: DateTime<Utc>,
}

impl SavedGame {
    /// A freshly initialized game with nothing placed and a full bag.
    pub fn fresh() -> Self {
        Self {
            version: GAME_STATE_VERSION.to_string(),
            tiles: Vec::new(),
            player_hand: Vec::new(),
            letter_bag: LetterBag::standard().letters(),
            tile_counter: 1,
            timestamp: Utc::now(),
        }
    }

    /// Capture the current in-memory state.
    pub fn capture(
        tiles: Vec<BoardTile>,
        player_hand: Vec<Tile>,
        bag: &LetterBag,
        tile_counter: u64,
    ) -> Self {
        Self {
            version: GAME_STATE_VERSION.to_string(),
            tiles,
            player_hand,
            letter_bag: bag.letters(),
            tile_counter,
            timestamp: Utc::now(),
        }
    }

    /// Rebuild the bag from the persisted letter list.
    pub fn restore_bag(&self) -> LetterBag {
        LetterBag::from_letters(self.letter_bag.iter().copied())
    }
}

/// Snapshot errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    Serialize(String),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(message) => write!(f, "Failed to serialize game state: {}", message),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Serialize a game state to JSON text.
pub fn serialize_game_state(state: &SavedGame) -> Result<String, SnapshotError> {
    serde_json::to_string(state).map_err(|e| SnapshotError::Serialize(e.to_string()))
}

/// Restore a game state from persisted text.
///
/// Empty input means "no saved game" and malformed input means "unusable
/// saved game"; both come back as a fresh initialization. A version
/// mismatch is warned about but honored.
pub fn deserialize_game_state(data: &str) -> SavedGame {
    if data.trim().is_empty() {
        return SavedGame::fresh();
    }

    match serde_json::from_str::<SavedGame>(data) {
        Ok(state) => {
            if state.version != GAME_STATE_VERSION {
                tracing::warn!(
                    expected = GAME_STATE_VERSION,
                    found = %state.version,
                    "game state version mismatch"
                );
            }
            state
        }
        Err(error) => {
            tracing::warn!(%error, "discarding malformed game state");
            SavedGame::fresh()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::bag::TOTAL_TILES;
    use pretty_assertions::assert_eq;

    fn sample() -> SavedGame {
        let mut bag = LetterBag::standard();
        bag.put_back('E');
        SavedGame {
            version: GAME_STATE_VERSION.to_string(),
            tiles: vec![BoardTile::new("t1".to_string(), 'C', 12)],
            player_hand: vec![
                Tile::new("t2".to_string(), 'A'),
                Tile::new("t3".to_string(), 'T'),
            ],
            letter_bag: bag.letters(),
            tile_counter: 4,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_round_trip() {
        let state = sample();
        let text = serialize_game_state(&state).unwrap();
        let restored = deserialize_game_state(&text);
        assert_eq!(state, restored);
    }

    #[test]
    fn test_empty_input_initializes_fresh() {
        let restored = deserialize_game_state("");
        assert_eq!(restored.version, GAME_STATE_VERSION);
        assert!(restored.tiles.is_empty());
        assert_eq!(restored.letter_bag.len(), TOTAL_TILES);
        assert_eq!(restored.tile_counter, 1);

        let blank = deserialize_game_state("   \n");
        assert!(blank.player_hand.is_empty());
    }

    #[test]
    fn test_malformed_input_initializes_fresh() {
        let restored = deserialize_game_state("{not json");
        assert_eq!(restored.version, GAME_STATE_VERSION);
        assert!(restored.tiles.is_empty());
    }

    #[test]
    fn test_version_mismatch_is_tolerated() {
        let mut state = sample();
        state.version = "0.9".to_string();
        let text = serialize_game_state(&state).unwrap();

        let restored = deserialize_game_state(&text);
        assert_eq!(restored.version, "0.9");
        assert_eq!(restored.tile_counter, 4);
    }

    #[test]
    fn test_restore_bag() {
        let state = sample();
        let bag = state.restore_bag();
        assert_eq!(bag.remaining(), TOTAL_TILES + 1);
        assert_eq!(bag.count_of('E'), 19);
    }
}
