//! Tile and grid primitives.
//!
//! A tile is a lettered piece with a globally unique id. Once drawn it never
//! changes letter or id; it only moves between a player's hand and their
//! board. Board positions are encoded as a single cell index
//! `row * grid_size + col`.

use serde::{Deserialize, Serialize};

/// Grid side length for the solo board.
pub const SOLO_GRID_SIZE: usize = 25;

/// Grid side length for the multiplayer-visualized board.
pub const MULTIPLAYER_GRID_SIZE: usize = 15;

/// A lettered tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Unique for the lifetime of the room that issued it
    pub id: String,

    /// Uppercase A-Z
    pub letter: char,
}

impl Tile {
    pub fn new(id: String, letter: char) -> Self {
        Self {
            id,
            letter: letter.to_ascii_uppercase(),
        }
    }
}

/// A tile placed on the board at a cell index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardTile {
    pub id: String,
    pub letter: char,
    /// `row * grid_size + col`
    pub position: usize,
}

impl BoardTile {
    pub fn new(id: String, letter: char, position: usize) -> Self {
        Self {
            id,
            letter: letter.to_ascii_uppercase(),
            position,
        }
    }

    /// Row/col coordinates under the given grid size.
    pub fn cell(&self, grid_size: usize) -> CellPos {
        CellPos::from_index(self.position, grid_size)
    }
}

/// Grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Decode a flat cell index.
    pub fn from_index(index: usize, grid_size: usize) -> Self {
        Self {
            row: index / grid_size,
            col: index % grid_size,
        }
    }

    /// Encode back to a flat cell index.
    pub fn index(&self, grid_size: usize) -> usize {
        self.row * grid_size + self.col
    }

    /// Check if position is within grid bounds.
    pub fn is_valid(&self, grid_size: usize) -> bool {
        self.row < grid_size && self.col < grid_size
    }

    /// In-bounds 4-adjacent neighbors (up, right, down, left).
    pub fn neighbors(&self, grid_size: usize) -> Vec<CellPos> {
        let mut out = Vec::with_capacity(4);
        if self.row > 0 {
            out.push(CellPos::new(self.row - 1, self.col));
        }
        if self.col + 1 < grid_size {
            out.push(CellPos::new(self.row, self.col + 1));
        }
        if self.row + 1 < grid_size {
            out.push(CellPos::new(self.row + 1, self.col));
        }
        if self.col > 0 {
            out.push(CellPos::new(self.row, self.col - 1));
        }
        out
    }
}

/// Per-room tile id source.
///
/// Ids combine a room salt with a monotonically increasing counter, so they
/// stay unique for the lifetime of the room. A retired id (dumped tile) is
/// never reissued because the counter only moves forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileIdGen {
    salt: String,
    counter: u64,
}

impl TileIdGen {
    pub fn new(salt: impl Into<String>) -> Self {
        Self {
            salt: salt.into(),
            counter: 0,
        }
    }

    /// Restore from a persisted counter value.
    pub fn resume(salt: impl Into<String>, counter: u64) -> Self {
        Self {
            salt: salt.into(),
            counter,
        }
    }

    /// Next unique id. The prefix records which operation issued the tile
    /// (`start`, `peel`, `dump`).
    pub fn next(&mut self, prefix: &str) -> String {
        let id = format!("{}-{}-{}", self.salt, prefix, self.counter);
        self.counter += 1;
        id
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_round_trip() {
        for index in [0, 1, 14, 15, 16, 224] {
            let pos = CellPos::from_index(index, MULTIPLAYER_GRID_SIZE);
            assert_eq!(pos.index(MULTIPLAYER_GRID_SIZE), index);
        }
    }

    #[test]
    fn test_cell_coordinates() {
        let pos = CellPos::from_index(31, MULTIPLAYER_GRID_SIZE);
        assert_eq!(pos.row, 2);
        assert_eq!(pos.col, 1);

        // Same index decodes differently on the solo grid
        let solo = CellPos::from_index(31, SOLO_GRID_SIZE);
        assert_eq!(solo.row, 1);
        assert_eq!(solo.col, 6);
    }

    #[test]
    fn test_neighbors_corner() {
        let corner = CellPos::new(0, 0);
        let neighbors = corner.neighbors(MULTIPLAYER_GRID_SIZE);
        assert_eq!(neighbors.len(), 2);
        assert!(neighbors.contains(&CellPos::new(0, 1)));
        assert!(neighbors.contains(&CellPos::new(1, 0)));
    }

    #[test]
    fn test_neighbors_interior() {
        let mid = CellPos::new(3, 3);
        assert_eq!(mid.neighbors(MULTIPLAYER_GRID_SIZE).len(), 4);
    }

    #[test]
    fn test_tile_ids_unique() {
        let mut ids = TileIdGen::new("a1b2c3d4");
        let first = ids.next("start");
        let second = ids.next("start");
        let third = ids.next("peel");

        assert_eq!(first, "a1b2c3d4-start-0");
        assert_ne!(first, second);
        assert_ne!(second, third);
    }

    #[test]
    fn test_tile_letter_normalized() {
        let tile = Tile::new("t-1".to_string(), 'q');
        assert_eq!(tile.letter, 'Q');
    }
}
