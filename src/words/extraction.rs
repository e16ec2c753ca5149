//! Board word extraction and connectivity.
//!
//! Pure functions over a sparse set of placed tiles. Scanning each row
//! left to right (and each column top to bottom) accumulates contiguous
//! occupied cells into runs; a run of length 2 or more is a word. A lone
//! occupied cell belongs to no word and is a candidate isolated tile.
//!
//! Connectivity and isolation are independent signals: a tile can be
//! 4-adjacent to another isolated tile (connected) while still forming no
//! word. A board needs both signals clean to be valid.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::state::tile::{BoardTile, CellPos};
use crate::words::dictionary::DictionaryCell;

/// Reading direction of an extracted word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// One tile's contribution to an extracted word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordTile {
    pub tile_id: String,
    pub position: usize,
    pub letter: char,
}

/// A word read off the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedWord {
    pub word: String,
    pub tiles: Vec<WordTile>,
    pub direction: Direction,
    pub start_position: usize,
}

/// Occupancy map keyed by cell index. Positions outside the grid are
/// dropped; of duplicate placements on one cell the last wins (a cell holds
/// at most one tile).
fn build_grid(tiles: &[BoardTile], grid_size: usize) -> HashMap<usize, &BoardTile> {
    tiles
        .iter()
        .filter(|tile| tile.position < grid_size * grid_size)
        .map(|tile| (tile.position, tile))
        .collect()
}

/// All words formed on the board, horizontal then vertical.
pub fn extract_words(tiles: &[BoardTile], grid_size: usize) -> Vec<ExtractedWord> {
    if tiles.is_empty() {
        return Vec::new();
    }

    let grid = build_grid(tiles, grid_size);
    let mut words = Vec::new();

    for row in 0..grid_size {
        let mut run: Vec<&BoardTile> = Vec::new();
        for col in 0..grid_size {
            let index = CellPos::new(row, col).index(grid_size);
            match grid.get(&index) {
                Some(tile) => run.push(tile),
                None => flush_run(&mut run, Direction::Horizontal, &mut words),
            }
        }
        flush_run(&mut run, Direction::Horizontal, &mut words);
    }

    for col in 0..grid_size {
        let mut run: Vec<&BoardTile> = Vec::new();
        for row in 0..grid_size {
            let index = CellPos::new(row, col).index(grid_size);
            match grid.get(&index) {
                Some(tile) => run.push(tile),
                None => flush_run(&mut run, Direction::Vertical, &mut words),
            }
        }
        flush_run(&mut run, Direction::Vertical, &mut words);
    }

    words
}

/// Emit the accumulated run as a word if it is long enough, then reset.
fn flush_run(run: &mut Vec<&BoardTile>, direction: Direction, words: &mut Vec<ExtractedWord>) {
    if run.len() >= 2 {
        words.push(ExtractedWord {
            word: run.iter().map(|tile| tile.letter).collect(),
            tiles: run
                .iter()
                .map(|tile| WordTile {
                    tile_id: tile.id.clone(),
                    position: tile.position,
                    letter: tile.letter,
                })
                .collect(),
            direction,
            start_position: run[0].position,
        });
    }
    run.clear();
}

/// Whether every occupied cell is reachable from every other through
/// 4-adjacent occupied cells. Empty boards are trivially connected.
pub fn all_tiles_connected(tiles: &[BoardTile], grid_size: usize) -> bool {
    let grid = build_grid(tiles, grid_size);
    if grid.len() <= 1 {
        return true;
    }

    let start = match grid.keys().next() {
        Some(index) => *index,
        None => return true,
    };

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(index) = queue.pop_front() {
        let pos = CellPos::from_index(index, grid_size);
        for neighbor in pos.neighbors(grid_size) {
            let neighbor_index = neighbor.index(grid_size);
            if grid.contains_key(&neighbor_index) && visited.insert(neighbor_index) {
                queue.push_back(neighbor_index);
            }
        }
    }

    visited.len() == grid.len()
}

/// Tiles covered by no extracted word in either direction.
pub fn isolated_tiles(tiles: &[BoardTile], grid_size: usize) -> Vec<BoardTile> {
    let words = extract_words(tiles, grid_size);
    let covered: HashSet<&str> = words
        .iter()
        .flat_map(|word| word.tiles.iter())
        .map(|tile| tile.tile_id.as_str())
        .collect();

    tiles
        .iter()
        .filter(|tile| !covered.contains(tile.id.as_str()))
        .cloned()
        .collect()
}

/// Full structural + dictionary verdict for one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardValidation {
    pub is_valid: bool,
    pub all_words: Vec<ExtractedWord>,
    pub valid_words: Vec<ExtractedWord>,
    pub invalid_words: Vec<ExtractedWord>,
    pub isolated_tiles: Vec<BoardTile>,
    pub is_connected: bool,
    pub dictionary_ready: bool,
}

impl BoardValidation {
    /// The verdict for an empty board: trivially valid, nothing to report.
    fn empty() -> Self {
        Self {
            is_valid: true,
            all_words: Vec::new(),
            valid_words: Vec::new(),
            invalid_words: Vec::new(),
            isolated_tiles: Vec::new(),
            is_connected: true,
            dictionary_ready: true,
        }
    }
}

/// Judge a board against structure and dictionary.
///
/// A non-empty board is valid iff the dictionary is loaded, all tiles are
/// connected, no tile is isolated, every word is in the dictionary, and at
/// least one word was formed. Structure is always computed even while the
/// dictionary is still unavailable, so clients can show connectivity
/// feedback early.
pub fn validate_board(
    tiles: &[BoardTile],
    grid_size: usize,
    dictionary: &DictionaryCell,
) -> BoardValidation {
    if tiles.is_empty() {
        return BoardValidation::empty();
    }

    let all_words = extract_words(tiles, grid_size);
    let is_connected = all_tiles_connected(tiles, grid_size);
    let isolated = isolated_tiles(tiles, grid_size);

    let mut valid_words = Vec::new();
    let mut invalid_words = Vec::new();
    let dictionary_ready = match dictionary.get() {
        Some(dictionary) => {
            for word in &all_words {
                if dictionary.contains(&word.word) {
                    valid_words.push(word.clone());
                } else {
                    invalid_words.push(word.clone());
                }
            }
            true
        }
        None => false,
    };

    let is_valid = dictionary_ready
        && is_connected
        && isolated.is_empty()
        && invalid_words.is_empty()
        && !all_words.is_empty();

    BoardValidation {
        is_valid,
        all_words,
        valid_words,
        invalid_words,
        isolated_tiles: isolated,
        is_connected,
        dictionary_ready,
    }
}
