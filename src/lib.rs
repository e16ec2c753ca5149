//! TileRush State Library
//!
//! This crate provides state management and the word engine for TileRush,
//! a tile-placement word game played solo or in a small real-time room.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Room Store** - Server-authoritative rooms: membership, ready flags,
//!   the `Waiting → Playing → Finished` lifecycle, peel/dump/deal mechanics
//!   over a finite letter bag, and the broadcasts each event produces.
//!
//! - **Letter Bag** - A frequency-table multiset of the 98 game tiles with
//!   uniform random draws.
//!
//! - **Client Mirror** - A per-client projection that applies room
//!   broadcasts in any order without dropping locally held tiles.
//!
//! - **Snapshots** - Versioned, forgiving local persistence for the solo
//!   game.
//!
//! The words module provides the board engine: word extraction over a
//! sparse grid, connectivity and isolation analysis, and dictionary
//! validation with an explicit not-ready state.
//!
//! # Design Principles
//!
//! 1. **The store is the serialization point** - every room event runs
//!    read-modify-broadcast to completion; clients never resolve conflicts.
//!
//! 2. **Counts are derived, never trusted** - broadcast hand/board sizes
//!    are recomputed from tile ownership on every event.
//!
//! 3. **No networking** - this crate is pure state; the transport only
//!    ships [`state::ClientCommand`] in and [`state::Outbound`] out.
//!
//! 4. **Injectable randomness** - every dealing/drawing entry point takes
//!    an [`rand::Rng`], so tests run on seeded generators.
//!
//! # Example
//!
//! ```rust
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use tilerush_state::state::{GameState, RoomStore};
//!
//! let mut store = RoomStore::new();
//! let mut rng = SmallRng::seed_from_u64(7);
//!
//! // Create a room and join a second player
//! let (created, _) = store.create_room(&mut rng, "conn-1", "Alice");
//! store.join_room("conn-2", &created.pin, "Bob").unwrap();
//! store.toggle_ready("conn-2");
//!
//! // Host starts the game: bag built, tiles dealt, two broadcasts out
//! let broadcasts = store.start_game(&mut rng, "conn-1").unwrap();
//! assert_eq!(broadcasts.len(), 2);
//!
//! let room = store.room(&created.pin).unwrap();
//! assert_eq!(room.game_state, GameState::Playing);
//! assert_eq!(room.letter_bag.remaining(), 98 - 2 * 21);
//! ```

pub mod state;
pub mod words;

// Re-export everything from both modules at crate root
pub use state::*;
pub use words::*;
