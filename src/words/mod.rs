//! Word engine: board word extraction and dictionary validation.
//!
//! Everything here is independent of rooms and networking; it runs against
//! whatever board mirror the caller holds (client-side for live feedback,
//! or server-side if boards are ever to be judged authoritatively).

pub mod dictionary;
pub mod extraction;

pub use dictionary::{Dictionary, DictionaryCell, DictionaryError, DictionaryStatus, MIN_WORD_LEN};
pub use extraction::{
    all_tiles_connected, extract_words, isolated_tiles, validate_board, BoardValidation,
    Direction, ExtractedWord, WordTile,
};
