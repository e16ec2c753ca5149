//! The shared letter bag.
//!
//! A finite multiset of letter tiles kept as a per-letter frequency table.
//! Draws are uniform over the remaining individual tiles (not over letter
//! types), so the designed letter frequencies are preserved all game long.
//! The table representation makes `remaining` O(1) and removes the need to
//! shuffle at all.

use rand::Rng;

/// Letters in the bag alphabet.
pub const ALPHABET_LEN: usize = 26;

/// Tile count per letter for a fresh bag. Totals [`TOTAL_TILES`].
pub const LETTER_DISTRIBUTION: [(char, u8); ALPHABET_LEN] = [
    ('A', 13),
    ('B', 3),
    ('C', 3),
    ('D', 6),
    ('E', 18),
    ('F', 3),
    ('G', 4),
    ('H', 3),
    ('I', 12),
    ('J', 2),
    ('K', 2),
    ('L', 5),
    ('M', 3),
    ('N', 8),
    ('O', 11),
    ('P', 3),
    ('Q', 2),
    ('R', 9),
    ('S', 6),
    ('T', 9),
    ('U', 6),
    ('V', 3),
    ('W', 3),
    ('X', 2),
    ('Y', 3),
    ('Z', 2),
];

/// Total tiles in a fresh bag.
pub const TOTAL_TILES: usize = 98;

/// Finite multiset of letter tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterBag {
    counts: [u16; ALPHABET_LEN],
    remaining: usize,
}

impl Default for LetterBag {
    fn default() -> Self {
        Self::standard()
    }
}

impl LetterBag {
    /// A fresh bag with the standard 98-tile distribution.
    pub fn standard() -> Self {
        let mut counts = [0u16; ALPHABET_LEN];
        let mut remaining = 0;
        for (letter, count) in LETTER_DISTRIBUTION {
            counts[letter_slot(letter)] = u16::from(count);
            remaining += usize::from(count);
        }
        Self { counts, remaining }
    }

    /// An empty bag.
    pub fn empty() -> Self {
        Self {
            counts: [0; ALPHABET_LEN],
            remaining: 0,
        }
    }

    /// Rebuild a bag from a flat letter list (persisted snapshots).
    /// Non-alphabetic entries are skipped.
    pub fn from_letters<I: IntoIterator<Item = char>>(letters: I) -> Self {
        let mut bag = Self::empty();
        for letter in letters {
            bag.put_back(letter);
        }
        bag
    }

    /// Total tiles left.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Remaining tiles of one letter.
    pub fn count_of(&self, letter: char) -> usize {
        let letter = letter.to_ascii_uppercase();
        if letter.is_ascii_uppercase() {
            usize::from(self.counts[letter_slot(letter)])
        } else {
            0
        }
    }

    /// Draw one tile uniformly at random from the remaining multiset.
    pub fn draw_one<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<char> {
        if self.remaining == 0 {
            return None;
        }

        // Pick the k-th remaining tile and walk the table to find its letter.
        let mut pick = rng.gen_range(0..self.remaining);
        for (slot, count) in self.counts.iter_mut().enumerate() {
            let here = usize::from(*count);
            if pick < here {
                *count -= 1;
                self.remaining -= 1;
                return Some(slot_letter(slot));
            }
            pick -= here;
        }

        // counts and remaining always agree, so the walk cannot fall through
        unreachable!("letter bag counts out of sync with remaining total");
    }

    /// Draw up to `n` tiles. A partial draw empties the bag; never errors.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R, n: usize) -> Vec<char> {
        let take = n.min(self.remaining);
        let mut drawn = Vec::with_capacity(take);
        for _ in 0..take {
            if let Some(letter) = self.draw_one(rng) {
                drawn.push(letter);
            }
        }
        drawn
    }

    /// Return one tile to the bag. Non-alphabetic input is ignored.
    pub fn put_back(&mut self, letter: char) {
        let letter = letter.to_ascii_uppercase();
        if letter.is_ascii_uppercase() {
            self.counts[letter_slot(letter)] += 1;
            self.remaining += 1;
        }
    }

    /// Flatten to a letter list in alphabetical order (persisted snapshots).
    pub fn letters(&self) -> Vec<char> {
        let mut out = Vec::with_capacity(self.remaining);
        for (slot, count) in self.counts.iter().enumerate() {
            for _ in 0..*count {
                out.push(slot_letter(slot));
            }
        }
        out
    }
}

fn letter_slot(letter: char) -> usize {
    (letter as u8 - b'A') as usize
}

fn slot_letter(slot: usize) -> char {
    (b'A' + slot as u8) as char
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_standard_bag_totals() {
        let bag = LetterBag::standard();
        assert_eq!(bag.remaining(), TOTAL_TILES);
        assert_eq!(bag.count_of('A'), 13);
        assert_eq!(bag.count_of('E'), 18);
        assert_eq!(bag.count_of('Z'), 2);

        let table_total: usize = LETTER_DISTRIBUTION
            .iter()
            .map(|(_, count)| usize::from(*count))
            .sum();
        assert_eq!(table_total, TOTAL_TILES);
    }

    #[test]
    fn test_draw_without_replacement() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut bag = LetterBag::standard();

        let drawn = bag.draw(&mut rng, 98);
        assert_eq!(drawn.len(), 98);
        assert!(bag.is_empty());

        // The draw covered exactly the designed distribution
        let q_count = drawn.iter().filter(|&&l| l == 'Q').count();
        assert_eq!(q_count, 2);
    }

    #[test]
    fn test_partial_draw_never_errors() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut bag = LetterBag::from_letters(['A', 'B']);

        let drawn = bag.draw(&mut rng, 5);
        assert_eq!(drawn.len(), 2);
        assert!(bag.is_empty());
        assert!(bag.draw_one(&mut rng).is_none());
    }

    #[test]
    fn test_put_back() {
        let mut bag = LetterBag::empty();
        bag.put_back('q');
        bag.put_back('Q');
        bag.put_back('?');

        assert_eq!(bag.remaining(), 2);
        assert_eq!(bag.count_of('Q'), 2);
    }

    #[test]
    fn test_letters_round_trip() {
        let bag = LetterBag::standard();
        let rebuilt = LetterBag::from_letters(bag.letters());
        assert_eq!(bag, rebuilt);
    }

    proptest! {
        #[test]
        fn prop_draw_conserves_tiles(seed in any::<u64>(), n in 0usize..120) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut bag = LetterBag::standard();

            let drawn = bag.draw(&mut rng, n);
            prop_assert_eq!(drawn.len() + bag.remaining(), TOTAL_TILES);

            for letter in drawn {
                bag.put_back(letter);
            }
            prop_assert_eq!(bag.remaining(), TOTAL_TILES);
            prop_assert_eq!(bag, LetterBag::standard());
        }
    }
}
