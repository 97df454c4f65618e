//! Bundled puzzles with random selection.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Difficulty, PuzzleLoadError, PuzzleSession};

/// A stored puzzle together with its solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Side length of the (square) grid.
    pub size: usize,
    /// Difficulty bucket.
    pub difficulty: Difficulty,
    /// Puzzle code.
    pub puzzle: String,
    /// Solution code.
    pub solution: String,
}

/// A collection of stored puzzles, picked at random per size and difficulty.
///
/// Consecutive picks from the same bucket never return the same entry twice
/// in a row unless the bucket holds a single entry.
///
/// # Examples
///
/// ```
/// use loopgrid_game::{CatalogEntry, Difficulty, PuzzleCatalog};
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg64;
///
/// let entry = CatalogEntry {
///     size: 5,
///     difficulty: Difficulty::Easy,
///     puzzle: "5x5:y".to_owned(),
///     solution: "a".repeat(25),
/// };
/// let mut catalog = PuzzleCatalog::new(vec![entry.clone()]);
/// let mut rng = Pcg64::seed_from_u64(7);
///
/// assert_eq!(catalog.pick(5, Difficulty::Easy, &mut rng), Some(&entry));
/// assert_eq!(catalog.pick(6, Difficulty::Easy, &mut rng), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PuzzleCatalog {
    entries: Vec<CatalogEntry>,
    last_picked: Option<usize>,
}

impl PuzzleCatalog {
    /// Creates a catalog from its entries.
    #[must_use]
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries,
            last_picked: None,
        }
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Picks a random entry matching `size` and `difficulty`.
    ///
    /// Returns `None` if no entry matches.
    pub fn pick<R>(&mut self, size: usize, difficulty: Difficulty, rng: &mut R) -> Option<&CatalogEntry>
    where
        R: Rng + ?Sized,
    {
        let bucket = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.size == size && entry.difficulty == difficulty)
            .map(|(index, _)| index)
            .collect::<Vec<_>>();

        let skip = self
            .last_picked
            .and_then(|last| bucket.iter().position(|&index| index == last))
            .filter(|_| bucket.len() > 1);
        let index = match skip {
            Some(skip) => {
                let position = rng.random_range(0..bucket.len() - 1);
                bucket[if position >= skip { position + 1 } else { position }]
            }
            None if bucket.is_empty() => return None,
            None => bucket[rng.random_range(0..bucket.len())],
        };

        log::debug!("picked catalog entry {index} ({size}x{size} {difficulty})");
        self.last_picked = Some(index);
        self.entries.get(index)
    }
}

impl PuzzleSession {
    /// Loads a catalog entry's puzzle and solution.
    ///
    /// # Errors
    ///
    /// Returns a [`PuzzleLoadError`] if the entry is malformed; the session is
    /// left untouched.
    pub fn load_catalog_entry(&mut self, entry: &CatalogEntry) -> Result<(), PuzzleLoadError> {
        self.load_puzzle(&entry.puzzle, &entry.solution)
    }
}
