//! Puzzle codes: grid dimensions plus a run-length clue layout.
//!
//! The format is `"{cols}x{rows}:{payload}"`. The payload walks the cells in
//! row-major order:
//!
//! - `'a'..='z'` skips 1 to 26 blank cells;
//! - `'0'..='4'` puts that clue in the current cell;
//! - `'5'` is an explicit blank cell.
//!
//! Cells not reached by the payload are blank, so `"5x5:"` is an empty 5×5
//! puzzle. The encoder always writes the canonical form: blanks as letters
//! (runs longer than 26 split into several letters), including the trailing
//! run, and never the digit `5`.

use std::str::FromStr;

use crate::{Clue, GridState};

/// Largest row or column count accepted in a puzzle code.
pub const MAX_DIMENSION: usize = 255;

/// Longest blank run a single payload letter can express.
pub const MAX_RUN: usize = 26;

const RUN_LETTERS: &[u8; MAX_RUN] = b"abcdefghijklmnopqrstuvwxyz";

/// Errors produced while parsing a puzzle code.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PuzzleCodeError {
    /// The code does not contain exactly one `':'`.
    #[display("puzzle code must contain exactly one ':'")]
    MissingDelimiter,
    /// The dimension part is not `"{cols}x{rows}"` with values in
    /// `1..=MAX_DIMENSION`.
    #[display("invalid puzzle dimensions {text:?}")]
    InvalidDimensions {
        /// The dimension part as written.
        text: String,
    },
    /// The payload contains a character outside `a-z` and `0-5`.
    #[display("invalid character {ch:?} at offset {offset} in puzzle code")]
    InvalidCharacter {
        /// The offending character.
        ch: char,
        /// Zero-based character offset within the payload.
        offset: usize,
    },
    /// The payload addresses a cell past the end of the grid.
    #[display("puzzle code runs past the last cell at offset {offset}")]
    ClueOverflow {
        /// Zero-based character offset within the payload.
        offset: usize,
    },
}

fn parse_dimensions(text: &str) -> Option<(usize, usize)> {
    let (cols, rows) = text.split_once('x')?;
    let parse = |s: &str| {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse::<usize>()
            .ok()
            .filter(|n| (1..=MAX_DIMENSION).contains(n))
    };
    Some((parse(rows)?, parse(cols)?))
}

fn decode_payload(grid: &mut GridState, payload: &str) -> Result<(), PuzzleCodeError> {
    let len = grid.cell_count();
    let clues = grid.clues_mut();
    let mut cursor = 0;

    for (offset, ch) in payload.chars().enumerate() {
        match ch {
            'a'..='z' => {
                cursor += usize::from(ch as u8 - b'a') + 1;
                if cursor > len {
                    return Err(PuzzleCodeError::ClueOverflow { offset });
                }
            }
            '0'..='5' => {
                if cursor >= len {
                    return Err(PuzzleCodeError::ClueOverflow { offset });
                }
                let value = ch as u8 - b'0';
                clues[cursor] = Clue::from_value(value).unwrap_or_default();
                cursor += 1;
            }
            _ => return Err(PuzzleCodeError::InvalidCharacter { ch, offset }),
        }
    }
    Ok(())
}

/// Accumulates blank runs and emits the canonical payload.
#[derive(Debug, Default)]
struct PayloadEncoder {
    out: String,
    pending_blanks: usize,
}

impl PayloadEncoder {
    fn push(&mut self, clue: Clue) {
        match clue.count() {
            None => self.pending_blanks += 1,
            Some(count) => {
                self.flush_blanks();
                self.out.push(char::from(b'0' + count));
            }
        }
    }

    fn flush_blanks(&mut self) {
        while self.pending_blanks > 0 {
            let run = self.pending_blanks.min(MAX_RUN);
            self.out.push(char::from(RUN_LETTERS[run - 1]));
            self.pending_blanks -= run;
        }
    }

    fn finish(mut self) -> String {
        self.flush_blanks();
        self.out
    }
}

impl GridState {
    /// Builds an empty grid (no edges) from a puzzle code.
    ///
    /// # Errors
    ///
    /// Returns a [`PuzzleCodeError`] if the code is malformed. Nothing is
    /// returned in that case, so callers never observe a partially loaded
    /// puzzle.
    ///
    /// # Examples
    ///
    /// ```
    /// use loopgrid_core::{Clue, GridState};
    ///
    /// let grid = GridState::from_puzzle_code("3x2:b3b1").unwrap();
    /// assert_eq!((grid.rows(), grid.cols()), (2, 3));
    /// assert_eq!(grid.clue(0, 2), Clue::Three);
    /// assert_eq!(grid.clue(1, 2), Clue::One);
    /// ```
    pub fn from_puzzle_code(code: &str) -> Result<Self, PuzzleCodeError> {
        let mut parts = code.split(':');
        let (Some(dimensions), Some(payload), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(PuzzleCodeError::MissingDelimiter);
        };
        let (rows, cols) =
            parse_dimensions(dimensions).ok_or_else(|| PuzzleCodeError::InvalidDimensions {
                text: dimensions.to_owned(),
            })?;

        let mut grid = Self::new(rows, cols);
        decode_payload(&mut grid, payload)?;
        Ok(grid)
    }

    /// Encodes the dimensions and clues as a canonical puzzle code.
    ///
    /// # Examples
    ///
    /// ```
    /// use loopgrid_core::GridState;
    ///
    /// let grid = GridState::new(5, 5);
    /// assert_eq!(grid.puzzle_code(), "5x5:y");
    /// ```
    #[must_use]
    pub fn puzzle_code(&self) -> String {
        let mut encoder = PayloadEncoder {
            out: format!("{}x{}:", self.cols(), self.rows()),
            pending_blanks: 0,
        };
        for &clue in self.clues() {
            encoder.push(clue);
        }
        encoder.finish()
    }
}

impl FromStr for GridState {
    type Err = PuzzleCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_puzzle_code(s)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn grid_with_clues(rows: usize, cols: usize, clues: &[(usize, Clue)]) -> GridState {
        let mut grid = GridState::new(rows, cols);
        for &(index, clue) in clues {
            grid.set_clue(index / cols, index % cols, clue);
        }
        grid
    }

    #[test]
    fn test_empty_payload_is_all_blank() {
        let grid = GridState::from_puzzle_code("5x5:").unwrap();
        assert_eq!((grid.rows(), grid.cols()), (5, 5));
        assert!(grid.clues().iter().all(|clue| clue.is_none()));
        assert_eq!(grid.solution_code(), "a".repeat(25));
        assert_eq!(grid.puzzle_code(), "5x5:y");
    }

    #[test]
    fn test_dimensions_are_cols_then_rows() {
        let grid = GridState::from_puzzle_code("7x5:").unwrap();
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.cols(), 7);
        assert_eq!(grid.puzzle_code(), "7x5:zi");
    }

    #[test]
    fn test_explicit_blank_digit() {
        let grid = GridState::from_puzzle_code("2x1:52").unwrap();
        assert_eq!(grid.clue(0, 0), Clue::None);
        assert_eq!(grid.clue(0, 1), Clue::Two);
        assert_eq!(grid.puzzle_code(), "2x1:a2");
    }

    #[test]
    fn test_clue_after_run_lands_on_next_row() {
        let grid = GridState::from_puzzle_code("3x2:b3b1").unwrap();
        assert_eq!(grid.clue(0, 2), Clue::Three);
        assert_eq!(grid.clue(1, 2), Clue::One);
        assert_eq!(grid.puzzle_code(), "3x2:b3b1");

        // Three blanks after the clue already reach the last cell
        assert_eq!(
            GridState::from_puzzle_code("3x2:b3c1"),
            Err(PuzzleCodeError::ClueOverflow { offset: 3 })
        );
    }

    #[test]
    fn test_run_of_26_uses_single_letter() {
        let grid = grid_with_clues(3, 9, &[(26, Clue::Zero)]);
        assert_eq!(grid.puzzle_code(), "9x3:z0");
        assert_eq!(GridState::from_puzzle_code("9x3:z0").unwrap(), grid);
    }

    #[test]
    fn test_run_of_27_splits() {
        let grid = grid_with_clues(4, 7, &[(27, Clue::Four)]);
        assert_eq!(grid.puzzle_code(), "7x4:za4");
        assert_eq!(GridState::from_puzzle_code("7x4:za4").unwrap(), grid);
    }

    #[test]
    fn test_run_of_zero_emits_no_letter() {
        let grid = grid_with_clues(1, 3, &[(0, Clue::One), (1, Clue::Two), (2, Clue::Three)]);
        assert_eq!(grid.puzzle_code(), "3x1:123");
    }

    #[test]
    fn test_long_trailing_run_splits() {
        let grid = GridState::new(10, 10);
        assert_eq!(grid.puzzle_code(), "10x10:zzzv");
    }

    #[test]
    fn test_rejects_bad_delimiters() {
        for code in ["5x5", "5x5:a:b", ""] {
            assert_eq!(
                GridState::from_puzzle_code(code),
                Err(PuzzleCodeError::MissingDelimiter),
                "{code:?}"
            );
        }
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        for code in ["5:", "5x:", "x5:", "ax5:", "5x5x5:", "0x5:", "5x-1:", "+5x5:", "256x5:"] {
            assert!(
                matches!(
                    GridState::from_puzzle_code(code),
                    Err(PuzzleCodeError::InvalidDimensions { .. })
                ),
                "{code:?}"
            );
        }
    }

    #[test]
    fn test_rejects_unknown_character() {
        assert_eq!(
            GridState::from_puzzle_code("5x5:a6"),
            Err(PuzzleCodeError::InvalidCharacter { ch: '6', offset: 1 })
        );
        assert_eq!(
            GridState::from_puzzle_code("5x5:A"),
            Err(PuzzleCodeError::InvalidCharacter { ch: 'A', offset: 0 })
        );
    }

    #[test]
    fn test_rejects_overflow() {
        assert_eq!(
            GridState::from_puzzle_code("2x2:d0"),
            Err(PuzzleCodeError::ClueOverflow { offset: 1 })
        );
        assert_eq!(
            GridState::from_puzzle_code("2x2:e"),
            Err(PuzzleCodeError::ClueOverflow { offset: 0 })
        );
        assert!(GridState::from_puzzle_code("2x2:d").is_ok());
    }

    #[test]
    fn test_from_str() {
        let grid: GridState = "2x2:3c".parse().unwrap();
        assert_eq!(grid.clue(0, 0), Clue::Three);
    }

    fn clue_strategy() -> impl Strategy<Value = Clue> {
        prop_oneof![
            3 => Just(Clue::None),
            1 => (0u8..5).prop_map(|v| Clue::from_value(v).unwrap()),
        ]
    }

    fn grid_strategy() -> impl Strategy<Value = GridState> {
        (1usize..=12, 1usize..=12).prop_flat_map(|(rows, cols)| {
            prop::collection::vec(clue_strategy(), rows * cols).prop_map(move |clues| {
                let mut grid = GridState::new(rows, cols);
                for (index, clue) in clues.into_iter().enumerate() {
                    grid.set_clue(index / cols, index % cols, clue);
                }
                grid
            })
        })
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(grid in grid_strategy()) {
            let code = grid.puzzle_code();
            prop_assert_eq!(GridState::from_puzzle_code(&code).unwrap(), grid);
        }

        #[test]
        fn prop_canonical_code_roundtrip(grid in grid_strategy()) {
            let code = grid.puzzle_code();
            let again = GridState::from_puzzle_code(&code).unwrap().puzzle_code();
            prop_assert_eq!(again, code);
        }
    }
}
