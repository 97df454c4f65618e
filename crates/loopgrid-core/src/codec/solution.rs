//! Solution codes: one character per cell describing its drawn edges.
//!
//! Each cell packs its four surrounding edges into a 4-bit [`EdgeMask`]
//! (top = 1, right = 2, bottom = 4, left = 8) and is written as
//! `'a' + mask`, so the alphabet is `'a'..='p'`. Cells are listed in
//! row-major order. Interior edges appear in two neighbouring cells; decoding
//! sets an edge if either cell claims it.

use crate::{EdgeState, GridState};

bitflags::bitflags! {
    /// The drawn edges around one cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EdgeMask: u8 {
        /// Horizontal edge above the cell.
        const TOP = 0b0001;
        /// Vertical edge right of the cell.
        const RIGHT = 0b0010;
        /// Horizontal edge below the cell.
        const BOTTOM = 0b0100;
        /// Vertical edge left of the cell.
        const LEFT = 0b1000;
    }
}

impl EdgeMask {
    /// Encodes the mask as a solution code character (`'a'..='p'`).
    #[must_use]
    pub fn to_char(self) -> char {
        char::from(b'a' + self.bits())
    }

    /// Decodes a solution code character.
    ///
    /// Returns `None` for characters outside `'a'..='p'`.
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        let byte = u8::try_from(ch).ok()?;
        (b'a'..=b'p')
            .contains(&byte)
            .then(|| Self::from_bits_retain(byte - b'a'))
    }
}

/// Errors produced while decoding a solution code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SolutionCodeError {
    /// The code does not have one character per cell.
    #[display("solution code has {actual} characters, expected {expected}")]
    LengthMismatch {
        /// `rows * cols` of the target grid.
        expected: usize,
        /// Characters actually supplied.
        actual: usize,
    },
    /// A character lies outside `'a'..='p'`.
    #[display("invalid character {ch:?} at offset {offset} in solution code")]
    InvalidCharacter {
        /// The offending character.
        ch: char,
        /// Zero-based character offset.
        offset: usize,
    },
}

/// Validates a solution code for a `rows × cols` grid and returns the
/// per-cell masks in row-major order.
///
/// # Errors
///
/// Returns [`SolutionCodeError::LengthMismatch`] if the code does not contain
/// exactly `rows * cols` characters, or [`SolutionCodeError::InvalidCharacter`]
/// for a character outside `'a'..='p'`.
pub fn parse_solution_code(
    rows: usize,
    cols: usize,
    code: &str,
) -> Result<Vec<EdgeMask>, SolutionCodeError> {
    let expected = rows * cols;
    let actual = code.chars().count();
    if actual != expected {
        return Err(SolutionCodeError::LengthMismatch { expected, actual });
    }
    code.chars()
        .enumerate()
        .map(|(offset, ch)| {
            EdgeMask::from_char(ch).ok_or(SolutionCodeError::InvalidCharacter { ch, offset })
        })
        .collect()
}

impl GridState {
    /// The drawn edges around `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of bounds.
    #[must_use]
    #[track_caller]
    pub fn cell_mask(&self, row: usize, col: usize) -> EdgeMask {
        let edges = self.cell_edges(row, col);
        let mut mask = EdgeMask::empty();
        mask.set(EdgeMask::TOP, self.is_present(edges.top));
        mask.set(EdgeMask::RIGHT, self.is_present(edges.right));
        mask.set(EdgeMask::BOTTOM, self.is_present(edges.bottom));
        mask.set(EdgeMask::LEFT, self.is_present(edges.left));
        mask
    }

    /// Encodes the drawn edges as a solution code.
    ///
    /// Forbidden marks and clues are not part of the code.
    ///
    /// # Examples
    ///
    /// ```
    /// use loopgrid_core::GridState;
    ///
    /// let mut grid = GridState::new(1, 2);
    /// assert_eq!(grid.solution_code(), "aa");
    ///
    /// grid.toggle_edge(grid.vertical_edge(0, 1));
    /// assert_eq!(grid.solution_code(), "ci");
    /// ```
    #[must_use]
    pub fn solution_code(&self) -> String {
        (0..self.rows())
            .flat_map(|row| (0..self.cols()).map(move |col| (row, col)))
            .map(|(row, col)| self.cell_mask(row, col).to_char())
            .collect()
    }

    /// Replaces the drawn edges with those described by a solution code.
    ///
    /// The code is fully validated before anything changes. On success every
    /// previously present edge is cleared first; forbidden marks on edges the
    /// code does not draw are kept, and clues are never touched.
    ///
    /// # Errors
    ///
    /// Returns a [`SolutionCodeError`] if the code is malformed for this
    /// grid's dimensions. The grid is left unchanged in that case.
    pub fn apply_solution_code(&mut self, code: &str) -> Result<(), SolutionCodeError> {
        let masks = parse_solution_code(self.rows(), self.cols(), code)?;

        self.clear_presence();
        for (cell, mask) in masks.into_iter().enumerate() {
            let (row, col) = (cell / self.cols(), cell % self.cols());
            let edges = self.cell_edges(row, col);
            for (flag, edge) in [
                (EdgeMask::TOP, edges.top),
                (EdgeMask::RIGHT, edges.right),
                (EdgeMask::BOTTOM, edges.bottom),
                (EdgeMask::LEFT, edges.left),
            ] {
                if mask.contains(flag) {
                    self.set_edge_state(edge, EdgeState::Present);
                }
            }
        }
        Ok(())
    }
}
