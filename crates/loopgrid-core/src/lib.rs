//! Core data structures for Slitherlink-style loop puzzles.
//!
//! This crate models the editable state of a puzzle grid and the compact
//! textual codes used to store and exchange puzzles.
//!
//! # Overview
//!
//! - [`edge`]: edge addressing ([`Edge`], [`Orientation`]) and the tri-state
//!   [`EdgeState`] that keeps "drawn" and "forbidden" mutually exclusive.
//! - [`clue`]: cell clues 0-4 or blank ([`Clue`]).
//! - [`grid_state`]: [`GridState`], the edge and clue arrays for a
//!   `rows × cols` puzzle, with all index arithmetic in one place.
//! - [`codec`]: puzzle codes (dimensions + run-length clues) and solution
//!   codes (one `'a'..='p'` character per cell).
//!
//! # Examples
//!
//! ```
//! use loopgrid_core::{Clue, GridState};
//!
//! let mut grid = GridState::from_puzzle_code("5x5:c3u").unwrap();
//! assert_eq!(grid.clue(0, 3), Clue::Three);
//!
//! let edge = grid.vertical_edge(0, 3);
//! grid.toggle_edge(edge);
//! assert!(grid.solution_code().starts_with("aacia"));
//! ```

pub mod clue;
pub mod codec;
pub mod edge;
pub mod grid_state;

pub use self::{
    clue::{Clue, CycleDirection},
    codec::{
        EdgeMask, MAX_DIMENSION, MAX_RUN, PuzzleCodeError, SolutionCodeError, parse_solution_code,
    },
    edge::{Edge, EdgeChange, EdgeState, Orientation},
    grid_state::{CellEdges, GridState},
};
