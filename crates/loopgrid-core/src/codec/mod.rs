//! Textual codes exchanged with puzzle storage and the external engine.
//!
//! - [`puzzle`]: `"{cols}x{rows}:{clues}"` puzzle codes, decoded into a fresh
//!   [`GridState`](crate::GridState).
//! - [`solution`]: one character per cell describing drawn edges, applied to
//!   an existing grid.

pub use self::{puzzle::*, solution::*};

mod puzzle;
mod solution;
