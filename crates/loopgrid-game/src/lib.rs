//! Interactive puzzle sessions built on [`loopgrid_core`].
//!
//! # Overview
//!
//! - [`PuzzleSession`]: one editable puzzle view combining a
//!   [`GridState`](loopgrid_core::GridState), its undo [`History`], and the
//!   target solution.
//! - [`GeometryResolver`] and [`PointerTransform`]: map pointer positions to
//!   edges and cells.
//! - [`PuzzleEngine`]: contract with an external solver/generator, plus the
//!   session flows that validate its replies.
//! - [`PuzzleCatalog`]: stored puzzles picked at random.
//! - [`Settings`]: layout, dimension bounds, and history limits.
//!
//! Nothing here installs a logger; events are emitted through the `log`
//! facade.

pub mod catalog;
pub mod engine;
pub mod geometry;
pub mod history;
pub mod session;
pub mod settings;
mod undo_redo_stack;

pub use self::{
    catalog::{CatalogEntry, PuzzleCatalog},
    engine::{Difficulty, EngineError, PuzzleEngine, SolutionCount},
    geometry::{GeometryResolver, Point, PointerTransform},
    history::History,
    session::{EdgeAction, PuzzleLoadError, PuzzleSession},
    settings::{DimensionSettings, HistorySettings, LayoutSettings, Settings, SettingsError},
};
