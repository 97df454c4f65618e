//! Linear undo/redo history of edge mutations.

use std::num::NonZero;

use loopgrid_core::{EdgeChange, GridState};

use crate::undo_redo_stack::UndoRedoStack;

/// Undo/redo log of [`EdgeChange`]s.
///
/// The log is linear: recording a change while some entries are undone
/// discards those entries. Only edge and forbidden-mark toggles belong here;
/// clue edits and puzzle loads are never recorded, and loading a puzzle
/// clears the log.
///
/// # Examples
///
/// ```
/// use loopgrid_core::GridState;
/// use loopgrid_game::History;
///
/// let mut grid = GridState::new(5, 5);
/// let mut history = History::new();
///
/// let edge = grid.horizontal_edge(0, 0);
/// history.record(grid.toggle_edge(edge));
/// assert!(grid.is_present(edge));
///
/// assert!(history.undo(&mut grid));
/// assert!(!grid.is_present(edge));
/// assert!(history.redo(&mut grid));
/// assert!(grid.is_present(edge));
/// ```
#[derive(Debug, Clone)]
pub struct History {
    stack: UndoRedoStack<EdgeChange>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Number of entries kept before the oldest is dropped.
    #[must_use]
    pub const fn default_capacity() -> NonZero<usize> {
        NonZero::new(5000).unwrap()
    }

    /// Creates an empty history with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::default_capacity())
    }

    /// Creates an empty history keeping at most `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: NonZero<usize>) -> Self {
        Self {
            stack: UndoRedoStack::new(capacity),
        }
    }

    /// Maximum number of retained entries.
    #[must_use]
    pub fn capacity(&self) -> NonZero<usize> {
        self.stack.capacity()
    }

    /// Number of entries, including undone ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether the log holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.len() == 0
    }

    /// Index of the most recently applied entry; `None` when there is nothing
    /// to undo.
    #[must_use]
    pub fn pointer(&self) -> Option<usize> {
        self.stack.pointer()
    }

    /// All entries in recording order, including undone ones.
    pub fn entries(&self) -> impl Iterator<Item = &EdgeChange> {
        self.stack.entries()
    }

    /// Appends a change, discarding any redo branch.
    pub fn record(&mut self, change: EdgeChange) {
        self.stack.push(change);
    }

    /// Whether [`undo`](Self::undo) would succeed.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.stack.can_undo()
    }

    /// Whether [`redo`](Self::redo) would succeed.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.stack.can_redo()
    }

    /// Restores the `before` state of the current entry and steps back.
    ///
    /// Returns `false` without touching `grid` when there is nothing to undo.
    pub fn undo(&mut self, grid: &mut GridState) -> bool {
        let Some(change) = self.stack.undo() else {
            return false;
        };
        grid.set_edge_state(change.edge, change.before);
        true
    }

    /// Steps forward and re-applies the `after` state of that entry.
    ///
    /// Returns `false` without touching `grid` when there is nothing to redo.
    pub fn redo(&mut self, grid: &mut GridState) -> bool {
        let Some(change) = self.stack.redo() else {
            return false;
        };
        grid.set_edge_state(change.edge, change.after);
        true
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.stack.clear();
    }
}
