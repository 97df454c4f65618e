//! A single puzzle view: grid, history, and target solution.

use loopgrid_core::{
    Clue, CycleDirection, Edge, EdgeChange, GridState, PuzzleCodeError, SolutionCodeError,
    parse_solution_code,
};

use crate::{DimensionSettings, GeometryResolver, History, Point, Settings};

/// What a pointer press on an edge does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum EdgeAction {
    /// Draw or erase the edge (primary button).
    Toggle,
    /// Set or clear the forbidden mark (secondary button).
    Forbid,
}

/// Errors that can occur when loading a puzzle together with its solution.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum PuzzleLoadError {
    /// The puzzle code is malformed.
    #[display("invalid puzzle code: {_0}")]
    Puzzle(PuzzleCodeError),
    /// The solution code does not fit the puzzle.
    #[display("invalid solution code: {_0}")]
    Solution(SolutionCodeError),
}

/// Independent editing state for one puzzle view.
///
/// Each view (play, generate, solve) owns its own session; nothing is shared
/// between sessions.
///
/// # Examples
///
/// ```
/// use loopgrid_game::{EdgeAction, Point, PuzzleSession};
///
/// let mut session = PuzzleSession::default();
/// session.load_puzzle("5x5:c3u", &"a".repeat(25)).unwrap();
/// assert!(session.is_solved());
///
/// // Near the right border of cell (0, 0)
/// let change = session.click(Point::new(68.0, 35.0), EdgeAction::Toggle);
/// assert!(change.is_some());
/// assert!(!session.is_solved());
///
/// assert!(session.undo());
/// assert!(session.is_solved());
/// ```
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    grid: GridState,
    history: History,
    solution: Option<String>,
    resolver: GeometryResolver,
    dimensions: DimensionSettings,
}

impl Default for PuzzleSession {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl PuzzleSession {
    /// Creates a session holding an empty grid of the smallest allowed size.
    ///
    /// A zero minimum dimension is treated as one.
    ///
    /// # Panics
    ///
    /// Panics if the layout's cell size is not positive; see
    /// [`Settings::validate`].
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        let dimensions = settings.dimensions;
        let size = dimensions.clamp(dimensions.min);
        Self {
            grid: GridState::new(size, size),
            history: History::with_capacity(settings.history.capacity),
            solution: None,
            resolver: settings.layout.resolver(),
            dimensions,
        }
    }

    /// The current grid.
    #[must_use]
    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    /// The undo history.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The stored target solution code, if any.
    #[must_use]
    pub fn solution(&self) -> Option<&str> {
        self.solution.as_deref()
    }

    /// The resolver used by [`click`](Self::click) and
    /// [`click_clue`](Self::click_clue).
    #[must_use]
    pub fn resolver(&self) -> &GeometryResolver {
        &self.resolver
    }

    /// Bounds applied by [`resize`](Self::resize) and puzzle generation.
    #[must_use]
    pub fn dimensions(&self) -> DimensionSettings {
        self.dimensions
    }

    fn replace_grid(&mut self, grid: GridState, solution: Option<String>) {
        self.grid = grid;
        self.solution = solution;
        self.history.clear();
    }

    /// Replaces the puzzle with an empty grid.
    ///
    /// Both dimensions are clamped to the configured range. History and the
    /// stored solution are cleared.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let rows = self.dimensions.clamp(rows);
        let cols = self.dimensions.clamp(cols);
        log::debug!("resizing puzzle to {rows}x{cols}");
        self.replace_grid(GridState::new(rows, cols), None);
    }

    /// Loads a puzzle code, discarding edges, history, and the stored
    /// solution.
    ///
    /// # Errors
    ///
    /// Returns a [`PuzzleCodeError`] if the code is malformed; the session is
    /// left untouched.
    pub fn load_puzzle_code(&mut self, code: &str) -> Result<(), PuzzleCodeError> {
        let grid = GridState::from_puzzle_code(code).inspect_err(|err| {
            log::warn!("rejected puzzle code {code:?}: {err}");
        })?;
        log::debug!("loaded puzzle {}x{}", grid.rows(), grid.cols());
        self.replace_grid(grid, None);
        Ok(())
    }

    /// Loads a puzzle code together with its solution code.
    ///
    /// # Errors
    ///
    /// Returns a [`PuzzleLoadError`] if either code is malformed or the
    /// solution does not match the puzzle's dimensions; the session is left
    /// untouched.
    pub fn load_puzzle(&mut self, puzzle: &str, solution: &str) -> Result<(), PuzzleLoadError> {
        let grid = GridState::from_puzzle_code(puzzle)?;
        parse_solution_code(grid.rows(), grid.cols(), solution)?;
        log::debug!("loaded puzzle {}x{} with solution", grid.rows(), grid.cols());
        self.replace_grid(grid, Some(solution.to_owned()));
        Ok(())
    }

    /// Stores the target solution used by [`is_solved`](Self::is_solved).
    ///
    /// # Errors
    ///
    /// Returns a [`SolutionCodeError`] if the code does not fit the current
    /// grid; the previous solution is kept.
    pub fn set_solution(&mut self, code: &str) -> Result<(), SolutionCodeError> {
        parse_solution_code(self.grid.rows(), self.grid.cols(), code)?;
        self.solution = Some(code.to_owned());
        Ok(())
    }

    /// The canonical puzzle code of the current grid.
    #[must_use]
    pub fn puzzle_code(&self) -> String {
        self.grid.puzzle_code()
    }

    /// The solution code describing the currently drawn edges.
    #[must_use]
    pub fn state_code(&self) -> String {
        self.grid.solution_code()
    }

    /// Whether the drawn edges match the stored solution exactly.
    ///
    /// Always `false` when no solution is stored.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.solution
            .as_deref()
            .is_some_and(|solution| solution == self.state_code())
    }

    /// Replaces the drawn edges with a solution code.
    ///
    /// This is not recorded in history.
    ///
    /// # Errors
    ///
    /// Returns a [`SolutionCodeError`] if the code is malformed; the grid is
    /// left untouched.
    pub fn apply_solution_code(&mut self, code: &str) -> Result<(), SolutionCodeError> {
        self.grid.apply_solution_code(code)
    }

    /// Applies an edge action and records it in history.
    ///
    /// # Panics
    ///
    /// Panics if the edge is out of bounds for the current grid.
    pub fn apply_edge_action(&mut self, edge: Edge, action: EdgeAction) -> EdgeChange {
        let change = match action {
            EdgeAction::Toggle => self.grid.toggle_edge(edge),
            EdgeAction::Forbid => self.grid.toggle_forbidden(edge),
        };
        self.history.record(change);
        change
    }

    /// Resolves a grid-local point to an edge and applies `action` to it.
    ///
    /// Points outside the playable area are ignored and return `None`.
    pub fn click(&mut self, point: Point, action: EdgeAction) -> Option<EdgeChange> {
        let edge = self.resolver.resolve_edge(&self.grid, point)?;
        Some(self.apply_edge_action(edge, action))
    }

    /// Resolves a grid-local point to a cell and cycles its clue.
    ///
    /// Clue edits are not recorded in history. Points outside the grid are
    /// ignored and return `None`.
    pub fn click_clue(&mut self, point: Point, direction: CycleDirection) -> Option<Clue> {
        let (row, col) = self.resolver.resolve_cell(&self.grid, point)?;
        Some(self.grid.cycle_clue(row, col, direction))
    }

    /// Reverts the most recent edge mutation.
    ///
    /// Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.grid)
    }

    /// Re-applies the most recently undone edge mutation.
    ///
    /// Returns `false` if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.grid)
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use loopgrid_core::EdgeState;

    use super::*;

    #[test]
    fn test_new_session_is_empty_5x5() {
        let session = PuzzleSession::default();
        assert_eq!(session.puzzle_code(), "5x5:y");
        assert!(session.history().is_empty());
        assert_eq!(session.solution(), None);
        assert!(!session.is_solved());
    }

    #[test]
    fn test_click_records_history() {
        let mut session = PuzzleSession::default();
        let point = Point::new(38.0, 38.0);

        let change = session.click(point, EdgeAction::Forbid).unwrap();
        assert_eq!(change.edge, Edge::vertical(1));
        assert_eq!(change.after, EdgeState::Forbidden);

        session.click(point, EdgeAction::Toggle).unwrap();
        assert_eq!(session.grid().edge_state(Edge::vertical(1)), EdgeState::Present);
        assert_eq!(session.history().pointer(), Some(1));

        assert!(session.undo());
        assert_eq!(session.grid().edge_state(Edge::vertical(1)), EdgeState::Forbidden);
        assert!(session.redo());
        assert!(!session.redo());
    }

    #[test]
    fn test_click_outside_is_noop() {
        let mut session = PuzzleSession::default();
        assert_eq!(session.click(Point::new(-100.0, 5.0), EdgeAction::Toggle), None);
        assert!(session.history().is_empty());
        assert_eq!(session.click_clue(Point::new(351.0, 5.0), CycleDirection::Next), None);
    }

    #[test]
    fn test_click_clue_is_not_recorded() {
        let mut session = PuzzleSession::default();
        let clue = session.click_clue(Point::new(80.0, 10.0), CycleDirection::Previous);
        assert_eq!(clue, Some(Clue::Four));
        assert_eq!(session.grid().clue(0, 1), Clue::Four);
        assert!(session.history().is_empty());
        assert!(!session.undo());
        assert_eq!(session.puzzle_code(), "5x5:a4w");
    }

    #[test]
    fn test_resize_clamps_and_clears() {
        let mut session = PuzzleSession::default();
        session.click(Point::new(38.0, 38.0), EdgeAction::Toggle);
        session.resize(3, 12);
        assert_eq!((session.grid().rows(), session.grid().cols()), (5, 10));
        assert!(session.history().is_empty());
        assert_eq!(session.state_code(), "a".repeat(50));
    }

    #[test]
    fn test_load_failure_keeps_previous_state() {
        let mut session = PuzzleSession::default();
        session.load_puzzle("6x5:3", &"a".repeat(30)).unwrap();
        session.click(Point::new(38.0, 38.0), EdgeAction::Toggle);
        let code = session.puzzle_code();

        assert!(session.load_puzzle_code("6x5:3?").is_err());
        assert!(matches!(
            session.load_puzzle("6x5:", "abc"),
            Err(PuzzleLoadError::Solution(_))
        ));
        assert_eq!(session.puzzle_code(), code);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.solution(), Some("a".repeat(30).as_str()));
    }

    #[test]
    fn test_load_clears_history_and_solution() {
        let mut session = PuzzleSession::default();
        session.load_puzzle("5x5:", &"a".repeat(25)).unwrap();
        session.click(Point::new(38.0, 38.0), EdgeAction::Toggle);

        session.load_puzzle_code("7x6:").unwrap();
        assert!(session.history().is_empty());
        assert_eq!(session.solution(), None);
        assert_eq!((session.grid().rows(), session.grid().cols()), (6, 7));
    }

    #[test]
    fn test_solution_check() {
        let mut session = PuzzleSession::default();
        session.resize(5, 5);
        let mut target = GridState::new(5, 5);
        for edge in target.cell_edges(2, 2) {
            target.toggle_edge(edge);
        }
        session.set_solution(&target.solution_code()).unwrap();
        assert!(!session.is_solved());

        for edge in target.cell_edges(2, 2) {
            session.apply_edge_action(edge, EdgeAction::Toggle);
        }
        assert!(session.is_solved());

        assert!(session.set_solution("short").is_err());
        assert!(session.is_solved());
    }

    #[test]
    fn test_apply_solution_code_is_not_recorded() {
        let mut target = GridState::new(5, 5);
        for edge in target.cell_edges(0, 0) {
            target.toggle_edge(edge);
        }
        let code = target.solution_code();
        assert!(code.starts_with("pia"));

        let mut session = PuzzleSession::default();
        session.apply_solution_code(&code).unwrap();
        assert_eq!(session.state_code(), code);
        assert!(session.history().is_empty());
        assert!(session.apply_solution_code("p").is_err());
        assert_eq!(session.state_code(), code);
    }

    #[test]
    fn test_history_capacity_comes_from_settings() {
        let mut settings = Settings::default();
        settings.history.capacity = NonZero::new(2).unwrap();
        let mut session = PuzzleSession::new(&settings);
        for x in [38.0, 108.0, 178.0] {
            session.click(Point::new(x, 38.0), EdgeAction::Toggle).unwrap();
        }
        assert_eq!(session.history().capacity().get(), 2);
        assert_eq!(session.history().len(), 2);
        assert!(session.undo());
        assert!(session.undo());
        assert!(!session.undo());
        assert!(session.grid().is_present(Edge::vertical(1)));
    }

    #[test]
    fn test_zero_minimum_dimension_still_builds_grid() {
        let mut settings = Settings::default();
        settings.dimensions.min = 0;
        let mut session = PuzzleSession::new(&settings);
        assert_eq!((session.grid().rows(), session.grid().cols()), (1, 1));
        session.resize(0, 3);
        assert_eq!((session.grid().rows(), session.grid().cols()), (1, 3));
    }
}
