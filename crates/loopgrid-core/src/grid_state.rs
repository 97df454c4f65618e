//! The mutable puzzle grid: edge states and clues.

use crate::{Clue, CycleDirection, Edge, EdgeChange, EdgeState, Orientation};

/// Edge and clue state of a `rows × cols` puzzle.
///
/// A grid is allocated for fixed dimensions and never resized in place; load
/// a new puzzle by building a new `GridState`.
///
/// All flattened index arithmetic is centralized here. Accessors assert that
/// the given edge or cell lies inside the current dimensions, so an
/// out-of-range index is a caller bug and panics.
///
/// # Examples
///
/// ```
/// use loopgrid_core::{EdgeState, GridState};
///
/// let mut grid = GridState::new(5, 5);
/// let top_left = grid.horizontal_edge(0, 0);
///
/// let change = grid.toggle_edge(top_left);
/// assert_eq!(change.before, EdgeState::Absent);
/// assert_eq!(grid.edge_state(top_left), EdgeState::Present);
///
/// // Forbidding a present edge clears it
/// grid.toggle_forbidden(top_left);
/// assert_eq!(grid.edge_state(top_left), EdgeState::Forbidden);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridState {
    rows: usize,
    cols: usize,
    horizontal: Vec<EdgeState>,
    vertical: Vec<EdgeState>,
    clues: Vec<Clue>,
}

impl GridState {
    /// Allocates an empty grid: no edges drawn or forbidden, every cell blank.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be positive");
        Self {
            rows,
            cols,
            horizontal: vec![EdgeState::Absent; (rows + 1) * cols],
            vertical: vec![EdgeState::Absent; rows * (cols + 1)],
            clues: vec![Clue::None; rows * cols],
        }
    }

    /// Number of cell rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cell columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells (`rows * cols`).
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Length of the flattened edge array for `orientation`.
    #[must_use]
    pub fn edge_len(&self, orientation: Orientation) -> usize {
        match orientation {
            Orientation::Horizontal => self.horizontal.len(),
            Orientation::Vertical => self.vertical.len(),
        }
    }

    /// Address of the horizontal edge at dot row `y`, column `x`.
    ///
    /// # Panics
    ///
    /// Panics unless `y <= rows` and `x < cols`.
    #[must_use]
    #[track_caller]
    pub fn horizontal_edge(&self, y: usize, x: usize) -> Edge {
        assert!(
            y <= self.rows && x < self.cols,
            "horizontal edge ({y}, {x}) out of bounds"
        );
        Edge::horizontal(y * self.cols + x)
    }

    /// Address of the vertical edge at cell row `y`, dot column `x`.
    ///
    /// # Panics
    ///
    /// Panics unless `y < rows` and `x <= cols`.
    #[must_use]
    #[track_caller]
    pub fn vertical_edge(&self, y: usize, x: usize) -> Edge {
        assert!(
            y < self.rows && x <= self.cols,
            "vertical edge ({y}, {x}) out of bounds"
        );
        Edge::vertical(y * (self.cols + 1) + x)
    }

    /// Inverse of [`horizontal_edge`](Self::horizontal_edge) /
    /// [`vertical_edge`](Self::vertical_edge): returns `(y, x)`.
    ///
    /// # Panics
    ///
    /// Panics if the edge is out of bounds.
    #[must_use]
    #[track_caller]
    pub fn edge_coords(&self, edge: Edge) -> (usize, usize) {
        assert!(self.contains_edge(edge), "edge {edge} out of bounds");
        let width = match edge.orientation() {
            Orientation::Horizontal => self.cols,
            Orientation::Vertical => self.cols + 1,
        };
        (edge.index() / width, edge.index() % width)
    }

    /// Whether `edge` addresses an edge of this grid.
    #[must_use]
    pub fn contains_edge(&self, edge: Edge) -> bool {
        edge.index() < self.edge_len(edge.orientation())
    }

    /// Flattened index of the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics unless `row < rows` and `col < cols`.
    #[must_use]
    #[track_caller]
    pub fn cell_index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) out of bounds"
        );
        row * self.cols + col
    }

    /// The four edges around a cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of bounds.
    #[must_use]
    #[track_caller]
    pub fn cell_edges(&self, row: usize, col: usize) -> CellEdges {
        let _ = self.cell_index(row, col);
        CellEdges {
            top: self.horizontal_edge(row, col),
            right: self.vertical_edge(row, col + 1),
            bottom: self.horizontal_edge(row + 1, col),
            left: self.vertical_edge(row, col),
        }
    }

    #[track_caller]
    fn slot(&self, edge: Edge) -> &EdgeState {
        let edges = match edge.orientation() {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
        };
        assert!(edge.index() < edges.len(), "edge {edge} out of bounds");
        &edges[edge.index()]
    }

    #[track_caller]
    fn slot_mut(&mut self, edge: Edge) -> &mut EdgeState {
        let edges = match edge.orientation() {
            Orientation::Horizontal => &mut self.horizontal,
            Orientation::Vertical => &mut self.vertical,
        };
        let len = edges.len();
        assert!(edge.index() < len, "edge {edge} out of bounds");
        &mut edges[edge.index()]
    }

    /// Current state of an edge.
    ///
    /// # Panics
    ///
    /// Panics if the edge is out of bounds.
    #[must_use]
    #[track_caller]
    pub fn edge_state(&self, edge: Edge) -> EdgeState {
        *self.slot(edge)
    }

    /// Whether the edge is drawn.
    ///
    /// # Panics
    ///
    /// Panics if the edge is out of bounds.
    #[must_use]
    #[track_caller]
    pub fn is_present(&self, edge: Edge) -> bool {
        self.slot(edge).is_present()
    }

    /// Whether the edge is marked as excluded.
    ///
    /// # Panics
    ///
    /// Panics if the edge is out of bounds.
    #[must_use]
    #[track_caller]
    pub fn is_forbidden(&self, edge: Edge) -> bool {
        self.slot(edge).is_forbidden()
    }

    /// Overwrites an edge's state. Used when replaying history.
    ///
    /// # Panics
    ///
    /// Panics if the edge is out of bounds.
    #[track_caller]
    pub fn set_edge_state(&mut self, edge: Edge, state: EdgeState) {
        *self.slot_mut(edge) = state;
    }

    #[track_caller]
    fn replace_edge(&mut self, edge: Edge, f: impl FnOnce(EdgeState) -> EdgeState) -> EdgeChange {
        let slot = self.slot_mut(edge);
        let before = *slot;
        let after = f(before);
        *slot = after;
        EdgeChange {
            edge,
            before,
            after,
        }
    }

    /// Flips presence of an edge and clears its forbidden mark.
    ///
    /// Returns the before/after pair for history recording.
    ///
    /// # Panics
    ///
    /// Panics if the edge is out of bounds.
    #[track_caller]
    pub fn toggle_edge(&mut self, edge: Edge) -> EdgeChange {
        self.replace_edge(edge, EdgeState::toggled_present)
    }

    /// Flips the forbidden mark of an edge and clears its presence.
    ///
    /// Returns the before/after pair for history recording.
    ///
    /// # Panics
    ///
    /// Panics if the edge is out of bounds.
    #[track_caller]
    pub fn toggle_forbidden(&mut self, edge: Edge) -> EdgeChange {
        self.replace_edge(edge, EdgeState::toggled_forbidden)
    }

    /// Iterates over every edge of one orientation with its state.
    pub fn edges(&self, orientation: Orientation) -> impl Iterator<Item = (Edge, EdgeState)> + '_ {
        let edges = match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
        };
        edges
            .iter()
            .enumerate()
            .map(move |(index, state)| (Edge::new(orientation, index), *state))
    }

    /// Turns every present edge back into an absent one.
    ///
    /// Forbidden marks are kept.
    pub fn clear_presence(&mut self) {
        for state in self.horizontal.iter_mut().chain(&mut self.vertical) {
            if state.is_present() {
                *state = EdgeState::Absent;
            }
        }
    }

    /// Clue at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of bounds.
    #[must_use]
    #[track_caller]
    pub fn clue(&self, row: usize, col: usize) -> Clue {
        self.clues[self.cell_index(row, col)]
    }

    /// All clues in row-major order.
    #[must_use]
    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    /// Sets the clue at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of bounds.
    #[track_caller]
    pub fn set_clue(&mut self, row: usize, col: usize, clue: Clue) {
        let index = self.cell_index(row, col);
        self.clues[index] = clue;
    }

    /// Steps the clue at `(row, col)` through `0, 1, 2, 3, 4, blank` and
    /// returns the new value.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of bounds.
    #[track_caller]
    pub fn cycle_clue(&mut self, row: usize, col: usize, direction: CycleDirection) -> Clue {
        let index = self.cell_index(row, col);
        let clue = self.clues[index].cycle(direction);
        self.clues[index] = clue;
        clue
    }

    /// Number of present edges around a cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of bounds.
    #[must_use]
    #[track_caller]
    pub fn present_count_around(&self, row: usize, col: usize) -> u8 {
        self.cell_edges(row, col)
            .into_iter()
            .filter(|edge| self.is_present(*edge))
            .fold(0, |count, _| count + 1)
    }

    /// Cells whose clue disagrees with the number of present edges around
    /// them, in row-major order.
    pub fn unsatisfied_clues(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.cols).map(move |col| (row, col)))
            .filter(|&(row, col)| {
                self.clue(row, col)
                    .count()
                    .is_some_and(|count| count != self.present_count_around(row, col))
            })
    }

    pub(crate) fn clues_mut(&mut self) -> &mut [Clue] {
        &mut self.clues
    }
}

/// The four edges bordering a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellEdges {
    /// Horizontal edge above the cell.
    pub top: Edge,
    /// Vertical edge right of the cell.
    pub right: Edge,
    /// Horizontal edge below the cell.
    pub bottom: Edge,
    /// Vertical edge left of the cell.
    pub left: Edge,
}

impl IntoIterator for CellEdges {
    type Item = Edge;
    type IntoIter = std::array::IntoIter<Edge, 4>;

    fn into_iter(self) -> Self::IntoIter {
        [self.top, self.right, self.bottom, self.left].into_iter()
    }
}
