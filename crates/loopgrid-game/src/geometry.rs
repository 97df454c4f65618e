//! Pointer-to-grid geometry.
//!
//! [`PointerTransform`] turns a raw client coordinate into grid-local pixel
//! space; [`GeometryResolver`] maps grid-local points to the nearest edge or
//! to a cell. Points that fall outside the playable area resolve to `None`.

use loopgrid_core::{Edge, GridState};

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Horizontal coordinate, growing to the right.
    pub x: f64,
    /// Vertical coordinate, growing downwards.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Converts client coordinates into grid-local coordinates.
///
/// The drawing surface is scaled by the device pixel ratio and the grid is
/// inset by a margin on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerTransform {
    margin: f64,
    device_pixel_ratio: f64,
}

impl PointerTransform {
    /// Creates a transform for a grid drawn `margin` device pixels from the
    /// surface origin.
    #[must_use]
    pub const fn new(margin: f64, device_pixel_ratio: f64) -> Self {
        Self {
            margin,
            device_pixel_ratio,
        }
    }

    /// Maps a client coordinate to grid-local space, given the client
    /// coordinate of the drawing surface's top-left corner.
    #[must_use]
    pub fn to_grid_local(&self, client: Point, surface_origin: Point) -> Point {
        Point {
            x: (client.x - surface_origin.x) * self.device_pixel_ratio - self.margin,
            y: (client.y - surface_origin.y) * self.device_pixel_ratio - self.margin,
        }
    }
}

/// Resolves grid-local points to edges and cells.
///
/// # Examples
///
/// ```
/// use loopgrid_core::{Edge, GridState};
/// use loopgrid_game::{GeometryResolver, Point};
///
/// let grid = GridState::new(5, 5);
/// let resolver = GeometryResolver::new(70.0);
///
/// // Just above the centre line of the first cell's top edge
/// assert_eq!(
///     resolver.resolve_edge(&grid, Point::new(35.0, 5.0)),
///     Some(Edge::horizontal(0))
/// );
/// // Too far left of the grid
/// assert_eq!(resolver.resolve_edge(&grid, Point::new(-60.0, 35.0)), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryResolver {
    cell_size: f64,
}

impl GeometryResolver {
    /// Creates a resolver for cells `cell_size` pixels wide.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is not a positive finite number.
    #[must_use]
    pub fn new(cell_size: f64) -> Self {
        assert!(
            cell_size.is_finite() && cell_size > 0.0,
            "cell size must be positive, got {cell_size}"
        );
        Self { cell_size }
    }

    /// Cell edge length in pixels.
    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Resolves a point to the nearest edge of the cell containing it.
    ///
    /// The point's offset from the cell centre picks the edge: when the
    /// horizontal offset is at least as large as the vertical one a vertical
    /// edge is chosen, otherwise a horizontal one. A zero offset counts as
    /// positive, so ties go to the right or bottom edge.
    #[must_use]
    pub fn resolve_edge(&self, grid: &GridState, point: Point) -> Option<Edge> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return None;
        }
        let row = (point.y / self.cell_size).floor();
        let col = (point.x / self.cell_size).floor();
        let rel_x = point.x - (col + 0.5) * self.cell_size;
        let rel_y = point.y - (row + 0.5) * self.cell_size;

        if rel_x.abs() >= rel_y.abs() {
            let col = if rel_x >= 0.0 { col + 1.0 } else { col };
            let row = to_index(row, grid.rows())?;
            let col = to_index(col, grid.cols() + 1)?;
            Some(grid.vertical_edge(row, col))
        } else {
            let row = if rel_y >= 0.0 { row + 1.0 } else { row };
            let row = to_index(row, grid.rows() + 1)?;
            let col = to_index(col, grid.cols())?;
            Some(grid.horizontal_edge(row, col))
        }
    }

    /// Resolves a point to the `(row, col)` of the cell containing it.
    #[must_use]
    pub fn resolve_cell(&self, grid: &GridState, point: Point) -> Option<(usize, usize)> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return None;
        }
        let row = to_index((point.y / self.cell_size).floor(), grid.rows())?;
        let col = to_index((point.x / self.cell_size).floor(), grid.cols())?;
        Some((row, col))
    }
}

/// Converts a floored coordinate into an index below `bound`.
fn to_index(value: f64, bound: usize) -> Option<usize> {
    if value < 0.0 {
        return None;
    }
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = value as usize;
    (index < bound).then_some(index)
}
