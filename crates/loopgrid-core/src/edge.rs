//! Edge addressing and per-edge state.
//!
//! Edges live in two flattened arrays, one per [`Orientation`]:
//!
//! - horizontal edges form a `(rows + 1) × cols` grid, indexed `y * cols + x`;
//! - vertical edges form a `rows × (cols + 1)` grid, indexed `y * (cols + 1) + x`.
//!
//! The index arithmetic lives in [`GridState`](crate::GridState); an [`Edge`]
//! is only a validated `(orientation, index)` pair.

use std::fmt::{self, Display};

/// The orientation of an edge segment.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::IsVariant,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum Orientation {
    /// A segment between two horizontally adjacent dots.
    Horizontal,
    /// A segment between two vertically adjacent dots.
    Vertical,
}

impl Orientation {
    /// Both orientations, horizontal first.
    pub const ALL: [Self; 2] = [Self::Horizontal, Self::Vertical];
}

/// An edge address: orientation plus flattened index.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Edge {
    orientation: Orientation,
    index: usize,
}

impl Edge {
    /// Creates an edge address.
    ///
    /// The index is not checked here; [`GridState`](crate::GridState) asserts
    /// it against the current dimensions on every access.
    #[must_use]
    pub const fn new(orientation: Orientation, index: usize) -> Self {
        Self { orientation, index }
    }

    /// Shorthand for a horizontal edge address.
    #[must_use]
    pub const fn horizontal(index: usize) -> Self {
        Self::new(Orientation::Horizontal, index)
    }

    /// Shorthand for a vertical edge address.
    #[must_use]
    pub const fn vertical(index: usize) -> Self {
        Self::new(Orientation::Vertical, index)
    }

    /// Returns the orientation.
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        self.orientation
    }

    /// Returns the flattened index within the orientation's array.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.orientation {
            Orientation::Horizontal => 'h',
            Orientation::Vertical => 'v',
        };
        write!(f, "{tag}{}", self.index)
    }
}

/// The state of a single edge.
///
/// An edge is never both present and forbidden; the enum makes that
/// unrepresentable.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::IsVariant,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum EdgeState {
    /// Neither drawn nor excluded.
    #[default]
    Absent,
    /// Drawn as part of the loop.
    Present,
    /// Marked as excluded from the loop.
    Forbidden,
}

impl EdgeState {
    /// Builds a state from the two boolean flags.
    ///
    /// `present` wins if both flags are set.
    #[must_use]
    pub const fn from_flags(present: bool, forbidden: bool) -> Self {
        match (present, forbidden) {
            (true, _) => Self::Present,
            (false, true) => Self::Forbidden,
            (false, false) => Self::Absent,
        }
    }

    /// Returns the state after a primary toggle: flips presence, clears the
    /// forbidden mark.
    #[must_use]
    pub const fn toggled_present(self) -> Self {
        match self {
            Self::Present => Self::Absent,
            Self::Absent | Self::Forbidden => Self::Present,
        }
    }

    /// Returns the state after a secondary toggle: flips the forbidden mark,
    /// clears presence.
    #[must_use]
    pub const fn toggled_forbidden(self) -> Self {
        match self {
            Self::Forbidden => Self::Absent,
            Self::Absent | Self::Present => Self::Forbidden,
        }
    }
}

/// A single recorded edge mutation.
///
/// This is the unit stored by undo history. The boolean accessors expose the
/// classic six-field view `(index, orientation, present before/after,
/// forbidden before/after)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct EdgeChange {
    /// The mutated edge.
    pub edge: Edge,
    /// State prior to the mutation.
    pub before: EdgeState,
    /// State after the mutation.
    pub after: EdgeState,
}

impl EdgeChange {
    /// Whether the edge was present before the mutation.
    #[must_use]
    pub fn present_before(&self) -> bool {
        self.before.is_present()
    }

    /// Whether the edge is present after the mutation.
    #[must_use]
    pub fn present_after(&self) -> bool {
        self.after.is_present()
    }

    /// Whether the edge was forbidden before the mutation.
    #[must_use]
    pub fn forbidden_before(&self) -> bool {
        self.before.is_forbidden()
    }

    /// Whether the edge is forbidden after the mutation.
    #[must_use]
    pub fn forbidden_after(&self) -> bool {
        self.after.is_forbidden()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_present_clears_forbidden() {
        assert_eq!(EdgeState::Absent.toggled_present(), EdgeState::Present);
        assert_eq!(EdgeState::Present.toggled_present(), EdgeState::Absent);
        assert_eq!(EdgeState::Forbidden.toggled_present(), EdgeState::Present);
    }

    #[test]
    fn test_toggle_forbidden_clears_present() {
        assert_eq!(EdgeState::Absent.toggled_forbidden(), EdgeState::Forbidden);
        assert_eq!(EdgeState::Forbidden.toggled_forbidden(), EdgeState::Absent);
        assert_eq!(EdgeState::Present.toggled_forbidden(), EdgeState::Forbidden);
    }

    #[test]
    fn test_from_flags() {
        assert_eq!(EdgeState::from_flags(false, false), EdgeState::Absent);
        assert_eq!(EdgeState::from_flags(true, false), EdgeState::Present);
        assert_eq!(EdgeState::from_flags(false, true), EdgeState::Forbidden);
        assert_eq!(EdgeState::from_flags(true, true), EdgeState::Present);
    }

    #[test]
    fn test_edge_change_flag_view() {
        let change = EdgeChange {
            edge: Edge::vertical(3),
            before: EdgeState::Forbidden,
            after: EdgeState::Present,
        };
        assert!(!change.present_before());
        assert!(change.present_after());
        assert!(change.forbidden_before());
        assert!(!change.forbidden_after());
        assert_eq!(change.edge.to_string(), "v3");
    }
}
