//! Cell clue representation.

use std::fmt::{self, Display};

/// A numeric cell clue, or the absence of one.
///
/// A clue states how many of the four edges surrounding a cell belong to the
/// loop. The wire value of [`Clue::None`] is `5`, matching the puzzle code
/// format where the digit `5` is an explicit blank.
///
/// # Examples
///
/// ```
/// use loopgrid_core::{Clue, CycleDirection};
///
/// let clue = Clue::from_value(3).unwrap();
/// assert_eq!(clue.count(), Some(3));
///
/// // Cycling wraps through the blank value
/// assert_eq!(Clue::Four.cycle(CycleDirection::Next), Clue::None);
/// assert_eq!(Clue::None.cycle(CycleDirection::Next), Clue::Zero);
/// assert_eq!(Clue::Zero.cycle(CycleDirection::Previous), Clue::None);
/// ```
#[derive(
    Debug,
    Default,
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
#[repr(u8)]
pub enum Clue {
    /// No loop edge around the cell.
    Zero = 0,
    /// One loop edge around the cell.
    One = 1,
    /// Two loop edges around the cell.
    Two = 2,
    /// Three loop edges around the cell.
    Three = 3,
    /// All four edges around the cell.
    Four = 4,
    /// No clue in this cell.
    #[default]
    None = 5,
}

impl Clue {
    /// Number of distinct clue values, including [`Clue::None`].
    pub const CARDINALITY: u8 = 6;

    /// All clue values in wire order.
    pub const ALL: [Self; 6] = [
        Self::Zero,
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::None,
    ];

    /// Converts a wire value (`0..=5`) into a clue.
    ///
    /// Returns `None` for values above 5.
    #[must_use]
    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Zero),
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            5 => Some(Self::None),
            _ => None,
        }
    }

    /// Returns the wire value (`0..=5`).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Returns the edge count required by this clue, if any.
    #[must_use]
    pub const fn count(self) -> Option<u8> {
        match self {
            Self::None => None,
            _ => Some(self as u8),
        }
    }

    /// Steps to the neighbouring clue value, wrapping modulo 6.
    #[must_use]
    pub const fn cycle(self, direction: CycleDirection) -> Self {
        let n = Self::CARDINALITY;
        let next = match direction {
            CycleDirection::Next => (self.value() + 1) % n,
            CycleDirection::Previous => (self.value() + n - 1) % n,
        };
        match Self::from_value(next) {
            Some(clue) => clue,
            None => unreachable!(),
        }
    }
}

impl Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.count() {
            Some(count) => write!(f, "{count}"),
            None => f.write_str("."),
        }
    }
}

/// Direction used when cycling a clue value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum CycleDirection {
    /// Advance by one (primary click).
    Next,
    /// Step back by one (secondary click).
    Previous,
}
