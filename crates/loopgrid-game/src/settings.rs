//! User-adjustable configuration.

use std::num::NonZero;

use serde::{Deserialize, Serialize};

use crate::{GeometryResolver, History, PointerTransform};

/// Top-level settings for a puzzle view.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Drawing-surface geometry.
    pub layout: LayoutSettings,
    /// Bounds applied to user-entered grid dimensions.
    pub dimensions: DimensionSettings,
    /// Undo history limits.
    pub history: HistorySettings,
}

impl Settings {
    /// Checks that the settings describe a usable configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`SettingsError`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let LayoutSettings {
            cell_size,
            margin,
            device_pixel_ratio,
        } = self.layout;
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(SettingsError::CellSize { value: cell_size });
        }
        if !(margin.is_finite() && margin >= 0.0) {
            return Err(SettingsError::Margin { value: margin });
        }
        if !(device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0) {
            return Err(SettingsError::DevicePixelRatio {
                value: device_pixel_ratio,
            });
        }
        let DimensionSettings { min, max } = self.dimensions;
        if min == 0 || min > max {
            return Err(SettingsError::DimensionRange { min, max });
        }
        Ok(())
    }
}

/// Errors reported by [`Settings::validate`].
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SettingsError {
    /// Cell size is not a positive number.
    #[display("cell size must be positive, got {value}")]
    CellSize {
        /// The rejected value.
        value: f64,
    },
    /// Margin is negative or not finite.
    #[display("margin must not be negative, got {value}")]
    Margin {
        /// The rejected value.
        value: f64,
    },
    /// Device pixel ratio is not a positive number.
    #[display("device pixel ratio must be positive, got {value}")]
    DevicePixelRatio {
        /// The rejected value.
        value: f64,
    },
    /// Dimension bounds are empty or include zero.
    #[display("invalid dimension range {min}..={max}")]
    DimensionRange {
        /// The rejected lower bound.
        min: usize,
        /// The rejected upper bound.
        max: usize,
    },
}

/// Geometry of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Cell edge length in device pixels.
    pub cell_size: f64,
    /// Gap between the surface border and the outer dots.
    pub margin: f64,
    /// Device pixels per client pixel.
    pub device_pixel_ratio: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        let cell_size = 70.0;
        Self {
            cell_size,
            margin: cell_size / 2.0,
            device_pixel_ratio: 1.0,
        }
    }
}

impl LayoutSettings {
    /// Builds the edge/cell resolver for this layout.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is not positive; see [`Settings::validate`].
    #[must_use]
    pub fn resolver(&self) -> GeometryResolver {
        GeometryResolver::new(self.cell_size)
    }

    /// Builds the client-to-grid coordinate transform for this layout.
    #[must_use]
    pub fn pointer_transform(&self) -> PointerTransform {
        PointerTransform::new(self.margin, self.device_pixel_ratio)
    }
}

/// Inclusive bounds for rows and columns chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionSettings {
    /// Smallest allowed row/column count.
    pub min: usize,
    /// Largest allowed row/column count.
    pub max: usize,
}

impl Default for DimensionSettings {
    fn default() -> Self {
        Self { min: 5, max: 10 }
    }
}

impl DimensionSettings {
    /// Clamps a requested row or column count into range.
    ///
    /// The result is never zero, even if `min` is.
    #[must_use]
    pub fn clamp(&self, value: usize) -> usize {
        let min = self.min.max(1);
        value.clamp(min, self.max.max(min))
    }
}

/// Undo history limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of retained edge mutations.
    pub capacity: NonZero<usize>,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            capacity: History::default_capacity(),
        }
    }
}
