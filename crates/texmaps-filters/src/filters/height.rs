//! Height map filter.

use crate::color::Color;
use crate::error::MapError;
use crate::grid::PixelGrid;

/// Maps each pixel's luminance to a grayscale height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightFilter {
    /// Luminance multiplier. Zero disables the filter.
    pub strength: f64,
}

impl HeightFilter {
    /// Create a new height filter with unit strength.
    pub fn new() -> Self {
        Self { strength: 1.0 }
    }

    /// Set the strength.
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    /// Run the filter. Returns `Ok(None)` when the strength is zero.
    ///
    /// Values above 1.0 are kept as-is; encoding clamps them.
    pub fn apply(&self, source: &PixelGrid) -> Result<Option<PixelGrid>, MapError> {
        if self.strength == 0.0 {
            return Ok(None);
        }
        if !self.strength.is_finite() || self.strength < 0.0 {
            return Err(MapError::InvalidParameter(format!(
                "height strength must be finite and >= 0, got {}",
                self.strength
            )));
        }

        let (width, height) = source.dimensions();
        let mut output = PixelGrid::new(width, height, Color::black());

        for y in 0..height {
            for x in 0..width {
                let value = source.sample(x as i64, y as i64).luminance() * self.strength;
                output.write(x, y, Color::gray(value))?;
            }
        }

        Ok(Some(output))
    }
}

impl Default for HeightFilter {
    fn default() -> Self {
        Self::new()
    }
}
