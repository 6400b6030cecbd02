//! Normal map filter.

use crate::color::Color;
use crate::error::MapError;
use crate::grid::PixelGrid;

/// Derives a tangent-space normal map from the red channel of a source grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalFilter {
    /// Gradient multiplier. Zero disables the filter.
    pub strength: f64,
}

impl NormalFilter {
    /// Create a new normal filter with unit strength.
    pub fn new() -> Self {
        Self { strength: 1.0 }
    }

    /// Set the strength.
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    /// Run the filter. Returns `Ok(None)` when the strength is zero.
    pub fn apply(&self, source: &PixelGrid) -> Result<Option<PixelGrid>, MapError> {
        if self.strength == 0.0 {
            return Ok(None);
        }
        if !self.strength.is_finite() || self.strength < 0.0 {
            return Err(MapError::InvalidParameter(format!(
                "normal strength must be finite and >= 0, got {}",
                self.strength
            )));
        }

        let (width, height) = source.dimensions();
        let mut output = PixelGrid::new(width, height, Color::rgb(0.5, 0.5, 1.0));

        for y in 0..height {
            for x in 0..width {
                let normal = self.calculate_normal(source, x as i64, y as i64);
                output.write(x, y, normal)?;
            }
        }

        Ok(Some(output))
    }

    /// Sobel gradient of the red channel at one pixel, encoded as a color.
    fn calculate_normal(&self, source: &PixelGrid, x: i64, y: i64) -> Color {
        let h = |dx: i64, dy: i64| source.sample(x + dx, y + dy).r;

        let top_left = h(-1, -1);
        let top = h(0, -1);
        let top_right = h(1, -1);
        let left = h(-1, 0);
        let right = h(1, 0);
        let bottom_left = h(-1, 1);
        let bottom = h(0, 1);
        let bottom_right = h(1, 1);

        // Gx = | -1  0  1 |    Gy = | -1 -2 -1 |
        //      | -2  0  2 |         |  0  0  0 |
        //      | -1  0  1 |         |  1  2  1 |
        let dx = (top_right + 2.0 * right + bottom_right) - (top_left + 2.0 * left + bottom_left);
        let dy = (bottom_left + 2.0 * bottom + bottom_right) - (top_left + 2.0 * top + top_right);

        // (dx·s, dy·s, 1) and (dx, dy, 1/s) point the same way; the second
        // form stays finite for any finite s > 1.
        let (nx, ny, nz) = if self.strength > 1.0 {
            (dx, dy, self.strength.recip())
        } else {
            (dx * self.strength, dy * self.strength, 1.0)
        };

        let len = nx.hypot(ny).hypot(nz);

        // [-1, 1] -> [0, 1]
        Color::rgb(
            nx / len * 0.5 + 0.5,
            ny / len * 0.5 + 0.5,
            nz / len * 0.5 + 0.5,
        )
    }
}

impl Default for NormalFilter {
    fn default() -> Self {
        Self::new()
    }
}
