//! Ambient occlusion (AO) map filter.

use std::f64::consts::TAU;

use rand::Rng;

use crate::color::Color;
use crate::error::MapError;
use crate::grid::PixelGrid;

/// How a continuous disc offset becomes a whole-pixel displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetRounding {
    /// Drop the fractional part (toward zero).
    #[default]
    Truncate,
    /// Round half away from zero.
    Nearest,
}

impl OffsetRounding {
    #[inline]
    fn apply(self, offset: f64) -> i64 {
        match self {
            OffsetRounding::Truncate => offset.trunc() as i64,
            OffsetRounding::Nearest => offset.round() as i64,
        }
    }
}

/// Estimates occlusion from the average brightness of random neighbors.
///
/// Each output pixel is `clamp01(mean(luminance(neighbor)) + bias)`, where
/// the neighbors are drawn uniformly from a disc around the pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AoFilter {
    /// Disc radius in pixels.
    pub radius: f64,
    /// Offset added after averaging. Zero disables the filter.
    pub bias: f64,
    /// Samples per pixel.
    pub samples: u32,
    /// Offset-to-pixel conversion.
    pub rounding: OffsetRounding,
}

impl AoFilter {
    /// Create a new AO filter.
    pub fn new() -> Self {
        Self {
            radius: 1.0,
            bias: 0.5,
            samples: 64,
            rounding: OffsetRounding::Truncate,
        }
    }

    /// Set the sample radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the bias.
    pub fn with_bias(mut self, bias: f64) -> Self {
        self.bias = bias;
        self
    }

    /// Set the number of samples.
    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    /// Set the offset rounding mode.
    pub fn with_rounding(mut self, rounding: OffsetRounding) -> Self {
        self.rounding = rounding;
        self
    }

    fn validate(&self) -> Result<(), MapError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(MapError::InvalidParameter(format!(
                "ao radius must be finite and > 0, got {}",
                self.radius
            )));
        }
        if !self.bias.is_finite() {
            return Err(MapError::InvalidParameter(format!(
                "ao bias must be finite, got {}",
                self.bias
            )));
        }
        if self.samples == 0 {
            return Err(MapError::InvalidParameter(
                "ao sample count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Run the filter, drawing sample positions from `rng`.
    ///
    /// Returns `Ok(None)` when the bias is zero. Pixels are visited in
    /// row-major order, so a seeded `rng` gives reproducible output.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        source: &PixelGrid,
        rng: &mut R,
    ) -> Result<Option<PixelGrid>, MapError> {
        if self.bias == 0.0 {
            return Ok(None);
        }
        self.validate()?;

        let (width, height) = source.dimensions();
        let mut output = PixelGrid::new(width, height, Color::white());

        for y in 0..height {
            for x in 0..width {
                let ao = self.calculate_ao(source, x as i64, y as i64, rng);
                output.write(x, y, Color::gray(ao))?;
            }
        }

        Ok(Some(output))
    }

    fn calculate_ao<R: Rng + ?Sized>(&self, source: &PixelGrid, x: i64, y: i64, rng: &mut R) -> f64 {
        let mut occlusion = 0.0;

        for _ in 0..self.samples {
            let (ox, oy) = sample_disc(rng, self.radius);
            let sx = x.saturating_add(self.rounding.apply(ox));
            let sy = y.saturating_add(self.rounding.apply(oy));
            occlusion += source.sample(sx, sy).luminance();
        }

        (occlusion / self.samples as f64 + self.bias).clamp(0.0, 1.0)
    }
}

impl Default for AoFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform point inside a disc of the given radius centered at the origin.
fn sample_disc<R: Rng + ?Sized>(rng: &mut R, radius: f64) -> (f64, f64) {
    // sqrt keeps the density uniform over area rather than over radius
    let r = radius * rng.gen::<f64>().sqrt();
    let theta = TAU * rng.gen::<f64>();
    (r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::DeterministicRng;

    #[test]
    fn test_sample_disc_stays_inside() {
        let mut rng = DeterministicRng::new(3);
        for _ in 0..10_000 {
            let (x, y) = sample_disc(&mut rng, 2.5);
            assert!(x * x + y * y <= 2.5 * 2.5 + 1e-9);
        }
    }

    #[test]
    fn test_sample_disc_covers_all_quadrants() {
        let mut rng = DeterministicRng::new(11);
        let mut quadrants = [false; 4];
        for _ in 0..1000 {
            let (x, y) = sample_disc(&mut rng, 1.0);
            let q = match (x >= 0.0, y >= 0.0) {
                (true, true) => 0,
                (false, true) => 1,
                (false, false) => 2,
                (true, false) => 3,
            };
            quadrants[q] = true;
        }
        assert_eq!(quadrants, [true; 4]);
    }

    #[test]
    fn test_rounding_modes() {
        assert_eq!(OffsetRounding::Truncate.apply(0.9), 0);
        assert_eq!(OffsetRounding::Truncate.apply(-0.9), 0);
        assert_eq!(OffsetRounding::Truncate.apply(-1.5), -1);
        assert_eq!(OffsetRounding::Nearest.apply(0.9), 1);
        assert_eq!(OffsetRounding::Nearest.apply(-0.9), -1);
        assert_eq!(OffsetRounding::Nearest.apply(0.4), 0);
    }
}
