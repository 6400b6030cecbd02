//! Row-major pixel grid with edge-clamped reads.

use crate::color::Color;
use crate::error::MapError;

/// A 2D grid of RGBA samples.
///
/// Reads through [`PixelGrid::sample`] never fail: coordinates outside the
/// grid snap to the nearest edge pixel. Writes are bounds-checked.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    samples: Vec<Color>,
}

impl PixelGrid {
    /// Create a grid filled with a single color.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            samples: vec![fill; size],
        }
    }

    /// Create a grid from row-major samples.
    pub fn from_samples(width: u32, height: u32, samples: Vec<Color>) -> Result<Self, MapError> {
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(MapError::InvalidInput(format!(
                "expected {} samples for {}x{}, got {}",
                expected,
                width,
                height,
                samples.len()
            )));
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Create a grid from tightly packed 8-bit RGBA bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, MapError> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(MapError::InvalidInput(format!(
                "expected {} RGBA bytes for {}x{}, got {}",
                expected,
                width,
                height,
                bytes.len()
            )));
        }
        let samples = bytes
            .chunks_exact(4)
            .map(|px| Color::from_rgba8([px[0], px[1], px[2], px[3]]))
            .collect();
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Row-major sample data.
    pub fn samples(&self) -> &[Color] {
        &self.samples
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get a pixel if the coordinates are inside the grid.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.samples[self.index(x, y)])
        } else {
            None
        }
    }

    /// Read a pixel, clamping the coordinates to the nearest edge.
    ///
    /// An empty grid has no edge to clamp to and yields transparent black.
    #[inline]
    pub fn sample(&self, x: i64, y: i64) -> Color {
        if self.is_empty() {
            return Color::transparent();
        }
        let cx = x.clamp(0, self.width as i64 - 1) as u32;
        let cy = y.clamp(0, self.height as i64 - 1) as u32;
        self.samples[self.index(cx, cy)]
    }

    /// Store a pixel. Out-of-range coordinates are a caller bug and are
    /// reported rather than clamped.
    #[inline]
    pub fn write(&mut self, x: u32, y: u32, color: Color) -> Result<(), MapError> {
        if x >= self.width || y >= self.height {
            return Err(MapError::OutOfRangeWrite {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = self.index(x, y);
        self.samples[idx] = color;
        Ok(())
    }

    /// Convert to 8-bit RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.samples.len() * 4);
        for color in &self.samples {
            bytes.extend_from_slice(&color.to_rgba8());
        }
        bytes
    }
}
