//! Deterministic PNG writer.
//!
//! Uses fixed compression settings so the same grid always encodes to the
//! same bytes.

use std::io::Write;
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use thiserror::Error;

use crate::grid::PixelGrid;

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// PNG export configuration.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level.
    pub compression: Compression,
    /// Row filter.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

impl PngConfig {
    /// Fastest encode, larger files.
    pub fn fast() -> Self {
        Self {
            compression: Compression::Fast,
            filter: FilterType::NoFilter,
        }
    }
}

/// Write a grid to a PNG file as 8-bit RGBA and return the file's hash.
///
/// The image is fully encoded before the file is created, so an encoding
/// error never leaves a truncated file behind.
pub fn write_rgba(grid: &PixelGrid, path: &Path, config: &PngConfig) -> Result<String, PngError> {
    let (data, hash) = write_rgba_to_vec_with_hash(grid, config)?;
    std::fs::write(path, data)?;
    Ok(hash)
}

/// Write a grid to any writer as 8-bit RGBA.
pub fn write_rgba_to_writer<W: Write>(
    grid: &PixelGrid,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    if grid.is_empty() {
        return Err(PngError::InvalidDimensions(format!(
            "cannot encode a {}x{} image",
            grid.width(),
            grid.height()
        )));
    }

    let mut encoder = Encoder::new(writer, grid.width(), grid.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&grid.to_rgba8())?;

    Ok(())
}

/// Compute the BLAKE3 hash of PNG data.
pub fn hash_png(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Encode to a `Vec<u8>` and return it with its hash.
pub fn write_rgba_to_vec_with_hash(
    grid: &PixelGrid,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), PngError> {
    let mut data = Vec::new();
    write_rgba_to_writer(grid, &mut data, config)?;
    let hash = hash_png(&data);
    Ok((data, hash))
}
