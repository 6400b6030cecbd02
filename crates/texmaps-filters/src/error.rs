//! Errors raised by grids, filters, and the generation pipeline.

use thiserror::Error;

/// Errors from map generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    /// The source grid cannot be processed at all (zero-sized, or its sample
    /// buffer does not match its dimensions).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A filter tried to write outside its output grid.
    #[error("Write out of range: ({x}, {y}) is outside a {width}x{height} grid")]
    OutOfRangeWrite {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// A filter parameter is outside its accepted range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl MapError {
    /// Stable error code for machine-readable reports.
    pub fn code(&self) -> &'static str {
        match self {
            MapError::InvalidInput(_) => "TEXMAPS_001",
            MapError::OutOfRangeWrite { .. } => "TEXMAPS_002",
            MapError::InvalidParameter(_) => "TEXMAPS_003",
        }
    }
}
