//! Texture map derivation from a single albedo image.
//!
//! Given a decoded color image as a [`PixelGrid`], this crate derives the
//! auxiliary maps a real-time renderer usually wants next to it:
//!
//! - **Normal map**: Sobel gradient of the red channel, encoded as a
//!   tangent-space normal in RGB.
//! - **Height map**: per-pixel luminance scaled by a strength.
//! - **AO map**: average luminance of random neighbors inside a disc, plus a
//!   bias, clamped to [0, 1].
//!
//! # Example
//!
//! ```
//! use texmaps_filters::{generate, Color, FilterParameters, PixelGrid};
//!
//! let source = PixelGrid::new(16, 16, Color::gray(0.5));
//! let maps = generate(&source, &FilterParameters::default()).unwrap();
//!
//! let normal = maps.normal.grid().unwrap();
//! assert_eq!(normal.dimensions(), (16, 16));
//! assert!(maps.is_complete());
//! ```
//!
//! # Determinism
//!
//! The AO filter is the only stochastic stage. [`generate`] seeds it from
//! [`FilterParameters::seed`] through a PCG32 stream, and PNG encoding uses
//! fixed settings, so the same source and parameters always produce
//! byte-identical files. [`generate_with_rng`] accepts any `rand::Rng`.

pub mod color;
pub mod error;
pub mod filters;
pub mod grid;
pub mod output;
pub mod params;
pub mod pipeline;
pub mod png;
pub mod rng;

// Re-export main types for convenience
pub use color::{luminance, Color};
pub use error::MapError;
pub use filters::{AoFilter, HeightFilter, MapKind, NormalFilter, OffsetRounding};
pub use grid::PixelGrid;
pub use output::{map_file_name, save_map, save_map_set, SavedMap};
pub use params::FilterParameters;
pub use pipeline::{generate, generate_with_rng, GeneratedMapSet, MapOutcome};
pub use png::{PngConfig, PngError};
pub use rng::DeterministicRng;
