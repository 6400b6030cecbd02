//! Per-pixel filters that derive auxiliary maps from a source grid.
//!
//! Each filter reads an immutable source and returns a fresh grid of the
//! same size, or `None` when its configuration asks for it to be skipped.

mod ao;
mod height;
mod normal;


pub use ao::{AoFilter, OffsetRounding};
pub use height::HeightFilter;
pub use normal::NormalFilter;

use serde::Serialize;

/// The maps this crate can derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MapKind {
    Normal,
    Height,
    Ao,
}

impl MapKind {
    /// All kinds, in generation order.
    pub const ALL: [MapKind; 3] = [MapKind::Normal, MapKind::Height, MapKind::Ao];

    /// Returns the string representation for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            MapKind::Normal => "normal",
            MapKind::Height => "height",
            MapKind::Ao => "ao",
        }
    }

    /// File name suffix appended to the source's base name.
    pub fn suffix(&self) -> &'static str {
        match self {
            MapKind::Normal => "_NormalMap",
            MapKind::Height => "_HeightMap",
            MapKind::Ao => "_AOMap",
        }
    }
}

impl std::fmt::Display for MapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
