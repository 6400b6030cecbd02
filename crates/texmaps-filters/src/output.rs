//! File naming and saving for generated map sets.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::filters::MapKind;
use crate::grid::PixelGrid;
use crate::pipeline::GeneratedMapSet;
use crate::png::{self, PngConfig, PngError};

/// A map written to disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedMap {
    /// Which map this is.
    pub kind: MapKind,
    /// Where it was written.
    pub path: PathBuf,
    /// BLAKE3 hash of the PNG bytes.
    pub hash: String,
    pub width: u32,
    pub height: u32,
}

/// Output file name for a map derived from `source_name`.
///
/// The last extension is dropped and the map's suffix appended, so
/// `rock.jpg` becomes `rock_NormalMap.png`.
pub fn map_file_name(source_name: &str, kind: MapKind) -> String {
    let file_name = Path::new(source_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(source_name);
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    format!("{}{}.png", stem, kind.suffix())
}

/// Encode one map and write it to `output_dir`, creating the directory.
pub fn save_map(
    kind: MapKind,
    grid: &PixelGrid,
    output_dir: &Path,
    source_name: &str,
    config: &PngConfig,
) -> Result<SavedMap, PngError> {
    std::fs::create_dir_all(output_dir)?;

    let path = output_dir.join(map_file_name(source_name, kind));
    let hash = png::write_rgba(grid, &path, config)?;

    Ok(SavedMap {
        kind,
        path,
        hash,
        width: grid.width(),
        height: grid.height(),
    })
}

/// Encode and write every generated map in `set` to `output_dir`.
///
/// Skipped and failed maps are not written. Stops at the first map that
/// cannot be written; callers that need to know which maps already landed
/// on disk should call [`save_map`] per map instead.
pub fn save_map_set(
    set: &GeneratedMapSet,
    output_dir: &Path,
    source_name: &str,
    config: &PngConfig,
) -> Result<Vec<SavedMap>, PngError> {
    set.generated()
        .map(|(kind, grid)| save_map(kind, grid, output_dir, source_name, config))
        .collect()
}
