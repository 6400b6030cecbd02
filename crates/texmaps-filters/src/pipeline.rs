//! Main entry point for map generation.
//!
//! Runs the normal, height, and AO filters over one source grid. The filters
//! share nothing but the read-only source, so one failing never affects the
//! others.

use rand::Rng;

use crate::error::MapError;
use crate::filters::{AoFilter, HeightFilter, MapKind, NormalFilter};
use crate::grid::PixelGrid;
use crate::params::FilterParameters;
use crate::rng::DeterministicRng;

/// What happened to one requested map.
#[derive(Debug, Clone, PartialEq)]
pub enum MapOutcome {
    /// The filter ran and produced a grid.
    Generated(PixelGrid),
    /// The filter's strength or bias was zero.
    Skipped,
    /// The filter stopped with an error.
    Failed(MapError),
}

impl MapOutcome {
    fn from_result(result: Result<Option<PixelGrid>, MapError>) -> Self {
        match result {
            Ok(Some(grid)) => MapOutcome::Generated(grid),
            Ok(None) => MapOutcome::Skipped,
            Err(err) => MapOutcome::Failed(err),
        }
    }

    /// The generated grid, if any.
    pub fn grid(&self) -> Option<&PixelGrid> {
        match self {
            MapOutcome::Generated(grid) => Some(grid),
            _ => None,
        }
    }

    /// The failure, if any.
    pub fn error(&self) -> Option<&MapError> {
        match self {
            MapOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, MapOutcome::Skipped)
    }
}

/// Per-map outcomes of one `generate` call.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMapSet {
    pub normal: MapOutcome,
    pub height: MapOutcome,
    pub ao: MapOutcome,
}

impl GeneratedMapSet {
    /// Outcome for one map kind.
    pub fn get(&self, kind: MapKind) -> &MapOutcome {
        match kind {
            MapKind::Normal => &self.normal,
            MapKind::Height => &self.height,
            MapKind::Ao => &self.ao,
        }
    }

    /// All outcomes in generation order.
    pub fn iter(&self) -> impl Iterator<Item = (MapKind, &MapOutcome)> {
        MapKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// Only the maps that were produced.
    pub fn generated(&self) -> impl Iterator<Item = (MapKind, &PixelGrid)> {
        self.iter()
            .filter_map(|(kind, outcome)| outcome.grid().map(|grid| (kind, grid)))
    }

    /// Only the maps that failed.
    pub fn failures(&self) -> impl Iterator<Item = (MapKind, &MapError)> {
        self.iter()
            .filter_map(|(kind, outcome)| outcome.error().map(|err| (kind, err)))
    }

    pub fn generated_count(&self) -> usize {
        self.generated().count()
    }

    /// True when all three maps were produced.
    pub fn is_complete(&self) -> bool {
        self.generated_count() == MapKind::ALL.len()
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Generate the normal, height, and AO maps for `source`.
///
/// The AO stream is seeded from `params.seed`, so identical inputs always
/// give identical maps.
pub fn generate(
    source: &PixelGrid,
    params: &FilterParameters,
) -> Result<GeneratedMapSet, MapError> {
    let ao_seed = DeterministicRng::derive_variant_seed(params.seed, MapKind::Ao.as_str());
    let mut rng = DeterministicRng::new(ao_seed);
    generate_with_rng(source, params, &mut rng)
}

/// Like [`generate`], but AO sample positions come from `rng`.
pub fn generate_with_rng<R: Rng + ?Sized>(
    source: &PixelGrid,
    params: &FilterParameters,
    rng: &mut R,
) -> Result<GeneratedMapSet, MapError> {
    if source.is_empty() {
        return Err(MapError::InvalidInput(format!(
            "source must be at least 1x1, got {}x{}",
            source.width(),
            source.height()
        )));
    }

    let normal = NormalFilter::new()
        .with_strength(params.normal_strength)
        .apply(source);

    let height = HeightFilter::new()
        .with_strength(params.height_strength)
        .apply(source);

    let ao = AoFilter::new()
        .with_radius(params.ao_sample_radius)
        .with_bias(params.ao_bias)
        .with_samples(params.ao_sample_count)
        .apply(source, rng);

    Ok(GeneratedMapSet {
        normal: MapOutcome::from_result(normal),
        height: MapOutcome::from_result(height),
        ao: MapOutcome::from_result(ao),
    })
}
