//! End-to-end tests for the generation pipeline and map output.
//!
//! These exercise the public API the way a caller would: build a source
//! grid, call `generate`, inspect the outcomes, and save them.

use pretty_assertions::assert_eq;
use texmaps_filters::{
    generate, generate_with_rng, map_file_name, png, save_map_set, Color, DeterministicRng,
    FilterParameters, MapKind, MapOutcome, PixelGrid, PngConfig,
};

fn checker(width: u32, height: u32) -> PixelGrid {
    let samples = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                if (x / 2 + y / 2) % 2 == 0 {
                    Color::rgb(0.9, 0.8, 0.7)
                } else {
                    Color::rgb(0.1, 0.2, 0.3)
                }
            })
        })
        .collect();
    PixelGrid::from_samples(width, height, samples).unwrap()
}

fn near(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ============================================================================
// Shape
// ============================================================================

#[test]
fn test_outputs_match_source_dimensions() {
    let params = FilterParameters {
        ao_sample_radius: 3.0,
        ao_sample_count: 8,
        ..FilterParameters::default()
    };
    for (w, h) in [(1, 1), (1, 7), (9, 1), (2, 2), (13, 5), (32, 32)] {
        let set = generate(&checker(w, h), &params).unwrap();
        assert!(set.is_complete(), "{}x{} should produce all maps", w, h);
        for (kind, grid) in set.generated() {
            assert_eq!(grid.dimensions(), (w, h), "{} map for {}x{}", kind, w, h);
        }
    }
}

// ============================================================================
// Golden fixture
// ============================================================================

#[test]
fn test_golden_quad_through_pipeline() {
    let source = PixelGrid::from_samples(
        2,
        2,
        vec![
            Color::rgb(1.0, 0.0, 0.0),
            Color::rgb(0.0, 1.0, 0.0),
            Color::rgb(0.0, 0.0, 1.0),
            Color::rgb(1.0, 1.0, 1.0),
        ],
    )
    .unwrap();
    let set = generate(&source, &FilterParameters::default()).unwrap();

    let normal = set.normal.grid().unwrap();
    let expected_normals = [
        (0, 0, 1.0 / 6.0, 1.0 / 6.0),
        (1, 0, 1.0 / 6.0, 5.0 / 6.0),
        (0, 1, 5.0 / 6.0, 1.0 / 6.0),
        (1, 1, 5.0 / 6.0, 5.0 / 6.0),
    ];
    for (x, y, r, g) in expected_normals {
        let c = normal.get(x, y).unwrap();
        assert!(near(c.r, r) && near(c.g, g), "normal ({}, {}) = {:?}", x, y, c);
        assert!(near(c.b, 2.0 / 3.0));
        assert_eq!(c.a, 1.0);
    }

    let height = set.height.grid().unwrap();
    let expected_heights = [(0, 0, 0.299), (1, 0, 0.587), (0, 1, 0.114), (1, 1, 1.0)];
    for (x, y, v) in expected_heights {
        let c = height.get(x, y).unwrap();
        assert!(near(c.r, v) && near(c.g, v) && near(c.b, v), "height ({}, {}) = {:?}", x, y, c);
        assert_eq!(c.a, 1.0);
    }
}

// ============================================================================
// Skip semantics
// ============================================================================

#[test]
fn test_zero_strengths_skip_individual_maps() {
    let source = checker(4, 4);

    let set = generate(
        &source,
        &FilterParameters {
            normal_strength: 0.0,
            ..FilterParameters::default()
        },
    )
    .unwrap();
    assert_eq!(set.normal, MapOutcome::Skipped);
    assert_eq!(set.generated_count(), 2);

    let set = generate(
        &source,
        &FilterParameters {
            height_strength: 0.0,
            ..FilterParameters::default()
        },
    )
    .unwrap();
    assert_eq!(set.height, MapOutcome::Skipped);
    assert_eq!(set.generated_count(), 2);

    let set = generate(
        &source,
        &FilterParameters {
            ao_bias: 0.0,
            ..FilterParameters::default()
        },
    )
    .unwrap();
    assert_eq!(set.ao, MapOutcome::Skipped);
    assert_eq!(set.generated_count(), 2);
    assert!(!set.has_failures());
}

// ============================================================================
// AO
// ============================================================================

#[test]
fn test_ao_converges_with_injected_seed() {
    let gray = Color::gray(0.5);
    let source = PixelGrid::new(6, 6, gray);
    let params = FilterParameters {
        ao_sample_radius: 1.0,
        ao_bias: 0.5,
        ao_sample_count: 1000,
        ..FilterParameters::default()
    };
    let mut rng = DeterministicRng::new(2024);
    let set = generate_with_rng(&source, &params, &mut rng).unwrap();

    let expected = (gray.luminance() + 0.5).clamp(0.0, 1.0);
    for c in set.ao.grid().unwrap().samples() {
        assert!((c.r - expected).abs() < 1e-3, "got {}", c.r);
    }
}

#[test]
fn test_generate_is_deterministic_per_seed() {
    let source = checker(16, 16);
    let params = FilterParameters {
        ao_sample_radius: 4.0,
        ao_sample_count: 12,
        seed: 7,
        ..FilterParameters::default()
    };

    let a = generate(&source, &params).unwrap();
    let b = generate(&source, &params).unwrap();
    assert_eq!(a, b);

    let c = generate(&source, &FilterParameters { seed: 8, ..params.clone() }).unwrap();
    assert_eq!(a.normal, c.normal);
    assert_eq!(a.height, c.height);
    assert!(a.ao != c.ao, "a different seed should change the AO samples");
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_save_map_set_writes_suffixed_pngs() {
    let tmp = tempfile::tempdir().unwrap();
    let out_dir = tmp.path().join("maps");
    let set = generate(&checker(8, 8), &FilterParameters::default()).unwrap();

    let saved = save_map_set(&set, &out_dir, "bricks.jpg", &PngConfig::default()).unwrap();

    let names: Vec<String> = saved
        .iter()
        .map(|s| s.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "bricks_NormalMap.png".to_string(),
            "bricks_HeightMap.png".to_string(),
            "bricks_AOMap.png".to_string(),
        ]
    );

    for entry in &saved {
        let bytes = std::fs::read(&entry.path).unwrap();
        assert_eq!(png::hash_png(&bytes), entry.hash);
        assert_eq!((entry.width, entry.height), (8, 8));
    }
}

#[test]
fn test_save_map_set_omits_skipped_maps() {
    let tmp = tempfile::tempdir().unwrap();
    let params = FilterParameters {
        ao_bias: 0.0,
        ..FilterParameters::default()
    };
    let set = generate(&checker(4, 4), &params).unwrap();

    let saved = save_map_set(&set, tmp.path(), "stone.png", &PngConfig::default()).unwrap();

    let kinds: Vec<MapKind> = saved.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![MapKind::Normal, MapKind::Height]);
    assert!(!tmp
        .path()
        .join(map_file_name("stone.png", MapKind::Ao))
        .exists());
}

#[test]
fn test_saved_height_map_clamps_overbright_values() {
    let tmp = tempfile::tempdir().unwrap();
    let params = FilterParameters {
        height_strength: 4.0,
        normal_strength: 0.0,
        ao_bias: 0.0,
        ..FilterParameters::default()
    };
    let set = generate(&PixelGrid::new(2, 2, Color::gray(0.5)), &params).unwrap();
    let saved = save_map_set(&set, tmp.path(), "hot.png", &PngConfig::fast()).unwrap();
    assert_eq!(saved.len(), 1);

    let file = std::fs::File::open(&saved[0].path).unwrap();
    let decoder = ::png::Decoder::new(std::io::BufReader::new(file));
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    assert!(buf[..info.buffer_size()].iter().all(|&b| b == 255));
}
