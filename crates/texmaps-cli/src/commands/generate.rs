//! Generate command implementation
//!
//! Loads a source image (file, data URI, or URL), derives its normal,
//! height, and AO maps, and writes them next to the source.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use texmaps_filters::{
    generate, save_map, GeneratedMapSet, MapKind, MapOutcome, PngConfig, PngError, SavedMap,
};

use super::json_output::{error_codes, GenerateOutput, JsonError, OutputFile, SourceInfo};
use super::params::{resolve_params, ParamOverrides};
use crate::input::{describe_input, load_source, LoadedSource};

/// Options for one generate run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions<'a> {
    /// File path, `http(s)` URL, or `data:image/...` payload
    pub input: &'a str,
    /// Directory for the generated maps
    pub out_dir: Option<&'a str>,
    /// File name a data URI or download is saved under
    pub file_name: Option<&'a str>,
    /// JSON params file
    pub params_path: Option<&'a str>,
    /// Flag overrides applied on top of the params file
    pub overrides: ParamOverrides,
}

/// Run the generate command
///
/// # Returns
/// Exit code: 0 success, 1 input, params, or write error, 2 at least one map failed
pub fn run(options: &GenerateOptions<'_>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(options)
    } else {
        run_human(options)
    }
}

/// Run generate with human-readable (colored) output
fn run_human(options: &GenerateOptions<'_>) -> Result<ExitCode> {
    let start = Instant::now();

    println!("{} {}", "Generating from:".cyan().bold(), describe_input(options.input));

    let params = resolve_params(options.params_path.map(Path::new), &options.overrides)?;
    if let Some(path) = options.params_path {
        println!("{} {}", "Params:".dimmed(), path);
    }

    let source = load_source(
        options.input,
        options.out_dir.map(Path::new),
        options.file_name,
    )?;
    println!(
        "{} {} ({}x{}, {})",
        "Source:".dimmed(),
        source.path.display(),
        source.grid.width(),
        source.grid.height(),
        source.kind.as_str()
    );
    println!("{} {}", "Output dir:".cyan().bold(), source.out_dir.display());

    let maps = generate(&source.grid, &params).context("Map generation failed")?;

    for (kind, outcome) in maps.iter() {
        match outcome {
            MapOutcome::Skipped => {
                println!("  {} {} {}", "-".dimmed(), kind, "skipped".dimmed());
            }
            MapOutcome::Failed(e) => {
                println!("  {} {}: {}", "✗".red(), kind, e);
            }
            MapOutcome::Generated(_) => {}
        }
    }

    let (saved, write_errors) = save_maps(&maps, &source);
    for map in &saved {
        println!(
            "  {} {} {} {}",
            "✓".green(),
            map.kind,
            "→".dimmed(),
            map.path.display()
        );
    }
    for (kind, e) in &write_errors {
        println!("  {} {}: {}", "✗".red(), kind, e);
    }

    let duration_ms = start.elapsed().as_millis();
    if !write_errors.is_empty() {
        println!(
            "\n{} {} map(s) could not be written, {} written ({}ms)",
            "Failed:".red().bold(),
            write_errors.len(),
            saved.len(),
            duration_ms
        );
        Ok(ExitCode::from(1))
    } else if maps.has_failures() {
        println!(
            "\n{} {} of 3 maps written ({}ms)",
            "Partial:".yellow().bold(),
            saved.len(),
            duration_ms
        );
        Ok(ExitCode::from(2))
    } else {
        println!(
            "\n{} {} map(s) written ({}ms)",
            "Success!".green().bold(),
            saved.len(),
            duration_ms
        );
        Ok(ExitCode::SUCCESS)
    }
}

/// Run generate with machine-readable JSON output
fn run_json(options: &GenerateOptions<'_>) -> Result<ExitCode> {
    let (output, code) = build_json_output(options);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}

/// Build the JSON report and its exit code.
pub fn build_json_output(options: &GenerateOptions<'_>) -> (GenerateOutput, ExitCode) {
    let params = match resolve_params(options.params_path.map(Path::new), &options.overrides) {
        Ok(params) => params,
        Err(e) => {
            let error = JsonError::new(error_codes::PARAMS, format!("{:#}", e));
            return (GenerateOutput::failure(error), ExitCode::from(1));
        }
    };

    let source = match load_source(
        options.input,
        options.out_dir.map(Path::new),
        options.file_name,
    ) {
        Ok(source) => source,
        Err(e) => {
            let error = JsonError::new(error_codes::INPUT, format!("{:#}", e));
            return (GenerateOutput::failure(error), ExitCode::from(1));
        }
    };

    let source_info = SourceInfo {
        kind: source.kind.as_str().to_string(),
        path: source.path.to_string_lossy().to_string(),
        width: source.grid.width(),
        height: source.grid.height(),
    };

    let maps = match generate(&source.grid, &params) {
        Ok(maps) => maps,
        Err(e) => {
            let mut output = GenerateOutput::failure(JsonError::new(e.code(), e.to_string()));
            output.source = Some(source_info);
            return (output, ExitCode::from(1));
        }
    };

    let mut output = GenerateOutput {
        success: false,
        source: Some(source_info),
        ..GenerateOutput::default()
    };

    for (kind, outcome) in maps.iter() {
        match outcome {
            MapOutcome::Skipped => output.skipped.push(kind.as_str().to_string()),
            MapOutcome::Failed(e) => output
                .errors
                .push(JsonError::new(e.code(), e.to_string()).with_map(kind.as_str())),
            MapOutcome::Generated(_) => {}
        }
    }

    let (saved, write_errors) = save_maps(&maps, &source);
    output.outputs = saved.iter().map(output_file).collect();
    if !write_errors.is_empty() {
        for (kind, e) in write_errors {
            output
                .errors
                .push(JsonError::new(error_codes::OUTPUT, e.to_string()).with_map(kind.as_str()));
        }
        return (output, ExitCode::from(1));
    }

    output.success = output.errors.is_empty();
    let code = if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    };
    (output, code)
}

/// Write each generated map on its own, so one failed write does not hide
/// the files that did land on disk.
fn save_maps(
    maps: &GeneratedMapSet,
    source: &LoadedSource,
) -> (Vec<SavedMap>, Vec<(MapKind, PngError)>) {
    let config = PngConfig::default();
    let mut saved = Vec::new();
    let mut errors = Vec::new();
    for (kind, grid) in maps.generated() {
        match save_map(kind, grid, &source.out_dir, &source.name, &config) {
            Ok(map) => saved.push(map),
            Err(e) => errors.push((kind, e)),
        }
    }
    (saved, errors)
}

fn output_file(map: &SavedMap) -> OutputFile {
    OutputFile {
        map: map.kind.as_str().to_string(),
        path: map.path.to_string_lossy().to_string(),
        hash: map.hash.clone(),
    }
}
