//! Filter parameter resolution and the `params` command.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use texmaps_filters::FilterParameters;

/// Per-field overrides taken from command-line flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamOverrides {
    pub normal_strength: Option<f64>,
    pub height_strength: Option<f64>,
    pub ao_radius: Option<f64>,
    pub ao_bias: Option<f64>,
    pub ao_samples: Option<u32>,
    pub seed: Option<u32>,
}

impl ParamOverrides {
    /// Overwrite every field that was given on the command line.
    pub fn apply(&self, params: &mut FilterParameters) {
        if let Some(v) = self.normal_strength {
            params.normal_strength = v;
        }
        if let Some(v) = self.height_strength {
            params.height_strength = v;
        }
        if let Some(v) = self.ao_radius {
            params.ao_sample_radius = v;
        }
        if let Some(v) = self.ao_bias {
            params.ao_bias = v;
        }
        if let Some(v) = self.ao_samples {
            params.ao_sample_count = v;
        }
        if let Some(v) = self.seed {
            params.seed = v;
        }
    }
}

/// Read a JSON parameter file. Missing fields take their defaults.
pub fn load_params_file(path: &Path) -> Result<FilterParameters> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read params file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse params file: {}", path.display()))
}

/// Defaults, then the optional file, then flag overrides.
///
/// Values are not range-checked here; the filters report their own
/// problems so that one bad setting does not cost the other maps.
pub fn resolve_params(
    params_path: Option<&Path>,
    overrides: &ParamOverrides,
) -> Result<FilterParameters> {
    let mut params = match params_path {
        Some(path) => load_params_file(path)?,
        None => FilterParameters::default(),
    };
    overrides.apply(&mut params);
    Ok(params)
}

/// Run the params command.
///
/// Prints the default parameters, or with `check` the resolved contents of
/// a file along with any range problems.
///
/// # Returns
/// Exit code: 0 success, 1 invalid file
pub fn run(check: Option<&str>, compact: bool) -> Result<ExitCode> {
    let params = match check {
        Some(path) => load_params_file(Path::new(path))?,
        None => FilterParameters::default(),
    };

    let json = if compact {
        serde_json::to_string(&params)?
    } else {
        serde_json::to_string_pretty(&params)?
    };

    if let Some(path) = check {
        if let Err(e) = params.validate() {
            eprintln!("{} {}", "Invalid params:".red().bold(), path);
            eprintln!("  {} {}", "✗".red(), e);
            return Ok(ExitCode::from(1));
        }
        eprintln!("{} {}", "Params OK:".green().bold(), path);
    }

    println!("{}", json);
    Ok(ExitCode::SUCCESS)
}
