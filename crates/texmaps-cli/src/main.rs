//! texmaps CLI - derive normal, height, and AO maps from an albedo image.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use texmaps_cli::commands;
use texmaps_cli::commands::generate::GenerateOptions;
use texmaps_cli::commands::params::ParamOverrides;

/// texmaps - Auxiliary texture map generator
#[derive(Parser)]
#[command(name = "texmaps")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate normal, height, and AO maps from an image
    Generate {
        /// Image file path, http(s) URL, or `data:image/...;base64,` payload
        #[arg(short, long)]
        input: String,

        /// Output directory (default: next to the source image)
        #[arg(short, long)]
        out_dir: Option<String>,

        /// File name for a decoded data URI or download (default: DownloadedImage.png)
        #[arg(long)]
        file_name: Option<String>,

        /// JSON file with filter parameters
        #[arg(short, long)]
        params: Option<String>,

        /// Normal map strength (0 skips the normal map)
        #[arg(long)]
        normal_strength: Option<f64>,

        /// Height map strength (0 skips the height map)
        #[arg(long)]
        height_strength: Option<f64>,

        /// AO sampling radius in pixels
        #[arg(long)]
        ao_radius: Option<f64>,

        /// AO bias (0 skips the AO map)
        #[arg(long, allow_hyphen_values = true)]
        ao_bias: Option<f64>,

        /// AO samples per pixel
        #[arg(long)]
        ao_samples: Option<u32>,

        /// Seed for AO sampling
        #[arg(long)]
        seed: Option<u32>,

        /// Output machine-readable JSON report (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print default filter parameters, or check a params file
    Params {
        /// Params file to validate
        #[arg(long)]
        check: Option<String>,

        /// Print minified JSON
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            input,
            out_dir,
            file_name,
            params,
            normal_strength,
            height_strength,
            ao_radius,
            ao_bias,
            ao_samples,
            seed,
            json,
        } => {
            let options = GenerateOptions {
                input: &input,
                out_dir: out_dir.as_deref(),
                file_name: file_name.as_deref(),
                params_path: params.as_deref(),
                overrides: ParamOverrides {
                    normal_strength,
                    height_strength,
                    ao_radius,
                    ao_bias,
                    ao_samples,
                    seed,
                },
            };
            commands::generate::run(&options, json)
        }
        Commands::Params { check, compact } => commands::params::run(check.as_deref(), compact),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
