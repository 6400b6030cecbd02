//! Command implementations for the texmaps CLI.

pub mod generate;
pub mod json_output;
pub mod params;
