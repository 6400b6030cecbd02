//! texmaps CLI library.
//!
//! Source loading, parameter resolution, and the command implementations
//! behind the `texmaps` binary. The map derivation itself lives in
//! `texmaps-filters`.

pub mod commands;
pub mod input;

#[cfg(test)]
mod test_support;
