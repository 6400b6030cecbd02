//! JSON output types for `generate --json`.

use serde::{Deserialize, Serialize};

/// Error codes for CLI-level failures.
///
/// Filter failures carry the library's own `TEXMAPS_xxx` codes instead.
pub mod error_codes {
    /// Source could not be loaded or decoded
    pub const INPUT: &str = "CLI_001";
    /// Params file could not be read or parsed
    pub const PARAMS: &str = "CLI_002";
    /// Maps could not be encoded or written
    pub const OUTPUT: &str = "CLI_003";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Map the error belongs to, for filter failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            map: None,
        }
    }

    /// Attach the map this error belongs to.
    pub fn with_map(mut self, map: impl Into<String>) -> Self {
        self.map = Some(map.into());
        self
    }
}

/// The source a run was generated from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceInfo {
    /// `file`, `data_uri`, or `url`
    pub kind: String,
    pub path: String,
    pub width: u32,
    pub height: u32,
}

/// One written map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputFile {
    pub map: String,
    pub path: String,
    /// BLAKE3 hash of the PNG bytes
    pub hash: String,
}

/// Top-level report printed by `generate --json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateOutput {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceInfo>,
    pub outputs: Vec<OutputFile>,
    pub skipped: Vec<String>,
    pub errors: Vec<JsonError>,
}

impl GenerateOutput {
    /// A report for a run that never reached the filters.
    pub fn failure(error: JsonError) -> Self {
        Self {
            success: false,
            errors: vec![error],
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_serialization_omits_source() {
        let output = GenerateOutput::failure(JsonError::new(error_codes::INPUT, "bad input"));
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("source").is_none());
        assert_eq!(json["errors"][0]["code"], "CLI_001");
        assert!(json["errors"][0].get("map").is_none());
    }

    #[test]
    fn test_round_trip() {
        let output = GenerateOutput {
            success: true,
            source: Some(SourceInfo {
                kind: "file".into(),
                path: "rock.png".into(),
                width: 4,
                height: 4,
            }),
            outputs: vec![OutputFile {
                map: "normal".into(),
                path: "rock_NormalMap.png".into(),
                hash: "abc".into(),
            }],
            skipped: vec!["ao".into()],
            errors: vec![JsonError::new("TEXMAPS_003", "bad").with_map("height")],
        };
        let text = serde_json::to_string(&output).unwrap();
        let parsed: GenerateOutput = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, output);
    }
}
