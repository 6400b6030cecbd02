//! Filter configuration.

use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// Settings for a single `generate` call.
///
/// Missing fields fall back to their defaults when deserialized, so a JSON
/// file only needs the values it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterParameters {
    /// Normal map gradient multiplier. Zero skips the normal map.
    pub normal_strength: f64,
    /// Height map luminance multiplier. Zero skips the height map.
    pub height_strength: f64,
    /// AO sampling disc radius in pixels.
    pub ao_sample_radius: f64,
    /// Offset added to the averaged AO luminance. Zero skips the AO map.
    pub ao_bias: f64,
    /// Random samples taken per AO pixel.
    pub ao_sample_count: u32,
    /// Seed for the AO random stream.
    pub seed: u32,
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self {
            normal_strength: 1.0,
            height_strength: 1.0,
            ao_sample_radius: 1.0,
            ao_bias: 0.5,
            ao_sample_count: 64,
            seed: 0,
        }
    }
}

impl FilterParameters {
    /// Check every field, reporting all problems at once.
    pub fn validate(&self) -> Result<(), MapError> {
        let mut problems = Vec::new();

        for (name, value) in [
            ("normal_strength", self.normal_strength),
            ("height_strength", self.height_strength),
        ] {
            if !value.is_finite() || value < 0.0 {
                problems.push(format!("{} must be finite and >= 0, got {}", name, value));
            }
        }
        if !self.ao_sample_radius.is_finite() || self.ao_sample_radius <= 0.0 {
            problems.push(format!(
                "ao_sample_radius must be finite and > 0, got {}",
                self.ao_sample_radius
            ));
        }
        if !self.ao_bias.is_finite() {
            problems.push(format!("ao_bias must be finite, got {}", self.ao_bias));
        }
        if self.ao_sample_count == 0 {
            problems.push("ao_sample_count must be at least 1".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(MapError::InvalidParameter(problems.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_valid() {
        assert!(FilterParameters::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let params: FilterParameters =
            serde_json::from_str(r#"{ "ao_bias": -0.25, "seed": 9 }"#).unwrap();
        assert_eq!(
            params,
            FilterParameters {
                ao_bias: -0.25,
                seed: 9,
                ..FilterParameters::default()
            }
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = serde_json::from_str::<FilterParameters>(r#"{ "strength": 1.0 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_reports_every_field() {
        let params = FilterParameters {
            normal_strength: -1.0,
            height_strength: f64::NAN,
            ao_sample_radius: 0.0,
            ao_bias: f64::INFINITY,
            ao_sample_count: 0,
            seed: 0,
        };
        let message = params.validate().unwrap_err().to_string();
        for field in [
            "normal_strength",
            "height_strength",
            "ao_sample_radius",
            "ao_bias",
            "ao_sample_count",
        ] {
            assert!(message.contains(field), "missing {} in {}", field, message);
        }
    }

    #[test]
    fn test_negative_bias_is_allowed() {
        let params = FilterParameters {
            ao_bias: -0.75,
            ..FilterParameters::default()
        };
        assert!(params.validate().is_ok());
    }
}
