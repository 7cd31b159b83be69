pub mod defaults;

mod cache_config;
mod observability_config;
mod pipeline_config;
mod privacy_config;
mod retrieval_config;
mod routing_config;
mod validation_config;

pub use cache_config::CacheConfig;
pub use observability_config::ObservabilityConfig;
pub use pipeline_config::PipelineConfig;
pub use privacy_config::PrivacyConfig;
pub use retrieval_config::RetrievalConfig;
pub use routing_config::RoutingConfig;
pub use validation_config::ValidationConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Complete Beacon configuration. Every section falls back to its defaults,
/// so an empty TOML document is a valid config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BeaconConfig {
    pub retrieval: RetrievalConfig,
    pub routing: RoutingConfig,
    pub validation: ValidationConfig,
    pub cache: CacheConfig,
    pub pipeline: PipelineConfig,
    pub privacy: PrivacyConfig,
    pub observability: ObservabilityConfig,
}

impl BeaconConfig {
    /// Parse a TOML string and validate the result.
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&raw)
    }

    /// Check cross-field invariants that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.retrieval.validate()?;

        let unit_fields = [
            ("routing.risk_threshold", self.routing.risk_threshold),
            ("routing.complexity_high", self.routing.complexity_high),
            ("routing.complexity_medium", self.routing.complexity_medium),
            ("routing.min_coverage", self.routing.min_coverage),
            ("routing.min_evidence", self.routing.min_evidence),
            ("validation.grounding_threshold", self.validation.grounding_threshold),
            (
                "validation.max_invalid_citation_ratio",
                self.validation.max_invalid_citation_ratio,
            ),
            ("cache.semantic_threshold", self.cache.semantic_threshold),
            ("cache.min_grounding_for_write", self.cache.min_grounding_for_write),
        ];
        for (field, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, format!("{value} is outside [0, 1]")));
            }
        }

        if self.routing.complexity_medium > self.routing.complexity_high {
            return Err(invalid(
                "routing.complexity_medium",
                "must not exceed routing.complexity_high",
            ));
        }
        if self.validation.max_ngram == 0 {
            return Err(invalid("validation.max_ngram", "must be positive"));
        }

        let p = &self.pipeline;
        if p.request_deadline_ms == 0
            || p.generation_timeout_l1_ms == 0
            || p.generation_timeout_l2_ms == 0
            || p.generation_timeout_l3_ms == 0
        {
            return Err(invalid("pipeline", "deadlines must be positive"));
        }
        // A tier timeout shorter than the downgrade floor could never qualify
        // for a downgrade.
        let floor = self.routing.downgrade_min_elapsed_ms;
        for (field, value) in [
            ("pipeline.generation_timeout_l2_ms", p.generation_timeout_l2_ms),
            ("pipeline.generation_timeout_l3_ms", p.generation_timeout_l3_ms),
        ] {
            if value < floor {
                return Err(invalid(
                    field,
                    format!("{value} is below routing.downgrade_min_elapsed_ms ({floor})"),
                ));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.into(),
    }
}
