//! Route response configuration

use serde::{Deserialize, Serialize};

use crate::messages::Locale;
use crate::request::{ApiFamily, OutputFormat};

/// Road name the itinerary service emits for unnamed roads
pub const UNNAMED_ROAD_SENTINEL: &str = "Valeur non renseignée";

/// Configuration for route response normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteResponseConfig {
    /// Language of error details and generated instructions
    #[serde(default)]
    pub locale: Locale,

    /// Road name meaning "no name provided"
    #[serde(default = "default_unnamed_road_sentinel")]
    pub unnamed_road_sentinel: String,

    /// Output format assumed when a caller does not name one
    #[serde(default)]
    pub default_output_format: OutputFormat,

    /// API family assumed when a caller does not name one
    #[serde(default)]
    pub default_api: ApiFamily,
}

fn default_unnamed_road_sentinel() -> String {
    UNNAMED_ROAD_SENTINEL.to_string()
}

impl Default for RouteResponseConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            unnamed_road_sentinel: default_unnamed_road_sentinel(),
            default_output_format: OutputFormat::default(),
            default_api: ApiFamily::default(),
        }
    }
}

impl RouteResponseConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            locale: Locale::En,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.unnamed_road_sentinel.trim().is_empty() {
            return Err("unnamed_road_sentinel must not be empty".to_string());
        }

        Ok(())
    }
}
