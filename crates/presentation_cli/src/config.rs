//! CLI configuration
//!
//! Read from an optional `route-cli.toml` (or the file given with
//! `--config`), then overridden by `ROUTE_CLI_*` environment variables.
//! Nested keys use a double underscore: `ROUTE_CLI_ROUTE__LOCALE=fr`.

use std::path::Path;

use integration_route::RouteResponseConfig;
use serde::{Deserialize, Serialize};

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "route-cli";

const ENV_PREFIX: &str = "ROUTE_CLI";

/// Configuration for `route-cli`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Log filter used when no `-v` flag is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,

    /// Route normalization settings
    #[serde(default)]
    pub route: RouteResponseConfig,
}

impl CliConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
