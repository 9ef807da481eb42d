//! Route response normalizer CLI
//!
//! Normalizes saved route service responses and translates maneuver codes.

#![allow(clippy::print_stdout)]

mod config;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use domain::RouteResponse;
use integration_route::{
    ApiFamily, InstructionTranslator, MessageKey, Messages, OutputFormat, RouteOutput,
    RoutePayload, RouteResponseFactory, RouteResponseRequest, RouteServiceError,
};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::CliConfig;

/// Code argument meaning "no maneuver code"
const NO_CODE: &str = "-";

/// Route response normalizer CLI
#[derive(Parser)]
#[command(name = "route-cli")]
#[command(author, version, about = "Route service response normalizer", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: route-cli.toml when present)
    #[arg(short, long, env = "ROUTE_CLI_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a saved service response and print it as JSON
    ///
    /// Example: route-cli normalize response.xml --format xml --api ols
    Normalize {
        /// File holding the service response
        file: PathBuf,

        /// Response format: xml or json (default from configuration)
        #[arg(short, long)]
        format: Option<String>,

        /// API family: rest or ols (default from configuration)
        #[arg(short, long)]
        api: Option<String>,

        /// Print the response untouched instead of normalizing it
        #[arg(long)]
        raw: bool,
    },

    /// Translate a maneuver code into an instruction
    ///
    /// Use "-" as code for a step without maneuver code.
    /// Example: route-cli translate BL "Rue de Rivoli"
    Translate {
        /// Maneuver code (F, B, L, R, BL, BR, FL, FR, round_about_entry, ...)
        code: String,

        /// Road name
        #[arg(default_value = "")]
        name: String,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Pick the log filter: `-v` wins, then configuration, then `warn`
fn log_filter(verbose: u8, configured: Option<&str>) -> &str {
    match (verbose, configured) {
        (0, Some(filter)) => filter,
        _ => log_filter_from_verbosity(verbose),
    }
}

fn parse_format(value: &str, messages: &Messages) -> Result<OutputFormat, RouteServiceError> {
    value.parse().map_err(|e: String| {
        debug!(error = %e, "Rejected output format");
        RouteServiceError::UnsupportedFormat(
            messages.get(MessageKey::ServiceResponseFormat, &[value, "xml, json"]),
        )
    })
}

fn parse_api(value: &str, messages: &Messages) -> Result<ApiFamily, RouteServiceError> {
    value.parse().map_err(|e: String| {
        debug!(error = %e, "Rejected API family");
        RouteServiceError::UnsupportedFormat(
            messages.get(MessageKey::ServiceResponseFormat, &[value, "REST, OLS"]),
        )
    })
}

fn normalize(
    config: &CliConfig,
    file: &Path,
    format: Option<&str>,
    api: Option<&str>,
    raw: bool,
) -> anyhow::Result<String> {
    let messages = Messages::new(config.route.locale);
    let format = format
        .map(|value| parse_format(value, &messages))
        .transpose()?
        .unwrap_or(config.route.default_output_format);
    let api = api
        .map(|value| parse_api(value, &messages))
        .transpose()?
        .unwrap_or(config.route.default_api);

    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let mut request = RouteResponseRequest::new(text, format).with_api(api);
    if raw {
        request = request.raw();
    }

    let factory = RouteResponseFactory::new(&config.route);
    let output = factory.build(request).map_err(|e| {
        let kind = e.kind();
        anyhow::Error::new(e).context(format!("Route normalization failed ({kind})"))
    })?;

    render(output)
}

fn render(output: RouteOutput) -> anyhow::Result<String> {
    match output {
        RouteOutput::Route(route) => render_route(&route),
        RouteOutput::Raw(RoutePayload::Text(text)) => Ok(text),
        RouteOutput::Raw(RoutePayload::Json(value)) => Ok(serde_json::to_string_pretty(&value)?),
        RouteOutput::Raw(RoutePayload::Document(document)) => Ok(format!("{document:?}")),
    }
}

fn render_route(route: &RouteResponse) -> anyhow::Result<String> {
    info!(summary = %route, "Route normalized");
    Ok(serde_json::to_string_pretty(route)?)
}

fn translate(config: &CliConfig, code: &str, name: &str) -> String {
    let code = (code != NO_CODE).then_some(code);
    InstructionTranslator::from_config(&config.route).translate(code, name)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config
        .route
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid configuration")?;

    let filter = log_filter(cli.verbose, config.log_filter.as_deref());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Normalize {
            file,
            format,
            api,
            raw,
        } => {
            let rendered = normalize(&config, &file, format.as_deref(), api.as_deref(), raw)?;
            println!("{rendered}");
        },

        Commands::Translate { code, name } => {
            println!("{}", translate(&config, &code, &name));
        },
    }

    Ok(())
}
