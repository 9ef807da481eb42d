//! Integration tests for CLI
//!
//! These tests verify CLI functionality without running actual commands,
//! but instead test the command parsing and structure.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

// Mock CLI structure for testing (mirrors main.rs)
#[derive(Parser)]
#[command(name = "route-cli")]
#[command(author, version, about = "Route service response normalizer", long_about = None)]
struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    Normalize {
        file: PathBuf,
        #[arg(short, long)]
        format: Option<String>,
        #[arg(short, long)]
        api: Option<String>,
        #[arg(long)]
        raw: bool,
    },
    Translate {
        code: String,
        #[arg(default_value = "")]
        name: String,
    },
}

fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
    let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
    Cli::try_parse_from(os_args)
}

#[test]
fn cli_parses_normalize_command() {
    let cli = parse_args(&["route-cli", "normalize", "response.json"]).unwrap();
    if let Commands::Normalize {
        file,
        format,
        api,
        raw,
    } = cli.command
    {
        assert_eq!(file, PathBuf::from("response.json"));
        assert!(format.is_none());
        assert!(api.is_none());
        assert!(!raw);
    } else {
        panic!("Expected Normalize command");
    }
}

#[test]
fn cli_parses_normalize_with_options() {
    let cli = parse_args(&[
        "route-cli",
        "normalize",
        "response.xml",
        "--format",
        "xml",
        "--api",
        "ols",
        "--raw",
    ])
    .unwrap();
    if let Commands::Normalize {
        format, api, raw, ..
    } = cli.command
    {
        assert_eq!(format.as_deref(), Some("xml"));
        assert_eq!(api.as_deref(), Some("ols"));
        assert!(raw);
    } else {
        panic!("Expected Normalize command");
    }
}

#[test]
fn cli_parses_normalize_short_options() {
    let cli = parse_args(&["route-cli", "normalize", "r.xml", "-f", "xml", "-a", "rest"]).unwrap();
    if let Commands::Normalize { format, api, .. } = cli.command {
        assert_eq!(format.as_deref(), Some("xml"));
        assert_eq!(api.as_deref(), Some("rest"));
    } else {
        panic!("Expected Normalize command");
    }
}

#[test]
fn cli_parses_translate_command() {
    let cli = parse_args(&["route-cli", "translate", "BL", "Rue de Rivoli"]).unwrap();
    if let Commands::Translate { code, name } = cli.command {
        assert_eq!(code, "BL");
        assert_eq!(name, "Rue de Rivoli");
    } else {
        panic!("Expected Translate command");
    }
}

#[test]
fn cli_translate_name_defaults_to_empty() {
    let cli = parse_args(&["route-cli", "translate", "-"]).unwrap();
    if let Commands::Translate { code, name } = cli.command {
        assert_eq!(code, "-");
        assert_eq!(name, "");
    } else {
        panic!("Expected Translate command");
    }
}

#[test]
fn cli_parses_verbose_flag() {
    let cli = parse_args(&["route-cli", "-v", "translate", "L"]).unwrap();
    assert_eq!(cli.verbose, 1);
}

#[test]
fn cli_parses_multiple_verbose_flags() {
    let cli = parse_args(&["route-cli", "-vvv", "translate", "L"]).unwrap();
    assert_eq!(cli.verbose, 3);
}

#[test]
fn cli_parses_config_path() {
    let cli = parse_args(&["route-cli", "--config", "/etc/route-cli.toml", "translate", "L"]).unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("/etc/route-cli.toml")));
}

#[test]
fn cli_requires_subcommand() {
    assert!(parse_args(&["route-cli"]).is_err());
}

#[test]
fn cli_normalize_requires_file() {
    assert!(parse_args(&["route-cli", "normalize"]).is_err());
}

#[test]
fn cli_rejects_unknown_command() {
    assert!(parse_args(&["route-cli", "status"]).is_err());
}

#[test]
fn cli_version_flag() {
    let result = parse_args(&["route-cli", "--version"]);
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}

#[test]
fn cli_help_flag() {
    let result = parse_args(&["route-cli", "--help"]);
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
