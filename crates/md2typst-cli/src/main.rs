//! md2typst: CLI tool to convert Markdown with YAML frontmatter to Typst
//!
//! Reads one document from standard input and writes Typst markup to
//! standard output. Logs go to standard error.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::Config;
use md2typst_core::{ConvertOptions, convert};

/// Tool manifest, printed by `--manifest`
const MANIFEST: &str = include_str!("../assets/manifest.json");

/// Worked example input, printed by `--example`
const EXAMPLE: &str = include_str!("../assets/example.md");

#[derive(Parser, Debug)]
#[command(name = "md2typst")]
#[command(about = "Convert Markdown with YAML frontmatter to Typst")]
#[command(after_help = "Examples:
  md2typst < notes.md > notes.typ       # Convert standard input
  md2typst -c page.toml < notes.md      # Override the page setup
  md2typst --example | md2typst         # Convert the bundled example")]
struct Cli {
    /// Print the embedded manifest and exit
    #[arg(long)]
    manifest: bool,

    /// Print the embedded example document and exit
    #[arg(long)]
    example: bool,

    /// Print the version from the embedded manifest and exit
    #[arg(long)]
    version: bool,

    /// Configuration file (TOML) with page setup overrides
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the JSON schema of the configuration file and exit
    #[arg(long)]
    schema: bool,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.version {
        if let Some(version) = manifest_version(MANIFEST) {
            println!("{}", version);
        }
        return Ok(());
    }
    if cli.manifest {
        return print_resource(MANIFEST);
    }
    if cli.example {
        return print_resource(EXAMPLE);
    }
    if cli.schema {
        println!("{}", Config::json_schema_string()?);
        return Ok(());
    }

    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            Config::load(path)?
        }
        None => Config::default(),
    };
    let options = ConvertOptions {
        page: config.page_setup(),
    };

    let mut input = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut input)
        .context("error reading stdin")?;
    debug!(bytes = input.len(), "read input");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    convert(&input, &mut out, &options)?;
    out.flush().context("error writing output")?;

    Ok(())
}

/// Set up the tracing subscriber; `RUST_LOG` takes precedence over `--verbose`
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_resource(content: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(content.as_bytes())
        .and_then(|()| stdout.flush())
        .context("error writing output")
}

/// The `version` value of a JSON manifest; strings are returned unquoted
fn manifest_version(manifest: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(manifest).ok()?;
    match value.get("version")? {
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_manifest_version() {
        assert_eq!(manifest_version(MANIFEST).as_deref(), Some("0.1.0"));
    }

    #[test]
    fn test_manifest_version_variants() {
        assert_eq!(manifest_version(r#"{"version": "2.1"}"#).as_deref(), Some("2.1"));
        assert_eq!(manifest_version(r#"{"version": 3}"#).as_deref(), Some("3"));
        assert_eq!(manifest_version(r#"{"name": "x"}"#), None);
        assert_eq!(manifest_version("not json"), None);
    }

    #[test]
    fn test_example_is_convertible() {
        let typst =
            md2typst_core::convert_to_string(EXAMPLE.as_bytes(), &ConvertOptions::default())
                .unwrap();
        assert!(typst.contains("#let title = \"Quarterly Report\""));
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from(["md2typst", "--version", "-v", "-c", "page.toml"]).unwrap();
        assert!(cli.version);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("page.toml")));
        assert!(!cli.manifest);
    }

    #[test]
    fn test_cli_rejects_positional_input() {
        assert!(Cli::try_parse_from(["md2typst", "file.md"]).is_err());
    }
}
