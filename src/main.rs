//! mapdiff command-line interface.
//!
//! Parses two documents, optionally narrows both to the subtree at a dotted
//! path, and prints their structural differences.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mapdiff::{
    compute_diff, format_diff, get_items, parse_file, Node, OutputFormat, OutputOptions,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// mapdiff - structural diff for nested data
///
/// Compares JSON, YAML and TOML documents and prints one line per
/// difference: `Add`, `Change` or `Remove` followed by the dotted path.
#[derive(Parser)]
#[command(name = "mapdiff")]
#[command(version)]
#[command(about = "Structural diff for nested maps and lists", long_about = None)]
struct Cli {
    /// Old document
    #[arg(value_name = "OLD")]
    old: PathBuf,

    /// New document
    #[arg(value_name = "NEW")]
    new: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "terminal")]
    format: OutputFormatArg,

    /// Compare only the subtree at this dotted path (e.g. spec.template)
    #[arg(long, value_name = "PATH")]
    at: Option<String>,

    /// Truncate displayed values longer than this
    #[arg(long)]
    max_value_length: Option<usize>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (only show changes, suppress summary)
    #[arg(short, long)]
    quiet: bool,
}

/// Output format argument for clap
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormatArg {
    /// Colored terminal output
    Terminal,
    /// JSON representation
    Json,
    /// Plain text (no colors)
    Plain,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Terminal => OutputFormat::Terminal,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Plain => OutputFormat::Plain,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    let old = load(&cli.old, cli.at.as_deref())
        .with_context(|| format!("Failed to load old document: {}", cli.old.display()))?;
    let new = load(&cli.new, cli.at.as_deref())
        .with_context(|| format!("Failed to load new document: {}", cli.new.display()))?;

    let diff = compute_diff(&old, &new);

    let options = OutputOptions {
        max_value_length: cli.max_value_length,
        summary: !cli.quiet,
    };
    let output = format_diff(&diff, &cli.format.into(), &options)
        .context("Failed to format diff output")?;
    println!("{}", output.trim_end());

    Ok(if diff.is_empty() { 0 } else { 1 })
}

/// Parses a document and narrows it to the subtree at `at`, if given.
fn load(path: &Path, at: Option<&str>) -> Result<Node> {
    debug!(path = %path.display(), "parsing");
    let root = parse_file(path)?;

    let Some(at) = at else {
        return Ok(root);
    };
    let map = root
        .as_map()
        .with_context(|| format!("Document root is a {}, not a map", root.type_name()))?;
    let subtree = get_items(map, at).with_context(|| format!("Cannot resolve path {}", at))?;
    Ok(subtree.clone())
}
