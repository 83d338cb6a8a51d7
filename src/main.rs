//! changeset-log-parser CLI
//!
//! Entry point for the command-line tool.
//!
//! Exit codes:
//! - 0: No failed changesets (or failing on them is disabled)
//! - 1: One or more reconciled changesets failed
//! - 2: Tool error (config error, unreadable input, report write failure, etc.)

use anyhow::{Context, Result};
use clap::Parser;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use changeset_log_parser::output::{JsonReporter, Reporter, TextReporter};
use changeset_log_parser::summary::failed_records;
use changeset_log_parser::{ChangesetRecord, Config, ExecutionSummary, Reconciler};

/// Default config file name used when --config is not explicitly provided.
const DEFAULT_CONFIG_FILE: &str = "changeset-log-parser.toml";

#[derive(Parser, Debug)]
#[command(name = "changeset-log-parser")]
#[command(about = "Reconcile changeset results from Liquibase console output", long_about = None)]
struct Args {
    /// Captured Liquibase output to parse; reads stdin when absent or "-"
    input: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, env = "CHANGESET_LOG_PARSER_CONFIG")]
    config: Option<PathBuf>,

    /// Override output format (text, json)
    #[arg(long)]
    format: Option<String>,

    /// Override the report output directory
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Exit 1 when any changeset failed
    #[arg(long, overrides_with = "no_fail_on_failed")]
    fail_on_failed: bool,

    /// Exit 0 even when changesets failed
    #[arg(long, overrides_with = "fail_on_failed")]
    no_fail_on_failed: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(has_failed_changesets) => {
            if has_failed_changesets {
                std::process::exit(1);
            }
            // exit 0 is implicit
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(2);
        }
    }
}

/// Parse the input, emit reports and decide the exit status.
///
/// Returns `Ok(true)` if a failed changeset should fail the run,
/// `Ok(false)` otherwise, or `Err` on tool errors.
fn run(args: Args) -> Result<bool> {
    let mut config = load_config(args.config.as_deref())?;

    if let Some(ref fmt) = args.format {
        config.output.formats = vec![fmt.clone()];
    }
    if let Some(ref dir) = args.output_dir {
        config.output.dir = dir.clone();
    }
    if args.fail_on_failed {
        config.cli.fail_on_failed_changeset = true;
    } else if args.no_fail_on_failed {
        config.cli.fail_on_failed_changeset = false;
    }

    let records = read_records(args.input.as_deref())?;
    let summary = ExecutionSummary::from_records(&records);
    tracing::info!(
        total = summary.total,
        failed = summary.failed,
        changelogs = summary.changelogs.len(),
        "parsed liquibase output"
    );
    for record in failed_records(&records) {
        tracing::warn!(changeset = %record, "changeset failed");
    }

    for format in &config.output.formats {
        let reporter: Box<dyn Reporter> = match format.as_str() {
            "text" => Box::new(TextReporter::new(true)),
            "json" => Box::new(JsonReporter::new()),
            other => {
                tracing::warn!(format = other, "unknown output format, skipping");
                continue;
            }
        };

        reporter
            .emit(&records, &config.output.dir)
            .context(format!("Failed to write {} report", format))?;
    }

    eprintln!(
        "changeset-log-parser: {} changeset(s), {} failed",
        summary.total, summary.failed
    );

    Ok(config.cli.fail_on_failed_changeset && summary.has_failures())
}

/// Stream the input through the reconciler line by line.
fn read_records(input: Option<&Path>) -> Result<Vec<ChangesetRecord>> {
    let reader: Box<dyn BufRead> = match input {
        Some(path) if path != Path::new("-") => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            Box::new(std::io::BufReader::new(file))
        }
        _ => Box::new(std::io::stdin().lock()),
    };

    let mut reconciler = Reconciler::new();
    // Console captures are not guaranteed to be valid UTF-8.
    for line in reader.split(b'\n') {
        let line = line.context("Failed to read input")?;
        reconciler.push_line(&String::from_utf8_lossy(&line));
    }
    Ok(reconciler.finish())
}

/// Load configuration from file.
///
/// If `config_path` is `Some`, the user explicitly passed `--config` and the file
/// must exist (error if not found). If `None`, the default config path is used;
/// a missing default config file is not an error (falls back to defaults with a warning).
fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Config::from_file(path).context("Failed to load configuration")
        }
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                Config::from_file(&default_path).context("Failed to load configuration")
            } else {
                tracing::warn!(
                    path = %default_path.display(),
                    "config file not found, using defaults"
                );
                Ok(Config::default())
            }
        }
    }
}
