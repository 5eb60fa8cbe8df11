use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use rayon::prelude::*;

use gdxatlas::atlas::{Severity, parse_file};
use gdxatlas::cli::{CliArgs, Command, CommonArgs};
use gdxatlas::config::LoadedConfig;
use gdxatlas::error::AtlasError;
use gdxatlas::import::import_atlas;
use gdxatlas::output::{
    PageCollector, output_paths, write_entries_json, write_output_file, write_pages_json,
};
use gdxatlas::sink::{DiagnosticSink, LogSink};
use gdxatlas::source::FileSource;

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., config loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();

    // Load config if specified and merge with CLI args
    let merged = merge_config_with_args(cli.command.args())?;

    env_logger::Builder::new()
        .filter_level(if merged.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    info!("gdxatlas v{}", env!("CARGO_PKG_VERSION"));

    if merged.input.is_empty() {
        return Err(AtlasError::NoInputs.into());
    }

    // Settle output names before any work so a clash cannot overwrite a file
    let outputs = match (&cli.command, &merged.output) {
        (Command::Check(_), _) | (_, None) => None,
        (_, Some(dir)) => Some(output_paths(&merged.input, dir)?),
    };

    if outputs.is_some()
        && let Some(dir) = &merged.output
        && !dir.exists()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output dir: {}", dir.display()))?;
    }

    // Parse in parallel, report in input order
    let reports: Vec<FileReport> = merged
        .input
        .par_iter()
        .map(|path| process_file(&cli.command, path, merged.pretty))
        .collect::<Result<_>>()?;

    let mut stdout = std::io::stdout().lock();
    let mut files_with_diagnostics = 0;

    for (i, report) in reports.iter().enumerate() {
        let mut sink = LogSink::with_prefix(report.path.display().to_string());
        for (severity, message) in &report.messages {
            sink.report(*severity, message);
        }
        if report.diagnostics > 0 {
            files_with_diagnostics += 1;
        }
        if report.entries == 0 {
            warn!("No entries found in {}", report.path.display());
        }

        match (&report.body, &outputs) {
            (Some(body), Some(paths)) => {
                let path = &paths[i];
                write_output_file(path, body)?;
                info!("Wrote {}", path.display());
            }
            (Some(body), None) => {
                stdout.write_all(body)?;
                stdout.write_all(b"\n")?;
            }
            (None, _) => info!("{}: {}", report.path.display(), report.summary),
        }
    }

    if merged.strict && files_with_diagnostics > 0 {
        return Err(AtlasError::Strict {
            files: files_with_diagnostics,
        }
        .into());
    }

    info!("Done!");

    Ok(())
}

/// Outcome of processing one atlas file
struct FileReport {
    path: PathBuf,
    /// Everything to forward to the log, in order
    messages: Vec<(Severity, String)>,
    /// Parse diagnostics only
    diagnostics: usize,
    entries: usize,
    summary: String,
    /// Rendered JSON, `None` for `check`
    body: Option<Vec<u8>>,
}

fn process_file(command: &Command, path: &Path, pretty: bool) -> Result<FileReport> {
    match command {
        Command::Entries(_) | Command::Check(_) => {
            let parsed = parse_file(path)?;

            let body = if matches!(command, Command::Entries(_)) {
                let mut buf = Vec::new();
                write_entries_json(&parsed, &mut buf, pretty)?;
                Some(buf)
            } else {
                None
            };

            Ok(FileReport {
                path: path.to_path_buf(),
                messages: parsed
                    .diagnostics
                    .iter()
                    .map(|d| (d.severity, d.to_string()))
                    .collect(),
                diagnostics: parsed.diagnostics.len(),
                entries: parsed.entries.len(),
                summary: format!(
                    "{} source(s), {} region(s), {} diagnostic(s)",
                    parsed.sources().count(),
                    parsed.regions().count(),
                    parsed.diagnostics.len()
                ),
                body,
            })
        }
        Command::Pages(_) => {
            let mut messages: Vec<(Severity, String)> = Vec::new();
            let mut collector = PageCollector::new();
            let summary = import_atlas(&FileSource::new(path), &mut messages, &mut collector)?;

            let mut buf = Vec::new();
            write_pages_json(&collector, &mut buf, pretty)?;

            Ok(FileReport {
                path: path.to_path_buf(),
                messages,
                diagnostics: summary.diagnostics,
                entries: summary.sources + summary.regions + summary.skipped + summary.failed,
                summary: format!(
                    "{} page(s), {} region(s), {} nine-slice(s)",
                    summary.sources, summary.regions, summary.nine_slices
                ),
                body: Some(buf),
            })
        }
    }
}

/// Merged configuration from CLI args and optional config file.
struct MergedConfig {
    input: Vec<PathBuf>,
    output: Option<PathBuf>,
    pretty: bool,
    strict: bool,
    verbose: bool,
}

/// Merge config file values with CLI arguments.
/// CLI arguments always take precedence over config values.
fn merge_config_with_args(args: &CommonArgs) -> Result<MergedConfig> {
    let loaded_config = if let Some(config_path) = &args.config {
        Some(
            LoadedConfig::load(config_path)
                .with_context(|| format!("failed to load config: {}", config_path.display()))?,
        )
    } else {
        None
    };

    // Determine input files: CLI args override config
    let input = if !args.input.is_empty() {
        args.input.clone()
    } else if let Some(ref lc) = loaded_config {
        lc.resolve_inputs()
            .context("failed to resolve input files from config")?
    } else {
        // This shouldn't happen due to clap's required_unless_present
        Vec::new()
    };

    // Output directory: CLI > config > stdout
    let output = args
        .output
        .clone()
        .or_else(|| loaded_config.as_ref().and_then(|lc| lc.resolve_output_dir()));

    let pretty = if args.compact {
        false
    } else if let Some(ref lc) = loaded_config {
        lc.config.pretty
    } else {
        true
    };

    let strict = args.strict || loaded_config.as_ref().is_some_and(|lc| lc.config.strict);

    Ok(MergedConfig {
        input,
        output,
        pretty,
        strict,
        verbose: args.verbose,
    })
}
