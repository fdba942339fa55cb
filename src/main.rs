//! filetally - Tally disk usage and file counts by extension.
//!
//! Usage:
//!   filetally --input-dir <PATH> [--output-file <PATH>]
//!   filetally --help
//!
//! Exit codes: 0 success, 1 invalid arguments or input directory,
//! 2 traversal error, 3 report could not be written.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use filetally_core::ScanConfig;
use filetally_report::{Report, ReportLayout, ReportWriter, format_size};
use filetally_scan::{ExtensionScanner, ScanOutcome, validate_root};

#[derive(Parser)]
#[command(
    name = "filetally",
    version,
    about = "Tally disk usage and file counts by extension",
    long_about = "filetally walks a directory tree, groups every file by its lowercase \
                  extension and writes a tab-separated report ranked by total size.\n\n\
                  Exit codes: 0 success, 1 invalid input, 2 traversal error, \
                  3 report could not be written."
)]
struct Cli {
    /// Directory to inventory
    #[arg(long = "input-dir", visible_alias = "dir", value_name = "PATH")]
    input_dir: PathBuf,

    /// Report file to write
    #[arg(long = "output-file", value_name = "PATH", default_value = "file-report.tsv")]
    output_file: PathBuf,

    /// Report layout
    #[arg(long, value_enum, default_value_t = Layout::Full)]
    layout: Layout,

    /// Skip files and directories whose name starts with a dot
    #[arg(long)]
    skip_hidden: bool,

    /// Skip entries by name (exact, `prefix*` or `*suffix`); repeatable
    #[arg(long = "exclude", value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Do not descend deeper than this many levels
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    /// Fail on any unreadable entry instead of reporting what was counted
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Layout {
    /// Header, extension, size, count, bytes, and a totals row
    #[default]
    Full,
    /// Extension and size only
    Legacy,
}

impl From<Layout> for ReportLayout {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Full => ReportLayout::Full,
            Layout::Legacy => ReportLayout::Legacy,
        }
    }
}

/// Pipeline stage a failure belongs to; selects the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Input,
    Traversal,
    Output,
}

impl Stage {
    fn exit_code(self) -> u8 {
        match self {
            Stage::Input => 1,
            Stage::Traversal => 2,
            Stage::Output => 3,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Input => "Invalid input directory",
            Stage::Traversal => "Directory traversal failed",
            Stage::Output => "Could not write report",
        })
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(Stage::Input.exit_code()),
            };
        }
    };

    if let Err(err) = color_eyre::install() {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }
    init_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            match failure_stage(&err) {
                Some(stage) => ExitCode::from(stage.exit_code()),
                None => ExitCode::FAILURE,
            }
        }
    }
}

/// Stage tag attached somewhere in the error chain.
fn failure_stage(err: &color_eyre::eyre::Report) -> Option<Stage> {
    err.downcast_ref::<Stage>().copied()
}

/// Validate, scan, rank and write.
fn run(cli: &Cli) -> Result<()> {
    validate_root(&cli.input_dir).wrap_err(Stage::Input)?;

    let config = ScanConfig::builder()
        .root(cli.input_dir.clone())
        .include_hidden(!cli.skip_hidden)
        .ignore_patterns(cli.exclude.clone())
        .max_depth(cli.max_depth)
        .build()
        .map_err(|e| eyre!(e))
        .wrap_err(Stage::Input)?;

    eprintln!("Scanning {}...", cli.input_dir.display());

    let scanner = ExtensionScanner::new().with_progress(|progress| {
        info!(
            files = progress.files_scanned,
            bytes = progress.bytes_scanned,
            files_per_sec = progress.files_per_second(),
            "Scanning {}",
            progress.current_path.display()
        );
    });
    let outcome = scanner.scan(&config).wrap_err(Stage::Traversal)?;
    check_warnings(&outcome, cli.strict)?;

    let report = Report::from_table(&outcome.table);
    ReportWriter::new(cli.layout.into())
        .write_to_path(&report, &cli.output_file)
        .wrap_err(Stage::Output)?;

    print_summary(&report, &outcome, &cli.output_file);
    Ok(())
}

/// Surface per-entry errors. In strict mode the first one aborts the run.
fn check_warnings(outcome: &ScanOutcome, strict: bool) -> Result<()> {
    let Some(first) = outcome.first_error() else {
        return Ok(());
    };

    let others = outcome.warnings.len() - 1;
    if strict {
        return Err(eyre!("{first} ({others} more)")).wrap_err(Stage::Traversal);
    }

    warn!(
        count = outcome.warnings.len(),
        "Some entries could not be read; report may be incomplete"
    );
    eprintln!("Warning: {first}");
    if others > 0 {
        eprintln!("{others} more warning(s) during scan");
    }
    Ok(())
}

fn print_summary(report: &Report, outcome: &ScanOutcome, output: &Path) {
    eprintln!(
        "Wrote {} extensions ({} files, {}) to {} in {:.2}s",
        report.rows.len(),
        report.totals.count,
        format_size(report.totals.size),
        output.display(),
        outcome.scan_duration.as_secs_f64()
    );
    if report.omitted > 0 {
        info!(
            omitted = report.omitted,
            "Extensions with zero total size left out of the report"
        );
    }
}

/// Install a stderr subscriber; `RUST_LOG` overrides the flag-derived level.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
