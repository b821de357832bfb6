//! CLI module for the fasttests runner
//!
//! Runs the built-in scenario catalogue and prints one report per scenario.
//!
//! ## Usage
//!
//! - `fasttests` - Run every scenario
//! - `fasttests -s NAME` - Run only the named scenarios (repeatable)
//! - `fasttests --list` - List scenario names
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;
use std::io::{self, Write};
use std::process;
use std::rc::Rc;

use clap::Parser;

use crate::catalog::{Catalog, CatalogError};
use crate::report::{ColorChoice, ConsoleObserver, ConsoleReporter, ReportConfig, TracingObserver};
use crate::selftest;
use crate::version::FASTTESTS_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    /// At least one test failed or errored, or the runner itself failed.
    pub const FAILURE: ExitCode = ExitCode(1);
    /// The command line named something that does not exist.
    pub const USAGE: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Create a usage error (exit code 2).
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::USAGE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<CatalogError> for CliError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::UnknownScenario(_) => CliError::usage(format!("Error: {error}")),
            other => CliError::failure(format!("Error: {other}")),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(error: io::Error) -> Self {
        CliError::failure(format!("Error writing report: {error}"))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Run fasttests scenarios and print their reports
#[derive(Parser, Debug)]
#[command(name = "fasttests")]
#[command(version = FASTTESTS_VERSION)]
#[command(about = "Run fasttests scenarios and print their reports", long_about = None)]
pub struct Cli {
    /// List the available scenarios and exit
    #[arg(long)]
    pub list: bool,

    /// Run only this scenario (repeatable; default: all)
    #[arg(short = 's', long = "scenario", value_name = "NAME")]
    pub scenarios: Vec<String>,

    /// List passed and skipped tests, not only failures
    #[arg(short, long)]
    pub verbose: bool,

    /// Print each test as soon as it finishes
    #[arg(long)]
    pub progress: bool,

    /// When to colour the output
    #[arg(long, value_enum, value_name = "WHEN", default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Omit elapsed times from reports
    #[arg(long = "no-timings")]
    pub no_timings: bool,
}

impl Cli {
    fn report_config(&self) -> ReportConfig {
        ReportConfig::new()
            .with_verbose(self.verbose)
            .with_color(self.color)
            .with_show_timings(!self.no_timings)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(&cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute against the built-in catalogue, printing to stdout.
fn execute(cli: &Cli) -> CliResult<ExitCode> {
    let catalog = selftest::catalog()?;
    let stdout = io::stdout();
    execute_with(cli, &catalog, &mut stdout.lock())
}

/// Run the scenarios selected by `cli` from `catalog`, writing reports to `out`.
///
/// Every requested name is checked before anything runs. Returns [`ExitCode::FAILURE`] when any scenario has a
/// failed or errored test.
pub fn execute_with(cli: &Cli, catalog: &Catalog, out: &mut impl Write) -> CliResult<ExitCode> {
    if cli.list {
        for name in catalog.names() {
            writeln!(out, "{name}")?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    let selected: Vec<&str> = if cli.scenarios.is_empty() {
        catalog.names().collect()
    } else {
        if let Some(unknown) = cli.scenarios.iter().find(|name| !catalog.contains(name)) {
            return Err(CatalogError::UnknownScenario(unknown.clone()).into());
        }
        cli.scenarios.iter().map(String::as_str).collect()
    };

    let config = cli.report_config();
    let color = config.color.enabled();
    let reporter = ConsoleReporter::new(config);
    let mut exit_code = ExitCode::SUCCESS;

    for name in selected {
        let mut manager = catalog.build(name)?;
        manager.add_observer(Rc::new(TracingObserver));
        if cli.progress {
            manager.add_observer(Rc::new(ConsoleObserver::stdout(color).with_show_timings(!cli.no_timings)));
        }
        let manager = manager.run_tests().map_err(CatalogError::from)?;
        out.write_all(reporter.render_with_color(manager, color).as_bytes())?;
        if manager.has_failures() {
            exit_code = ExitCode::FAILURE;
        }
    }
    out.flush()?;
    Ok(exit_code)
}

// ============================================================================
// Tests
// ============================================================================
