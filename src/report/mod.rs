//! Rendering of scenario results.
//!
//! Everything here only reads a [`RegistryManager`](crate::RegistryManager); the engine itself never writes to an
//! output stream.
//!
//! - `config` - Verbosity, colour and timing options
//! - `console` - End-of-run summary
//! - `progress` - Per-test observers (console and `tracing`)

pub mod config;
pub mod console;
pub mod progress;

pub use config::{ColorChoice, ReportConfig};
pub use console::ConsoleReporter;
pub use progress::{ConsoleObserver, TracingObserver};

use fasttests_core::Status;

const RESET: &str = "\x1b[0m";
const CYAN: &str = "\x1b[36m";

fn status_color(status: Status) -> &'static str {
    match status {
        Status::Passed => "\x1b[32m",
        Status::Failed => "\x1b[31m",
        Status::Skipped => "\x1b[33m",
        Status::Error => "\x1b[35m",
        Status::None => "",
    }
}

/// Wrap `text` in an ANSI colour when `enabled`.
fn paint(enabled: bool, color: &str, text: &str) -> String {
    if enabled && !color.is_empty() {
        format!("{color}{text}{RESET}")
    } else {
        text.to_string()
    }
}

fn format_ms(ms: f64) -> String {
    format!("{ms:.6} ms")
}
