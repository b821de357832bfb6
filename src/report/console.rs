//! End-of-run console summary.

use std::fmt::Write as _;
use std::io::{self, Write};

use fasttests_core::Status;

use super::config::ReportConfig;
use super::{CYAN, format_ms, paint, status_color};
use crate::engine::{RegistryManager, Test};

const INDENT: &str = "    ";
const ENTRY_INDENT: &str = "        ";

/// Renders the pass/fail/skip/error summary of a scenario.
///
/// Counts are always shown. Failed and errored tests are always listed with their message; passed and skipped tests
/// only when verbose.
#[derive(Debug, Clone, Default)]
pub struct ConsoleReporter {
    config: ReportConfig,
}

impl ConsoleReporter {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Render with the configured colour policy resolved against the current process.
    pub fn render(&self, manager: &RegistryManager) -> String {
        self.render_with_color(manager, self.config.color.enabled())
    }

    pub fn render_with_color(&self, manager: &RegistryManager, color: bool) -> String {
        let mut out = String::new();
        let header = if self.config.show_timings {
            format!(
                "UNIT TEST SUMMARY [{}] [{}] :",
                manager.label(),
                format_ms(manager.all_tests_exec_time_ms())
            )
        } else {
            format!("UNIT TEST SUMMARY [{}] :", manager.label())
        };
        line(&mut out, "", &paint(color, CYAN, &header));
        if let Some(description) = manager.description() {
            line(&mut out, INDENT, &format!("Description: {description}"));
        }

        if !manager.has_run() {
            line(&mut out, INDENT, Status::None.as_str());
            return out;
        }

        let total = manager.all_tests_count();
        for status in Status::TERMINAL {
            let (title, tests, listed) = match status {
                Status::Passed => ("PASSED", manager.passed_tests(), self.config.verbose),
                Status::Failed => ("FAILED", manager.failed_tests(), true),
                Status::Skipped => ("SKIPPED", manager.skipped_tests(), self.config.verbose),
                Status::Error => ("ERRORS", manager.with_error_tests(), true),
                Status::None => continue,
            };
            let paint_line = |text: &str| paint(color, status_color(status), text);
            line(&mut out, INDENT, &paint_line(&format!("{title}: {}/{total}", tests.len())));
            if !listed {
                continue;
            }
            for test in tests {
                line(&mut out, ENTRY_INDENT, &paint_line(&self.entry(test)));
                if let Some(message) = message_of(test) {
                    let mut lines = message.lines();
                    let first = lines.next().unwrap_or_default();
                    line(&mut out, ENTRY_INDENT, &paint_line(&format!("Message: {first}")));
                    for rest in lines {
                        line(&mut out, ENTRY_INDENT, &paint_line(rest));
                    }
                }
            }
        }
        out
    }

    /// Write the rendered summary to `out`.
    pub fn print(&self, manager: &RegistryManager, out: &mut impl Write) -> io::Result<()> {
        out.write_all(self.render(manager).as_bytes())?;
        out.flush()
    }

    fn entry(&self, test: &Test) -> String {
        let label = test.label_verbose(self.config.verbose);
        if self.config.show_timings {
            format!("[{label}] [{}]", format_ms(test.exec_time_ms()))
        } else {
            format!("[{label}]")
        }
    }
}

fn message_of(test: &Test) -> Option<&str> {
    let message = match test.status() {
        Status::Failed => test.failure_reason(),
        Status::Error => test.error(),
        Status::Skipped => test.skipped_reason(),
        Status::Passed | Status::None => return None,
    };
    (!message.is_empty()).then_some(message)
}

fn line(out: &mut String, indent: &str, text: &str) {
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{indent}{text}");
}
