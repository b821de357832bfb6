//! Observers reporting each test as soon as it finishes.

use std::cell::RefCell;
use std::io::{self, Write};

use fasttests_core::Status;
use tracing::{info, warn};

use super::{format_ms, paint, status_color};
use crate::engine::{RegistryObserver, Test};

/// Prints a short block per finished test to a writer.
///
/// ```text
/// RUNNING TEST [label] [0.012000 ms]:
/// Status: PASSED
/// ```
#[derive(Debug)]
pub struct ConsoleObserver<W: Write> {
    out: RefCell<W>,
    color: bool,
    show_timings: bool,
}

impl ConsoleObserver<io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out: RefCell::new(out),
            color,
            show_timings: true,
        }
    }

    pub fn with_show_timings(mut self, show_timings: bool) -> Self {
        self.show_timings = show_timings;
        self
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn block(&self, test: &Test) -> String {
        let action = if test.status() == Status::Skipped { "SKIPPING TEST" } else { "RUNNING TEST" };
        let heading = if self.show_timings {
            format!("{action} [{}] [{}]:", test.label(), format_ms(test.exec_time_ms()))
        } else {
            format!("{action} [{}]:", test.label())
        };
        let status = paint(self.color, status_color(test.status()), test.status().as_str());
        format!("{heading}\nStatus: {status}\n")
    }
}

impl<W: Write> RegistryObserver for ConsoleObserver<W> {
    fn update(&self, test: &Test) {
        let block = self.block(test);
        let mut out = self.out.borrow_mut();
        if let Err(error) = out.write_all(block.as_bytes()).and_then(|()| out.flush()) {
            warn!(test = %test.label(), %error, "failed to write test progress");
        }
    }
}

/// Emits one `tracing` event per finished test.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RegistryObserver for TracingObserver {
    fn update(&self, test: &Test) {
        match test.status() {
            Status::Failed => info!(
                test = %test.label(),
                status = %test.status(),
                elapsed_ms = test.exec_time_ms(),
                reason = %test.failure_reason(),
                "test finished"
            ),
            Status::Error => info!(
                test = %test.label(),
                status = %test.status(),
                elapsed_ms = test.exec_time_ms(),
                error = %test.error(),
                "test finished"
            ),
            _ => info!(
                test = %test.label(),
                status = %test.status(),
                elapsed_ms = test.exec_time_ms(),
                "test finished"
            ),
        }
    }
}
