//! Execution status of a single test.

use std::fmt;

/// Pending or terminal classification of a test.
///
/// `None` is the only non-terminal state: a test leaves it exactly once, when it runs, and never returns to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Status {
    /// The scenario holding the test has not run yet.
    #[default]
    None,
    /// The body completed without raising.
    Passed,
    /// An assertion did not hold.
    Failed,
    /// The body raised something other than an assertion failure.
    Error,
    /// The test was registered as skipped; its body never ran.
    Skipped,
}

impl Status {
    /// All terminal statuses, in report order.
    pub const TERMINAL: [Status; 4] = [Status::Passed, Status::Failed, Status::Skipped, Status::Error];

    pub fn is_terminal(self) -> bool {
        self != Status::None
    }

    /// `true` for the statuses that make a run unsuccessful.
    pub fn is_unsuccessful(self) -> bool {
        matches!(self, Status::Failed | Status::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::None => "NOT RUN YET",
            Status::Passed => "PASSED",
            Status::Failed => "FAILED",
            Status::Error => "ERROR",
            Status::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        assert_eq!(Status::default(), Status::None);
        assert!(!Status::None.is_terminal());
    }

    #[test]
    fn test_terminal_statuses() {
        for status in Status::TERMINAL {
            assert!(status.is_terminal(), "{status} should be terminal");
        }
    }

    #[test]
    fn test_unsuccessful() {
        assert!(Status::Failed.is_unsuccessful());
        assert!(Status::Error.is_unsuccessful());
        assert!(!Status::Passed.is_unsuccessful());
        assert!(!Status::Skipped.is_unsuccessful());
        assert!(!Status::None.is_unsuccessful());
    }

    #[test]
    fn test_display() {
        assert_eq!(Status::None.to_string(), "NOT RUN YET");
        assert_eq!(Status::Error.to_string(), "ERROR");
    }
}
