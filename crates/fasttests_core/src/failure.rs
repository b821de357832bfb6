//! The assertion failure signal and the funnel every assertion goes through.
//!
//! A failing assertion builds a [`TestFailure`] and unwinds with it as the panic payload. The test runner's guarded
//! region is the only place that intercepts it; frames in between never see it as a value.

use std::any::Any;
use std::fmt;

use crate::line_info::LineInfo;

/// Which comparison an assertion expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The reached value should have been equal to the expected one.
    Equal,
    /// The reached value should have been different from the expected one.
    Different,
    /// A callable should have panicked with a given payload type.
    Exception,
}

/// Structured payload carried next to the failure message.
///
/// Values are rendered eagerly when the failure is built: the signal is consumed in the same stack it was raised
/// in, so there is nothing to gain from keeping them type-erased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detail {
    /// Explicit failure, nothing to compare.
    None,
    /// Values were compared but cannot be displayed.
    Opaque,
    /// Rendered operands.
    Values { reached: String, expected: String },
}

impl Detail {
    /// Render both operands with their `Debug` representation.
    pub fn debug<R: fmt::Debug + ?Sized, E: fmt::Debug + ?Sized>(reached: &R, expected: &E) -> Self {
        Detail::Values {
            reached: format!("{reached:?}"),
            expected: format!("{expected:?}"),
        }
    }

    pub fn values(reached: impl Into<String>, expected: impl Into<String>) -> Self {
        Detail::Values {
            reached: reached.into(),
            expected: expected.into(),
        }
    }
}

/// The failure signal raised by a verification that does not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFailure {
    headline: String,
    kind: FailureKind,
    detail: Detail,
}

impl TestFailure {
    /// Build a failure, suffixing `message` with the location when `line_info` is initialised.
    pub fn new(message: &str, line_info: &LineInfo, kind: FailureKind, detail: Detail) -> Self {
        let headline = match (message.is_empty(), line_info.is_init()) {
            (_, false) => message.to_string(),
            (true, true) => format!("({line_info})"),
            (false, true) => format!("{message} ({line_info})"),
        };
        Self { headline, kind, detail }
    }

    /// Message plus location suffix, without the structured detail.
    pub fn headline(&self) -> &str {
        &self.headline
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn detail(&self) -> &Detail {
        &self.detail
    }

    pub fn reached(&self) -> Option<&str> {
        match &self.detail {
            Detail::Values { reached, .. } => Some(reached),
            _ => None,
        }
    }

    pub fn expected(&self) -> Option<&str> {
        match &self.detail {
            Detail::Values { expected, .. } => Some(expected),
            _ => None,
        }
    }

    /// Recover a failure from a panic payload, if that is what unwound.
    pub fn from_payload(payload: &(dyn Any + Send)) -> Option<&TestFailure> {
        payload.downcast_ref::<TestFailure>()
    }

    fn detail_lines(&self) -> Vec<String> {
        match (&self.detail, self.kind) {
            (Detail::None, _) => Vec::new(),
            (Detail::Values { reached, expected }, FailureKind::Equal) => {
                vec![format!("[REACHED] {reached}"), format!("[EXPECTED EQUAL TO] {expected}")]
            }
            (Detail::Values { reached, expected }, FailureKind::Different) => {
                vec![format!("[REACHED] {reached}"), format!("[EXPECTED DIFFERENT FROM] {expected}")]
            }
            (Detail::Values { reached, expected }, FailureKind::Exception) => {
                vec![format!("[EXPECTED PANIC] {expected}"), format!("[REACHED] {reached}")]
            }
            (Detail::Opaque, FailureKind::Equal) => {
                vec!["[REACHED] is different from [EXPECTED]. Expected [EQUAL TO]".to_string()]
            }
            (Detail::Opaque, FailureKind::Different) => {
                vec!["[REACHED] is equal to [EXPECTED]. Expected [DIFFERENT FROM]".to_string()]
            }
            (Detail::Opaque, FailureKind::Exception) => vec!["[ERROR]".to_string()],
        }
    }
}

impl fmt::Display for TestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.headline)?;
        for line in self.detail_lines() {
            write!(f, "\n    {line}")?;
        }
        Ok(())
    }
}

impl std::error::Error for TestFailure {}

/// Unwind out of the current test body with `failure`.
#[cold]
#[track_caller]
pub fn raise(failure: TestFailure) -> ! {
    std::panic::panic_any(failure)
}

/// Raise a [`TestFailure`] unless `condition` holds.
///
/// Every verification funnels through here so failures are formatted uniformly. `detail` is only evaluated on
/// failure. No side effect besides the raise.
#[track_caller]
pub fn failure_test(
    condition: bool,
    kind: FailureKind,
    detail: impl FnOnce() -> Detail,
    message: &str,
    line_info: &LineInfo,
) {
    if !condition {
        raise(TestFailure::new(message, line_info, kind, detail()));
    }
}
