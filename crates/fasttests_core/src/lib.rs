//! Provide the shared vocabulary of the fasttests toolkit.
//!
//! Both the assertion crate and the engine depend on this crate, so the failure signal they exchange has exactly one
//! definition.
//!
//! ## Notes
//!
//! - This is a dependency-free core: **no IO** and no test bookkeeping. The only process-wide state is the panic hook
//!   installed by [`unwind::catch`].
//! - Current scope: source locations ([`LineInfo`]), test statuses ([`Status`]), the assertion failure signal
//!   ([`TestFailure`]) with its single construction funnel ([`failure_test`]), and the scoped unwind boundary used to
//!   intercept that signal.

pub mod failure;
pub mod line_info;
pub mod status;
pub mod unwind;

pub use failure::{Detail, FailureKind, TestFailure, failure_test, raise};
pub use line_info::LineInfo;
pub use status::Status;
