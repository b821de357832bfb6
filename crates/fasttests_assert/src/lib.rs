//! Fluent assertions for fasttests test bodies.
//!
//! ```
//! use fasttests_assert::assert_that;
//!
//! assert_that!(1 + 1).is_equal_to(2).and_that("Hello").is_equal_to_text("hello", true);
//! assert_that!(0.1_f64 + 0.2, "float sum").is_equal_within(0.3, 1e-9);
//! ```
//!
//! A verification that does not hold unwinds out of the test body with a [`TestFailure`]; the engine's guarded region
//! turns it into a `Failed` status. Outside of a runner it behaves like any other panic.
//!
//! ## Notes
//!
//! - Capabilities are checked at compile time: equality needs `PartialEq`, rendered values need `Debug` (use the
//!   `_opaque` variants otherwise), nullness needs [`Nullable`] and tolerance needs [`Tolerance`].

mod capability;
mod expression;

pub use capability::{Nullable, Tolerance};
pub use expression::{AssertThat, EmptyExpression, assert_that};
pub use fasttests_core::{LineInfo, TestFailure, line_info, line_info_f};

/// Wrap a value for verification, recording the call site.
///
/// An optional format string after the value becomes the failure message.
#[macro_export]
macro_rules! assert_that {
    ($expr:expr $(,)?) => {
        $crate::assert_that($expr).at($crate::line_info!())
    };
    ($expr:expr, $($message:tt)+) => {
        $crate::assert_that($expr)
            .because(::std::format!($($message)+))
            .at($crate::line_info!())
    };
}
