#![forbid(unsafe_code)]
//! fasttests: a lightweight, embeddable unit-testing toolkit.
//!
//! Tests are grouped into scenarios. A [`RegistryManager`] collects a scenario's tests, runs each of them once in
//! registration order, and classifies the outcomes as passed, failed, skipped or errored. Test bodies verify their
//! expectations with the fluent [`assert_that!`] API; a verification that does not hold aborts the body and is
//! recorded on the test, never propagated to the caller.
//!
//! ```
//! use fasttests::prelude::*;
//!
//! let mut scenario = RegistryManager::new("Quick");
//! scenario
//!     .add_test("sum", || {
//!         assert_that!(2 + 2).is_equal_to(4);
//!     })?
//!     .add_test("wrong", || {
//!         assert_that!(2 + 2, "arithmetic").is_equal_to(5);
//!     })?;
//!
//! let scenario = scenario.run_tests()?;
//! assert_eq!(scenario.passed_count(), 1);
//! assert_eq!(scenario.failed_count(), 1);
//! assert!(scenario.failed_tests()[0].failure_reason().contains("arithmetic"));
//! # Ok::<(), fasttests::ScenarioError>(())
//! ```
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test bodies**: assertion failures are deliberate unwinds carrying a `TestFailure`; they are intercepted at the
//!   test boundary only.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod catalog;
pub mod cli;
mod dsl;
pub mod engine;
pub mod report;
pub mod selftest;
pub mod version;

pub use catalog::{Catalog, CatalogError, ScenarioFactory};
pub use engine::{Hooks, IntoBodyResult, Registry, RegistryManager, RegistryObserver, ScenarioError, Test};
pub use fasttests_assert::{AssertThat, EmptyExpression, assert_that};
pub use fasttests_core::{LineInfo, Status, TestFailure, line_info, line_info_f};
pub use report::{ColorChoice, ConsoleObserver, ConsoleReporter, ReportConfig, TracingObserver};

/// Everything a scenario definition usually needs.
pub mod prelude {
    pub use crate::engine::{RegistryManager, RegistryObserver, ScenarioError, Test};
    pub use fasttests_assert::{AssertThat, Nullable, Tolerance, assert_that};
    pub use fasttests_core::{LineInfo, Status, line_info, line_info_f};
}
