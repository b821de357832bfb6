//! Usage errors raised by the engine.
//!
//! Test outcomes are never errors at this level: failures and panics inside a body are recorded on the test. These
//! variants only cover misuse of a scenario's lifecycle.

use thiserror::Error;

/// Misuse of a scenario's register-then-run lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    #[error("scenario '{scenario}' has already run; no more tests or hooks can be registered")]
    RegistrationClosed { scenario: String },

    #[error("scenario '{scenario}' has already run; tests are not re-runnable")]
    AlreadyRun { scenario: String },
}
