//! The test registration and execution engine.
//!
//! A [`RegistryManager`] owns one scenario. Tests are registered while it is open, run exactly once in registration
//! order, and classified into per-status buckets that reporters read afterwards. Assertion failures and panics inside
//! test bodies are contained at the [`Test::run`] boundary and recorded on the test; they never reach the caller.

pub mod error;
pub mod hooks;
pub mod manager;
pub mod observer;
pub mod registry;

pub use error::ScenarioError;
pub use hooks::Hooks;
pub use manager::RegistryManager;
pub use observer::RegistryObserver;
pub use registry::Registry;
pub use test::{Body, BodyError, BodyResult, IntoBodyResult, Test, UNKNOWN_ERROR, boxed_body};
