//! Scenario lifecycle: registration, a single run, and the per-status buckets read by reporters.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use fasttests_core::Status;
use tracing::{info, warn};

use super::error::ScenarioError;
use super::hooks::Hooks;
use super::observer::{Observers, RegistryObserver};
use super::registry::Registry;
use super::test::{IntoBodyResult, Test};

/// Indices into the registry, one list per terminal status.
#[derive(Debug, Default)]
struct Buckets {
    passed: Vec<usize>,
    failed: Vec<usize>,
    skipped: Vec<usize>,
    errors: Vec<usize>,
}

impl Buckets {
    fn get(&self, status: Status) -> &[usize] {
        match status {
            Status::Passed => &self.passed,
            Status::Failed => &self.failed,
            Status::Skipped => &self.skipped,
            Status::Error => &self.errors,
            Status::None => &[],
        }
    }

    fn push(&mut self, status: Status, index: usize) {
        match status {
            Status::Passed => self.passed.push(index),
            Status::Failed => self.failed.push(index),
            Status::Skipped => self.skipped.push(index),
            Status::Error => self.errors.push(index),
            Status::None => warn!(index, "test left in a non-terminal state, not classified"),
        }
    }
}

/// Owns one scenario: its tests, hooks and observers, and the results of its single run.
///
/// Registration is open until [`run_tests`](Self::run_tests) is called; afterwards every mutation entry point
/// returns [`ScenarioError::RegistrationClosed`]. All queries report zero or empty until the run completed, so an unrun
/// scenario can never be mistaken for one that ran with no results. A run interrupted by a panicking observer still
/// counts as started: it cannot be resumed and its partial results are never published.
pub struct RegistryManager {
    registry: Registry,
    description: Option<String>,
    hooks: Hooks,
    observers: Observers,
    started: bool,
    has_run: bool,
    buckets: Buckets,
    total_exec_time: Duration,
}

impl RegistryManager {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            registry: Registry::new(label),
            description: None,
            hooks: Hooks::default(),
            observers: Observers::default(),
            started: false,
            has_run: false,
            buckets: Buckets::default(),
            total_exec_time: Duration::ZERO,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    // ========================================
    // Registration
    // ========================================

    fn ensure_open(&self) -> Result<(), ScenarioError> {
        if self.started {
            return Err(ScenarioError::RegistrationClosed {
                scenario: self.label().to_string(),
            });
        }
        Ok(())
    }

    /// Append a prepared test, active or skipped.
    pub fn add_prepared_test(&mut self, test: Test) -> Result<&mut Self, ScenarioError> {
        self.ensure_open()?;
        self.registry.push(test);
        Ok(self)
    }

    pub fn add_test<F, R>(&mut self, label: impl Into<String>, body: F) -> Result<&mut Self, ScenarioError>
    where
        F: FnMut() -> R + 'static,
        R: IntoBodyResult,
    {
        self.add_prepared_test(Test::new(label, body))
    }

    pub fn add_unlabeled_test<F, R>(&mut self, body: F) -> Result<&mut Self, ScenarioError>
    where
        F: FnMut() -> R + 'static,
        R: IntoBodyResult,
    {
        self.add_prepared_test(Test::unlabeled(body))
    }

    pub fn skip_test<F, R>(&mut self, label: impl Into<String>, body: F) -> Result<&mut Self, ScenarioError>
    where
        F: FnMut() -> R + 'static,
        R: IntoBodyResult,
    {
        self.add_prepared_test(Test::skipped(label, body))
    }

    pub fn skip_unlabeled_test<F, R>(&mut self, body: F) -> Result<&mut Self, ScenarioError>
    where
        F: FnMut() -> R + 'static,
        R: IntoBodyResult,
    {
        self.add_prepared_test(Test::skipped(String::new(), body))
    }

    pub fn skip_test_with_reason<F, R>(
        &mut self,
        reason: impl Into<String>,
        label: impl Into<String>,
        body: F,
    ) -> Result<&mut Self, ScenarioError>
    where
        F: FnMut() -> R + 'static,
        R: IntoBodyResult,
    {
        self.add_prepared_test(Test::skipped_with_reason(reason, label, body))
    }

    pub fn set_up<F, R>(&mut self, set_up: F) -> Result<&mut Self, ScenarioError>
    where
        F: FnMut() -> R + 'static,
        R: IntoBodyResult,
    {
        self.ensure_open()?;
        self.hooks.set_set_up(set_up);
        Ok(self)
    }

    pub fn tear_down<F, R>(&mut self, tear_down: F) -> Result<&mut Self, ScenarioError>
    where
        F: FnMut() -> R + 'static,
        R: IntoBodyResult,
    {
        self.ensure_open()?;
        self.hooks.set_tear_down(tear_down);
        Ok(self)
    }

    // ========================================
    // Observers
    // ========================================

    /// Returns `false` if this exact observer was already registered.
    pub fn add_observer(&mut self, observer: Rc<dyn RegistryObserver>) -> bool {
        self.observers.add(observer)
    }

    /// Remove an observer by identity. Returns `false` if it was not registered.
    pub fn remove_observer<O: RegistryObserver + ?Sized>(&mut self, observer: &Rc<O>) -> bool {
        self.observers.remove(observer)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // ========================================
    // Execution
    // ========================================

    /// Run every test once, in registration order.
    ///
    /// Each finished test is classified into its bucket and handed to every observer before the next one starts.
    /// Test failures never surface here; the only error is calling this a second time, including after an earlier
    /// call was unwound by a panicking observer.
    #[tracing::instrument(skip_all, fields(scenario = %self.registry.label(), tests = self.registry.len()))]
    pub fn run_tests(&mut self) -> Result<&Self, ScenarioError> {
        if self.started {
            return Err(ScenarioError::AlreadyRun {
                scenario: self.label().to_string(),
            });
        }
        self.started = true;

        let mut buckets = Buckets::default();
        let mut total_exec_time = Duration::ZERO;
        let Self {
            registry,
            hooks,
            observers,
            ..
        } = self;
        for (index, test) in registry.tests_mut().iter_mut().enumerate() {
            test.run(hooks);
            total_exec_time += test.exec_time();
            buckets.push(test.status(), index);
            observers.notify(test);
        }
        self.buckets = buckets;
        self.total_exec_time = total_exec_time;
        self.has_run = true;

        info!(
            passed = self.passed_count(),
            failed = self.failed_count(),
            skipped = self.skipped_count(),
            errors = self.with_error_count(),
            elapsed_ms = self.all_tests_exec_time_ms(),
            "scenario finished"
        );
        Ok(self)
    }

    // ========================================
    // Queries
    // ========================================

    pub fn has_run(&self) -> bool {
        self.has_run
    }

    pub fn label(&self) -> &str {
        self.registry.label()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Registered tests, whether or not the scenario ran.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn bucket(&self, status: Status) -> Vec<&Test> {
        self.buckets
            .get(status)
            .iter()
            .filter_map(|&index| self.registry.get(index))
            .collect()
    }

    pub fn passed_count(&self) -> usize {
        self.buckets.passed.len()
    }

    pub fn passed_tests(&self) -> Vec<&Test> {
        self.bucket(Status::Passed)
    }

    pub fn failed_count(&self) -> usize {
        self.buckets.failed.len()
    }

    pub fn failed_tests(&self) -> Vec<&Test> {
        self.bucket(Status::Failed)
    }

    pub fn skipped_count(&self) -> usize {
        self.buckets.skipped.len()
    }

    pub fn skipped_tests(&self) -> Vec<&Test> {
        self.bucket(Status::Skipped)
    }

    pub fn with_error_count(&self) -> usize {
        self.buckets.errors.len()
    }

    pub fn with_error_tests(&self) -> Vec<&Test> {
        self.bucket(Status::Error)
    }

    /// Count of tests in the bucket for `status`; zero for [`Status::None`].
    pub fn count(&self, status: Status) -> usize {
        self.buckets.get(status).len()
    }

    pub fn all_tests_count(&self) -> usize {
        if self.has_run { self.registry.len() } else { 0 }
    }

    pub fn all_tests(&self) -> &[Test] {
        if self.has_run { self.registry.tests() } else { &[] }
    }

    pub fn all_tests_exec_time(&self) -> Duration {
        self.total_exec_time
    }

    pub fn all_tests_exec_time_ms(&self) -> f64 {
        self.total_exec_time.as_secs_f64() * 1_000.0
    }

    /// `true` when any test failed or errored.
    pub fn has_failures(&self) -> bool {
        self.failed_count() + self.with_error_count() > 0
    }
}

impl fmt::Debug for RegistryManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryManager")
            .field("registry", &self.registry)
            .field("description", &self.description)
            .field("started", &self.started)
            .field("has_run", &self.has_run)
            .field("buckets", &self.buckets)
            .field("total_exec_time", &self.total_exec_time)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::{Cell, RefCell};

    use fasttests_assert::assert_that;

    use super::*;

    fn explode() {
        panic!("boom")
    }

    fn mixed() -> RegistryManager {
        let mut manager = RegistryManager::new("Mixed");
        manager
            .add_test("pass", || {})
            .unwrap()
            .add_test("fail", || {
                assert_that(1).is_equal_to(2);
            })
            .unwrap()
            .add_test("error", explode)
            .unwrap()
            .skip_test("skip", || {})
            .unwrap()
            .add_test("pass again", || {})
            .unwrap();
        manager
    }

    // ========================================
    // Before the run
    // ========================================

    #[test]
    fn test_queries_are_zero_before_run() {
        let manager = mixed();
        assert!(!manager.has_run());
        assert_eq!(manager.registry().len(), 5);
        assert_eq!(manager.all_tests_count(), 0);
        assert!(manager.all_tests().is_empty());
        for status in Status::TERMINAL {
            assert_eq!(manager.count(status), 0);
        }
        assert!(manager.passed_tests().is_empty());
        assert_eq!(manager.all_tests_exec_time(), Duration::ZERO);
        assert!(!manager.has_failures());
    }

    // ========================================
    // Running
    // ========================================

    #[test]
    fn test_buckets_after_run() {
        let mut manager = mixed();
        let manager = manager.run_tests().unwrap();
        assert_eq!(manager.all_tests_count(), 5);
        assert_eq!(manager.passed_count(), 2);
        assert_eq!(manager.failed_count(), 1);
        assert_eq!(manager.with_error_count(), 1);
        assert_eq!(manager.skipped_count(), 1);

        let passed: Vec<&str> = manager.passed_tests().iter().map(|t| t.label()).collect();
        assert_eq!(passed, ["pass", "pass again"]);
        assert_eq!(manager.failed_tests()[0].label(), "fail");
        assert_eq!(manager.with_error_tests()[0].error(), "boom");
        assert!(manager.has_failures());
    }

    #[test]
    fn test_empty_scenario_runs() {
        let mut manager = RegistryManager::new("Empty");
        let manager = manager.run_tests().unwrap();
        assert!(manager.has_run());
        assert_eq!(manager.all_tests_count(), 0);
        assert!(!manager.has_failures());
    }

    #[test]
    fn test_second_run_rejected_without_double_counting() {
        let mut manager = mixed();
        manager.run_tests().unwrap();
        let err = manager.run_tests().unwrap_err();
        assert_eq!(
            err,
            ScenarioError::AlreadyRun {
                scenario: "Mixed".to_string()
            }
        );
        assert_eq!(manager.passed_count(), 2);
        assert_eq!(manager.all_tests_count(), 5);
    }

    #[test]
    fn test_run_interrupted_by_observer_is_not_rerun() {
        let mut manager = RegistryManager::new("Interrupted");
        manager.add_test("a", || {}).unwrap().add_test("b", || {}).unwrap();
        let observer: Rc<dyn RegistryObserver> = Rc::new(|test: &Test| {
            if test.label() == "b" {
                panic!("observer gave up");
            }
        });
        manager.add_observer(observer);

        let interrupted = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            manager.run_tests().map(|_| ())
        }));
        assert!(interrupted.is_err());
        assert!(!manager.has_run());
        assert_eq!(manager.passed_count(), 0);

        assert!(matches!(manager.run_tests(), Err(ScenarioError::AlreadyRun { .. })));
        assert!(matches!(
            manager.add_test("late", || {}),
            Err(ScenarioError::RegistrationClosed { .. })
        ));
        assert_eq!(manager.passed_count(), 0);
        assert_eq!(manager.all_tests_count(), 0);
        assert_eq!(manager.registry().len(), 2);
    }

    #[test]
    fn test_registration_closed_after_run() {
        let mut manager = RegistryManager::new("Closed");
        manager.run_tests().unwrap();
        assert!(matches!(
            manager.add_test("late", || {}),
            Err(ScenarioError::RegistrationClosed { .. })
        ));
        assert!(manager.skip_test("late", || {}).is_err());
        assert!(manager.set_up(|| {}).is_err());
        assert!(manager.tear_down(|| {}).is_err());
        assert_eq!(manager.registry().len(), 0);
    }

    #[test]
    fn test_exec_time_accumulates() {
        let mut manager = RegistryManager::new("Timed");
        manager
            .add_test("sleepy", || std::thread::sleep(Duration::from_millis(2)))
            .unwrap();
        manager.run_tests().unwrap();
        assert!(manager.all_tests_exec_time() >= Duration::from_millis(2));
        assert_eq!(manager.all_tests_exec_time(), manager.all_tests()[0].exec_time());
    }

    #[test]
    fn test_hooks_run_per_test() {
        let set_ups = Rc::new(Cell::new(0));
        let counter = Rc::clone(&set_ups);
        let mut manager = RegistryManager::new("Hooked");
        manager
            .set_up(move || counter.set(counter.get() + 1))
            .unwrap()
            .add_test("a", || {})
            .unwrap()
            .add_test("b", || {})
            .unwrap()
            .skip_test("c", || {})
            .unwrap();
        manager.run_tests().unwrap();
        assert_eq!(set_ups.get(), 3);
    }

    // ========================================
    // Observers
    // ========================================

    #[test]
    fn test_observers_see_each_finished_test() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let observer: Rc<dyn RegistryObserver> =
            Rc::new(move |test: &Test| sink.borrow_mut().push((test.label().to_string(), test.status())));

        let mut manager = mixed();
        assert!(manager.add_observer(observer.clone()));
        assert!(!manager.add_observer(observer.clone()));
        manager.run_tests().unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 5);
        assert_eq!(seen[0], ("pass".to_string(), Status::Passed));
        assert_eq!(seen[2], ("error".to_string(), Status::Error));
        assert_eq!(seen[3], ("skip".to_string(), Status::Skipped));
    }

    #[test]
    fn test_removed_observer_is_not_notified() {
        let calls = Rc::new(Cell::new(0));
        let sink = Rc::clone(&calls);
        let observer: Rc<dyn RegistryObserver> = Rc::new(move |_: &Test| sink.set(sink.get() + 1));

        let mut manager = mixed();
        manager.add_observer(observer.clone());
        assert!(manager.remove_observer(&observer));
        assert_eq!(manager.observer_count(), 0);
        manager.run_tests().unwrap();
        assert_eq!(calls.get(), 0);
    }
}
