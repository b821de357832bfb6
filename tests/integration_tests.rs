//! End-to-end tests of the registration and execution engine

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use fasttests::prelude::*;
use fasttests::{ColorChoice, ConsoleReporter, ReportConfig};

fn runtime_error(message: &str) {
    panic!("{message}")
}

/// The reference scenario: one test per outcome, with a skipped body that must never run.
fn reference_scenario(flag: &Rc<Cell<bool>>) -> RegistryManager {
    let mut manager = RegistryManager::new("Reference");
    let touched = Rc::clone(flag);
    manager
        .add_test("eq_pass", || {
            assert_that!(1).is_equal_to(1);
        })
        .unwrap()
        .add_test("eq_fail", || {
            assert_that!(1, "nope").is_equal_to(2);
        })
        .unwrap()
        .add_test("boom", || runtime_error("x"))
        .unwrap()
        .skip_test("skipped", move || touched.set(true))
        .unwrap();
    manager
}

#[test]
fn test_reference_scenario_outcomes() {
    let flag = Rc::new(Cell::new(false));
    let mut manager = reference_scenario(&flag);
    let manager = manager.run_tests().unwrap();

    let labels = |tests: Vec<&Test>| tests.iter().map(|t| t.label().to_string()).collect::<Vec<_>>();
    assert_eq!(labels(manager.passed_tests()), ["eq_pass"]);
    assert_eq!(labels(manager.failed_tests()), ["eq_fail"]);
    assert_eq!(labels(manager.with_error_tests()), ["boom"]);
    assert_eq!(labels(manager.skipped_tests()), ["skipped"]);

    assert!(manager.failed_tests()[0].failure_reason().contains("nope"));
    assert!(manager.with_error_tests()[0].error().contains('x'));
    assert!(!flag.get(), "skipped body must never run");
    assert_eq!(manager.all_tests_count(), 4);
}

#[test]
fn test_failure_reason_carries_location() {
    let flag = Rc::new(Cell::new(false));
    let mut manager = reference_scenario(&flag);
    let manager = manager.run_tests().unwrap();
    let reason = manager.failed_tests()[0].failure_reason();
    assert!(reason.starts_with("nope (tests/integration_tests.rs:"), "{reason}");
    assert!(reason.contains("[REACHED] 1"));
    assert!(reason.contains("[EXPECTED EQUAL TO] 2"));
}

#[test]
fn test_statuses_before_and_after_run() {
    let flag = Rc::new(Cell::new(false));
    let mut manager = reference_scenario(&flag);
    for test in manager.registry().tests() {
        assert_eq!(test.status(), Status::None);
        assert_eq!(test.exec_time_ms(), 0.0);
    }
    assert_eq!(manager.all_tests_count(), 0);
    assert_eq!(manager.failed_count() + manager.with_error_count(), 0);

    manager.run_tests().unwrap();
    assert!(manager.registry().tests().iter().all(|t| t.status().is_terminal()));
    assert!(manager.has_failures());
}

#[test]
fn test_observer_called_once_per_test_in_order() {
    let flag = Rc::new(Cell::new(false));
    let mut manager = reference_scenario(&flag);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    manager.add_observer(Rc::new(move |test: &Test| {
        assert!(test.status().is_terminal(), "observer sees finalized tests");
        sink.borrow_mut().push((test.label().to_string(), test.status()));
    }));
    manager.run_tests().unwrap();

    assert_eq!(
        *seen.borrow(),
        [
            ("eq_pass".to_string(), Status::Passed),
            ("eq_fail".to_string(), Status::Failed),
            ("boom".to_string(), Status::Error),
            ("skipped".to_string(), Status::Skipped),
        ]
    );
}

#[test]
fn test_observer_runs_before_next_test() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut manager = RegistryManager::new("Interleaved");
    for label in ["a", "b", "c"] {
        let log = Rc::clone(&order);
        manager
            .add_test(label, move || log.borrow_mut().push(format!("run {label}")))
            .unwrap();
    }
    let log = Rc::clone(&order);
    manager.add_observer(Rc::new(move |test: &Test| {
        log.borrow_mut().push(format!("saw {}", test.label()))
    }));
    manager.run_tests().unwrap();
    assert_eq!(*order.borrow(), ["run a", "saw a", "run b", "saw b", "run c", "saw c"]);
}

#[test]
fn test_second_run_is_rejected() {
    let flag = Rc::new(Cell::new(false));
    let mut manager = reference_scenario(&flag);
    manager.run_tests().unwrap();
    assert!(matches!(manager.run_tests(), Err(ScenarioError::AlreadyRun { .. })));
    assert_eq!(manager.all_tests_count(), 4);
    assert_eq!(manager.passed_count(), 1);
}

#[test]
fn test_report_of_reference_scenario() {
    let flag = Rc::new(Cell::new(false));
    let mut manager = reference_scenario(&flag);
    manager.run_tests().unwrap();
    let reporter = ConsoleReporter::new(
        ReportConfig::new()
            .with_color(ColorChoice::Never)
            .with_show_timings(false),
    );
    let output = reporter.render(&manager);
    assert!(output.contains("    PASSED: 1/4\n"));
    assert!(output.contains("    FAILED: 1/4\n        [eq_fail]\n        Message: nope"));
    assert!(output.contains("    SKIPPED: 1/4\n"));
    assert!(output.contains("    ERRORS: 1/4\n        [boom]\n        Message: x\n"));
    assert!(!output.contains("[eq_pass]"), "passed tests are only listed when verbose");
}
