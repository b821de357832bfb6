//! Command-line parsing and execution against custom catalogues

use clap::Parser;
use fasttests::cli::{Cli, ExitCode, execute_with};
use fasttests::prelude::*;
use fasttests::{Catalog, ColorChoice};

fn erroring() -> Result<RegistryManager, ScenarioError> {
    let mut manager = RegistryManager::new("Erroring");
    manager.add_test("returns an error", || -> Result<(), std::fmt::Error> { Err(std::fmt::Error) })?;
    Ok(manager)
}

fn passing() -> Result<RegistryManager, ScenarioError> {
    let mut manager = RegistryManager::new("Passing");
    manager
        .add_test("ok", || {
            assert_that!(true).is_true();
        })?
        .skip_test_with_reason("flaky on CI", "later", || {})?;
    Ok(manager)
}

fn catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.register("passing", passing).unwrap().register("erroring", erroring).unwrap();
    catalog
}

fn run(args: &[&str]) -> (ExitCode, String) {
    let cli = Cli::try_parse_from(std::iter::once("fasttests").chain(args.iter().copied())).unwrap();
    let mut out = Vec::<u8>::new();
    let code = execute_with(&cli, &catalog(), &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn test_color_values() {
    for (value, expected) in [("auto", ColorChoice::Auto), ("always", ColorChoice::Always), ("never", ColorChoice::Never)] {
        let cli = Cli::try_parse_from(["fasttests", "--color", value]).unwrap();
        assert_eq!(cli.color, expected);
    }
}

#[test]
fn test_passing_scenario_exits_zero() {
    let (code, output) = run(&["-s", "passing", "--color", "never", "--no-timings", "-v"]);
    assert_eq!(code, ExitCode::SUCCESS);
    insta::assert_snapshot!(output.trim_end(), @r"
    UNIT TEST SUMMARY [Passing] :
        PASSED: 1/2
            [ok]
        FAILED: 0/2
        SKIPPED: 1/2
            [later]
            Message: flaky on CI
        ERRORS: 0/2
    ");
}

#[test]
fn test_error_exits_one() {
    let (code, output) = run(&["--color", "never", "--no-timings"]);
    assert_eq!(code, ExitCode::FAILURE);
    assert!(output.contains("UNIT TEST SUMMARY [Passing] :"));
    assert!(output.contains("    ERRORS: 1/1\n        [returns an error]\n        Message: an error occurred when formatting an argument\n"));
}

#[test]
fn test_unknown_scenario_exits_two() {
    let cli = Cli::try_parse_from(["fasttests", "-s", "missing"]).unwrap();
    let mut out = Vec::<u8>::new();
    let err = execute_with(&cli, &catalog(), &mut out).unwrap_err();
    assert_eq!(err.exit_code, ExitCode::USAGE);
    assert_eq!(err.message, "Error: unknown scenario 'missing'");
}
