//! Built-in scenarios exercising the assertion library and the scenario lifecycle.
//!
//! They all pass; the CLI runs them so an installation can check itself.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use fasttests_assert::assert_that;

use crate::catalog::{Catalog, CatalogError};
use crate::engine::{RegistryManager, ScenarioError};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Flag {
    value: bool,
}

#[derive(Debug)]
struct CustomError;

impl fmt::Display for CustomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("custom error")
    }
}

impl std::error::Error for CustomError {}

fn panic_with_custom_error() {
    std::panic::panic_any(CustomError)
}

fn fail_with_custom_error() -> Result<(), CustomError> {
    Err(CustomError)
}

crate::register_scenario! {
    /// Every verification of the assertion library, in its passing form.
    pub fn assertions("Assertions") {
        describe "every verification of the assertion library, in its passing form";

        test "equal within tolerance (f64)" => || {
            assert_that!(0.0_f64, "Expect 0. == 1e-5").is_equal_within(1e-5, 1e-5);
        };
        test "not equal within tolerance (f64)" => || {
            assert_that!(0.0_f64, "Expect 0. != 10e-5").is_not_equal_within(10e-5, 1e-5);
        };
        test "equal within tolerance (f32)" => || {
            assert_that!(0.0_f32, "Expect 0. == 1e-5").is_equal_within(1e-5, 1e-5);
        };
        test "not equal within tolerance (f32)" => || {
            assert_that!(0.0_f32, "Expect 0. != 10e-5").is_not_equal_within(10e-5, 1e-5);
        };
        test "equal text, case sensitive" => || {
            assert_that!("aaa").is_equal_to_text("aaa", false);
        };
        test "different text, case sensitive" => || {
            assert_that!("aaa").is_not_equal_to_text("aAa", false);
        };
        test "equal text, ignoring case" => || {
            assert_that!(String::from("aaa")).is_equal_to_text("aAa", true);
        };
        test "different text, ignoring case" => || {
            assert_that!(String::from("aaa")).is_not_equal_to_text("aAb", true);
        };
        test "custom equality" => || {
            assert_that!(Flag { value: true })
                .is_equal_to(Flag { value: true })
                .and_that(Flag { value: true })
                .is_not_equal_to(Flag { value: false });
        };
        test "identity" => || {
            let (a, b) = (0_u8, 0_u8);
            assert_that!(&a).is_same_as(&a).and_that(&a).is_not_same_as(&b);
        };
        test "nullness" => || {
            let a = 0_i32;
            assert_that!(std::ptr::null::<i32>())
                .is_null()
                .and_that(&a as *const i32)
                .is_not_null();
        };
        test "booleans" => || {
            assert_that!(true).is_true().and_that(false).is_false();
        };
        test "expected panic" => || {
            assert_that!(|| std::panic::panic_any(CustomError)).expect_panic::<CustomError>();
            assert_that!(panic_with_custom_error).expect_panic::<CustomError>();
        };
        test "expected error" => || {
            assert_that!(fail_with_custom_error).expect_error::<CustomError>();
        };
        test "body returning a result" => || -> Result<(), std::num::ParseIntError> {
            let parsed: i64 = "-17".parse()?;
            assert_that!(parsed).is_equal_to(-17);
            Ok(())
        };
    }
}

/// Set-up and tear-down around every test, with a skipped test in between.
pub fn lifecycle() -> Result<RegistryManager, ScenarioError> {
    let fixture = Rc::new(Cell::new(0_u32));
    let runs = Rc::new(Cell::new(0_u32));
    let mut manager = RegistryManager::new("Lifecycle")
        .with_description("set-up and tear-down bracket every test, skipped ones included");

    let (set_up_fixture, set_up_runs) = (Rc::clone(&fixture), Rc::clone(&runs));
    manager.set_up(move || {
        set_up_fixture.set(42);
        set_up_runs.set(set_up_runs.get() + 1);
    })?;
    let tear_down_fixture = Rc::clone(&fixture);
    manager.tear_down(move || tear_down_fixture.set(0))?;

    let first = Rc::clone(&fixture);
    manager.add_test("fixture is prepared", move || {
        assert_that!(first.get()).is_equal_to(42);
        first.set(7);
    })?;
    manager.skip_test_with_reason("covered by the tests around it", "never runs", || {
        assert_that!(()).because("skipped body ran").fail();
    })?;
    let (second, second_runs) = (Rc::clone(&fixture), Rc::clone(&runs));
    manager.add_test("fixture is prepared again", move || {
        assert_that!(second.get(), "set up runs before every test").is_equal_to(42);
        assert_that!(second_runs.get(), "skipped tests still run hooks").is_equal_to(3);
    })?;
    Ok(manager)
}

/// The catalogue run by the `fasttests` binary.
pub fn catalog() -> Result<Catalog, CatalogError> {
    let mut catalog = Catalog::new();
    catalog.register("assertions", assertions)?.register("lifecycle", lifecycle)?;
    Ok(catalog)
}
