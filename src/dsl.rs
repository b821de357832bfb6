//! Declarative scenario registration.
//!
//! ```
//! use fasttests::prelude::*;
//!
//! fasttests::register_scenario! {
//!     pub fn arithmetic("Arithmetic") {
//!         describe "integer basics";
//!         test "addition" => || {
//!             assert_that!(1 + 1).is_equal_to(2);
//!         };
//!         skip "division" because "not written yet" => || {};
//!     }
//! }
//!
//! let mut scenario = arithmetic().unwrap();
//! assert_eq!(scenario.run_tests().unwrap().passed_count(), 1);
//! ```

/// Declare a factory function building a [`RegistryManager`](crate::RegistryManager).
///
/// Items, each terminated by `;`:
///
/// - `describe "text"`: sets the description shown under the scenario header in reports. It registers nothing
///   and may appear anywhere among the other items; the last one wins.
/// - `set_up => closure` / `tear_down => closure`
/// - `test "label" => closure` / `test => closure`
/// - `skip "label" => closure` / `skip "label" because "reason" => closure` / `skip => closure`
///
/// The generated function returns `Result<RegistryManager, ScenarioError>`.
#[macro_export]
macro_rules! register_scenario {
    ($(#[$meta:meta])* $vis:vis fn $name:ident($label:expr) { $($items:tt)* }) => {
        $(#[$meta])*
        $vis fn $name() -> ::std::result::Result<$crate::RegistryManager, $crate::ScenarioError> {
            let mut manager = $crate::RegistryManager::new($label);
            $crate::__scenario_items!(manager; $($items)*);
            ::std::result::Result::Ok(manager)
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __scenario_items {
    ($manager:ident;) => {};
    ($manager:ident; describe $text:expr; $($rest:tt)*) => {
        $manager.set_description($text);
        $crate::__scenario_items!($manager; $($rest)*);
    };
    ($manager:ident; set_up => $body:expr; $($rest:tt)*) => {
        $manager.set_up($body)?;
        $crate::__scenario_items!($manager; $($rest)*);
    };
    ($manager:ident; tear_down => $body:expr; $($rest:tt)*) => {
        $manager.tear_down($body)?;
        $crate::__scenario_items!($manager; $($rest)*);
    };
    ($manager:ident; test => $body:expr; $($rest:tt)*) => {
        $manager.add_unlabeled_test($body)?;
        $crate::__scenario_items!($manager; $($rest)*);
    };
    ($manager:ident; test $label:literal => $body:expr; $($rest:tt)*) => {
        $manager.add_test($label, $body)?;
        $crate::__scenario_items!($manager; $($rest)*);
    };
    ($manager:ident; skip => $body:expr; $($rest:tt)*) => {
        $manager.skip_unlabeled_test($body)?;
        $crate::__scenario_items!($manager; $($rest)*);
    };
    ($manager:ident; skip $label:literal because $reason:literal => $body:expr; $($rest:tt)*) => {
        $manager.skip_test_with_reason($reason, $label, $body)?;
        $crate::__scenario_items!($manager; $($rest)*);
    };
    ($manager:ident; skip $label:literal => $body:expr; $($rest:tt)*) => {
        $manager.skip_test($label, $body)?;
        $crate::__scenario_items!($manager; $($rest)*);
    };
}
