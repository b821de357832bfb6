//! Per-scenario set-up and tear-down callables.

use std::fmt;

use super::test::{Body, IntoBodyResult, boxed_body};

/// The set-up/tear-down pair shared by every test of a scenario. Both default to no-ops.
pub struct Hooks {
    set_up: Body,
    tear_down: Body,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            set_up: boxed_body(|| {}),
            tear_down: boxed_body(|| {}),
        }
    }
}

impl Hooks {
    pub fn set_set_up<F, R>(&mut self, set_up: F)
    where
        F: FnMut() -> R + 'static,
        R: IntoBodyResult,
    {
        self.set_up = boxed_body(set_up);
    }

    pub fn set_tear_down<F, R>(&mut self, tear_down: F)
    where
        F: FnMut() -> R + 'static,
        R: IntoBodyResult,
    {
        self.tear_down = boxed_body(tear_down);
    }

    pub(crate) fn set_up_mut(&mut self) -> &mut Body {
        &mut self.set_up
    }

    pub(crate) fn tear_down_mut(&mut self) -> &mut Body {
        &mut self.tear_down
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks").finish_non_exhaustive()
    }
}
