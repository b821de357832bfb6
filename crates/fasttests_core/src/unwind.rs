//! Guarded regions for running user code.
//!
//! Panics raised inside [`catch`] are returned as payloads instead of tearing the runner down. While a guarded region
//! is active on a thread, the panic hook stays silent for that thread so failing tests don't spray backtraces over
//! the report. Other threads keep the previously installed hook.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

/// Panic payload type returned by [`catch`].
pub type Payload = Box<dyn Any + Send + 'static>;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

static INSTALL_HOOK: Once = Once::new();

fn install_quiet_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !is_guarded() {
                previous(info);
            }
        }));
    });
}

/// Whether the current thread is inside a guarded region.
pub fn is_guarded() -> bool {
    DEPTH.with(|depth| depth.get() > 0)
}

struct DepthGuard;

impl DepthGuard {
    fn enter() -> Self {
        DEPTH.with(|depth| depth.set(depth.get() + 1));
        DepthGuard
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Run `f`, returning the panic payload if it unwinds.
///
/// User callables are opaque, so unwind safety is asserted here: the runner never observes state a panicking body
/// may have left half-updated, it only records the outcome.
pub fn catch<R>(f: impl FnOnce() -> R) -> Result<R, Payload> {
    install_quiet_hook();
    let _guard = DepthGuard::enter();
    panic::catch_unwind(AssertUnwindSafe(f))
}

/// Text carried by a plain `panic!` payload, if any.
pub fn describe_payload(payload: &(dyn Any + Send)) -> Option<&str> {
    if let Some(text) = payload.downcast_ref::<&'static str>() {
        Some(text)
    } else if let Some(text) = payload.downcast_ref::<String>() {
        Some(text.as_str())
    } else {
        None
    }
}
