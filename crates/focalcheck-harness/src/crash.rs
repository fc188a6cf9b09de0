//! Expected-crash interception.
//!
//! Some focal methods guard their preconditions with assertions, and the
//! interesting test is that the guard fires. The call runs under
//! `catch_unwind`; a panic is the passing outcome and the run carries on.
//! The default panic hook still prints the message to stderr.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe, Location};

use crate::check::{CheckContext, Failure};

/// Text of a panic payload.
#[must_use]
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<String>() {
        return msg.clone();
    }
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        return (*msg).to_string();
    }
    "<non-string panic payload>".to_string()
}

/// Run `f`, turning a panic into `Err(message)`.
pub fn catch_crash<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| panic_message(payload.as_ref()))
}

/// Record a pass if `f` panics and a failure if it returns normally.
#[track_caller]
pub fn expect_crash<T>(ctx: &mut CheckContext, label: &str, f: impl FnOnce() -> T) -> bool {
    let caller = Location::caller();
    let crashed = catch_crash(f).is_err();
    ctx.check_with(crashed, || {
        Failure::new(caller.file(), caller.line(), format!("expect_crash({label})"))
            .with_values("panic", "normal return")
    })
}

/// Like [`expect_crash`], and the panic message must contain `fragment`.
#[track_caller]
pub fn expect_crash_with<T>(
    ctx: &mut CheckContext,
    label: &str,
    fragment: &str,
    f: impl FnOnce() -> T,
) -> bool {
    let caller = Location::caller();
    let (passed, actual) = match catch_crash(f) {
        Ok(_) => (false, "normal return".to_string()),
        Err(msg) => (msg.contains(fragment), format!("panic: {msg}")),
    };
    ctx.check_with(passed, || {
        Failure::new(caller.file(), caller.line(), format!("expect_crash({label})"))
            .with_values(format!("panic containing {fragment:?}"), actual)
    })
}
