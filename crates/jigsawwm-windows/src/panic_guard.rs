//! Panic boundary for user-supplied callbacks (§7.1).
//!
//! `SendFn` actions, hotkey actions, and task/service closures all run
//! on the daemon's UI thread, inline with the scheduler that invoked
//! them. A panic inside one must not unwind past the point it was
//! invoked — doing so would tear down the daemon's main loop (and, if
//! reached from a hook callback, the OS hook chain itself). Every such
//! call site wraps the callback in [`guard`] instead, mirroring the
//! teacher's pattern of converting failures to a logged-and-ignored
//! outcome (`frame.rs`'s `let _ = ...`), generalized from Win32
//! `Result`s to Rust panics from user code.

use std::panic::{self, AssertUnwindSafe};

/// Runs `f`, catching any panic and logging it instead of propagating.
pub fn guard(label: &str, f: impl FnOnce()) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(f)) {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        jigsawwm_core::log_error!("panic in {label}: {message}");
    }
}
