//! Hot-path diagnostics for matching and assembly.
//!
//! Route compilation logs through `tracing` unconditionally, since it runs
//! once at startup. Matching and assembly run on every request, so their
//! diagnostics go through these macros instead. They expand to nothing
//! unless the `dev-log` feature is enabled, in which case they forward to
//! `tracing` at debug and trace level.
//!
//! # Usage
//!
//! ```bash
//! cargo test --features "dev-log"
//! ```
//!
//! ```rust
//! use rost_core::{debug_log, debug_trace};
//!
//! let name = "users";
//! debug_log!(route = %name, "route registered");
//! debug_trace!("trying route {}", name);
//! ```

/// Debug-level event, compiled out without `dev-log`.
#[macro_export]
#[cfg(feature = "dev-log")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::__tracing::debug!($($arg)*)
    };
}

#[macro_export]
#[cfg(not(feature = "dev-log"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

/// Trace-level event for step-by-step matching and assembly flow,
/// compiled out without `dev-log`.
#[macro_export]
#[cfg(feature = "dev-log")]
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        $crate::__tracing::trace!($($arg)*)
    };
}

#[macro_export]
#[cfg(not(feature = "dev-log"))]
macro_rules! debug_trace {
    ($($arg:tt)*) => {};
}
