//! Logging facade.
//!
//! The navigator logs through these macros instead of calling a backend
//! directly, so applications pick the backend with a feature flag:
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! Enable at most one. With neither enabled every call compiles to nothing.
//! All records are emitted under the `suite_navigator` target so they can be
//! filtered as a unit (`RUST_LOG=suite_navigator=debug`).
//!
//! ```ignore
//! use suite_navigator::{debug_log, warn_log};
//!
//! debug_log!("dispatching '{}'", path);
//! warn_log!("history unavailable, navigating in memory");
//! ```

/// Target every navigator log record is emitted under.
pub const LOG_TARGET: &str = "suite_navigator";

/// Emit a **trace**-level record under [`LOG_TARGET`].
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::trace!(target: $crate::logging::LOG_TARGET, $($arg)*);
        #[cfg(feature = "log")]
        ::log::trace!(target: $crate::logging::LOG_TARGET, $($arg)*);
    }};
}

/// Emit a **debug**-level record under [`LOG_TARGET`].
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::debug!(target: $crate::logging::LOG_TARGET, $($arg)*);
        #[cfg(feature = "log")]
        ::log::debug!(target: $crate::logging::LOG_TARGET, $($arg)*);
    }};
}

/// Emit an **info**-level record under [`LOG_TARGET`].
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::info!(target: $crate::logging::LOG_TARGET, $($arg)*);
        #[cfg(feature = "log")]
        ::log::info!(target: $crate::logging::LOG_TARGET, $($arg)*);
    }};
}

/// Emit a **warn**-level record under [`LOG_TARGET`].
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::warn!(target: $crate::logging::LOG_TARGET, $($arg)*);
        #[cfg(feature = "log")]
        ::log::warn!(target: $crate::logging::LOG_TARGET, $($arg)*);
    }};
}

/// Emit an **error**-level record under [`LOG_TARGET`].
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::error!(target: $crate::logging::LOG_TARGET, $($arg)*);
        #[cfg(feature = "log")]
        ::log::error!(target: $crate::logging::LOG_TARGET, $($arg)*);
    }};
}
