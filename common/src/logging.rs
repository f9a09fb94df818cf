//! Logging targets and the macros the binaries and libraries share.
//!
//! Everything forwards to [`tracing`]; the targets only tell a formatter
//! how to decorate a line.

/// Events on this target are rendered without any prefix.
pub const PRINT_TARGET: &str = "tagcrawl::print";

/// Events on this target mark a completed step.
pub const SUCCESS_TARGET: &str = "tagcrawl::success";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: $crate::logging::SUCCESS_TARGET, $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::tracing::error!($($arg)*)
    };
}
