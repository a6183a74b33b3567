#![allow(dead_code)]
#![macro_use]

//! Logging shims. Expand to `log` calls only with the `logging` feature, so the
//! container has no runtime dependency by default.

/// Target used for allocation, relocation and release of element buffers.
pub const BUFFER_TARGET: &str = "dynvec::buffer";

macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::debug!(target: $target, $($arg)+);
    );
    ($($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::debug!(target: crate::logging::BUFFER_TARGET, $($arg)+);
    )
}

macro_rules! trace {
    (target: $target:expr, $($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::trace!(target: $target, $($arg)+);
    );
    ($($arg:tt)+) => (
        #[cfg(feature = "logging")]
        log::trace!(target: crate::logging::BUFFER_TARGET, $($arg)+);
    )
}
