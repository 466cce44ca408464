#![forbid(unsafe_code)]

//! Logging and tracing support.
//!
//! Re-exports the tracing macros when the `tracing` feature is enabled.
//! Without the feature, no-op macros with the same names are exported at the
//! crate root so call sites in this crate and in `voxshell-widgets` compile
//! unchanged.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace_span};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op trace_span macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

/// A no-op span for when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Enter the no-op span, consuming it (does nothing).
    #[must_use]
    pub fn entered(self) -> NoopGuard {
        NoopGuard
    }
}

/// A no-op span guard.
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopGuard;
