#![forbid(unsafe_code)]

//! Logging and tracing support.
//!
//! Re-exports the `tracing` event macros when the `tracing` feature is enabled.
//! Without the feature, no-op macros with the same names are exported at the
//! crate root so call sites compile unchanged. Both expand to `()`, so they are
//! valid in statement and expression position alike.

#[cfg(feature = "tracing")]
pub use tracing::{debug, error, info, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {
            ()
        };
    }

    /// No-op error macro when tracing is disabled.
    #[macro_export]
    macro_rules! error {
        ($($arg:tt)*) => {
            ()
        };
    }

    /// No-op info macro when tracing is disabled.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {
            ()
        };
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {
            ()
        };
    }

    /// No-op warn macro when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {
            ()
        };
    }
}
