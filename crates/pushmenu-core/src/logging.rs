#![forbid(unsafe_code)]

//! Structured logging support.
//!
//! With the `tracing` feature the usual macros are re-exported here (and at
//! the crate root). Without it this module is empty and the menu logs
//! nothing.
//!
//! `tracing-json` adds [`init_json_logging`], a one-call JSON subscriber for
//! hosts that want machine-readable logs (e.g. native test harnesses).

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, trace, warn};

/// Install a global JSON subscriber filtered by `RUST_LOG` (default
/// `pushmenu_core=info`).
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pushmenu_core=info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
