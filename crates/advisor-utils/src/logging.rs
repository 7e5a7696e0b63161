//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset: workspace crates at debug,
/// everything else at info.
const DEFAULT_FILTER: &str =
    "info,advisor_core=debug,advisor_tools=debug,advisor_decision=debug,advisor_sentiment=debug";

/// Initialize tracing subscriber with default configuration
///
/// Reads `RUST_LOG` when present. Panics if a global subscriber is
/// already installed; use [`try_init_tracing`] in tests.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Like [`init_tracing`], but ignores an already-installed subscriber
pub fn try_init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
