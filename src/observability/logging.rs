//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level at runtime
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Log level configurable via `RUST_LOG`, with a crate-scoped default

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter applied when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "wallet_gateway=info";

/// Initialize the tracing subscriber.
///
/// Idempotence is the caller's concern; this is called once from `main`.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
