//! Shared utilities: logging setup.

/// Initializes the tracing subscriber for logging.
///
/// Sets up an environment-filtered formatting layer; call once at the start
/// of an application. Filtering follows `RUST_LOG`.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
