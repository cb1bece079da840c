use tracing_subscriber::{EnvFilter, fmt};

/// Initialize logging to stdout.
///
/// `RUST_LOG` overrides the default `info` filter, e.g.
/// `RUST_LOG=mentor=debug` to see every prompt that is built.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();
}
