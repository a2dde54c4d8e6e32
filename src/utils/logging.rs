// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset. Verbose mode only opens up this
/// crate's own events; reqwest/hyper stay at `warn`.
fn default_directive(verbose: bool) -> String {
    if verbose {
        format!("warn,{}=debug", env!("CARGO_CRATE_NAME"))
    } else {
        "warn".to_string()
    }
}

/// Installs the global subscriber. Events go to stderr so they never
/// interleave with the question prompts on stdout.
pub fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Logging setup complete (verbose: {}).", verbose);
}
