/// Installs a `tracing-subscriber` writer to stderr. Level is controlled by
/// `RUST_LOG`, defaulting to `warn` so a normal run is silent except for the
/// single `Error: …` line a failure produces.
pub fn init() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
