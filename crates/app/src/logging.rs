use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber.
///
/// The filter comes from `LINGO_LOG`, then `RUST_LOG`, then `default_level`.
pub fn init_tracing(default_level: &str) {
    let env_filter = std::env::var("LINGO_LOG")
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
