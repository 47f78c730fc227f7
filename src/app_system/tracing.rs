/// Configure tracing once at application startup for the entire
/// process. All actors and spans use this configuration.
///
/// `RUST_LOG` controls verbosity:
///
/// ```bash
/// RUST_LOG=debug cargo run    # show debug logs
/// RUST_LOG=info cargo run     # show info logs only
/// RUST_LOG=bazaar::actors=debug cargo run
/// ```
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
