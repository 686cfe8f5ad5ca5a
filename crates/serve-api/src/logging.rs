use tracing_subscriber::EnvFilter;

pub fn init(log_level: &str, verbose: bool) {
    // Prefer explicit --log-level; allow RUST_LOG override.
    let directives = if verbose {
        format!("{log_level},serve_api=debug,tower_http=debug")
    } else {
        log_level.to_string()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
