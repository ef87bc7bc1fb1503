use tracing_subscriber::EnvFilter;

/// Send log output to stderr so reports on stdout stay clean for piping.
///
/// `RUST_LOG` wins when set; otherwise only warnings show unless `verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "formulanein=debug" } else { "formulanein=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
