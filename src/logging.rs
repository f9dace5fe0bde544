use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over `verbosity` (the `-v` count).
/// Logs go to stderr so stdout carries only command output.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let local = match verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("warn,stsync={local}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
