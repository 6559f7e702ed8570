//! Log subscriber set-up for the `duckmix` binary.

use tracing_subscriber::EnvFilter;

/// Maps `-v` occurrences to a default filter directive.
///
/// Config warnings are rendered by the commands themselves, so the quiet
/// level only lets errors through.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs a stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows `-v`. Logs never go
/// to stdout so `--json` output stays parseable.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A second init (tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
