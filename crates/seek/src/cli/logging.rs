//! Diagnostic logging setup for the CLI.

use std::io;

use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "SEEK_LOG";

/// Level used when neither `-v` nor `SEEK_LOG` is given.
const DEFAULT_LEVEL: &str = "warn";

/// Installs a stderr subscriber.
///
/// `-v` and `-vv` select debug and trace for every target; otherwise `SEEK_LOG` is used,
/// falling back to warnings only.
pub fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL)),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    if let Err(e) = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init()
    {
        eprintln!("warning: could not install logger: {e}");
    }
}
