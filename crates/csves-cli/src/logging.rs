//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! - `warn`: skipped rows, documents the index rejected
//! - `info`: detected delimiter, resolved schema, record totals
//! - `debug`: header mapping
//!
//! `RUST_LOG` overrides the level chosen from `-v`.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Map the `-v` count to a level: info, debug, then trace.
pub fn level_from_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber, writing to stderr.
pub fn init_logging(verbosity: u8) {
    let filter = build_env_filter(level_from_verbosity(verbosity));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Our crates log at `level`; everything else stays at warn.
fn build_env_filter(level: Level) -> EnvFilter {
    let level = level.as_str().to_lowercase();

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,csves={level},csves_cli={level}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_verbosity() {
        assert_eq!(level_from_verbosity(0), Level::INFO);
        assert_eq!(level_from_verbosity(1), Level::DEBUG);
        assert_eq!(level_from_verbosity(5), Level::TRACE);
    }
}
