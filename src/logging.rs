//! Process-wide logger construction.
//!
//! Initialisation is an explicit call made once from `main`; library code
//! only uses the `log` macros and never configures anything, so embedders
//! and tests stay free to install their own logger.

use env_logger::Env;

/// Initialise the global logger: timestamped, leveled lines on stderr,
/// filter taken from `RUST_LOG` with `info` as the default.
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}
