//! Logger setup for the `maps_handler` binary.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Maps a `-v` count onto a level: info, then debug, then trace for every
/// toggled descriptor.
#[must_use]
pub const fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initializes the global logger.
///
/// `RUST_LOG` wins when set; otherwise only this crate logs, at the level
/// chosen by [`level_for`].
pub fn init(verbosity: u8) {
    let filter = format!("{}={}", env!("CARGO_CRATE_NAME"), level_for(verbosity));
    let mut builder = Builder::from_env(Env::default().default_filter_or(filter));

    // `try_init` only fails if a logger was already set, which tests do on
    // purpose.
    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
}
