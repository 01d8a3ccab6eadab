//! Logger setup.
//!
//! Messages go to stderr as `[time LEVEL target] message`. The level defaults to `info` and can
//! be changed with the `LEARNGL_LOG` environment variable.

use log::LevelFilter;

/// Environment variable holding the log level.
pub const LOG_ENV: &str = "LEARNGL_LOG";

/// Parses a level name such as `debug` or `WARN`.
pub fn parse_level(value: &str) -> Option<LevelFilter> {
    value.trim().parse().ok()
}

/// The level requested through [`LOG_ENV`], or `info`.
pub fn level_from_env() -> LevelFilter {
    std::env::var(LOG_ENV)
        .ok()
        .and_then(|value| parse_level(&value))
        .unwrap_or(LevelFilter::Info)
}

/// Installs the global logger at the level from [`level_from_env`].
pub fn init() {
    init_with_level(level_from_env());
}

/// Installs the global logger. Later calls leave the first logger in place.
pub fn init_with_level(level: LevelFilter) {
    let result = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply();

    if result.is_err() {
        log::debug!("logger already installed");
    }
}
