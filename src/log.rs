//! Console logging for mctnk.
//!
//! Info and debug messages go to stdout while warnings and errors go to stderr. Levels are
//! coloured only when the stream is a terminal.
use anyhow::{Result, anyhow};
use chrono::Local;
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::env;
use std::io::{IsTerminal, Write};
use std::sync::OnceLock;

static LOGGER_INIT: OnceLock<()> = OnceLock::new();

/// Log level used when neither `MCTNK_LOG_LEVEL` nor the settings file gives one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable which takes precedence over the settings file
const LOG_LEVEL_ENV_VAR: &str = "MCTNK_LOG_LEVEL";

/// Whether [`init`] has already run in this process
pub fn is_logger_initialised() -> bool {
    LOGGER_INIT.get().is_some()
}

/// Parse one of `off`, `error`, `warn`, `info`, `debug` or `trace`, ignoring case
fn parse_log_level(log_level: &str) -> Result<LevelFilter> {
    log_level
        .parse()
        .map_err(|_| anyhow!("Unknown log level: {log_level}"))
}

/// A dispatch writing `[HH:MM:SS LEVEL target] message` lines to `stream`
fn console_dispatch<W>(stream: W, colours: ColoredLevelConfig) -> Dispatch
where
    W: Write + IsTerminal + Send + 'static,
{
    let use_colour = stream.is_terminal();
    Dispatch::new()
        .format(move |out, message, record| {
            let timestamp = Local::now().format("%H:%M:%S");
            let target = record.target();
            if use_colour {
                let level = colours.color(record.level());
                out.finish(format_args!("[{timestamp} {level} {target}] {message}"));
            } else {
                let level = record.level();
                out.finish(format_args!("[{timestamp} {level} {target}] {message}"));
            }
        })
        .chain(Box::new(stream) as Box<dyn Write + Send>)
}

/// Install the program logger.
///
/// The level comes from `MCTNK_LOG_LEVEL` if set, otherwise from `log_level_from_settings`.
/// Fails if the level is not recognised or a logger is already installed.
pub fn init(log_level_from_settings: &str) -> Result<()> {
    let log_level = env::var(LOG_LEVEL_ENV_VAR).unwrap_or_else(|_| log_level_from_settings.into());
    let log_level = parse_log_level(&log_level)?;

    let colours = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);

    Dispatch::new()
        .chain(
            console_dispatch(std::io::stdout(), colours)
                .filter(|metadata| metadata.level() > LevelFilter::Warn)
                .level(log_level),
        )
        .chain(console_dispatch(std::io::stderr(), colours).level(log_level.min(LevelFilter::Warn)))
        .apply()?;

    LOGGER_INIT.set(()).unwrap();

    Ok(())
}
