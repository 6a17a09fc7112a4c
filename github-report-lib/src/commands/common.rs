//! Logging setup and color handling shared by the report command.

use crate::Result;
use camino::Utf8Path;
use chrono::Local;
use clap::ValueEnum;
use env_logger::{Builder, Env, Logger, Target};
use log::{LevelFilter, Log, Metadata, Record};
use ohno::IntoAppError;
use std::fs::File;
use std::io::{IsTerminal, Write, stdout};

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    #[must_use]
    pub fn use_colors(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => stdout().is_terminal(),
        }
    }
}

/// Console level for the given number of `-v` and `-q` flags, starting from info.
#[must_use]
pub fn console_level(verbose: u8, quiet: u8) -> LevelFilter {
    match 3 + i16::from(verbose) - i16::from(quiet) {
        i16::MIN..=0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialize logging to stderr and, optionally, to a file.
///
/// `RUST_LOG` overrides the console level. The file always receives debug output with timestamps.
/// Only the first call in a process installs a logger.
pub fn init_logging(verbose: u8, quiet: u8, log_file: Option<&Utf8Path>) -> Result<()> {
    let env = Env::default().filter_or("RUST_LOG", console_level(verbose, quiet).as_str());
    let console = Builder::from_env(env).format_module_path(false).build();

    let mut loggers = vec![console];

    if let Some(path) = log_file {
        let file = File::create(path).into_app_err_with(|| format!("creating log file '{path}'"))?;
        let file_logger = Builder::new()
            .filter_level(LevelFilter::Debug)
            .target(Target::Pipe(Box::new(file)))
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{} {:<8} {}",
                    Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                )
            })
            .build();
        loggers.push(file_logger);
    }

    let max_level = loggers.iter().map(Logger::filter).max().unwrap_or(LevelFilter::Off);
    if log::set_boxed_logger(Box::new(Tee { loggers })).is_ok() {
        log::set_max_level(max_level);
    }

    Ok(())
}

/// Hands every record to each logger whose filter accepts it.
struct Tee {
    loggers: Vec<Logger>,
}

impl Log for Tee {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.loggers.iter().any(|logger| logger.enabled(metadata))
    }

    fn log(&self, record: &Record<'_>) {
        for logger in &self.loggers {
            logger.log(record);
        }
    }

    fn flush(&self) {
        for logger in &self.loggers {
            logger.flush();
        }
    }
}
