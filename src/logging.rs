//! Tracing subscriber initialization for the folio binary.
//!
//! # Priority (highest to lowest)
//!
//! 1. `FOLIO_LOG` env var (per-target directives, e.g. `folio_term=debug,warn`)
//! 2. `RUST_LOG` env var
//! 3. CLI flags (`-v` → debug, `-q` → error)
//! 4. Default level: `warn`
//!
//! The TUI owns the terminal, so it logs to a daily-rolling file under
//! `<data_dir>/folio/logs`. Every other subcommand logs to stderr.

use std::path::PathBuf;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Verbosity level derived from CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    /// If both flags are set, verbose wins.
    #[must_use]
    pub const fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    #[must_use]
    pub const fn default_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
        }
    }
}

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    /// Daily-rolling `folio.log.*` files in this directory.
    File(PathBuf),
}

/// `<data_dir>/folio/logs`, falling back to the temp dir.
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("folio")
        .join("logs")
}

/// Install the global subscriber. Keep the returned guard alive until exit so
/// buffered file output is flushed.
///
/// A second call is ignored (the first subscriber stays installed).
pub fn init_subscriber(verbosity: Verbosity, sink: LogSink) -> Option<WorkerGuard> {
    let filter = build_env_filter(verbosity);

    match sink {
        LogSink::Stderr => {
            let use_ansi = std::io::IsTerminal::is_terminal(&std::io::stderr())
                && dotenvy::var("NO_COLOR").is_err();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(use_ansi)
                .with_target(true)
                .without_time()
                .compact();
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init();
            None
        }
        LogSink::File(dir) => {
            if let Err(err) = std::fs::create_dir_all(&dir) {
                eprintln!("folio: cannot create log dir {}: {err}", dir.display());
                return None;
            }
            let appender = tracing_appender::rolling::daily(&dir, "folio.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let fmt_layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init();
            Some(guard)
        }
    }
}

/// `FOLIO_LOG` > `RUST_LOG` > CLI verbosity default.
fn build_env_filter(verbosity: Verbosity) -> EnvFilter {
    // Unparseable values fall through rather than failing.
    if let Ok(directives) = dotenvy::var("FOLIO_LOG")
        && let Ok(filter) = EnvFilter::try_new(&directives)
    {
        return filter;
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let level = verbosity.default_level();
    let directive = if verbosity == Verbosity::Verbose {
        format!("{level},folio_term=debug")
    } else {
        level.to_string()
    };

    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}
