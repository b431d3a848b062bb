//! folio: a terminal portfolio with a command palette and a floating
//! pseudo-terminal.
//!
//! The binary surface lives here so `main.rs` stays a thin shell that maps
//! [`CliError`] to an exit code.

pub mod config;
pub mod console;
pub mod effects;
pub mod ftui_harness;
pub mod logging;
pub mod markup;
pub mod page;
pub mod profile;
pub mod ui;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use serde_json::json;
use tracing::{debug, info};

use crate::config::{ConfigError, FolioConfig};
use crate::console::commands::CommandContext;
use crate::console::{FloatingCli, LineKind};
use crate::logging::{LogSink, Verbosity};
use crate::page::PageView;
use crate::ui::components::palette::PaletteState;

/// Width and height of the frame printed by `FOLIO_TUI_HEADLESS=1 folio tui`.
pub const HEADLESS_SIZE: (u16, u16) = (100, 30);

#[derive(Parser, Debug, Clone)]
#[command(
    name = "folio",
    version,
    about = "Terminal portfolio with a command palette and a floating pseudo-terminal"
)]
pub struct Cli {
    /// Config file (default: $FOLIO_CONFIG, then <config_dir>/folio/folio.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Machine-readable output for exec, palette and errors
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the interactive terminal UI (the default)
    Tui,
    /// Feed each line to a headless floating CLI and print the scrollback
    Exec {
        #[arg(value_name = "LINE", required = true)]
        lines: Vec<String>,
    },
    /// Print the palette entries matching a filter query
    Palette {
        #[arg(default_value = "")]
        query: String,
    },
    /// Print the effective configuration as TOML
    Config,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Generate a man page
    Man,
}

/// Error surfaced at the binary boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    pub code: i32,
    pub kind: &'static str,
    pub message: String,
    pub hint: Option<String>,
    pub retryable: bool,
}

impl CliError {
    fn usage(message: impl Into<String>) -> Self {
        Self {
            code: 2,
            kind: "usage",
            message: message.into(),
            hint: Some("run `folio --help` for usage".into()),
            retryable: false,
        }
    }

    fn runtime(kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            code: 9,
            kind,
            message: message.into(),
            hint: None,
            retryable: true,
        }
    }

    /// JSON envelope printed in `--json` mode.
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "error": {
                "code": self.code,
                "kind": self.kind,
                "message": self.message,
                "hint": self.hint,
                "retryable": self.retryable,
            }
        })
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self {
            code: 3,
            kind: "config",
            message: err.to_string(),
            hint: Some("fix the file or pass --config <PATH>".into()),
            retryable: false,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\nhint: {hint}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ParsedCli {
    pub cli: Cli,
}

/// Parse raw process arguments. Help and version output come back as a
/// `CliError` with code 0 and the rendered text as the message.
pub fn parse_cli(raw_args: Vec<String>) -> Result<ParsedCli, CliError> {
    match Cli::try_parse_from(raw_args) {
        Ok(cli) => Ok(ParsedCli { cli }),
        Err(err) => {
            use clap::error::ErrorKind;
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                return Err(CliError {
                    code: 0,
                    kind: "info",
                    message: err.render().to_string(),
                    hint: None,
                    retryable: false,
                });
            }
            Err(CliError::usage(err.render().to_string().trim_end()))
        }
    }
}

fn headless_requested() -> bool {
    dotenvy::var("FOLIO_TUI_HEADLESS")
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

pub fn run_with_parsed(parsed: ParsedCli) -> Result<(), CliError> {
    let cli = parsed.cli;
    let command = cli.command.clone().unwrap_or(Commands::Tui);
    let interactive = matches!(command, Commands::Tui) && !headless_requested();

    let sink = if interactive {
        LogSink::File(logging::default_log_dir())
    } else {
        LogSink::Stderr
    };
    let _log_guard = logging::init_subscriber(Verbosity::from_flags(cli.verbose, cli.quiet), sink);
    debug!(?command, json = cli.json, "dispatching");

    match command {
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "folio", &mut io::stdout());
            Ok(())
        }
        Commands::Man => {
            let man = clap_mangen::Man::new(Cli::command());
            man.render(&mut io::stdout())
                .map_err(|e| CliError::runtime("io", format!("failed to render man page: {e}")))
        }
        Commands::Palette { query } => {
            let config = FolioConfig::load(cli.config.as_deref())?;
            run_palette(&config, &query, cli.json)
        }
        Commands::Exec { lines } => {
            let config = FolioConfig::load(cli.config.as_deref())?;
            run_exec(&config, &lines, cli.json)
        }
        Commands::Config => {
            let config = FolioConfig::load(cli.config.as_deref())?;
            let text = config.to_toml()?;
            print_out(&text)
        }
        Commands::Tui => {
            let config = FolioConfig::load(cli.config.as_deref())?;
            if interactive {
                ui::app::run_tui(&config).map_err(|e| CliError::runtime("tui", e.to_string()))
            } else {
                let (w, h) = HEADLESS_SIZE;
                info!(width = w, height = h, "rendering headless frame");
                let frame = ui::app::render_headless(&config, w, h);
                print_out(&ftui_harness::normalize(
                    &frame,
                    ftui_harness::MatchMode::TrimTrailing,
                ))
            }
        }
    }
}

fn print_out(text: &str) -> Result<(), CliError> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", text.trim_end_matches('\n'))
        .map_err(|e| CliError::runtime("io", format!("failed to write output: {e}")))
}

fn run_exec(config: &FolioConfig, lines: &[String], json_out: bool) -> Result<(), CliError> {
    let mut cli = FloatingCli::quiet();
    cli.open();
    let mut page = PageView::new(&config.profile, &config.ui.hidden());
    let started = Instant::now();
    for line in lines {
        cli.set_input(line.as_str());
        let ctx = CommandContext::new(&config.profile, started.elapsed());
        cli.submit(&ctx, &mut page);
    }

    if json_out {
        let entries: Vec<serde_json::Value> = cli
            .output()
            .iter()
            .map(|l| {
                json!({
                    "kind": match l.kind {
                        LineKind::Echo => "echo",
                        LineKind::Output => "output",
                    },
                    "text": markup::to_plain(&l.markup),
                    "markup": l.markup,
                })
            })
            .collect();
        let payload = json!({
            "lines": entries,
            "open": cli.is_open(),
            "scroll_target": page.target(),
        });
        return print_out(&payload.to_string());
    }

    let text: Vec<String> = cli
        .output()
        .iter()
        .map(|l| markup::to_plain(&l.markup))
        .collect();
    if text.is_empty() {
        return Ok(());
    }
    print_out(&text.join("\n"))
}

fn run_palette(config: &FolioConfig, query: &str, json_out: bool) -> Result<(), CliError> {
    let mut palette = PaletteState::default();
    palette.set_query(query);
    if json_out {
        let entries: Vec<serde_json::Value> = palette
            .visible()
            .map(|e| {
                let target = match e.action.section() {
                    Some(id) => json!(format!("#{id}")),
                    None => match e.action {
                        ui::components::palette::ActionTag::Github => {
                            json!(config.profile.links.github)
                        }
                        _ => serde_json::Value::Null,
                    },
                };
                json!({ "id": e.id, "label": e.label, "hint": e.hint, "target": target })
            })
            .collect();
        let payload = json!({
            "query": query,
            "highlighted": palette.highlighted(),
            "entries": entries,
        });
        return print_out(&payload.to_string());
    }

    let rows: Vec<String> = palette
        .visible()
        .enumerate()
        .map(|(i, e)| {
            let marker = if Some(i) == palette.highlighted() { '>' } else { ' ' };
            format!("{marker} {:<20} {}", e.label, e.hint)
        })
        .collect();
    if rows.is_empty() {
        return print_out("No matching commands");
    }
    print_out(&rows.join("\n"))
}
