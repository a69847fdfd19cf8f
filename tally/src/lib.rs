use crate::clipboard::{ClipboardSink, SystemClipboard};
use crate::config::{CONFIG_FILE, Config};
use crate::repl::Repl;
use anyhow::{Result, bail};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tally_core::{Clock, SystemClock};
use tracing::{debug, info};

pub mod clipboard;
pub mod config;
pub mod environment;
pub mod errors;
pub mod repl;
pub mod terminal;
pub mod time_input;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the xdg config dir
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write diagnostics to this file instead of the xdg state dir
    #[arg(long)]
    pub debug_log: Option<PathBuf>,
}

pub fn load_config(cli: &Cli) -> Config {
    match cli.config.as_deref() {
        Some(path) => Config::from_path(path),
        None => Config::from_file(CONFIG_FILE),
    }
}

/// Text printed after the UI closes so the session's results survive it.
pub fn session_report<C: Clock, K: ClipboardSink>(repl: &Repl<C, K>) -> Option<String> {
    let log = repl.session.log();
    if log.is_empty() {
        return None;
    }
    Some(format!("{}\n{}", repl.summary(), log.export()))
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli);
    debug!("config {:?}", config);

    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        bail!("an interactive terminal is required");
    }

    let mut repl = Repl::new(&config, SystemClock, SystemClipboard::default());
    info!("session started");
    repl.run_interactive().await?;
    info!("session finished");

    if config.print_log_on_exit
        && let Some(report) = session_report(&repl)
    {
        println!("{report}");
    }
    Ok(())
}
