//! tierchat CLI

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};
pub use {
    chat::{Assistant, ChatCmd, Tier},
    config::{Config, dotenv_key, resolve_key},
    repl::{ChatRepl, Line},
    terminal::{TerminalRenderer, payload_text, table},
};

mod chat;
mod config;
mod repl;
mod terminal;

/// Three tiers of assistant planning a picnic in Seoul
#[derive(Debug, Parser)]
#[command(name = "tierchat", version, about)]
pub struct App {
    /// Verbosity level (use -v, -vv, -vvv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Chat with one of the assistants
    Chat(chat::ChatCmd),

    /// Generate the configuration file
    Generate,
}

impl App {
    /// Initialize tracing subscriber based on verbosity
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let directive = match self.verbose {
                0 => "info",
                1 => "tierchat=debug,tierchat_runtime=debug,tierchat_model=debug",
                2 => "tierchat=trace,tierchat_runtime=trace,tierchat_model=trace",
                3 => "debug",
                _ => "trace",
            };
            EnvFilter::new(directive)
        });

        fmt()
            .without_time()
            .with_env_filter(filter)
            .with_target(self.verbose != 0)
            .with_writer(std::io::stderr)
            .init();
    }
}
