use clap::Subcommand;
use serde::Serialize;

pub mod cache;
pub mod retry;

use self::cache::CacheCommands;
use self::retry::RetryCommands;
use crate::scanner::Scanner;

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect and manage the barcode cache
    #[command(visible_alias = "c")]
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },

    /// Inspect and manage the failed-lookup retry queue
    #[command(visible_alias = "r")]
    Retry {
        #[command(subcommand)]
        command: RetryCommands,
    },
}

impl Commands {
    pub async fn execute(self, scanner: &Scanner) -> eyre::Result<()> {
        match self {
            Commands::Cache { command } => command.execute(scanner).await,
            Commands::Retry { command } => command.execute(scanner).await,
        }
    }
}

/// Write a JSON body to stdout; logs stay on stderr
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> eyre::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
