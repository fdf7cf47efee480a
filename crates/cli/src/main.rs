use clap::Parser;
use scancache::{Commands, Scanner};
use scancache_config::{ConfigLoader, ConfigOverrides};
use scancache_core::system_clock;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scancache")]
#[command(about = "Persistent barcode lookup cache and retry queue", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the cache and retry queue documents
    #[arg(long, global = true, value_name = "DIR")]
    storage_dir: Option<PathBuf>,

    /// Turn every cache and retry operation into a no-op
    #[arg(long, global = true)]
    disable_scan_cache: bool,

    /// Configuration file to load instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    scancache_utils::tracing::init("info")
        .map_err(|e| eyre::eyre!("failed to initialize logging: {e}"))?;

    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        storage_dir: cli.storage_dir,
        scan_cache_enabled: cli.disable_scan_cache.then_some(false),
        ..Default::default()
    };
    let mut loader = ConfigLoader::new().overrides(overrides);
    if let Some(path) = cli.config {
        loader = loader.config_file(path);
    }
    let config = loader.load().await?;

    let scanner = Scanner::open(&config, system_clock()).await?;
    cli.command.execute(&scanner).await
}
