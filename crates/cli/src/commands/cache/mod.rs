use crate::commands::print_json;
use crate::scanner::Scanner;
use clap::Subcommand;
use eyre::WrapErr;
use scancache_core::FoodRecord;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Print the cached record for a barcode
    Lookup { barcode: String },
    /// Store a resolved lookup; also clears any pending retry for the barcode
    Store {
        barcode: String,
        /// File holding the food record as JSON
        #[arg(long, value_name = "FILE")]
        food_json: PathBuf,
    },
    /// Remove a single barcode
    Remove { barcode: String },
    /// Clear all cache entries
    Clear,
    /// Show cache statistics
    Stats,
    /// Write the cache document to a file
    Export { file: PathBuf },
    /// Merge a previously exported document into the cache
    Import { file: PathBuf },
}

impl CacheCommands {
    pub async fn execute(self, scanner: &Scanner) -> eyre::Result<()> {
        let cache = scanner.cache();
        match self {
            CacheCommands::Lookup { barcode } => {
                match scanner.scan(&barcode).await? {
                    Some(record) => print_json(&record)?,
                    None => tracing::info!("No cached record for {barcode}"),
                }
                Ok(())
            }
            CacheCommands::Store { barcode, food_json } => {
                let bytes = tokio::fs::read(&food_json)
                    .await
                    .wrap_err_with(|| format!("failed to read {}", food_json.display()))?;
                let food: FoodRecord = serde_json::from_slice(&bytes)
                    .wrap_err_with(|| format!("{} is not a food record", food_json.display()))?;
                scanner.resolved(&barcode, &food).await?;
                tracing::info!("✓ Stored {} under {barcode}", food.name);
                Ok(())
            }
            CacheCommands::Remove { barcode } => {
                if cache.remove(&barcode).await? {
                    tracing::info!("✓ Removed {barcode}");
                } else {
                    tracing::info!("{barcode} was not cached");
                }
                Ok(())
            }
            CacheCommands::Clear => {
                cache.clear().await?;
                tracing::info!("✓ Cache cleared successfully");
                Ok(())
            }
            CacheCommands::Stats => {
                let stats = cache.stats().await?;
                tracing::info!("Cache Statistics:");
                tracing::info!("  Entries: {} / {}", stats.total_entries, cache.capacity());
                if let (Some(oldest), Some(newest)) = (stats.oldest_entry, stats.newest_entry) {
                    tracing::info!("  Oldest: {}", oldest.to_rfc3339());
                    tracing::info!("  Newest: {}", newest.to_rfc3339());
                }
                tracing::info!("  File size: {} bytes", stats.file_size_bytes);
                print_json(&stats)
            }
            CacheCommands::Export { file } => {
                let blob = cache.export_snapshot().await?;
                scancache_utils::write_atomic(&file, &blob).await?;
                tracing::info!("✓ Exported cache to {}", file.display());
                Ok(())
            }
            CacheCommands::Import { file } => {
                let blob = tokio::fs::read(&file)
                    .await
                    .wrap_err_with(|| format!("failed to read {}", file.display()))?;
                let imported = cache.import_snapshot(blob).await.map_err(|e| {
                    if e.is_decode() {
                        eyre::eyre!("{} is not a cache snapshot: {e}", file.display())
                    } else {
                        eyre::Report::new(e)
                            .wrap_err(format!("failed to import {}", file.display()))
                    }
                })?;
                tracing::info!("✓ Imported {imported} records");
                Ok(())
            }
        }
    }
}
