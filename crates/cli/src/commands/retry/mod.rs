use crate::commands::print_json;
use crate::scanner::Scanner;
use clap::Subcommand;
use scancache_core::DEFAULT_READY_BATCH;

#[derive(Subcommand)]
pub enum RetryCommands {
    /// Record a failed lookup for a barcode
    Fail { barcode: String },
    /// Record a successful lookup, dropping the barcode from the queue
    Success { barcode: String },
    /// List barcodes due for another attempt
    Ready {
        /// Maximum number of barcodes to return
        #[arg(long, default_value_t = DEFAULT_READY_BATCH)]
        max_items: usize,
    },
    /// Print every queued record
    List,
    /// Remove records that have used up their attempts
    Cleanup,
    /// Clear the retry queue
    Clear,
    /// Show retry queue statistics
    Stats,
}

impl RetryCommands {
    pub async fn execute(self, scanner: &Scanner) -> eyre::Result<()> {
        let retry = scanner.retry();
        match self {
            RetryCommands::Fail { barcode } => {
                match scanner.failed(&barcode).await? {
                    Some(record) => {
                        tracing::info!(
                            "Queued {barcode} (attempts: {}, next retry: {})",
                            record.attempts,
                            record.next_retry_time.to_rfc3339()
                        );
                        print_json(&record)?;
                    }
                    None if retry.is_enabled() => {
                        tracing::info!("Retries exhausted for {barcode}, dropped from queue");
                    }
                    None => tracing::info!("Scan cache disabled, {barcode} not queued"),
                }
                Ok(())
            }
            RetryCommands::Success { barcode } => {
                if retry.mark_successful(&barcode).await? {
                    tracing::info!("✓ Removed {barcode} from retry queue");
                } else {
                    tracing::info!("{barcode} was not queued");
                }
                Ok(())
            }
            RetryCommands::Ready { max_items } => {
                let ready = retry.ready_for_retry(max_items).await?;
                print_json(&ready)
            }
            RetryCommands::List => {
                let items = retry.all_items().await?;
                print_json(&items)
            }
            RetryCommands::Cleanup => {
                let removed = retry.cleanup_expired().await?;
                tracing::info!("✓ Cleaned up {removed} expired records");
                Ok(())
            }
            RetryCommands::Clear => {
                retry.clear().await?;
                tracing::info!("✓ Retry queue cleared successfully");
                Ok(())
            }
            RetryCommands::Stats => {
                let stats = retry.stats().await?;
                tracing::info!("Retry Queue Statistics:");
                tracing::info!("  Total: {}", stats.total);
                tracing::info!("  Ready: {}", stats.ready_count);
                tracing::info!("  Pending: {}", stats.pending_count);
                tracing::info!("  Expired: {}", stats.expired_count);
                tracing::info!("  File size: {} bytes", stats.file_size_bytes);
                print_json(&stats)
            }
        }
    }
}
