//! Scanner control flow across the cache and the retry queue

use chrono::{TimeZone, Utc};
use scancache::commands::cache::CacheCommands;
use scancache::{Commands, Scanner};
use scancache_config::ScanCacheConfig;
use scancache_core::{FoodRecord, ManualClock, Result};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
}

#[tokio::test]
async fn test_miss_then_failure_then_resolution() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let clock = clock();
    let config = ScanCacheConfig::with_storage_dir(temp_dir.path());
    let scanner = Scanner::open(&config, Arc::new(clock.clone())).await?;

    // Miss, then the external lookup fails
    assert!(scanner.scan("042343370210").await?.is_none());
    scanner.failed("042343370210").await?;
    assert_eq!(
        scanner.retry().next_batch().await?,
        vec!["042343370210".to_string()]
    );

    // The retry fails too and is pushed back
    scanner.failed("042343370210").await?;
    assert!(scanner.retry().next_batch().await?.is_empty());
    clock.advance(Duration::from_secs(30));
    assert_eq!(scanner.retry().next_batch().await?.len(), 1);

    // The next attempt resolves the barcode
    let food = FoodRecord::new("Almond Butter").with_macros(6.0, 12.0, 16.0, 7.0);
    scanner.resolved("042343370210", &food).await?;

    let hit = scanner.scan("042343370210").await?.expect("cached after resolution");
    assert_eq!(hit.net_carbs, 6.0);
    assert!(!scanner.retry().contains("042343370210").await?);
    assert_eq!(scanner.retry().stats().await?.total, 0);
    Ok(())
}

#[tokio::test]
async fn test_state_survives_restart() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let clock = clock();
    let config = ScanCacheConfig::with_storage_dir(temp_dir.path());

    {
        let scanner = Scanner::open(&config, Arc::new(clock.clone())).await?;
        scanner
            .resolved("042343370210", &FoodRecord::new("Almond Butter"))
            .await?;
        scanner.failed("012345678905").await?;
    }

    let scanner = Scanner::open(&config, Arc::new(clock.clone())).await?;
    assert!(scanner.scan("042343370210").await?.is_some());
    assert!(scanner.retry().contains("012345678905").await?);
    Ok(())
}

#[tokio::test]
async fn test_disabled_scanner_touches_nothing() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let mut config = ScanCacheConfig::with_storage_dir(temp_dir.path());
    config.scan_cache_enabled = false;
    let scanner = Scanner::open(&config, Arc::new(clock())).await?;

    scanner
        .resolved("042343370210", &FoodRecord::new("Almond Butter"))
        .await?;
    assert!(scanner.failed("012345678905").await?.is_none());
    assert!(scanner.scan("042343370210").await?.is_none());

    let entries = std::fs::read_dir(temp_dir.path()).unwrap().count();
    assert_eq!(entries, 0);
    Ok(())
}

#[tokio::test]
async fn test_import_command_reports_bad_snapshot() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let config = ScanCacheConfig::with_storage_dir(temp_dir.path().join("store"));
    let scanner = Scanner::open(&config, Arc::new(clock())).await?;

    let file = temp_dir.path().join("export.json");
    std::fs::write(&file, b"[1, 2, 3]").unwrap();
    let err = Commands::Cache {
        command: CacheCommands::Import { file },
    }
    .execute(&scanner)
    .await
    .unwrap_err();
    assert!(err.to_string().contains("is not a cache snapshot"));

    let missing = temp_dir.path().join("missing.json");
    let err = Commands::Cache {
        command: CacheCommands::Import { file: missing },
    }
    .execute(&scanner)
    .await
    .unwrap_err();
    assert!(err.to_string().starts_with("failed to read"));
    assert_eq!(scanner.cache().stats().await?.total_entries, 0);
    Ok(())
}
