//! Persistence, feature gate and policy tests

use super::{clock, open};
use crate::core::RetryQueue;
use chrono::Duration as TimeDelta;
use scancache_config::{RetryPolicy, ScanCacheConfig};
use scancache_core::{Clock, Result, RetryRecord, UPC_RETRY_QUEUE_FILENAME};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

#[tokio::test]
async fn test_queue_survives_reopen() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let clock = clock();

    let expected = {
        let queue = open(temp_dir.path(), &clock).await?;
        queue.add_failed_lookup("042343370210").await?;
        queue.add_failed_lookup("042343370210").await?;
        queue.add_failed_lookup("012345678905").await?;
        queue.all_items().await?
    };

    let reopened = open(temp_dir.path(), &clock).await?;
    assert_eq!(reopened.all_items().await?, expected);

    let record = reopened.get_item("042343370210").await?.expect("persisted record");
    assert_eq!(record.attempts, 1);
    Ok(())
}

#[tokio::test]
async fn test_file_format() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let clock = clock();
    let queue = open(temp_dir.path(), &clock).await?;
    queue.add_failed_lookup("042343370210").await?;

    let raw = std::fs::read_to_string(temp_dir.path().join(UPC_RETRY_QUEUE_FILENAME)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = &value.as_array().expect("json array")[0];
    assert_eq!(entry["upc"], "042343370210");
    assert_eq!(entry["attempts"], 0);
    assert_eq!(entry["nextRetryTime"], "2024-03-01T12:00:00Z");
    for key in ["id", "firstAttempt", "lastAttempt"] {
        assert!(entry.get(key).is_some(), "missing {key}");
    }
    Ok(())
}

#[tokio::test]
async fn test_load_resorts_records() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let clock = clock();
    let now = clock.now();

    let mut late = RetryRecord::first_failure("late", now);
    late.next_retry_time = now + TimeDelta::seconds(600);
    late.attempts = 2;
    let early = RetryRecord::first_failure("early", now);
    std::fs::write(
        temp_dir.path().join(UPC_RETRY_QUEUE_FILENAME),
        serde_json::to_vec(&vec![late, early]).unwrap(),
    )
    .unwrap();

    let queue = open(temp_dir.path(), &clock).await?;
    let order: Vec<_> = queue
        .all_items()
        .await?
        .into_iter()
        .map(|record| record.barcode)
        .collect();
    assert_eq!(order, vec!["early".to_string(), "late".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_corrupt_file_starts_empty() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let clock = clock();
    std::fs::write(temp_dir.path().join(UPC_RETRY_QUEUE_FILENAME), b"\x00\x01 not json").unwrap();

    let queue = open(temp_dir.path(), &clock).await?;
    assert!(queue.all_items().await?.is_empty());

    queue.add_failed_lookup("042343370210").await?;
    drop(queue);

    let reopened = open(temp_dir.path(), &clock).await?;
    assert!(reopened.contains("042343370210").await?);
    Ok(())
}

#[tokio::test]
async fn test_disabled_queue_is_inert() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let queue = RetryQueue::builder(temp_dir.path())
        .enabled(false)
        .open()
        .await?;
    assert!(!queue.is_enabled());

    assert!(queue.add_failed_lookup("042343370210").await?.is_none());
    assert!(queue.next_batch().await?.is_empty());
    assert!(!queue.contains("042343370210").await?);
    assert!(!queue.mark_successful("042343370210").await?);
    assert!(!queue.remove("042343370210").await?);
    queue.clear().await?;
    assert_eq!(queue.cleanup_expired().await?, 0);
    assert_eq!(queue.stats().await?, Default::default());

    assert!(!temp_dir.path().join(UPC_RETRY_QUEUE_FILENAME).exists());
    Ok(())
}

#[tokio::test]
async fn test_cleanup_expired_writes_only_on_change() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let clock = clock();
    let queue = open(temp_dir.path(), &clock).await?;
    let path = temp_dir.path().join(UPC_RETRY_QUEUE_FILENAME);

    for _ in 0..4 {
        queue.add_failed_lookup("expired").await?;
    }
    queue.add_failed_lookup("fresh").await?;

    assert_eq!(queue.cleanup_expired().await?, 1);
    let after_cleanup = std::fs::read(&path).unwrap();
    assert_eq!(queue.cleanup_expired().await?, 0);
    assert_eq!(std::fs::read(&path).unwrap(), after_cleanup);

    let remaining: Vec<_> = queue
        .all_items()
        .await?
        .into_iter()
        .map(|record| record.barcode)
        .collect();
    assert_eq!(remaining, vec!["fresh".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_custom_policy_from_config() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let clock = clock();
    let mut config = ScanCacheConfig::with_storage_dir(temp_dir.path());
    config.retry = RetryPolicy {
        max_attempts: 2,
        backoff_secs: vec![5],
    };

    let queue = RetryQueue::from_config(&config, Arc::new(clock.clone())).await?;
    assert_eq!(queue.max_attempts(), 2);

    queue.add_failed_lookup("A").await?;
    let first = queue.add_failed_lookup("A").await?.expect("rescheduled");
    assert_eq!(first.next_retry_time, clock.now() + TimeDelta::seconds(5));
    // The schedule's last step repeats once attempts run past it
    let second = queue.add_failed_lookup("A").await?.expect("rescheduled");
    assert_eq!(second.next_retry_time, clock.now() + TimeDelta::seconds(5));
    assert_eq!(second.attempts, 2);
    assert!(queue.add_failed_lookup("A").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_invalid_policy_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let err = RetryQueue::builder(temp_dir.path())
        .policy(RetryPolicy {
            max_attempts: 3,
            backoff_secs: Vec::new(),
        })
        .open()
        .await
        .unwrap_err();
    assert!(matches!(err, scancache_core::Error::Configuration { .. }));
}

#[tokio::test]
async fn test_concurrent_failures() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let clock = clock();
    let queue = open(temp_dir.path(), &clock).await?;

    let tasks = (0..9).map(|_| {
        let queue = queue.clone();
        async move { queue.add_failed_lookup("042343370210").await }
    });
    for result in futures::future::join_all(tasks).await {
        result?;
    }

    // Five failures run a full cycle ending in a drop; the next four leave it expired
    let items = queue.all_items().await?;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].attempts, 3);

    clock.advance(Duration::from_secs(1));
    assert!(queue.ready_for_retry(20).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_write_failure_keeps_memory_state() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let clock = clock();
    let queue = open(&blocker.join("sub"), &clock).await?;

    let record = queue.add_failed_lookup("042343370210").await?;
    assert_eq!(record.unwrap().attempts, 0);

    assert!(queue.get_item("042343370210").await?.is_some());
    let stats = queue.stats().await?;
    assert_eq!(stats.total, 1);
    assert_eq!(stats.ready_count, 1);
    Ok(())
}
