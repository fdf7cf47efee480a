//! Basic retry queue operation tests

use super::{clock, open};
use scancache_core::{Clock, Result, UPC_RETRY_QUEUE_FILENAME};
use std::time::Duration;
use tempfile::TempDir;

#[tokio::test]
async fn test_first_failure_registers_ready_record() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let clock = clock();
    let queue = open(temp_dir.path(), &clock).await?;

    let record = queue
        .add_failed_lookup("042343370210")
        .await?
        .expect("registered record");
    assert_eq!(record.attempts, 0);
    assert_eq!(record.next_retry_time, clock.now());

    assert!(queue.contains("042343370210").await?);
    assert_eq!(queue.next_batch().await?, vec!["042343370210".to_string()]);
    assert!(temp_dir.path().join(UPC_RETRY_QUEUE_FILENAME).exists());
    Ok(())
}

#[tokio::test]
async fn test_backoff_schedule() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let clock = clock();
    let queue = open(temp_dir.path(), &clock).await?;
    queue.add_failed_lookup("042343370210").await?;

    for (attempts, delay) in [(1, 30u64), (2, 120), (3, 600)] {
        clock.advance(Duration::from_secs(5));
        let failed_at = clock.now();
        let record = queue
            .add_failed_lookup("042343370210")
            .await?
            .expect("rescheduled record");
        assert_eq!(record.attempts, attempts);
        assert_eq!(record.last_attempt, failed_at);
        assert_eq!(
            record.next_retry_time,
            failed_at + chrono::Duration::seconds(delay as i64)
        );
    }

    // Expired records are never handed out
    clock.advance(Duration::from_secs(3600));
    assert!(queue.ready_for_retry(20).await?.is_empty());
    assert_eq!(queue.stats().await?.expired_count, 1);

    // One more failure drops the barcode
    assert!(queue.add_failed_lookup("042343370210").await?.is_none());
    assert!(!queue.contains("042343370210").await?);
    Ok(())
}

#[tokio::test]
async fn test_ready_waits_for_backoff() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let clock = clock();
    let queue = open(temp_dir.path(), &clock).await?;

    queue.add_failed_lookup("042343370210").await?;
    queue.add_failed_lookup("042343370210").await?;
    assert!(queue.ready_for_retry(20).await?.is_empty());

    clock.advance(Duration::from_secs(29));
    assert!(queue.ready_for_retry(20).await?.is_empty());

    clock.advance(Duration::from_secs(1));
    assert_eq!(queue.ready_for_retry(20).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_ready_limit_and_order() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let clock = clock();
    let queue = open(temp_dir.path(), &clock).await?;

    for i in 0..30 {
        queue.add_failed_lookup(&format!("{i:012}")).await?;
        clock.advance(Duration::from_secs(1));
    }

    let batch = queue.next_batch().await?;
    assert_eq!(batch.len(), 20);
    assert_eq!(batch[0], format!("{:012}", 0));
    assert_eq!(batch[19], format!("{:012}", 19));
    assert_eq!(queue.ready_for_retry(5).await?.len(), 5);
    Ok(())
}

#[tokio::test]
async fn test_mark_successful() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let clock = clock();
    let queue = open(temp_dir.path(), &clock).await?;

    queue.add_failed_lookup("042343370210").await?;
    assert!(queue.mark_successful("042343370210").await?);
    assert!(queue.get_item("042343370210").await?.is_none());

    let reopened = open(temp_dir.path(), &clock).await?;
    assert!(reopened.all_items().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_mark_successful_absent_is_noop() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let clock = clock();
    let queue = open(temp_dir.path(), &clock).await?;

    assert!(!queue.mark_successful("042343370210").await?);
    assert!(!temp_dir.path().join(UPC_RETRY_QUEUE_FILENAME).exists());

    queue.add_failed_lookup("012345678905").await?;
    let before = std::fs::read(temp_dir.path().join(UPC_RETRY_QUEUE_FILENAME)).unwrap();
    assert!(!queue.mark_successful("042343370210").await?);
    let after = std::fs::read(temp_dir.path().join(UPC_RETRY_QUEUE_FILENAME)).unwrap();
    assert_eq!(before, after);
    assert_eq!(queue.all_items().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_remove_and_clear() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let clock = clock();
    let queue = open(temp_dir.path(), &clock).await?;

    queue.add_failed_lookup("A").await?;
    queue.add_failed_lookup("B").await?;
    assert!(queue.remove("A").await?);
    assert!(!queue.remove("A").await?);

    queue.clear().await?;
    assert!(queue.all_items().await?.is_empty());
    let on_disk = std::fs::read_to_string(temp_dir.path().join(UPC_RETRY_QUEUE_FILENAME)).unwrap();
    assert_eq!(on_disk.trim(), "[]");
    Ok(())
}

#[tokio::test]
async fn test_stats() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let clock = clock();
    let queue = open(temp_dir.path(), &clock).await?;

    assert_eq!(queue.stats().await?, Default::default());

    queue.add_failed_lookup("ready").await?;
    queue.add_failed_lookup("pending").await?;
    queue.add_failed_lookup("pending").await?;

    let stats = queue.stats().await?;
    assert_eq!(stats.total, 2);
    assert_eq!(stats.ready_count, 1);
    assert_eq!(stats.pending_count, 1);
    assert_eq!(stats.expired_count, 0);
    assert!(stats.file_size_bytes > 0);

    clock.advance(Duration::from_secs(30));
    assert_eq!(queue.stats().await?.ready_count, 2);
    Ok(())
}
