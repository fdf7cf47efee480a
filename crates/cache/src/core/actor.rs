//! Actor loop and persistence for the UPC cache

use crate::eviction::LruEntries;
use crate::serialization::{self, CacheDocument};
use scancache_core::{Error, Result};
use scancache_utils::tracing::persistence_failed;
use scancache_utils::Loaded;
use tokio::sync::{mpsc, oneshot};

use super::types::{CacheActor, Command, UpcCache, ENGINE};

impl CacheActor {
    /// Load the backing document, then serve commands until every handle is dropped
    pub(super) async fn run(mut self, mut rx: mpsc::Receiver<Command>) {
        if self.enabled {
            self.load().await;
        }

        while let Some(command) = rx.recv().await {
            self.dispatch(command).await;
        }

        tracing::debug!(entries = self.entries.len(), "upc cache actor stopped");
    }

    async fn dispatch(&mut self, command: Command) {
        // A caller that stopped waiting does not cancel the work
        match command {
            Command::Lookup { barcode, reply } => {
                let _ = reply.send(self.lookup(&barcode));
            }
            Command::Store {
                barcode,
                food,
                reply,
            } => {
                self.store(barcode, &food).await;
                let _ = reply.send(());
            }
            Command::BatchUpdate { foods, reply } => {
                let stored = self.batch_update(foods).await;
                let _ = reply.send(stored);
            }
            Command::Remove { barcode, reply } => {
                let removed = self.remove(&barcode).await;
                let _ = reply.send(removed);
            }
            Command::Clear { reply } => {
                self.clear().await;
                let _ = reply.send(());
            }
            Command::Contains { barcode, reply } => {
                let _ = reply.send(self.enabled && self.entries.contains(&barcode));
            }
            Command::Export { reply } => {
                let _ = reply.send(self.export());
            }
            Command::Import { blob, reply } => {
                let result = self.import(&blob).await;
                let _ = reply.send(result);
            }
            Command::Stats { reply } => {
                let stats = self.stats().await;
                let _ = reply.send(stats);
            }
        }
    }

    async fn load(&mut self) {
        let capacity = self.entries.capacity();
        match self.file.load::<CacheDocument>().await {
            Loaded::Document(document) => {
                let document = serialization::normalize(document);
                let on_disk = document.len();
                self.entries = LruEntries::from_records(capacity, document.into_values());
                tracing::info!(
                    path = %self.file.path().display(),
                    entries = self.entries.len(),
                    dropped = on_disk - self.entries.len(),
                    "loaded upc cache"
                );
            }
            Loaded::Missing => {
                tracing::debug!(path = %self.file.path().display(), "no upc cache on disk");
            }
            Loaded::Corrupt(e) => {
                tracing::warn!(
                    path = %self.file.path().display(),
                    error = %e,
                    "upc cache unreadable, starting empty"
                );
            }
        }
    }

    /// Write the full map; failures are logged and in-memory state stays authoritative
    pub(super) async fn persist(&self) {
        if let Err(e) = self.file.save(&self.entries.to_document()).await {
            persistence_failed(ENGINE, &e);
        }
    }

    /// Trim to capacity after a mutating batch
    pub(super) fn evict(&mut self) {
        let evicted = self.entries.evict_overflow();
        if !evicted.is_empty() {
            tracing::debug!(
                evicted = evicted.len(),
                capacity = self.entries.capacity(),
                "evicted least recently used entries"
            );
        }
    }
}

impl UpcCache {
    /// Send a command and wait for the actor's reply
    pub(super) async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(command(reply))
            .await
            .map_err(|_| Error::engine_stopped(ENGINE))?;
        response.await.map_err(|_| Error::engine_stopped(ENGINE))
    }
}
