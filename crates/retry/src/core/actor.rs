//! Actor loop and persistence for the retry queue

use crate::state::RetryState;
use scancache_core::{Error, Result, RetryRecord};
use scancache_utils::tracing::persistence_failed;
use scancache_utils::Loaded;
use tokio::sync::{mpsc, oneshot};

use super::types::{Command, RetryActor, RetryQueue, ENGINE};

impl RetryActor {
    pub(super) async fn run(mut self, mut rx: mpsc::Receiver<Command>) {
        if self.enabled {
            self.load().await;
        }

        while let Some(command) = rx.recv().await {
            self.dispatch(command).await;
        }

        tracing::debug!(records = self.state.len(), "retry queue actor stopped");
    }

    async fn dispatch(&mut self, command: Command) {
        match command {
            Command::AddFailed { barcode, reply } => {
                let record = self.add_failed(&barcode).await;
                let _ = reply.send(record);
            }
            Command::MarkSuccessful { barcode, reply } => {
                let removed = self.mark_successful(&barcode).await;
                let _ = reply.send(removed);
            }
            Command::Ready { max_items, reply } => {
                let _ = reply.send(self.ready(max_items));
            }
            Command::Get { barcode, reply } => {
                let _ = reply.send(self.state.get(&barcode).cloned());
            }
            Command::Contains { barcode, reply } => {
                let _ = reply.send(self.state.contains(&barcode));
            }
            Command::All { reply } => {
                let _ = reply.send(self.state.records().to_vec());
            }
            Command::Remove { barcode, reply } => {
                let removed = self.remove(&barcode).await;
                let _ = reply.send(removed);
            }
            Command::Clear { reply } => {
                self.clear().await;
                let _ = reply.send(());
            }
            Command::CleanupExpired { reply } => {
                let removed = self.cleanup_expired().await;
                let _ = reply.send(removed);
            }
            Command::Stats { reply } => {
                let stats = self.stats().await;
                let _ = reply.send(stats);
            }
        }
    }

    async fn load(&mut self) {
        let policy = self.state.policy().clone();
        match self.file.load::<Vec<RetryRecord>>().await {
            Loaded::Document(records) => {
                self.state = RetryState::from_records(policy, records);
                tracing::info!(
                    path = %self.file.path().display(),
                    records = self.state.len(),
                    "loaded retry queue"
                );
            }
            Loaded::Missing => {
                tracing::debug!(path = %self.file.path().display(), "no retry queue on disk");
            }
            Loaded::Corrupt(e) => {
                tracing::warn!(
                    path = %self.file.path().display(),
                    error = %e,
                    "retry queue unreadable, starting empty"
                );
            }
        }
    }

    pub(super) async fn persist(&self) {
        if let Err(e) = self.file.save(self.state.records()).await {
            persistence_failed(ENGINE, &e);
        }
    }
}

impl RetryQueue {
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
