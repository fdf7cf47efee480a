//! Retry queue handle, commands and actor state

use crate::state::RetryState;
use scancache_core::{RetryRecord, RetryStats, SharedClock};
use scancache_utils::JsonStore;
use tokio::sync::{mpsc, oneshot};

pub(crate) const ENGINE: &str = "retry queue";

/// Handle to the retry queue actor
#[derive(Clone)]
pub struct RetryQueue {
    pub(super) tx: mpsc::Sender<Command>,
    pub(super) enabled: bool,
    pub(super) max_attempts: u32,
}

impl std::fmt::Debug for RetryQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryQueue")
            .field("enabled", &self.enabled)
            .field("max_attempts", &self.max_attempts)
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

impl RetryQueue {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

pub(crate) enum Command {
    AddFailed {
        barcode: String,
        reply: oneshot::Sender<Option<RetryRecord>>,
    },
    MarkSuccessful {
        barcode: String,
        reply: oneshot::Sender<bool>,
    },
    Ready {
        max_items: usize,
        reply: oneshot::Sender<Vec<String>>,
    },
    Get {
        barcode: String,
        reply: oneshot::Sender<Option<RetryRecord>>,
    },
    Contains {
        barcode: String,
        reply: oneshot::Sender<bool>,
    },
    All {
        reply: oneshot::Sender<Vec<RetryRecord>>,
    },
    Remove {
        barcode: String,
        reply: oneshot::Sender<bool>,
    },
    Clear {
        reply: oneshot::Sender<()>,
    },
    CleanupExpired {
        reply: oneshot::Sender<usize>,
    },
    Stats {
        reply: oneshot::Sender<RetryStats>,
    },
}

pub(crate) struct RetryActor {
    pub state: RetryState,
    pub file: JsonStore,
    pub enabled: bool,
    pub clock: SharedClock,
}
