//! Sync orchestration: at most one in-flight sync, status reporting, and
//! remote-wins reconciliation into the local store.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use quotesync_core::MergeSummary;
use quotesync_remote::{RemoteAck, RemoteSource};
use quotesync_storage::QuoteStore;
use tokio::sync::{Mutex, broadcast};

use crate::ServiceError;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Whether a sync is currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Syncing,
}

/// Status notifications broadcast to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    Started,
    /// Carries the refreshed category list so dependent views can redraw.
    Completed { summary: MergeSummary, categories: Vec<String> },
    Failed { reason: String },
}

impl SyncEvent {
    /// One-line status text shown to the user.
    #[must_use]
    pub fn status_line(&self) -> String {
        match self {
            Self::Started => "Syncing…".to_owned(),
            Self::Completed { summary, .. } => format!("Synced: {summary}"),
            Self::Failed { reason } => format!("Sync failed: {reason}"),
        }
    }
}

impl fmt::Display for SyncEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status_line())
    }
}

/// What a sync trigger ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Another sync was already running; nothing happened.
    Skipped,
    Completed(MergeSummary),
    Failed(String),
}

/// Flips the syncing flag back to idle when dropped, on every exit path.
struct SyncGuard<'a>(&'a AtomicBool);

impl<'a> SyncGuard<'a> {
    fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).ok()?;
        Some(Self(flag))
    }
}

impl Drop for SyncGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct SyncService {
    store: Arc<Mutex<QuoteStore>>,
    remote: Arc<dyn RemoteSource>,
    fetch_limit: usize,
    syncing: AtomicBool,
    event_tx: broadcast::Sender<SyncEvent>,
}

impl SyncService {
    #[must_use]
    pub fn new(
        store: Arc<Mutex<QuoteStore>>,
        remote: Arc<dyn RemoteSource>,
        fetch_limit: usize,
    ) -> Self {
        let (event_tx, _initial_rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { store, remote, fetch_limit, syncing: AtomicBool::new(false), event_tx }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.event_tx.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> SyncState {
        if self.syncing.load(Ordering::Acquire) { SyncState::Syncing } else { SyncState::Idle }
    }

    /// Runs one sync unless one is already in flight.
    ///
    /// Never returns an error: failures are reported through the event channel
    /// and the outcome, and leave the store at its last good state.
    pub async fn sync_now(&self) -> SyncOutcome {
        let Some(_guard) = SyncGuard::try_acquire(&self.syncing) else {
            tracing::debug!("sync already in progress, ignoring trigger");
            return SyncOutcome::Skipped;
        };

        self.emit(SyncEvent::Started);
        match self.reconcile().await {
            Ok((summary, categories)) => {
                tracing::info!(
                    added = summary.added,
                    replaced = summary.replaced,
                    conflicts = summary.conflicts,
                    "sync completed"
                );
                self.emit(SyncEvent::Completed { summary, categories });
                SyncOutcome::Completed(summary)
            },
            Err(e) => {
                if e.is_transient() {
                    tracing::warn!(error = %e, "sync failed, will retry on next trigger");
                } else {
                    tracing::warn!(error = %e, "sync failed");
                }
                let reason = e.to_string();
                self.emit(SyncEvent::Failed { reason: reason.clone() });
                SyncOutcome::Failed(reason)
            },
        }
    }

    // The store lock is taken only after the fetch resolves, so local edits
    // made while the request is in flight are merged against, not lost.
    async fn reconcile(&self) -> Result<(MergeSummary, Vec<String>), ServiceError> {
        let remote = self.remote.fetch_remote(self.fetch_limit).await?;
        let mut store = self.store.lock().await;
        let summary = store.apply_merge(remote)?;
        Ok((summary, store.categories()))
    }

    /// Pushes every local record to the remote; does not modify the store.
    pub async fn push_now(&self) -> Vec<RemoteAck> {
        let records = self.store.lock().await.records().to_vec();
        self.remote.push_local(&records).await
    }

    fn emit(&self, event: SyncEvent) {
        tracing::debug!(status = %event.status_line(), "sync status");
        if self.event_tx.send(event).is_err() {
            tracing::trace!("no sync status subscribers");
        }
    }
}
