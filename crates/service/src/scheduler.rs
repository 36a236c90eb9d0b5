//! Background sync triggers: one delayed attempt after startup, then a fixed interval.

use std::sync::Arc;
use std::time::Duration;

use quotesync_core::constants::MIN_PERIOD_SECS;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::sync_service::SyncService;

/// Owns the two background sync tasks. Both are aborted on
/// [`SyncScheduler::shutdown`] or when the scheduler is dropped.
#[derive(Debug)]
pub struct SyncScheduler {
    initial: JoinHandle<()>,
    periodic: JoinHandle<()>,
}

impl SyncScheduler {
    /// Spawns the delayed initial sync and the periodic sync loop.
    ///
    /// The first periodic tick fires one full `interval` after start, so the
    /// two triggers never collide at time zero. `interval` is raised to
    /// [`MIN_PERIOD_SECS`] if shorter.
    #[must_use]
    pub fn start(service: Arc<SyncService>, initial_delay: Duration, interval: Duration) -> Self {
        let min_interval = Duration::from_secs(MIN_PERIOD_SECS);
        if interval < min_interval {
            tracing::warn!(?interval, ?min_interval, "sync interval too short, clamping");
        }
        let interval = interval.max(min_interval);
        let initial = {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                tokio::time::sleep(initial_delay).await;
                tracing::debug!("running initial sync");
                spawn_sync(service);
            })
        };

        let periodic = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tracing::debug!("running periodic sync");
                spawn_sync(Arc::clone(&service));
            }
        });

        tracing::info!(?initial_delay, ?interval, "sync scheduler started");
        Self { initial, periodic }
    }

    /// Stops both triggers. A sync already in flight runs to completion.
    pub fn shutdown(&self) {
        self.initial.abort();
        self.periodic.abort();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.periodic.is_finished()
    }
}

// Detached so that shutting the triggers down never cancels a running sync.
fn spawn_sync(service: Arc<SyncService>) {
    tokio::spawn(async move {
        let _outcome = service.sync_now().await;
    });
}

impl Drop for SyncScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
