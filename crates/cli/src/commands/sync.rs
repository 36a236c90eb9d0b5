use anyhow::Result;
use quotesync_service::{SyncConfig, SyncEvent, SyncOutcome, SyncScheduler};
use quotesync_storage::QuoteStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::broadcast::error::RecvError;

use crate::build_sync_service;

pub(crate) async fn run_sync(store: Arc<Mutex<QuoteStore>>) -> Result<()> {
    let config = SyncConfig::from_env();
    let service = build_sync_service(store, &config)?;
    println!("{}", SyncEvent::Started.status_line());
    match service.sync_now().await {
        SyncOutcome::Completed(summary) => println!("Synced: {summary}"),
        SyncOutcome::Failed(reason) => println!("Sync failed: {reason}"),
        SyncOutcome::Skipped => println!("Sync already in progress"),
    }
    Ok(())
}

pub(crate) async fn run_push(store: Arc<Mutex<QuoteStore>>) -> Result<()> {
    let config = SyncConfig::from_env();
    let service = build_sync_service(store, &config)?;
    let acks = service.push_now().await;
    println!("{}", serde_json::to_string_pretty(&acks)?);
    Ok(())
}

pub(crate) async fn run_watch(store: Arc<Mutex<QuoteStore>>) -> Result<()> {
    let config = SyncConfig::from_env();
    let service = Arc::new(build_sync_service(store, &config)?);
    let mut events = service.subscribe();
    let scheduler =
        SyncScheduler::start(Arc::clone(&service), config.initial_delay, config.sync_interval);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    println!("{}", event.status_line());
                    if let SyncEvent::Completed { categories, .. } = &event {
                        println!("Categories: {}", categories.join(", "));
                    }
                },
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "status output fell behind");
                },
                Err(RecvError::Closed) => break,
            },
            signal = tokio::signal::ctrl_c() => {
                signal?;
                tracing::info!("Shutting down sync scheduler");
                break;
            },
        }
    }

    scheduler.shutdown();
    Ok(())
}
