#![expect(clippy::unwrap_used, reason = "test code")]

mod common;

use std::sync::Arc;

use common::{FakeRemote, memory_store, remote_quote};
use quotesync_core::MergeSummary;
use quotesync_service::{QuoteService, SyncEvent, SyncOutcome, SyncService, SyncState};

#[tokio::test]
async fn second_trigger_while_syncing_is_a_no_op() {
    let remote = FakeRemote::gated(vec![remote_quote(1, "Remote", "General")]);
    let service = Arc::new(SyncService::new(memory_store(), remote.clone(), 10));

    let first = tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.sync_now().await }
    });
    remote.entered.notified().await;

    assert_eq!(service.state(), SyncState::Syncing);
    assert_eq!(service.sync_now().await, SyncOutcome::Skipped);

    remote.release.notify_one();
    let first = first.await.unwrap();

    assert!(matches!(first, SyncOutcome::Completed(_)));
    assert_eq!(remote.fetches(), 1);
    assert_eq!(service.state(), SyncState::Idle);
}

#[tokio::test]
async fn successful_sync_merges_and_reports() {
    let store = memory_store();
    let seeded = store.lock().await.records()[0].clone();
    let remote = FakeRemote::returning(vec![
        remote_quote(1, &seeded.text, &seeded.category),
        remote_quote(2, "Fresh from the server", "General"),
    ]);
    let service = SyncService::new(Arc::clone(&store), remote, 10);
    let mut events = service.subscribe();

    let outcome = service.sync_now().await;

    let summary = MergeSummary { added: 1, replaced: 1, conflicts: 0 };
    assert_eq!(outcome, SyncOutcome::Completed(summary));
    assert_eq!(events.recv().await.unwrap(), SyncEvent::Started);
    match events.recv().await.unwrap() {
        SyncEvent::Completed { summary: reported, categories } => {
            assert_eq!(reported, summary);
            assert!(categories.contains(&"General".to_owned()));
        },
        other => panic!("unexpected event {other:?}"),
    }

    let store = store.lock().await;
    assert_eq!(store.records()[0].id, "srv_1");
    assert_eq!(store.load(), store.records());
}

#[tokio::test]
async fn failed_fetch_is_reported_and_leaves_store_untouched() {
    let store = memory_store();
    let before = store.lock().await.records().to_vec();
    let service = SyncService::new(Arc::clone(&store), FakeRemote::failing(503), 10);
    let mut events = service.subscribe();

    let outcome = service.sync_now().await;

    assert!(matches!(outcome, SyncOutcome::Failed(ref reason) if reason.contains("503")));
    assert_eq!(events.recv().await.unwrap(), SyncEvent::Started);
    let failed = events.recv().await.unwrap();
    assert!(failed.to_string().starts_with("Sync failed:"));
    assert_eq!(service.state(), SyncState::Idle);
    assert_eq!(store.lock().await.records(), before.as_slice());
}

#[tokio::test]
async fn sync_can_run_again_after_failure() {
    let service = SyncService::new(memory_store(), FakeRemote::failing(500), 10);
    assert!(matches!(service.sync_now().await, SyncOutcome::Failed(_)));
    assert!(matches!(service.sync_now().await, SyncOutcome::Failed(_)));
}

#[tokio::test]
async fn local_add_during_fetch_is_kept() {
    let store = memory_store();
    let remote = FakeRemote::gated(vec![remote_quote(7, "Server side", "General")]);
    let sync = Arc::new(SyncService::new(Arc::clone(&store), remote.clone(), 10));
    let quotes = QuoteService::new(Arc::clone(&store));
    let seeded = quotes.count().await;

    let running = tokio::spawn({
        let sync = Arc::clone(&sync);
        async move { sync.sync_now().await }
    });
    remote.entered.notified().await;
    let local = quotes.add("Written offline", "Life").await.unwrap();
    remote.release.notify_one();
    running.await.unwrap();

    let all = quotes.list(None).await;
    assert_eq!(all.len(), seeded + 2);
    assert!(all.contains(&local));
    assert!(all.iter().any(|q| q.id == "srv_7"));
}

#[tokio::test]
async fn fetch_respects_limit() {
    let remote = FakeRemote::returning(vec![
        remote_quote(1, "One", "General"),
        remote_quote(2, "Two", "General"),
        remote_quote(3, "Three", "General"),
    ]);
    let service = SyncService::new(memory_store(), remote, 2);

    let outcome = service.sync_now().await;

    let expected = MergeSummary { added: 2, replaced: 0, conflicts: 0 };
    assert_eq!(outcome, SyncOutcome::Completed(expected));
}

#[tokio::test]
async fn push_returns_acks_for_accepted_records_only() {
    let store = memory_store();
    let quotes = QuoteService::new(Arc::clone(&store));
    quotes.add("Keep this to myself", "Private").await.unwrap();
    let total = quotes.count().await;
    let service = SyncService::new(store, FakeRemote::returning(Vec::new()), 10);

    let acks = service.push_now().await;

    assert_eq!(acks.len(), total - 1);
    assert_eq!(quotes.count().await, total);
}
