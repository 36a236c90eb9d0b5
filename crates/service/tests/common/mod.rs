#![allow(dead_code, reason = "shared between test binaries")]
#![expect(clippy::unwrap_used, reason = "test code")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use quotesync_core::{ExternalId, Quote};
use quotesync_remote::{RemoteAck, RemoteError, RemoteSource};
use quotesync_storage::{MemoryKvStore, QuoteStore};
use tokio::sync::{Mutex, Notify};

pub fn memory_store() -> Arc<Mutex<QuoteStore>> {
    let store =
        QuoteStore::open(Arc::new(MemoryKvStore::new()), Arc::new(MemoryKvStore::new())).unwrap();
    Arc::new(Mutex::new(store))
}

pub fn remote_quote(id: u64, text: &str, category: &str) -> Quote {
    Quote::from_remote(&ExternalId::Number(id), text.to_owned(), category.to_owned())
}

/// Scripted remote that counts fetches and can hold a fetch open until released.
pub struct FakeRemote {
    quotes: Vec<Quote>,
    fail_with_status: Option<u16>,
    gated: bool,
    fetches: AtomicUsize,
    pub entered: Notify,
    pub release: Notify,
}

impl FakeRemote {
    pub fn returning(quotes: Vec<Quote>) -> Arc<Self> {
        Arc::new(Self::build(quotes, None, false))
    }

    pub fn gated(quotes: Vec<Quote>) -> Arc<Self> {
        Arc::new(Self::build(quotes, None, true))
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self::build(Vec::new(), Some(status), false))
    }

    fn build(quotes: Vec<Quote>, fail_with_status: Option<u16>, gated: bool) -> Self {
        Self {
            quotes,
            fail_with_status,
            gated,
            fetches: AtomicUsize::new(0),
            entered: Notify::new(),
            release: Notify::new(),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteSource for FakeRemote {
    async fn fetch_remote(&self, limit: usize) -> Result<Vec<Quote>, RemoteError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.gated {
            self.entered.notify_one();
            self.release.notified().await;
        }
        if let Some(code) = self.fail_with_status {
            return Err(RemoteError::HttpStatus { code, body: "unavailable".to_owned() });
        }
        Ok(self.quotes.iter().take(limit).cloned().collect())
    }

    async fn push_local(&self, records: &[Quote]) -> Vec<RemoteAck> {
        records
            .iter()
            .filter(|q| q.category != "Private")
            .map(|q| RemoteAck { local_id: q.id.clone(), remote_id: None })
            .collect()
    }
}
