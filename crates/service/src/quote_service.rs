use std::sync::Arc;

use quotesync_core::{ImportOutcome, Quote};
use quotesync_storage::QuoteStore;
use tokio::sync::Mutex;

use crate::ServiceError;

/// Local operations on the collection: add, browse, import and export.
pub struct QuoteService {
    store: Arc<Mutex<QuoteStore>>,
}

impl QuoteService {
    #[must_use]
    pub const fn new(store: Arc<Mutex<QuoteStore>>) -> Self {
        Self { store }
    }

    pub async fn add(&self, text: &str, category: &str) -> Result<Quote, ServiceError> {
        Ok(self.store.lock().await.add(text, category)?)
    }

    pub async fn import_json(&self, document: &str) -> Result<ImportOutcome, ServiceError> {
        Ok(self.store.lock().await.import_json(document)?)
    }

    pub async fn export_json(&self) -> Result<String, ServiceError> {
        Ok(self.store.lock().await.export_json()?)
    }

    pub async fn categories(&self) -> Vec<String> {
        self.store.lock().await.categories()
    }

    pub async fn list(&self, category: Option<&str>) -> Vec<Quote> {
        self.store.lock().await.filter_by_category(category).into_iter().cloned().collect()
    }

    pub async fn random(&self, category: Option<&str>) -> Option<Quote> {
        self.store.lock().await.random_quote(category).cloned()
    }

    /// The quote viewed last in this session, or a fresh random one.
    pub async fn show(&self) -> Option<Quote> {
        let store = self.store.lock().await;
        store.last_viewed().or_else(|| store.random_quote(None)).cloned()
    }

    pub async fn count(&self) -> usize {
        self.store.lock().await.len()
    }
}
