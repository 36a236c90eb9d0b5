//! The record store: ordered in-memory quotes backed by a key-value snapshot.

use std::collections::HashSet;
use std::sync::Arc;

use quotesync_core::constants::{ALL_CATEGORIES, LAST_VIEWED_KEY, QUOTES_KEY, SEED_QUOTES};
use quotesync_core::{
    CoreError, ImportOutcome, MergeSummary, Quote, export_json, import_json, merge, migrate,
};
use rand::seq::IndexedRandom as _;
use serde_json::Value;

use crate::error::StorageError;
use crate::kv::KeyValueStore;

/// Result of reading the persisted snapshot.
///
/// Keeps "nothing stored yet", "stored but unreadable" and "backend did not
/// answer" apart. All three load as an empty collection, but only the first
/// two may be seeded over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotRead {
    Missing,
    Loaded(Vec<Quote>),
    Corrupt(String),
    Unavailable(String),
}

impl SnapshotRead {
    #[must_use]
    pub fn into_records(self) -> Vec<Quote> {
        match self {
            Self::Loaded(records) => records,
            Self::Missing | Self::Corrupt(_) | Self::Unavailable(_) => Vec::new(),
        }
    }
}

/// Reads and decodes the durable snapshot. Never fails.
pub fn read_snapshot(durable: &dyn KeyValueStore) -> SnapshotRead {
    match durable.get(QUOTES_KEY) {
        Ok(raw) => decode_snapshot(raw),
        Err(e) => SnapshotRead::Unavailable(e.to_string()),
    }
}

/// Decodes a raw snapshot value.
///
/// Array elements without string `text` and `category` are dropped
/// individually so one bad row does not discard the rest of the collection.
/// Identity fields are decoded leniently and repaired by migration.
fn decode_snapshot(raw: Option<String>) -> SnapshotRead {
    let Some(raw) = raw else {
        return SnapshotRead::Missing;
    };
    let items = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(items)) => items,
        Ok(Value::Null) => return SnapshotRead::Missing,
        Ok(_) => return SnapshotRead::Corrupt("snapshot is not a JSON array".to_owned()),
        Err(e) => return SnapshotRead::Corrupt(e.to_string()),
    };
    let total = items.len();
    let records: Vec<Quote> =
        items.into_iter().filter_map(|item| serde_json::from_value(item).ok()).collect();
    if records.len() < total {
        tracing::warn!(dropped = total - records.len(), "dropped unreadable snapshot rows");
    }
    SnapshotRead::Loaded(records)
}

/// Ordered quote collection with durable persistence.
///
/// Every mutation persists the next full snapshot first and only then swaps it
/// in, so a failed write leaves both memory and disk at the last good state.
pub struct QuoteStore {
    durable: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
    records: Vec<Quote>,
}

impl std::fmt::Debug for QuoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteStore").field("records", &self.records.len()).finish_non_exhaustive()
    }
}

impl QuoteStore {
    /// Loads the collection, seeding and migrating it as needed.
    ///
    /// An empty result (missing or corrupt snapshot) is replaced by the built-in
    /// seed quotes, which are persisted right away.
    ///
    /// # Errors
    /// Returns an error if the durable backend cannot be read, or if persisting
    /// the seed or migrated snapshot fails.
    pub fn open(
        durable: Arc<dyn KeyValueStore>,
        session: Arc<dyn KeyValueStore>,
    ) -> Result<Self, StorageError> {
        // A backend that cannot be read may still hold good data; never seed over it.
        let raw = durable.get(QUOTES_KEY)?;
        let mut records = match decode_snapshot(raw) {
            SnapshotRead::Loaded(records) => records,
            SnapshotRead::Missing | SnapshotRead::Unavailable(_) => Vec::new(),
            SnapshotRead::Corrupt(reason) => {
                tracing::warn!(%reason, "stored quotes unreadable, starting empty");
                Vec::new()
            },
        };

        let mut store = Self { durable, session, records: Vec::new() };

        if records.is_empty() {
            records = seed_quotes();
            tracing::info!(count = records.len(), "seeding empty collection");
            store.persist(&records)?;
        } else if migrate(&mut records) {
            tracing::info!(count = records.len(), "upgraded stored quotes");
            store.persist(&records)?;
        }

        store.records = records;
        Ok(store)
    }

    /// Re-reads the persisted snapshot, collapsing failures to empty.
    #[must_use]
    pub fn load(&self) -> Vec<Quote> {
        read_snapshot(self.durable.as_ref()).into_records()
    }

    /// Replaces the whole collection with `records`, persisting first.
    ///
    /// # Errors
    /// Returns an error if encoding or the backend write fails; the store is
    /// unchanged in that case.
    pub fn save(&mut self, records: Vec<Quote>) -> Result<(), StorageError> {
        self.commit(records)
    }

    fn persist(&self, records: &[Quote]) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(records)?;
        self.durable.set(QUOTES_KEY, &encoded)
    }

    fn commit(&mut self, next: Vec<Quote>) -> Result<(), StorageError> {
        self.persist(&next)?;
        self.records = next;
        Ok(())
    }

    #[must_use]
    pub fn records(&self) -> &[Quote] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a record as-is and persists.
    ///
    /// # Errors
    /// Returns an error if the snapshot cannot be persisted.
    pub fn append(&mut self, record: Quote) -> Result<(), StorageError> {
        let mut next = self.records.clone();
        next.push(record);
        self.commit(next)
    }

    /// Overwrites the record at `index` wholesale and persists.
    ///
    /// # Errors
    /// Returns [`StorageError::IndexOutOfRange`] for a bad index, or a backend error.
    pub fn replace_at(&mut self, index: usize, record: Quote) -> Result<(), StorageError> {
        let len = self.records.len();
        if index >= len {
            return Err(StorageError::IndexOutOfRange { index, len });
        }
        let mut next = self.records.clone();
        next[index] = record;
        self.commit(next)
    }

    /// Creates a quote from user input and appends it.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidInput`] for blank fields,
    /// [`CoreError::Duplicate`] if the content key already exists, or a backend error.
    pub fn add(&mut self, text: &str, category: &str) -> Result<Quote, StorageError> {
        let quote = Quote::new(text, category)?;
        let key = quote.content_key();
        if self.records.iter().any(|q| q.content_key() == key) {
            return Err(CoreError::Duplicate {
                text: key.text().to_owned(),
                category: key.category().to_owned(),
            }
            .into());
        }
        self.append(quote.clone())?;
        tracing::info!(id = %quote.id, category = %quote.category, "added quote");
        Ok(quote)
    }

    /// Imports a JSON document, appending every new content key.
    ///
    /// # Errors
    /// Returns [`CoreError::ImportFormat`] (store untouched) for a non-array
    /// document, or a backend error if persisting fails.
    pub fn import_json(&mut self, document: &str) -> Result<ImportOutcome, StorageError> {
        let outcome = import_json(&self.records, document)?;
        if !outcome.imported.is_empty() {
            let mut next = self.records.clone();
            next.extend(outcome.imported.iter().cloned());
            self.commit(next)?;
        }
        tracing::info!(added = outcome.added(), skipped = outcome.skipped, "imported quotes");
        Ok(outcome)
    }

    /// Serializes the whole collection for export.
    ///
    /// # Errors
    /// Returns an error if encoding fails.
    pub fn export_json(&self) -> Result<String, StorageError> {
        Ok(export_json(&self.records)?)
    }

    /// Merges remote records (remote wins) and persists before reporting.
    ///
    /// # Errors
    /// Returns an error if the merged snapshot cannot be persisted; the store
    /// is unchanged in that case.
    pub fn apply_merge(&mut self, remote: Vec<Quote>) -> Result<MergeSummary, StorageError> {
        let outcome = merge(&self.records, remote);
        if !outcome.summary.is_noop() {
            self.commit(outcome.merged)?;
        }
        Ok(outcome.summary)
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|q| seen.insert(q.category.as_str()))
            .map(|q| q.category.clone())
            .collect()
    }

    /// Records in `category`; `None` or `"all"` selects everything.
    #[must_use]
    pub fn filter_by_category(&self, category: Option<&str>) -> Vec<&Quote> {
        self.matching_indices(category).into_iter().map(|i| &self.records[i]).collect()
    }

    fn matching_indices(&self, category: Option<&str>) -> Vec<usize> {
        let filter = category.map(str::trim).filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);
        self.records
            .iter()
            .enumerate()
            .filter(|(_, q)| filter.is_none_or(|c| q.category == c))
            .map(|(i, _)| i)
            .collect()
    }

    /// Picks a random quote (optionally within a category) and remembers it
    /// as the last viewed one for this session.
    #[must_use]
    pub fn random_quote(&self, category: Option<&str>) -> Option<&Quote> {
        let candidates = self.matching_indices(category);
        let &index = candidates.choose(&mut rand::rng())?;
        if let Err(e) = self.session.set(LAST_VIEWED_KEY, &index.to_string()) {
            tracing::warn!(error = %e, "failed to remember last viewed quote");
        }
        self.records.get(index)
    }

    /// The quote shown last in this session, if its index is still valid.
    #[must_use]
    pub fn last_viewed(&self) -> Option<&Quote> {
        let raw = match self.session.get(LAST_VIEWED_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read last viewed quote");
                return None;
            },
        };
        let index: usize = raw.trim().parse().ok()?;
        self.records.get(index)
    }
}

fn seed_quotes() -> Vec<Quote> {
    SEED_QUOTES.iter().filter_map(|(text, category)| Quote::new(text, category).ok()).collect()
}
