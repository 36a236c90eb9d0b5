//! Storage layer for quotesync
//!
//! A string key-value boundary (file or in-memory) and the record store that
//! keeps the quote collection persisted as one JSON snapshot.

mod error;
mod kv;
mod quote_store;

pub use error::StorageError;
pub use kv::{FileKvStore, KeyValueStore, MemoryKvStore};
pub use quote_store::{QuoteStore, SnapshotRead, read_snapshot};
