//! Service layer for quotesync
//!
//! Sits between the CLI and the store/remote crates: local quote operations,
//! the single-flight sync orchestrator, and its background scheduler.

mod config;
mod error;
mod quote_service;
mod scheduler;
mod sync_service;

pub use config::SyncConfig;
pub use error::ServiceError;
pub use quote_service::QuoteService;
pub use scheduler::SyncScheduler;
pub use sync_service::{SyncEvent, SyncOutcome, SyncService, SyncState};
