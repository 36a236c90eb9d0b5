//! Remote adapter for quotesync
//!
//! Fetches a JSON collection of `{ id, title, body }` items, maps them into
//! quotes with source-namespaced ids, and pushes local quotes back as creates.

mod client;
mod error;
mod wire;


pub use client::{RemoteClient, RemoteSource};
pub use error::RemoteError;
pub use wire::RemoteAck;
