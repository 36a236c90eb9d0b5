//! Core types and logic for quotesync
//!
//! The quote record model, legacy-record migration, the remote-wins merge
//! engine and the JSON import/export codec. Everything here is pure: no I/O.

pub mod constants;
mod env_config;
mod error;
mod merge;
mod migration;
mod quote;
mod transfer;

pub use env_config::{env_parse_with_default, env_secs, env_string};
pub use error::*;
pub use merge::*;
pub use migration::migrate;
pub use quote::*;
pub use transfer::*;
