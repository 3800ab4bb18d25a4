//! # Bozo Core
//!
//! Core library for bozo - a personal double-entry bookkeeping CLI.
//!
//! This crate provides the domain model, the balance-validation rules, and
//! the append-only SQLite storage engine, independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **money**: exact decimal amounts with canonical text round-trip
//! - **journal**: journal entries, line items, write-time validation
//! - **account**: account paths, hierarchy, kind inference
//! - **storage**: storage engine trait and the SQLite backend

pub mod account;
pub mod error;
pub mod journal;
pub mod money;
pub mod storage;

pub use error::{LedgerError, Result};
pub use storage::{SqliteStorage, StorageEngine};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
