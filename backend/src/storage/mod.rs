//! # Storage Module
//!
//! Handles all data persistence for the cost tracker.
//!
//! This module abstracts away the specific storage implementation details and
//! provides a consistent interface for persisting and retrieving cost records.
//! The implementation can be swapped out (SQLite, flat files, an in-memory
//! double for tests) without affecting the domain layer.
//!
//! ## Key Responsibilities
//!
//! - **Connection Management**: Opening the named, versioned store and
//!   creating its schema on first use
//! - **Data Persistence**: Writing cost records inside short-lived, scoped
//!   transactions
//! - **Data Retrieval**: Month-keyed index lookups instead of full scans
//! - **Transaction Safety**: Either a full record with all derived fields is
//!   durably present, or nothing is
//!
//! ## Current Implementation
//!
//! SQLite via SQLx: one shared connection pool, one implicit or explicit
//! transaction per public operation, no caller-visible multi-step
//! transactions.

pub mod connection;
pub mod repositories;
pub mod traits;

pub use connection::{DbConnection, DEFAULT_STORE_NAME, DEFAULT_STORE_VERSION};
pub use repositories::CostRepository;
pub use traits::CostStorage;

/// Failure taxonomy of the store.
///
/// Every public operation returns one of these distinct conditions; the store
/// never swallows an error and never substitutes an empty result for a
/// failure. An empty month is a success value, not an error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying storage could not be opened or created. Fatal: no
    /// operation may proceed after a failed initialization.
    #[error("store could not be opened: {0}")]
    Initialization(String),

    /// An operation was attempted before `init` completed. Sequencing error
    /// on the caller's side.
    #[error("store has not been initialized")]
    NotInitialized,

    /// The write transaction could not commit; no partial record is visible.
    #[error("write transaction failed")]
    Write(#[source] sqlx::Error),

    /// The read transaction failed.
    #[error("read transaction failed")]
    Read(#[source] sqlx::Error),

    /// The delete transaction failed.
    #[error("delete transaction failed")]
    Delete(#[source] sqlx::Error),

    /// The per-category fold could not complete.
    #[error("aggregation failed: {0}")]
    Aggregation(String),
}
