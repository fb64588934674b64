//! # Storage Traits
//!
//! This module defines the storage abstraction trait that allows different
//! storage backends to be used interchangeably in the domain layer.

use async_trait::async_trait;
use shared::Cost;

use crate::domain::models::cost::NewCost;
use crate::storage::StoreError;

/// Trait defining the interface for cost storage operations
///
/// This trait abstracts away the specific storage implementation details,
/// allowing the domain layer to work with different storage backends
/// (SQLite, an in-memory double for tests, etc.) without modification.
#[async_trait]
pub trait CostStorage: Send + Sync {
    /// Persist a new cost record and return the identifier the store
    /// assigned to it. Identifiers are strictly increasing and never reused.
    async fn store_cost(&self, cost: &NewCost) -> Result<i64, StoreError>;

    /// Retrieve every record whose month key equals `month_key`.
    /// Returns an empty vec (not an error) when nothing matches; order is
    /// storage-determined.
    async fn costs_for_month(&self, month_key: &str) -> Result<Vec<Cost>, StoreError>;

    /// Delete a single record by id.
    /// Returns true if the record was found and deleted, false otherwise.
    async fn delete_cost(&self, id: i64) -> Result<bool, StoreError>;
}
