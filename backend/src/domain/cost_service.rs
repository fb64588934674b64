//! Cost service domain logic: the add / list / totals / delete operations
//! the presentation layer calls.

use std::collections::HashMap;

use shared::{Cost, CreateCostRequest};
use tracing::{error, info};

use crate::domain::models::cost::{month_key, CostValidationError, NewCost};
use crate::domain::report;
use crate::storage::{CostRepository, CostStorage, DbConnection, StoreError};

/// Errors surfaced by the store's public operations.
///
/// Callers can distinguish an empty result (success) from a failure, and a
/// rejected input from a storage-layer fault, without inspecting messages.
#[derive(Debug, thiserror::Error)]
pub enum CostStoreError {
    #[error(transparent)]
    Validation(#[from] CostValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct CostService<S: CostStorage = CostRepository> {
    repository: S,
}

impl CostService<CostRepository> {
    pub fn new(db: DbConnection) -> Self {
        Self {
            repository: CostRepository::new(db),
        }
    }
}

impl<S: CostStorage> CostService<S> {
    /// Build a service over any storage backend.
    pub fn with_storage(repository: S) -> Self {
        Self { repository }
    }

    /// Validate and persist one cost record, returning the stored record with
    /// its newly assigned id.
    pub async fn add_cost(&self, request: CreateCostRequest) -> Result<Cost, CostStoreError> {
        let new_cost = NewCost::new(
            request.amount,
            request.category,
            request.description,
            &request.date,
        )?;

        let id = self.repository.store_cost(&new_cost).await.map_err(|e| {
            error!("Failed to store cost: {e}");
            e
        })?;

        info!(id, month_year = %new_cost.month_year, "Stored cost");

        Ok(Cost {
            id,
            amount: new_cost.amount,
            category: new_cost.category,
            description: new_cost.description,
            date: new_cost.date,
            month_year: new_cost.month_year,
            timestamp: new_cost.timestamp,
        })
    }

    /// Every record whose month key matches the given year/month.
    ///
    /// The key is built with the same zero-padding rule the write path uses,
    /// so a record is always retrievable by the year/month its date falls in.
    pub async fn costs_for_month(&self, year: i32, month: u32) -> Result<Vec<Cost>, CostStoreError> {
        if !(1..=12).contains(&month) {
            return Err(CostValidationError::InvalidMonth(month).into());
        }

        let costs = self
            .repository
            .costs_for_month(&month_key(year, month))
            .await?;
        Ok(costs)
    }

    /// Per-category sums for the given year/month, built strictly on top of
    /// the month query.
    pub async fn category_totals(
        &self,
        year: i32,
        month: u32,
    ) -> Result<HashMap<String, f64>, CostStoreError> {
        let costs = self.costs_for_month(year, month).await?;
        Ok(report::totals_by_category(&costs)?)
    }

    /// Delete one record by id. Deleting an id that does not exist is a
    /// successful no-op.
    pub async fn delete_cost(&self, id: i64) -> Result<(), CostStoreError> {
        let deleted = self.repository.delete_cost(id).await.map_err(|e| {
            error!("Failed to delete cost {id}: {e}");
            e
        })?;

        if deleted {
            info!(id, "Deleted cost");
        } else {
            info!(id, "Delete was a no-op, cost not found");
        }
        Ok(())
    }
}
