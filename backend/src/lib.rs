//! # Cost Tracker Backend
//!
//! Contains all non-UI logic for the cost tracker application.
//!
//! This module serves as the orchestration layer that brings together:
//! - **Domain**: Business rules for cost records and their aggregation
//! - **Storage**: The embedded, persistent record store
//!
//! The backend is UI-agnostic: any presentation layer (forms, charts,
//! tables) talks to it through [`CostStoreHandle`] and the `shared` DTOs,
//! with no correctness requirement of its own.
//!
//! ## Architecture
//!
//! ```text
//! UI Layer (forms, charts, tables)
//!     ↓
//! CostStoreHandle (shared, init-gated facade)
//!     ↓
//! Domain Layer (validation, services, aggregation)
//!     ↓
//! Storage Layer (SQLite, per-operation transactions)
//! ```

pub mod domain;
pub mod storage;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use shared::{CategoryTotalsResponse, Cost, CreateCostRequest, MonthCostsRequest, MonthCostsResponse};

use crate::domain::cost_service::{CostService, CostStoreError};
use crate::storage::{DbConnection, StoreError, DEFAULT_STORE_NAME, DEFAULT_STORE_VERSION};

/// Process-wide owner of the open cost store.
///
/// One handle is shared by all callers (clones are cheap and refer to the
/// same store). `init` must complete before any other operation; until it
/// does, every operation fails with [`StoreError::NotInitialized`]. Each
/// operation runs in its own short-lived transaction, so independent calls
/// may be issued concurrently.
#[derive(Clone, Default)]
pub struct CostStoreHandle {
    service: Arc<RwLock<Option<CostService>>>,
}

impl CostStoreHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (or create) the named, versioned store and install it in the
    /// handle. Safe to call again; the handle then points at the reopened
    /// store.
    pub async fn init(&self, name: &str, version: i64) -> Result<(), CostStoreError> {
        info!(name, version, "Opening cost store");
        let db = DbConnection::open(name, version).await?;
        *self.service.write().await = Some(CostService::new(db));
        Ok(())
    }

    /// Open the store with the default name and version.
    pub async fn init_default(&self) -> Result<(), CostStoreError> {
        self.init(DEFAULT_STORE_NAME, DEFAULT_STORE_VERSION).await
    }

    #[cfg(test)]
    async fn init_test(&self) -> Result<(), CostStoreError> {
        let db = DbConnection::init_test().await?;
        *self.service.write().await = Some(CostService::new(db));
        Ok(())
    }

    /// Persist one cost record; the returned record carries the id the store
    /// assigned to it.
    pub async fn add_cost(&self, request: CreateCostRequest) -> Result<Cost, CostStoreError> {
        let guard = self.service.read().await;
        let service = guard.as_ref().ok_or(StoreError::NotInitialized)?;
        service.add_cost(request).await
    }

    /// All records for the requested year/month, in storage order.
    pub async fn costs_for_month(
        &self,
        request: MonthCostsRequest,
    ) -> Result<MonthCostsResponse, CostStoreError> {
        let guard = self.service.read().await;
        let service = guard.as_ref().ok_or(StoreError::NotInitialized)?;
        let costs = service.costs_for_month(request.year, request.month).await?;
        Ok(MonthCostsResponse { costs })
    }

    /// Per-category sums for the requested year/month.
    pub async fn category_totals(
        &self,
        request: MonthCostsRequest,
    ) -> Result<CategoryTotalsResponse, CostStoreError> {
        let guard = self.service.read().await;
        let service = guard.as_ref().ok_or(StoreError::NotInitialized)?;
        let totals = service.category_totals(request.year, request.month).await?;
        Ok(CategoryTotalsResponse { totals })
    }

    /// Remove one record by id; removing a missing id is a successful no-op.
    pub async fn delete_cost(&self, id: i64) -> Result<(), CostStoreError> {
        let guard = self.service.read().await;
        let service = guard.as_ref().ok_or(StoreError::NotInitialized)?;
        service.delete_cost(id).await
    }
}
