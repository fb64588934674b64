//! # Domain Module
//!
//! Contains all business logic for the cost tracker.
//!
//! This module encapsulates the rules that define how cost records are
//! modeled, validated and aggregated. It operates independently of any
//! specific UI framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **models**: The cost record type, its validating constructor and the
//!   month-key derivation shared by the write and read paths
//! - **cost_service**: Add / list / totals / delete operations over a
//!   storage backend
//! - **report**: The pure per-category fold behind the totals operation
//!
//! ## Business Rules
//!
//! - A record's `month_year` is derived exactly once, when it is written
//! - Records are write-once; the only mutation is deletion by id
//! - Amounts must be finite; "amount > 0" is a caller/UI concern
//! - An empty month is an empty result, never an error

pub mod cost_service;
pub mod models;
pub mod report;

pub use cost_service::{CostService, CostStoreError};
