use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A stored expense record.
///
/// Records are write-once: they are created by the store's add operation and
/// destroyed only by deletion. There is no update path, so the derived fields
/// can never drift from `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cost {
    /// Store-assigned identifier, strictly increasing, never reused
    pub id: i64,
    /// Monetary value of the expense
    pub amount: f64,
    /// Grouping key; the store treats this as an opaque string
    pub category: String,
    /// Free-form description
    pub description: String,
    /// Effective date of the expense (YYYY-MM-DD), distinct from creation time
    pub date: String,
    /// Derived YYYY-MM lookup key, computed once when the record is written
    pub month_year: String,
    /// Creation instant in Unix milliseconds, used only for tie-breaking
    pub timestamp: i64,
}

/// Input for creating a new cost record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCostRequest {
    /// Monetary value; must be a finite number
    pub amount: f64,
    pub category: String,
    pub description: String,
    /// Effective date (YYYY-MM-DD)
    pub date: String,
}

/// Request for one month of cost data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthCostsRequest {
    pub year: i32,
    /// 1 = January .. 12 = December
    pub month: u32,
}

impl Default for MonthCostsRequest {
    fn default() -> Self {
        let now = chrono::Local::now();
        Self {
            year: now.year(),
            month: now.month(),
        }
    }
}

/// All cost records whose month key matches the requested year/month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthCostsResponse {
    pub costs: Vec<Cost>,
}

/// Per-category sums for one month.
///
/// Categories with no records that month are absent from the map, never
/// present with a zero total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotalsResponse {
    pub totals: HashMap<String, f64>,
}
