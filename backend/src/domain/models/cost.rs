use chrono::{Datelike, NaiveDate, Utc};

/// Lookup key shared by the write and read paths: zero-padded `YYYY-MM`.
///
/// Both paths must format through this one function; a record written under a
/// given date has to be retrievable by the year/month that date falls in.
pub fn month_key(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

/// A validated cost record ready to be persisted.
///
/// The store assigns the id on insert. `month_year` and `timestamp` are
/// computed here, once, so they can never drift from `date` later.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCost {
    pub amount: f64,
    pub category: String,
    pub description: String,
    /// Normalized effective date (YYYY-MM-DD)
    pub date: String,
    /// Derived YYYY-MM lookup key
    pub month_year: String,
    /// Creation instant in Unix milliseconds
    pub timestamp: i64,
}

impl NewCost {
    /// Build a record from caller input.
    ///
    /// Rejects a malformed date or a non-finite amount instead of defaulting.
    /// The date is normalized to zero-padded YYYY-MM-DD.
    pub fn new(
        amount: f64,
        category: String,
        description: String,
        date: &str,
    ) -> Result<Self, CostValidationError> {
        if !amount.is_finite() {
            return Err(CostValidationError::NonFiniteAmount);
        }

        let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| CostValidationError::InvalidDate(date.to_string()))?;

        Ok(Self {
            amount,
            category,
            description,
            date: parsed.format("%Y-%m-%d").to_string(),
            month_year: month_key(parsed.year(), parsed.month()),
            timestamp: Utc::now().timestamp_millis(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CostValidationError {
    #[error("Amount must be a finite number")]
    NonFiniteAmount,
    #[error("Invalid date: {0}. Expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid month: {0}. Must be between 1 and 12")]
    InvalidMonth(u32),
}
