use shared::Cost;
use std::collections::HashMap;

use crate::storage::StoreError;

/// Fold one month of cost records into per-category sums.
///
/// Pure function over an already-fetched record set; its correctness is
/// inherited from the month query that produced the input. Categories with
/// no records are absent from the map, never present with a zero total.
pub fn totals_by_category(costs: &[Cost]) -> Result<HashMap<String, f64>, StoreError> {
    let mut totals: HashMap<String, f64> = HashMap::new();

    for cost in costs {
        // Only reachable if the database was written by something that
        // bypassed record validation.
        if !cost.amount.is_finite() {
            return Err(StoreError::Aggregation(format!(
                "non-finite amount in record {}",
                cost.id
            )));
        }
        *totals.entry(cost.category.clone()).or_insert(0.0) += cost.amount;
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost(id: i64, category: &str, amount: f64) -> Cost {
        Cost {
            id,
            amount,
            category: category.to_string(),
            description: String::new(),
            date: "2024-03-05".to_string(),
            month_year: "2024-03".to_string(),
            timestamp: 0,
        }
    }

    #[test]
    fn test_sums_per_category() {
        let costs = vec![
            cost(1, "Food", 50.0),
            cost(2, "Food", 20.0),
            cost(3, "Housing", 100.0),
        ];
        let totals = totals_by_category(&costs).expect("fold failed");
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["Food"], 70.0);
        assert_eq!(totals["Housing"], 100.0);
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        let totals = totals_by_category(&[]).expect("fold failed");
        assert!(totals.is_empty());
    }

    #[test]
    fn test_absent_categories_are_absent_not_zero() {
        let totals = totals_by_category(&[cost(1, "Food", 50.0)]).expect("fold failed");
        assert!(!totals.contains_key("Housing"));
    }

    #[test]
    fn test_non_finite_amount_fails_aggregation() {
        let result = totals_by_category(&[cost(1, "Food", f64::NAN)]);
        assert!(matches!(result, Err(StoreError::Aggregation(_))));
    }
}
