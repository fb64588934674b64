use async_trait::async_trait;
use shared::Cost;
use sqlx::Row;

use crate::domain::models::cost::NewCost;
use crate::storage::connection::DbConnection;
use crate::storage::traits::CostStorage;
use crate::storage::StoreError;

/// Repository for cost record operations
#[derive(Clone)]
pub struct CostRepository {
    db: DbConnection,
}

impl CostRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CostStorage for CostRepository {
    /// Store a cost record in the database
    async fn store_cost(&self, cost: &NewCost) -> Result<i64, StoreError> {
        // One scoped transaction per write: the record and its index entries
        // land together or not at all.
        let mut tx = self.db.pool().begin().await.map_err(StoreError::Write)?;

        let result = sqlx::query(
            r#"
            INSERT INTO costs (amount, category, description, date, month_year, timestamp)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(cost.amount)
        .bind(&cost.category)
        .bind(&cost.description)
        .bind(&cost.date)
        .bind(&cost.month_year)
        .bind(cost.timestamp)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::Write)?;

        tx.commit().await.map_err(StoreError::Write)?;

        Ok(result.last_insert_rowid())
    }

    /// List all cost records for a given month key
    async fn costs_for_month(&self, month_key: &str) -> Result<Vec<Cost>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, amount, category, description, date, month_year, timestamp
            FROM costs
            WHERE month_year = ?
            ORDER BY id
            "#,
        )
        .bind(month_key)
        .fetch_all(self.db.pool())
        .await
        .map_err(StoreError::Read)?;

        let costs = rows
            .iter()
            .map(|row| Cost {
                id: row.get("id"),
                amount: row.get("amount"),
                category: row.get("category"),
                description: row.get("description"),
                date: row.get("date"),
                month_year: row.get("month_year"),
                timestamp: row.get("timestamp"),
            })
            .collect();

        Ok(costs)
    }

    /// Delete a single cost record by id
    async fn delete_cost(&self, id: i64) -> Result<bool, StoreError> {
        let mut tx = self.db.pool().begin().await.map_err(StoreError::Delete)?;

        let result = sqlx::query("DELETE FROM costs WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::Delete)?;

        tx.commit().await.map_err(StoreError::Delete)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    async fn create_test_repository() -> CostRepository {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to init test DB");
        CostRepository::new(db)
    }

    fn lunch() -> NewCost {
        NewCost::new(50.0, "Food".to_string(), "Lunch".to_string(), "2024-03-05")
            .expect("valid cost")
    }

    #[tokio::test]
    async fn test_store_and_list_by_month() -> Result<()> {
        let repo = create_test_repository().await;

        let id = repo.store_cost(&lunch()).await?;
        assert!(id > 0);

        let march = repo.costs_for_month("2024-03").await?;
        assert_eq!(march.len(), 1);
        assert_eq!(march[0].id, id);
        assert_eq!(march[0].amount, 50.0);
        assert_eq!(march[0].category, "Food");
        assert_eq!(march[0].description, "Lunch");
        assert_eq!(march[0].date, "2024-03-05");
        assert_eq!(march[0].month_year, "2024-03");

        // The record does not leak into other months
        let april = repo.costs_for_month("2024-04").await?;
        assert!(april.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_month_is_success() -> Result<()> {
        let repo = create_test_repository().await;
        let costs = repo.costs_for_month("1999-01").await?;
        assert!(costs.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_ids_strictly_increase_across_deletes() -> Result<()> {
        let repo = create_test_repository().await;

        let first = repo.store_cost(&lunch()).await?;
        let second = repo.store_cost(&lunch()).await?;
        assert!(second > first);

        // Deleting the newest record must not free its id for reuse
        assert!(repo.delete_cost(second).await?);
        let third = repo.store_cost(&lunch()).await?;
        assert!(third > second);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_noop() -> Result<()> {
        let repo = create_test_repository().await;
        let id = repo.store_cost(&lunch()).await?;

        assert!(!repo.delete_cost(id + 1000).await?);

        // The existing record is untouched
        let march = repo.costs_for_month("2024-03").await?;
        assert_eq!(march.len(), 1);
        assert_eq!(march[0].id, id);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_removes_record() -> Result<()> {
        let repo = create_test_repository().await;
        let id = repo.store_cost(&lunch()).await?;

        assert!(repo.delete_cost(id).await?);
        assert!(repo.costs_for_month("2024-03").await?.is_empty());

        // Idempotent: deleting again reports not-found but succeeds
        assert!(!repo.delete_cost(id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_order_is_insertion_order() -> Result<()> {
        let repo = create_test_repository().await;

        let a = repo.store_cost(&lunch()).await?;
        let b = repo
            .store_cost(
                &NewCost::new(20.0, "Food".to_string(), "Snack".to_string(), "2024-03-20")
                    .expect("valid cost"),
            )
            .await?;

        let march = repo.costs_for_month("2024-03").await?;
        let ids: Vec<i64> = march.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![a, b]);
        Ok(())
    }
}
