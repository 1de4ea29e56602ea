use async_trait::async_trait;
use sqlx::{Pool, Sqlite};

use super::{
    repository::HoldingsRepository,
    utils::{decimal_to_f64, parse_holding},
};
use crate::models::Holding;

#[derive(Clone, Debug)]
pub struct SqliteHoldingsRepository {
    connection: Pool<Sqlite>,
}

impl SqliteHoldingsRepository {
    pub fn new(connection: Pool<Sqlite>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl HoldingsRepository for SqliteHoldingsRepository {
    async fn list_all(&self) -> Result<Vec<Holding>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, ticker, avg_cost_price, num_shares_owned, day_open_price, current_price
            FROM holdings
            ORDER BY id
            "#,
        )
        .fetch_all(&self.connection)
        .await?;

        rows.into_iter().map(parse_holding).collect()
    }

    async fn insert(&self, holding: Holding) -> Result<Holding, sqlx::Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO holdings
            (ticker, avg_cost_price, num_shares_owned, day_open_price, current_price)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(holding.ticker())
        .bind(decimal_to_f64(holding.avg_cost_price()))
        .bind(decimal_to_f64(holding.num_shares_owned()))
        .bind(decimal_to_f64(holding.day_open_price()))
        .bind(decimal_to_f64(holding.current_price()))
        .execute(&self.connection)
        .await?
        .last_insert_rowid();

        tracing::debug!(id, ticker = %holding.ticker(), "inserted holding");

        Ok(holding.with_id(id))
    }

    async fn delete(&self, holding: &Holding) -> Result<(), sqlx::Error> {
        let Some(id) = holding.id() else {
            return Err(sqlx::Error::RowNotFound);
        };

        let result = sqlx::query("DELETE FROM holdings WHERE id = ?")
            .bind(id)
            .execute(&self.connection)
            .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }

    async fn save(&self, holdings: &[Holding]) -> Result<(), sqlx::Error> {
        let mut tx = self.connection.begin().await?;

        for holding in holdings {
            let Some(id) = holding.id() else {
                continue;
            };

            sqlx::query(
                r#"
                UPDATE holdings
                SET day_open_price = ?, current_price = ?, updated_at = CURRENT_TIMESTAMP
                WHERE id = ?
                "#,
            )
            .bind(decimal_to_f64(holding.day_open_price()))
            .bind(decimal_to_f64(holding.current_price()))
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
