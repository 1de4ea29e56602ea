use async_trait::async_trait;

use crate::models::Holding;

/// Storage for the holdings collection.
#[async_trait]
pub trait HoldingsRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Holding>, sqlx::Error>;

    /// Persists a new holding and returns it with its assigned id.
    async fn insert(&self, holding: Holding) -> Result<Holding, sqlx::Error>;

    async fn delete(&self, holding: &Holding) -> Result<(), sqlx::Error>;

    /// Commits the in-memory price fields of `holdings` in one transaction.
    async fn save(&self, holdings: &[Holding]) -> Result<(), sqlx::Error>;
}
