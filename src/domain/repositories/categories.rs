use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::categories::{CategoryEntity, InsertCategoryEntity};

#[automock]
#[async_trait]
pub trait CategoryRepository {
    async fn create(&self, category: InsertCategoryEntity) -> Result<Uuid>;
    async fn list(&self) -> Result<Vec<CategoryEntity>>;
    async fn count(&self) -> Result<i64>;
}
