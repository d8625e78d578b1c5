use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::products::{InsertProductEntity, ProductEntity};
use crate::domain::value_objects::products::{InsertProductModel, ListProductsFilter};

#[automock]
#[async_trait]
pub trait ProductRepository {
    async fn create(&self, product: InsertProductEntity) -> Result<Uuid>;
    async fn find_by_id(&self, product_id: Uuid) -> Result<Option<ProductEntity>>;
    async fn list(&self, filter: &ListProductsFilter) -> Result<Vec<ProductEntity>>;
    /// Returns the number of rows touched; 0 means the product is gone.
    async fn update(&self, product_id: Uuid, changes: InsertProductModel) -> Result<usize>;
    async fn delete(&self, product_id: Uuid) -> Result<usize>;
}
