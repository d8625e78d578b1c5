use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::carts::{CartItemEntity, InsertCartItemEntity};

#[automock]
#[async_trait]
pub trait CartRepository {
    async fn list_items(&self, session_id: &str) -> Result<Vec<CartItemEntity>>;
    async fn find_item(&self, session_id: &str, product_id: Uuid)
        -> Result<Option<CartItemEntity>>;
    async fn insert_item(&self, item: InsertCartItemEntity) -> Result<()>;
    async fn update_quantity(
        &self,
        session_id: &str,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<()>;
    async fn delete_item(&self, session_id: &str, product_id: Uuid) -> Result<()>;
    async fn clear(&self, session_id: &str) -> Result<()>;
}
