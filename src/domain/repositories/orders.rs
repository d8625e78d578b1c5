use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::orders::{
    InsertOrderEntity, InsertOrderItemEntity, OrderEntity, OrderItemEntity,
};

#[automock]
#[async_trait]
pub trait OrderRepository {
    /// Inserts the order header and its line-item snapshots atomically.
    async fn create(
        &self,
        order: InsertOrderEntity,
        items: Vec<InsertOrderItemEntity>,
    ) -> Result<Uuid>;
    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<OrderEntity>>;
    async fn list_items(&self, order_id: Uuid) -> Result<Vec<OrderItemEntity>>;
    async fn list_all(&self) -> Result<Vec<OrderEntity>>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<OrderEntity>>;
    async fn set_payment_session(&self, order_id: Uuid, session_id: &str) -> Result<()>;
    /// Idempotent promotion; only ever writes `paid`.
    async fn mark_paid(&self, order_id: Uuid) -> Result<()>;
}
