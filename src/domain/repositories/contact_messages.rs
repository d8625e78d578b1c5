use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::contact_messages::InsertContactMessageEntity;

#[automock]
#[async_trait]
pub trait ContactMessageRepository {
    async fn create(&self, message: InsertContactMessageEntity) -> Result<Uuid>;
}
