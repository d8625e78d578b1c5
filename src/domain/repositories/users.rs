use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::users::{InsertUserEntity, UserEntity};
use crate::domain::value_objects::users::UpdateProfileModel;

#[automock]
#[async_trait]
pub trait UserRepository {
    async fn create(&self, user: InsertUserEntity) -> Result<Uuid>;
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>>;
    async fn update_profile(&self, user_id: Uuid, changes: UpdateProfileModel) -> Result<()>;
}
