use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::entities::contact_messages::InsertContactMessageEntity;
use crate::domain::repositories::contact_messages::ContactMessageRepository;
use crate::domain::value_objects::contact_messages::{ContactMessageDto, InsertContactMessageModel};

#[derive(Debug, Error)]
pub enum ContactError {
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ContactError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    }
}

pub type UseCaseResult<T> = std::result::Result<T, ContactError>;

pub struct ContactUseCase<M>
where
    M: ContactMessageRepository + Send + Sync + 'static,
{
    message_repo: Arc<M>,
}

impl<M> ContactUseCase<M>
where
    M: ContactMessageRepository + Send + Sync + 'static,
{
    pub fn new(message_repo: Arc<M>) -> Self {
        Self { message_repo }
    }

    pub async fn submit_message(
        &self,
        model: InsertContactMessageModel,
    ) -> UseCaseResult<ContactMessageDto> {
        let message = InsertContactMessageEntity {
            id: Uuid::new_v4(),
            name: model.name,
            email: model.email,
            phone: model.phone,
            message: model.message,
            created_at: Utc::now(),
        };

        self.message_repo
            .create(message.clone())
            .await
            .map_err(|err| {
                error!(db_error = ?err, "contact: failed to store message");
                ContactError::Internal(err)
            })?;

        info!(message_id = %message.id, "contact: message stored");

        Ok(ContactMessageDto {
            id: message.id,
            name: message.name,
            email: message.email,
            phone: message.phone,
            message: message.message,
            created_at: message.created_at,
        })
    }
}
