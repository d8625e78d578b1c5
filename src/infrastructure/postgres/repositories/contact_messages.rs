use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::contact_messages::InsertContactMessageEntity;
use crate::domain::repositories::contact_messages::ContactMessageRepository;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad, schema::contact_messages,
};

pub struct ContactMessagePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ContactMessagePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ContactMessageRepository for ContactMessagePostgres {
    async fn create(&self, message: InsertContactMessageEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let message_id = insert_into(contact_messages::table)
            .values(&message)
            .returning(contact_messages::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(message_id)
    }
}
