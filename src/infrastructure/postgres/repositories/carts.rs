use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::carts::{CartItemEntity, InsertCartItemEntity};
use crate::domain::repositories::carts::CartRepository;
use crate::infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::cart_items};

pub struct CartPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl CartPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CartRepository for CartPostgres {
    async fn list_items(&self, session_id: &str) -> Result<Vec<CartItemEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = cart_items::table
            .filter(cart_items::session_id.eq(session_id))
            .order(cart_items::created_at.asc())
            .select(CartItemEntity::as_select())
            .load::<CartItemEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_item(
        &self,
        session_id: &str,
        product_id: Uuid,
    ) -> Result<Option<CartItemEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = cart_items::table
            .find((session_id, product_id))
            .select(CartItemEntity::as_select())
            .first::<CartItemEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn insert_item(&self, item: InsertCartItemEntity) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        insert_into(cart_items::table)
            .values(&item)
            .execute(&mut conn)?;

        Ok(())
    }

    async fn update_quantity(
        &self,
        session_id: &str,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(cart_items::table)
            .filter(cart_items::session_id.eq(session_id))
            .filter(cart_items::product_id.eq(product_id))
            .set((
                cart_items::quantity.eq(quantity),
                cart_items::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn delete_item(&self, session_id: &str, product_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        delete(cart_items::table)
            .filter(cart_items::session_id.eq(session_id))
            .filter(cart_items::product_id.eq(product_id))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn clear(&self, session_id: &str) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        delete(cart_items::table)
            .filter(cart_items::session_id.eq(session_id))
            .execute(&mut conn)?;

        Ok(())
    }
}
