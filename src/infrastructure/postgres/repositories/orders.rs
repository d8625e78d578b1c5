use anyhow::Result;
use async_trait::async_trait;
use diesel::{Connection, RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::orders::{
    InsertOrderEntity, InsertOrderItemEntity, OrderEntity, OrderItemEntity,
};
use crate::domain::repositories::orders::OrderRepository;
use crate::domain::value_objects::enums::order_statuses::OrderStatus;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    schema::{order_items, orders},
};

pub struct OrderPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl OrderPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl OrderRepository for OrderPostgres {
    async fn create(
        &self,
        order: InsertOrderEntity,
        items: Vec<InsertOrderItemEntity>,
    ) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let order_id = order.id;

        conn.transaction::<_, anyhow::Error, _>(|conn| {
            insert_into(orders::table).values(&order).execute(conn)?;
            insert_into(order_items::table).values(&items).execute(conn)?;
            Ok(())
        })?;

        Ok(order_id)
    }

    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = orders::table
            .find(order_id)
            .select(OrderEntity::as_select())
            .first::<OrderEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_items(&self, order_id: Uuid) -> Result<Vec<OrderItemEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = order_items::table
            .filter(order_items::order_id.eq(order_id))
            .order(order_items::position.asc())
            .select(OrderItemEntity::as_select())
            .load::<OrderItemEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_all(&self) -> Result<Vec<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = orders::table
            .order(orders::created_at.desc())
            .select(OrderEntity::as_select())
            .load::<OrderEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = orders::table
            .filter(orders::user_id.eq(user_id))
            .order(orders::created_at.desc())
            .select(OrderEntity::as_select())
            .load::<OrderEntity>(&mut conn)?;

        Ok(results)
    }

    async fn set_payment_session(&self, order_id: Uuid, session_id: &str) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(orders::table)
            .filter(orders::id.eq(order_id))
            .set(orders::payment_session_id.eq(session_id))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn mark_paid(&self, order_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(orders::table)
            .filter(orders::id.eq(order_id))
            .set(orders::status.eq(OrderStatus::Paid.to_string()))
            .execute(&mut conn)?;

        Ok(())
    }
}
