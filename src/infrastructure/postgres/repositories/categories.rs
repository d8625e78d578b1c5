use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::categories::{CategoryEntity, InsertCategoryEntity};
use crate::domain::repositories::categories::CategoryRepository;
use crate::infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::categories};

pub struct CategoryPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl CategoryPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CategoryRepository for CategoryPostgres {
    async fn create(&self, category: InsertCategoryEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let category_id = insert_into(categories::table)
            .values(&category)
            .returning(categories::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(category_id)
    }

    async fn list(&self) -> Result<Vec<CategoryEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = categories::table
            .order(categories::created_at.asc())
            .select(CategoryEntity::as_select())
            .load::<CategoryEntity>(&mut conn)?;

        Ok(results)
    }

    async fn count(&self) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = categories::table.count().get_result::<i64>(&mut conn)?;

        Ok(total)
    }
}
