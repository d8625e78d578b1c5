use anyhow::Result;
use async_trait::async_trait;
use diesel::{AsChangeset, RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::products::{InsertProductEntity, ProductEntity};
use crate::domain::repositories::products::ProductRepository;
use crate::domain::value_objects::products::{InsertProductModel, ListProductsFilter};
use crate::infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::products};

#[derive(AsChangeset)]
#[diesel(table_name = products)]
struct ProductChangeset {
    name_fr: String,
    name_tr: String,
    name_en: String,
    description_fr: String,
    description_tr: String,
    description_en: String,
    price: f64,
    category_id: Uuid,
    images: Vec<String>,
    stock: i32,
    featured: bool,
}

pub struct ProductPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ProductPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ProductRepository for ProductPostgres {
    async fn create(&self, product: InsertProductEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let product_id = insert_into(products::table)
            .values(&product)
            .returning(products::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(product_id)
    }

    async fn find_by_id(&self, product_id: Uuid) -> Result<Option<ProductEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = products::table
            .find(product_id)
            .select(ProductEntity::as_select())
            .first::<ProductEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list(&self, filter: &ListProductsFilter) -> Result<Vec<ProductEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = products::table
            .select(ProductEntity::as_select())
            .into_boxed();
        if let Some(category_id) = filter.category_id {
            query = query.filter(products::category_id.eq(category_id));
        }
        if let Some(featured) = filter.featured {
            query = query.filter(products::featured.eq(featured));
        }

        let results = query
            .order(products::created_at.asc())
            .load::<ProductEntity>(&mut conn)?;

        Ok(results)
    }

    async fn update(&self, product_id: Uuid, changes: InsertProductModel) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let touched = update(products::table)
            .filter(products::id.eq(product_id))
            .set(ProductChangeset {
                name_fr: changes.name_fr,
                name_tr: changes.name_tr,
                name_en: changes.name_en,
                description_fr: changes.description_fr,
                description_tr: changes.description_tr,
                description_en: changes.description_en,
                price: changes.price,
                category_id: changes.category_id,
                images: changes.images,
                stock: changes.stock,
                featured: changes.featured,
            })
            .execute(&mut conn)?;

        Ok(touched)
    }

    async fn delete(&self, product_id: Uuid) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let touched = delete(products::table)
            .filter(products::id.eq(product_id))
            .execute(&mut conn)?;

        Ok(touched)
    }
}
