use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::products;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = products)]
pub struct ProductEntity {
    pub id: Uuid,
    pub name_fr: String,
    pub name_tr: String,
    pub name_en: String,
    pub description_fr: String,
    pub description_tr: String,
    pub description_en: String,
    pub price: f64,
    pub category_id: Uuid,
    pub images: Vec<String>,
    pub stock: i32,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = products)]
pub struct InsertProductEntity {
    pub id: Uuid,
    pub name_fr: String,
    pub name_tr: String,
    pub name_en: String,
    pub description_fr: String,
    pub description_tr: String,
    pub description_en: String,
    pub price: f64,
    pub category_id: Uuid,
    pub images: Vec<String>,
    pub stock: i32,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}
