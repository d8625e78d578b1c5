use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::products::ProductEntity;

#[derive(Debug, Clone, Deserialize)]
pub struct InsertProductModel {
    pub name_fr: String,
    pub name_tr: String,
    pub name_en: String,
    pub description_fr: String,
    pub description_tr: String,
    pub description_en: String,
    pub price: f64,
    pub category_id: Uuid,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListProductsFilter {
    pub category_id: Option<Uuid>,
    pub featured: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductDto {
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

impl From<ProductEntity> for ProductDto {
    fn from(entity: ProductEntity) -> Self {
        Self {
            id: entity.id,
            name_fr: entity.name_fr,
            name_tr: entity.name_tr,
            name_en: entity.name_en,
            description_fr: entity.description_fr,
            description_tr: entity.description_tr,
            description_en: entity.description_en,
            price: entity.price,
            category_id: entity.category_id,
            images: entity.images,
            stock: entity.stock,
            featured: entity.featured,
            created_at: entity.created_at,
        }
    }
}
