use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::categories::CategoryEntity;

#[derive(Debug, Clone, Deserialize)]
pub struct InsertCategoryModel {
    pub name_fr: String,
    pub name_tr: String,
    pub name_en: String,
    pub slug: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryDto {
    pub id: Uuid,
    pub name_fr: String,
    pub name_tr: String,
    pub name_en: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<CategoryEntity> for CategoryDto {
    fn from(entity: CategoryEntity) -> Self {
        Self {
            id: entity.id,
            name_fr: entity.name_fr,
            name_tr: entity.name_tr,
            name_en: entity.name_en,
            slug: entity.slug,
            image_url: entity.image_url,
            created_at: entity.created_at,
        }
    }
}
