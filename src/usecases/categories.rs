use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::entities::categories::InsertCategoryEntity;
use crate::domain::repositories::categories::CategoryRepository;
use crate::domain::value_objects::categories::{CategoryDto, InsertCategoryModel};

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CategoryError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    }
}

pub type UseCaseResult<T> = std::result::Result<T, CategoryError>;

pub struct CategoryUseCase<C>
where
    C: CategoryRepository + Send + Sync + 'static,
{
    category_repo: Arc<C>,
}

impl<C> CategoryUseCase<C>
where
    C: CategoryRepository + Send + Sync + 'static,
{
    pub fn new(category_repo: Arc<C>) -> Self {
        Self { category_repo }
    }

    pub async fn list_categories(&self) -> UseCaseResult<Vec<CategoryDto>> {
        let categories = self.category_repo.list().await.map_err(|err| {
            error!(db_error = ?err, "categories: failed to list categories");
            CategoryError::Internal(err)
        })?;

        Ok(categories.into_iter().map(CategoryDto::from).collect())
    }

    pub async fn create_category(&self, model: InsertCategoryModel) -> UseCaseResult<CategoryDto> {
        let category = InsertCategoryEntity {
            id: Uuid::new_v4(),
            name_fr: model.name_fr,
            name_tr: model.name_tr,
            name_en: model.name_en,
            slug: model.slug,
            image_url: model.image_url,
            created_at: Utc::now(),
        };

        self.category_repo
            .create(category.clone())
            .await
            .map_err(|err| {
                error!(db_error = ?err, "categories: failed to create category");
                CategoryError::Internal(err)
            })?;

        info!(category_id = %category.id, slug = %category.slug, "categories: category created");

        Ok(CategoryDto {
            id: category.id,
            name_fr: category.name_fr,
            name_tr: category.name_tr,
            name_en: category.name_en,
            slug: category.slug,
            image_url: category.image_url,
            created_at: category.created_at,
        })
    }
}
