use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::entities::categories::InsertCategoryEntity;
use crate::domain::entities::products::InsertProductEntity;
use crate::domain::repositories::{categories::CategoryRepository, products::ProductRepository};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SeedError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    }
}

pub type UseCaseResult<T> = std::result::Result<T, SeedError>;

#[derive(Debug, Serialize)]
pub struct SeedReport {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<usize>,
}

/// Populates demo catalog data on an empty store. Runs at most once; any
/// existing category makes it a no-op.
pub struct SeedUseCase<C, P>
where
    C: CategoryRepository + Send + Sync + 'static,
    P: ProductRepository + Send + Sync + 'static,
{
    category_repo: Arc<C>,
    product_repo: Arc<P>,
}

impl<C, P> SeedUseCase<C, P>
where
    C: CategoryRepository + Send + Sync + 'static,
    P: ProductRepository + Send + Sync + 'static,
{
    pub fn new(category_repo: Arc<C>, product_repo: Arc<P>) -> Self {
        Self {
            category_repo,
            product_repo,
        }
    }

    pub async fn seed(&self) -> UseCaseResult<SeedReport> {
        let existing = self.category_repo.count().await.map_err(|err| {
            error!(db_error = ?err, "seed: failed to count categories");
            SeedError::Internal(err)
        })?;

        if existing > 0 {
            info!(existing, "seed: catalog already populated, skipping");
            return Ok(SeedReport {
                message: "Data already seeded".to_string(),
                categories: None,
                products: None,
            });
        }

        let now = Utc::now();

        let furniture = InsertCategoryEntity {
            id: Uuid::new_v4(),
            name_fr: "Mobilier".to_string(),
            name_tr: "Mobilya".to_string(),
            name_en: "Furniture".to_string(),
            slug: "furniture".to_string(),
            image_url: None,
            created_at: now,
        };
        let bedroom = InsertCategoryEntity {
            id: Uuid::new_v4(),
            name_fr: "Chambre à coucher".to_string(),
            name_tr: "Yatak Odası".to_string(),
            name_en: "Bedroom".to_string(),
            slug: "bedroom".to_string(),
            image_url: None,
            created_at: now,
        };

        let products = vec![
            InsertProductEntity {
                id: Uuid::new_v4(),
                name_fr: "Canapé Moderne Gris".to_string(),
                name_tr: "Modern Gri Koltuk".to_string(),
                name_en: "Modern Grey Sofa".to_string(),
                description_fr: "Canapé confortable en tissu gris.".to_string(),
                description_tr: "Gri kumaştan konforlu koltuk.".to_string(),
                description_en: "Comfortable sofa in grey fabric.".to_string(),
                price: 1299.00,
                category_id: furniture.id,
                images: vec![],
                stock: 10,
                featured: true,
                created_at: now,
            },
            InsertProductEntity {
                id: Uuid::new_v4(),
                name_fr: "Table à Manger Design".to_string(),
                name_tr: "Tasarım Yemek Masası".to_string(),
                name_en: "Design Dining Table".to_string(),
                description_fr: "Table en bois massif, pieds en métal.".to_string(),
                description_tr: "Metal ayaklı masif ahşap masa.".to_string(),
                description_en: "Solid wood table with metal legs.".to_string(),
                price: 899.00,
                category_id: furniture.id,
                images: vec![],
                stock: 8,
                featured: true,
                created_at: now,
            },
            InsertProductEntity {
                id: Uuid::new_v4(),
                name_fr: "Lit Queen Size".to_string(),
                name_tr: "Çift Kişilik Yatak".to_string(),
                name_en: "Queen Size Bed".to_string(),
                description_fr: "Lit avec tête de lit capitonnée.".to_string(),
                description_tr: "Kapitone başlıklı yatak.".to_string(),
                description_en: "Bed with tufted headboard.".to_string(),
                price: 1499.00,
                category_id: bedroom.id,
                images: vec![],
                stock: 5,
                featured: false,
                created_at: now,
            },
        ];

        let categories = vec![furniture, bedroom];
        let category_count = categories.len();
        let product_count = products.len();

        for category in categories {
            self.category_repo.create(category).await.map_err(|err| {
                error!(db_error = ?err, "seed: failed to insert category");
                SeedError::Internal(err)
            })?;
        }

        for product in products {
            self.product_repo.create(product).await.map_err(|err| {
                error!(db_error = ?err, "seed: failed to insert product");
                SeedError::Internal(err)
            })?;
        }

        info!(
            categories = category_count,
            products = product_count,
            "seed: demo catalog inserted"
        );

        Ok(SeedReport {
            message: "Data seeded successfully".to_string(),
            categories: Some(category_count),
            products: Some(product_count),
        })
    }
}
