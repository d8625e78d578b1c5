use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::entities::products::InsertProductEntity;
use crate::domain::repositories::products::ProductRepository;
use crate::domain::value_objects::products::{InsertProductModel, ListProductsFilter, ProductDto};

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found")]
    ProductNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ProductError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            ProductError::ProductNotFound => StatusCode::NOT_FOUND,
            ProductError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, ProductError>;

pub struct ProductUseCase<P>
where
    P: ProductRepository + Send + Sync + 'static,
{
    product_repo: Arc<P>,
}

impl<P> ProductUseCase<P>
where
    P: ProductRepository + Send + Sync + 'static,
{
    pub fn new(product_repo: Arc<P>) -> Self {
        Self { product_repo }
    }

    pub async fn list_products(&self, filter: ListProductsFilter) -> UseCaseResult<Vec<ProductDto>> {
        let products = self.product_repo.list(&filter).await.map_err(|err| {
            error!(db_error = ?err, "products: failed to list products");
            ProductError::Internal(err)
        })?;

        Ok(products.into_iter().map(ProductDto::from).collect())
    }

    pub async fn get_product(&self, product_id: Uuid) -> UseCaseResult<ProductDto> {
        let product = self
            .product_repo
            .find_by_id(product_id)
            .await
            .map_err(|err| {
                error!(%product_id, db_error = ?err, "products: failed to load product");
                ProductError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = ProductError::ProductNotFound;
                warn!(
                    %product_id,
                    status = err.status_code().as_u16(),
                    "products: product not found"
                );
                err
            })?;

        Ok(product.into())
    }

    pub async fn create_product(&self, model: InsertProductModel) -> UseCaseResult<ProductDto> {
        let product = InsertProductEntity {
            id: Uuid::new_v4(),
            name_fr: model.name_fr,
            name_tr: model.name_tr,
            name_en: model.name_en,
            description_fr: model.description_fr,
            description_tr: model.description_tr,
            description_en: model.description_en,
            price: model.price,
            category_id: model.category_id,
            images: model.images,
            stock: model.stock,
            featured: model.featured,
            created_at: Utc::now(),
        };

        self.product_repo
            .create(product.clone())
            .await
            .map_err(|err| {
                error!(db_error = ?err, "products: failed to create product");
                ProductError::Internal(err)
            })?;

        info!(product_id = %product.id, "products: product created");

        Ok(ProductDto {
            id: product.id,
            name_fr: product.name_fr,
            name_tr: product.name_tr,
            name_en: product.name_en,
            description_fr: product.description_fr,
            description_tr: product.description_tr,
            description_en: product.description_en,
            price: product.price,
            category_id: product.category_id,
            images: product.images,
            stock: product.stock,
            featured: product.featured,
            created_at: product.created_at,
        })
    }

    pub async fn update_product(
        &self,
        product_id: Uuid,
        model: InsertProductModel,
    ) -> UseCaseResult<ProductDto> {
        let touched = self
            .product_repo
            .update(product_id, model)
            .await
            .map_err(|err| {
                error!(%product_id, db_error = ?err, "products: failed to update product");
                ProductError::Internal(err)
            })?;

        if touched == 0 {
            let err = ProductError::ProductNotFound;
            warn!(
                %product_id,
                status = err.status_code().as_u16(),
                "products: update on unknown product"
            );
            return Err(err);
        }

        self.get_product(product_id).await
    }

    pub async fn delete_product(&self, product_id: Uuid) -> UseCaseResult<()> {
        let touched = self
            .product_repo
            .delete(product_id)
            .await
            .map_err(|err| {
                error!(%product_id, db_error = ?err, "products: failed to delete product");
                ProductError::Internal(err)
            })?;

        if touched == 0 {
            let err = ProductError::ProductNotFound;
            warn!(
                %product_id,
                status = err.status_code().as_u16(),
                "products: delete on unknown product"
            );
            return Err(err);
        }

        info!(%product_id, "products: product deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::products::MockProductRepository;

    #[tokio::test]
    async fn get_product_fails_when_missing() {
        let mut product_repo = MockProductRepository::new();
        product_repo.expect_find_by_id().returning(|_| Ok(None));

        let usecase = ProductUseCase::new(Arc::new(product_repo));

        let result = usecase.get_product(Uuid::new_v4()).await;

        assert!(matches!(result, Err(ProductError::ProductNotFound)));
    }

    #[tokio::test]
    async fn delete_product_fails_when_missing() {
        let mut product_repo = MockProductRepository::new();
        product_repo.expect_delete().returning(|_| Ok(0));

        let usecase = ProductUseCase::new(Arc::new(product_repo));

        let result = usecase.delete_product(Uuid::new_v4()).await;

        assert!(matches!(result, Err(ProductError::ProductNotFound)));
    }
}
