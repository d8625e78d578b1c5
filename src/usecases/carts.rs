use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::entities::carts::InsertCartItemEntity;
use crate::domain::repositories::{carts::CartRepository, products::ProductRepository};
use crate::domain::value_objects::carts::{CartDto, CartItemModel, CartLineDto, CartProductDto};

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Cart not found")]
    CartNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CartError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            CartError::CartNotFound => StatusCode::NOT_FOUND,
            CartError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, CartError>;

pub struct CartUseCase<C, P>
where
    C: CartRepository + Send + Sync + 'static,
    P: ProductRepository + Send + Sync + 'static,
{
    cart_repo: Arc<C>,
    product_repo: Arc<P>,
}

impl<C, P> CartUseCase<C, P>
where
    C: CartRepository + Send + Sync + 'static,
    P: ProductRepository + Send + Sync + 'static,
{
    pub fn new(cart_repo: Arc<C>, product_repo: Arc<P>) -> Self {
        Self {
            cart_repo,
            product_repo,
        }
    }

    /// Returns the cart with product details resolved per line. An unknown
    /// session reads as an empty cart. Lines whose product was deleted stay
    /// in `items` but get no entry in `products`.
    pub async fn get_cart(&self, session_id: &str) -> UseCaseResult<CartDto> {
        let lines = self.cart_repo.list_items(session_id).await.map_err(|err| {
            error!(%session_id, db_error = ?err, "carts: failed to load cart");
            CartError::Internal(err)
        })?;

        let mut products = Vec::with_capacity(lines.len());
        for line in &lines {
            let product = self
                .product_repo
                .find_by_id(line.product_id)
                .await
                .map_err(|err| {
                    error!(
                        product_id = %line.product_id,
                        db_error = ?err,
                        "carts: failed to resolve cart product"
                    );
                    CartError::Internal(err)
                })?;

            if let Some(product) = product {
                products.push(CartProductDto {
                    product: product.into(),
                    quantity: line.quantity,
                });
            }
        }

        Ok(CartDto {
            session_id: session_id.to_string(),
            items: lines.into_iter().map(CartLineDto::from).collect(),
            products,
        })
    }

    /// Adds a line, merging quantities when the product is already in the
    /// cart.
    pub async fn add_item(&self, session_id: &str, item: CartItemModel) -> UseCaseResult<()> {
        info!(
            %session_id,
            product_id = %item.product_id,
            quantity = item.quantity,
            "carts: add item"
        );

        let existing = self
            .cart_repo
            .find_item(session_id, item.product_id)
            .await
            .map_err(|err| {
                error!(%session_id, db_error = ?err, "carts: failed to look up cart line");
                CartError::Internal(err)
            })?;

        match existing {
            Some(line) => self
                .cart_repo
                .update_quantity(session_id, item.product_id, line.quantity + item.quantity)
                .await
                .map_err(|err| {
                    error!(%session_id, db_error = ?err, "carts: failed to merge cart line");
                    CartError::Internal(err)
                })?,
            None => {
                let now = Utc::now();
                self.cart_repo
                    .insert_item(InsertCartItemEntity {
                        session_id: session_id.to_string(),
                        product_id: item.product_id,
                        quantity: item.quantity,
                        created_at: now,
                        updated_at: now,
                    })
                    .await
                    .map_err(|err| {
                        error!(%session_id, db_error = ?err, "carts: failed to insert cart line");
                        CartError::Internal(err)
                    })?
            }
        }

        Ok(())
    }

    /// Sets a line's quantity; zero or negative removes the line. A line
    /// for a product not present in the cart is silently left alone.
    pub async fn update_item(&self, session_id: &str, item: CartItemModel) -> UseCaseResult<()> {
        let lines = self.cart_repo.list_items(session_id).await.map_err(|err| {
            error!(%session_id, db_error = ?err, "carts: failed to load cart");
            CartError::Internal(err)
        })?;

        if lines.is_empty() {
            let err = CartError::CartNotFound;
            warn!(
                %session_id,
                status = err.status_code().as_u16(),
                "carts: update on unknown cart"
            );
            return Err(err);
        }

        if !lines.iter().any(|line| line.product_id == item.product_id) {
            return Ok(());
        }

        if item.quantity <= 0 {
            self.cart_repo
                .delete_item(session_id, item.product_id)
                .await
                .map_err(|err| {
                    error!(%session_id, db_error = ?err, "carts: failed to drop cart line");
                    CartError::Internal(err)
                })?;
        } else {
            self.cart_repo
                .update_quantity(session_id, item.product_id, item.quantity)
                .await
                .map_err(|err| {
                    error!(%session_id, db_error = ?err, "carts: failed to update cart line");
                    CartError::Internal(err)
                })?;
        }

        Ok(())
    }

    pub async fn remove_item(&self, session_id: &str, product_id: Uuid) -> UseCaseResult<()> {
        let lines = self.cart_repo.list_items(session_id).await.map_err(|err| {
            error!(%session_id, db_error = ?err, "carts: failed to load cart");
            CartError::Internal(err)
        })?;

        if lines.is_empty() {
            let err = CartError::CartNotFound;
            warn!(
                %session_id,
                status = err.status_code().as_u16(),
                "carts: remove on unknown cart"
            );
            return Err(err);
        }

        self.cart_repo
            .delete_item(session_id, product_id)
            .await
            .map_err(|err| {
                error!(%session_id, db_error = ?err, "carts: failed to remove cart line");
                CartError::Internal(err)
            })?;

        Ok(())
    }

    /// Clearing is idempotent; clearing an unknown session is fine.
    pub async fn clear(&self, session_id: &str) -> UseCaseResult<()> {
        self.cart_repo.clear(session_id).await.map_err(|err| {
            error!(%session_id, db_error = ?err, "carts: failed to clear cart");
            CartError::Internal(err)
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::carts::CartItemEntity;
    use crate::domain::entities::products::ProductEntity;
    use crate::domain::repositories::carts::MockCartRepository;
    use crate::domain::repositories::products::MockProductRepository;
    use mockall::predicate::eq;

    fn cart_line(session_id: &str, product_id: Uuid, quantity: i32) -> CartItemEntity {
        CartItemEntity {
            session_id: session_id.to_string(),
            product_id,
            quantity,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn product(product_id: Uuid) -> ProductEntity {
        ProductEntity {
            id: product_id,
            name_fr: "Canapé".to_string(),
            name_tr: "Koltuk".to_string(),
            name_en: "Sofa".to_string(),
            description_fr: String::new(),
            description_tr: String::new(),
            description_en: String::new(),
            price: 10.0,
            category_id: Uuid::new_v4(),
            images: vec![],
            stock: 5,
            featured: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn add_item_merges_existing_quantity() {
        let product_id = Uuid::new_v4();

        let mut cart_repo = MockCartRepository::new();
        cart_repo
            .expect_find_item()
            .returning(move |session_id, product_id| {
                Ok(Some(cart_line(session_id, product_id, 2)))
            });
        cart_repo
            .expect_update_quantity()
            .withf(move |_, id, quantity| *id == product_id && *quantity == 5)
            .times(1)
            .returning(|_, _, _| Ok(()));
        cart_repo.expect_insert_item().never();

        let usecase = CartUseCase::new(Arc::new(cart_repo), Arc::new(MockProductRepository::new()));

        usecase
            .add_item(
                "s1",
                CartItemModel {
                    product_id,
                    quantity: 3,
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn add_item_inserts_new_line() {
        let product_id = Uuid::new_v4();

        let mut cart_repo = MockCartRepository::new();
        cart_repo.expect_find_item().returning(|_, _| Ok(None));
        cart_repo
            .expect_insert_item()
            .withf(move |item| item.product_id == product_id && item.quantity == 1)
            .times(1)
            .returning(|_| Ok(()));

        let usecase = CartUseCase::new(Arc::new(cart_repo), Arc::new(MockProductRepository::new()));

        usecase
            .add_item(
                "s1",
                CartItemModel {
                    product_id,
                    quantity: 1,
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_item_removes_line_at_zero_quantity() {
        let product_id = Uuid::new_v4();

        let mut cart_repo = MockCartRepository::new();
        cart_repo
            .expect_list_items()
            .returning(move |session_id| Ok(vec![cart_line(session_id, product_id, 2)]));
        cart_repo
            .expect_delete_item()
            .withf(move |_, id| *id == product_id)
            .times(1)
            .returning(|_, _| Ok(()));
        cart_repo.expect_update_quantity().never();

        let usecase = CartUseCase::new(Arc::new(cart_repo), Arc::new(MockProductRepository::new()));

        usecase
            .update_item(
                "s1",
                CartItemModel {
                    product_id,
                    quantity: 0,
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_item_fails_on_unknown_cart() {
        let mut cart_repo = MockCartRepository::new();
        cart_repo.expect_list_items().returning(|_| Ok(vec![]));

        let usecase = CartUseCase::new(Arc::new(cart_repo), Arc::new(MockProductRepository::new()));

        let result = usecase
            .update_item(
                "missing",
                CartItemModel {
                    product_id: Uuid::new_v4(),
                    quantity: 1,
                },
            )
            .await;

        assert!(matches!(result, Err(CartError::CartNotFound)));
    }

    #[tokio::test]
    async fn get_cart_keeps_lines_but_skips_vanished_products() {
        let product_a = Uuid::new_v4();
        let product_gone = Uuid::new_v4();

        let mut cart_repo = MockCartRepository::new();
        cart_repo.expect_list_items().returning(move |session_id| {
            Ok(vec![
                cart_line(session_id, product_a, 1),
                cart_line(session_id, product_gone, 2),
            ])
        });

        let mut product_repo = MockProductRepository::new();
        product_repo
            .expect_find_by_id()
            .with(eq(product_a))
            .returning(move |id| Ok(Some(product(id))));
        product_repo
            .expect_find_by_id()
            .with(eq(product_gone))
            .returning(|_| Ok(None));

        let usecase = CartUseCase::new(Arc::new(cart_repo), Arc::new(product_repo));

        let cart = usecase.get_cart("s1").await.unwrap();

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.products.len(), 1);
        assert_eq!(cart.products[0].product.id, product_a);
    }

    #[tokio::test]
    async fn get_cart_reads_unknown_session_as_empty() {
        let mut cart_repo = MockCartRepository::new();
        cart_repo.expect_list_items().returning(|_| Ok(vec![]));

        let usecase = CartUseCase::new(Arc::new(cart_repo), Arc::new(MockProductRepository::new()));

        let cart = usecase.get_cart("unknown").await.unwrap();

        assert_eq!(cart.session_id, "unknown");
        assert!(cart.items.is_empty());
        assert!(cart.products.is_empty());
    }
}
