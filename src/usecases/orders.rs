use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::entities::orders::{InsertOrderEntity, InsertOrderItemEntity};
use crate::domain::repositories::{
    carts::CartRepository, orders::OrderRepository, products::ProductRepository,
};
use crate::domain::value_objects::enums::order_statuses::OrderStatus;
use crate::domain::value_objects::orders::{CreateOrderModel, OrderDto, OrderItemDto};

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Order not found")]
    OrderNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl OrderError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            OrderError::EmptyCart => StatusCode::BAD_REQUEST,
            OrderError::OrderNotFound => StatusCode::NOT_FOUND,
            OrderError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, OrderError>;

pub struct OrderUseCase<C, P, O>
where
    C: CartRepository + Send + Sync + 'static,
    P: ProductRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    cart_repo: Arc<C>,
    product_repo: Arc<P>,
    order_repo: Arc<O>,
}

impl<C, P, O> OrderUseCase<C, P, O>
where
    C: CartRepository + Send + Sync + 'static,
    P: ProductRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    pub fn new(cart_repo: Arc<C>, product_repo: Arc<P>, order_repo: Arc<O>) -> Self {
        Self {
            cart_repo,
            product_repo,
            order_repo,
        }
    }

    /// Converts a cart into an immutable order snapshot. Line items capture
    /// the product's localized names and price at this moment; later price
    /// changes never touch existing orders. Cart lines whose product has
    /// been deleted since they were added are skipped on purpose rather
    /// than failing the whole order.
    pub async fn create_order(
        &self,
        model: CreateOrderModel,
        user_id: Option<Uuid>,
    ) -> UseCaseResult<OrderDto> {
        info!(
            cart_session_id = %model.cart_session_id,
            user_id = ?user_id,
            "orders: create order requested"
        );

        let cart_lines = self
            .cart_repo
            .list_items(&model.cart_session_id)
            .await
            .map_err(|err| {
                error!(
                    cart_session_id = %model.cart_session_id,
                    db_error = ?err,
                    "orders: failed to load cart"
                );
                OrderError::Internal(err)
            })?;

        if cart_lines.is_empty() {
            let err = OrderError::EmptyCart;
            warn!(
                cart_session_id = %model.cart_session_id,
                status = err.status_code().as_u16(),
                "orders: cart is missing or empty"
            );
            return Err(err);
        }

        let order_id = Uuid::new_v4();
        let now = Utc::now();
        let mut items: Vec<InsertOrderItemEntity> = Vec::new();
        let mut total = 0.0;

        for line in cart_lines {
            let product = self
                .product_repo
                .find_by_id(line.product_id)
                .await
                .map_err(|err| {
                    error!(
                        product_id = %line.product_id,
                        db_error = ?err,
                        "orders: failed to resolve cart line product"
                    );
                    OrderError::Internal(err)
                })?;

            let Some(product) = product else {
                warn!(
                    product_id = %line.product_id,
                    cart_session_id = %model.cart_session_id,
                    "orders: skipping cart line, product no longer exists"
                );
                continue;
            };

            let subtotal = product.price * f64::from(line.quantity);
            total += subtotal;

            items.push(InsertOrderItemEntity {
                id: Uuid::new_v4(),
                order_id,
                position: items.len() as i32,
                product_id: product.id,
                name_fr: product.name_fr,
                name_tr: product.name_tr,
                name_en: product.name_en,
                price: product.price,
                quantity: line.quantity,
                subtotal,
            });
        }

        let order = InsertOrderEntity {
            id: order_id,
            user_id,
            customer_name: model.customer_name,
            customer_email: model.customer_email,
            customer_phone: model.customer_phone,
            customer_address: model.customer_address,
            total,
            status: OrderStatus::Pending.to_string(),
            created_at: now,
        };

        self.order_repo
            .create(order.clone(), items.clone())
            .await
            .map_err(|err| {
                error!(
                    %order_id,
                    db_error = ?err,
                    "orders: failed to persist order"
                );
                OrderError::Internal(err)
            })?;

        info!(
            %order_id,
            total,
            item_count = items.len(),
            "orders: order created"
        );

        Ok(OrderDto {
            id: order.id,
            user_id: order.user_id,
            customer_name: order.customer_name,
            customer_email: order.customer_email,
            customer_phone: order.customer_phone,
            customer_address: order.customer_address,
            items: items.into_iter().map(OrderItemDto::from).collect(),
            total: order.total,
            status: order.status,
            payment_session_id: None,
            created_at: order.created_at,
        })
    }

    pub async fn get_order(&self, order_id: Uuid) -> UseCaseResult<OrderDto> {
        let order = self
            .order_repo
            .find_by_id(order_id)
            .await
            .map_err(|err| {
                error!(%order_id, db_error = ?err, "orders: failed to load order");
                OrderError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = OrderError::OrderNotFound;
                warn!(
                    %order_id,
                    status = err.status_code().as_u16(),
                    "orders: order not found"
                );
                err
            })?;

        let items = self.order_repo.list_items(order_id).await.map_err(|err| {
            error!(%order_id, db_error = ?err, "orders: failed to load order items");
            OrderError::Internal(err)
        })?;

        Ok(OrderDto::from_parts(order, items))
    }

    pub async fn list_orders(&self) -> UseCaseResult<Vec<OrderDto>> {
        let orders = self.order_repo.list_all().await.map_err(|err| {
            error!(db_error = ?err, "orders: failed to list orders");
            OrderError::Internal(err)
        })?;

        let mut dtos = Vec::with_capacity(orders.len());
        for order in orders {
            let items = self.order_repo.list_items(order.id).await.map_err(|err| {
                error!(order_id = %order.id, db_error = ?err, "orders: failed to load order items");
                OrderError::Internal(err)
            })?;
            dtos.push(OrderDto::from_parts(order, items));
        }

        Ok(dtos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::carts::CartItemEntity;
    use crate::domain::entities::products::ProductEntity;
    use crate::domain::repositories::carts::MockCartRepository;
    use crate::domain::repositories::orders::MockOrderRepository;
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

    fn product(product_id: Uuid, name: &str, price: f64) -> ProductEntity {
        ProductEntity {
            id: product_id,
            name_fr: format!("{name} fr"),
            name_tr: format!("{name} tr"),
            name_en: name.to_string(),
            description_fr: String::new(),
            description_tr: String::new(),
            description_en: String::new(),
            price,
            category_id: Uuid::new_v4(),
            images: vec![],
            stock: 10,
            featured: false,
            created_at: Utc::now(),
        }
    }

    fn create_model(session_id: &str) -> CreateOrderModel {
        CreateOrderModel {
            customer_name: "Jean Dupont".to_string(),
            customer_email: "jean@example.com".to_string(),
            customer_phone: "+33123456789".to_string(),
            customer_address: "1 rue de la Paix, Paris".to_string(),
            cart_session_id: session_id.to_string(),
        }
    }

    #[tokio::test]
    async fn create_order_snapshots_items_and_total() {
        let product_a = Uuid::new_v4();
        let product_b = Uuid::new_v4();

        let mut cart_repo = MockCartRepository::new();
        cart_repo.expect_list_items().returning(move |session_id| {
            Ok(vec![
                cart_line(session_id, product_a, 2),
                cart_line(session_id, product_b, 1),
            ])
        });

        let mut product_repo = MockProductRepository::new();
        product_repo
            .expect_find_by_id()
            .with(eq(product_a))
            .returning(move |id| Ok(Some(product(id, "Sofa", 10.0))));
        product_repo
            .expect_find_by_id()
            .with(eq(product_b))
            .returning(move |id| Ok(Some(product(id, "Chair", 5.0))));

        let mut order_repo = MockOrderRepository::new();
        order_repo
            .expect_create()
            .withf(|order, items| {
                order.total == 25.0
                    && order.status == "pending"
                    && items.len() == 2
                    && items[0].subtotal == 20.0
                    && items[1].subtotal == 5.0
                    && items[0].position == 0
                    && items[1].position == 1
            })
            .returning(|order, _| Ok(order.id));

        let usecase = OrderUseCase::new(
            Arc::new(cart_repo),
            Arc::new(product_repo),
            Arc::new(order_repo),
        );

        let dto = usecase
            .create_order(create_model("s1"), None)
            .await
            .unwrap();

        assert_eq!(dto.total, 25.0);
        assert_eq!(dto.status, "pending");
        assert_eq!(dto.items.len(), 2);
        assert_eq!(dto.items[0].quantity, 2);
        assert_eq!(dto.items[0].subtotal, 20.0);
        assert_eq!(dto.items[1].subtotal, 5.0);
        assert!(dto.user_id.is_none());
        assert!(dto.payment_session_id.is_none());
    }

    #[tokio::test]
    async fn create_order_fails_on_empty_cart() {
        let mut cart_repo = MockCartRepository::new();
        cart_repo.expect_list_items().returning(|_| Ok(vec![]));

        let product_repo = MockProductRepository::new();
        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_create().never();

        let usecase = OrderUseCase::new(
            Arc::new(cart_repo),
            Arc::new(product_repo),
            Arc::new(order_repo),
        );

        let result = usecase.create_order(create_model("missing"), None).await;

        assert!(matches!(result, Err(OrderError::EmptyCart)));
    }

    #[tokio::test]
    async fn create_order_skips_vanished_products() {
        let product_a = Uuid::new_v4();
        let product_gone = Uuid::new_v4();

        let mut cart_repo = MockCartRepository::new();
        cart_repo.expect_list_items().returning(move |session_id| {
            Ok(vec![
                cart_line(session_id, product_a, 2),
                cart_line(session_id, product_gone, 4),
            ])
        });

        let mut product_repo = MockProductRepository::new();
        product_repo
            .expect_find_by_id()
            .with(eq(product_a))
            .returning(move |id| Ok(Some(product(id, "Sofa", 10.0))));
        product_repo
            .expect_find_by_id()
            .with(eq(product_gone))
            .returning(|_| Ok(None));

        let mut order_repo = MockOrderRepository::new();
        order_repo
            .expect_create()
            .withf(move |order, items| {
                order.total == 20.0 && items.len() == 1 && items[0].product_id == product_a
            })
            .returning(|order, _| Ok(order.id));

        let usecase = OrderUseCase::new(
            Arc::new(cart_repo),
            Arc::new(product_repo),
            Arc::new(order_repo),
        );

        let dto = usecase
            .create_order(create_model("s1"), None)
            .await
            .unwrap();

        assert_eq!(dto.total, 20.0);
        assert_eq!(dto.items.len(), 1);
    }

    #[tokio::test]
    async fn create_order_stamps_authenticated_owner() {
        let product_a = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut cart_repo = MockCartRepository::new();
        cart_repo
            .expect_list_items()
            .returning(move |session_id| Ok(vec![cart_line(session_id, product_a, 1)]));

        let mut product_repo = MockProductRepository::new();
        product_repo
            .expect_find_by_id()
            .returning(move |id| Ok(Some(product(id, "Sofa", 10.0))));

        let mut order_repo = MockOrderRepository::new();
        order_repo
            .expect_create()
            .withf(move |order, _| order.user_id == Some(user_id))
            .returning(|order, _| Ok(order.id));

        let usecase = OrderUseCase::new(
            Arc::new(cart_repo),
            Arc::new(product_repo),
            Arc::new(order_repo),
        );

        let dto = usecase
            .create_order(create_model("s1"), Some(user_id))
            .await
            .unwrap();

        assert_eq!(dto.user_id, Some(user_id));
    }

    #[tokio::test]
    async fn get_order_fails_when_missing() {
        let cart_repo = MockCartRepository::new();
        let product_repo = MockProductRepository::new();
        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_find_by_id().returning(|_| Ok(None));

        let usecase = OrderUseCase::new(
            Arc::new(cart_repo),
            Arc::new(product_repo),
            Arc::new(order_repo),
        );

        let result = usecase.get_order(Uuid::new_v4()).await;

        assert!(matches!(result, Err(OrderError::OrderNotFound)));
    }
}
