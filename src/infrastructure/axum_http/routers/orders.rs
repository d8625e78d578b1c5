use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::domain::repositories::{
    carts::CartRepository, orders::OrderRepository, products::ProductRepository,
};
use crate::domain::value_objects::orders::CreateOrderModel;
use crate::infrastructure::axum_http::error_responses::respond_error;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{carts::CartPostgres, orders::OrderPostgres, products::ProductPostgres},
};
use crate::usecases::orders::OrderUseCase;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let cart_repository = CartPostgres::new(Arc::clone(&db_pool));
    let product_repository = ProductPostgres::new(Arc::clone(&db_pool));
    let order_repository = OrderPostgres::new(Arc::clone(&db_pool));
    let order_usecase = OrderUseCase::new(
        Arc::new(cart_repository),
        Arc::new(product_repository),
        Arc::new(order_repository),
    );

    Router::new()
        .route(
            "/",
            post(create_order::<CartPostgres, ProductPostgres, OrderPostgres>)
                .get(list_orders::<CartPostgres, ProductPostgres, OrderPostgres>),
        )
        .route(
            "/:order_id",
            get(get_order::<CartPostgres, ProductPostgres, OrderPostgres>),
        )
        .with_state(Arc::new(order_usecase))
}

/// Guest checkout is allowed: a valid bearer token stamps the owner, an
/// absent or invalid one leaves the order anonymous.
pub async fn create_order<C, P, O>(
    State(order_usecase): State<Arc<OrderUseCase<C, P, O>>>,
    auth: Option<AuthUser>,
    Json(model): Json<CreateOrderModel>,
) -> Response
where
    C: CartRepository + Send + Sync + 'static,
    P: ProductRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    let user_id = auth.map(|auth_user| auth_user.user_id);

    match order_usecase.create_order(model, user_id).await {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}

pub async fn get_order<C, P, O>(
    State(order_usecase): State<Arc<OrderUseCase<C, P, O>>>,
    Path(order_id): Path<Uuid>,
) -> Response
where
    C: CartRepository + Send + Sync + 'static,
    P: ProductRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    match order_usecase.get_order(order_id).await {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}

pub async fn list_orders<C, P, O>(
    State(order_usecase): State<Arc<OrderUseCase<C, P, O>>>,
) -> Response
where
    C: CartRepository + Send + Sync + 'static,
    P: ProductRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    match order_usecase.list_orders().await {
        Ok(orders) => (StatusCode::OK, Json(orders)).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}
