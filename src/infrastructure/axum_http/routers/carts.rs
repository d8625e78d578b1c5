use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde_json::json;
use uuid::Uuid;

use crate::domain::repositories::{carts::CartRepository, products::ProductRepository};
use crate::domain::value_objects::carts::CartItemModel;
use crate::infrastructure::axum_http::error_responses::respond_error;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{carts::CartPostgres, products::ProductPostgres},
};
use crate::usecases::carts::CartUseCase;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let cart_repository = CartPostgres::new(Arc::clone(&db_pool));
    let product_repository = ProductPostgres::new(Arc::clone(&db_pool));
    let cart_usecase = CartUseCase::new(Arc::new(cart_repository), Arc::new(product_repository));

    Router::new()
        .route(
            "/:session_id",
            get(get_cart::<CartPostgres, ProductPostgres>)
                .delete(clear_cart::<CartPostgres, ProductPostgres>),
        )
        .route(
            "/:session_id/add",
            post(add_to_cart::<CartPostgres, ProductPostgres>),
        )
        .route(
            "/:session_id/update",
            post(update_cart_item::<CartPostgres, ProductPostgres>),
        )
        .route(
            "/:session_id/item/:product_id",
            delete(remove_from_cart::<CartPostgres, ProductPostgres>),
        )
        .with_state(Arc::new(cart_usecase))
}

pub async fn get_cart<C, P>(
    State(cart_usecase): State<Arc<CartUseCase<C, P>>>,
    Path(session_id): Path<String>,
) -> Response
where
    C: CartRepository + Send + Sync + 'static,
    P: ProductRepository + Send + Sync + 'static,
{
    match cart_usecase.get_cart(&session_id).await {
        Ok(cart) => (StatusCode::OK, Json(cart)).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}

pub async fn add_to_cart<C, P>(
    State(cart_usecase): State<Arc<CartUseCase<C, P>>>,
    Path(session_id): Path<String>,
    Json(item): Json<CartItemModel>,
) -> Response
where
    C: CartRepository + Send + Sync + 'static,
    P: ProductRepository + Send + Sync + 'static,
{
    match cart_usecase.add_item(&session_id, item).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Item added to cart" })),
        )
            .into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}

pub async fn update_cart_item<C, P>(
    State(cart_usecase): State<Arc<CartUseCase<C, P>>>,
    Path(session_id): Path<String>,
    Json(item): Json<CartItemModel>,
) -> Response
where
    C: CartRepository + Send + Sync + 'static,
    P: ProductRepository + Send + Sync + 'static,
{
    match cart_usecase.update_item(&session_id, item).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "Cart updated" }))).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}

pub async fn remove_from_cart<C, P>(
    State(cart_usecase): State<Arc<CartUseCase<C, P>>>,
    Path((session_id, product_id)): Path<(String, Uuid)>,
) -> Response
where
    C: CartRepository + Send + Sync + 'static,
    P: ProductRepository + Send + Sync + 'static,
{
    match cart_usecase.remove_item(&session_id, product_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Item removed from cart" })),
        )
            .into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}

pub async fn clear_cart<C, P>(
    State(cart_usecase): State<Arc<CartUseCase<C, P>>>,
    Path(session_id): Path<String>,
) -> Response
where
    C: CartRepository + Send + Sync + 'static,
    P: ProductRepository + Send + Sync + 'static,
{
    match cart_usecase.clear(&session_id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "Cart cleared" }))).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}
