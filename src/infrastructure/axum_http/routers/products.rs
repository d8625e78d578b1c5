use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use uuid::Uuid;

use crate::domain::repositories::products::ProductRepository;
use crate::domain::value_objects::products::{InsertProductModel, ListProductsFilter};
use crate::infrastructure::axum_http::error_responses::respond_error;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad, repositories::products::ProductPostgres,
};
use crate::usecases::products::ProductUseCase;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let product_repository = ProductPostgres::new(Arc::clone(&db_pool));
    let product_usecase = ProductUseCase::new(Arc::new(product_repository));

    Router::new()
        .route(
            "/",
            get(list_products::<ProductPostgres>).post(create_product::<ProductPostgres>),
        )
        .route(
            "/:product_id",
            get(get_product::<ProductPostgres>)
                .put(update_product::<ProductPostgres>)
                .delete(delete_product::<ProductPostgres>),
        )
        .with_state(Arc::new(product_usecase))
}

pub async fn list_products<P>(
    State(product_usecase): State<Arc<ProductUseCase<P>>>,
    Query(filter): Query<ListProductsFilter>,
) -> Response
where
    P: ProductRepository + Send + Sync + 'static,
{
    match product_usecase.list_products(filter).await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}

pub async fn get_product<P>(
    State(product_usecase): State<Arc<ProductUseCase<P>>>,
    Path(product_id): Path<Uuid>,
) -> Response
where
    P: ProductRepository + Send + Sync + 'static,
{
    match product_usecase.get_product(product_id).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}

pub async fn create_product<P>(
    State(product_usecase): State<Arc<ProductUseCase<P>>>,
    Json(model): Json<InsertProductModel>,
) -> Response
where
    P: ProductRepository + Send + Sync + 'static,
{
    match product_usecase.create_product(model).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}

pub async fn update_product<P>(
    State(product_usecase): State<Arc<ProductUseCase<P>>>,
    Path(product_id): Path<Uuid>,
    Json(model): Json<InsertProductModel>,
) -> Response
where
    P: ProductRepository + Send + Sync + 'static,
{
    match product_usecase.update_product(product_id, model).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}

pub async fn delete_product<P>(
    State(product_usecase): State<Arc<ProductUseCase<P>>>,
    Path(product_id): Path<Uuid>,
) -> Response
where
    P: ProductRepository + Send + Sync + 'static,
{
    match product_usecase.delete_product(product_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Product deleted" })),
        )
            .into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}
