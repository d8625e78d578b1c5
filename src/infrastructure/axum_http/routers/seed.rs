use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};

use crate::domain::repositories::{categories::CategoryRepository, products::ProductRepository};
use crate::infrastructure::axum_http::error_responses::respond_error;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{categories::CategoryPostgres, products::ProductPostgres},
};
use crate::usecases::seed::SeedUseCase;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let category_repository = CategoryPostgres::new(Arc::clone(&db_pool));
    let product_repository = ProductPostgres::new(Arc::clone(&db_pool));
    let seed_usecase = SeedUseCase::new(Arc::new(category_repository), Arc::new(product_repository));

    Router::new()
        .route("/", post(seed::<CategoryPostgres, ProductPostgres>))
        .with_state(Arc::new(seed_usecase))
}

pub async fn seed<C, P>(State(seed_usecase): State<Arc<SeedUseCase<C, P>>>) -> Response
where
    C: CategoryRepository + Send + Sync + 'static,
    P: ProductRepository + Send + Sync + 'static,
{
    match seed_usecase.seed().await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}
