use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::domain::repositories::categories::CategoryRepository;
use crate::domain::value_objects::categories::InsertCategoryModel;
use crate::infrastructure::axum_http::error_responses::respond_error;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad, repositories::categories::CategoryPostgres,
};
use crate::usecases::categories::CategoryUseCase;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let category_repository = CategoryPostgres::new(Arc::clone(&db_pool));
    let category_usecase = CategoryUseCase::new(Arc::new(category_repository));

    Router::new()
        .route(
            "/",
            get(list_categories::<CategoryPostgres>).post(create_category::<CategoryPostgres>),
        )
        .with_state(Arc::new(category_usecase))
}

pub async fn list_categories<C>(
    State(category_usecase): State<Arc<CategoryUseCase<C>>>,
) -> Response
where
    C: CategoryRepository + Send + Sync + 'static,
{
    match category_usecase.list_categories().await {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}

pub async fn create_category<C>(
    State(category_usecase): State<Arc<CategoryUseCase<C>>>,
    Json(model): Json<InsertCategoryModel>,
) -> Response
where
    C: CategoryRepository + Send + Sync + 'static,
{
    match category_usecase.create_category(model).await {
        Ok(category) => (StatusCode::OK, Json(category)).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}
