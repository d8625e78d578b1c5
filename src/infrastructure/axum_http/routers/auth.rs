use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};

use crate::auth::AuthUser;
use crate::domain::repositories::{orders::OrderRepository, users::UserRepository};
use crate::domain::value_objects::users::{
    LoginUserModel, RegisterUserModel, UpdateProfileModel,
};
use crate::infrastructure::axum_http::error_responses::respond_error;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{orders::OrderPostgres, users::UserPostgres},
};
use crate::usecases::auth::AuthUseCase;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let order_repository = OrderPostgres::new(Arc::clone(&db_pool));
    let auth_usecase = AuthUseCase::new(Arc::new(user_repository), Arc::new(order_repository));

    Router::new()
        .route("/register", post(register::<UserPostgres, OrderPostgres>))
        .route("/login", post(login::<UserPostgres, OrderPostgres>))
        .route("/me", get(me::<UserPostgres, OrderPostgres>))
        .route("/profile", put(update_profile::<UserPostgres, OrderPostgres>))
        .route("/orders", get(my_orders::<UserPostgres, OrderPostgres>))
        .with_state(Arc::new(auth_usecase))
}

pub async fn register<U, O>(
    State(auth_usecase): State<Arc<AuthUseCase<U, O>>>,
    Json(model): Json<RegisterUserModel>,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    match auth_usecase.register(model).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}

pub async fn login<U, O>(
    State(auth_usecase): State<Arc<AuthUseCase<U, O>>>,
    Json(model): Json<LoginUserModel>,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    match auth_usecase.login(model).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}

pub async fn me<U, O>(
    State(auth_usecase): State<Arc<AuthUseCase<U, O>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    match auth_usecase.get_profile(user_id).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}

pub async fn update_profile<U, O>(
    State(auth_usecase): State<Arc<AuthUseCase<U, O>>>,
    AuthUser { user_id, .. }: AuthUser,
    Json(changes): Json<UpdateProfileModel>,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    match auth_usecase.update_profile(user_id, changes).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}

pub async fn my_orders<U, O>(
    State(auth_usecase): State<Arc<AuthUseCase<U, O>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    match auth_usecase.list_my_orders(user_id).await {
        Ok(orders) => (StatusCode::OK, Json(orders)).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}
