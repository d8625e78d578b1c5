use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};

use crate::domain::repositories::contact_messages::ContactMessageRepository;
use crate::domain::value_objects::contact_messages::InsertContactMessageModel;
use crate::infrastructure::axum_http::error_responses::respond_error;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad, repositories::contact_messages::ContactMessagePostgres,
};
use crate::usecases::contact::ContactUseCase;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let message_repository = ContactMessagePostgres::new(Arc::clone(&db_pool));
    let contact_usecase = ContactUseCase::new(Arc::new(message_repository));

    Router::new()
        .route("/", post(submit_message::<ContactMessagePostgres>))
        .with_state(Arc::new(contact_usecase))
}

pub async fn submit_message<M>(
    State(contact_usecase): State<Arc<ContactUseCase<M>>>,
    Json(model): Json<InsertContactMessageModel>,
) -> Response
where
    M: ContactMessageRepository + Send + Sync + 'static,
{
    match contact_usecase.submit_message(model).await {
        Ok(message) => (StatusCode::OK, Json(message)).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}
