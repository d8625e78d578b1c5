use std::sync::Arc;

use anyhow::Result;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tracing::info;

use crate::config::config_model::Stripe as StripeConfig;
use crate::domain::repositories::{
    orders::OrderRepository, payment_transactions::PaymentTransactionRepository,
};
use crate::domain::value_objects::checkout::CreateCheckoutSessionModel;
use crate::infrastructure::axum_http::error_responses::respond_error;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{
        orders::OrderPostgres, payment_transactions::PaymentTransactionPostgres,
    },
};
use crate::payments::stripe_client::StripeClient;
use crate::usecases::checkout::{CheckoutUseCase, StripeGateway};

pub fn routes(db_pool: Arc<PgPoolSquad>, stripe_config: Option<StripeConfig>) -> Result<Router> {
    let (stripe_client, currency) = match stripe_config {
        Some(config) => (
            Some(Arc::new(StripeClient::new(
                config.secret_key,
                config.webhook_secret,
            )?)),
            config.currency,
        ),
        None => (None, "eur".to_string()),
    };

    if stripe_client.is_none() {
        info!("checkout: no stripe credentials, payment endpoints will refuse");
    }

    let order_repository = OrderPostgres::new(Arc::clone(&db_pool));
    let payment_repository = PaymentTransactionPostgres::new(Arc::clone(&db_pool));
    let checkout_usecase = CheckoutUseCase::new(
        Arc::new(order_repository),
        Arc::new(payment_repository),
        stripe_client,
        currency,
    );

    // The webhook shares the use case with the checkout endpoints, so this
    // router carries full paths and is merged into the app as-is.
    Ok(Router::new()
        .route(
            "/api/checkout/session",
            post(create_checkout_session::<
                OrderPostgres,
                PaymentTransactionPostgres,
                StripeClient,
            >),
        )
        .route(
            "/api/checkout/status/:session_id",
            get(get_checkout_status::<
                OrderPostgres,
                PaymentTransactionPostgres,
                StripeClient,
            >),
        )
        .route(
            "/api/webhook/stripe",
            post(stripe_webhook::<
                OrderPostgres,
                PaymentTransactionPostgres,
                StripeClient,
            >),
        )
        .with_state(Arc::new(checkout_usecase)))
}

pub async fn create_checkout_session<O, T, G>(
    State(checkout_usecase): State<Arc<CheckoutUseCase<O, T, G>>>,
    Json(model): Json<CreateCheckoutSessionModel>,
) -> Response
where
    O: OrderRepository + Send + Sync + 'static,
    T: PaymentTransactionRepository + Send + Sync + 'static,
    G: StripeGateway + Send + Sync + 'static,
{
    match checkout_usecase.create_session(model).await {
        Ok(session) => (StatusCode::OK, Json(session)).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}

pub async fn get_checkout_status<O, T, G>(
    State(checkout_usecase): State<Arc<CheckoutUseCase<O, T, G>>>,
    Path(session_id): Path<String>,
) -> Response
where
    O: OrderRepository + Send + Sync + 'static,
    T: PaymentTransactionRepository + Send + Sync + 'static,
    G: StripeGateway + Send + Sync + 'static,
{
    match checkout_usecase.get_status(&session_id).await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}

/// Raw body + `Stripe-Signature` header; the use case verifies the
/// signature before anything else happens.
pub async fn stripe_webhook<O, T, G>(
    State(checkout_usecase): State<Arc<CheckoutUseCase<O, T, G>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    O: OrderRepository + Send + Sync + 'static,
    T: PaymentTransactionRepository + Send + Sync + 'static,
    G: StripeGateway + Send + Sync + 'static,
{
    let signature = match headers.get("Stripe-Signature").and_then(|value| value.to_str().ok()) {
        Some(signature) => signature,
        None => {
            return respond_error(
                StatusCode::BAD_REQUEST,
                "missing Stripe-Signature header",
            );
        }
    };

    match checkout_usecase.handle_webhook(&body, signature).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "success" }))).into_response(),
        Err(err) => respond_error(err.status_code(), err),
    }
}
