use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::entities::payment_transactions::InsertPaymentTransactionEntity;
use crate::domain::repositories::{
    orders::OrderRepository, payment_transactions::PaymentTransactionRepository,
};
use crate::domain::value_objects::checkout::{
    CheckoutSessionDto, CheckoutStatusDto, CreateCheckoutSessionModel,
};
use crate::domain::value_objects::enums::checkout_session_statuses::CheckoutSessionStatus;
use crate::domain::value_objects::enums::payment_statuses::PaymentStatus;
use crate::payments::stripe_client::{
    CheckoutSession, CreateSessionParams, SessionStatus, StripeClient, StripeEvent,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StripeGateway: Send + Sync {
    async fn create_checkout_session(
        &self,
        params: CreateSessionParams,
    ) -> AnyResult<CheckoutSession>;

    async fn get_checkout_status(&self, session_id: &str) -> AnyResult<SessionStatus>;

    fn verify_webhook_signature(&self, payload: &[u8], signature: &str) -> AnyResult<StripeEvent>;
}

#[async_trait]
impl StripeGateway for StripeClient {
    async fn create_checkout_session(
        &self,
        params: CreateSessionParams,
    ) -> AnyResult<CheckoutSession> {
        self.create_checkout_session(params).await
    }

    async fn get_checkout_status(&self, session_id: &str) -> AnyResult<SessionStatus> {
        self.get_checkout_status(session_id).await
    }

    fn verify_webhook_signature(&self, payload: &[u8], signature: &str) -> AnyResult<StripeEvent> {
        self.verify_webhook_signature(payload, signature)
    }
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Order not found")]
    OrderNotFound,
    #[error("Stripe not configured")]
    StripeNotConfigured,
    #[error("invalid webhook payload: {0}")]
    InvalidWebhook(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CheckoutError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            CheckoutError::OrderNotFound => StatusCode::NOT_FOUND,
            CheckoutError::StripeNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            CheckoutError::InvalidWebhook(_) => StatusCode::BAD_REQUEST,
            CheckoutError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, CheckoutError>;

/// Drives the hosted checkout lifecycle: session creation, the client
/// polling path and the processor webhook path. Both reconciliation paths
/// converge on [`Self::reconcile`], where the monotonic-promotion rule
/// lives.
pub struct CheckoutUseCase<O, T, G>
where
    O: OrderRepository + Send + Sync + 'static,
    T: PaymentTransactionRepository + Send + Sync + 'static,
    G: StripeGateway + Send + Sync + 'static,
{
    order_repo: Arc<O>,
    payment_repo: Arc<T>,
    stripe_client: Option<Arc<G>>,
    currency: String,
}

impl<O, T, G> CheckoutUseCase<O, T, G>
where
    O: OrderRepository + Send + Sync + 'static,
    T: PaymentTransactionRepository + Send + Sync + 'static,
    G: StripeGateway + Send + Sync + 'static,
{
    pub fn new(
        order_repo: Arc<O>,
        payment_repo: Arc<T>,
        stripe_client: Option<Arc<G>>,
        currency: String,
    ) -> Self {
        Self {
            order_repo,
            payment_repo,
            stripe_client,
            currency,
        }
    }

    fn stripe(&self) -> UseCaseResult<&Arc<G>> {
        self.stripe_client.as_ref().ok_or_else(|| {
            let err = CheckoutError::StripeNotConfigured;
            warn!(
                status = err.status_code().as_u16(),
                "checkout: stripe credentials are not configured"
            );
            err
        })
    }

    /// Opens a hosted checkout session for an order. May be called more
    /// than once per order (abandon/retry); every call creates a fresh
    /// payment transaction keyed by the new session id.
    ///
    /// The origin URL comes from the client and is used verbatim to build
    /// the redirect targets; it is a spoofing surface, not a security
    /// boundary.
    pub async fn create_session(
        &self,
        model: CreateCheckoutSessionModel,
    ) -> UseCaseResult<CheckoutSessionDto> {
        info!(
            order_id = %model.order_id,
            origin_url = %model.origin_url,
            "checkout: create session requested"
        );

        let stripe = self.stripe()?;

        let order = self
            .order_repo
            .find_by_id(model.order_id)
            .await
            .map_err(|err| {
                error!(
                    order_id = %model.order_id,
                    db_error = ?err,
                    "checkout: failed to load order"
                );
                CheckoutError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = CheckoutError::OrderNotFound;
                warn!(
                    order_id = %model.order_id,
                    status = err.status_code().as_u16(),
                    "checkout: order not found"
                );
                err
            })?;

        let origin = model.origin_url.trim_end_matches('/');
        let success_url = format!("{origin}/order-success?session_id={{CHECKOUT_SESSION_ID}}");
        let cancel_url = format!("{origin}/checkout");

        let metadata = HashMap::from([
            ("order_id".to_string(), order.id.to_string()),
            ("customer_email".to_string(), order.customer_email.clone()),
        ]);

        let session = stripe
            .create_checkout_session(CreateSessionParams {
                amount: order.total,
                currency: self.currency.clone(),
                success_url,
                cancel_url,
                metadata,
            })
            .await
            .map_err(|err| {
                error!(
                    order_id = %order.id,
                    error = ?err,
                    "checkout: stripe session creation failed"
                );
                CheckoutError::Internal(err)
            })?;

        let now = Utc::now();
        self.payment_repo
            .create(InsertPaymentTransactionEntity {
                id: Uuid::new_v4(),
                session_id: session.session_id.clone(),
                order_id: order.id,
                amount: order.total,
                currency: self.currency.clone(),
                status: CheckoutSessionStatus::Pending.to_string(),
                payment_status: PaymentStatus::Pending.to_string(),
                metadata: serde_json::json!({ "order_id": order.id.to_string() }),
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(|err| {
                error!(
                    order_id = %order.id,
                    session_id = %session.session_id,
                    db_error = ?err,
                    "checkout: failed to persist payment transaction"
                );
                CheckoutError::Internal(err)
            })?;

        self.order_repo
            .set_payment_session(order.id, &session.session_id)
            .await
            .map_err(|err| {
                error!(
                    order_id = %order.id,
                    session_id = %session.session_id,
                    db_error = ?err,
                    "checkout: failed to stamp payment session on order"
                );
                CheckoutError::Internal(err)
            })?;

        info!(
            order_id = %order.id,
            session_id = %session.session_id,
            amount = order.total,
            "checkout: session created"
        );

        Ok(CheckoutSessionDto {
            url: session.url,
            session_id: session.session_id,
        })
    }

    /// Client polling path. A transaction already settled locally answers
    /// without a processor round trip; anything else is refreshed from the
    /// live session state and reconciled.
    pub async fn get_status(&self, session_id: &str) -> UseCaseResult<CheckoutStatusDto> {
        let stripe = self.stripe()?;

        let transaction = self
            .payment_repo
            .find_by_session_id(session_id)
            .await
            .map_err(|err| {
                error!(
                    %session_id,
                    db_error = ?err,
                    "checkout: failed to load payment transaction"
                );
                CheckoutError::Internal(err)
            })?;

        if let Some(transaction) = &transaction {
            if PaymentStatus::is_paid(&transaction.payment_status) {
                info!(
                    %session_id,
                    "checkout: transaction already settled, skipping processor call"
                );
                return Ok(CheckoutStatusDto {
                    session_id: transaction.session_id.clone(),
                    status: transaction.status.clone(),
                    payment_status: transaction.payment_status.clone(),
                    amount_total: transaction.amount,
                    currency: transaction.currency.clone(),
                });
            }
        }

        let live = stripe.get_checkout_status(session_id).await.map_err(|err| {
            error!(
                %session_id,
                error = ?err,
                "checkout: stripe status query failed"
            );
            CheckoutError::Internal(err)
        })?;

        self.reconcile(session_id, &live.status, &live.payment_status, None)
            .await?;

        Ok(CheckoutStatusDto {
            session_id: session_id.to_string(),
            status: live.status,
            payment_status: live.payment_status,
            amount_total: live.amount_total,
            currency: live.currency,
        })
    }

    /// Processor webhook path. Signature verification is the only trust
    /// boundary for payment confirmation; nothing is written before it
    /// passes.
    pub async fn handle_webhook(&self, payload: &[u8], signature: &str) -> UseCaseResult<()> {
        let stripe = self.stripe()?;

        let event = stripe
            .verify_webhook_signature(payload, signature)
            .map_err(|err| {
                let invalid = CheckoutError::InvalidWebhook("signature verification failed".into());
                warn!(
                    error = %err,
                    status = invalid.status_code().as_u16(),
                    "checkout: webhook signature verification failed"
                );
                invalid
            })?;

        info!(
            event_id = ?event.id,
            event_type = %event.type_,
            "checkout: stripe webhook verified"
        );

        if !event.type_.starts_with("checkout.session.") {
            debug!(event_type = %event.type_, "checkout: ignoring unrelated stripe event");
            return Ok(());
        }

        let session = StripeClient::extract_checkout_session(&event).ok_or_else(|| {
            let err = CheckoutError::InvalidWebhook("missing checkout session".to_string());
            warn!(
                status = err.status_code().as_u16(),
                "checkout: webhook event carries no checkout session object"
            );
            err
        })?;

        let session_id = session.id.ok_or_else(|| {
            let err = CheckoutError::InvalidWebhook("missing session id".to_string());
            warn!(
                status = err.status_code().as_u16(),
                "checkout: webhook session object has no id"
            );
            err
        })?;

        let payment_status = session
            .payment_status
            .unwrap_or_else(|| PaymentStatus::Pending.to_string());

        // Settled sessions are reported as complete; other events keep
        // whatever lifecycle status the processor attached.
        let status = if PaymentStatus::is_paid(&payment_status) {
            CheckoutSessionStatus::Complete.to_string()
        } else {
            session
                .status
                .unwrap_or_else(|| CheckoutSessionStatus::Open.to_string())
        };

        // Promotion targets the order the processor echoed back in the
        // event metadata, not a lookup by session id alone.
        let order_id = session
            .metadata
            .as_ref()
            .and_then(|metadata| metadata.get("order_id"))
            .and_then(|value| Uuid::parse_str(value).ok());

        if order_id.is_none() {
            warn!(
                %session_id,
                "checkout: webhook metadata carries no usable order_id"
            );
        }

        self.reconcile(&session_id, &status, &payment_status, order_id)
            .await
    }

    /// The single place both reconciliation channels merge an observed
    /// processor state into local records.
    ///
    /// The transaction write is a compare-and-set (`unless paid`), so two
    /// racing reconciliations cannot downgrade a settled transaction. Order
    /// promotion runs on every paid observation, including when the CAS was
    /// a no-op: a crash between the two writes is healed by the next paid
    /// delivery.
    async fn reconcile(
        &self,
        session_id: &str,
        status: &str,
        payment_status: &str,
        order_id: Option<Uuid>,
    ) -> UseCaseResult<()> {
        let observed_paid = PaymentStatus::is_paid(payment_status);

        let updated = self
            .payment_repo
            .update_status_unless_paid(session_id, status, payment_status)
            .await
            .map_err(|err| {
                error!(
                    %session_id,
                    db_error = ?err,
                    "checkout: failed to update payment transaction"
                );
                CheckoutError::Internal(err)
            })?;

        if updated.is_none() {
            debug!(
                %session_id,
                "checkout: transaction missing or already settled, write skipped"
            );
        }

        if !observed_paid {
            return Ok(());
        }

        // A paid order must always be backed by a settled transaction, so
        // promotion goes through the stored row even when the event already
        // names the order.
        let transaction = match updated {
            Some(transaction) => Some(transaction),
            None => self
                .payment_repo
                .find_by_session_id(session_id)
                .await
                .map_err(|err| {
                    error!(
                        %session_id,
                        db_error = ?err,
                        "checkout: failed to resolve transaction for settled session"
                    );
                    CheckoutError::Internal(err)
                })?,
        };

        let Some(transaction) = transaction else {
            warn!(
                %session_id,
                "checkout: paid observation without a known transaction, order promotion skipped"
            );
            return Ok(());
        };

        let order_id = order_id.unwrap_or(transaction.order_id);

        self.order_repo.mark_paid(order_id).await.map_err(|err| {
            error!(
                %session_id,
                %order_id,
                db_error = ?err,
                "checkout: failed to promote order to paid"
            );
            CheckoutError::Internal(err)
        })?;

        info!(%session_id, %order_id, "checkout: order promoted to paid");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::orders::OrderEntity;
    use crate::domain::entities::payment_transactions::PaymentTransactionEntity;
    use crate::domain::repositories::orders::MockOrderRepository;
    use crate::domain::repositories::payment_transactions::MockPaymentTransactionRepository;
    use crate::domain::value_objects::enums::order_statuses::OrderStatus;
    use mockall::predicate::eq;
    use serde_json::json;

    fn order(order_id: Uuid, total: f64) -> OrderEntity {
        OrderEntity {
            id: order_id,
            user_id: None,
            customer_name: "Jean Dupont".to_string(),
            customer_email: "jean@example.com".to_string(),
            customer_phone: "+33123456789".to_string(),
            customer_address: "1 rue de la Paix, Paris".to_string(),
            total,
            status: OrderStatus::Pending.to_string(),
            payment_session_id: None,
            created_at: Utc::now(),
        }
    }

    fn transaction(session_id: &str, order_id: Uuid, payment_status: &str) -> PaymentTransactionEntity {
        PaymentTransactionEntity {
            id: Uuid::new_v4(),
            session_id: session_id.to_string(),
            order_id,
            amount: 25.0,
            currency: "eur".to_string(),
            status: if payment_status == "paid" {
                "complete".to_string()
            } else {
                "pending".to_string()
            },
            payment_status: payment_status.to_string(),
            metadata: json!({ "order_id": order_id.to_string() }),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn checkout_event(session_id: &str, payment_status: &str, order_id: Option<Uuid>) -> StripeEvent {
        let mut object = json!({
            "id": session_id,
            "status": "complete",
            "payment_status": payment_status,
            "amount_total": 2500,
            "currency": "eur",
        });
        if let Some(order_id) = order_id {
            object["metadata"] = json!({ "order_id": order_id.to_string() });
        }

        serde_json::from_value(json!({
            "id": "evt_test",
            "type": "checkout.session.completed",
            "data": { "object": object },
        }))
        .unwrap()
    }

    fn usecase(
        order_repo: MockOrderRepository,
        payment_repo: MockPaymentTransactionRepository,
        stripe: Option<MockStripeGateway>,
    ) -> CheckoutUseCase<MockOrderRepository, MockPaymentTransactionRepository, MockStripeGateway>
    {
        CheckoutUseCase::new(
            Arc::new(order_repo),
            Arc::new(payment_repo),
            stripe.map(Arc::new),
            "eur".to_string(),
        )
    }

    #[tokio::test]
    async fn create_session_fails_when_stripe_unconfigured() {
        let result = usecase(
            MockOrderRepository::new(),
            MockPaymentTransactionRepository::new(),
            None,
        )
        .create_session(CreateCheckoutSessionModel {
            order_id: Uuid::new_v4(),
            origin_url: "https://shop.example".to_string(),
        })
        .await;

        let err = result.unwrap_err();
        assert!(matches!(err, CheckoutError::StripeNotConfigured));
        assert_eq!(err.status_code().as_u16(), 500);
    }

    #[tokio::test]
    async fn create_session_fails_when_order_missing() {
        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_find_by_id().returning(|_| Ok(None));

        let result = usecase(
            order_repo,
            MockPaymentTransactionRepository::new(),
            Some(MockStripeGateway::new()),
        )
        .create_session(CreateCheckoutSessionModel {
            order_id: Uuid::new_v4(),
            origin_url: "https://shop.example".to_string(),
        })
        .await;

        assert!(matches!(result, Err(CheckoutError::OrderNotFound)));
    }

    #[tokio::test]
    async fn create_session_persists_transaction_and_stamps_order() {
        let order_id = Uuid::new_v4();

        let mut order_repo = MockOrderRepository::new();
        order_repo
            .expect_find_by_id()
            .with(eq(order_id))
            .returning(move |id| Ok(Some(order(id, 25.0))));
        order_repo
            .expect_set_payment_session()
            .withf(move |id, session_id| *id == order_id && session_id == "cs_123")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut payment_repo = MockPaymentTransactionRepository::new();
        payment_repo
            .expect_create()
            .withf(move |transaction| {
                transaction.session_id == "cs_123"
                    && transaction.order_id == order_id
                    && transaction.amount == 25.0
                    && transaction.currency == "eur"
                    && transaction.status == "pending"
                    && transaction.payment_status == "pending"
                    && transaction.metadata["order_id"] == order_id.to_string()
            })
            .times(1)
            .returning(|transaction| Ok(transaction.id));

        let mut stripe = MockStripeGateway::new();
        stripe
            .expect_create_checkout_session()
            .withf(move |params| {
                params.amount == 25.0
                    && params.currency == "eur"
                    && params.success_url
                        == "https://shop.example/order-success?session_id={CHECKOUT_SESSION_ID}"
                    && params.cancel_url == "https://shop.example/checkout"
                    && params.metadata["order_id"] == order_id.to_string()
                    && params.metadata["customer_email"] == "jean@example.com"
            })
            .returning(|_| {
                Ok(CheckoutSession {
                    session_id: "cs_123".to_string(),
                    url: "https://checkout.stripe.com/pay/cs_123".to_string(),
                })
            });

        let dto = usecase(order_repo, payment_repo, Some(stripe))
            .create_session(CreateCheckoutSessionModel {
                order_id,
                // Trailing slash must not double up in the redirect URLs.
                origin_url: "https://shop.example/".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(dto.session_id, "cs_123");
        assert_eq!(dto.url, "https://checkout.stripe.com/pay/cs_123");
    }

    #[tokio::test]
    async fn get_status_short_circuits_when_already_paid() {
        let order_id = Uuid::new_v4();

        let mut payment_repo = MockPaymentTransactionRepository::new();
        payment_repo
            .expect_find_by_session_id()
            .returning(move |session_id| Ok(Some(transaction(session_id, order_id, "paid"))));
        payment_repo.expect_update_status_unless_paid().never();

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_mark_paid().never();

        // No gateway expectations: a settled transaction must not trigger a
        // processor call.
        let dto = usecase(order_repo, payment_repo, Some(MockStripeGateway::new()))
            .get_status("cs_123")
            .await
            .unwrap();

        assert_eq!(dto.session_id, "cs_123");
        assert_eq!(dto.payment_status, "paid");
        assert_eq!(dto.status, "complete");
        assert_eq!(dto.amount_total, 25.0);
        assert_eq!(dto.currency, "eur");
    }

    #[tokio::test]
    async fn get_status_refreshes_and_promotes_on_paid() {
        let order_id = Uuid::new_v4();

        let mut payment_repo = MockPaymentTransactionRepository::new();
        payment_repo
            .expect_find_by_session_id()
            .returning(move |session_id| Ok(Some(transaction(session_id, order_id, "pending"))));
        payment_repo
            .expect_update_status_unless_paid()
            .withf(|session_id, status, payment_status| {
                session_id == "cs_123" && status == "complete" && payment_status == "paid"
            })
            .times(1)
            .returning(move |session_id, _, _| Ok(Some(transaction(session_id, order_id, "paid"))));

        let mut order_repo = MockOrderRepository::new();
        order_repo
            .expect_mark_paid()
            .with(eq(order_id))
            .times(1)
            .returning(|_| Ok(()));

        let mut stripe = MockStripeGateway::new();
        stripe.expect_get_checkout_status().returning(|_| {
            Ok(SessionStatus {
                status: "complete".to_string(),
                payment_status: "paid".to_string(),
                amount_total: 25.0,
                currency: "eur".to_string(),
            })
        });

        let dto = usecase(order_repo, payment_repo, Some(stripe))
            .get_status("cs_123")
            .await
            .unwrap();

        assert_eq!(dto.payment_status, "paid");
        assert_eq!(dto.amount_total, 25.0);
    }

    #[tokio::test]
    async fn get_status_does_not_promote_on_unpaid() {
        let order_id = Uuid::new_v4();

        let mut payment_repo = MockPaymentTransactionRepository::new();
        payment_repo
            .expect_find_by_session_id()
            .returning(move |session_id| Ok(Some(transaction(session_id, order_id, "pending"))));
        payment_repo
            .expect_update_status_unless_paid()
            .withf(|_, status, payment_status| status == "open" && payment_status == "unpaid")
            .times(1)
            .returning(move |session_id, _, _| {
                Ok(Some(transaction(session_id, order_id, "unpaid")))
            });

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_mark_paid().never();

        let mut stripe = MockStripeGateway::new();
        stripe.expect_get_checkout_status().returning(|_| {
            Ok(SessionStatus {
                status: "open".to_string(),
                payment_status: "unpaid".to_string(),
                amount_total: 25.0,
                currency: "eur".to_string(),
            })
        });

        let dto = usecase(order_repo, payment_repo, Some(stripe))
            .get_status("cs_123")
            .await
            .unwrap();

        assert_eq!(dto.payment_status, "unpaid");
        assert_eq!(dto.status, "open");
    }

    #[tokio::test]
    async fn stale_unpaid_read_cannot_downgrade_settled_transaction() {
        // Concurrent webhook settled the transaction between our local read
        // and the processor answer: the CAS matches nothing and nothing is
        // promoted or downgraded from this call.
        let order_id = Uuid::new_v4();

        let mut payment_repo = MockPaymentTransactionRepository::new();
        payment_repo
            .expect_find_by_session_id()
            .returning(move |session_id| Ok(Some(transaction(session_id, order_id, "pending"))));
        payment_repo
            .expect_update_status_unless_paid()
            .times(1)
            .returning(|_, _, _| Ok(None));

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_mark_paid().never();

        let mut stripe = MockStripeGateway::new();
        stripe.expect_get_checkout_status().returning(|_| {
            Ok(SessionStatus {
                status: "open".to_string(),
                payment_status: "unpaid".to_string(),
                amount_total: 25.0,
                currency: "eur".to_string(),
            })
        });

        let result = usecase(order_repo, payment_repo, Some(stripe))
            .get_status("cs_123")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn webhook_rejects_invalid_signature_without_mutation() {
        let mut payment_repo = MockPaymentTransactionRepository::new();
        payment_repo.expect_update_status_unless_paid().never();
        payment_repo.expect_find_by_session_id().never();

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_mark_paid().never();

        let mut stripe = MockStripeGateway::new();
        stripe
            .expect_verify_webhook_signature()
            .returning(|_, _| Err(anyhow::anyhow!("invalid webhook signature")));

        let err = usecase(order_repo, payment_repo, Some(stripe))
            .handle_webhook(b"{}", "t=1,v1=bad")
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::InvalidWebhook(_)));
        assert_eq!(err.status_code().as_u16(), 400);
    }

    #[tokio::test]
    async fn webhook_paid_settles_transaction_and_order() {
        let order_id = Uuid::new_v4();

        let mut payment_repo = MockPaymentTransactionRepository::new();
        payment_repo
            .expect_update_status_unless_paid()
            .withf(|session_id, status, payment_status| {
                session_id == "cs_123" && status == "complete" && payment_status == "paid"
            })
            .times(1)
            .returning(move |session_id, _, _| Ok(Some(transaction(session_id, order_id, "paid"))));

        let mut order_repo = MockOrderRepository::new();
        order_repo
            .expect_mark_paid()
            .with(eq(order_id))
            .times(1)
            .returning(|_| Ok(()));

        let mut stripe = MockStripeGateway::new();
        stripe
            .expect_verify_webhook_signature()
            .returning(move |_, _| Ok(checkout_event("cs_123", "paid", Some(order_id))));

        usecase(order_repo, payment_repo, Some(stripe))
            .handle_webhook(b"{}", "t=1,v1=good")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn webhook_redelivery_heals_lagging_order() {
        // The transaction is already settled (first delivery crashed before
        // the order write). The CAS is a no-op, but the order named by the
        // event metadata is still promoted.
        let order_id = Uuid::new_v4();

        let mut payment_repo = MockPaymentTransactionRepository::new();
        payment_repo
            .expect_update_status_unless_paid()
            .times(1)
            .returning(|_, _, _| Ok(None));
        payment_repo
            .expect_find_by_session_id()
            .times(1)
            .returning(move |session_id| Ok(Some(transaction(session_id, order_id, "paid"))));

        let mut order_repo = MockOrderRepository::new();
        order_repo
            .expect_mark_paid()
            .with(eq(order_id))
            .times(1)
            .returning(|_| Ok(()));

        let mut stripe = MockStripeGateway::new();
        stripe
            .expect_verify_webhook_signature()
            .returning(move |_, _| Ok(checkout_event("cs_123", "paid", Some(order_id))));

        usecase(order_repo, payment_repo, Some(stripe))
            .handle_webhook(b"{}", "t=1,v1=good")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn webhook_non_paid_status_is_stored_without_promotion() {
        let order_id = Uuid::new_v4();

        let mut payment_repo = MockPaymentTransactionRepository::new();
        payment_repo
            .expect_update_status_unless_paid()
            .withf(|_, status, payment_status| status == "complete" && payment_status == "unpaid")
            .times(1)
            .returning(move |session_id, status, payment_status| {
                let mut transaction = transaction(session_id, order_id, payment_status);
                transaction.status = status.to_string();
                Ok(Some(transaction))
            });

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_mark_paid().never();

        let mut stripe = MockStripeGateway::new();
        stripe
            .expect_verify_webhook_signature()
            .returning(move |_, _| Ok(checkout_event("cs_123", "unpaid", Some(order_id))));

        usecase(order_repo, payment_repo, Some(stripe))
            .handle_webhook(b"{}", "t=1,v1=good")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn webhook_ignores_unrelated_event_types() {
        let mut payment_repo = MockPaymentTransactionRepository::new();
        payment_repo.expect_update_status_unless_paid().never();

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_mark_paid().never();

        let mut stripe = MockStripeGateway::new();
        stripe.expect_verify_webhook_signature().returning(|_, _| {
            Ok(serde_json::from_value(json!({
                "id": "evt_test",
                "type": "invoice.payment_succeeded",
                "data": { "object": {} },
            }))
            .unwrap())
        });

        usecase(order_repo, payment_repo, Some(stripe))
            .handle_webhook(b"{}", "t=1,v1=good")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn webhook_for_unknown_session_never_promotes() {
        // A paid order always needs a backing transaction; an event for a
        // session this store never opened must not touch any order.
        let order_id = Uuid::new_v4();

        let mut payment_repo = MockPaymentTransactionRepository::new();
        payment_repo
            .expect_update_status_unless_paid()
            .times(1)
            .returning(|_, _, _| Ok(None));
        payment_repo
            .expect_find_by_session_id()
            .times(1)
            .returning(|_| Ok(None));

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_mark_paid().never();

        let mut stripe = MockStripeGateway::new();
        stripe
            .expect_verify_webhook_signature()
            .returning(move |_, _| Ok(checkout_event("cs_unknown", "paid", Some(order_id))));

        usecase(order_repo, payment_repo, Some(stripe))
            .handle_webhook(b"{}", "t=1,v1=good")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn webhook_without_metadata_falls_back_to_stored_transaction() {
        let order_id = Uuid::new_v4();

        let mut payment_repo = MockPaymentTransactionRepository::new();
        payment_repo
            .expect_update_status_unless_paid()
            .times(1)
            .returning(move |session_id, _, _| Ok(Some(transaction(session_id, order_id, "paid"))));

        let mut order_repo = MockOrderRepository::new();
        order_repo
            .expect_mark_paid()
            .with(eq(order_id))
            .times(1)
            .returning(|_| Ok(()));

        let mut stripe = MockStripeGateway::new();
        stripe
            .expect_verify_webhook_signature()
            .returning(|_, _| Ok(checkout_event("cs_123", "paid", None)));

        usecase(order_repo, payment_repo, Some(stripe))
            .handle_webhook(b"{}", "t=1,v1=good")
            .await
            .unwrap();
    }
}
