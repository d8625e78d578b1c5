use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::payment_transactions;

/// One row per hosted checkout attempt, keyed by the processor's session
/// id. An order may accumulate several of these across retried checkouts;
/// at most one ever reaches `payment_status = paid`.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = payment_transactions)]
pub struct PaymentTransactionEntity {
    pub id: Uuid,
    pub session_id: String,
    pub order_id: Uuid,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub payment_status: String,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payment_transactions)]
pub struct InsertPaymentTransactionEntity {
    pub id: Uuid,
    pub session_id: String,
    pub order_id: Uuid,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub payment_status: String,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
