use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::payment_transactions::{
    InsertPaymentTransactionEntity, PaymentTransactionEntity,
};
use crate::domain::repositories::payment_transactions::PaymentTransactionRepository;
use crate::domain::value_objects::enums::payment_statuses::PaymentStatus;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad, schema::payment_transactions,
};

pub struct PaymentTransactionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentTransactionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentTransactionRepository for PaymentTransactionPostgres {
    async fn create(&self, transaction: InsertPaymentTransactionEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let transaction_id = insert_into(payment_transactions::table)
            .values(&transaction)
            .returning(payment_transactions::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(transaction_id)
    }

    async fn find_by_session_id(
        &self,
        session_id: &str,
    ) -> Result<Option<PaymentTransactionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = payment_transactions::table
            .filter(payment_transactions::session_id.eq(session_id))
            .select(PaymentTransactionEntity::as_select())
            .first::<PaymentTransactionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn update_status_unless_paid(
        &self,
        session_id: &str,
        status: &str,
        payment_status: &str,
    ) -> Result<Option<PaymentTransactionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // The `ne` guard makes the write a compare-and-set: once a row says
        // `paid`, concurrent reconciliations carrying stale reads match
        // nothing and leave it untouched.
        let result = update(payment_transactions::table)
            .filter(payment_transactions::session_id.eq(session_id))
            .filter(payment_transactions::payment_status.ne(PaymentStatus::Paid.to_string()))
            .set((
                payment_transactions::status.eq(status),
                payment_transactions::payment_status.eq(payment_status),
                payment_transactions::updated_at.eq(Utc::now()),
            ))
            .returning(PaymentTransactionEntity::as_returning())
            .get_result::<PaymentTransactionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }
}
