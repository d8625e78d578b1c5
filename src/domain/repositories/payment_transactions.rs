use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::payment_transactions::{
    InsertPaymentTransactionEntity, PaymentTransactionEntity,
};

#[automock]
#[async_trait]
pub trait PaymentTransactionRepository {
    async fn create(&self, transaction: InsertPaymentTransactionEntity) -> Result<Uuid>;
    async fn find_by_session_id(
        &self,
        session_id: &str,
    ) -> Result<Option<PaymentTransactionEntity>>;
    /// Compare-and-set write: refreshes `status`/`payment_status` only while
    /// the stored `payment_status` is not yet `paid`, so a stale processor
    /// read can never overwrite a settled transaction. Returns the updated
    /// row, or `None` when the transaction is missing or already settled.
    async fn update_status_unless_paid(
        &self,
        session_id: &str,
        status: &str,
        payment_status: &str,
    ) -> Result<Option<PaymentTransactionEntity>>;
}
