pub mod checkout_session_statuses;
pub mod order_statuses;
pub mod payment_statuses;
