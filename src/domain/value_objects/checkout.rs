use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCheckoutSessionModel {
    pub order_id: Uuid,
    pub origin_url: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutSessionDto {
    pub url: String,
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutStatusDto {
    pub session_id: String,
    pub status: String,
    pub payment_status: String,
    pub amount_total: f64,
    pub currency: String,
}
