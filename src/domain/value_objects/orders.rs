use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::orders::{InsertOrderItemEntity, OrderEntity, OrderItemEntity};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderModel {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub cart_session_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemDto {
    pub product_id: Uuid,
    pub name_fr: String,
    pub name_tr: String,
    pub name_en: String,
    pub price: f64,
    pub quantity: i32,
    pub subtotal: f64,
}

impl From<OrderItemEntity> for OrderItemDto {
    fn from(entity: OrderItemEntity) -> Self {
        Self {
            product_id: entity.product_id,
            name_fr: entity.name_fr,
            name_tr: entity.name_tr,
            name_en: entity.name_en,
            price: entity.price,
            quantity: entity.quantity,
            subtotal: entity.subtotal,
        }
    }
}

impl From<InsertOrderItemEntity> for OrderItemDto {
    fn from(entity: InsertOrderItemEntity) -> Self {
        Self {
            product_id: entity.product_id,
            name_fr: entity.name_fr,
            name_tr: entity.name_tr,
            name_en: entity.name_en,
            price: entity.price,
            quantity: entity.quantity,
            subtotal: entity.subtotal,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderDto {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub items: Vec<OrderItemDto>,
    pub total: f64,
    pub status: String,
    pub payment_session_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl OrderDto {
    pub fn from_parts(order: OrderEntity, items: Vec<OrderItemEntity>) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            customer_name: order.customer_name,
            customer_email: order.customer_email,
            customer_phone: order.customer_phone,
            customer_address: order.customer_address,
            items: items.into_iter().map(OrderItemDto::from).collect(),
            total: order.total,
            status: order.status,
            payment_session_id: order.payment_session_id,
            created_at: order.created_at,
        }
    }
}
