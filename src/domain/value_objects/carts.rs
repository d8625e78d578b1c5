use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::carts::CartItemEntity;
use crate::domain::value_objects::products::ProductDto;

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartItemModel {
    pub product_id: Uuid,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartLineDto {
    pub product_id: Uuid,
    pub quantity: i32,
}

impl From<CartItemEntity> for CartLineDto {
    fn from(entity: CartItemEntity) -> Self {
        Self {
            product_id: entity.product_id,
            quantity: entity.quantity,
        }
    }
}

/// A cart line joined with its product details for display.
#[derive(Debug, Clone, Serialize)]
pub struct CartProductDto {
    #[serde(flatten)]
    pub product: ProductDto,
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
pub struct CartDto {
    pub session_id: String,
    pub items: Vec<CartLineDto>,
    pub products: Vec<CartProductDto>,
}
