pub mod auth;
pub mod carts;
pub mod categories;
pub mod checkout;
pub mod contact;
pub mod orders;
pub mod products;
pub mod seed;
