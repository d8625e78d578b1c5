pub mod carts;
pub mod categories;
pub mod contact_messages;
pub mod orders;
pub mod payment_transactions;
pub mod products;
pub mod users;
