pub mod carts;
pub mod categories;
pub mod checkout;
pub mod contact_messages;
pub mod enums;
pub mod orders;
pub mod products;
pub mod users;
