use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Lifecycle status of the hosted session, as opposed to its settlement
/// status. `Pending` is the local placeholder before the first processor
/// read.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum CheckoutSessionStatus {
    #[default]
    Pending,
    Open,
    Complete,
    Expired,
}

impl CheckoutSessionStatus {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(CheckoutSessionStatus::Pending),
            "open" => Some(CheckoutSessionStatus::Open),
            "complete" => Some(CheckoutSessionStatus::Complete),
            "expired" => Some(CheckoutSessionStatus::Expired),
            _ => None,
        }
    }
}

impl Display for CheckoutSessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            CheckoutSessionStatus::Pending => "pending",
            CheckoutSessionStatus::Open => "open",
            CheckoutSessionStatus::Complete => "complete",
            CheckoutSessionStatus::Expired => "expired",
        };
        write!(f, "{}", status)
    }
}
