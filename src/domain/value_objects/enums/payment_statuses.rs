use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Settlement status of a checkout session. The processor may report
/// values outside this set; those are stored verbatim as strings and
/// simply never promote anything.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Unpaid,
    NoPaymentRequired,
}

impl PaymentStatus {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            "unpaid" => Some(PaymentStatus::Unpaid),
            "no_payment_required" => Some(PaymentStatus::NoPaymentRequired),
            _ => None,
        }
    }

    pub fn is_paid(value: &str) -> bool {
        Self::from_str(value) == Some(PaymentStatus::Paid)
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::NoPaymentRequired => "no_payment_required",
        };
        write!(f, "{}", status)
    }
}
