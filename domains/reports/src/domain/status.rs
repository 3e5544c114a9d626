//! Status normalization
//!
//! The backend reports delivery and payment status as free text with several
//! naming variants ("Out for Delivery", "in_transit", "IN-TRANSIT"). These
//! are reduced to a closed set by matching needles against a separator-free,
//! lower-cased key. Rules are tried in order and the first match wins.

use serde::Serialize;

/// Lower-case and drop separators: "Out for Delivery" -> "outfordelivery"
pub fn normalize_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| !(c.is_whitespace() || matches!(c, '_' | '-' | '.' | '/')))
        .flat_map(char::to_lowercase)
        .collect()
}

fn first_match<S: Clone>(key: &str, rules: &[(S, &[&str])]) -> Option<S> {
    rules
        .iter()
        .find(|(_, needles)| needles.iter().any(|needle| key.contains(needle)))
        .map(|(status, _)| status.clone())
}

/// Delivery status after normalization
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum DeliveryStatus {
    Delivered,
    InTransit,
    Pending,
    Accepted,
    Cancelled,
    Unknown,
    /// Unrecognized non-empty input, kept verbatim
    Other(String),
    /// Empty or missing input
    Unspecified,
}

/// Delivery rules in precedence order.
///
/// `Cancelled` sits ahead of `Pending` and `Accepted` so compound values
/// such as "cancelled_pending_refund" count as cancelled.
const DELIVERY_RULES: [(DeliveryStatus, &[&str]); 5] = [
    (DeliveryStatus::Delivered, &["delivered", "completed"]),
    (
        DeliveryStatus::InTransit,
        &[
            "transit",
            "outfordelivery",
            "ontheway",
            "shipped",
            "dispatched",
            "pickedup",
        ],
    ),
    (DeliveryStatus::Cancelled, &["cancel", "rejected"]),
    (
        DeliveryStatus::Pending,
        &["pending", "awaiting", "processing", "unassigned"],
    ),
    (DeliveryStatus::Accepted, &["accepted", "assigned", "confirmed"]),
];

impl DeliveryStatus {
    /// Classify a raw backend status
    pub fn classify(raw: Option<&str>) -> Self {
        let raw = raw.unwrap_or_default();
        if raw.trim().is_empty() {
            return DeliveryStatus::Unspecified;
        }

        let key = normalize_key(raw);
        if key == "unknown" {
            return DeliveryStatus::Unknown;
        }

        first_match(&key, &DELIVERY_RULES).unwrap_or_else(|| DeliveryStatus::Other(raw.to_string()))
    }

    /// Canonical form; classifying it again yields the same status
    pub fn as_str(&self) -> &str {
        match self {
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::InTransit => "in_transit",
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::Accepted => "accepted",
            DeliveryStatus::Cancelled => "cancelled",
            DeliveryStatus::Unknown => "unknown",
            DeliveryStatus::Other(raw) => raw,
            DeliveryStatus::Unspecified => "",
        }
    }

    /// Label for report tables
    pub fn label(&self) -> &str {
        match self {
            DeliveryStatus::Delivered => "Delivered",
            DeliveryStatus::InTransit => "In Transit",
            DeliveryStatus::Pending => "Pending",
            DeliveryStatus::Accepted => "Accepted",
            DeliveryStatus::Cancelled => "Cancelled",
            DeliveryStatus::Unknown => "Unknown",
            DeliveryStatus::Other(raw) => raw,
            DeliveryStatus::Unspecified => "-",
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DeliveryStatus> for String {
    fn from(status: DeliveryStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Normalize a raw delivery status to its canonical string
pub fn normalize_delivery_status(raw: Option<&str>) -> String {
    DeliveryStatus::classify(raw).as_str().to_string()
}

/// Payment status after normalization
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum PaymentStatus {
    Paid,
    Escrow,
    Pending,
    Other(String),
    Unspecified,
}

/// `Pending` precedes `Paid` so "unpaid" is not read as paid
const PAYMENT_RULES: [(PaymentStatus, &[&str]); 3] = [
    (PaymentStatus::Escrow, &["escrow", "held"]),
    (
        PaymentStatus::Pending,
        &["pending", "unpaid", "awaiting", "processing"],
    ),
    (
        PaymentStatus::Paid,
        &["paid", "completed", "success", "succeeded", "released"],
    ),
];

impl PaymentStatus {
    pub fn classify(raw: Option<&str>) -> Self {
        let raw = raw.unwrap_or_default();
        if raw.trim().is_empty() {
            return PaymentStatus::Unspecified;
        }
        first_match(&normalize_key(raw), &PAYMENT_RULES)
            .unwrap_or_else(|| PaymentStatus::Other(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Escrow => "escrow",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Other(raw) => raw,
            PaymentStatus::Unspecified => "",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Escrow => "In Escrow",
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Other(raw) => raw,
            PaymentStatus::Unspecified => "-",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        status.as_str().to_string()
    }
}
