//! Aggregation of fetched collections into summary figures

use rust_decimal::Decimal;
use serde::Serialize;

use artmart_domain::{DeliveryRecord, PaymentRecord};

use crate::currency::parse_amount;
use crate::domain::status::{DeliveryStatus, PaymentStatus};

/// Count and amount for one payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusTally {
    pub count: usize,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PaymentSummary {
    pub total_count: usize,
    pub total_amount: Decimal,
    pub paid: StatusTally,
    pub escrow: StatusTally,
    pub pending: StatusTally,
    /// Statuses outside paid/escrow/pending, including missing ones
    pub other: StatusTally,
    /// Payments whose amount could not be read or would overflow a total;
    /// counted, but add nothing
    pub unreadable_amounts: usize,
}

impl PaymentSummary {
    pub fn from_records(payments: &[PaymentRecord]) -> Self {
        let mut summary = Self::default();

        for payment in payments {
            summary.total_count += 1;

            let amount = match parse_amount(&payment.amount) {
                Some(amount) => amount,
                None => {
                    summary.unreadable_amounts += 1;
                    Decimal::ZERO
                }
            };
            let total = summary.total_amount.checked_add(amount);

            let tally = match PaymentStatus::classify(payment.status.as_deref()) {
                PaymentStatus::Paid => &mut summary.paid,
                PaymentStatus::Escrow => &mut summary.escrow,
                PaymentStatus::Pending => &mut summary.pending,
                PaymentStatus::Other(_) | PaymentStatus::Unspecified => &mut summary.other,
            };
            tally.count += 1;

            match (total, tally.amount.checked_add(amount)) {
                (Some(total), Some(tally_amount)) => {
                    tally.amount = tally_amount;
                    summary.total_amount = total;
                }
                _ => {
                    tracing::warn!(
                        payment = %payment.id,
                        "Payment amount overflows the report total, left out"
                    );
                    summary.unreadable_amounts += 1;
                }
            }
        }

        summary
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DeliverySummary {
    pub total: usize,
    pub delivered: usize,
    pub in_transit: usize,
    pub pending: usize,
    pub accepted: usize,
    pub cancelled: usize,
    /// Literal "unknown" plus empty or missing statuses
    pub unknown: usize,
    /// Unrecognized statuses
    pub other: usize,
}

impl DeliverySummary {
    pub fn from_records(deliveries: &[DeliveryRecord]) -> Self {
        let mut summary = Self::default();

        for delivery in deliveries {
            summary.total += 1;
            let bucket = match DeliveryStatus::classify(delivery.status.as_deref()) {
                DeliveryStatus::Delivered => &mut summary.delivered,
                DeliveryStatus::InTransit => &mut summary.in_transit,
                DeliveryStatus::Pending => &mut summary.pending,
                DeliveryStatus::Accepted => &mut summary.accepted,
                DeliveryStatus::Cancelled => &mut summary.cancelled,
                DeliveryStatus::Unknown | DeliveryStatus::Unspecified => &mut summary.unknown,
                DeliveryStatus::Other(_) => &mut summary.other,
            };
            *bucket += 1;
        }

        summary
    }
}
