//! Report document model
//!
//! `build_report` turns already-fetched collections into titled sections of
//! tables and notes. It does no I/O: identical input and timestamp give an
//! identical document.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use artmart_domain::{DeliveryRecord, OverviewMetrics, PaymentRecord, VerificationCounts};

use crate::currency::CurrencyFormatter;
use crate::domain::period::ReportPeriod;
use crate::domain::status::{DeliveryStatus, PaymentStatus};
use crate::summary::{DeliverySummary, PaymentSummary};

/// Detail tables list at most this many records
pub const DETAIL_ROW_LIMIT: usize = 15;

/// Everything a report is built from
#[derive(Debug, Clone, PartialEq)]
pub struct ReportInput {
    pub period: ReportPeriod,
    pub overview: OverviewMetrics,
    pub payments: Vec<PaymentRecord>,
    pub deliveries: Vec<DeliveryRecord>,
    pub verification: VerificationCounts,
}

impl ReportInput {
    /// Input with no activity, for a period with nothing recorded
    pub fn empty(period: ReportPeriod) -> Self {
        Self {
            period,
            overview: OverviewMetrics::default(),
            payments: Vec::new(),
            deliveries: Vec::new(),
            verification: VerificationCounts::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub title: String,
    pub currency: CurrencyFormatter,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "Artmart Monthly Report".to_string(),
            currency: CurrencyFormatter::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn metric(&mut self, label: &str, value: impl ToString) {
        self.rows.push(vec![label.to_string(), value.to_string()]);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Table(Table),
    Note { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub heading: String,
    pub blocks: Vec<Block>,
}

impl Section {
    fn new(heading: &str) -> Self {
        Self {
            heading: heading.to_string(),
            blocks: Vec::new(),
        }
    }

    fn table(mut self, table: Table) -> Self {
        self.blocks.push(Block::Table(table));
        self
    }

    fn note(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Note { text: text.into() });
        self
    }

    /// First table in the section, if any
    pub fn first_table(&self) -> Option<&Table> {
        self.tables().next()
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            Block::Note { .. } => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub period_label: String,
    pub generated_at: String,
    pub sections: Vec<Section>,
}

impl ReportDocument {
    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.heading == heading)
    }
}

/// Build the report document for `input`
pub fn build_report(
    input: &ReportInput,
    generated_at: DateTime<Utc>,
    options: &ReportOptions,
) -> ReportDocument {
    let currency = &options.currency;

    let document = ReportDocument {
        title: options.title.clone(),
        period_label: input.period.label(),
        generated_at: generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        sections: vec![
            overview_section(&input.overview, currency),
            payments_section(&input.payments, currency),
            deliveries_section(&input.deliveries),
            verification_section(&input.verification),
        ],
    };

    tracing::debug!(
        period = %document.period_label,
        payments = input.payments.len(),
        deliveries = input.deliveries.len(),
        "Report document built"
    );

    document
}

fn overview_section(overview: &OverviewMetrics, currency: &CurrencyFormatter) -> Section {
    let mut table = Table::new(&["Metric", "Value"]);
    table.metric("Total Users", overview.total_users);
    table.metric("Total Artists", overview.total_artists);
    table.metric("Total Artworks", overview.total_artworks);
    table.metric("Total Orders", overview.total_orders);
    table.metric("Total Revenue", currency.format_value(&overview.total_revenue));
    table.metric("Active Shops", overview.active_shops);
    Section::new("Overview").table(table)
}

fn payments_section(payments: &[PaymentRecord], currency: &CurrencyFormatter) -> Section {
    let summary = PaymentSummary::from_records(payments);

    let mut totals = Table::new(&["Metric", "Value"]);
    totals.metric("Total Payments", summary.total_count);
    totals.metric("Total Amount", currency.format(summary.total_amount));
    totals.metric("Paid", summary.paid.count);
    totals.metric("Paid Amount", currency.format(summary.paid.amount));
    totals.metric("In Escrow", summary.escrow.count);
    totals.metric("Escrow Amount", currency.format(summary.escrow.amount));
    totals.metric("Pending", summary.pending.count);
    totals.metric("Pending Amount", currency.format(summary.pending.amount));
    totals.metric("Other", summary.other.count);

    let mut section = Section::new("Payments").table(totals);
    if summary.unreadable_amounts > 0 {
        section = section.note(format!(
            "{} payment(s) had an unreadable amount and were left out of the totals.",
            summary.unreadable_amounts
        ));
    }
    if payments.is_empty() {
        return section.note("No payments recorded for this period.");
    }

    let mut details = Table::new(&["Date", "Buyer", "Artist", "Amount", "Status"]);
    for payment in payments.iter().take(DETAIL_ROW_LIMIT) {
        details.row(vec![
            display_date(payment.timestamp.as_deref()),
            display_text(payment.buyer_name.as_deref()),
            display_text(payment.artist_name.as_deref()),
            currency.format_value(&payment.amount),
            PaymentStatus::classify(payment.status.as_deref())
                .label()
                .to_string(),
        ]);
    }

    section = section.note(detail_caption("payments", payments.len()));
    section.table(details)
}

fn deliveries_section(deliveries: &[DeliveryRecord]) -> Section {
    let summary = DeliverySummary::from_records(deliveries);

    let mut totals = Table::new(&["Metric", "Value"]);
    totals.metric("Total Deliveries", summary.total);
    totals.metric("Delivered", summary.delivered);
    totals.metric("In Transit", summary.in_transit);
    totals.metric("Pending", summary.pending);
    totals.metric("Accepted", summary.accepted);
    totals.metric("Cancelled", summary.cancelled);
    totals.metric("Unknown", summary.unknown);
    totals.metric("Other", summary.other);

    let section = Section::new("Deliveries").table(totals);
    if deliveries.is_empty() {
        return section.note("No deliveries recorded for this period.");
    }

    let mut details = Table::new(&["Delivery ID", "Status", "Created", "Updated"]);
    for delivery in deliveries.iter().take(DETAIL_ROW_LIMIT) {
        details.row(vec![
            display_text(Some(delivery.id.as_str())),
            DeliveryStatus::classify(delivery.status.as_deref())
                .label()
                .to_string(),
            display_date(delivery.created_at.as_deref()),
            display_date(delivery.updated_at.as_deref()),
        ]);
    }

    section
        .note(detail_caption("deliveries", deliveries.len()))
        .table(details)
}

fn verification_section(counts: &VerificationCounts) -> Section {
    let mut table = Table::new(&["Status", "Count"]);
    table.metric("Pending", counts.pending);
    table.metric("Approved", counts.approved);
    table.metric("Rejected", counts.rejected);
    table.metric("Total", counts.total());
    Section::new("Verification").table(table)
}

fn detail_caption(noun: &str, total: usize) -> String {
    if total > DETAIL_ROW_LIMIT {
        format!("Showing the first {} of {} {}.", DETAIL_ROW_LIMIT, total, noun)
    } else {
        format!("All {} {}.", total, noun)
    }
}

fn display_text(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => "-".to_string(),
    }
}

/// Backend timestamps come as RFC 3339, plain dates, or free text
fn display_date(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return "-".to_string();
    };
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}
