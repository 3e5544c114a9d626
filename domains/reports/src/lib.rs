//! Reports domain: status normalization, period aggregation, paginated PDF rendering
//!
//! The pipeline is collect -> build -> paginate -> render:
//! - `collect::collect_report_input` fetches a period's data through the API
//! - `document::build_report` aggregates it into sections (pure)
//! - `layout::paginate` places sections on pages (pure)
//! - `pdf::render_pdf` / `pdf::save_pdf` write the artifact

pub mod collect;
pub mod currency;
pub mod document;
pub mod domain;
pub mod layout;
pub mod pdf;
pub mod summary;

use chrono::{DateTime, Utc};
use thiserror::Error;

pub use collect::collect_report_input;
pub use currency::CurrencyFormatter;
pub use document::{build_report, ReportDocument, ReportInput, ReportOptions, DETAIL_ROW_LIMIT};
pub use domain::period::ReportPeriod;
pub use domain::status::{normalize_delivery_status, DeliveryStatus, PaymentStatus};
pub use layout::{paginate, Page, PageGeometry};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Report period error: {0}")]
    Period(String),

    #[error("Report render error: {0}")]
    Render(String),

    #[error("Report I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report data error: {0}")]
    Api(#[from] artmart_common::Error),
}

/// A finished report: the document, its pages, and the PDF bytes
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub document: ReportDocument,
    pub pages: Vec<Page>,
    pub pdf: Vec<u8>,
}

impl GeneratedReport {
    /// Default filename, e.g. `artmart-report-2026-10.pdf`
    pub fn default_filename(period: &ReportPeriod) -> String {
        format!("artmart-report-{}.pdf", period.slug())
    }
}

/// Build, lay out and render a report
pub fn generate_report(
    input: &ReportInput,
    generated_at: DateTime<Utc>,
    options: &ReportOptions,
) -> Result<GeneratedReport, ReportError> {
    let document = build_report(input, generated_at, options);
    let geometry = PageGeometry::A4;
    let pages = paginate(&document, &geometry);
    let pdf = pdf::render_pdf(&document.title, &pages, &geometry)?;

    tracing::info!(
        period = %document.period_label,
        pages = pages.len(),
        "Report generated"
    );

    Ok(GeneratedReport {
        document,
        pages,
        pdf,
    })
}
