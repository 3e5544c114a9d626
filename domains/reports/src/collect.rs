//! Fetch report inputs through the marketplace API

use artmart_client::MarketplaceApi;

use crate::document::ReportInput;
use crate::domain::period::ReportPeriod;
use crate::ReportError;

/// Fetch everything a report needs for `period`, one request at a time.
///
/// The first failed request aborts collection.
pub async fn collect_report_input(
    api: &dyn MarketplaceApi,
    period: ReportPeriod,
) -> Result<ReportInput, ReportError> {
    let range = period.date_range();
    tracing::info!(period = %period.label(), "Collecting report input");

    let overview = api.overview(&range).await?;
    let payments = api.payments(&range).await?;
    let deliveries = api.deliveries(&range).await?;
    let verification = api.verification_counts(&range).await?;

    tracing::info!(
        payments = payments.len(),
        deliveries = deliveries.len(),
        verifications = verification.total(),
        "Report input collected"
    );

    Ok(ReportInput {
        period,
        overview,
        payments,
        deliveries,
        verification,
    })
}
