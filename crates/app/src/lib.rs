//! Artmart application composition root
//!
//! Wires configuration, the session, the marketplace client and the report
//! pipeline together. The `artmart-report` binary is a thin shell over this.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};

use artmart_client::{ClientConfig, MarketplaceApi, MarketplaceApiFactory, SharedSession};
use artmart_common::Config;
use artmart_reports::{
    collect_report_input, generate_report, pdf, CurrencyFormatter, GeneratedReport, ReportError,
    ReportOptions, ReportPeriod,
};

/// One report run
#[derive(Debug, Clone)]
pub struct ReportJob {
    pub period: ReportPeriod,
    /// Explicit output file; defaults to `REPORT_OUTPUT_DIR/artmart-report-<slug>.pdf`
    pub output: Option<PathBuf>,
    /// Also write the report document as JSON next to the PDF
    pub write_json: bool,
}

/// Session seeded from the configured token, if any
pub fn create_session(config: &Config) -> SharedSession {
    let session = SharedSession::new();
    if let Some(token) = &config.auth_token {
        session.sign_in(token.clone());
    }
    session
}

/// Build the marketplace client for `config` around `session`
pub fn create_api(
    config: &Config,
    session: SharedSession,
) -> anyhow::Result<Box<dyn MarketplaceApi>> {
    let api = MarketplaceApiFactory::create(ClientConfig::from(config), Arc::new(session))
        .context("Failed to create marketplace client")?;
    Ok(api)
}

pub fn report_options(config: &Config) -> ReportOptions {
    ReportOptions {
        currency: CurrencyFormatter::new(config.report_currency.as_str()),
        ..ReportOptions::default()
    }
}

pub fn output_path(config: &Config, job: &ReportJob) -> PathBuf {
    match &job.output {
        Some(path) => path.clone(),
        None => Path::new(&config.report_output_dir)
            .join(GeneratedReport::default_filename(&job.period)),
    }
}

/// Fetch, build, render and save one report. Returns the PDF path.
pub async fn run_report(
    config: &Config,
    api: &dyn MarketplaceApi,
    job: &ReportJob,
    generated_at: DateTime<Utc>,
) -> anyhow::Result<PathBuf> {
    let input = match collect_report_input(api, job.period).await {
        Ok(input) => input,
        Err(ReportError::Api(e)) if e.is_session_expired() => {
            tracing::warn!("Session rejected by the backend; sign in again and retry");
            return Err(anyhow::anyhow!(
                "{} Provide a fresh token with --token or ARTMART_AUTH_TOKEN.",
                e.user_message()
            ));
        }
        Err(e) => return Err(e).context("Failed to collect report data"),
    };

    let report = generate_report(&input, generated_at, &report_options(config))
        .context("Failed to generate report")?;

    let path = output_path(config, job);
    pdf::save_pdf(&report.pdf, &path)
        .with_context(|| format!("Failed to save report to {}", path.display()))?;

    if job.write_json {
        let json_path = path.with_extension("json");
        let json = serde_json::to_vec_pretty(&report.document)?;
        std::fs::write(&json_path, json)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;
        tracing::info!(path = %json_path.display(), "Report document written");
    }

    Ok(path)
}
