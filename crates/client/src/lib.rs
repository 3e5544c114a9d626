//! Artmart Marketplace API Client
//!
//! Thin wrapper over the marketplace REST backend:
//! - `http::ApiClient`: reqwest client with bearer-token injection from an
//!   injected `Session` and status-code error mapping
//! - `mock::MockMarketplaceApi`: programmable fixtures and call recording
//! - `MarketplaceApiFactory`: picks one from configuration
//!
//! There is no retry, caching or queuing; errors go straight back to the
//! caller after being logged.

pub mod http;
pub mod mock;
pub mod session;

use std::sync::Arc;

use chrono::NaiveDate;

use artmart_common::{Config, Error, Result};
use artmart_domain::{
    Artwork, Challenge, DeliveryRecord, OverviewMetrics, PaymentRecord, Product, RecordId, Shop,
    Submission, SubmissionForm, VerificationCounts,
};

pub use http::ApiClient;
pub use session::{Session, SharedSession, StaticSession};

/// API client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend provider (http, mock)
    pub provider: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl From<&Config> for ClientConfig {
    fn from(config: &Config) -> Self {
        Self {
            provider: config.api_provider.clone(),
            base_url: config.api_base_url.clone(),
            timeout_secs: config.api_timeout_secs,
        }
    }
}

/// Inclusive date range sent as `from`/`to` query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    pub fn query(&self) -> [(&'static str, String); 2] {
        [
            ("from", self.from.format("%Y-%m-%d").to_string()),
            ("to", self.to.format("%Y-%m-%d").to_string()),
        ]
    }
}

/// Marketplace backend operations used by the client
#[async_trait::async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// `GET /api/admin/artworks`
    async fn admin_artworks(&self) -> Result<Vec<Artwork>>;

    /// `GET /api/challenges/{id}`
    async fn challenge(&self, id: &RecordId) -> Result<Challenge>;

    /// `GET /api/submissions`
    async fn submissions(&self) -> Result<Vec<Submission>>;

    /// `POST /api/submissions`. The form is validated before anything is sent.
    async fn create_submission(&self, form: &SubmissionForm) -> Result<Submission>;

    /// `GET /api/shop/all`
    async fn shops(&self) -> Result<Vec<Shop>>;

    /// `GET /api/products`
    async fn products(&self) -> Result<Vec<Product>>;

    /// `GET /api/admin/reports/overview`
    async fn overview(&self, range: &DateRange) -> Result<OverviewMetrics>;

    /// `GET /api/admin/payments`
    async fn payments(&self, range: &DateRange) -> Result<Vec<PaymentRecord>>;

    /// `GET /api/admin/deliveries`
    async fn deliveries(&self, range: &DateRange) -> Result<Vec<DeliveryRecord>>;

    /// `GET /api/admin/verifications/summary`
    async fn verification_counts(&self, range: &DateRange) -> Result<VerificationCounts>;
}

/// Factory for creating MarketplaceApi implementations
pub struct MarketplaceApiFactory;

impl MarketplaceApiFactory {
    pub fn create(
        config: ClientConfig,
        session: Arc<dyn Session>,
    ) -> Result<Box<dyn MarketplaceApi>> {
        match config.provider.as_str() {
            "http" => {
                tracing::info!(base_url = %config.base_url, "Creating HTTP marketplace client");
                Ok(Box::new(ApiClient::new(&config, session)?))
            }
            "mock" => {
                tracing::info!("Creating mock marketplace client");
                Ok(Box::new(mock::MockMarketplaceApi::new()))
            }
            provider => Err(Error::Configuration(format!(
                "Unknown API provider: {}. Supported providers: http, mock",
                provider
            ))),
        }
    }
}
