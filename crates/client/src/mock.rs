//! Mock Marketplace API Implementation
//!
//! Programmable mock for testing pages and reports without a backend:
//! - `MockMarketplaceApi`: serves fixtures and records every call
//! - `MockFixtures`: the data each endpoint returns
//! - `set_failure`: makes every following call fail with an HTTP status

use std::sync::{Arc, Mutex, RwLock};

use artmart_common::{Error, Result};
use artmart_domain::{
    validate_form, Artwork, Challenge, DeliveryRecord, OverviewMetrics, PaymentRecord, Product,
    RecordId, Shop, Submission, SubmissionForm, VerificationCounts,
};

use crate::{DateRange, MarketplaceApi};

/// Data served by the mock, one field per endpoint
#[derive(Debug, Clone, Default)]
pub struct MockFixtures {
    pub artworks: Vec<Artwork>,
    pub challenges: Vec<Challenge>,
    pub submissions: Vec<Submission>,
    pub shops: Vec<Shop>,
    pub products: Vec<Product>,
    pub overview: OverviewMetrics,
    pub payments: Vec<PaymentRecord>,
    pub deliveries: Vec<DeliveryRecord>,
    pub verification: VerificationCounts,
}

/// A recorded call for test assertions
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub endpoint: String,
    pub range: Option<DateRange>,
}

/// Mock marketplace API with programmable fixtures
#[derive(Debug, Clone, Default)]
pub struct MockMarketplaceApi {
    fixtures: Arc<RwLock<MockFixtures>>,
    failure: Arc<RwLock<Option<u16>>>,
    history: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockMarketplaceApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fixtures(fixtures: MockFixtures) -> Self {
        Self {
            fixtures: Arc::new(RwLock::new(fixtures)),
            ..Self::default()
        }
    }

    /// Replace the served fixtures
    pub fn set_fixtures(&self, fixtures: MockFixtures) {
        *self.fixtures.write().unwrap() = fixtures;
    }

    /// Fail every following call with `status`
    pub fn set_failure(&self, status: u16) {
        *self.failure.write().unwrap() = Some(status);
    }

    pub fn clear_failure(&self) {
        *self.failure.write().unwrap() = None;
    }

    /// Get recorded calls
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.history.lock().unwrap().clone()
    }

    /// Clear history
    pub fn reset_history(&self) {
        self.history.lock().unwrap().clear();
    }

    fn record(&self, endpoint: impl Into<String>, range: Option<&DateRange>) -> Result<()> {
        let endpoint = endpoint.into();
        tracing::debug!(endpoint = %endpoint, "Mock API: recording call");
        self.history
            .lock()
            .map_err(|e| Error::Internal(format!("history lock poisoned: {e}")))?
            .push(RecordedCall {
                endpoint: endpoint.clone(),
                range: range.copied(),
            });

        match *self
            .failure
            .read()
            .map_err(|e| Error::Internal(format!("failure lock poisoned: {e}")))?
        {
            Some(status) => Err(Error::from_status(
                status,
                format!("Mock failure for {}", endpoint),
            )),
            None => Ok(()),
        }
    }

    fn read<T>(&self, select: impl FnOnce(&MockFixtures) -> T) -> Result<T> {
        let fixtures = self
            .fixtures
            .read()
            .map_err(|e| Error::Internal(format!("fixtures lock poisoned: {e}")))?;
        Ok(select(&fixtures))
    }
}

#[async_trait::async_trait]
impl MarketplaceApi for MockMarketplaceApi {
    async fn admin_artworks(&self) -> Result<Vec<Artwork>> {
        self.record("/api/admin/artworks", None)?;
        self.read(|f| f.artworks.clone())
    }

    async fn challenge(&self, id: &RecordId) -> Result<Challenge> {
        self.record(format!("/api/challenges/{}", id), None)?;
        self.read(|f| f.challenges.iter().find(|c| &c.id == id).cloned())?
            .ok_or_else(|| Error::NotFound(format!("Challenge {} not found", id)))
    }

    async fn submissions(&self) -> Result<Vec<Submission>> {
        self.record("/api/submissions", None)?;
        self.read(|f| f.submissions.clone())
    }

    async fn create_submission(&self, form: &SubmissionForm) -> Result<Submission> {
        validate_form(form)?;
        self.record("POST /api/submissions", None)?;

        let mut fixtures = self
            .fixtures
            .write()
            .map_err(|e| Error::Internal(format!("fixtures lock poisoned: {e}")))?;
        let submission = Submission {
            id: RecordId::new(format!("mock-submission-{}", fixtures.submissions.len() + 1)),
            challenge_id: Some(RecordId::new(form.challenge_id.clone())),
            artwork_id: Some(RecordId::new(form.artwork_id.clone())),
            ..Default::default()
        };
        fixtures.submissions.push(submission.clone());
        Ok(submission)
    }

    async fn shops(&self) -> Result<Vec<Shop>> {
        self.record("/api/shop/all", None)?;
        self.read(|f| f.shops.clone())
    }

    async fn products(&self) -> Result<Vec<Product>> {
        self.record("/api/products", None)?;
        self.read(|f| f.products.clone())
    }

    async fn overview(&self, range: &DateRange) -> Result<OverviewMetrics> {
        self.record("/api/admin/reports/overview", Some(range))?;
        self.read(|f| f.overview.clone())
    }

    async fn payments(&self, range: &DateRange) -> Result<Vec<PaymentRecord>> {
        self.record("/api/admin/payments", Some(range))?;
        self.read(|f| f.payments.clone())
    }

    async fn deliveries(&self, range: &DateRange) -> Result<Vec<DeliveryRecord>> {
        self.record("/api/admin/deliveries", Some(range))?;
        self.read(|f| f.deliveries.clone())
    }

    async fn verification_counts(&self, range: &DateRange) -> Result<VerificationCounts> {
        self.record("/api/admin/verifications/summary", Some(range))?;
        self.read(|f| f.verification)
    }
}
