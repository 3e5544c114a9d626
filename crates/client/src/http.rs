//! HTTP implementation of the marketplace API
//!
//! One reqwest client per `ApiClient`. The bearer token is read from the
//! injected session on every request.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use artmart_common::{Error, Result};
use artmart_domain::{
    validate_form, Artwork, Challenge, DeliveryRecord, OverviewMetrics, PaymentRecord, Product,
    RecordId, Shop, Submission, SubmissionForm, VerificationCounts,
};

use crate::{ClientConfig, DateRange, MarketplaceApi, Session};

/// Response bodies arrive either bare or wrapped in `{ "data": ... }`
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Payload<T> {
    fn into_inner(self) -> T {
        match self {
            Payload::Wrapped { data } => data,
            Payload::Bare(value) => value,
        }
    }
}

/// Backend error body, e.g. `{ "message": "Artwork not found" }`
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "error")]
    message: String,
}

/// REST client for the marketplace backend
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<dyn Session>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.session.token().is_some())
            .finish()
    }
}

impl ApiClient {
    /// Create a client for `config.base_url` that authenticates with `session`
    pub fn new(config: &ClientConfig, session: Arc<dyn Session>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");

        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder, path: &str) -> Result<T> {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return Err(log_failure(path, Error::Network(e.to_string()))),
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| log_failure(path, Error::Network(e.to_string())))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|error| error.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });
            return Err(log_failure(path, Error::from_status(status.as_u16(), message)));
        }

        tracing::debug!(path = %path, status = status.as_u16(), "Backend request succeeded");

        let payload: Payload<T> =
            serde_json::from_str(&body).map_err(|e| log_failure(path, Error::from(e)))?;
        Ok(payload.into_inner())
    }

    /// `GET path` with query parameters
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let builder = self.request(Method::GET, path).query(query);
        self.send(builder, path).await
    }

    /// `POST path` with a JSON body
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).json(body);
        self.send(builder, path).await
    }
}

fn log_failure(path: &str, error: Error) -> Error {
    tracing::error!(
        path = %path,
        status = ?error.status_code(),
        code = error.error_code(),
        detail = %error,
        "{}",
        error.user_message()
    );
    error
}

#[async_trait::async_trait]
impl MarketplaceApi for ApiClient {
    async fn admin_artworks(&self) -> Result<Vec<Artwork>> {
        self.get("/api/admin/artworks", &[]).await
    }

    async fn challenge(&self, id: &RecordId) -> Result<Challenge> {
        self.get(&format!("/api/challenges/{}", id), &[]).await
    }

    async fn submissions(&self) -> Result<Vec<Submission>> {
        self.get("/api/submissions", &[]).await
    }

    async fn create_submission(&self, form: &SubmissionForm) -> Result<Submission> {
        validate_form(form)?;
        self.post("/api/submissions", form).await
    }

    async fn shops(&self) -> Result<Vec<Shop>> {
        self.get("/api/shop/all", &[]).await
    }

    async fn products(&self) -> Result<Vec<Product>> {
        self.get("/api/products", &[]).await
    }

    async fn overview(&self, range: &DateRange) -> Result<OverviewMetrics> {
        self.get("/api/admin/reports/overview", &range.query()).await
    }

    async fn payments(&self, range: &DateRange) -> Result<Vec<PaymentRecord>> {
        self.get("/api/admin/payments", &range.query()).await
    }

    async fn deliveries(&self, range: &DateRange) -> Result<Vec<DeliveryRecord>> {
        self.get("/api/admin/deliveries", &range.query()).await
    }

    async fn verification_counts(&self, range: &DateRange) -> Result<VerificationCounts> {
        self.get("/api/admin/verifications/summary", &range.query())
            .await
    }
}
