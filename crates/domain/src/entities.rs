//! Domain entities for Artmart
//!
//! Transfer records as the backend sends them. The client owns no invariants
//! over these: they are fetched, displayed, optionally edited locally, and
//! discarded. Every record tolerates missing optional fields.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Backend identifier.
///
/// The backend sends ids as strings (document stores) or integers
/// (relational tables); both are held as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(id) => RecordId(id),
            RawId::Signed(id) => RecordId(id.to_string()),
            RawId::Unsigned(id) => RecordId(id.to_string()),
        })
    }
}

/// Artwork listing status
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ArtworkStatus {
    #[default]
    #[serde(alias = "available", alias = "AVAILABLE")]
    Available,
    #[serde(alias = "sold", alias = "SOLD")]
    Sold,
    /// Any status this client does not know about, kept as sent
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for ArtworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtworkStatus::Available => write!(f, "Available"),
            ArtworkStatus::Sold => write!(f, "Sold"),
            ArtworkStatus::Other(status) => write!(f, "{}", status),
        }
    }
}

/// Artwork as listed in the admin and gallery views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Artwork {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub title: String,
    #[serde(alias = "image")]
    pub image_url: Option<String>,
    pub price: Decimal,
    pub status: ArtworkStatus,
    pub likes: u64,
    pub views: u64,
    #[serde(alias = "artist")]
    pub artist_name: Option<String>,
}

impl Artwork {
    pub fn is_sold(&self) -> bool {
        self.status == ArtworkStatus::Sold
    }
}

/// Payment as returned by the admin payments endpoint.
///
/// `amount` is kept as the raw JSON value: the backend has sent numbers,
/// numeric strings, and occasionally garbage here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentRecord {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub amount: serde_json::Value,
    pub status: Option<String>,
    #[serde(alias = "buyer")]
    pub buyer_name: Option<String>,
    #[serde(alias = "artist")]
    pub artist_name: Option<String>,
    #[serde(alias = "createdAt", alias = "date")]
    pub timestamp: Option<String>,
}

/// Delivery as returned by the admin deliveries endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DeliveryRecord {
    #[serde(alias = "_id")]
    pub id: RecordId,
    #[serde(alias = "deliveryStatus")]
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Marketing campaign drafted by a shop. Local only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Campaign {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub discount_percent: Option<u8>,
}

/// Community art challenge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Challenge {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub theme: Option<String>,
    pub deadline: Option<String>,
    pub prize: Option<String>,
    pub submission_count: u64,
}

/// Badge an artist earns. Local only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Achievement {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub points: u32,
}

/// Challenge entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Submission {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub challenge_id: Option<RecordId>,
    pub artwork_id: Option<RecordId>,
    pub title: Option<String>,
    pub artist_name: Option<String>,
    pub image_url: Option<String>,
}

/// Shop listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Shop {
    #[serde(alias = "_id")]
    pub id: RecordId,
    #[serde(alias = "shopName")]
    pub name: String,
    pub owner_name: Option<String>,
    pub email: Option<String>,
    pub verified: bool,
    pub product_count: u64,
}

/// Art supply product sold by a shop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub name: String,
    pub price: Decimal,
    pub shop_id: Option<RecordId>,
    pub stock: u32,
    pub image_url: Option<String>,
}

/// Headline numbers for a report period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OverviewMetrics {
    pub total_users: u64,
    pub total_artists: u64,
    pub total_artworks: u64,
    pub total_orders: u64,
    pub total_revenue: serde_json::Value,
    pub active_shops: u64,
}

/// Artist and shop verification queue sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct VerificationCounts {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

impl VerificationCounts {
    pub fn total(&self) -> u64 {
        self.pending
            .saturating_add(self.approved)
            .saturating_add(self.rejected)
    }
}
