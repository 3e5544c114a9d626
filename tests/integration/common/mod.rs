//! Shared fixtures for the integration tests
//!
//! - HTTP clients pointed at a `wiremock` server, with or without a token
//! - Payment and delivery records with realistic backend shapes

#![allow(dead_code)]

use std::sync::Arc;

use artmart_client::{ApiClient, ClientConfig, Session, SharedSession, StaticSession};
use artmart_domain::{DeliveryRecord, PaymentRecord};
use serde_json::{json, Value};

pub const TEST_TOKEN: &str = "test-session-token";

pub fn client_config(base_url: &str) -> ClientConfig {
    ClientConfig {
        provider: "http".to_string(),
        base_url: base_url.to_string(),
        timeout_secs: 5,
    }
}

pub fn client_with_session(base_url: &str, session: Arc<dyn Session>) -> ApiClient {
    ApiClient::new(&client_config(base_url), session).expect("client should build")
}

pub fn signed_in_client(base_url: &str) -> ApiClient {
    client_with_session(
        base_url,
        Arc::new(StaticSession::new(Some(TEST_TOKEN.to_string()))),
    )
}

pub fn anonymous_client(base_url: &str) -> ApiClient {
    client_with_session(base_url, Arc::new(StaticSession::anonymous()))
}

/// Client plus the session handle, for sign-in/sign-out flows
pub fn shared_session_client(base_url: &str) -> (ApiClient, SharedSession) {
    let session = SharedSession::new();
    let client = client_with_session(base_url, Arc::new(session.clone()));
    (client, session)
}

pub fn payment(id: &str, amount: Value, status: &str) -> PaymentRecord {
    PaymentRecord {
        id: id.into(),
        amount,
        status: Some(status.to_string()),
        buyer_name: Some(format!("Buyer {}", id)),
        artist_name: Some("Nadeesha Perera".to_string()),
        timestamp: Some("2026-10-12T09:15:00Z".to_string()),
    }
}

pub fn delivery(id: &str, status: &str) -> DeliveryRecord {
    DeliveryRecord {
        id: id.into(),
        status: Some(status.to_string()),
        created_at: Some("2026-10-03".to_string()),
        updated_at: Some("2026-10-04T11:00:00Z".to_string()),
    }
}

/// Backend payment JSON as the admin endpoint sends it
pub fn payment_json(id: u64, amount: Value, status: &str) -> Value {
    json!({
        "_id": id,
        "amount": amount,
        "status": status,
        "buyerName": "Kasun",
        "artistName": "Ishara",
        "createdAt": "2026-10-20T08:00:00Z"
    })
}
