//! HTTP-level tests for the marketplace API client against a wiremock backend
//!
//! Covers bearer-token injection from the session, status-code error mapping,
//! response envelopes and query parameters for period endpoints.

mod common;

use artmart_client::{DateRange, MarketplaceApi};
use artmart_domain::{ArtworkStatus, RecordId, SubmissionForm};
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{anonymous_client, payment_json, shared_session_client, signed_in_client, TEST_TOKEN};

fn october() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 10, 31).unwrap(),
    )
}

// API-I01: Token present -> Authorization: Bearer <token>
#[test_log::test(tokio::test)]
async fn test_bearer_header_attached_when_signed_in() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/shop/all"))
        .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let shops = signed_in_client(&server.uri()).shops().await.unwrap();
    assert!(shops.is_empty());
}

// API-I02: No token -> no Authorization header at all
#[tokio::test]
async fn test_no_authorization_header_when_anonymous() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    anonymous_client(&server.uri()).products().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

// API-I03: The session is read per request, so sign-out takes effect immediately
#[tokio::test]
async fn test_session_changes_apply_to_next_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/submissions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (client, session) = shared_session_client(&server.uri());
    client.submissions().await.unwrap();
    session.sign_in("fresh-token");
    client.submissions().await.unwrap();
    session.sign_out();
    client.submissions().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let auth: Vec<Option<String>> = requests
        .iter()
        .map(|r| {
            r.headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .collect();
    assert_eq!(
        auth,
        vec![None, Some("Bearer fresh-token".to_string()), None]
    );
}

// API-I04: Status codes map to error categories with backend messages kept
#[tokio::test]
async fn test_status_codes_map_to_error_categories() {
    let server = MockServer::start().await;
    let cases = [
        (401, "AUTHENTICATION_ERROR"),
        (403, "AUTHORIZATION_ERROR"),
        (404, "NOT_FOUND"),
        (500, "SERVER_ERROR"),
        (503, "SERVER_ERROR"),
        (409, "REQUEST_FAILED"),
    ];

    for (status, code) in cases {
        server.reset().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/artworks"))
            .respond_with(
                ResponseTemplate::new(status).set_body_json(json!({ "message": "backend says no" })),
            )
            .mount(&server)
            .await;

        let err = signed_in_client(&server.uri())
            .admin_artworks()
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), code, "status {}", status);
        assert_eq!(err.status_code(), Some(status));
        assert!(err.to_string().contains("backend says no"));
    }
}

// API-I05: 401 is the only failure that means the session expired
#[tokio::test]
async fn test_unauthorized_flags_session_expiry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/payments"))
        .respond_with(ResponseTemplate::new(401).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = signed_in_client(&server.uri())
        .payments(&october())
        .await
        .unwrap_err();
    assert!(err.is_session_expired());
    assert_eq!(err.user_message(), "Unauthorized. Please log in again.");
}

// API-I06: Period endpoints send from/to and accept a {data} envelope
#[tokio::test]
async fn test_period_query_and_data_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/payments"))
        .and(query_param("from", "2026-10-01"))
        .and(query_param("to", "2026-10-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                payment_json(17, json!("1,250.50"), "escrow"),
                payment_json(18, json!(900), "paid"),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payments = signed_in_client(&server.uri())
        .payments(&october())
        .await
        .unwrap();
    assert_eq!(payments.len(), 2);
    assert_eq!(payments[0].id, RecordId::from("17"));
    assert_eq!(payments[0].amount, json!("1,250.50"));
    assert_eq!(payments[1].timestamp.as_deref(), Some("2026-10-20T08:00:00Z"));
}

// API-I07: Bare objects decode too, and unknown artwork statuses survive
#[tokio::test]
async fn test_bare_payloads_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/artworks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "a1", "title": "Monsoon", "price": 45000, "status": "Sold" },
            { "_id": "a2", "title": "Lotus", "status": "Reserved" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/verifications/summary"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "pending": 4, "approved": 10, "rejected": 1 })),
        )
        .mount(&server)
        .await;

    let client = signed_in_client(&server.uri());
    let artworks = client.admin_artworks().await.unwrap();
    assert_eq!(artworks[0].status, ArtworkStatus::Sold);
    assert_eq!(
        artworks[1].status,
        ArtworkStatus::Other("Reserved".to_string())
    );

    let counts = client.verification_counts(&october()).await.unwrap();
    assert_eq!(counts.total(), 15);
}

// API-I08: Challenge lookups put the id in the path
#[tokio::test]
async fn test_challenge_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/challenges/42"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 42, "title": "Coastlines" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let challenge = signed_in_client(&server.uri())
        .challenge(&RecordId::from("42"))
        .await
        .unwrap();
    assert_eq!(challenge.id.as_str(), "42");
}

// API-I09: Valid submissions are posted as camelCase JSON
#[tokio::test]
async fn test_create_submission_posts_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/submissions"))
        .and(body_json(json!({
            "challengeId": "c1",
            "artworkId": "a9",
            "note": "Oil on canvas"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "_id": "s1", "challengeId": "c1", "artworkId": "a9" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let form = SubmissionForm {
        challenge_id: "c1".to_string(),
        artwork_id: "a9".to_string(),
        note: "Oil on canvas".to_string(),
    };
    let submission = signed_in_client(&server.uri())
        .create_submission(&form)
        .await
        .unwrap();
    assert_eq!(submission.id.as_str(), "s1");
}

// API-I10: Invalid submissions never reach the backend
#[tokio::test]
async fn test_invalid_submission_not_sent() {
    let server = MockServer::start().await;

    let err = signed_in_client(&server.uri())
        .create_submission(&SubmissionForm::default())
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
    assert!(server.received_requests().await.unwrap().is_empty());
}

// API-I11: Malformed success bodies surface as serialization errors
#[tokio::test]
async fn test_malformed_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/shop/all"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = signed_in_client(&server.uri()).shops().await.unwrap_err();
    assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
}
