//! End-to-end report workflow: fetch -> aggregate -> paginate -> render -> save
//!
//! Runs against the mock marketplace API and, for the full HTTP path, a
//! wiremock backend.

mod common;

use std::sync::Arc;

use artmart_app::{run_report, ReportJob};
use artmart_client::mock::{MockFixtures, MockMarketplaceApi};
use artmart_client::StaticSession;
use artmart_common::Config;
use artmart_domain::{OverviewMetrics, VerificationCounts};
use artmart_reports::{
    collect_report_input, generate_report, normalize_delivery_status, ReportDocument,
    ReportInput, ReportOptions, ReportPeriod, DETAIL_ROW_LIMIT,
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{client_with_session, delivery, payment, payment_json, TEST_TOKEN};

fn october() -> ReportPeriod {
    ReportPeriod::month(2026, 10).unwrap()
}

fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 11, 1, 7, 0, 0).unwrap()
}

fn metric<'a>(document: &'a ReportDocument, heading: &str, label: &str) -> &'a str {
    document
        .section(heading)
        .and_then(|s| s.first_table())
        .and_then(|t| t.rows.iter().find(|row| row[0] == label))
        .map(|row| row[1].as_str())
        .unwrap_or_else(|| panic!("no {:?} row in {}", label, heading))
}

fn busy_month() -> MockFixtures {
    let statuses = ["paid", "Escrow", "PENDING", "refunded"];
    let delivery_statuses = [
        "Delivered",
        "Out for Delivery",
        "pending_assignment",
        "accepted",
        "cancelled_pending_refund",
        "unknown",
        "",
        "lost in warehouse",
    ];

    MockFixtures {
        overview: OverviewMetrics {
            total_users: 120,
            total_artists: 35,
            total_artworks: 410,
            total_orders: 64,
            total_revenue: json!("1,234,567.891"),
            active_shops: 12,
        },
        payments: (0..40)
            .map(|i| payment(&format!("p{}", i), json!(1000), statuses[i % statuses.len()]))
            .collect(),
        deliveries: (0..24)
            .map(|i| {
                delivery(
                    &format!("d{}", i),
                    delivery_statuses[i % delivery_statuses.len()],
                )
            })
            .collect(),
        verification: VerificationCounts {
            pending: 3,
            approved: 9,
            rejected: 2,
        },
        ..Default::default()
    }
}

// RW-I01: Busy month aggregates, caps detail tables and renders a PDF
#[tokio::test]
async fn test_busy_month_report() {
    let api = MockMarketplaceApi::with_fixtures(busy_month());
    let input = collect_report_input(&api, october()).await.unwrap();
    let report = generate_report(&input, generated_at(), &ReportOptions::default()).unwrap();

    let doc = &report.document;
    assert_eq!(doc.period_label, "October 2026");
    assert_eq!(metric(doc, "Overview", "Total Revenue"), "LKR 1,234,567.89");

    assert_eq!(metric(doc, "Payments", "Total Payments"), "40");
    assert_eq!(metric(doc, "Payments", "Total Amount"), "LKR 40,000.00");
    assert_eq!(metric(doc, "Payments", "Paid"), "10");
    assert_eq!(metric(doc, "Payments", "In Escrow"), "10");
    assert_eq!(metric(doc, "Payments", "Pending"), "10");
    assert_eq!(metric(doc, "Payments", "Other"), "10");

    // 24 deliveries over 8 statuses -> 3 of each
    assert_eq!(metric(doc, "Deliveries", "Total Deliveries"), "24");
    assert_eq!(metric(doc, "Deliveries", "Delivered"), "3");
    assert_eq!(metric(doc, "Deliveries", "In Transit"), "3");
    assert_eq!(metric(doc, "Deliveries", "Pending"), "3");
    assert_eq!(metric(doc, "Deliveries", "Accepted"), "3");
    assert_eq!(metric(doc, "Deliveries", "Cancelled"), "3");
    assert_eq!(metric(doc, "Deliveries", "Unknown"), "6");
    assert_eq!(metric(doc, "Deliveries", "Other"), "3");

    assert_eq!(metric(doc, "Verification", "Total"), "14");

    for heading in ["Payments", "Deliveries"] {
        let section = doc.section(heading).unwrap();
        let details = section.tables().nth(1).unwrap();
        assert_eq!(details.rows.len(), DETAIL_ROW_LIMIT, "{}", heading);
    }

    assert!(report.pages.len() >= 2);
    assert!(report.pdf.starts_with(b"%PDF"));
}

// RW-I02: An empty period is a valid report full of zeroes
#[tokio::test]
async fn test_empty_period_report() {
    let api = MockMarketplaceApi::new();
    let input = collect_report_input(&api, october()).await.unwrap();
    assert_eq!(input, ReportInput::empty(october()));

    let report = generate_report(&input, generated_at(), &ReportOptions::default()).unwrap();
    let doc = &report.document;
    assert_eq!(metric(doc, "Overview", "Total Revenue"), "LKR 0.00");
    assert_eq!(metric(doc, "Payments", "Total Amount"), "LKR 0.00");
    assert_eq!(metric(doc, "Deliveries", "Total Deliveries"), "0");
    assert_eq!(metric(doc, "Verification", "Total"), "0");
    assert!(report.pdf.starts_with(b"%PDF"));
}

// RW-I03: Normalization is stable across repeated application
#[test]
fn test_normalization_idempotent_on_fixture_statuses() {
    for record in busy_month().deliveries {
        let once = normalize_delivery_status(record.status.as_deref());
        assert_eq!(
            normalize_delivery_status(Some(&once)),
            once,
            "raw {:?}",
            record.status
        );
    }
    assert_eq!(normalize_delivery_status(Some("Out for Delivery")), "in_transit");
    assert_eq!(normalize_delivery_status(Some("pending_assignment")), "pending");
    assert_eq!(normalize_delivery_status(Some("")), "");
}

// RW-I04: Full HTTP path with a token, saved to disk by the app layer
#[tokio::test]
async fn test_http_backend_to_saved_pdf() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/reports/overview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "totalUsers": 8, "totalRevenue": 15250.5 }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            payment_json(1, json!(15000), "paid"),
            payment_json(2, json!("not a number"), "escrow"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/deliveries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": 5, "deliveryStatus": "Shipped" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/verifications/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "pending": 1 })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let uri = server.uri();
    let out_dir = dir.path().display().to_string();
    let config = Config::from_lookup(|key| match key {
        "ARTMART_API_BASE_URL" => Some(uri.clone()),
        "ARTMART_AUTH_TOKEN" => Some(TEST_TOKEN.to_string()),
        "REPORT_OUTPUT_DIR" => Some(out_dir.clone()),
        _ => None,
    })
    .unwrap();

    let api = client_with_session(
        &config.api_base_url,
        Arc::new(StaticSession::new(config.auth_token.clone())),
    );
    let job = ReportJob {
        period: october(),
        output: None,
        write_json: true,
    };
    let saved = run_report(&config, &api, &job, generated_at()).await.unwrap();

    assert_eq!(saved, dir.path().join("artmart-report-2026-10.pdf"));
    assert!(std::fs::read(&saved).unwrap().starts_with(b"%PDF"));

    let document: serde_json::Value =
        serde_json::from_slice(&std::fs::read(saved.with_extension("json")).unwrap()).unwrap();
    let payments = &document["sections"][1];
    assert_eq!(payments["heading"], "Payments");
    let notes: Vec<&str> = payments["blocks"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|b| b["kind"] == "note")
        .filter_map(|b| b["text"].as_str())
        .collect();
    assert!(notes.iter().any(|n| n.contains("unreadable amount")));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);
    for request in requests {
        assert_eq!(
            request.headers.get("authorization").unwrap(),
            format!("Bearer {}", TEST_TOKEN).as_str()
        );
    }
}

// RW-I05: Backend rejection aborts before anything is written
#[tokio::test]
async fn test_backend_failure_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.pdf");
    let config = Config::from_lookup(|key| match key {
        "ARTMART_API_PROVIDER" => Some("mock".to_string()),
        _ => None,
    })
    .unwrap();
    let api = client_with_session(&server.uri(), Arc::new(StaticSession::anonymous()));
    let job = ReportJob {
        period: october(),
        output: Some(output.clone()),
        write_json: false,
    };

    let err = run_report(&config, &api, &job, generated_at())
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("Server error"));
    assert!(!output.exists());
}
