//! Result delivery against a live main service stand-in.

mod common;

use axum::http::StatusCode;
use chronicle::{
    ChronicleId, HttpReporter, Identifier, ItemResult, ReportError, ReporterConfig, ResultReporter,
};
use serde_json::json;

use common::harness::{TEST_API_KEY, spawn_main_service};

fn results() -> Vec<ItemResult> {
    vec![
        ItemResult {
            item_id: ChronicleId::from(1i64),
            accuracy: 0.8123,
        },
        ItemResult {
            item_id: ChronicleId::from("c-2"),
            accuracy: 0.05,
        },
    ]
}

#[tokio::test]
async fn test_successful_delivery_shape() {
    let main = spawn_main_service(StatusCode::OK).await.unwrap();
    let reporter = HttpReporter::new(ReporterConfig::new(main.url(), TEST_API_KEY)).unwrap();

    let delivered = reporter.report(&Identifier::Int(42), &results()).await;

    assert!(delivered);
    let deliveries = main.deliveries();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].request_id, "42");
    assert_eq!(deliveries[0].api_key.as_deref(), Some(TEST_API_KEY));
    assert_eq!(
        deliveries[0].body,
        json!({
            "results": [
                {"chronicle_research_id": 1, "accuracy": 0.8123},
                {"chronicle_research_id": "c-2", "accuracy": 0.05}
            ]
        })
    );
}

#[tokio::test]
async fn test_any_2xx_counts_as_delivered() {
    let main = spawn_main_service(StatusCode::NO_CONTENT).await.unwrap();
    let reporter = HttpReporter::new(ReporterConfig::new(main.url(), TEST_API_KEY)).unwrap();

    assert!(reporter.report(&Identifier::Int(1), &results()).await);
}

#[tokio::test]
async fn test_empty_api_key_is_still_sent() {
    let main = spawn_main_service(StatusCode::OK).await.unwrap();
    let reporter = HttpReporter::new(ReporterConfig::new(main.url(), "")).unwrap();

    assert!(reporter.report(&Identifier::Int(1), &results()).await);
    assert_eq!(main.deliveries()[0].api_key.as_deref(), Some(""));
}

#[tokio::test]
async fn test_error_status_is_a_failed_delivery() {
    let main = spawn_main_service(StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .unwrap();
    let reporter = HttpReporter::new(ReporterConfig::new(main.url(), TEST_API_KEY)).unwrap();

    assert!(!reporter.report(&Identifier::Int(7), &results()).await);

    let err = reporter
        .deliver(&Identifier::Int(7), &results())
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::Status { status: 500, .. }));
    assert_eq!(main.delivery_count(), 2);
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let main = spawn_main_service(StatusCode::NOT_FOUND).await.unwrap();
    let reporter = HttpReporter::new(ReporterConfig::new(main.url(), TEST_API_KEY)).unwrap();

    assert!(!reporter.report(&Identifier::Int(9), &results()).await);
    assert_eq!(main.delivery_count(), 1);
}
