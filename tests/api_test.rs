mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use helpers::{sample_pairs, seed, synthetic_pairs};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use robokop_pairs::db;
use robokop_pairs::pairs::{AssociationRecord, PairQueryService};
use robokop_pairs::server::{router, AppState};
use serde_json::{json, Value};
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

/// File-backed database seeded with `records`, plus a read pool over it.
/// The `TempDir` must outlive the pool.
fn seeded_pool(records: &[AssociationRecord], max_size: u32) -> (TempDir, Pool<SqliteConnectionManager>) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("pairs.db");
    let mut conn = db::open_database(&path).unwrap();
    seed(&mut conn, records);
    drop(conn);
    let pool = db::open_read_pool(&path, max_size).unwrap();
    (tmp, pool)
}

fn app_with(records: &[AssociationRecord]) -> (TempDir, axum::Router) {
    let (tmp, pool) = seeded_pool(records, 4);
    (tmp, router(AppState::new(PairQueryService::new(pool), 500)))
}

async fn post_query(app: axum::Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/drug-disease-pairs")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn query_returns_envelope() {
    let (_tmp, app) = app_with(&sample_pairs());
    let (status, body) = post_query(
        app,
        json!({
            "filters": {"drug_name": "aspirin"},
            "sort": {"score": "desc"},
            "pagination": {"limit": 2, "offset": 0}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["num_of_results"], 4);
    assert_eq!(body["limit"], 2);
    assert_eq!(body["offset"], 0);
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["drug_id"], "CHEBI:15365");
    assert_eq!(rows[0]["score"], 0.91);
    assert_eq!(rows[0]["known"], true);
}

#[tokio::test]
async fn sort_follows_json_key_order() {
    let (_tmp, app) = app_with(&sample_pairs());
    let (status, body) = post_query(
        app,
        json!({
            "sort": {"known": "desc", "drug_name": "desc"},
            "pagination": {"limit": 3, "offset": 0}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["drug_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Metformin", "Aspirin", "Sildenafil"]);
}

#[tokio::test]
async fn limit_is_clamped_to_maximum() {
    let (_tmp, app) = app_with(&synthetic_pairs(600));
    let (status, body) = post_query(app, json!({"pagination": {"limit": 10000, "offset": 0}})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["limit"], 500);
    assert_eq!(body["num_of_results"], 600);
    assert_eq!(body["rows"].as_array().unwrap().len(), 500);
}

#[tokio::test]
async fn invalid_pagination_is_bad_request() {
    for body in [
        json!({"filters": {"drug_name": "aspirin"}}),
        json!({"pagination": {"limit": "ten", "offset": 0}}),
        json!({"pagination": {"limit": 0, "offset": 0}}),
        json!({"pagination": {"limit": 10, "offset": -1}}),
    ] {
        let (_tmp, app) = app_with(&sample_pairs());
        let (status, response) = post_query(app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(response["message"].is_string());
    }
}

#[tokio::test]
async fn storage_failure_is_server_error() {
    let (_tmp, pool) = seeded_pool(&sample_pairs(), 2);
    pool.get()
        .unwrap()
        .execute_batch("DROP TABLE drug_disease_pairs")
        .unwrap();
    let app = router(AppState::new(PairQueryService::new(pool), 500));

    let (status, body) = post_query(app, json!({"pagination": {"limit": 10, "offset": 0}})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "failed to query drug-disease pairs");
}

#[tokio::test]
async fn stats_and_health_endpoints() {
    let (_tmp, app) = app_with(&sample_pairs());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/drug-disease-pairs/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let stats: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(stats["total_pairs"], 8);
    assert_eq!(stats["known_pairs"], 2);
    assert_eq!(stats["source"], "test-fixture");

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn malformed_body_gets_json_error() {
    let (_tmp, app) = app_with(&sample_pairs());
    let request = Request::builder()
        .method("POST")
        .uri("/api/drug-disease-pairs")
        .header("content-type", "application/json")
        .body(Body::from("{\"pagination\": {\"limit\": 10,"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["message"].is_string());

    // Missing content type
    let request = Request::builder()
        .method("POST")
        .uri("/api/drug-disease-pairs")
        .body(Body::from(json!({"pagination": {"limit": 1, "offset": 0}}).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn open_read_does_not_block_other_queries() {
    let (_tmp, pool) = seeded_pool(&sample_pairs(), 2);
    let app = router(AppState::new(PairQueryService::new(pool.clone()), 500));

    // Hold a read transaction open on one pooled connection
    let held = pool.get().unwrap();
    let snapshot = held.unchecked_transaction().unwrap();
    let count: i64 = snapshot
        .query_row("SELECT COUNT(*) FROM drug_disease_pairs", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 8);

    let query = post_query(app.clone(), json!({"pagination": {"limit": 5, "offset": 0}}));
    let (status, body) = tokio::time::timeout(Duration::from_secs(5), query)
        .await
        .expect("query blocked behind an open read");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["num_of_results"], 8);

    // Two overlapping requests both complete while the read is still open
    let (first, second) = tokio::time::timeout(
        Duration::from_secs(5),
        async {
            tokio::join!(
                post_query(app.clone(), json!({"pagination": {"limit": 2, "offset": 0}})),
                post_query(app, json!({"filters": {"drug_name": "aspirin"}, "pagination": {"limit": 2, "offset": 0}})),
            )
        },
    )
    .await
    .expect("overlapping queries did not complete");
    assert_eq!(first.1["num_of_results"], 8);
    assert_eq!(second.1["num_of_results"], 4);

    snapshot.commit().unwrap();
}
