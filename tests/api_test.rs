//! Tests for the leaderboard REST surface.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use wealth_quest::{MemoryStore, ScoreStore, router, seed_demo_scores};

fn app() -> Router {
    router(Arc::new(MemoryStore::new()))
}

fn seeded_app() -> Router {
    let store: Arc<dyn ScoreStore> = Arc::new(MemoryStore::new());
    seed_demo_scores(store.as_ref()).expect("Seeding failed");
    router(store)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Body read failed")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Body was not JSON")
}

fn post_scores(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/scores")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Request build failed")
}

#[tokio::test]
async fn test_list_scores_returns_leaderboard() {
    let response = seeded_app()
        .oneshot(
            Request::builder()
                .uri("/scores")
                .body(Body::empty())
                .expect("Request build failed"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let scores = body_json(response).await;
    let scores = scores.as_array().expect("Expected an array");
    assert_eq!(scores.len(), 3);

    // Highest score first, camelCase field names on the wire.
    assert_eq!(scores[0]["playerName"], "MoneyMaster");
    assert_eq!(scores[0]["score"], 450);
    assert_eq!(scores[0]["passiveIncome"], 250);
    assert_eq!(scores[1]["playerName"], "TeenTycoon");
    assert_eq!(scores[2]["playerName"], "SaverKid");
}

#[tokio::test]
async fn test_list_scores_empty_store() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/scores")
                .body(Body::empty())
                .expect("Request build failed"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_create_score_returns_created_record() {
    let store: Arc<dyn ScoreStore> = Arc::new(MemoryStore::new());
    let app = router(store.clone());

    let response = app
        .oneshot(post_scores(
            r#"{"playerName":"Winner","score":310,"tier":"teens","passiveIncome":205,"streak":4,"bestStreak":6,"coins":55,"xp":120}"#,
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::CREATED);
    let record = body_json(response).await;
    assert_eq!(record["id"], 1);
    assert_eq!(record["playerName"], "Winner");
    assert_eq!(record["bestStreak"], 6);
    assert!(record["createdAt"].is_string());

    // The record landed in the shared store.
    let top = store.list_top(10).expect("List failed");
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].player_name(), "Winner");
}

#[tokio::test]
async fn test_create_score_defaults_optional_fields() {
    let response = app()
        .oneshot(post_scores(
            r#"{"playerName":"Minimal","score":90,"tier":"kids"}"#,
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::CREATED);
    let record = body_json(response).await;
    assert_eq!(record["passiveIncome"], 0);
    assert_eq!(record["coins"], 0);
}

#[tokio::test]
async fn test_create_score_rejects_blank_name() {
    let response = app()
        .oneshot(post_scores(r#"{"playerName":"   ","score":90,"tier":"kids"}"#))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "message": "Invalid input" })
    );
}

#[tokio::test]
async fn test_create_score_rejects_missing_fields() {
    let response = app()
        .oneshot(post_scores(r#"{"playerName":"NoScore"}"#))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "message": "Invalid input" })
    );
}

#[tokio::test]
async fn test_create_score_rejects_malformed_json() {
    let response = app()
        .oneshot(post_scores("{ not json"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_seed_skips_populated_store() {
    let store: Arc<dyn ScoreStore> = Arc::new(MemoryStore::new());
    seed_demo_scores(store.as_ref()).expect("First seeding failed");
    seed_demo_scores(store.as_ref()).expect("Second seeding failed");
    assert_eq!(store.list_top(10).expect("List failed").len(), 3);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/leaderboard")
                .body(Body::empty())
                .expect("Request build failed"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
