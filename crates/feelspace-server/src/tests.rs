//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use feelspace_core::db::Database;
use feelspace_core::models::{NewEmotionLog, NewGameSession};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn setup_test_app() -> (Router, Database) {
    let db = Database::in_memory().unwrap();
    let app = create_router(db.clone(), &ServerConfig::default());
    (app, db)
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn seed_game(db: &Database, wallet: &str, reward: f64) -> i64 {
    db.record_game_session(&NewGameSession {
        wallet_address: wallet.to_string(),
        game: "Bubble Pop".to_string(),
        score: 300,
        duration_secs: 45,
        reward_amount: reward,
        ..Default::default()
    })
    .unwrap()
    .id
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let (app, _db) = setup_test_app();

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

// ========== Emotion API Tests ==========

#[tokio::test]
async fn test_create_emotion() {
    let (app, db) = setup_test_app();

    let body = serde_json::json!({
        "walletAddress": "0xabc",
        "emotion": "  Grateful ",
        "intensity": 8,
        "notes": "tea with an old friend"
    });

    let response = app
        .oneshot(post_json("/api/emotions", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = get_body_json(response).await;
    assert_eq!(json["walletAddress"], "0xabc");
    assert_eq!(json["emotion"], "grateful");
    assert_eq!(json["intensity"], 8);
    assert!(json["timestamp"].is_string());

    // Audited under the wallet
    let audit = db.list_audit_log(10).unwrap();
    assert_eq!(audit[0].actor, "0xabc");
    assert_eq!(audit[0].action, "create");
    assert_eq!(audit[0].entity_type.as_deref(), Some("emotion_log"));
}

#[tokio::test]
async fn test_create_emotion_rejects_bad_intensity() {
    let (app, _db) = setup_test_app();

    let body = serde_json::json!({
        "walletAddress": "0xabc",
        "emotion": "sad",
        "intensity": 11
    });

    let response = app
        .oneshot(post_json("/api/emotions", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("intensity"));
}

#[tokio::test]
async fn test_create_emotion_invalid_json() {
    let (app, _db) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/emotions")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON"));
}

#[tokio::test]
async fn test_create_emotion_missing_field() {
    let (app, db) = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/emotions",
            serde_json::json!({ "walletAddress": "0xabc", "intensity": 5 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON"));
    assert!(db.list_emotion_logs("0xabc", 10).unwrap().is_empty());
}

#[tokio::test]
async fn test_create_emotion_body_too_large() {
    let (app, db) = setup_test_app();

    let body = serde_json::json!({
        "walletAddress": "0xabc",
        "emotion": "calm",
        "intensity": 5,
        "notes": "x".repeat(MAX_BODY_SIZE),
    });
    let response = app
        .oneshot(post_json("/api/emotions", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(db.list_emotion_logs("0xabc", 10).unwrap().is_empty());
}

#[tokio::test]
async fn test_list_emotions() {
    let (app, db) = setup_test_app();
    let now = Utc::now();
    for (hours_ago, emotion) in [(3, "calm"), (2, "sad"), (1, "happy")] {
        db.record_emotion(
            &NewEmotionLog::new("0xabc", emotion, 5).at(now - Duration::hours(hours_ago)),
        )
        .unwrap();
    }
    db.record_emotion(&NewEmotionLog::new("0xother", "angry", 5))
        .unwrap();

    let response = app
        .oneshot(get("/api/emotions?wallet=0xabc&limit=2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let logs = json.as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["emotion"], "happy");
    assert_eq!(logs[1]["emotion"], "sad");
}

#[tokio::test]
async fn test_list_emotions_requires_wallet() {
    let (app, _db) = setup_test_app();

    let response = app.oneshot(get("/api/emotions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_emotion() {
    let (app, db) = setup_test_app();
    let log = db
        .record_emotion(&NewEmotionLog::new("0xabc", "tired", 4))
        .unwrap();

    let request = || {
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/emotions/{}", log.id))
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_json(response).await["success"], true);
    assert!(db.get_emotion_log(log.id).unwrap().is_none());

    let response = app.oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ========== Analytics API Tests ==========

#[tokio::test]
async fn test_analytics_empty_wallet() {
    let (app, _db) = setup_test_app();

    let response = app
        .oneshot(get("/api/analytics/0xnobody"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["totalLogs"], 0);
    assert_eq!(json["emotionDistribution"].as_array().unwrap().len(), 0);
    assert_eq!(json["statistics"]["mostCommonEmotion"], "none");

    let insights = json["insights"].as_array().unwrap();
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0]["priority"], 1);
    assert_eq!(insights[0]["type"], "recommendation");
}

#[tokio::test]
async fn test_analytics_report_shape() {
    let (app, db) = setup_test_app();
    let now = Utc::now();
    for day in 0..10 {
        db.record_emotion(
            &NewEmotionLog::new("0xabc", "happy", 8).at(now - Duration::days(day)),
        )
        .unwrap();
    }

    let response = app
        .oneshot(get("/api/analytics/0xabc?days=30"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["totalLogs"], 10);
    assert!(json["dateRange"]["start"].is_string());
    assert_eq!(json["emotionDistribution"][0]["emotion"], "happy");
    assert_eq!(json["emotionDistribution"][0]["percentage"], 100.0);
    assert_eq!(json["statistics"]["positivePercentage"], 100.0);
    assert_eq!(json["statistics"]["currentStreak"], 10);

    let titles: Vec<_> = json["insights"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap().to_string())
        .collect();
    assert!(titles.contains(&"Dominant Emotion".to_string()));
    assert!(!titles.contains(&"Try a Mini-Game".to_string()));
}

#[tokio::test]
async fn test_analytics_days_window() {
    let (app, db) = setup_test_app();
    let now = Utc::now();
    db.record_emotion(&NewEmotionLog::new("0xabc", "sad", 3).at(now - Duration::days(20)))
        .unwrap();
    db.record_emotion(&NewEmotionLog::new("0xabc", "calm", 6).at(now - Duration::hours(1)))
        .unwrap();

    let response = app
        .clone()
        .oneshot(get("/api/analytics/0xabc?days=7"))
        .await
        .unwrap();
    assert_eq!(get_body_json(response).await["totalLogs"], 1);

    // Invalid values fall back to the 30-day window
    let response = app
        .oneshot(get("/api/analytics/0xabc?days=lots"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_json(response).await["totalLogs"], 2);
}

#[tokio::test]
async fn test_analytics_huge_days_is_capped() {
    let (app, db) = setup_test_app();
    db.record_emotion(&NewEmotionLog::new("0xabc", "calm", 6))
        .unwrap();

    for days in ["100000000", "9223372036854775807"] {
        let response = app
            .clone()
            .oneshot(get(&format!("/api/analytics/0xabc?days={}", days)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(get_body_json(response).await["totalLogs"], 1);
    }

    let audit = db.list_audit_log(1).unwrap();
    assert!(audit[0]
        .details
        .as_deref()
        .unwrap()
        .starts_with(&format!("days={},", feelspace_core::analytics::MAX_WINDOW_DAYS)));
}

// ========== Game API Tests ==========

#[tokio::test]
async fn test_create_and_list_games() {
    let (app, _db) = setup_test_app();

    let body = serde_json::json!({
        "walletAddress": "0xabc",
        "game": "Mind Match",
        "score": 42,
        "durationSecs": 120,
        "rewardAmount": 2.5
    });
    let response = app
        .clone()
        .oneshot(post_json("/api/games", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = get_body_json(response).await;
    assert_eq!(json["game"], "Mind Match");
    assert_eq!(json["rewardAmount"], 2.5);
    assert!(json["txHash"].is_null());

    let response = app
        .oneshot(get("/api/games?wallet=0xabc"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_game_rejects_negative_reward() {
    let (app, _db) = setup_test_app();

    let body = serde_json::json!({
        "walletAddress": "0xabc",
        "game": "Bubble Pop",
        "rewardAmount": -1.0
    });
    let response = app.oneshot(post_json("/api/games", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_confirm_reward() {
    let (app, db) = setup_test_app();
    let id = seed_game(&db, "0xabc", 1.0);
    let uri = format!("/api/games/{}/reward", id);

    let response = app
        .clone()
        .oneshot(post_json(&uri, serde_json::json!({ "txHash": "0xfeed" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_json(response).await["txHash"], "0xfeed");

    // Same hash again is accepted
    let response = app
        .clone()
        .oneshot(post_json(&uri, serde_json::json!({ "txHash": "0xfeed" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // A different hash is a client error
    let response = app
        .clone()
        .oneshot(post_json(&uri, serde_json::json!({ "txHash": "0xbeef" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(post_json(
            "/api/games/9999/reward",
            serde_json::json!({ "txHash": "0xfeed" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "game session 9999 not found");
}

// ========== Wallet Summary ==========

#[tokio::test]
async fn test_wallet_summary() {
    let (app, db) = setup_test_app();
    db.record_emotion(&NewEmotionLog::new("0xabc", "calm", 5))
        .unwrap();
    let id = seed_game(&db, "0xabc", 1.5);
    seed_game(&db, "0xabc", 0.5);
    db.confirm_reward(id, "0xfeed").unwrap();

    let response = app
        .oneshot(get("/api/wallets/0xabc/summary"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["walletAddress"], "0xabc");
    assert_eq!(json["totalLogs"], 1);
    assert_eq!(json["totalGames"], 2);
    assert_eq!(json["totalRewards"], 2.0);
    assert_eq!(json["confirmedRewards"], 1.5);
}

// ========== Audit ==========

#[tokio::test]
async fn test_list_audit_log() {
    let (app, _db) = setup_test_app();

    app.clone()
        .oneshot(get("/api/analytics/0xabc"))
        .await
        .unwrap();

    let response = app.oneshot(get("/api/audit?limit=5")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["actor"], "0xabc");
    assert_eq!(entries[0]["action"], "report");
}

// ========== Helpers and Error Mapping ==========

#[test]
fn test_parse_origins() {
    assert_eq!(
        parse_origins(" https://feel.space , ,http://localhost:5173"),
        vec!["https://feel.space", "http://localhost:5173"]
    );
    assert!(parse_origins("").is_empty());
}

#[test]
fn test_clamp_limit() {
    assert_eq!(clamp_limit(None), DEFAULT_PAGE_LIMIT);
    assert_eq!(clamp_limit(Some(0)), 1);
    assert_eq!(clamp_limit(Some(50_000)), MAX_PAGE_LIMIT);
}

#[test]
fn test_audit_actor() {
    assert_eq!(audit_actor(Some(" 0xabc ")), "0xabc");
    assert_eq!(audit_actor(Some("")), ANONYMOUS_ACTOR);
    assert_eq!(audit_actor(None), ANONYMOUS_ACTOR);
}

#[test]
fn test_core_errors_map_to_status() {
    let err: AppError = feelspace_core::Error::InvalidData("bad".into()).into();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err: AppError = feelspace_core::Error::NotFound("thing".into()).into();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);

    let err: AppError = feelspace_core::Error::Encryption("key".into()).into();
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
