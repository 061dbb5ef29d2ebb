//! JSON REST API for the Octagon prediction service.
//!
//! Exposes an axum [`Router`] backed by any [`octagon_core::store::FightStore`]
//! through a [`PredictionEngine`]. TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", octagon_api::api_router(engine.clone()))
//! ```

pub mod error;
pub mod fighters;
pub mod meta;
pub mod predict;
pub mod predictions;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use octagon_core::store::FightStore;
use octagon_engine::{PredictionEngine, Scorer};
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` merged
/// with `OCTAGON_`-prefixed environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  pub store_path:          PathBuf,
  /// External scorer executable. When absent, every prediction takes the
  /// fallback path.
  pub scorer_command:      Option<PathBuf>,
  pub scorer_timeout_secs: Option<u64>,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `engine`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S, C>(engine: Arc<PredictionEngine<S, C>>) -> Router<()>
where
  S: FightStore + 'static,
  C: Scorer + 'static,
{
  Router::new()
    // Fighters
    .route("/fighters", get(fighters::list::<S, C>))
    .route("/fighters/search", get(fighters::search::<S, C>))
    .route("/fighters/{id}", get(fighters::get_one::<S, C>))
    .route("/fighters/{id}/fights", get(fighters::fights::<S, C>))
    // Predictions
    .route("/predict", post(predict::handler::<S, C>))
    .route("/predictions", get(predictions::recent::<S, C>))
    // Metadata
    .route("/weight-classes", get(meta::weight_classes))
    .route("/health", get(meta::health))
    .with_state(engine)
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
  };
  use chrono::NaiveDate;
  use octagon_core::{
    FighterId,
    fight::NewFight,
    fighter::{NewFighter, WeightClass},
    store::FightStore as _,
  };
  use octagon_engine::PredictionEngine;
  use octagon_store_sqlite::SqliteStore;
  use serde_json::Value;
  use tower::ServiceExt as _;

  use super::api_router;

  async fn make_app() -> (Router, Arc<SqliteStore>) {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let engine = Arc::new(PredictionEngine::new(store.clone()));
    (api_router(engine), store)
  }

  async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let resp = app
      .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let resp = app
      .oneshot(
        Request::builder()
          .method("POST")
          .uri(uri)
          .header(header::CONTENT_TYPE, "application/json")
          .body(Body::from(body.to_string()))
          .unwrap(),
      )
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  async fn seed_pair(store: &SqliteStore) -> (FighterId, FighterId) {
    let a = store
      .add_fighter(NewFighter::named("Api Alpha", WeightClass::Lightweight))
      .await
      .unwrap()
      .id;
    let b = store
      .add_fighter(NewFighter::named("Api Bravo", WeightClass::Lightweight))
      .await
      .unwrap()
      .id;
    store
      .add_fight(NewFight {
        fighter1_id: a,
        fighter2_id: b,
        winner_id: Some(a),
        fight_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        weight_class: WeightClass::Lightweight,
        scheduled_rounds: 3,
        method: Some("Decision".into()),
        fight_time: None,
        event_name: "Test Night".into(),
      })
      .await
      .unwrap();
    (a, b)
  }

  // ── Metadata ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn health_returns_ok() {
    let (app, _) = make_app().await;
    let (status, body) = get_json(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].is_string());
  }

  #[tokio::test]
  async fn weight_classes_lists_all_divisions() {
    let (app, _) = make_app().await;
    let (status, body) = get_json(app, "/weight-classes").await;
    assert_eq!(status, StatusCode::OK);
    let classes = body.as_array().unwrap();
    assert_eq!(classes.len(), 13);
    assert!(classes.contains(&Value::from("Light Heavyweight")));
    assert!(classes.contains(&Value::from("Women's Strawweight")));
  }

  // ── Fighters ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn fighters_list_includes_stats() {
    let (app, store) = make_app().await;
    let (a, _) = seed_pair(&store).await;

    let (status, body) = get_json(app, "/fighters").await;
    assert_eq!(status, StatusCode::OK);
    let profiles = body.as_array().unwrap();
    assert_eq!(profiles.len(), 2);

    let alpha = profiles
      .iter()
      .find(|p| p["fighter"]["id"] == Value::from(a))
      .unwrap();
    assert_eq!(alpha["stats"]["total_fights"], 1);
    assert_eq!(alpha["stats"]["win_rate"], 1.0);
  }

  #[tokio::test]
  async fn get_fighter_missing_returns_404() {
    let (app, _) = make_app().await;
    let (status, body) = get_json(app, "/fighters/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn search_under_two_chars_returns_empty() {
    let (app, store) = make_app().await;
    seed_pair(&store).await;

    let (status, body) = get_json(app, "/fighters/search?q=A").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
  }

  #[tokio::test]
  async fn search_matches_seeded_fighter() {
    let (app, store) = make_app().await;
    seed_pair(&store).await;

    let (status, body) = get_json(app, "/fighters/search?q=Alpha").await;
    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "Api Alpha");
  }

  #[tokio::test]
  async fn fight_history_resolves_opponent() {
    let (app, store) = make_app().await;
    let (a, _) = seed_pair(&store).await;

    let (status, body) = get_json(app, &format!("/fighters/{a}/fights")).await;
    assert_eq!(status, StatusCode::OK);
    let history = body.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["opponent_name"], "Api Bravo");
    assert_eq!(history[0]["winner_name"], "Api Alpha");
  }

  #[tokio::test]
  async fn fight_history_unknown_fighter_returns_404() {
    let (app, _) = make_app().await;
    let (status, _) = get_json(app, "/fighters/777/fights").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Predict ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn predict_requires_both_fighters() {
    let (app, store) = make_app().await;
    let (a, _) = seed_pair(&store).await;

    let (status, body) =
      post_json(app, "/predict", serde_json::json!({ "fighter1_id": a })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Both fighters are required");
  }

  #[tokio::test]
  async fn predict_unknown_fighter_returns_400() {
    let (app, store) = make_app().await;
    let (a, _) = seed_pair(&store).await;

    let (status, _) = post_json(
      app,
      "/predict",
      serde_json::json!({ "fighter1_id": a, "fighter2_id": 9999 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn predict_invalid_rounds_returns_400() {
    let (app, store) = make_app().await;
    let (a, b) = seed_pair(&store).await;

    let (status, _) = post_json(
      app,
      "/predict",
      serde_json::json!({ "fighter1_id": a, "fighter2_id": b, "rounds": 7 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn predict_end_to_end_and_log_readback() {
    let (app, store) = make_app().await;
    let (a, b) = seed_pair(&store).await;

    // No scorer configured: the deterministic fallback answers.
    let (status, body) = post_json(
      app.clone(),
      "/predict",
      serde_json::json!({
        "fighter1_id": a,
        "fighter2_id": b,
        "weight_class": "Lightweight",
      }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["predicted_winner"]["fighter"]["id"], Value::from(a));
    assert_eq!(body["prediction_method"], "Fallback win rate comparison");
    // |1.0 - 0.0| * 100 + 50, capped at 95.
    assert_eq!(body["confidence"], 95.0);

    let (status, body) = get_json(app, "/predictions").await;
    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["predicted_winner_name"], "Api Alpha");
    assert_eq!(records[0]["prediction"]["confidence"], 95.0);
  }

  #[tokio::test]
  async fn predictions_limit_is_honoured() {
    let (app, store) = make_app().await;
    let (a, b) = seed_pair(&store).await;

    for _ in 0..3 {
      let (status, _) = post_json(
        app.clone(),
        "/predict",
        serde_json::json!({ "fighter1_id": a, "fighter2_id": b }),
      )
      .await;
      assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = get_json(app, "/predictions?limit=2").await;
    assert_eq!(body.as_array().unwrap().len(), 2);
  }
}
