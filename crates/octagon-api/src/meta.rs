//! Service metadata endpoints: health check and the weight-class list.

use axum::Json;
use chrono::Utc;
use octagon_core::fighter::WeightClass;
use serde_json::{Value, json};

/// `GET /health`
pub async fn health() -> Json<Value> {
  Json(json!({ "status": "OK", "timestamp": Utc::now().to_rfc3339() }))
}

/// `GET /weight-classes`
pub async fn weight_classes() -> Json<Vec<&'static str>> {
  Json(WeightClass::ALL.iter().map(WeightClass::as_str).collect())
}
