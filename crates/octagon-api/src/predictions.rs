//! Handler for `GET /predictions` — the recent slice of the audit log.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use octagon_core::{prediction::PredictionRecord, store::FightStore};
use octagon_engine::{PredictionEngine, Scorer};
use serde::Deserialize;

use crate::error::ApiError;

const DEFAULT_LIMIT: usize = 20;

#[derive(Debug, Deserialize)]
pub struct RecentParams {
  pub limit: Option<usize>,
}

/// `GET /predictions[?limit=<n>]` — most recent first.
pub async fn recent<S, C>(
  State(engine): State<Arc<PredictionEngine<S, C>>>,
  Query(params): Query<RecentParams>,
) -> Result<Json<Vec<PredictionRecord>>, ApiError>
where
  S: FightStore,
  C: Scorer,
{
  let records = engine
    .store()
    .recent_predictions(params.limit.unwrap_or(DEFAULT_LIMIT))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records))
}
