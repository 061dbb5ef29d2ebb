//! Handler for `POST /predict`.

use std::sync::Arc;

use axum::{Json, extract::State};
use octagon_core::{FighterId, fighter::WeightClass, store::FightStore};
use octagon_engine::{PredictionEngine, PredictionReport, Scorer};
use serde::Deserialize;

use crate::error::ApiError;

const DEFAULT_ROUNDS: u8 = 3;

#[derive(Debug, Deserialize)]
pub struct PredictBody {
  pub fighter1_id:  Option<FighterId>,
  pub fighter2_id:  Option<FighterId>,
  pub weight_class: Option<WeightClass>,
  pub rounds:       Option<u8>,
}

/// `POST /predict` — body:
/// `{"fighter1_id": 1, "fighter2_id": 2, "weight_class": "Lightweight", "rounds": 5}`
///
/// `weight_class` and `rounds` are optional; rounds defaults to 3.
pub async fn handler<S, C>(
  State(engine): State<Arc<PredictionEngine<S, C>>>,
  Json(body): Json<PredictBody>,
) -> Result<Json<PredictionReport>, ApiError>
where
  S: FightStore,
  C: Scorer,
{
  let (Some(fighter1_id), Some(fighter2_id)) =
    (body.fighter1_id, body.fighter2_id)
  else {
    return Err(ApiError::BadRequest("Both fighters are required".into()));
  };

  let report = engine
    .predict(
      fighter1_id,
      fighter2_id,
      body.weight_class,
      body.rounds.unwrap_or(DEFAULT_ROUNDS),
    )
    .await?;

  Ok(Json(report))
}
