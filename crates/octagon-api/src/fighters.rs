//! Handlers for `/fighters` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/fighters` | Roster with computed stats, name order |
//! | `GET`  | `/fighters/search?q=` | ≤10 matches; <2 query chars → `[]` |
//! | `GET`  | `/fighters/:id` | 404 if not found |
//! | `GET`  | `/fighters/:id/fights` | Joined history, most recent first |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use octagon_core::{
  FighterId,
  fight::FightSummary,
  fighter::Fighter,
  stats::{FighterProfile, FighterStats},
  store::FightStore,
};
use octagon_engine::{PredictionEngine, Scorer};
use serde::Deserialize;

use crate::error::ApiError;

/// Queries shorter than this return no results instead of scanning.
const MIN_QUERY_LEN: usize = 2;
const SEARCH_LIMIT: usize = 10;

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /fighters`
pub async fn list<S, C>(
  State(engine): State<Arc<PredictionEngine<S, C>>>,
) -> Result<Json<Vec<FighterProfile>>, ApiError>
where
  S: FightStore,
  C: Scorer,
{
  let profiles = engine
    .store()
    .list_fighters()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(profiles))
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  pub q: Option<String>,
}

/// `GET /fighters/search?q=<text>`
pub async fn search<S, C>(
  State(engine): State<Arc<PredictionEngine<S, C>>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Fighter>>, ApiError>
where
  S: FightStore,
  C: Scorer,
{
  let query = params.q.unwrap_or_default();
  if query.chars().count() < MIN_QUERY_LEN {
    return Ok(Json(vec![]));
  }

  let fighters = engine
    .store()
    .search_fighters(&query, SEARCH_LIMIT)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(fighters))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /fighters/:id`
pub async fn get_one<S, C>(
  State(engine): State<Arc<PredictionEngine<S, C>>>,
  Path(id): Path<FighterId>,
) -> Result<Json<FighterProfile>, ApiError>
where
  S: FightStore,
  C: Scorer,
{
  let fighter = engine
    .store()
    .get_fighter(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("fighter {id} not found")))?;

  let fights = engine
    .store()
    .fights_for(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let stats = FighterStats::from_fights(id, &fights);

  Ok(Json(FighterProfile { fighter, stats }))
}

// ─── Fight history ───────────────────────────────────────────────────────────

/// `GET /fighters/:id/fights`
pub async fn fights<S, C>(
  State(engine): State<Arc<PredictionEngine<S, C>>>,
  Path(id): Path<FighterId>,
) -> Result<Json<Vec<FightSummary>>, ApiError>
where
  S: FightStore,
  C: Scorer,
{
  if engine
    .store()
    .get_fighter(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .is_none()
  {
    return Err(ApiError::NotFound(format!("fighter {id} not found")));
  }

  let history = engine
    .store()
    .fight_history(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(history))
}
