//! Prediction — a system-generated forecast of a fight outcome.
//!
//! Predictions form an append-only audit log: created once per request,
//! immutable thereafter, never deleted. Accuracy is assessed externally by
//! comparing against a later-recorded fight result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{FighterId, PredictionId};

/// A persisted prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
  pub id:                  PredictionId,
  pub fighter1_id:         FighterId,
  pub fighter2_id:         FighterId,
  pub predicted_winner_id: FighterId,
  /// Percentage in `[0, 100]`.
  pub confidence:          f64,
  /// Free-text signals that contributed to the forecast.
  pub factors:             Vec<String>,
  /// Provenance label, e.g. "Statistical Analysis Model" or
  /// "Fallback win rate comparison".
  pub method:              String,
  pub created_at:          DateTime<Utc>,
}

/// Input type for appending a prediction. `id` (the monotonic append
/// sequence) and `created_at` are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPrediction {
  pub fighter1_id:         FighterId,
  pub fighter2_id:         FighterId,
  pub predicted_winner_id: FighterId,
  pub confidence:          f64,
  pub factors:             Vec<String>,
  pub method:              String,
}

/// A prediction joined with fighter names — the read model for the recent
/// predictions listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
  pub prediction:            Prediction,
  pub fighter1_name:         String,
  pub fighter2_name:         String,
  pub predicted_winner_name: String,
}
