//! [`PredictionEngine`] — orchestrates scoring, fallback, and the
//! prediction-log side effect.

use std::sync::Arc;

use octagon_core::{
  FighterId,
  fighter::WeightClass,
  prediction::NewPrediction,
  stats::{FighterProfile, FighterStats},
  store::FightStore,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::{
  Error, Result,
  scorer::{ProcessScorer, ScoreRequest, Scorer, ScorerOutcome},
};

/// Provenance label attached to fallback predictions.
pub const FALLBACK_METHOD: &str = "Fallback win rate comparison";

/// Fixed factor list for fallback predictions. The fallback only compares
/// win rates, so it claims no method or round granularity.
const FALLBACK_FACTORS: [&str; 2] =
  ["Win rate comparison", "Historical performance"];

// ─── Report ──────────────────────────────────────────────────────────────────

/// The full prediction response: both fighters' snapshots, the forecast,
/// and its provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionReport {
  pub fighter1:          FighterProfile,
  pub fighter2:          FighterProfile,
  pub predicted_winner:  FighterProfile,
  /// Percentage in `[0, 100]`; fallback predictions stay within `[50, 95]`.
  pub confidence:        f64,
  pub factors:           Vec<String>,
  pub prediction_method: String,
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// The prediction engine over a [`FightStore`] and an optional scorer.
///
/// Without a scorer every prediction takes the deterministic fallback path;
/// with one, the fallback still catches every scorer failure, so `predict`
/// only errors on invalid input or storage failure.
pub struct PredictionEngine<S, C = ProcessScorer> {
  store:  Arc<S>,
  scorer: Option<C>,
}

impl<S: FightStore> PredictionEngine<S> {
  /// An engine with no external scorer: fallback-only.
  pub fn new(store: Arc<S>) -> Self {
    Self { store, scorer: None }
  }
}

impl<S: FightStore, C: Scorer> PredictionEngine<S, C> {
  pub fn with_scorer(store: Arc<S>, scorer: C) -> Self {
    Self { store, scorer: Some(scorer) }
  }

  pub fn store(&self) -> &Arc<S> {
    &self.store
  }

  /// Produce a prediction for the matchup and append it to the prediction
  /// log.
  ///
  /// The log append is best-effort relative to the user-facing result: a
  /// persistence failure is reported to the operational log but does not
  /// fail the prediction.
  pub async fn predict(
    &self,
    fighter1_id: FighterId,
    fighter2_id: FighterId,
    weight_class: Option<WeightClass>,
    rounds: u8,
  ) -> Result<PredictionReport> {
    if fighter1_id == fighter2_id {
      return Err(octagon_core::Error::SameFighter.into());
    }
    if !(1..=5).contains(&rounds) {
      return Err(octagon_core::Error::InvalidRounds(rounds).into());
    }

    let fighter1 = self.profile(fighter1_id).await?;
    let fighter2 = self.profile(fighter2_id).await?;

    let request =
      ScoreRequest { fighter1_id, fighter2_id, weight_class, rounds };
    let outcome = match &self.scorer {
      Some(scorer) => match scorer.score(&request).await {
        Ok(outcome) => validated(outcome, &request),
        Err(e) => {
          warn!(error = %e, "scorer failed, using fallback");
          None
        }
      },
      None => None,
    };

    let (winner_id, confidence, factors, method) = match outcome {
      Some(o) => (o.winner, o.confidence, o.factors, o.method),
      None => {
        let (winner_id, confidence) = fallback_outcome(
          fighter1_id,
          fighter1.stats.win_rate,
          fighter2_id,
          fighter2.stats.win_rate,
        );
        let factors =
          FALLBACK_FACTORS.iter().map(|f| (*f).to_owned()).collect();
        (winner_id, confidence, factors, FALLBACK_METHOD.to_owned())
      }
    };

    let predicted_winner = if winner_id == fighter1_id {
      fighter1.clone()
    } else {
      fighter2.clone()
    };

    // Exactly one append per produced prediction, before the response.
    // "Failed to persist" is distinct from "failed to predict": the former
    // is logged and swallowed.
    if let Err(e) = self
      .store
      .append_prediction(NewPrediction {
        fighter1_id,
        fighter2_id,
        predicted_winner_id: winner_id,
        confidence,
        factors: factors.clone(),
        method: method.clone(),
      })
      .await
    {
      error!(error = %e, "failed to persist prediction, returning result anyway");
    }

    Ok(PredictionReport {
      fighter1,
      fighter2,
      predicted_winner,
      confidence,
      factors,
      prediction_method: method,
    })
  }

  /// Load a fighter and aggregate their fight history. Unknown ids are a
  /// client error, distinct from a known fighter with zero fights.
  async fn profile(&self, fighter_id: FighterId) -> Result<FighterProfile> {
    let fighter = self
      .store
      .get_fighter(fighter_id)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?
      .ok_or(octagon_core::Error::FighterNotFound(fighter_id))?;

    let fights = self
      .store
      .fights_for(fighter_id)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    let stats = FighterStats::from_fights(fighter_id, &fights);
    Ok(FighterProfile { fighter, stats })
  }
}

/// Enforce the outcome guarantees on a scorer result. An outcome naming a
/// winner outside the pair or a confidence outside [0, 100] is treated
/// exactly like any other scorer failure.
fn validated(
  outcome: ScorerOutcome,
  request: &ScoreRequest,
) -> Option<ScorerOutcome> {
  let winner_in_pair = outcome.winner == request.fighter1_id
    || outcome.winner == request.fighter2_id;
  let confidence_in_range = (0.0..=100.0).contains(&outcome.confidence);

  if winner_in_pair && confidence_in_range {
    Some(outcome)
  } else {
    warn!(
      winner = outcome.winner,
      confidence = outcome.confidence,
      "scorer returned an out-of-contract outcome, using fallback"
    );
    None
  }
}

// ─── Fallback heuristic ──────────────────────────────────────────────────────

/// The deterministic win-rate comparison.
///
/// The fighter with the strictly greater win rate is predicted; a tie goes
/// to the first fighter. That tie-break is a deliberate policy, not an
/// oversight: with no signal either way the request order decides.
///
/// Confidence is `min(|wr1 - wr2| * 100 + 50, 95)`. The +50 baseline and
/// the 95 cap are long-standing constants kept for comparability with
/// previously logged predictions; they are not a calibrated confidence
/// model. Since the gap is an absolute value the result always lands in
/// `[50, 95]`.
fn fallback_outcome(
  fighter1_id: FighterId,
  win_rate1: f64,
  fighter2_id: FighterId,
  win_rate2: f64,
) -> (FighterId, f64) {
  let winner = if win_rate2 > win_rate1 { fighter2_id } else { fighter1_id };
  let confidence = ((win_rate1 - win_rate2).abs() * 100.0 + 50.0).min(95.0);
  (winner, confidence)
}

#[cfg(test)]
mod unit_tests {
  use super::fallback_outcome;

  #[test]
  fn strictly_greater_win_rate_wins() {
    assert_eq!(fallback_outcome(1, 0.4, 2, 0.9).0, 2);
    assert_eq!(fallback_outcome(1, 0.9, 2, 0.4).0, 1);
  }

  #[test]
  fn tie_goes_to_first_fighter() {
    assert_eq!(fallback_outcome(7, 0.5, 3, 0.5).0, 7);
    assert_eq!(fallback_outcome(7, 0.0, 3, 0.0).0, 7);
  }

  #[test]
  fn confidence_is_base_plus_gap_capped() {
    // No gap: the bare baseline.
    assert_eq!(fallback_outcome(1, 0.5, 2, 0.5).1, 50.0);
    // 0.2 gap: 70.
    assert!((fallback_outcome(1, 0.7, 2, 0.5).1 - 70.0).abs() < 1e-9);
    // Maximal gap would be 150; capped at 95.
    assert_eq!(fallback_outcome(1, 1.0, 2, 0.0).1, 95.0);
  }

  #[test]
  fn confidence_symmetric_in_argument_order() {
    let (_, c1) = fallback_outcome(1, 0.8, 2, 0.3);
    let (_, c2) = fallback_outcome(2, 0.3, 1, 0.8);
    assert_eq!(c1, c2);
  }
}
