//! Engine tests against an in-memory SQLite store, with mock scorers
//! standing in for the external process.

use std::{path::PathBuf, sync::Arc, time::Duration};

use chrono::NaiveDate;
use octagon_core::{
  FighterId,
  fight::NewFight,
  fighter::{NewFighter, WeightClass},
  store::FightStore,
};
use octagon_store_sqlite::SqliteStore;

use crate::{
  FALLBACK_METHOD, PredictionEngine, ProcessScorer, ScoreRequest, Scorer,
  ScorerError, ScorerOutcome,
};

// ─── Mock scorers ────────────────────────────────────────────────────────────

/// Always returns the wrapped outcome.
struct FixedScorer(ScorerOutcome);

impl Scorer for FixedScorer {
  async fn score(
    &self,
    _request: &ScoreRequest,
  ) -> Result<ScorerOutcome, ScorerError> {
    Ok(self.0.clone())
  }
}

/// Always fails, as a scorer that printed nothing would.
struct FailingScorer;

impl Scorer for FailingScorer {
  async fn score(
    &self,
    _request: &ScoreRequest,
  ) -> Result<ScorerOutcome, ScorerError> {
    Err(ScorerError::EmptyOutput)
  }
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

async fn store() -> Arc<SqliteStore> {
  Arc::new(SqliteStore::open_in_memory().await.expect("in-memory store"))
}

async fn add_fighter(store: &SqliteStore, name: &str) -> FighterId {
  store
    .add_fighter(NewFighter::named(name, WeightClass::Lightweight))
    .await
    .unwrap()
    .id
}

async fn add_fight(
  store: &SqliteStore,
  fighter1_id: FighterId,
  fighter2_id: FighterId,
  winner_id: Option<FighterId>,
) {
  store
    .add_fight(NewFight {
      fighter1_id,
      fighter2_id,
      winner_id,
      fight_date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
      weight_class: WeightClass::Lightweight,
      scheduled_rounds: 3,
      method: Some("Decision".into()),
      fight_time: None,
      event_name: "Test Card".into(),
    })
    .await
    .unwrap();
}

/// Write an executable shell script that sleeps far past any scorer
/// timeout used in these tests.
fn sleeping_scorer_script() -> PathBuf {
  use std::os::unix::fs::PermissionsExt as _;

  let path = std::env::temp_dir()
    .join(format!("octagon-slow-scorer-{}", std::process::id()));
  std::fs::write(&path, "#!/bin/sh\nsleep 30\n").unwrap();
  std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
    .unwrap();
  path
}

/// Fighter A: 10 fights, 10 wins. Fighter B: 10 fights, 5 wins. Both
/// against a shared journeyman so their own records stay clean.
async fn seeded_matchup(store: &SqliteStore) -> (FighterId, FighterId) {
  let a = add_fighter(store, "Fighter A").await;
  let b = add_fighter(store, "Fighter B").await;
  let journeyman = add_fighter(store, "Journeyman").await;

  for _ in 0..10 {
    add_fight(store, a, journeyman, Some(a)).await;
  }
  for i in 0..10 {
    let winner = if i < 5 { b } else { journeyman };
    add_fight(store, b, journeyman, Some(winner)).await;
  }

  (a, b)
}

// ─── Preconditions ───────────────────────────────────────────────────────────

#[tokio::test]
async fn same_fighter_is_rejected() {
  let s = store().await;
  let a = add_fighter(&s, "Solo").await;
  let engine = PredictionEngine::new(s);

  let err = engine.predict(a, a, None, 3).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Invalid(octagon_core::Error::SameFighter)
  ));
}

#[tokio::test]
async fn unknown_fighter_is_rejected() {
  let s = store().await;
  let a = add_fighter(&s, "Known").await;
  let engine = PredictionEngine::new(s);

  let err = engine.predict(a, 9999, None, 3).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Invalid(octagon_core::Error::FighterNotFound(9999))
  ));
}

#[tokio::test]
async fn invalid_round_count_is_rejected() {
  let s = store().await;
  let a = add_fighter(&s, "Rounds A").await;
  let b = add_fighter(&s, "Rounds B").await;
  let engine = PredictionEngine::new(s);

  for rounds in [0u8, 6, 12] {
    let err = engine.predict(a, b, None, rounds).await.unwrap_err();
    assert!(matches!(
      err,
      crate::Error::Invalid(octagon_core::Error::InvalidRounds(r)) if r == rounds
    ));
  }
}

// ─── Fallback path ───────────────────────────────────────────────────────────

#[tokio::test]
async fn fallback_picks_higher_win_rate_at_capped_confidence() {
  let s = store().await;
  let (a, b) = seeded_matchup(&s).await;
  let engine = PredictionEngine::new(s);

  // |1.0 - 0.5| * 100 + 50 = 100, capped at 95.
  let report = engine.predict(a, b, None, 3).await.unwrap();
  assert_eq!(report.predicted_winner.fighter.id, a);
  assert_eq!(report.confidence, 95.0);
  assert_eq!(report.prediction_method, FALLBACK_METHOD);
  assert_eq!(
    report.factors,
    vec!["Win rate comparison", "Historical performance"]
  );
}

#[tokio::test]
async fn fallback_tie_goes_to_first_fighter() {
  let s = store().await;
  let c = add_fighter(&s, "Debutant C").await;
  let d = add_fighter(&s, "Debutant D").await;
  let engine = PredictionEngine::new(s);

  // Both 0/0: win rates tie at zero, first fighter wins at base confidence.
  let report = engine.predict(c, d, None, 3).await.unwrap();
  assert_eq!(report.predicted_winner.fighter.id, c);
  assert_eq!(report.confidence, 50.0);
  assert_eq!(report.fighter1.stats.total_fights, 0);
  assert_eq!(report.fighter1.stats.win_rate, 0.0);
}

#[tokio::test]
async fn fallback_confidence_within_bounds_and_symmetric() {
  let s = store().await;
  let (a, b) = seeded_matchup(&s).await;
  let engine = PredictionEngine::new(s);

  let forward = engine.predict(a, b, None, 3).await.unwrap();
  let reverse = engine.predict(b, a, None, 3).await.unwrap();

  assert_eq!(
    forward.predicted_winner.fighter.id,
    reverse.predicted_winner.fighter.id
  );
  assert_eq!(forward.confidence, reverse.confidence);
  assert!((50.0..=95.0).contains(&forward.confidence));

  // The stats swap slots with the argument order.
  assert_eq!(forward.fighter1.fighter.id, reverse.fighter2.fighter.id);
  assert_eq!(forward.fighter1.stats, reverse.fighter2.stats);
}

#[tokio::test]
async fn scorer_failure_is_invisible_to_the_caller() {
  let s = store().await;
  let (a, b) = seeded_matchup(&s).await;
  let engine = PredictionEngine::with_scorer(s, FailingScorer);

  let report = engine.predict(a, b, None, 3).await.unwrap();
  assert_eq!(report.predicted_winner.fighter.id, a);
  assert_eq!(report.prediction_method, FALLBACK_METHOD);
}

#[tokio::test]
async fn missing_scorer_executable_falls_back() {
  let s = store().await;
  let (a, b) = seeded_matchup(&s).await;
  let engine = PredictionEngine::with_scorer(
    s,
    ProcessScorer::new("/nonexistent/scorer"),
  );

  let report = engine.predict(a, b, None, 3).await.unwrap();
  assert_eq!(report.prediction_method, FALLBACK_METHOD);
}

#[tokio::test]
async fn slow_scorer_times_out_and_falls_back() {
  let script = sleeping_scorer_script();
  let scorer =
    ProcessScorer::new(&script).with_timeout(Duration::from_millis(50));

  let request = ScoreRequest {
    fighter1_id:  1,
    fighter2_id:  2,
    weight_class: None,
    rounds:       3,
  };
  let err = scorer.score(&request).await.unwrap_err();
  assert!(matches!(err, ScorerError::Timeout(_)));

  let s = store().await;
  let (a, b) = seeded_matchup(&s).await;
  let engine = PredictionEngine::with_scorer(s, scorer);

  let report = engine.predict(a, b, None, 3).await.unwrap();
  assert_eq!(report.predicted_winner.fighter.id, a);
  assert_eq!(report.prediction_method, FALLBACK_METHOD);

  std::fs::remove_file(script).ok();
}

// ─── Primary path ────────────────────────────────────────────────────────────

#[tokio::test]
async fn scorer_outcome_is_passed_through() {
  let s = store().await;
  let (a, b) = seeded_matchup(&s).await;
  let engine = PredictionEngine::with_scorer(
    s,
    FixedScorer(ScorerOutcome {
      winner:     b,
      method:     "Statistical Analysis Model".into(),
      confidence: 61.5,
      factors:    vec!["Fighter B has a higher finish rate".into()],
    }),
  );

  let report = engine.predict(a, b, Some(WeightClass::Lightweight), 5)
    .await
    .unwrap();
  assert_eq!(report.predicted_winner.fighter.id, b);
  assert_eq!(report.confidence, 61.5);
  assert_eq!(report.prediction_method, "Statistical Analysis Model");
  assert_eq!(report.factors, vec!["Fighter B has a higher finish rate"]);
}

#[tokio::test]
async fn scorer_winner_outside_pair_falls_back() {
  let s = store().await;
  let (a, b) = seeded_matchup(&s).await;
  let engine = PredictionEngine::with_scorer(
    s,
    FixedScorer(ScorerOutcome {
      winner:     424242,
      method:     "Statistical Analysis Model".into(),
      confidence: 80.0,
      factors:    vec![],
    }),
  );

  let report = engine.predict(a, b, None, 3).await.unwrap();
  assert_eq!(report.predicted_winner.fighter.id, a);
  assert_eq!(report.prediction_method, FALLBACK_METHOD);
}

#[tokio::test]
async fn scorer_confidence_out_of_range_falls_back() {
  let s = store().await;
  let (a, b) = seeded_matchup(&s).await;
  let engine = PredictionEngine::with_scorer(
    s,
    FixedScorer(ScorerOutcome {
      winner:     b,
      method:     "Statistical Analysis Model".into(),
      confidence: 120.0,
      factors:    vec![],
    }),
  );

  let report = engine.predict(a, b, None, 3).await.unwrap();
  assert_eq!(report.predicted_winner.fighter.id, a);
  assert_eq!(report.prediction_method, FALLBACK_METHOD);
}

// ─── Prediction log side effect ──────────────────────────────────────────────

#[tokio::test]
async fn every_prediction_is_logged_exactly_once() {
  let s = store().await;
  let (a, b) = seeded_matchup(&s).await;
  let engine = PredictionEngine::new(s.clone());

  let report = engine.predict(a, b, None, 3).await.unwrap();

  let logged = s.recent_predictions(10).await.unwrap();
  assert_eq!(logged.len(), 1);
  let entry = &logged[0].prediction;
  assert_eq!(entry.fighter1_id, a);
  assert_eq!(entry.fighter2_id, b);
  assert_eq!(entry.predicted_winner_id, a);
  assert_eq!(entry.confidence, report.confidence);
  assert_eq!(entry.factors, report.factors);
  assert_eq!(entry.method, report.prediction_method);
}

#[tokio::test]
async fn primary_path_predictions_are_logged_too() {
  let s = store().await;
  let (a, b) = seeded_matchup(&s).await;
  let engine = PredictionEngine::with_scorer(
    s.clone(),
    FixedScorer(ScorerOutcome {
      winner:     b,
      method:     "Statistical Analysis Model".into(),
      confidence: 70.0,
      factors:    vec!["model factor".into()],
    }),
  );

  engine.predict(a, b, None, 3).await.unwrap();

  let logged = s.recent_predictions(10).await.unwrap();
  assert_eq!(logged.len(), 1);
  assert_eq!(logged[0].prediction.method, "Statistical Analysis Model");
  assert_eq!(logged[0].prediction.predicted_winner_id, b);
}
