//! The `FightStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `octagon-store-sqlite`). Higher layers (`octagon-engine`, `octagon-api`)
//! depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  FighterId,
  fight::{Fight, FightSummary, NewFight},
  fighter::{Fighter, NewFighter},
  prediction::{NewPrediction, Prediction, PredictionRecord},
  stats::FighterProfile,
};

/// Abstraction over a fight-data store backend.
///
/// Fighter and fight rows are written once at ingest time. The prediction
/// table is strictly append-only: no update or delete is ever exposed, per
/// its audit purpose.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait FightStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Fighters ──────────────────────────────────────────────────────────

  /// Persist a new fighter. Fails if the name is already taken.
  fn add_fighter(
    &self,
    input: NewFighter,
  ) -> impl Future<Output = Result<Fighter, Self::Error>> + Send + '_;

  /// Retrieve a fighter by id. Returns `None` if not found.
  fn get_fighter(
    &self,
    id: FighterId,
  ) -> impl Future<Output = Result<Option<Fighter>, Self::Error>> + Send + '_;

  /// All fighters with their computed stats, ordered by name.
  fn list_fighters(
    &self,
  ) -> impl Future<Output = Result<Vec<FighterProfile>, Self::Error>> + Send + '_;

  /// Case-insensitive LIKE match over name and nickname.
  fn search_fighters<'a>(
    &'a self,
    query: &'a str,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Fighter>, Self::Error>> + Send + 'a;

  // ── Fights ────────────────────────────────────────────────────────────

  /// Record a historical fight. Fails if either participant is unknown or
  /// the winner is not one of the participants.
  fn add_fight(
    &self,
    input: NewFight,
  ) -> impl Future<Output = Result<Fight, Self::Error>> + Send + '_;

  /// All fights in which the fighter appears in either slot, most recent
  /// first. The raw input to stats aggregation.
  fn fights_for(
    &self,
    fighter_id: FighterId,
  ) -> impl Future<Output = Result<Vec<Fight>, Self::Error>> + Send + '_;

  /// Joined fight history (participant and opponent names resolved), most
  /// recent first.
  fn fight_history(
    &self,
    fighter_id: FighterId,
  ) -> impl Future<Output = Result<Vec<FightSummary>, Self::Error>> + Send + '_;

  // ── Prediction log — append-only ──────────────────────────────────────

  /// Append a prediction to the log. The store assigns `created_at` and a
  /// monotonically increasing id; the assignment is atomic per append so
  /// that equal-timestamp entries still have a total order.
  fn append_prediction(
    &self,
    input: NewPrediction,
  ) -> impl Future<Output = Result<Prediction, Self::Error>> + Send + '_;

  /// At most `limit` predictions, most recent first. Entries with an
  /// identical `created_at` are ordered by descending id.
  fn recent_predictions(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<PredictionRecord>, Self::Error>> + Send + '_;
}
