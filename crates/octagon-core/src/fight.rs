//! Fight — a single historical bout between two fighters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{FightId, FighterId, fighter::WeightClass};

/// A persisted fight row.
///
/// `winner_id == None` records a draw or no contest. When present, the
/// winner is always one of the two participants (enforced on insert).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fight {
  pub id:               FightId,
  pub fighter1_id:      FighterId,
  pub fighter2_id:      FighterId,
  pub winner_id:        Option<FighterId>,
  pub fight_date:       NaiveDate,
  pub weight_class:     WeightClass,
  pub scheduled_rounds: u8,
  /// Free-form finish method as reported, e.g. "KO/TKO", "Submission",
  /// "Decision (unanimous)".
  pub method:           Option<String>,
  /// Finish time within the final round, e.g. "4:20".
  pub fight_time:       Option<String>,
  pub event_name:       String,
}

/// Input type for recording a fight. `id` is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFight {
  pub fighter1_id:      FighterId,
  pub fighter2_id:      FighterId,
  pub winner_id:        Option<FighterId>,
  pub fight_date:       NaiveDate,
  pub weight_class:     WeightClass,
  pub scheduled_rounds: u8,
  pub method:           Option<String>,
  pub fight_time:       Option<String>,
  pub event_name:       String,
}

impl Fight {
  /// Whether `fighter_id` fought in this bout (either slot).
  pub fn involves(&self, fighter_id: FighterId) -> bool {
    self.fighter1_id == fighter_id || self.fighter2_id == fighter_id
  }

  /// Whether `fighter_id` won this bout.
  pub fn won_by(&self, fighter_id: FighterId) -> bool {
    self.winner_id == Some(fighter_id)
  }
}

/// A fight joined with participant names — the read model for a fighter's
/// history listing. Never stored, always derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FightSummary {
  pub fight:         Fight,
  pub fighter1_name: String,
  pub fighter2_name: String,
  pub winner_name:   Option<String>,
  /// Name of the other participant, relative to the fighter whose history
  /// was requested.
  pub opponent_name: String,
}
