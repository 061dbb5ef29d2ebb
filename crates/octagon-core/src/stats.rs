//! Fight-history aggregation — derived statistics, computed at query time.
//!
//! Stats are recomputed from raw fight rows on every request. Nothing here
//! is cached or persisted, so the numbers are always consistent with the
//! latest stored fights at the cost of a full scan per aggregation.

use serde::{Deserialize, Serialize};

use crate::{FighterId, fight::Fight, fighter::Fighter};

/// Aggregated record derived from the fight table for one fighter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FighterStats {
  pub total_fights: u32,
  pub wins:         u32,
  pub losses:       u32,
  /// `wins / total_fights`, or `0.0` when no fights are recorded.
  ///
  /// A draw or no contest (null winner) counts toward `total_fights` but
  /// not toward `wins`: it is ring experience, not a victory.
  pub win_rate:     f64,
}

impl FighterStats {
  /// Aggregate over every fight in which `fighter_id` appears in either
  /// slot. Rows not involving the fighter are ignored, so callers may pass
  /// a pre-filtered or a full fight list.
  pub fn from_fights(fighter_id: FighterId, fights: &[Fight]) -> Self {
    let mut total_fights = 0u32;
    let mut wins = 0u32;
    let mut losses = 0u32;

    for fight in fights.iter().filter(|f| f.involves(fighter_id)) {
      total_fights += 1;
      match fight.winner_id {
        Some(w) if w == fighter_id => wins += 1,
        Some(_) => losses += 1,
        None => {}
      }
    }

    let win_rate = if total_fights == 0 {
      0.0
    } else {
      f64::from(wins) / f64::from(total_fights)
    };

    Self { total_fights, wins, losses, win_rate }
  }

  /// A fighter with no recorded fights: all zero, valid, not an error.
  pub fn empty() -> Self {
    Self { total_fights: 0, wins: 0, losses: 0, win_rate: 0.0 }
  }
}

/// A fighter bundled with their computed stats — the standard read model
/// for fighter listings and prediction responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FighterProfile {
  pub fighter: Fighter,
  pub stats:   FighterStats,
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::fighter::WeightClass;

  fn fight(
    id: i64,
    fighter1_id: FighterId,
    fighter2_id: FighterId,
    winner_id: Option<FighterId>,
  ) -> Fight {
    Fight {
      id,
      fighter1_id,
      fighter2_id,
      winner_id,
      fight_date: NaiveDate::from_ymd_opt(2023, 7, 8).unwrap(),
      weight_class: WeightClass::Lightweight,
      scheduled_rounds: 3,
      method: Some("Decision".into()),
      fight_time: None,
      event_name: "Test Event".into(),
    }
  }

  #[test]
  fn zero_fights_is_valid_not_an_error() {
    let stats = FighterStats::from_fights(1, &[]);
    assert_eq!(stats.total_fights, 0);
    assert_eq!(stats.win_rate, 0.0);
  }

  #[test]
  fn counts_fights_in_either_slot() {
    let fights = vec![
      fight(1, 1, 2, Some(1)),
      fight(2, 3, 1, Some(1)),
      fight(3, 2, 3, Some(2)),
    ];
    let stats = FighterStats::from_fights(1, &fights);
    assert_eq!(stats.total_fights, 2);
    assert_eq!(stats.wins, 2);
    assert_eq!(stats.losses, 0);
    assert_eq!(stats.win_rate, 1.0);
  }

  #[test]
  fn losses_counted_when_other_fighter_wins() {
    let fights = vec![fight(1, 1, 2, Some(2)), fight(2, 1, 3, Some(1))];
    let stats = FighterStats::from_fights(1, &fights);
    assert_eq!(stats.total_fights, 2);
    assert_eq!(stats.wins, 1);
    assert_eq!(stats.losses, 1);
    assert_eq!(stats.win_rate, 0.5);
  }

  #[test]
  fn draw_counts_toward_total_but_not_wins() {
    let fights = vec![
      fight(1, 1, 2, Some(1)),
      fight(2, 1, 2, None), // draw / no contest
    ];
    let stats = FighterStats::from_fights(1, &fights);
    assert_eq!(stats.total_fights, 2);
    assert_eq!(stats.wins, 1);
    assert_eq!(stats.losses, 0);
    assert_eq!(stats.win_rate, 0.5);
  }
}
