//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, dates as ISO 8601 dates,
//! enums as their display names, and the factors list as compact JSON.

use chrono::{DateTime, NaiveDate, Utc};
use octagon_core::{
  fight::Fight,
  fighter::{Fighter, Stance, WeightClass},
  prediction::{Prediction, PredictionRecord},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enums ───────────────────────────────────────────────────────────────────

pub fn decode_weight_class(s: &str) -> Result<WeightClass> {
  Ok(s.parse()?)
}

pub fn decode_stance(s: &str) -> Result<Stance> {
  Ok(s.parse()?)
}

// ─── Factors ─────────────────────────────────────────────────────────────────

pub fn encode_factors(factors: &[String]) -> Result<String> {
  Ok(serde_json::to_string(factors)?)
}

pub fn decode_factors(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `fighters` row.
pub struct RawFighter {
  pub id:                i64,
  pub name:              String,
  pub nickname:          Option<String>,
  pub weight_class:      String,
  pub height_cm:         Option<f64>,
  pub reach_cm:          Option<f64>,
  pub stance:            Option<String>,
  pub wins:              u32,
  pub losses:            u32,
  pub draws:             u32,
  pub win_by_ko:         u32,
  pub win_by_submission: u32,
  pub win_by_decision:   u32,
  pub created_at:        String,
}

impl RawFighter {
  pub fn into_fighter(self) -> Result<Fighter> {
    Ok(Fighter {
      id:                self.id,
      name:              self.name,
      nickname:          self.nickname,
      weight_class:      decode_weight_class(&self.weight_class)?,
      height_cm:         self.height_cm,
      reach_cm:          self.reach_cm,
      stance:            self.stance.as_deref().map(decode_stance).transpose()?,
      wins:              self.wins,
      losses:            self.losses,
      draws:             self.draws,
      win_by_ko:         self.win_by_ko,
      win_by_submission: self.win_by_submission,
      win_by_decision:   self.win_by_decision,
      created_at:        decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `fights` row.
pub struct RawFight {
  pub id:               i64,
  pub fighter1_id:      i64,
  pub fighter2_id:      i64,
  pub winner_id:        Option<i64>,
  pub fight_date:       String,
  pub weight_class:     String,
  pub scheduled_rounds: u8,
  pub method:           Option<String>,
  pub fight_time:       Option<String>,
  pub event_name:       String,
}

impl RawFight {
  pub fn into_fight(self) -> Result<Fight> {
    Ok(Fight {
      id:               self.id,
      fighter1_id:      self.fighter1_id,
      fighter2_id:      self.fighter2_id,
      winner_id:        self.winner_id,
      fight_date:       decode_date(&self.fight_date)?,
      weight_class:     decode_weight_class(&self.weight_class)?,
      scheduled_rounds: self.scheduled_rounds,
      method:           self.method,
      fight_time:       self.fight_time,
      event_name:       self.event_name,
    })
  }
}

/// Raw values read directly from a `predictions` row.
pub struct RawPrediction {
  pub id:                  i64,
  pub fighter1_id:         i64,
  pub fighter2_id:         i64,
  pub predicted_winner_id: i64,
  pub confidence:          f64,
  pub factors:             String,
  pub method:              String,
  pub created_at:          String,
}

impl RawPrediction {
  pub fn into_prediction(self) -> Result<Prediction> {
    Ok(Prediction {
      id:                  self.id,
      fighter1_id:         self.fighter1_id,
      fighter2_id:         self.fighter2_id,
      predicted_winner_id: self.predicted_winner_id,
      confidence:          self.confidence,
      factors:             decode_factors(&self.factors)?,
      method:              self.method,
      created_at:          decode_dt(&self.created_at)?,
    })
  }
}

/// A prediction row joined with the three fighter names.
pub struct RawPredictionRecord {
  pub prediction:            RawPrediction,
  pub fighter1_name:         String,
  pub fighter2_name:         String,
  pub predicted_winner_name: String,
}

impl RawPredictionRecord {
  pub fn into_record(self) -> Result<PredictionRecord> {
    Ok(PredictionRecord {
      prediction:            self.prediction.into_prediction()?,
      fighter1_name:         self.fighter1_name,
      fighter2_name:         self.fighter2_name,
      predicted_winner_name: self.predicted_winner_name,
    })
  }
}
