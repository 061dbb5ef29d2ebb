//! Fighter — the competitor entity and its cumulative record.
//!
//! A fighter row carries the headline record as reported (wins, losses,
//! draws, method breakdown). Derived statistics are never stored; they are
//! recomputed from fight rows on every read (see [`crate::stats`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, FighterId, Result};

// ─── Weight class ────────────────────────────────────────────────────────────

/// The thirteen UFC divisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightClass {
  Strawweight,
  Flyweight,
  Bantamweight,
  Featherweight,
  Lightweight,
  Welterweight,
  Middleweight,
  #[serde(rename = "Light Heavyweight")]
  LightHeavyweight,
  Heavyweight,
  #[serde(rename = "Women's Strawweight")]
  WomensStrawweight,
  #[serde(rename = "Women's Flyweight")]
  WomensFlyweight,
  #[serde(rename = "Women's Bantamweight")]
  WomensBantamweight,
  #[serde(rename = "Women's Featherweight")]
  WomensFeatherweight,
}

impl WeightClass {
  /// All divisions, heaviest men's class last among the men's divisions.
  pub const ALL: [WeightClass; 13] = [
    WeightClass::Strawweight,
    WeightClass::Flyweight,
    WeightClass::Bantamweight,
    WeightClass::Featherweight,
    WeightClass::Lightweight,
    WeightClass::Welterweight,
    WeightClass::Middleweight,
    WeightClass::LightHeavyweight,
    WeightClass::Heavyweight,
    WeightClass::WomensStrawweight,
    WeightClass::WomensFlyweight,
    WeightClass::WomensBantamweight,
    WeightClass::WomensFeatherweight,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      WeightClass::Strawweight => "Strawweight",
      WeightClass::Flyweight => "Flyweight",
      WeightClass::Bantamweight => "Bantamweight",
      WeightClass::Featherweight => "Featherweight",
      WeightClass::Lightweight => "Lightweight",
      WeightClass::Welterweight => "Welterweight",
      WeightClass::Middleweight => "Middleweight",
      WeightClass::LightHeavyweight => "Light Heavyweight",
      WeightClass::Heavyweight => "Heavyweight",
      WeightClass::WomensStrawweight => "Women's Strawweight",
      WeightClass::WomensFlyweight => "Women's Flyweight",
      WeightClass::WomensBantamweight => "Women's Bantamweight",
      WeightClass::WomensFeatherweight => "Women's Featherweight",
    }
  }
}

impl std::fmt::Display for WeightClass {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for WeightClass {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    WeightClass::ALL
      .iter()
      .copied()
      .find(|wc| wc.as_str() == s)
      .ok_or_else(|| Error::UnknownWeightClass(s.to_owned()))
  }
}

// ─── Stance ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stance {
  Orthodox,
  Southpaw,
  Switch,
}

impl Stance {
  pub fn as_str(&self) -> &'static str {
    match self {
      Stance::Orthodox => "Orthodox",
      Stance::Southpaw => "Southpaw",
      Stance::Switch => "Switch",
    }
  }
}

impl std::str::FromStr for Stance {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "Orthodox" => Ok(Stance::Orthodox),
      "Southpaw" => Ok(Stance::Southpaw),
      "Switch" => Ok(Stance::Switch),
      other => Err(Error::UnknownStance(other.to_owned())),
    }
  }
}

// ─── Fighter ─────────────────────────────────────────────────────────────────

/// A persisted fighter row.
///
/// The record fields are the reported career totals; the store assumes (but
/// does not enforce) `wins == win_by_ko + win_by_submission +
/// win_by_decision`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fighter {
  pub id:                FighterId,
  /// Unique across the store.
  pub name:              String,
  pub nickname:          Option<String>,
  pub weight_class:      WeightClass,
  /// Height in centimeters, if known.
  pub height_cm:         Option<f64>,
  /// Reach in centimeters, if known.
  pub reach_cm:          Option<f64>,
  pub stance:            Option<Stance>,
  pub wins:              u32,
  pub losses:            u32,
  pub draws:             u32,
  pub win_by_ko:         u32,
  pub win_by_submission: u32,
  pub win_by_decision:   u32,
  pub created_at:        DateTime<Utc>,
}

/// Input type for creating a fighter. `id` and `created_at` are assigned by
/// the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFighter {
  pub name:              String,
  pub nickname:          Option<String>,
  pub weight_class:      WeightClass,
  pub height_cm:         Option<f64>,
  pub reach_cm:          Option<f64>,
  pub stance:            Option<Stance>,
  pub wins:              u32,
  pub losses:            u32,
  pub draws:             u32,
  pub win_by_ko:         u32,
  pub win_by_submission: u32,
  pub win_by_decision:   u32,
}

impl NewFighter {
  /// A fighter with the given name and division and an empty record.
  pub fn named(name: impl Into<String>, weight_class: WeightClass) -> Self {
    Self {
      name: name.into(),
      nickname: None,
      weight_class,
      height_cm: None,
      reach_cm: None,
      stance: None,
      wins: 0,
      losses: 0,
      draws: 0,
      win_by_ko: 0,
      win_by_submission: 0,
      win_by_decision: 0,
    }
  }
}
