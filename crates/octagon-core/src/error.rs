//! Error types for `octagon-core`.

use thiserror::Error;

use crate::FighterId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("fighter not found: {0}")]
  FighterNotFound(FighterId),

  #[error("a fighter cannot be matched against themselves")]
  SameFighter,

  #[error("invalid round count: {0} (must be 1-5)")]
  InvalidRounds(u8),

  #[error("unknown weight class: {0:?}")]
  UnknownWeightClass(String),

  #[error("unknown stance: {0:?}")]
  UnknownStance(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
