//! Error type for `octagon-store-sqlite`.

use octagon_core::FighterId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] octagon_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A fight or prediction referenced a fighter id with no row.
  #[error("fighter not found: {0}")]
  FighterNotFound(FighterId),

  #[error("fighter name already taken: {0:?}")]
  DuplicateFighter(String),

  /// Seed data referenced a fighter name with no roster entry.
  #[error("unknown fighter name: {0:?}")]
  UnknownFighterName(String),

  #[error("winner {0} is not one of the fight's participants")]
  WinnerNotParticipant(FighterId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
