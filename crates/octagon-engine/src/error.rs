//! Error type for `octagon-engine`.
//!
//! Scorer failures are deliberately absent: they are recovered inside the
//! engine via the fallback path and never surface to callers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The request itself is invalid (duplicate ids, unknown fighter, bad
  /// round count). Maps to a client error at the API layer.
  #[error("invalid prediction request: {0}")]
  Invalid(#[from] octagon_core::Error),

  /// The storage layer failed on the read path that blocks the response.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
