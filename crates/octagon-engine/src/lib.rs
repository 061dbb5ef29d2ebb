//! The fight-outcome prediction engine.
//!
//! Given two fighter ids, the engine produces a structured prediction:
//! predicted winner, confidence score, contributing factors, and a
//! provenance label. Scoring is delegated to an external process when one
//! is configured; any scorer failure is absorbed by a deterministic
//! win-rate fallback so a prediction request never fails on the scorer's
//! account.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

mod engine;
mod scorer;

pub mod error;

pub use engine::{FALLBACK_METHOD, PredictionEngine, PredictionReport};
pub use error::{Error, Result};
pub use scorer::{
  ProcessScorer, ScoreRequest, Scorer, ScorerError, ScorerOutcome,
};

#[cfg(test)]
mod tests;
