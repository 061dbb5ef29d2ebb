//! Core types and trait definitions for the Octagon fight-prediction
//! service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod fight;
pub mod fighter;
pub mod prediction;
pub mod stats;
pub mod store;

pub use error::{Error, Result};

/// SQLite rowid of a fighter. Always positive.
pub type FighterId = i64;
/// SQLite rowid of a fight.
pub type FightId = i64;
/// SQLite rowid of a prediction; doubles as the append sequence number.
pub type PredictionId = i64;
