//! The external scorer boundary.
//!
//! The scorer is an opaque collaborator process: it receives the matchup as
//! four positional arguments and must emit a single JSON document on stdout.
//! Its internals (statistical model, ML, anything) are not this crate's
//! concern — only the wire contract is, and every way that contract can be
//! violated is a recoverable [`ScorerError`].

use std::{future::Future, path::PathBuf, process::Stdio, time::Duration};

use octagon_core::{FighterId, fighter::WeightClass};
use serde::Deserialize;
use thiserror::Error;
use tokio::process::Command;

/// Bounded wait applied to the scorer process.
pub const DEFAULT_SCORER_TIMEOUT: Duration = Duration::from_secs(5);

// ─── Contract types ──────────────────────────────────────────────────────────

/// The matchup handed to a scorer.
#[derive(Debug, Clone)]
pub struct ScoreRequest {
  pub fighter1_id:  FighterId,
  pub fighter2_id:  FighterId,
  pub weight_class: Option<WeightClass>,
  pub rounds:       u8,
}

/// What a scorer must produce. Parsed from the process's stdout through
/// serde — a schema check, not ad hoc text scanning.
#[derive(Debug, Clone, Deserialize)]
pub struct ScorerOutcome {
  /// Must be one of the two requested fighter ids (validated by the
  /// engine, not here).
  pub winner:     FighterId,
  pub method:     String,
  /// Percentage in `[0, 100]` (validated by the engine).
  pub confidence: f64,
  #[serde(default)]
  pub factors:    Vec<String>,
}

/// Every way the scorer boundary can fail. All variants are recovered by
/// the engine's fallback path; none reaches a caller.
#[derive(Debug, Error)]
pub enum ScorerError {
  #[error("failed to spawn scorer process: {0}")]
  Spawn(#[source] std::io::Error),

  #[error("scorer timed out after {0:?}")]
  Timeout(Duration),

  #[error("scorer exited with code {code:?}: {stderr}")]
  NonZeroExit {
    code:   Option<i32>,
    stderr: String,
  },

  #[error("scorer produced no output")]
  EmptyOutput,

  #[error("scorer output failed to parse: {0}")]
  Malformed(#[from] serde_json::Error),
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A scoring backend. The production implementation is [`ProcessScorer`];
/// tests substitute fixed or failing scorers.
pub trait Scorer: Send + Sync {
  fn score<'a>(
    &'a self,
    request: &'a ScoreRequest,
  ) -> impl Future<Output = Result<ScorerOutcome, ScorerError>> + Send + 'a;
}

// ─── Process implementation ──────────────────────────────────────────────────

/// Runs the configured executable with four positional string arguments:
/// fighter1 id, fighter2 id, weight class (empty string when unspecified),
/// and round count.
#[derive(Debug, Clone)]
pub struct ProcessScorer {
  command: PathBuf,
  timeout: Duration,
}

impl ProcessScorer {
  pub fn new(command: impl Into<PathBuf>) -> Self {
    Self { command: command.into(), timeout: DEFAULT_SCORER_TIMEOUT }
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }
}

impl Scorer for ProcessScorer {
  async fn score(
    &self,
    request: &ScoreRequest,
  ) -> Result<ScorerOutcome, ScorerError> {
    let weight_class =
      request.weight_class.map(|wc| wc.as_str()).unwrap_or("");

    let output = tokio::time::timeout(
      self.timeout,
      Command::new(&self.command)
        .arg(request.fighter1_id.to_string())
        .arg(request.fighter2_id.to_string())
        .arg(weight_class)
        .arg(request.rounds.to_string())
        .stdin(Stdio::null())
        // Dropping the future on timeout must also reap the child.
        .kill_on_drop(true)
        .output(),
    )
    .await
    .map_err(|_| ScorerError::Timeout(self.timeout))?
    .map_err(ScorerError::Spawn)?;

    if !output.status.success() {
      return Err(ScorerError::NonZeroExit {
        code:   output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
      });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let document = stdout.trim();
    if document.is_empty() {
      return Err(ScorerError::EmptyOutput);
    }

    Ok(serde_json::from_str(document)?)
  }
}
