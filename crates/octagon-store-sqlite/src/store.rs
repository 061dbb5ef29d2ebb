//! [`SqliteStore`] — the SQLite implementation of [`FightStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use octagon_core::{
  FighterId,
  fight::{Fight, FightSummary, NewFight},
  fighter::{Fighter, NewFighter},
  prediction::{NewPrediction, Prediction, PredictionRecord},
  stats::{FighterProfile, FighterStats},
  store::FightStore,
};

use crate::{
  Error, Result,
  encode::{
    RawFight, RawFighter, RawPrediction, RawPredictionRecord, encode_date,
    encode_dt, encode_factors,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A fight store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

const FIGHTER_COLUMNS: &str = "id, name, nickname, weight_class, height_cm, \
   reach_cm, stance, wins, losses, draws, win_by_ko, win_by_submission, \
   win_by_decision, created_at";

fn read_fighter_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawFighter> {
  Ok(RawFighter {
    id:                row.get(0)?,
    name:              row.get(1)?,
    nickname:          row.get(2)?,
    weight_class:      row.get(3)?,
    height_cm:         row.get(4)?,
    reach_cm:          row.get(5)?,
    stance:            row.get(6)?,
    wins:              row.get(7)?,
    losses:            row.get(8)?,
    draws:             row.get(9)?,
    win_by_ko:         row.get(10)?,
    win_by_submission: row.get(11)?,
    win_by_decision:   row.get(12)?,
    created_at:        row.get(13)?,
  })
}

fn read_fight_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawFight> {
  Ok(RawFight {
    id:               row.get(0)?,
    fighter1_id:      row.get(1)?,
    fighter2_id:      row.get(2)?,
    winner_id:        row.get(3)?,
    fight_date:       row.get(4)?,
    weight_class:     row.get(5)?,
    scheduled_rounds: row.get(6)?,
    method:           row.get(7)?,
    fight_time:       row.get(8)?,
    event_name:       row.get(9)?,
  })
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Whether any fighter row exists. Used to keep seeding idempotent.
  pub async fn is_empty(&self) -> Result<bool> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM fighters", [], |r| r.get(0))?)
      })
      .await?;
    Ok(count == 0)
  }

  async fn name_taken(&self, name: &str) -> Result<bool> {
    let name = name.to_owned();
    let taken: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM fighters WHERE name = ?1",
              rusqlite::params![name],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(taken)
  }

  /// Every fight row, unfiltered. Input to whole-roster stats computation.
  async fn all_fights(&self) -> Result<Vec<Fight>> {
    let raws: Vec<RawFight> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, fighter1_id, fighter2_id, winner_id, fight_date,
                  weight_class, scheduled_rounds, method, fight_time,
                  event_name
           FROM fights",
        )?;
        let rows = stmt
          .query_map([], read_fight_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFight::into_fight).collect()
  }
}

// ─── FightStore impl ─────────────────────────────────────────────────────────

impl FightStore for SqliteStore {
  type Error = Error;

  // ── Fighters ──────────────────────────────────────────────────────────────

  async fn add_fighter(&self, input: NewFighter) -> Result<Fighter> {
    if self.name_taken(&input.name).await? {
      return Err(Error::DuplicateFighter(input.name));
    }

    let created_at = Utc::now();
    let at_str = encode_dt(created_at);
    let row = input.clone();
    let stance_str = input.stance.map(|s| s.as_str().to_owned());
    let weight_class_str = input.weight_class.as_str().to_owned();

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO fighters (
             name, nickname, weight_class, height_cm, reach_cm, stance,
             wins, losses, draws, win_by_ko, win_by_submission,
             win_by_decision, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
          rusqlite::params![
            row.name,
            row.nickname,
            weight_class_str,
            row.height_cm,
            row.reach_cm,
            stance_str,
            row.wins,
            row.losses,
            row.draws,
            row.win_by_ko,
            row.win_by_submission,
            row.win_by_decision,
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Fighter {
      id,
      name: input.name,
      nickname: input.nickname,
      weight_class: input.weight_class,
      height_cm: input.height_cm,
      reach_cm: input.reach_cm,
      stance: input.stance,
      wins: input.wins,
      losses: input.losses,
      draws: input.draws,
      win_by_ko: input.win_by_ko,
      win_by_submission: input.win_by_submission,
      win_by_decision: input.win_by_decision,
      created_at,
    })
  }

  async fn get_fighter(&self, id: FighterId) -> Result<Option<Fighter>> {
    let raw: Option<RawFighter> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {FIGHTER_COLUMNS} FROM fighters WHERE id = ?1"),
              rusqlite::params![id],
              read_fighter_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawFighter::into_fighter).transpose()
  }

  async fn list_fighters(&self) -> Result<Vec<FighterProfile>> {
    let raws: Vec<RawFighter> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {FIGHTER_COLUMNS} FROM fighters ORDER BY name"
        ))?;
        let rows = stmt
          .query_map([], read_fighter_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let fighters: Vec<Fighter> = raws
      .into_iter()
      .map(RawFighter::into_fighter)
      .collect::<Result<_>>()?;

    // Stats are derived in one pass over the fight table rather than with a
    // correlated subquery per fighter.
    let fights = self.all_fights().await?;

    Ok(
      fighters
        .into_iter()
        .map(|fighter| {
          let stats = FighterStats::from_fights(fighter.id, &fights);
          FighterProfile { fighter, stats }
        })
        .collect(),
    )
  }

  async fn search_fighters(
    &self,
    query: &str,
    limit: usize,
  ) -> Result<Vec<Fighter>> {
    let pattern = format!("%{query}%");
    let limit_val = limit as i64;

    let raws: Vec<RawFighter> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {FIGHTER_COLUMNS} FROM fighters
           WHERE name LIKE ?1 OR nickname LIKE ?1
           ORDER BY name
           LIMIT ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![pattern, limit_val], read_fighter_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFighter::into_fighter).collect()
  }

  // ── Fights ────────────────────────────────────────────────────────────────

  async fn add_fight(&self, input: NewFight) -> Result<Fight> {
    if let Some(winner) = input.winner_id
      && winner != input.fighter1_id
      && winner != input.fighter2_id
    {
      return Err(Error::WinnerNotParticipant(winner));
    }

    for id in [input.fighter1_id, input.fighter2_id] {
      if self.get_fighter(id).await?.is_none() {
        return Err(Error::FighterNotFound(id));
      }
    }

    let date_str = encode_date(input.fight_date);
    let weight_class_str = input.weight_class.as_str().to_owned();
    let row = input.clone();

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO fights (
             fighter1_id, fighter2_id, winner_id, fight_date, weight_class,
             scheduled_rounds, method, fight_time, event_name
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            row.fighter1_id,
            row.fighter2_id,
            row.winner_id,
            date_str,
            weight_class_str,
            row.scheduled_rounds,
            row.method,
            row.fight_time,
            row.event_name,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Fight {
      id,
      fighter1_id: input.fighter1_id,
      fighter2_id: input.fighter2_id,
      winner_id: input.winner_id,
      fight_date: input.fight_date,
      weight_class: input.weight_class,
      scheduled_rounds: input.scheduled_rounds,
      method: input.method,
      fight_time: input.fight_time,
      event_name: input.event_name,
    })
  }

  async fn fights_for(&self, fighter_id: FighterId) -> Result<Vec<Fight>> {
    let raws: Vec<RawFight> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, fighter1_id, fighter2_id, winner_id, fight_date,
                  weight_class, scheduled_rounds, method, fight_time,
                  event_name
           FROM fights
           WHERE fighter1_id = ?1 OR fighter2_id = ?1
           ORDER BY fight_date DESC, id DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![fighter_id], read_fight_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFight::into_fight).collect()
  }

  async fn fight_history(
    &self,
    fighter_id: FighterId,
  ) -> Result<Vec<FightSummary>> {
    struct RawSummary {
      fight:         RawFight,
      fighter1_name: String,
      fighter2_name: String,
      winner_name:   Option<String>,
      opponent_name: String,
    }

    let raws: Vec<RawSummary> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT f.id, f.fighter1_id, f.fighter2_id, f.winner_id,
                  f.fight_date, f.weight_class, f.scheduled_rounds, f.method,
                  f.fight_time, f.event_name,
                  f1.name, f2.name, w.name,
                  CASE WHEN f.fighter1_id = ?1 THEN f2.name ELSE f1.name END
           FROM fights f
           JOIN fighters f1 ON f.fighter1_id = f1.id
           JOIN fighters f2 ON f.fighter2_id = f2.id
           LEFT JOIN fighters w ON f.winner_id = w.id
           WHERE f.fighter1_id = ?1 OR f.fighter2_id = ?1
           ORDER BY f.fight_date DESC, f.id DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![fighter_id], |row| {
            Ok(RawSummary {
              fight:         read_fight_row(row)?,
              fighter1_name: row.get(10)?,
              fighter2_name: row.get(11)?,
              winner_name:   row.get(12)?,
              opponent_name: row.get(13)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|raw| {
        Ok(FightSummary {
          fight:         raw.fight.into_fight()?,
          fighter1_name: raw.fighter1_name,
          fighter2_name: raw.fighter2_name,
          winner_name:   raw.winner_name,
          opponent_name: raw.opponent_name,
        })
      })
      .collect()
  }

  // ── Prediction log — append-only ──────────────────────────────────────────

  async fn append_prediction(
    &self,
    input: NewPrediction,
  ) -> Result<Prediction> {
    let created_at = Utc::now();
    let at_str = encode_dt(created_at);
    let factors_str = encode_factors(&input.factors)?;
    let row = input.clone();

    // Insert and rowid assignment happen in one call on the connection
    // thread, so the append sequence is atomic.
    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO predictions (
             fighter1_id, fighter2_id, predicted_winner_id, confidence,
             factors, method, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            row.fighter1_id,
            row.fighter2_id,
            row.predicted_winner_id,
            row.confidence,
            factors_str,
            row.method,
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Prediction {
      id,
      fighter1_id: input.fighter1_id,
      fighter2_id: input.fighter2_id,
      predicted_winner_id: input.predicted_winner_id,
      confidence: input.confidence,
      factors: input.factors,
      method: input.method,
      created_at,
    })
  }

  async fn recent_predictions(
    &self,
    limit: usize,
  ) -> Result<Vec<PredictionRecord>> {
    let limit_val = limit as i64;

    let raws: Vec<RawPredictionRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT p.id, p.fighter1_id, p.fighter2_id, p.predicted_winner_id,
                  p.confidence, p.factors, p.method, p.created_at,
                  f1.name, f2.name, w.name
           FROM predictions p
           JOIN fighters f1 ON p.fighter1_id = f1.id
           JOIN fighters f2 ON p.fighter2_id = f2.id
           JOIN fighters w  ON p.predicted_winner_id = w.id
           ORDER BY p.created_at DESC, p.id DESC
           LIMIT ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![limit_val], |row| {
            Ok(RawPredictionRecord {
              prediction:            RawPrediction {
                id:                  row.get(0)?,
                fighter1_id:         row.get(1)?,
                fighter2_id:         row.get(2)?,
                predicted_winner_id: row.get(3)?,
                confidence:          row.get(4)?,
                factors:             row.get(5)?,
                method:              row.get(6)?,
                created_at:          row.get(7)?,
              },
              fighter1_name:         row.get(8)?,
              fighter2_name:         row.get(9)?,
              predicted_winner_name: row.get(10)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPredictionRecord::into_record).collect()
  }
}
