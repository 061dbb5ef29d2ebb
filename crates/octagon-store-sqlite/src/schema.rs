//! SQL schema for the Octagon SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS fighters (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    name              TEXT NOT NULL UNIQUE,
    nickname          TEXT,
    weight_class      TEXT NOT NULL,
    height_cm         REAL,
    reach_cm          REAL,
    stance            TEXT,
    wins              INTEGER NOT NULL DEFAULT 0,
    losses            INTEGER NOT NULL DEFAULT 0,
    draws             INTEGER NOT NULL DEFAULT 0,
    win_by_ko         INTEGER NOT NULL DEFAULT 0,
    win_by_submission INTEGER NOT NULL DEFAULT 0,
    win_by_decision   INTEGER NOT NULL DEFAULT 0,
    created_at        TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS fights (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    fighter1_id      INTEGER NOT NULL REFERENCES fighters(id),
    fighter2_id      INTEGER NOT NULL REFERENCES fighters(id),
    winner_id        INTEGER REFERENCES fighters(id),  -- NULL = draw / NC
    fight_date       TEXT NOT NULL,   -- ISO 8601 date
    weight_class     TEXT NOT NULL,
    scheduled_rounds INTEGER NOT NULL,
    method           TEXT,
    fight_time       TEXT,
    event_name       TEXT NOT NULL
);

-- The prediction log is strictly append-only.
-- No UPDATE or DELETE is ever issued against this table; the AUTOINCREMENT
-- id is the monotonic append sequence used to break created_at ties.
CREATE TABLE IF NOT EXISTS predictions (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    fighter1_id         INTEGER NOT NULL REFERENCES fighters(id),
    fighter2_id         INTEGER NOT NULL REFERENCES fighters(id),
    predicted_winner_id INTEGER NOT NULL REFERENCES fighters(id),
    confidence          REAL NOT NULL,
    factors             TEXT NOT NULL DEFAULT '[]',  -- JSON string array
    method              TEXT NOT NULL,
    created_at          TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS fights_fighter1_idx      ON fights(fighter1_id);
CREATE INDEX IF NOT EXISTS fights_fighter2_idx      ON fights(fighter2_id);
CREATE INDEX IF NOT EXISTS predictions_created_idx  ON predictions(created_at);

PRAGMA user_version = 1;
";
