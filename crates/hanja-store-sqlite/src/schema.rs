//! SQL schema for the Hanja SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS characters (
    id           TEXT PRIMARY KEY,
    character    TEXT NOT NULL,
    sound        TEXT NOT NULL,
    meaning      TEXT NOT NULL,
    stroke_order TEXT NOT NULL DEFAULT '[]',  -- JSON array of strings
    examples     TEXT NOT NULL DEFAULT '[]',  -- JSON array of {sentence, meaning}
    chapter      INTEGER NOT NULL,
    difficulty   INTEGER NOT NULL DEFAULT 2
);

CREATE INDEX IF NOT EXISTS characters_chapter_idx    ON characters(chapter);
CREATE INDEX IF NOT EXISTS characters_difficulty_idx ON characters(difficulty);

-- Study and practice progress are structurally identical but tracked in
-- separate tables; the surrogate key exists only for row identity, the
-- logical identity is (user_id, hanja_id).
CREATE TABLE IF NOT EXISTS study_progress (
    progress_id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     TEXT NOT NULL,
    hanja_id    TEXT NOT NULL,
    chapter     INTEGER NOT NULL,
    is_known    INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL,  -- ISO 8601 UTC; store-assigned
    updated_at  TEXT NOT NULL,
    UNIQUE (user_id, hanja_id)
);

CREATE INDEX IF NOT EXISTS study_progress_user_chapter_idx
    ON study_progress(user_id, chapter);

CREATE TABLE IF NOT EXISTS practice_progress (
    progress_id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     TEXT NOT NULL,
    hanja_id    TEXT NOT NULL,
    chapter     INTEGER NOT NULL,
    is_known    INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    UNIQUE (user_id, hanja_id)
);

CREATE INDEX IF NOT EXISTS practice_progress_user_chapter_idx
    ON practice_progress(user_id, chapter);

PRAGMA user_version = 1;
";
