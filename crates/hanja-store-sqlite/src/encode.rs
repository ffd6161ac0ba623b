//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. The `stroke_order` and
//! `examples` columns hold compact JSON.

use chrono::{DateTime, Utc};
use hanja_core::{
  character::{Character, Example},
  progress::{Activity, ProgressRecord},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── JSON columns ────────────────────────────────────────────────────────────

pub fn encode_string_list(list: &[String]) -> Result<String> {
  Ok(serde_json::to_string(list)?)
}

pub fn decode_string_list(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

pub fn encode_examples(examples: &[Example]) -> Result<String> {
  Ok(serde_json::to_string(examples)?)
}

pub fn decode_examples(s: &str) -> Result<Vec<Example>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Activity ────────────────────────────────────────────────────────────────

/// Map an activity to its progress table. The two tables share one shape;
/// all progress SQL is written once and formatted with this name.
pub fn progress_table(activity: Activity) -> &'static str {
  match activity {
    Activity::Study => "study_progress",
    Activity::Practice => "practice_progress",
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw column values read directly from a `characters` row.
pub struct RawCharacter {
  pub id:           String,
  pub character:    String,
  pub sound:        String,
  pub meaning:      String,
  pub stroke_order: String,
  pub examples:     String,
  pub chapter:      i64,
  pub difficulty:   i64,
}

impl RawCharacter {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      character:    row.get(1)?,
      sound:        row.get(2)?,
      meaning:      row.get(3)?,
      stroke_order: row.get(4)?,
      examples:     row.get(5)?,
      chapter:      row.get(6)?,
      difficulty:   row.get(7)?,
    })
  }

  pub fn into_character(self) -> Result<Character> {
    Ok(Character {
      id:           self.id,
      character:    self.character,
      sound:        self.sound,
      meaning:      self.meaning,
      stroke_order: decode_string_list(&self.stroke_order)?,
      examples:     decode_examples(&self.examples)?,
      chapter:      self.chapter,
      difficulty:   self.difficulty,
    })
  }
}

/// Raw column values read directly from a progress row.
pub struct RawProgress {
  pub user_id:    String,
  pub hanja_id:   String,
  pub chapter:    i64,
  pub is_known:   bool,
  pub created_at: String,
  pub updated_at: String,
}

impl RawProgress {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:    row.get(0)?,
      hanja_id:   row.get(1)?,
      chapter:    row.get(2)?,
      is_known:   row.get(3)?,
      created_at: row.get(4)?,
      updated_at: row.get(5)?,
    })
  }

  pub fn into_progress(self) -> Result<ProgressRecord> {
    Ok(ProgressRecord {
      user_id:    self.user_id,
      hanja_id:   self.hanja_id,
      chapter:    self.chapter,
      is_known:   self.is_known,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
