//! Per-user progress records.
//!
//! The same record shape is tracked twice — once for the study activity and
//! once for practice — in two separate tables. Store operations take an
//! [`Activity`] to select the table; the record identity within a table is
//! the (`user_id`, `hanja_id`) pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which progress table an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
  Study,
  Practice,
}

/// A stored progress row. `created_at` and `updated_at` are assigned by the
/// store; an upsert refreshes `updated_at` and preserves `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
  pub user_id:    String,
  pub hanja_id:   String,
  /// Denormalized copy of the character's chapter at write time; not
  /// re-validated against the catalog.
  pub chapter:    i64,
  pub is_known:   bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Input for an upsert: insert-if-absent, else overwrite `chapter` and
/// `is_known` in place.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressUpsert {
  pub user_id:  String,
  pub hanja_id: String,
  pub chapter:  i64,
  pub is_known: bool,
}
