//! Error type for `hanja-store-sqlite`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A configured non-default storage partition could not be created or
  /// opened. Fatal at startup; the message tells the operator what to do.
  #[error(
    "cannot open storage partition {path:?}: {reason} — create the \
     directory and check write permissions, or drop the `partition` \
     setting to use the default store file"
  )]
  Partition { path: PathBuf, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
