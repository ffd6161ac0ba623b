//! Handlers for the progress endpoints.
//!
//! One handler set serves both activities: the router state carries the
//! [`Activity`] alongside the store, and the study and practice path
//! prefixes mount the same routes with different state.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/` | Upsert; returns 201 + stored record |
//! | `GET`    | `/{user}` | All records for the user |
//! | `GET`    | `/{user}/chapter/{n}` | Records restricted to one chapter |
//! | `GET`    | `/{user}/hanja/{id}` | 404 if not found |
//! | `PUT`    | `/{user}/hanja/{id}` | Upsert; 400 if body identity differs |
//! | `DELETE` | `/{user}/hanja/{id}` | 204, or 404 if not found |

use std::sync::Arc;

use axum::{
  Json, Router,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
  routing::{get, post},
};
use hanja_core::{
  progress::{Activity, ProgressRecord, ProgressUpsert},
  store::HanjaStore,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ─── State ───────────────────────────────────────────────────────────────────

/// Router state for one progress prefix: the store plus the activity whose
/// table the handlers target.
pub struct ProgressState<S> {
  pub store:    Arc<S>,
  pub activity: Activity,
}

impl<S> ProgressState<S> {
  pub fn new(store: Arc<S>, activity: Activity) -> Self {
    Self { store, activity }
  }
}

// Manual impl: `S` itself need not be `Clone` behind the `Arc`.
impl<S> Clone for ProgressState<S> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      activity: self.activity,
    }
  }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

/// A progress record as serialized on the wire. Timestamps stay internal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRepr {
  pub user_id:  String,
  pub hanja_id: String,
  pub chapter:  i64,
  pub is_known: bool,
}

impl From<ProgressRecord> for ProgressRepr {
  fn from(r: ProgressRecord) -> Self {
    Self {
      user_id:  r.user_id,
      hanja_id: r.hanja_id,
      chapter:  r.chapter,
      is_known: r.is_known,
    }
  }
}

/// JSON body accepted by the upsert endpoints.
#[derive(Debug, Deserialize)]
pub struct UpsertBody {
  pub user_id:  String,
  pub hanja_id: String,
  pub chapter:  i64,
  pub is_known: bool,
}

impl From<UpsertBody> for ProgressUpsert {
  fn from(b: UpsertBody) -> Self {
    ProgressUpsert {
      user_id:  b.user_id,
      hanja_id: b.hanja_id,
      chapter:  b.chapter,
      is_known: b.is_known,
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the routes for one progress prefix.
pub fn router<S>(state: ProgressState<S>) -> Router<()>
where
  S: HanjaStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/", post(create::<S>))
    .route("/{user}", get(list_for_user::<S>))
    .route("/{user}/chapter/{chapter}", get(list_for_chapter::<S>))
    .route(
      "/{user}/hanja/{id}",
      get(get_one::<S>).put(put_one::<S>).delete(delete_one::<S>),
    )
    .with_state(state)
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// `GET /{user}`
pub async fn list_for_user<S>(
  State(state): State<ProgressState<S>>,
  Path(user): Path<String>,
) -> Result<Json<Vec<ProgressRepr>>, ApiError>
where
  S: HanjaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let records = state
    .store
    .list_progress_by_user(state.activity, &user)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records.into_iter().map(ProgressRepr::from).collect()))
}

/// `GET /{user}/chapter/{chapter}`
pub async fn list_for_chapter<S>(
  State(state): State<ProgressState<S>>,
  Path((user, chapter)): Path<(String, i64)>,
) -> Result<Json<Vec<ProgressRepr>>, ApiError>
where
  S: HanjaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let records = state
    .store
    .list_progress_by_user_and_chapter(state.activity, &user, chapter)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records.into_iter().map(ProgressRepr::from).collect()))
}

/// `GET /{user}/hanja/{id}`
pub async fn get_one<S>(
  State(state): State<ProgressState<S>>,
  Path((user, id)): Path<(String, String)>,
) -> Result<Json<ProgressRepr>, ApiError>
where
  S: HanjaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let record = state
    .store
    .get_progress(state.activity, &user, &id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| {
      ApiError::NotFound(format!("no progress for user {user} and hanja {id}"))
    })?;
  Ok(Json(record.into()))
}

/// `POST /` — upsert; returns 201 + the stored record.
pub async fn create<S>(
  State(state): State<ProgressState<S>>,
  Json(body): Json<UpsertBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: HanjaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let record = state
    .store
    .upsert_progress(state.activity, body.into())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(ProgressRepr::from(record))))
}

/// `PUT /{user}/hanja/{id}` — upsert. The body identity must match the
/// path; a mismatch is rejected before any write happens.
pub async fn put_one<S>(
  State(state): State<ProgressState<S>>,
  Path((user, id)): Path<(String, String)>,
  Json(body): Json<UpsertBody>,
) -> Result<Json<ProgressRepr>, ApiError>
where
  S: HanjaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if body.user_id != user || body.hanja_id != id {
    return Err(ApiError::BadRequest(format!(
      "body identity ({}, {}) does not match path identity ({user}, {id})",
      body.user_id, body.hanja_id
    )));
  }

  let record = state
    .store
    .upsert_progress(state.activity, body.into())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(record.into()))
}

/// `DELETE /{user}/hanja/{id}` — 204 on success, 404 when nothing existed.
pub async fn delete_one<S>(
  State(state): State<ProgressState<S>>,
  Path((user, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError>
where
  S: HanjaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deleted = state
    .store
    .delete_progress(state.activity, &user, &id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if deleted {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!(
      "no progress for user {user} and hanja {id}"
    )))
  }
}
