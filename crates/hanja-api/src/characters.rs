//! Handlers for `/hanja` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/hanja` | Full catalog, `{"hanja": [...]}` envelope |
//! | `POST`   | `/hanja` | Body: [`CreateBody`]; returns 201 + stored record |
//! | `GET`    | `/hanja/{id}` | 404 if not found |
//! | `PUT`    | `/hanja/{id}` | Partial update; 404 if not found |
//! | `DELETE` | `/hanja/{id}` | 204, or 404 if not found |
//! | `GET`    | `/hanja/chapter/{n}` | One chapter, same envelope |
//!
//! The wire schema renames `stroke_order` to `strokeOrder`; the mapping is
//! explicit via [`CharacterRepr`] rather than reusing the domain type.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use hanja_core::{
  character::{Character, CharacterPatch, Example, ExampleInput, NewCharacter},
  store::HanjaStore,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ─── Wire types ──────────────────────────────────────────────────────────────

/// A character as serialized on the wire (camelCase `strokeOrder`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRepr {
  pub id:           String,
  pub character:    String,
  pub sound:        String,
  pub meaning:      String,
  pub stroke_order: Vec<String>,
  pub examples:     Vec<Example>,
  pub chapter:      i64,
  pub difficulty:   i64,
}

impl From<Character> for CharacterRepr {
  fn from(c: Character) -> Self {
    Self {
      id:           c.id,
      character:    c.character,
      sound:        c.sound,
      meaning:      c.meaning,
      stroke_order: c.stroke_order,
      examples:     c.examples,
      chapter:      c.chapter,
      difficulty:   c.difficulty,
    }
  }
}

/// Envelope for list responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct HanjaListResponse {
  pub hanja: Vec<CharacterRepr>,
}

/// JSON body accepted by `POST /hanja`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
  /// Omit to let the store derive the next numeric id.
  pub id:           Option<String>,
  pub character:    String,
  pub sound:        String,
  pub meaning:      String,
  #[serde(default)]
  pub stroke_order: Vec<String>,
  #[serde(default)]
  pub examples:     Vec<ExampleInput>,
  pub chapter:      i64,
  #[serde(default = "default_difficulty")]
  pub difficulty:   i64,
}

fn default_difficulty() -> i64 { 2 }

impl From<CreateBody> for NewCharacter {
  fn from(b: CreateBody) -> Self {
    NewCharacter {
      id:           b.id,
      character:    b.character,
      sound:        b.sound,
      meaning:      b.meaning,
      stroke_order: b.stroke_order,
      examples:     b.examples,
      chapter:      b.chapter,
      difficulty:   b.difficulty,
    }
  }
}

/// JSON body accepted by `PUT /hanja/{id}` — every field optional; an
/// omitted (or `null`) field is left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBody {
  pub character:    Option<String>,
  pub sound:        Option<String>,
  pub meaning:      Option<String>,
  pub stroke_order: Option<Vec<String>>,
  pub examples:     Option<Vec<ExampleInput>>,
  pub chapter:      Option<i64>,
  pub difficulty:   Option<i64>,
}

impl From<UpdateBody> for CharacterPatch {
  fn from(b: UpdateBody) -> Self {
    CharacterPatch {
      character:    b.character,
      sound:        b.sound,
      meaning:      b.meaning,
      stroke_order: b.stroke_order,
      examples:     b.examples,
      chapter:      b.chapter,
      difficulty:   b.difficulty,
    }
  }
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /hanja`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<HanjaListResponse>, ApiError>
where
  S: HanjaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let characters = store
    .list_characters()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(HanjaListResponse {
    hanja: characters.into_iter().map(CharacterRepr::from).collect(),
  }))
}

/// `GET /hanja/chapter/{chapter}`
pub async fn list_by_chapter<S>(
  State(store): State<Arc<S>>,
  Path(chapter): Path<i64>,
) -> Result<Json<HanjaListResponse>, ApiError>
where
  S: HanjaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let characters = store
    .list_characters_by_chapter(chapter)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(HanjaListResponse {
    hanja: characters.into_iter().map(CharacterRepr::from).collect(),
  }))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /hanja/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<CharacterRepr>, ApiError>
where
  S: HanjaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let character = store
    .get_character(&id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("character {id} not found")))?;
  Ok(Json(character.into()))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /hanja` — returns 201 + the stored record.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: HanjaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let character = store
    .create_character(NewCharacter::from(body))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(CharacterRepr::from(character))))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PUT /hanja/{id}` — partial update; only supplied fields change.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<CharacterRepr>, ApiError>
where
  S: HanjaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let character = store
    .update_character(&id, CharacterPatch::from(body))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("character {id} not found")))?;
  Ok(Json(character.into()))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /hanja/{id}` — 204 on success, 404 when nothing existed.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: HanjaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deleted = store
    .delete_character(&id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if deleted {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("character {id} not found")))
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
