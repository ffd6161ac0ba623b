//! The [`HanjaStore`] trait and supporting types.
//!
//! The trait is implemented by storage backends (e.g. `hanja-store-sqlite`).
//! Higher layers (`hanja-api`, `hanja-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::{
  character::{Character, CharacterPatch, NewCharacter},
  progress::{Activity, ProgressRecord, ProgressUpsert},
};

/// Abstraction over a Hanja study store backend.
///
/// Every method maps to exactly one short-lived store operation; the store
/// holds no state between calls. "Not found" is expressed as `None` (or
/// `false` for deletes) rather than an error — an absent row is an expected
/// outcome, not a failure.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait HanjaStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Character catalog ─────────────────────────────────────────────────

  /// List the full catalog, ordered by (`chapter` ascending, `id`
  /// ascending). The id column is text, so within a chapter the order is
  /// lexicographic.
  fn list_characters(
    &self,
  ) -> impl Future<Output = Result<Vec<Character>, Self::Error>> + Send + '_;

  /// Retrieve a character by id. Returns `None` if not found.
  fn get_character<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Character>, Self::Error>> + Send + 'a;

  /// List characters in one chapter, ordered by `id` ascending.
  fn list_characters_by_chapter(
    &self,
    chapter: i64,
  ) -> impl Future<Output = Result<Vec<Character>, Self::Error>> + Send + '_;

  /// Persist a new character and return the stored record, including a
  /// derived id when the input carried none.
  fn create_character(
    &self,
    input: NewCharacter,
  ) -> impl Future<Output = Result<Character, Self::Error>> + Send + '_;

  /// Apply a partial update. Returns the updated record, or `None` if the
  /// id does not exist.
  fn update_character<'a>(
    &'a self,
    id: &'a str,
    patch: CharacterPatch,
  ) -> impl Future<Output = Result<Option<Character>, Self::Error>> + Send + 'a;

  /// Remove a character. Returns whether a record existed to remove.
  fn delete_character<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  // ── Progress (study / practice) ───────────────────────────────────────

  /// Retrieve one progress record. Returns `None` if not found.
  fn get_progress<'a>(
    &'a self,
    activity: Activity,
    user_id: &'a str,
    hanja_id: &'a str,
  ) -> impl Future<Output = Result<Option<ProgressRecord>, Self::Error>> + Send + 'a;

  /// All progress records for one user, in natural storage order.
  fn list_progress_by_user<'a>(
    &'a self,
    activity: Activity,
    user_id: &'a str,
  ) -> impl Future<Output = Result<Vec<ProgressRecord>, Self::Error>> + Send + 'a;

  /// Progress records for one user restricted to one chapter.
  fn list_progress_by_user_and_chapter<'a>(
    &'a self,
    activity: Activity,
    user_id: &'a str,
    chapter: i64,
  ) -> impl Future<Output = Result<Vec<ProgressRecord>, Self::Error>> + Send + 'a;

  /// Insert-or-overwrite keyed by (`user_id`, `hanja_id`) and return the
  /// stored record. Concurrent upserts for the same key resolve to
  /// last-write-wins.
  fn upsert_progress(
    &self,
    activity: Activity,
    input: ProgressUpsert,
  ) -> impl Future<Output = Result<ProgressRecord, Self::Error>> + Send + '_;

  /// Remove one progress record. Returns whether a record existed.
  fn delete_progress<'a>(
    &'a self,
    activity: Activity,
    user_id: &'a str,
    hanja_id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
