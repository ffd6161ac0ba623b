//! [`SqliteStore`] — the SQLite implementation of [`HanjaStore`].

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use hanja_core::{
  character::{Character, CharacterPatch, NewCharacter, next_numeric_id, normalize_examples},
  progress::{Activity, ProgressRecord, ProgressUpsert},
  store::HanjaStore,
};

use crate::{
  Error, Result,
  encode::{
    RawCharacter, RawProgress, encode_dt, encode_examples, encode_string_list,
    progress_table,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Hanja study store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Every
/// operation ships one closure to the connection thread and holds no state
/// between calls.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  ///
  /// With a non-default `partition` name the store lives in a sibling
  /// database file named after the partition; failure to create or open it
  /// is fatal and reported with operator guidance.
  pub async fn open(
    path: impl AsRef<Path>,
    partition: Option<&str>,
  ) -> Result<Self> {
    let conn = match partition_file(path.as_ref(), partition)? {
      Some(partition_path) => {
        if let Some(dir) = partition_path.parent().filter(|d| !d.as_os_str().is_empty()) {
          std::fs::create_dir_all(dir).map_err(|e| Error::Partition {
            path:   partition_path.clone(),
            reason: e.to_string(),
          })?;
        }
        tokio_rusqlite::Connection::open(&partition_path)
          .await
          .map_err(|e| Error::Partition {
            path:   partition_path,
            reason: e.to_string(),
          })?
      }
      None => tokio_rusqlite::Connection::open(path.as_ref()).await?,
    };

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

  /// Number of rows in the character catalog; drives the seed-loader's
  /// populated check.
  pub(crate) async fn character_count(&self) -> Result<i64> {
    let count = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM characters", [], |row| row.get(0))?)
      })
      .await?;
    Ok(count)
  }
}

/// Resolve a non-default partition name to its database file next to the
/// configured store path. `None` means the default partition (the store
/// path itself).
fn partition_file(path: &Path, partition: Option<&str>) -> Result<Option<PathBuf>> {
  let Some(name) = partition.filter(|name| *name != "main") else {
    return Ok(None);
  };
  if name.is_empty()
    || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
  {
    return Err(Error::Partition {
      path:   path.to_path_buf(),
      reason: format!("invalid partition name {name:?}"),
    });
  }
  Ok(Some(path.with_file_name(format!("{name}.db"))))
}

// ─── HanjaStore impl ─────────────────────────────────────────────────────────

impl HanjaStore for SqliteStore {
  type Error = Error;

  // ── Character catalog ─────────────────────────────────────────────────────

  async fn list_characters(&self) -> Result<Vec<Character>> {
    let raws: Vec<RawCharacter> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, character, sound, meaning, stroke_order, examples,
                  chapter, difficulty
           FROM characters
           ORDER BY chapter, id",
        )?;
        let rows = stmt
          .query_map([], RawCharacter::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCharacter::into_character).collect()
  }

  async fn get_character<'a>(&'a self, id: &'a str) -> Result<Option<Character>> {
    let id_str = id.to_owned();

    let raw: Option<RawCharacter> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, character, sound, meaning, stroke_order, examples,
                      chapter, difficulty
               FROM characters WHERE id = ?1",
              rusqlite::params![id_str],
              RawCharacter::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCharacter::into_character).transpose()
  }

  async fn list_characters_by_chapter(&self, chapter: i64) -> Result<Vec<Character>> {
    let raws: Vec<RawCharacter> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, character, sound, meaning, stroke_order, examples,
                  chapter, difficulty
           FROM characters WHERE chapter = ?1
           ORDER BY id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![chapter], RawCharacter::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCharacter::into_character).collect()
  }

  async fn create_character(&self, input: NewCharacter) -> Result<Character> {
    let examples          = normalize_examples(input.examples);
    let stroke_order_json = encode_string_list(&input.stroke_order)?;
    let examples_json     = encode_examples(&examples)?;

    let explicit_id   = input.id;
    let character_str = input.character.clone();
    let sound_str     = input.sound.clone();
    let meaning_str   = input.meaning.clone();
    let chapter       = input.chapter;
    let difficulty    = input.difficulty;

    let id = self
      .conn
      .call(move |conn| {
        // Derive the id inside the same call as the insert, so the scan and
        // the write share the connection's statement ordering.
        let id = match explicit_id {
          Some(id) => id,
          None => {
            let mut stmt = conn.prepare("SELECT id FROM characters")?;
            let ids = stmt
              .query_map([], |row| row.get::<_, String>(0))?
              .collect::<rusqlite::Result<Vec<_>>>()?;
            next_numeric_id(ids.iter().map(String::as_str))
          }
        };

        conn.execute(
          "INSERT INTO characters (id, character, sound, meaning,
                                   stroke_order, examples, chapter, difficulty)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id,
            character_str,
            sound_str,
            meaning_str,
            stroke_order_json,
            examples_json,
            chapter,
            difficulty,
          ],
        )?;
        Ok(id)
      })
      .await?;

    Ok(Character {
      id,
      character: input.character,
      sound: input.sound,
      meaning: input.meaning,
      stroke_order: input.stroke_order,
      examples,
      chapter: input.chapter,
      difficulty: input.difficulty,
    })
  }

  async fn update_character<'a>(
    &'a self,
    id: &'a str,
    patch: CharacterPatch,
  ) -> Result<Option<Character>> {
    let mut updated = match self.get_character(id).await? {
      Some(character) => character,
      None => return Ok(None),
    };
    patch.apply(&mut updated);

    let stroke_order_json = encode_string_list(&updated.stroke_order)?;
    let examples_json     = encode_examples(&updated.examples)?;

    let id_str        = updated.id.clone();
    let character_str = updated.character.clone();
    let sound_str     = updated.sound.clone();
    let meaning_str   = updated.meaning.clone();
    let chapter       = updated.chapter;
    let difficulty    = updated.difficulty;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE characters
           SET character = ?2, sound = ?3, meaning = ?4,
               stroke_order = ?5, examples = ?6, chapter = ?7, difficulty = ?8
           WHERE id = ?1",
          rusqlite::params![
            id_str,
            character_str,
            sound_str,
            meaning_str,
            stroke_order_json,
            examples_json,
            chapter,
            difficulty,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(Some(updated))
  }

  async fn delete_character<'a>(&'a self, id: &'a str) -> Result<bool> {
    let id_str = id.to_owned();

    let deleted = self
      .conn
      .call(move |conn| {
        let rows = conn.execute(
          "DELETE FROM characters WHERE id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(rows > 0)
      })
      .await?;

    Ok(deleted)
  }

  // ── Progress (study / practice) ───────────────────────────────────────────

  async fn get_progress<'a>(
    &'a self,
    activity: Activity,
    user_id: &'a str,
    hanja_id: &'a str,
  ) -> Result<Option<ProgressRecord>> {
    let sql = format!(
      "SELECT user_id, hanja_id, chapter, is_known, created_at, updated_at
       FROM {} WHERE user_id = ?1 AND hanja_id = ?2",
      progress_table(activity)
    );
    let user  = user_id.to_owned();
    let hanja = hanja_id.to_owned();

    let raw: Option<RawProgress> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![user, hanja], RawProgress::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawProgress::into_progress).transpose()
  }

  async fn list_progress_by_user<'a>(
    &'a self,
    activity: Activity,
    user_id: &'a str,
  ) -> Result<Vec<ProgressRecord>> {
    let sql = format!(
      "SELECT user_id, hanja_id, chapter, is_known, created_at, updated_at
       FROM {} WHERE user_id = ?1",
      progress_table(activity)
    );
    let user = user_id.to_owned();

    let raws: Vec<RawProgress> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![user], RawProgress::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProgress::into_progress).collect()
  }

  async fn list_progress_by_user_and_chapter<'a>(
    &'a self,
    activity: Activity,
    user_id: &'a str,
    chapter: i64,
  ) -> Result<Vec<ProgressRecord>> {
    let sql = format!(
      "SELECT user_id, hanja_id, chapter, is_known, created_at, updated_at
       FROM {} WHERE user_id = ?1 AND chapter = ?2",
      progress_table(activity)
    );
    let user = user_id.to_owned();

    let raws: Vec<RawProgress> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![user, chapter], RawProgress::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProgress::into_progress).collect()
  }

  async fn upsert_progress(
    &self,
    activity: Activity,
    input: ProgressUpsert,
  ) -> Result<ProgressRecord> {
    let table = progress_table(activity);
    // Single-statement upsert: the unique (user_id, hanja_id) index resolves
    // concurrent writers to last-write-wins instead of a constraint failure.
    // created_at survives the conflict path; updated_at is refreshed.
    let upsert_sql = format!(
      "INSERT INTO {table} (user_id, hanja_id, chapter, is_known,
                            created_at, updated_at)
       VALUES (?1, ?2, ?3, ?4, ?5, ?5)
       ON CONFLICT (user_id, hanja_id) DO UPDATE SET
         chapter    = excluded.chapter,
         is_known   = excluded.is_known,
         updated_at = excluded.updated_at"
    );
    let select_sql = format!(
      "SELECT user_id, hanja_id, chapter, is_known, created_at, updated_at
       FROM {table} WHERE user_id = ?1 AND hanja_id = ?2"
    );
    let now_str = encode_dt(Utc::now());

    let raw: RawProgress = self
      .conn
      .call(move |conn| {
        conn.execute(
          &upsert_sql,
          rusqlite::params![
            input.user_id,
            input.hanja_id,
            input.chapter,
            input.is_known,
            now_str,
          ],
        )?;
        let raw = conn.query_row(
          &select_sql,
          rusqlite::params![input.user_id, input.hanja_id],
          RawProgress::from_row,
        )?;
        Ok(raw)
      })
      .await?;

    raw.into_progress()
  }

  async fn delete_progress<'a>(
    &'a self,
    activity: Activity,
    user_id: &'a str,
    hanja_id: &'a str,
  ) -> Result<bool> {
    let sql = format!(
      "DELETE FROM {} WHERE user_id = ?1 AND hanja_id = ?2",
      progress_table(activity)
    );
    let user  = user_id.to_owned();
    let hanja = hanja_id.to_owned();

    let deleted = self
      .conn
      .call(move |conn| {
        let rows = conn.execute(&sql, rusqlite::params![user, hanja])?;
        Ok(rows > 0)
      })
      .await?;

    Ok(deleted)
  }
}
