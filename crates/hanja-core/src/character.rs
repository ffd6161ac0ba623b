//! Character types — the catalog entries of the Hanja study backend.
//!
//! A character's identity is a caller-visible string id, assigned either
//! explicitly or by scanning existing numeric ids and taking max-plus-one.
//! Mutations are partial: a patch changes exactly the fields it carries.

use serde::{Deserialize, Serialize};

// ─── Examples ────────────────────────────────────────────────────────────────

/// A usage example attached to a character: an idiom or short sentence and
/// its meaning. Both fields are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
  pub sentence: String,
  pub meaning:  String,
}

/// An example as accepted on the write path.
///
/// Callers may send either the structured object form or a raw
/// `[sentence, meaning]` pair; both normalize to [`Example`] before storage.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExampleInput {
  Structured(Example),
  Pair([String; 2]),
}

impl ExampleInput {
  pub fn normalize(self) -> Example {
    match self {
      Self::Structured(example) => example,
      Self::Pair([sentence, meaning]) => Example { sentence, meaning },
    }
  }
}

impl From<Example> for ExampleInput {
  fn from(example: Example) -> Self { Self::Structured(example) }
}

/// Normalize a batch of write-path examples.
pub fn normalize_examples(inputs: Vec<ExampleInput>) -> Vec<Example> {
  inputs.into_iter().map(ExampleInput::normalize).collect()
}

// ─── Character ───────────────────────────────────────────────────────────────

/// A single catalog entry: one Hanja with pronunciation, meaning, and usage
/// examples, grouped into an integer chapter with an integer difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
  pub id:           String,
  pub character:    String,
  pub sound:        String,
  pub meaning:      String,
  /// Ordered stroke-order illustration steps; may be empty.
  pub stroke_order: Vec<String>,
  pub examples:     Vec<Example>,
  pub chapter:      i64,
  pub difficulty:   i64,
}

/// Input for creating a character. With `id` unset the store derives the
/// next numeric id (see [`next_numeric_id`]).
#[derive(Debug, Clone)]
pub struct NewCharacter {
  pub id:           Option<String>,
  pub character:    String,
  pub sound:        String,
  pub meaning:      String,
  pub stroke_order: Vec<String>,
  pub examples:     Vec<ExampleInput>,
  pub chapter:      i64,
  pub difficulty:   i64,
}

// ─── Partial update ──────────────────────────────────────────────────────────

/// A partial update: `None` leaves the field untouched, `Some` overwrites it.
///
/// An empty string or empty list is a real value and DOES overwrite — the
/// absent/present distinction lives entirely in the `Option`.
#[derive(Debug, Clone, Default)]
pub struct CharacterPatch {
  pub character:    Option<String>,
  pub sound:        Option<String>,
  pub meaning:      Option<String>,
  pub stroke_order: Option<Vec<String>>,
  pub examples:     Option<Vec<ExampleInput>>,
  pub chapter:      Option<i64>,
  pub difficulty:   Option<i64>,
}

impl CharacterPatch {
  /// Apply this patch to `target`, overwriting exactly the supplied fields.
  pub fn apply(self, target: &mut Character) {
    if let Some(character) = self.character {
      target.character = character;
    }
    if let Some(sound) = self.sound {
      target.sound = sound;
    }
    if let Some(meaning) = self.meaning {
      target.meaning = meaning;
    }
    if let Some(stroke_order) = self.stroke_order {
      target.stroke_order = stroke_order;
    }
    if let Some(examples) = self.examples {
      target.examples = normalize_examples(examples);
    }
    if let Some(chapter) = self.chapter {
      target.chapter = chapter;
    }
    if let Some(difficulty) = self.difficulty {
      target.difficulty = difficulty;
    }
  }
}

// ─── Id derivation ───────────────────────────────────────────────────────────

/// Derive the next character id from the set of existing ids.
///
/// Numeric-looking ids are parsed, the maximum is incremented; non-numeric
/// ids are ignored. With no numeric ids at all the sequence starts at `"1"`.
pub fn next_numeric_id<'a>(ids: impl IntoIterator<Item = &'a str>) -> String {
  ids
    .into_iter()
    .filter_map(|id| id.parse::<u64>().ok())
    .max()
    .map_or_else(|| "1".to_string(), |max| (max + 1).to_string())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
