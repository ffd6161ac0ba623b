//! Catalog seed loader.
//!
//! Populates an empty character table with the fixed starter set spanning
//! chapters 1–3. The populated check runs first, so a second run (or a run
//! against an existing catalog, whatever it contains) inserts nothing.

use hanja_core::{
  character::{Example, NewCharacter},
  store::HanjaStore as _,
};

use crate::{Result, store::SqliteStore};

/// Ensure the seed set is present: inserts the starter characters only when
/// the catalog is completely empty. Returns how many records were inserted
/// (zero when the catalog was already populated).
pub async fn ensure_seed(store: &SqliteStore) -> Result<usize> {
  let existing = store.character_count().await?;
  if existing > 0 {
    return Ok(0);
  }

  let records = seed_characters();
  let inserted = records.len();
  for record in records {
    store.create_character(record).await?;
  }
  Ok(inserted)
}

/// The starter catalog: twelve characters over three chapters.
pub fn seed_characters() -> Vec<NewCharacter> {
  SEED
    .iter()
    .map(|&(id, character, sound, meaning, chapter, difficulty, examples)| {
      NewCharacter {
        id: Some(id.to_string()),
        character: character.to_string(),
        sound: sound.to_string(),
        meaning: meaning.to_string(),
        stroke_order: vec![],
        examples: examples
          .iter()
          .map(|&(sentence, meaning)| {
            Example {
              sentence: sentence.to_string(),
              meaning:  meaning.to_string(),
            }
            .into()
          })
          .collect(),
        chapter,
        difficulty,
      }
    })
    .collect()
}

type SeedRow = (
  &'static str,             // id
  &'static str,             // character
  &'static str,             // sound
  &'static str,             // meaning
  i64,                      // chapter
  i64,                      // difficulty
  &'static [(&'static str, &'static str)], // examples
);

#[rustfmt::skip]
const SEED: &[SeedRow] = &[
  ("1",  "一", "일", "하나",
   1, 1, &[("一石二鳥", "한 가지 일로 두 가지 이득을 얻음"), ("一見", "한 번 봄")]),
  ("2",  "二", "이", "둘",
   1, 1, &[("二重", "이중"), ("二月", "이월")]),
  ("3",  "三", "삼", "셋",
   1, 1, &[("三角", "삼각"), ("三月", "삼월")]),
  ("4",  "人", "인", "사람",
   1, 2, &[("人間", "인간"), ("人口", "인구")]),
  ("5",  "大", "대", "큰",
   1, 2, &[("大學", "대학"), ("大小", "크고 작음")]),
  ("6",  "小", "소", "작은",
   1, 2, &[("小學", "소학"), ("大小", "크고 작음")]),
  ("7",  "山", "산", "뫼",
   2, 2, &[("山頂", "산꼭대기"), ("火山", "화산")]),
  ("8",  "水", "수", "물",
   2, 2, &[("水準", "수준"), ("海水", "바닷물")]),
  ("9",  "火", "화", "불",
   2, 2, &[("火災", "화재"), ("火山", "화산")]),
  ("10", "木", "목", "나무",
   2, 2, &[("木造", "목조"), ("樹木", "수목")]),
  ("11", "歌", "가", "노래",
   3, 2, &[("歌手", "가수"), ("詩歌", "시가")]),
  ("12", "家", "가", "집",
   3, 2, &[("家長", "가장"), ("國家", "국가")]),
];
