//! Core types and trait definitions for the Hanja study backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod character;
pub mod progress;
pub mod store;

pub use character::{Character, CharacterPatch, Example, ExampleInput, NewCharacter};
pub use progress::{Activity, ProgressRecord, ProgressUpsert};
