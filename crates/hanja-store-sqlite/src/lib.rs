//! SQLite backend for the Hanja study store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! pool without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod error;
pub mod seed;

pub use error::{Error, Result};
pub use seed::ensure_seed;
pub use store::SqliteStore;
