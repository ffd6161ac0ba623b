//! JSON REST API for the Hanja study backend.
//!
//! Exposes an axum [`Router`] backed by any [`hanja_core::store::HanjaStore`].
//! CORS, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", hanja_api::api_router(store.clone()))
//! ```

pub mod characters;
pub mod error;
pub mod progress;

use std::sync::Arc;

use axum::{
  Router,
  routing::get,
};
use hanja_core::{progress::Activity, store::HanjaStore};

pub use error::ApiError;
use progress::ProgressState;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type. The study and practice prefixes share one handler
/// set, differing only in the [`Activity`] carried in their router state.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: HanjaStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Character catalog
    .route("/hanja", get(characters::list::<S>).post(characters::create::<S>))
    .route(
      "/hanja/{id}",
      get(characters::get_one::<S>)
        .put(characters::update_one::<S>)
        .delete(characters::delete_one::<S>),
    )
    .route("/hanja/chapter/{chapter}", get(characters::list_by_chapter::<S>))
    .with_state(store.clone())
    // Progress
    .nest(
      "/study-progress",
      progress::router(ProgressState::new(store.clone(), Activity::Study)),
    )
    .nest(
      "/practice-progress",
      progress::router(ProgressState::new(store, Activity::Practice)),
    )
}
