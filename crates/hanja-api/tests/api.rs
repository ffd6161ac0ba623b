//! Integration tests for the JSON API against an in-memory store.
//!
//! Each test builds its own router and drives it with `tower::oneshot`,
//! asserting on status codes and response bodies.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode},
};
use hanja_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt;

// ─── Helpers ─────────────────────────────────────────────────────────────────

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.expect("in-memory store");
  Router::new().nest("/api", hanja_api::api_router(Arc::new(store)))
}

fn get(uri: &str) -> Request<Body> {
  Request::get(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
  Request::delete(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
  Request::post(uri)
    .header("content-type", "application/json")
    .body(Body::from(body.to_string()))
    .unwrap()
}

fn put_json(uri: &str, body: &Value) -> Request<Body> {
  Request::builder()
    .method("PUT")
    .uri(uri)
    .header("content-type", "application/json")
    .body(Body::from(body.to_string()))
    .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
  let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
    .await
    .unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

fn character_body() -> Value {
  json!({
    "character": "一",
    "sound": "일",
    "meaning": "하나",
    "strokeOrder": ["h"],
    "examples": [{"sentence": "一見", "meaning": "한 번 봄"}],
    "chapter": 1,
    "difficulty": 1
  })
}

// ─── Characters ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_get_roundtrip() {
  let app = app().await;

  let resp = app
    .clone()
    .oneshot(post_json("/api/hanja", &character_body()))
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::CREATED);
  let created = body_json(resp).await;
  assert_eq!(created["id"], "1");
  assert_eq!(created["strokeOrder"], json!(["h"]));
  // The snake_case spelling never leaks onto the wire.
  assert!(created.get("stroke_order").is_none());

  let resp = app.oneshot(get("/api/hanja/1")).await.unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(body_json(resp).await, created);
}

#[tokio::test]
async fn get_missing_character_is_404() {
  let app = app().await;
  let resp = app.oneshot(get("/api/hanja/404")).await.unwrap();
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_wraps_catalog_in_envelope() {
  let app = app().await;

  let mut second = character_body();
  second["chapter"] = json!(2);
  app
    .clone()
    .oneshot(post_json("/api/hanja", &second))
    .await
    .unwrap();
  app
    .clone()
    .oneshot(post_json("/api/hanja", &character_body()))
    .await
    .unwrap();

  let resp = app.oneshot(get("/api/hanja")).await.unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  let body = body_json(resp).await;
  let list = body["hanja"].as_array().unwrap();
  assert_eq!(list.len(), 2);
  // Chapter 1 sorts ahead of chapter 2 regardless of insertion order.
  assert_eq!(list[0]["chapter"], 1);
  assert_eq!(list[1]["chapter"], 2);
}

#[tokio::test]
async fn list_by_chapter_filters() {
  let app = app().await;
  let mut second = character_body();
  second["chapter"] = json!(2);
  app
    .clone()
    .oneshot(post_json("/api/hanja", &character_body()))
    .await
    .unwrap();
  app
    .clone()
    .oneshot(post_json("/api/hanja", &second))
    .await
    .unwrap();

  let resp = app
    .clone()
    .oneshot(get("/api/hanja/chapter/2"))
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  let body = body_json(resp).await;
  assert_eq!(body["hanja"].as_array().unwrap().len(), 1);

  let resp = app.oneshot(get("/api/hanja/chapter/9")).await.unwrap();
  let body = body_json(resp).await;
  assert!(body["hanja"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_accepts_pair_form_examples() {
  let app = app().await;
  let mut body = character_body();
  body["examples"] = json!([["一石二鳥", "일석이조"]]);

  let resp = app
    .oneshot(post_json("/api/hanja", &body))
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::CREATED);
  let created = body_json(resp).await;
  assert_eq!(
    created["examples"],
    json!([{"sentence": "一石二鳥", "meaning": "일석이조"}])
  );
}

#[tokio::test]
async fn put_applies_partial_update() {
  let app = app().await;
  app
    .clone()
    .oneshot(post_json("/api/hanja", &character_body()))
    .await
    .unwrap();

  let resp = app
    .clone()
    .oneshot(put_json("/api/hanja/1", &json!({"meaning": "새 뜻"})))
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  let updated = body_json(resp).await;
  assert_eq!(updated["meaning"], "새 뜻");
  assert_eq!(updated["character"], "一");
  assert_eq!(updated["sound"], "일");
  assert_eq!(updated["strokeOrder"], json!(["h"]));
  assert_eq!(updated["chapter"], 1);
}

#[tokio::test]
async fn put_missing_character_is_404() {
  let app = app().await;
  let resp = app
    .oneshot(put_json("/api/hanja/404", &json!({"meaning": "새 뜻"})))
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_returns_204_then_404() {
  let app = app().await;
  app
    .clone()
    .oneshot(post_json("/api/hanja", &character_body()))
    .await
    .unwrap();

  let resp = app.clone().oneshot(delete("/api/hanja/1")).await.unwrap();
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);

  let resp = app.oneshot(delete("/api/hanja/1")).await.unwrap();
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ─── Progress ────────────────────────────────────────────────────────────────

fn progress_body(user: &str, hanja: &str, known: bool) -> Value {
  json!({
    "user_id": user,
    "hanja_id": hanja,
    "chapter": 1,
    "is_known": known
  })
}

#[tokio::test]
async fn post_progress_upserts() {
  let app = app().await;

  let resp = app
    .clone()
    .oneshot(post_json("/api/study-progress", &progress_body("u1", "3", false)))
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::CREATED);
  let created = body_json(resp).await;
  assert_eq!(created, progress_body("u1", "3", false));

  // Second post for the same key overwrites rather than duplicating.
  app
    .clone()
    .oneshot(post_json("/api/study-progress", &progress_body("u1", "3", true)))
    .await
    .unwrap();

  let resp = app.oneshot(get("/api/study-progress/u1")).await.unwrap();
  let list = body_json(resp).await;
  let list = list.as_array().unwrap();
  assert_eq!(list.len(), 1);
  assert_eq!(list[0]["is_known"], true);
}

#[tokio::test]
async fn get_progress_record_and_chapter_listing() {
  let app = app().await;
  app
    .clone()
    .oneshot(post_json("/api/study-progress", &progress_body("u1", "3", true)))
    .await
    .unwrap();

  let resp = app
    .clone()
    .oneshot(get("/api/study-progress/u1/hanja/3"))
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::OK);

  let resp = app
    .clone()
    .oneshot(get("/api/study-progress/u1/chapter/1"))
    .await
    .unwrap();
  let list = body_json(resp).await;
  assert_eq!(list.as_array().unwrap().len(), 1);

  let resp = app
    .oneshot(get("/api/study-progress/u1/hanja/404"))
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_progress_requires_matching_identity() {
  let app = app().await;

  // Body names u2 while the path names u1: rejected before any write.
  let resp = app
    .clone()
    .oneshot(put_json(
      "/api/study-progress/u1/hanja/h1",
      &progress_body("u2", "h1", true),
    ))
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  // No row appeared for either identity.
  for user in ["u1", "u2"] {
    let resp = app
      .clone()
      .oneshot(get(&format!("/api/study-progress/{user}")))
      .await
      .unwrap();
    let list = body_json(resp).await;
    assert!(list.as_array().unwrap().is_empty());
  }
}

#[tokio::test]
async fn put_progress_upserts_on_match() {
  let app = app().await;

  let resp = app
    .clone()
    .oneshot(put_json(
      "/api/study-progress/u1/hanja/3",
      &progress_body("u1", "3", false),
    ))
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::OK);

  let resp = app
    .clone()
    .oneshot(put_json(
      "/api/study-progress/u1/hanja/3",
      &progress_body("u1", "3", true),
    ))
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  let updated = body_json(resp).await;
  assert_eq!(updated["is_known"], true);
}

#[tokio::test]
async fn practice_progress_is_separate_from_study() {
  let app = app().await;
  app
    .clone()
    .oneshot(post_json(
      "/api/practice-progress",
      &progress_body("u1", "3", true),
    ))
    .await
    .unwrap();

  let resp = app
    .clone()
    .oneshot(get("/api/practice-progress/u1"))
    .await
    .unwrap();
  assert_eq!(body_json(resp).await.as_array().unwrap().len(), 1);

  let resp = app.oneshot(get("/api/study-progress/u1")).await.unwrap();
  assert!(body_json(resp).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn delete_progress_returns_204_then_404() {
  let app = app().await;
  app
    .clone()
    .oneshot(post_json("/api/study-progress", &progress_body("u1", "3", true)))
    .await
    .unwrap();

  let resp = app
    .clone()
    .oneshot(delete("/api/study-progress/u1/hanja/3"))
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);

  let resp = app
    .oneshot(delete("/api/study-progress/u1/hanja/3"))
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
