//! HTTP server for carbonlog.
//!
//! Mounts the JSON API from [`carbonlog_api`] under `/api` over a
//! [`SqliteStore`], plus a health check.

use std::{path::PathBuf, sync::Arc};

use axum::{Json, Router, routing::get};
use carbonlog_core::stats::WeekStart;
use carbonlog_store_sqlite::SqliteStore;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CARBONLOG_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  pub week_start: WeekStart,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_owned(),
      port:       5000,
      store_path: PathBuf::from("carbonlog.db"),
      week_start: WeekStart::Sunday,
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn router(store: Arc<SqliteStore>, config: &ServerConfig) -> Router {
  let api = carbonlog_api::api_router(store, config.week_start)
    .route("/health", get(health));

  Router::new()
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

/// `GET /api/health`
async fn health() -> Json<Value> { Json(json!({ "status": "ok", "database": "sqlite" })) }

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use tower::ServiceExt as _;
  use uuid::Uuid;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    router(Arc::new(store), &ServerConfig::default())
  }

  async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  #[test]
  fn defaults_match_documented_values() {
    let cfg = ServerConfig::default();
    assert_eq!(cfg.address(), "127.0.0.1:5000");
    assert_eq!(cfg.store_path, PathBuf::from("carbonlog.db"));
    assert_eq!(cfg.week_start, WeekStart::Sunday);
  }

  #[test]
  fn partial_config_keeps_defaults() {
    let settings = config::Config::builder()
      .set_override("port", 8080)
      .unwrap()
      .set_override("week_start", "monday")
      .unwrap()
      .build()
      .unwrap();
    let cfg: ServerConfig = settings.try_deserialize().unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.week_start, WeekStart::Monday);
  }

  #[tokio::test]
  async fn health_reports_ok() {
    let req = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
    let resp = app().await.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "sqlite");
  }

  #[tokio::test]
  async fn api_is_nested() {
    let req = Request::builder()
      .uri("/api/activities")
      .header("x-user-id", Uuid::new_v4().to_string())
      .body(Body::empty())
      .unwrap();
    let resp = app().await.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!([]));
  }

  #[tokio::test]
  async fn unknown_route_is_404() {
    let req = Request::builder().uri("/activities").body(Body::empty()).unwrap();
    let resp = app().await.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
