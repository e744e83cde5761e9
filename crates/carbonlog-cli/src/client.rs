//! Async HTTP client wrapping the carbonlog JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use carbonlog_core::{
  activity::{Activity, ActivityInput},
  stats::Dashboard,
  suggestion::Suggestion,
};
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, Response};
use uuid::Uuid;

/// Header the server reads the caller's identity from.
const USER_ID_HEADER: &str = "x-user-id";

/// Connection settings for the carbonlog API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub user:     Option<Uuid>,
}

/// Async HTTP client for the carbonlog JSON REST API.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn identify(&self, req: RequestBuilder) -> Result<RequestBuilder> {
    let user = self
      .config
      .user
      .ok_or_else(|| anyhow!("no user id configured; pass --user or set CARBONLOG_USER"))?;
    Ok(req.header(USER_ID_HEADER, user.to_string()))
  }

  /// Turn a non-2xx response into an error carrying the server's message.
  async fn check(resp: Response, what: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let message = resp
      .json::<serde_json::Value>()
      .await
      .ok()
      .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned))
      .unwrap_or_default();
    Err(anyhow!("{what} → {status} {message}"))
  }

  // ── Activities ────────────────────────────────────────────────────────────

  /// `POST /api/activities`
  pub async fn log_activity(&self, input: &ActivityInput) -> Result<Activity> {
    let resp = self
      .identify(self.client.post(self.url("/activities")))?
      .json(input)
      .send()
      .await
      .context("POST /activities failed")?;
    let resp = Self::check(resp, "POST /activities").await?;
    resp.json().await.context("deserialising activity")
  }

  /// `GET /api/activities[?category=...][&limit=...]`
  pub async fn list_activities(
    &self,
    category: Option<&str>,
    limit: Option<usize>,
  ) -> Result<Vec<Activity>> {
    let mut query: Vec<(&str, String)> = Vec::new();
    if let Some(c) = category {
      query.push(("category", c.to_owned()));
    }
    if let Some(l) = limit {
      query.push(("limit", l.to_string()));
    }

    let resp = self
      .identify(self.client.get(self.url("/activities")))?
      .query(&query)
      .send()
      .await
      .context("GET /activities failed")?;
    let resp = Self::check(resp, "GET /activities").await?;
    resp.json().await.context("deserialising activities")
  }

  /// `DELETE /api/activities/:id`
  pub async fn delete_activity(&self, id: Uuid) -> Result<()> {
    let path = format!("/activities/{id}");
    let resp = self
      .identify(self.client.delete(self.url(&path)))?
      .send()
      .await
      .with_context(|| format!("DELETE {path} failed"))?;
    Self::check(resp, &format!("DELETE {path}")).await?;
    Ok(())
  }

  // ── Stats ─────────────────────────────────────────────────────────────────

  /// `GET /api/stats[?as_of=YYYY-MM-DD]`
  pub async fn dashboard(&self, as_of: Option<NaiveDate>) -> Result<Dashboard> {
    let query: Vec<(&str, String)> = as_of
      .map(|d| ("as_of", d.format("%Y-%m-%d").to_string()))
      .into_iter()
      .collect();

    let resp = self
      .identify(self.client.get(self.url("/stats")))?
      .query(&query)
      .send()
      .await
      .context("GET /stats failed")?;
    let resp = Self::check(resp, "GET /stats").await?;
    resp.json().await.context("deserialising dashboard")
  }

  // ── Suggestions ───────────────────────────────────────────────────────────

  /// `GET /api/suggestions[?category=...][&limit=...]`
  pub async fn suggestions(
    &self,
    category: Option<&str>,
    limit: Option<usize>,
  ) -> Result<Vec<Suggestion>> {
    let mut query: Vec<(&str, String)> = Vec::new();
    if let Some(c) = category {
      query.push(("category", c.to_owned()));
    }
    if let Some(l) = limit {
      query.push(("limit", l.to_string()));
    }

    let resp = self
      .identify(self.client.get(self.url("/suggestions")))?
      .query(&query)
      .send()
      .await
      .context("GET /suggestions failed")?;
    let resp = Self::check(resp, "GET /suggestions").await?;
    resp.json().await.context("deserialising suggestions")
  }
}
