//! Handlers for `/activities` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/activities` | Optional `category`, `from`, `to`, `limit`, `offset` |
//! | `GET`    | `/activities/:id` | Single activity |
//! | `POST`   | `/activities` | Body: [`ActivityInput`]; returns 201 + stamped activity |
//! | `DELETE` | `/activities/:id` | 204 on success |

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use carbonlog_core::{
  activity::{Activity, ActivityInput, NewActivity},
  store::{ActivityQuery, FootprintStore},
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError, owner::Owner};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  pub category: Option<String>,
  /// Inclusive, `YYYY-MM-DD`.
  pub from:     Option<NaiveDate>,
  /// Inclusive, `YYYY-MM-DD`.
  pub to:       Option<NaiveDate>,
  pub limit:    Option<usize>,
  pub offset:   Option<usize>,
}

impl From<ListParams> for ActivityQuery {
  fn from(p: ListParams) -> Self {
    ActivityQuery {
      category: p.category,
      from:     p.from,
      to:       p.to,
      limit:    p.limit,
      offset:   p.offset,
    }
  }
}

/// `GET /activities[?category=...][&from=...][&to=...][&limit=...][&offset=...]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Owner(owner): Owner,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Activity>>, ApiError>
where
  S: FootprintStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Query(params) = params?;
  let query = ActivityQuery::from(params);
  let activities = state
    .store
    .list_activities(owner, &query)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(activities))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /activities/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Owner(owner): Owner,
  id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Activity>, ApiError>
where
  S: FootprintStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Path(id) = id?;
  let activity = state
    .store
    .get_activity(owner, id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("activity {id} not found")))?;
  Ok(Json(activity))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /activities` — stamps unit and footprint, returns 201 + the stored
/// [`Activity`].
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Owner(owner): Owner,
  body: Result<Json<ActivityInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FootprintStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Json(input) = body?;
  let stamped = NewActivity::stamp(owner, input)?;
  let activity = state
    .store
    .record_activity(stamped)
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(activity)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /activities/:id`
pub async fn delete_one<S>(
  State(state): State<ApiState<S>>,
  Owner(owner): Owner,
  id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
  S: FootprintStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Path(id) = id?;
  let deleted = state
    .store
    .delete_activity(owner, id)
    .await
    .map_err(ApiError::store)?;
  if !deleted {
    return Err(ApiError::NotFound(format!("activity {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}
