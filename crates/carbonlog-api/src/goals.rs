//! Handlers for `/goals` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/goals` | Caller's goals, newest first |
//! | `POST`  | `/goals` | Body: [`GoalInput`]; returns 201 + stored goal |
//! | `PATCH` | `/goals/:id` | Body: `{"status":"completed"}` |

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use carbonlog_core::{
  goal::{Goal, GoalInput, GoalStatus, NewGoal},
  store::FootprintStore,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiState, error::ApiError, owner::Owner};

/// A goal together with its derived progress.
#[derive(Debug, Serialize)]
pub struct GoalView {
  #[serde(flatten)]
  pub goal:             Goal,
  pub progress_percent: f64,
}

impl From<Goal> for GoalView {
  fn from(goal: Goal) -> Self {
    let progress_percent = goal.progress_percent();
    GoalView { goal, progress_percent }
  }
}

/// `GET /goals`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Owner(owner): Owner,
) -> Result<Json<Vec<GoalView>>, ApiError>
where
  S: FootprintStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let goals = state.store.list_goals(owner).await.map_err(ApiError::store)?;
  Ok(Json(goals.into_iter().map(GoalView::from).collect()))
}

/// `POST /goals`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Owner(owner): Owner,
  body: Result<Json<GoalInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FootprintStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Json(input) = body?;
  let new_goal = NewGoal::from_input(owner, input, Utc::now().date_naive())?;
  let goal = state.store.create_goal(new_goal).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(GoalView::from(goal))))
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub status: GoalStatus,
}

/// `PATCH /goals/:id`
pub async fn set_status<S>(
  State(state): State<ApiState<S>>,
  Owner(owner): Owner,
  id: Result<Path<Uuid>, PathRejection>,
  body: Result<Json<StatusBody>, JsonRejection>,
) -> Result<Json<GoalView>, ApiError>
where
  S: FootprintStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Path(id) = id?;
  let Json(body) = body?;
  let goal = state
    .store
    .set_goal_status(owner, id, body.status)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("goal {id} not found")))?;
  Ok(Json(GoalView::from(goal)))
}
