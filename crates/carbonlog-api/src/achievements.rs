//! Handlers for `/achievements` endpoints.

use axum::{
  Json,
  extract::{Path, State, rejection::PathRejection},
};
use carbonlog_core::{
  achievement::{AchievementStatus, UserAchievement, statuses},
  store::FootprintStore,
};
use uuid::Uuid;

use crate::{ApiState, error::ApiError, owner::Owner};

/// `GET /achievements` — the catalogue with the caller's unlock state.
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Owner(owner): Owner,
) -> Result<Json<Vec<AchievementStatus>>, ApiError>
where
  S: FootprintStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let catalogue = state.store.list_achievements().await.map_err(ApiError::store)?;
  let earned = state
    .store
    .list_user_achievements(owner)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(statuses(catalogue, &earned)))
}

/// `POST /achievements/:id/award` — idempotent.
pub async fn award<S>(
  State(state): State<ApiState<S>>,
  Owner(owner): Owner,
  id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<UserAchievement>, ApiError>
where
  S: FootprintStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Path(id) = id?;
  let known = state
    .store
    .list_achievements()
    .await
    .map_err(ApiError::store)?
    .iter()
    .any(|a| a.achievement_id == id);
  if !known {
    return Err(ApiError::NotFound(format!("achievement {id} not found")));
  }

  let award = state
    .store
    .award_achievement(owner, id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(award))
}
