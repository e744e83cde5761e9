//! Handlers for `/profile`.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use carbonlog_core::{
  profile::{Profile, ProfileUpdate},
  store::FootprintStore,
};

use crate::{ApiState, error::ApiError, owner::Owner};

/// `GET /profile`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Owner(owner): Owner,
) -> Result<Json<Profile>, ApiError>
where
  S: FootprintStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let profile = state
    .store
    .get_profile(owner)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("profile not found".to_owned()))?;
  Ok(Json(profile))
}

/// `PUT /profile` — body: `{"full_name": ..., "avatar_url": ...}`.
pub async fn upsert<S>(
  State(state): State<ApiState<S>>,
  Owner(owner): Owner,
  body: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<Profile>, ApiError>
where
  S: FootprintStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Json(update) = body?;
  let profile = state
    .store
    .upsert_profile(owner, update)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(profile))
}
