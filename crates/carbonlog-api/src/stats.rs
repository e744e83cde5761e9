//! Handler for `GET /stats`.
//!
//! Loads every activity the caller owns and folds them into a
//! [`Dashboard`] relative to `as_of` (today, UTC, when omitted).

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use carbonlog_core::{
  stats::{Dashboard, dashboard},
  store::{ActivityQuery, FootprintStore},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::{ApiState, error::ApiError, owner::Owner};

#[derive(Debug, Deserialize, Default)]
pub struct StatsParams {
  pub as_of: Option<NaiveDate>,
}

/// `GET /stats[?as_of=YYYY-MM-DD]`
pub async fn handler<S>(
  State(state): State<ApiState<S>>,
  Owner(owner): Owner,
  params: Result<Query<StatsParams>, QueryRejection>,
) -> Result<Json<Dashboard>, ApiError>
where
  S: FootprintStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Query(params) = params?;
  let reference = params.as_of.unwrap_or_else(|| Utc::now().date_naive());
  let activities = state
    .store
    .list_activities(owner, &ActivityQuery::default())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(dashboard(&activities, reference, state.week_start)?))
}
