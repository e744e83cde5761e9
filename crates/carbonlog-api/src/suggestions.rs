//! Handler for `GET /suggestions`.

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use carbonlog_core::{
  store::FootprintStore,
  suggestion::{Suggestion, SuggestionQuery},
};

use crate::{ApiState, error::ApiError, owner::Owner};

/// `GET /suggestions[?category=...][&limit=...]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Owner(_owner): Owner,
  query: Result<Query<SuggestionQuery>, QueryRejection>,
) -> Result<Json<Vec<Suggestion>>, ApiError>
where
  S: FootprintStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Query(query) = query?;
  let suggestions = state
    .store
    .list_suggestions(&query)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(suggestions))
}
