//! Handlers for `/factors` endpoints. Neither requires an identity.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/factors` | Full emission factor catalogue |
//! | `GET`  | `/factors/estimate` | `?category&subcategory&amount` footprint preview |

use axum::{
  Json,
  extract::{Query, rejection::QueryRejection},
};
use carbonlog_core::{
  calculator::{Estimate, estimate as preview, parse_amount},
  factors::{CategoryEntry, catalogue},
};
use serde::Deserialize;

use crate::error::ApiError;

/// `GET /factors`
pub async fn list() -> Json<Vec<CategoryEntry>> { Json(catalogue()) }

#[derive(Debug, Deserialize)]
pub struct EstimateParams {
  pub category:    String,
  pub subcategory: String,
  /// Raw form input; anything that is not a finite number previews as 0.
  #[serde(default)]
  pub amount:      String,
}

/// `GET /factors/estimate?category=...&subcategory=...&amount=...`
pub async fn estimate(
  params: Result<Query<EstimateParams>, QueryRejection>,
) -> Result<Json<Estimate>, ApiError> {
  let Query(params) = params?;
  let amount = parse_amount(&params.amount);
  Ok(Json(preview(&params.category, &params.subcategory, amount)))
}
