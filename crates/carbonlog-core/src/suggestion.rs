//! Reduction tips from the shared catalogue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
  pub suggestion_id:       Uuid,
  pub category:            String,
  pub title:               String,
  pub description:         String,
  /// kg CO₂e per year.
  pub potential_reduction: f64,
  pub difficulty:          Difficulty,
  pub created_at:          DateTime<Utc>,
}

/// Parameters for [`crate::store::FootprintStore::list_suggestions`].
/// Results are always ordered by `potential_reduction`, largest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestionQuery {
  pub category: Option<String>,
  pub limit:    Option<usize>,
}
