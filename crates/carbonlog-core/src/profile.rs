//! Per-user display profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
  pub owner:      Uuid,
  pub full_name:  Option<String>,
  pub avatar_url: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Input to [`crate::store::FootprintStore::upsert_profile`]. Fields replace
/// the stored values wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
  pub full_name:  Option<String>,
  pub avatar_url: Option<String>,
}
