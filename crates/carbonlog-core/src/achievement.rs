//! Achievements and the awards users have earned.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A badge from the shared catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
  pub achievement_id:    Uuid,
  pub name:              String,
  pub description:       String,
  pub icon:              String,
  /// What the requirement counts, e.g. `"activities_logged"`.
  pub requirement_type:  String,
  pub requirement_value: f64,
  pub points:            i64,
  pub created_at:        DateTime<Utc>,
}

/// Records that a user earned an achievement. At most one per pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAchievement {
  pub user_achievement_id: Uuid,
  pub owner:               Uuid,
  pub achievement_id:      Uuid,
  pub earned_at:           DateTime<Utc>,
}

/// A catalogue entry together with the caller's unlock state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementStatus {
  pub achievement: Achievement,
  /// `Some` iff unlocked.
  pub earned_at:   Option<DateTime<Utc>>,
}

impl AchievementStatus {
  pub fn is_unlocked(&self) -> bool { self.earned_at.is_some() }
}

/// Join the catalogue with a user's awards, keeping catalogue order.
pub fn statuses(
  achievements: Vec<Achievement>,
  earned: &[UserAchievement],
) -> Vec<AchievementStatus> {
  let earned: HashMap<Uuid, DateTime<Utc>> = earned
    .iter()
    .map(|ua| (ua.achievement_id, ua.earned_at))
    .collect();

  achievements
    .into_iter()
    .map(|achievement| AchievementStatus {
      earned_at: earned.get(&achievement.achievement_id).copied(),
      achievement,
    })
    .collect()
}
