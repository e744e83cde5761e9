//! The `FootprintStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g.
//! `carbonlog-store-sqlite`). Higher layers (`carbonlog-api`,
//! `carbonlog-server`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  achievement::{Achievement, UserAchievement},
  activity::{Activity, NewActivity},
  goal::{Goal, GoalStatus, NewGoal},
  profile::{Profile, ProfileUpdate},
  suggestion::{Suggestion, SuggestionQuery},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`FootprintStore::list_activities`].
#[derive(Debug, Clone, Default)]
pub struct ActivityQuery {
  /// Restrict to a single category string.
  pub category: Option<String>,
  /// Inclusive lower bound on the activity date.
  pub from:     Option<NaiveDate>,
  /// Inclusive upper bound on the activity date.
  pub to:       Option<NaiveDate>,
  pub limit:    Option<usize>,
  pub offset:   Option<usize>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a carbonlog persistence backend.
///
/// Every per-user method is scoped by the owner's identity; rows belonging to
/// another owner behave as if they did not exist. Activities are append-only
/// apart from deletion.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait FootprintStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Activities ────────────────────────────────────────────────────────

  /// Persist a stamped activity. `activity_id` and `created_at` are set by
  /// the store.
  fn record_activity(
    &self,
    input: NewActivity,
  ) -> impl Future<Output = Result<Activity, Self::Error>> + Send + '_;

  fn get_activity(
    &self,
    owner: Uuid,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Activity>, Self::Error>> + Send + '_;

  /// Activities matching `query`, newest date first.
  fn list_activities<'a>(
    &'a self,
    owner: Uuid,
    query: &'a ActivityQuery,
  ) -> impl Future<Output = Result<Vec<Activity>, Self::Error>> + Send + 'a;

  /// Returns `false` if no such activity exists for `owner`.
  fn delete_activity(
    &self,
    owner: Uuid,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Goals ─────────────────────────────────────────────────────────────

  /// Persist a goal in [`GoalStatus::Active`] with no progress.
  fn create_goal(
    &self,
    input: NewGoal,
  ) -> impl Future<Output = Result<Goal, Self::Error>> + Send + '_;

  /// All of `owner`'s goals, most recently created first.
  fn list_goals(
    &self,
    owner: Uuid,
  ) -> impl Future<Output = Result<Vec<Goal>, Self::Error>> + Send + '_;

  /// Returns the updated goal, or `None` if it does not exist for `owner`.
  fn set_goal_status(
    &self,
    owner: Uuid,
    id: Uuid,
    status: GoalStatus,
  ) -> impl Future<Output = Result<Option<Goal>, Self::Error>> + Send + '_;

  // ── Achievements ──────────────────────────────────────────────────────

  /// The shared catalogue, highest points first.
  fn list_achievements(
    &self,
  ) -> impl Future<Output = Result<Vec<Achievement>, Self::Error>> + Send + '_;

  fn list_user_achievements(
    &self,
    owner: Uuid,
  ) -> impl Future<Output = Result<Vec<UserAchievement>, Self::Error>> + Send + '_;

  /// Award an achievement. Awarding one already held returns the original
  /// award unchanged.
  fn award_achievement(
    &self,
    owner: Uuid,
    achievement_id: Uuid,
  ) -> impl Future<Output = Result<UserAchievement, Self::Error>> + Send + '_;

  // ── Suggestions ───────────────────────────────────────────────────────

  fn list_suggestions<'a>(
    &'a self,
    query: &'a SuggestionQuery,
  ) -> impl Future<Output = Result<Vec<Suggestion>, Self::Error>> + Send + 'a;

  // ── Profiles ──────────────────────────────────────────────────────────

  fn get_profile(
    &self,
    owner: Uuid,
  ) -> impl Future<Output = Result<Option<Profile>, Self::Error>> + Send + '_;

  fn upsert_profile(
    &self,
    owner: Uuid,
    update: ProfileUpdate,
  ) -> impl Future<Output = Result<Profile, Self::Error>> + Send + '_;
}
