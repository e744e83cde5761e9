//! JSON REST API for carbonlog.
//!
//! Exposes an axum [`Router`] backed by any
//! [`carbonlog_core::store::FootprintStore`]. Authentication, TLS, and
//! transport concerns are the caller's responsibility; per-user routes read
//! the caller's identity from the `x-user-id` header (see [`owner`]).
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", carbonlog_api::api_router(store.clone(), WeekStart::Sunday))
//! ```

pub mod achievements;
pub mod activities;
pub mod error;
pub mod factors;
pub mod goals;
pub mod owner;
pub mod profile;
pub mod stats;
pub mod suggestions;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, patch, post},
};
use carbonlog_core::{stats::WeekStart, store::FootprintStore};

pub use error::ApiError;
pub use owner::Owner;

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct ApiState<S> {
  pub store:      Arc<S>,
  /// First day of the week used for the dashboard's weekly series.
  pub week_start: WeekStart,
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, week_start: WeekStart) -> Router<()>
where
  S: FootprintStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Factors
    .route("/factors", get(factors::list))
    .route("/factors/estimate", get(factors::estimate))
    // Activities
    .route("/activities", get(activities::list::<S>).post(activities::create::<S>))
    .route(
      "/activities/{id}",
      get(activities::get_one::<S>).delete(activities::delete_one::<S>),
    )
    // Stats
    .route("/stats", get(stats::handler::<S>))
    // Goals
    .route("/goals", get(goals::list::<S>).post(goals::create::<S>))
    .route("/goals/{id}", patch(goals::set_status::<S>))
    // Achievements
    .route("/achievements", get(achievements::list::<S>))
    .route("/achievements/{id}/award", post(achievements::award::<S>))
    // Suggestions
    .route("/suggestions", get(suggestions::list::<S>))
    // Profile
    .route("/profile", get(profile::get_one::<S>).put(profile::upsert::<S>))
    .with_state(ApiState { store, week_start })
}

#[cfg(test)]
mod tests;
