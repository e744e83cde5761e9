//! Router tests driving [`api_router`] over an in-memory SQLite store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use carbonlog_core::stats::WeekStart;
use carbonlog_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;
use uuid::Uuid;

use super::*;
use crate::owner::USER_ID_HEADER;

const EPS: f64 = 1e-9;

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(Arc::new(store), WeekStart::Sunday)
}

async fn send(
  app: &Router,
  method: &str,
  uri: &str,
  user: Option<Uuid>,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  if let Some(user) = user {
    builder = builder.header(USER_ID_HEADER, user.to_string());
  }
  let req = match body {
    Some(v) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(v.to_string()))
      .unwrap(),
    None => builder.body(Body::empty()).unwrap(),
  };

  let resp = app.clone().oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value)
}

fn activity_body(category: &str, subcategory: &str, amount: f64, date: &str) -> Value {
  json!({
    "category": category,
    "subcategory": subcategory,
    "description": format!("{subcategory} entry"),
    "amount": amount,
    "date": date,
  })
}

// ── Factors ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn factors_list_without_identity() {
  let app = app().await;
  let (status, body) = send(&app, "GET", "/factors", None, None).await;
  assert_eq!(status, StatusCode::OK);
  let categories = body.as_array().unwrap();
  assert_eq!(categories.len(), 5);
  assert_eq!(categories[0]["category"], "transport");
}

#[tokio::test]
async fn estimate_registered_pair() {
  let app = app().await;
  let (status, body) = send(
    &app,
    "GET",
    "/factors/estimate?category=transport&subcategory=car_gasoline&amount=100",
    None,
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["unit"], "km");
  assert!((body["carbon_footprint"].as_f64().unwrap() - 25.1).abs() < EPS);
}

#[tokio::test]
async fn estimate_unregistered_pair_is_zero() {
  let app = app().await;
  let (status, body) = send(
    &app,
    "GET",
    "/factors/estimate?category=space&subcategory=rocket&amount=abc",
    None,
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert!(body["factor"].is_null());
  assert_eq!(body["unit"], "unit");
  assert_eq!(body["carbon_footprint"].as_f64(), Some(0.0));
}

// ── Identity ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_identity_is_unauthorized() {
  let app = app().await;
  let (status, body) = send(&app, "GET", "/activities", None, None).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert!(body["error"].as_str().unwrap().contains(USER_ID_HEADER));
}

#[tokio::test]
async fn malformed_identity_is_unauthorized() {
  let app = app().await;
  let req = Request::builder()
    .uri("/stats")
    .header(USER_ID_HEADER, "not-a-uuid")
    .body(Body::empty())
    .unwrap();
  let resp = app.oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ── Activities ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_activity_stamps_unit_and_footprint() {
  let app = app().await;
  let user = Uuid::new_v4();
  let (status, body) = send(
    &app,
    "POST",
    "/activities",
    Some(user),
    Some(activity_body("food", "beef", 2.0, "2024-05-01")),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["unit"], "kg");
  assert_eq!(body["carbon_footprint"].as_f64(), Some(54.0));
  assert_eq!(body["date"], "2024-05-01");

  let id = body["activity_id"].as_str().unwrap();
  let (status, fetched) = send(&app, "GET", &format!("/activities/{id}"), Some(user), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(fetched["activity_id"], id);
}

#[tokio::test]
async fn create_activity_rejects_negative_amount() {
  let app = app().await;
  let (status, body) = send(
    &app,
    "POST",
    "/activities",
    Some(Uuid::new_v4()),
    Some(activity_body("food", "beef", -1.0, "2024-05-01")),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string());
}

#[tokio::test]
async fn create_activity_rejects_malformed_date() {
  let app = app().await;
  let (status, _) = send(
    &app,
    "POST",
    "/activities",
    Some(Uuid::new_v4()),
    Some(activity_body("food", "beef", 1.0, "01/05/2024")),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_pair_is_accepted_with_zero_footprint() {
  let app = app().await;
  let (status, body) = send(
    &app,
    "POST",
    "/activities",
    Some(Uuid::new_v4()),
    Some(activity_body("space", "rocket", 3.0, "2024-05-01")),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["carbon_footprint"].as_f64(), Some(0.0));
  assert_eq!(body["unit"], "unit");
}

#[tokio::test]
async fn other_users_activity_is_not_found() {
  let app = app().await;
  let (_, body) = send(
    &app,
    "POST",
    "/activities",
    Some(Uuid::new_v4()),
    Some(activity_body("transport", "bus", 10.0, "2024-05-01")),
  )
  .await;
  let id = body["activity_id"].as_str().unwrap();

  let stranger = Some(Uuid::new_v4());
  let (status, _) = send(&app, "GET", &format!("/activities/{id}"), stranger, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  let (status, _) = send(&app, "DELETE", &format!("/activities/{id}"), stranger, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_activity_returns_no_content() {
  let app = app().await;
  let user = Some(Uuid::new_v4());
  let (_, body) = send(
    &app,
    "POST",
    "/activities",
    user,
    Some(activity_body("waste", "landfill", 4.0, "2024-05-01")),
  )
  .await;
  let id = body["activity_id"].as_str().unwrap();

  let (status, _) = send(&app, "DELETE", &format!("/activities/{id}"), user, None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (status, _) = send(&app, "GET", &format!("/activities/{id}"), user, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_activities_filters_by_category() {
  let app = app().await;
  let user = Some(Uuid::new_v4());
  for (cat, sub) in [("food", "beef"), ("transport", "bus"), ("food", "fish")] {
    send(&app, "POST", "/activities", user, Some(activity_body(cat, sub, 1.0, "2024-05-01"))).await;
  }

  let (status, body) = send(&app, "GET", "/activities?category=food", user, None).await;
  assert_eq!(status, StatusCode::OK);
  let items = body.as_array().unwrap();
  assert_eq!(items.len(), 2);
  assert!(items.iter().all(|a| a["category"] == "food"));
}

// ── Stats ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn stats_reports_periods_and_trend() {
  let app = app().await;
  let user = Some(Uuid::new_v4());
  // 2 kg beef in April (54), 1 kg beef in May (27).
  send(&app, "POST", "/activities", user, Some(activity_body("food", "beef", 2.0, "2024-04-10"))).await;
  send(&app, "POST", "/activities", user, Some(activity_body("food", "beef", 1.0, "2024-05-10"))).await;

  let (status, body) = send(&app, "GET", "/stats?as_of=2024-05-15", user, None).await;
  assert_eq!(status, StatusCode::OK);
  let stats = &body["stats"];
  assert!((stats["total"].as_f64().unwrap() - 81.0).abs() < EPS);
  assert!((stats["current_period_total"].as_f64().unwrap() - 27.0).abs() < EPS);
  assert!((stats["prior_period_total"].as_f64().unwrap() - 54.0).abs() < EPS);
  assert!((stats["trend_percent"].as_f64().unwrap() + 50.0).abs() < EPS);
  assert_eq!(body["activity_count"], 2);
  assert_eq!(body["weekly"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn stats_rejects_malformed_as_of() {
  let app = app().await;
  let (status, body) = send(&app, "GET", "/stats?as_of=yesterday", Some(Uuid::new_v4()), None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string(), "{body}");
}

#[tokio::test]
async fn stats_rejects_as_of_at_either_end_of_the_calendar() {
  let app = app().await;
  let user = Some(Uuid::new_v4());
  for date in [chrono::NaiveDate::MIN, chrono::NaiveDate::MAX] {
    let uri = format!("/stats?as_of={date}").replace('+', "%2B");
    let (status, body) = send(&app, "GET", &uri, user, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    assert!(body["error"].is_string(), "{body}");
  }
}

#[tokio::test]
async fn malformed_ids_render_json_errors() {
  let app = app().await;
  let user = Some(Uuid::new_v4());

  let (status, body) = send(&app, "GET", "/activities/not-a-uuid", user, None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string(), "{body}");

  let (status, body) = send(&app, "DELETE", "/activities/42", user, None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string(), "{body}");
}

#[tokio::test]
async fn malformed_list_filter_renders_json_error() {
  let app = app().await;
  let (status, body) = send(&app, "GET", "/activities?limit=many", Some(Uuid::new_v4()), None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string(), "{body}");
}

// ── Goals ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn goal_lifecycle() {
  let app = app().await;
  let user = Some(Uuid::new_v4());
  let (status, goal) = send(
    &app,
    "POST",
    "/goals",
    user,
    Some(json!({ "target_reduction": 50.0, "target_date": "2030-01-01" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(goal["status"], "active");
  assert_eq!(goal["progress_percent"].as_f64(), Some(0.0));

  let id = goal["goal_id"].as_str().unwrap();
  let (status, updated) = send(
    &app,
    "PATCH",
    &format!("/goals/{id}"),
    user,
    Some(json!({ "status": "completed" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["status"], "completed");

  let (_, list) = send(&app, "GET", "/goals", user, None).await;
  assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn goal_rejects_non_positive_target() {
  let app = app().await;
  let (status, _) = send(
    &app,
    "POST",
    "/goals",
    Some(Uuid::new_v4()),
    Some(json!({ "target_reduction": 0.0 })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_missing_goal_is_not_found() {
  let app = app().await;
  let (status, _) = send(
    &app,
    "PATCH",
    &format!("/goals/{}", Uuid::new_v4()),
    Some(Uuid::new_v4()),
    Some(json!({ "status": "abandoned" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Achievements ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn award_unlocks_achievement() {
  let app = app().await;
  let user = Some(Uuid::new_v4());
  let (_, list) = send(&app, "GET", "/achievements", user, None).await;
  let first = &list.as_array().unwrap()[0];
  assert!(first["earned_at"].is_null());
  let id = first["achievement"]["achievement_id"].as_str().unwrap().to_owned();

  let (status, _) = send(&app, "POST", &format!("/achievements/{id}/award"), user, None).await;
  assert_eq!(status, StatusCode::OK);
  let (status, _) = send(&app, "POST", &format!("/achievements/{id}/award"), user, None).await;
  assert_eq!(status, StatusCode::OK);

  let (_, list) = send(&app, "GET", "/achievements", user, None).await;
  let unlocked = list
    .as_array()
    .unwrap()
    .iter()
    .filter(|s| !s["earned_at"].is_null())
    .count();
  assert_eq!(unlocked, 1);
}

#[tokio::test]
async fn award_unknown_achievement_is_not_found() {
  let app = app().await;
  let (status, _) = send(
    &app,
    "POST",
    &format!("/achievements/{}/award", Uuid::new_v4()),
    Some(Uuid::new_v4()),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Suggestions & profile ─────────────────────────────────────────────────────

#[tokio::test]
async fn suggestions_respect_limit() {
  let app = app().await;
  let (status, body) = send(&app, "GET", "/suggestions?limit=2", Some(Uuid::new_v4()), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn profile_put_then_get() {
  let app = app().await;
  let user = Some(Uuid::new_v4());
  let (status, _) = send(&app, "GET", "/profile", user, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, body) = send(&app, "PUT", "/profile", user, Some(json!({ "full_name": "Ada" }))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["full_name"], "Ada");

  let (status, body) = send(&app, "GET", "/profile", user, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["full_name"], "Ada");
}
