//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`,
//! UUIDs as hyphenated lowercase strings, and enums as their snake/lowercase
//! string forms.

use std::str::FromStr;

use carbonlog_core::{
  achievement::{Achievement, UserAchievement},
  activity::Activity,
  goal::{Goal, GoalStatus},
  profile::Profile,
  suggestion::{Difficulty, Suggestion},
};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| Error::DateParse(e.to_string()))
}

/// Activity dates may have been written by other clients of the table. A
/// value that does not parse is kept out of date-bucketed stats rather than
/// failing the whole read.
fn decode_activity_date(activity_id: &str, s: &str) -> Option<NaiveDate> {
  match decode_date(s) {
    Ok(d) => Some(d),
    Err(e) => {
      tracing::warn!(%activity_id, raw = s, error = %e, "unparseable activity date");
      None
    }
  }
}

// ─── Enums ───────────────────────────────────────────────────────────────────

fn decode_variant<T: FromStr>(kind: &'static str, s: &str) -> Result<T> {
  s.parse().map_err(|_| Error::UnknownVariant { kind, value: s.to_owned() })
}

pub fn encode_goal_status(s: GoalStatus) -> &'static str { s.into() }

pub fn decode_goal_status(s: &str) -> Result<GoalStatus> { decode_variant("goal status", s) }

pub fn decode_difficulty(s: &str) -> Result<Difficulty> { decode_variant("difficulty", s) }

// ─── Row types ───────────────────────────────────────────────────────────────

pub const ACTIVITY_COLUMNS: &str = "activity_id, owner, category, subcategory, description, \
                                    amount, unit, carbon_footprint, date, created_at";

/// Raw values read directly from an `activities` row.
pub struct RawActivity {
  pub activity_id:      String,
  pub owner:            String,
  pub category:         String,
  pub subcategory:      String,
  pub description:      String,
  pub amount:           f64,
  pub unit:             String,
  pub carbon_footprint: f64,
  pub date:             String,
  pub created_at:       String,
}

impl RawActivity {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      activity_id:      row.get(0)?,
      owner:            row.get(1)?,
      category:         row.get(2)?,
      subcategory:      row.get(3)?,
      description:      row.get(4)?,
      amount:           row.get(5)?,
      unit:             row.get(6)?,
      carbon_footprint: row.get(7)?,
      date:             row.get(8)?,
      created_at:       row.get(9)?,
    })
  }

  pub fn into_activity(self) -> Result<Activity> {
    Ok(Activity {
      date:             decode_activity_date(&self.activity_id, &self.date),
      activity_id:      decode_uuid(&self.activity_id)?,
      owner:            decode_uuid(&self.owner)?,
      category:         self.category,
      subcategory:      self.subcategory,
      description:      self.description,
      amount:           self.amount,
      unit:             self.unit,
      carbon_footprint: self.carbon_footprint,
      created_at:       decode_dt(&self.created_at)?,
    })
  }
}

pub const GOAL_COLUMNS: &str =
  "goal_id, owner, target_reduction, current_footprint, target_date, status, created_at";

/// Raw values read directly from a `goals` row.
pub struct RawGoal {
  pub goal_id:           String,
  pub owner:             String,
  pub target_reduction:  f64,
  pub current_footprint: f64,
  pub target_date:       String,
  pub status:            String,
  pub created_at:        String,
}

impl RawGoal {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      goal_id:           row.get(0)?,
      owner:             row.get(1)?,
      target_reduction:  row.get(2)?,
      current_footprint: row.get(3)?,
      target_date:       row.get(4)?,
      status:            row.get(5)?,
      created_at:        row.get(6)?,
    })
  }

  pub fn into_goal(self) -> Result<Goal> {
    Ok(Goal {
      goal_id:           decode_uuid(&self.goal_id)?,
      owner:             decode_uuid(&self.owner)?,
      target_reduction:  self.target_reduction,
      current_footprint: self.current_footprint,
      target_date:       decode_date(&self.target_date)?,
      status:            decode_goal_status(&self.status)?,
      created_at:        decode_dt(&self.created_at)?,
    })
  }
}

pub const ACHIEVEMENT_COLUMNS: &str = "achievement_id, name, description, icon, \
                                       requirement_type, requirement_value, points, created_at";

/// Raw values read directly from an `achievements` row.
pub struct RawAchievement {
  pub achievement_id:    String,
  pub name:              String,
  pub description:       String,
  pub icon:              String,
  pub requirement_type:  String,
  pub requirement_value: f64,
  pub points:            i64,
  pub created_at:        String,
}

impl RawAchievement {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      achievement_id:    row.get(0)?,
      name:              row.get(1)?,
      description:       row.get(2)?,
      icon:              row.get(3)?,
      requirement_type:  row.get(4)?,
      requirement_value: row.get(5)?,
      points:            row.get(6)?,
      created_at:        row.get(7)?,
    })
  }

  pub fn into_achievement(self) -> Result<Achievement> {
    Ok(Achievement {
      achievement_id:    decode_uuid(&self.achievement_id)?,
      name:              self.name,
      description:       self.description,
      icon:              self.icon,
      requirement_type:  self.requirement_type,
      requirement_value: self.requirement_value,
      points:            self.points,
      created_at:        decode_dt(&self.created_at)?,
    })
  }
}

pub const USER_ACHIEVEMENT_COLUMNS: &str = "user_achievement_id, owner, achievement_id, earned_at";

/// Raw values read directly from a `user_achievements` row.
pub struct RawUserAchievement {
  pub user_achievement_id: String,
  pub owner:               String,
  pub achievement_id:      String,
  pub earned_at:           String,
}

impl RawUserAchievement {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_achievement_id: row.get(0)?,
      owner:               row.get(1)?,
      achievement_id:      row.get(2)?,
      earned_at:           row.get(3)?,
    })
  }

  pub fn into_user_achievement(self) -> Result<UserAchievement> {
    Ok(UserAchievement {
      user_achievement_id: decode_uuid(&self.user_achievement_id)?,
      owner:               decode_uuid(&self.owner)?,
      achievement_id:      decode_uuid(&self.achievement_id)?,
      earned_at:           decode_dt(&self.earned_at)?,
    })
  }
}

pub const SUGGESTION_COLUMNS: &str =
  "suggestion_id, category, title, description, potential_reduction, difficulty, created_at";

/// Raw values read directly from a `suggestions` row.
pub struct RawSuggestion {
  pub suggestion_id:       String,
  pub category:            String,
  pub title:               String,
  pub description:         String,
  pub potential_reduction: f64,
  pub difficulty:          String,
  pub created_at:          String,
}

impl RawSuggestion {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      suggestion_id:       row.get(0)?,
      category:            row.get(1)?,
      title:               row.get(2)?,
      description:         row.get(3)?,
      potential_reduction: row.get(4)?,
      difficulty:          row.get(5)?,
      created_at:          row.get(6)?,
    })
  }

  pub fn into_suggestion(self) -> Result<Suggestion> {
    Ok(Suggestion {
      suggestion_id:       decode_uuid(&self.suggestion_id)?,
      category:            self.category,
      title:               self.title,
      description:         self.description,
      potential_reduction: self.potential_reduction,
      difficulty:          decode_difficulty(&self.difficulty)?,
      created_at:          decode_dt(&self.created_at)?,
    })
  }
}

pub const PROFILE_COLUMNS: &str = "owner, full_name, avatar_url, created_at, updated_at";

/// Raw values read directly from a `profiles` row.
pub struct RawProfile {
  pub owner:      String,
  pub full_name:  Option<String>,
  pub avatar_url: Option<String>,
  pub created_at: String,
  pub updated_at: String,
}

impl RawProfile {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      owner:      row.get(0)?,
      full_name:  row.get(1)?,
      avatar_url: row.get(2)?,
      created_at: row.get(3)?,
      updated_at: row.get(4)?,
    })
  }

  pub fn into_profile(self) -> Result<Profile> {
    Ok(Profile {
      owner:      decode_uuid(&self.owner)?,
      full_name:  self.full_name,
      avatar_url: self.avatar_url,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
