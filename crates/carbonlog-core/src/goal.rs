//! Reduction goals.

use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::{Error, Result};

/// Months between today and a goal's default target date.
pub const DEFAULT_GOAL_HORIZON_MONTHS: u32 = 3;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GoalStatus {
  #[default]
  Active,
  Completed,
  Abandoned,
}

/// A commitment to cut a number of kg CO₂e by a target date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
  pub goal_id:           Uuid,
  pub owner:             Uuid,
  /// kg CO₂e.
  pub target_reduction:  f64,
  /// kg CO₂e reduced so far.
  pub current_footprint: f64,
  pub target_date:       NaiveDate,
  pub status:            GoalStatus,
  pub created_at:        DateTime<Utc>,
}

impl Goal {
  /// Progress towards the target, capped at 100.
  pub fn progress_percent(&self) -> f64 {
    if self.target_reduction <= 0.0 {
      return 0.0;
    }
    (self.current_footprint / self.target_reduction * 100.0).min(100.0)
  }
}

/// JSON body for creating a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalInput {
  pub target_reduction: f64,
  #[serde(default)]
  pub target_date:      Option<NaiveDate>,
}

/// Input to [`crate::store::FootprintStore::create_goal`].
#[derive(Debug, Clone)]
pub struct NewGoal {
  pub owner:            Uuid,
  pub target_reduction: f64,
  pub target_date:      NaiveDate,
}

impl NewGoal {
  /// Validate `input`, defaulting the target date relative to `today`.
  pub fn from_input(owner: Uuid, input: GoalInput, today: NaiveDate) -> Result<Self> {
    if !input.target_reduction.is_finite() || input.target_reduction <= 0.0 {
      return Err(Error::InvalidTarget(input.target_reduction));
    }
    let target_date = match input.target_date {
      Some(date) => date,
      None => today
        .checked_add_months(Months::new(DEFAULT_GOAL_HORIZON_MONTHS))
        .ok_or(Error::DateOutOfRange)?,
    };
    Ok(Self {
      owner,
      target_reduction: input.target_reduction,
      target_date,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn day(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

  fn goal(target: f64, current: f64) -> Goal {
    Goal {
      goal_id:           Uuid::new_v4(),
      owner:             Uuid::new_v4(),
      target_reduction:  target,
      current_footprint: current,
      target_date:       day(2024, 9, 1),
      status:            GoalStatus::Active,
      created_at:        Utc::now(),
    }
  }

  #[test]
  fn progress_is_capped() {
    assert_eq!(goal(100.0, 25.0).progress_percent(), 25.0);
    assert_eq!(goal(100.0, 250.0).progress_percent(), 100.0);
    assert_eq!(goal(0.0, 10.0).progress_percent(), 0.0);
  }

  #[test]
  fn target_date_defaults_three_months_out() {
    let input = GoalInput { target_reduction: 50.0, target_date: None };
    let new = NewGoal::from_input(Uuid::new_v4(), input, day(2024, 11, 30)).unwrap();
    assert_eq!(new.target_date, day(2025, 2, 28));
  }

  #[test]
  fn explicit_target_date_is_kept() {
    let input = GoalInput { target_reduction: 50.0, target_date: Some(day(2025, 1, 1)) };
    let new = NewGoal::from_input(Uuid::new_v4(), input, day(2024, 6, 1)).unwrap();
    assert_eq!(new.target_date, day(2025, 1, 1));
  }

  #[test]
  fn non_positive_targets_are_rejected() {
    for target in [0.0, -5.0, f64::NAN] {
      let input = GoalInput { target_reduction: target, target_date: None };
      let err = NewGoal::from_input(Uuid::new_v4(), input, day(2024, 6, 1)).unwrap_err();
      assert!(matches!(err, Error::InvalidTarget(_)));
    }
  }

  #[test]
  fn status_strings() {
    assert_eq!(GoalStatus::Completed.as_ref(), "completed");
    assert_eq!("abandoned".parse::<GoalStatus>().unwrap(), GoalStatus::Abandoned);
  }
}
