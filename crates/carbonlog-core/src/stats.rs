//! Derived statistics over a user's activities.
//!
//! Everything here is recomputed from the full activity list on every read;
//! nothing is persisted. The reference date is always passed in rather than
//! read from the clock.
//!
//! Activities whose date is unknown (`None`) are part of the lifetime total
//! and the category breakdown, but are excluded from every date-bucketed sum.

use chrono::{Datelike as _, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, activity::Activity};

// ─── Period ──────────────────────────────────────────────────────────────────

/// A calendar month, the unit of trend comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
  pub year:  i32,
  /// 1-based.
  pub month: u32,
}

impl Period {
  pub fn containing(date: NaiveDate) -> Self {
    Self { year: date.year(), month: date.month() }
  }

  /// The immediately preceding month; January rolls back into December.
  pub fn previous(self) -> Self {
    if self.month == 1 {
      Self { year: self.year - 1, month: 12 }
    } else {
      Self { year: self.year, month: self.month - 1 }
    }
  }

  pub fn contains(self, date: NaiveDate) -> bool {
    date.year() == self.year && date.month() == self.month
  }

  pub fn first_day(self) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(self.year, self.month, 1)
  }

  pub fn last_day(self) -> Option<NaiveDate> {
    self
      .first_day()?
      .checked_add_months(Months::new(1))?
      .pred_opt()
  }
}

// ─── PeriodStats ─────────────────────────────────────────────────────────────

/// Lifetime and month-over-month totals, in kg CO₂e.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
  pub total:                f64,
  pub current_period_total: f64,
  pub prior_period_total:   f64,
  /// Signed percentage change from the prior to the current period. Zero
  /// whenever the prior period has nothing to compare against.
  pub trend_percent:        f64,
  pub current_period:       Period,
  pub prior_period:         Period,
}

pub fn aggregate_stats(activities: &[Activity], reference: NaiveDate) -> PeriodStats {
  let current_period = Period::containing(reference);
  let prior_period = current_period.previous();

  let total = activities.iter().map(|a| a.carbon_footprint).sum();
  let current_period_total = period_total(activities, current_period);
  let prior_period_total = period_total(activities, prior_period);

  PeriodStats {
    total,
    current_period_total,
    prior_period_total,
    trend_percent: trend_percent(current_period_total, prior_period_total),
    current_period,
    prior_period,
  }
}

fn period_total(activities: &[Activity], period: Period) -> f64 {
  activities
    .iter()
    .filter(|a| a.date.is_some_and(|d| period.contains(d)))
    .map(|a| a.carbon_footprint)
    .sum()
}

/// `(current - prior) / prior × 100`, or 0 when `prior` is not positive.
pub fn trend_percent(current: f64, prior: f64) -> f64 {
  if prior > 0.0 {
    (current - prior) / prior * 100.0
  } else {
    0.0
  }
}

// ─── Category breakdown ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
  pub category:   String,
  pub carbon:     f64,
  /// Share of the grand total; 0 for every group when the total is 0.
  pub percentage: f64,
}

/// Per-category sums, in the order each category is first encountered.
pub fn category_breakdown(activities: &[Activity]) -> Vec<CategoryBreakdown> {
  let mut groups: Vec<CategoryBreakdown> = Vec::new();
  for activity in activities {
    match groups.iter_mut().find(|g| g.category == activity.category) {
      Some(group) => group.carbon += activity.carbon_footprint,
      None => groups.push(CategoryBreakdown {
        category:   activity.category.clone(),
        carbon:     activity.carbon_footprint,
        percentage: 0.0,
      }),
    }
  }

  let grand_total: f64 = groups.iter().map(|g| g.carbon).sum();
  if grand_total != 0.0 {
    for group in &mut groups {
      group.percentage = group.carbon / grand_total * 100.0;
    }
  }
  groups
}

// ─── Weekly series ───────────────────────────────────────────────────────────

/// First day of a calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
  #[default]
  Sunday,
  Monday,
}

impl WeekStart {
  /// The first day of the week containing `date`, or `None` when that day
  /// precedes [`NaiveDate::MIN`].
  pub fn week_of(self, date: NaiveDate) -> Option<NaiveDate> {
    let offset = match self {
      Self::Sunday => date.weekday().num_days_from_sunday(),
      Self::Monday => date.weekday().num_days_from_monday(),
    };
    date.checked_sub_days(Days::new(u64::from(offset)))
  }
}

/// One day of the weekly chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCarbon {
  pub date:       NaiveDate,
  /// Abbreviated weekday name, e.g. `"Sun"`.
  pub label:      String,
  pub carbon:     f64,
  pub activities: usize,
}

/// Seven entries, Sunday through Saturday, for the week containing
/// `reference`.
pub fn weekly_series(activities: &[Activity], reference: NaiveDate) -> Result<Vec<DailyCarbon>> {
  weekly_series_from(activities, reference, WeekStart::Sunday)
}

/// Seven entries for the week containing `reference`, starting on
/// `week_start`. Days without activities are present with zero values.
///
/// Fails with [`Error::DateOutOfRange`] when any day of that week is not a
/// representable date.
pub fn weekly_series_from(
  activities: &[Activity],
  reference: NaiveDate,
  week_start: WeekStart,
) -> Result<Vec<DailyCarbon>> {
  let first = week_start.week_of(reference).ok_or(Error::DateOutOfRange)?;
  first
    .checked_add_days(Days::new(6))
    .ok_or(Error::DateOutOfRange)?;

  let series = first
    .iter_days()
    .take(7)
    .map(|day| {
      let (carbon, count) = activities
        .iter()
        .filter(|a| a.date == Some(day))
        .fold((0.0, 0), |(sum, n), a| (sum + a.carbon_footprint, n + 1));
      DailyCarbon {
        date:       day,
        label:      day.format("%a").to_string(),
        carbon,
        activities: count,
      }
    })
    .collect();
  Ok(series)
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

/// Everything the overview screen needs, computed in one pass over the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
  pub as_of:          NaiveDate,
  pub stats:          PeriodStats,
  pub activity_count: usize,
  pub categories:     Vec<CategoryBreakdown>,
  pub weekly:         Vec<DailyCarbon>,
}

pub fn dashboard(
  activities: &[Activity],
  reference: NaiveDate,
  week_start: WeekStart,
) -> Result<Dashboard> {
  Ok(Dashboard {
    as_of:          reference,
    stats:          aggregate_stats(activities, reference),
    activity_count: activities.len(),
    categories:     category_breakdown(activities),
    weekly:         weekly_series_from(activities, reference, week_start)?,
  })
}
