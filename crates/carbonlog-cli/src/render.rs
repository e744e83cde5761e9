//! Plain-text rendering for terminal output.
//!
//! Footprints are shown to one decimal place on the dashboard and to two in
//! estimates, matching what the web client displays.

use std::fmt::Write as _;

use carbonlog_core::{
  activity::Activity,
  calculator::Estimate,
  factors::CategoryEntry,
  stats::Dashboard,
  suggestion::Suggestion,
};

/// `+12.5%` / `-3.0%`; zero renders without a sign.
pub fn signed_percent(p: f64) -> String {
  if p > 0.0 {
    format!("+{p:.1}%")
  } else if p < 0.0 {
    format!("{p:.1}%")
  } else {
    "0.0%".to_owned()
  }
}

pub fn estimate(category: &str, subcategory: &str, amount: f64, est: &Estimate) -> String {
  match est.factor {
    Some(factor) => format!(
      "{amount} {unit} of {category}/{subcategory} × {factor} = {:.2} kg CO₂e",
      est.carbon_footprint,
      unit = est.unit,
    ),
    None => format!(
      "{category}/{subcategory} has no emission factor; {:.2} kg CO₂e",
      est.carbon_footprint
    ),
  }
}

pub fn catalogue(entries: &[CategoryEntry]) -> String {
  let mut out = String::new();
  for entry in entries {
    let _ = writeln!(out, "{} ({}, per {})", entry.name, entry.category, entry.unit);
    for sub in entry.subcategories {
      let _ = writeln!(out, "  {:<18} {:<20} {}", sub.id, sub.name, sub.factor);
    }
  }
  out
}

pub fn activities(items: &[Activity]) -> String {
  if items.is_empty() {
    return "no activities\n".to_owned();
  }
  let mut out = String::new();
  for a in items {
    let date = a
      .date
      .map(|d| d.format("%Y-%m-%d").to_string())
      .unwrap_or_else(|| "????-??-??".to_owned());
    let _ = writeln!(
      out,
      "{date}  {:<12} {:<16} {:>8} {:<4} {:>8.1} kg  {}  [{}]",
      a.category, a.subcategory, a.amount, a.unit, a.carbon_footprint, a.description, a.activity_id,
    );
  }
  out
}

pub fn dashboard(d: &Dashboard) -> String {
  let s = &d.stats;
  let mut out = String::new();
  let _ = writeln!(out, "As of {}", d.as_of);
  let _ = writeln!(out, "Total footprint:   {:.1} kg CO₂e", s.total);
  let _ = writeln!(
    out,
    "This month:        {:.1} kg CO₂e ({} vs last month)",
    s.current_period_total,
    signed_percent(s.trend_percent),
  );
  let _ = writeln!(out, "Last month:        {:.1} kg CO₂e", s.prior_period_total);
  let _ = writeln!(out, "Activities logged: {}", d.activity_count);

  if !d.categories.is_empty() {
    let _ = writeln!(out, "\nBy category:");
    for c in &d.categories {
      let _ = writeln!(out, "  {:<12} {:>8.1} kg  {:>5.1}%", c.category, c.carbon, c.percentage);
    }
  }

  let _ = writeln!(out, "\nThis week:");
  for day in &d.weekly {
    let _ = writeln!(out, "  {} {}  {:>8.1} kg", day.label, day.date.format("%m-%d"), day.carbon);
  }
  out
}

pub fn suggestions(items: &[Suggestion]) -> String {
  let mut out = String::new();
  for s in items {
    let _ = writeln!(
      out,
      "{:<36} {:<12} {:<6} saves ~{:.0} kg/yr",
      s.title, s.category, s.difficulty, s.potential_reduction,
    );
  }
  out
}

#[cfg(test)]
mod tests {
  use carbonlog_core::{calculator, factors, stats};
  use chrono::{NaiveDate, Utc};
  use uuid::Uuid;

  use super::*;

  #[test]
  fn percent_carries_sign() {
    assert_eq!(signed_percent(12.345), "+12.3%");
    assert_eq!(signed_percent(-50.0), "-50.0%");
    assert_eq!(signed_percent(0.0), "0.0%");
  }

  #[test]
  fn estimate_uses_two_decimals() {
    let est = calculator::estimate("transport", "car_gasoline", 100.0);
    let line = estimate("transport", "car_gasoline", 100.0, &est);
    assert!(line.ends_with("= 25.10 kg CO₂e"), "{line}");
  }

  #[test]
  fn estimate_reports_missing_factor() {
    let est = calculator::estimate("space", "rocket", 1.0);
    let line = estimate("space", "rocket", 1.0, &est);
    assert!(line.contains("no emission factor"), "{line}");
    assert!(line.contains("0.00"));
  }

  #[test]
  fn catalogue_lists_every_subcategory() {
    let text = catalogue(&factors::catalogue());
    assert!(text.contains("car_gasoline"));
    assert!(text.contains("water_heating"));
  }

  #[test]
  fn dashboard_uses_one_decimal() {
    let day = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
    let activity = Activity {
      activity_id:      Uuid::new_v4(),
      owner:            Uuid::new_v4(),
      category:         "food".into(),
      subcategory:      "beef".into(),
      description:      "dinner".into(),
      amount:           1.0,
      unit:             "kg".into(),
      carbon_footprint: 27.0,
      date:             Some(day),
      created_at:       Utc::now(),
    };
    let d = stats::dashboard(&[activity], day, stats::WeekStart::Sunday).unwrap();
    let text = dashboard(&d);
    assert!(text.contains("Total footprint:   27.0 kg"), "{text}");
    assert!(text.contains("food"));
  }
}
