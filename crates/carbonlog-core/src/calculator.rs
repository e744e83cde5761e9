//! Single-activity footprint estimation.

use serde::Serialize;

use crate::factors::{lookup_factor, unit_for};

/// Estimated kg CO₂e for `amount` units of `(category, subcategory)`.
///
/// Unregistered pairs and non-finite amounts yield 0. Negative amounts pass
/// through arithmetically; rejecting them is the caller's job. No rounding
/// is applied.
pub fn compute_footprint(category: &str, subcategory: &str, amount: f64) -> f64 {
  if !amount.is_finite() {
    return 0.0;
  }
  match lookup_factor(category, subcategory) {
    Some(factor) => amount * factor,
    None => 0.0,
  }
}

/// Lenient amount parse for previews: anything that is not a finite number
/// reads as 0.
pub fn parse_amount(raw: &str) -> f64 {
  raw
    .trim()
    .parse::<f64>()
    .ok()
    .filter(|a| a.is_finite())
    .unwrap_or(0.0)
}

/// A footprint preview, as shown next to the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
  /// `None` when the pair is not in the factor table.
  pub factor:           Option<f64>,
  pub unit:             &'static str,
  pub carbon_footprint: f64,
}

pub fn estimate(category: &str, subcategory: &str, amount: f64) -> Estimate {
  Estimate {
    factor:           lookup_factor(category, subcategory),
    unit:             unit_for(category),
    carbon_footprint: compute_footprint(category, subcategory, amount),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::factors::catalogue;

  fn close(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

  #[test]
  fn gasoline_car_hundred_km() {
    assert!(close(compute_footprint("transport", "car_gasoline", 100.0), 25.1));
  }

  #[test]
  fn two_kilos_of_beef() {
    assert_eq!(compute_footprint("food", "beef", 2.0), 54.0);
  }

  #[test]
  fn registered_pairs_multiply_by_factor() {
    for entry in catalogue() {
      let category = entry.category.to_string();
      for sub in entry.subcategories {
        for amount in [0.0, 1.0, 12.5, 1.0e6] {
          let got = compute_footprint(&category, sub.id, amount);
          assert!(close(got, amount * sub.factor), "{category}/{}", sub.id);
        }
        assert_eq!(compute_footprint(&category, sub.id, 0.0), 0.0);
      }
    }
  }

  #[test]
  fn zero_factor_subcategories_never_emit() {
    for amount in [0.0, 3.0, 1.0e9] {
      assert_eq!(compute_footprint("transport", "bike", amount), 0.0);
      assert_eq!(compute_footprint("transport", "walking", amount), 0.0);
    }
  }

  #[test]
  fn unknown_pairs_fail_soft_to_zero() {
    assert_eq!(compute_footprint("transport", "teleport", 50.0), 0.0);
    assert_eq!(compute_footprint("leisure", "cinema", 50.0), 0.0);
    assert_eq!(compute_footprint("", "", 50.0), 0.0);
  }

  #[test]
  fn non_finite_amounts_read_as_zero() {
    assert_eq!(compute_footprint("food", "beef", f64::NAN), 0.0);
    assert_eq!(compute_footprint("food", "beef", f64::INFINITY), 0.0);
  }

  #[test]
  fn negative_amounts_pass_through() {
    assert_eq!(compute_footprint("food", "beef", -1.0), -27.0);
  }

  #[test]
  fn lenient_parse() {
    assert_eq!(parse_amount("12.5"), 12.5);
    assert_eq!(parse_amount(" 3 "), 3.0);
    assert_eq!(parse_amount(""), 0.0);
    assert_eq!(parse_amount("lots"), 0.0);
    assert_eq!(parse_amount("NaN"), 0.0);
    assert_eq!(parse_amount("inf"), 0.0);
  }

  #[test]
  fn estimate_keeps_absent_factor_distinct_from_zero() {
    let bike = estimate("transport", "bike", 10.0);
    assert_eq!(bike.factor, Some(0.0));
    assert_eq!(bike.unit, "km");

    let unknown = estimate("transport", "hoverboard", 10.0);
    assert_eq!(unknown.factor, None);
    assert_eq!(unknown.unit, "km");
    assert_eq!(unknown.carbon_footprint, bike.carbon_footprint);
  }
}
