//! Activities — the logged real-world actions that carry a carbon cost.
//!
//! An activity's footprint is stamped once, when it is submitted, and stored
//! alongside it. Activities are never updated; they can only be deleted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  calculator::compute_footprint,
  factors::unit_for,
};

// ─── Activity ────────────────────────────────────────────────────────────────

/// A persisted activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
  pub activity_id:      Uuid,
  pub owner:            Uuid,
  /// Free-form; usually one of [`crate::factors::Category`].
  pub category:         String,
  pub subcategory:      String,
  pub description:      String,
  pub amount:           f64,
  /// Informational; resolved from the category at submission time.
  pub unit:             String,
  /// kg CO₂e, computed once at submission.
  pub carbon_footprint: f64,
  /// Calendar day the activity happened. `None` when the stored value could
  /// not be parsed; such activities still count towards lifetime totals but
  /// never towards a period or a day.
  pub date:             Option<NaiveDate>,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at:       DateTime<Utc>,
}

// ─── ActivityInput ───────────────────────────────────────────────────────────

/// A user submission, before validation and stamping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityInput {
  pub category:    String,
  pub subcategory: String,
  pub description: String,
  pub amount:      f64,
  pub date:        NaiveDate,
}

impl ActivityInput {
  /// Reject submissions that cannot become an activity.
  ///
  /// Unknown category/subcategory pairs are accepted; they stamp a zero
  /// footprint.
  pub fn validate(&self) -> Result<()> {
    for (name, value) in [
      ("category", &self.category),
      ("subcategory", &self.subcategory),
      ("description", &self.description),
    ] {
      if value.trim().is_empty() {
        return Err(Error::EmptyField(name));
      }
    }
    if !self.amount.is_finite() {
      return Err(Error::NonFiniteAmount(self.amount));
    }
    if self.amount < 0.0 {
      return Err(Error::NegativeAmount(self.amount));
    }
    Ok(())
  }
}

// ─── NewActivity ─────────────────────────────────────────────────────────────

/// Input to [`crate::store::FootprintStore::record_activity`].
/// `activity_id` and `created_at` are always set by the store.
#[derive(Debug, Clone)]
pub struct NewActivity {
  pub owner:            Uuid,
  pub category:         String,
  pub subcategory:      String,
  pub description:      String,
  pub amount:           f64,
  pub unit:             String,
  pub carbon_footprint: f64,
  pub date:             NaiveDate,
}

impl NewActivity {
  /// Validate `input` and stamp its unit and footprint.
  pub fn stamp(owner: Uuid, input: ActivityInput) -> Result<Self> {
    input.validate()?;
    let category = input.category.trim().to_owned();
    let subcategory = input.subcategory.trim().to_owned();
    let carbon_footprint = compute_footprint(&category, &subcategory, input.amount);
    Ok(Self {
      owner,
      unit: unit_for(&category).to_owned(),
      carbon_footprint,
      category,
      subcategory,
      description: input.description.trim().to_owned(),
      amount: input.amount,
      date: input.date,
    })
  }
}
