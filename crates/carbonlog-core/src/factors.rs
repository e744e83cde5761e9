//! The emission factor table.
//!
//! A static two-level mapping from category to subcategory to a factor in
//! kg CO₂-equivalent per unit of the category's canonical unit. The table is
//! compiled in; changing a factor requires a new release.
//!
//! Lookups distinguish an unregistered pair (`None`) from a registered zero
//! factor (`Some(0.0)`, e.g. cycling), even though both yield a zero
//! footprint today.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator as _};

/// Unit reported for categories the table does not know.
pub const FALLBACK_UNIT: &str = "unit";

// ─── Category ────────────────────────────────────────────────────────────────

/// Top-level activity classification. Drives both the factor lookup and the
/// display unit.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
  EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
  Transport,
  Electricity,
  Food,
  Waste,
  Home,
}

impl Category {
  /// Canonical measurement unit, shared by every subcategory.
  pub fn unit(self) -> &'static str {
    match self {
      Self::Transport => "km",
      Self::Electricity => "kWh",
      Self::Food => "kg",
      Self::Waste => "kg",
      Self::Home => "kWh",
    }
  }

  pub fn display_name(self) -> &'static str {
    match self {
      Self::Transport => "Transport",
      Self::Electricity => "Electricity",
      Self::Food => "Food",
      Self::Waste => "Waste",
      Self::Home => "Home",
    }
  }

  /// Registered subcategories, in table order.
  pub fn subcategories(self) -> &'static [Subcategory] {
    match self {
      Self::Transport => TRANSPORT,
      Self::Electricity => ELECTRICITY,
      Self::Food => FOOD,
      Self::Waste => WASTE,
      Self::Home => HOME,
    }
  }

  /// Factor for `subcategory` within this category.
  pub fn factor(self, subcategory: &str) -> Option<f64> {
    self
      .subcategories()
      .iter()
      .find(|s| s.id == subcategory)
      .map(|s| s.factor)
  }
}

// ─── Table ───────────────────────────────────────────────────────────────────

/// One row of the factor table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Subcategory {
  pub id:     &'static str,
  pub name:   &'static str,
  /// kg CO₂e per unit of the owning category's unit.
  pub factor: f64,
}

const fn sub(id: &'static str, name: &'static str, factor: f64) -> Subcategory {
  Subcategory { id, name, factor }
}

const TRANSPORT: &[Subcategory] = &[
  sub("car_gasoline", "Car (Gasoline)", 0.251),
  sub("car_diesel", "Car (Diesel)", 0.217),
  sub("car_electric", "Car (Electric)", 0.051),
  sub("bus", "Bus", 0.089),
  sub("train", "Train", 0.041),
  sub("airplane", "Airplane", 0.255),
  sub("motorcycle", "Motorcycle", 0.113),
  sub("bike", "Bike", 0.0),
  sub("walking", "Walking", 0.0),
];

const ELECTRICITY: &[Subcategory] = &[
  sub("kwh", "Grid Electricity", 0.5),
  sub("natural_gas", "Natural Gas", 0.185),
  sub("renewable", "Renewable Energy", 0.05),
];

const FOOD: &[Subcategory] = &[
  sub("beef", "Beef", 27.0),
  sub("pork", "Pork", 12.1),
  sub("chicken", "Chicken", 6.9),
  sub("fish", "Fish", 6.1),
  sub("dairy", "Dairy", 3.2),
  sub("vegetables", "Vegetables", 2.0),
  sub("fruits", "Fruits", 1.1),
  sub("grains", "Grains", 1.4),
];

const WASTE: &[Subcategory] = &[
  sub("landfill", "Landfill Waste", 0.5),
  sub("recycling", "Recycling", 0.1),
  sub("composting", "Composting", 0.05),
];

const HOME: &[Subcategory] = &[
  sub("heating_gas", "Gas Heating", 0.185),
  sub("cooling_electric", "Electric Cooling", 0.5),
  sub("water_heating", "Water Heating", 0.3),
];

// ─── Lookups ─────────────────────────────────────────────────────────────────

/// Emission factor for a `(category, subcategory)` pair given as free-form
/// strings. `None` when either level is not registered.
pub fn lookup_factor(category: &str, subcategory: &str) -> Option<f64> {
  category.parse::<Category>().ok()?.factor(subcategory)
}

/// Canonical unit for `category`, independent of subcategory.
pub fn unit_for(category: &str) -> &'static str {
  category
    .parse::<Category>()
    .map(Category::unit)
    .unwrap_or(FALLBACK_UNIT)
}

/// A registered factor together with the unit it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorInfo {
  pub factor: f64,
  pub unit:   &'static str,
}

pub fn factor_info(category: &str, subcategory: &str) -> Option<FactorInfo> {
  let category = category.parse::<Category>().ok()?;
  let factor = category.factor(subcategory)?;
  Some(FactorInfo { factor, unit: category.unit() })
}

// ─── Catalogue ───────────────────────────────────────────────────────────────

/// A category and its subcategories, shaped for form-building clients.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryEntry {
  pub category:      Category,
  pub name:          &'static str,
  pub unit:          &'static str,
  pub subcategories: &'static [Subcategory],
}

/// The whole table in declaration order.
pub fn catalogue() -> Vec<CategoryEntry> {
  Category::iter()
    .map(|category| CategoryEntry {
      category,
      name: category.display_name(),
      unit: category.unit(),
      subcategories: category.subcategories(),
    })
    .collect()
}
