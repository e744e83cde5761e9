//! Error types for `carbonlog-core`.

use thiserror::Error;

/// Validation failures raised at the ingestion boundary.
///
/// The calculator and the aggregations never fail; only user submissions are
/// checked before they are stamped and persisted.
#[derive(Debug, Error)]
pub enum Error {
  #[error("{0} must not be empty")]
  EmptyField(&'static str),

  #[error("amount must be a finite number, got {0}")]
  NonFiniteAmount(f64),

  #[error("amount must not be negative, got {0}")]
  NegativeAmount(f64),

  #[error("target reduction must be a positive number, got {0}")]
  InvalidTarget(f64),

  #[error("date out of range")]
  DateOutOfRange,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
