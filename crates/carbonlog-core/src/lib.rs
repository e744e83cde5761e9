//! Core types and calculations for the carbonlog footprint tracker.
//!
//! This crate has no HTTP or database dependencies.
//! The emission factor table, the footprint calculator and the dashboard
//! aggregations are pure functions over in-memory data; persistence is
//! expressed only as the [`store::FootprintStore`] trait.

pub mod achievement;
pub mod activity;
pub mod calculator;
pub mod error;
pub mod factors;
pub mod goal;
pub mod profile;
pub mod stats;
pub mod store;
pub mod suggestion;

pub use error::{Error, Result};
