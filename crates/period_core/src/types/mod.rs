//! Core date types.
//!
//! This module provides:
//! - `time`: The [`Date`] newtype and its boundary instants
//! - `calendar`: Month lengths and inclusive day/month/year enumeration
//! - `endpoint`: Decoding of period starts and ends from loose definitions
//! - `exclusion`: Month-based exclusion rules applied during segmentation
//! - `error`: The [`PeriodError`] taxonomy shared by both crates
//!
//! # Re-exports
//!
//! Commonly used types are re-exported at this module level.

pub mod calendar;
pub mod endpoint;
pub mod error;
pub mod exclusion;
pub mod time;

// Re-export commonly used types at module level
pub use calendar::{days_in_month, enumerate_days, enumerate_months, enumerate_years};
pub use endpoint::{DateDefinition, DateEndpoint, DefinitionGranularity, Role};
pub use error::PeriodError;
pub use exclusion::{ExclusionRule, MonthSet};
pub use time::Date;
