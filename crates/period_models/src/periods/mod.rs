//! Date periods and their segmentation.
//!
//! This module provides:
//! - [`Period`]: A closed date range built from loose start/end definitions
//! - [`PeriodBuilder`]: Builder for periods with exclusion rules and numeric config
//! - [`Duration`]: Classification of a period as day, isoweek, month, year or custom
//! - [`Granularity`]: Segmentation unit (day, isoweek, month, year)
//! - [`PeriodIterator`]: The segments of a period, with cropping and month filtering
//! - [`NetcdfAttributes`]: Time coverage attributes for netCDF metadata
//!
//! # Examples
//!
//! ```
//! use period_models::periods::{DurationType, Period};
//! use period_core::types::ExclusionRule;
//!
//! let winter = Period::builder([2023, 10])
//!     .end([2024, 4])
//!     .exclusion_rule(ExclusionRule::exclude_months([12]).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let months = winter.get_segments("month", false).unwrap();
//! assert_eq!(months.n_periods(), 6); // December is skipped
//! assert!(months
//!     .segments()
//!     .iter()
//!     .all(|m| m.duration().duration_type() == DurationType::Month));
//! ```

mod duration;
mod granularity;
mod iterator;
mod netcdf;
mod period;

pub use duration::{Duration, DurationType, IsoDuration};
pub use granularity::Granularity;
pub use iterator::PeriodIterator;
pub use netcdf::{NetcdfAttributes, NETCDF_DATETIME_FORMAT};
pub use period::{Period, PeriodBuilder};
