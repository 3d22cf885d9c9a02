//! # period_core: Date Foundations for Period Arithmetic
//!
//! ## Layer 1 (Foundation) Role
//!
//! period_core is the bottom layer of the workspace, providing:
//! - Calendar date type: `Date` (`types::time`)
//! - Calendar helpers: month lengths and enumeration (`types::calendar`)
//! - Period endpoints decoded from loose definitions (`types::endpoint`)
//! - Month exclusion rules (`types::exclusion`)
//! - Numeric time conversion with CF-style units (`datenum`)
//! - Error type: `PeriodError` (`types::error`)
//!
//! ## Minimal Dependencies
//!
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use period_core::datenum::NumericTimeConfig;
//! use period_core::types::{DateEndpoint, ExclusionRule, Role};
//!
//! let start = DateEndpoint::new([2018, 4], Role::Start).unwrap();
//! let end = DateEndpoint::new("2018-04", Role::End).unwrap();
//! assert_eq!(end.day(), 30);
//! assert!(start.instant() < end.instant());
//!
//! let rule = ExclusionRule::exclude_months([6, 7, 8]).unwrap();
//! assert!(!rule.contains(start.date()));
//!
//! let seconds = start.datenum(&NumericTimeConfig::default()).unwrap();
//! assert_eq!(seconds, 1_522_540_800.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for dates, endpoints, rules and configs

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod datenum;
pub mod types;
