//! Numeric date conversion.
//!
//! This module provides:
//! - [`DateNumberConverter`]: Conversion seam for instants to numbers
//! - [`CfTimeConverter`]: Converter for Gregorian-family CF calendars
//! - [`NumericTimeConfig`]: Unit and calendar configuration with defaults

mod config;
mod converter;

pub use config::{
    NumericTimeConfig, NumericTimeConfigBuilder, DEFAULT_CALENDAR, DEFAULT_TIME_UNIT,
};
pub use converter::{CalendarKind, CfTimeConverter, DateNumberConverter, TimeInterval, TimeUnit};
