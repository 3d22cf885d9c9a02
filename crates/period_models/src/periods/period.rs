//! Date period definition.

use std::fmt;
use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDateTime, TimeDelta};
use period_core::datenum::{CfTimeConverter, DateNumberConverter, NumericTimeConfig};
use period_core::types::{
    Date, DateDefinition, DateEndpoint, DefinitionGranularity, ExclusionRule, PeriodError, Role,
};

use super::duration::Duration;
use super::granularity::Granularity;
use super::iterator::PeriodIterator;
use super::netcdf::{NetcdfAttributes, NETCDF_DATETIME_FORMAT};

/// A closed date range from the first instant of its start date to the
/// last instant of its end date.
///
/// Immutable once built. Operations that change the bounds return a new
/// period.
///
/// # Examples
///
/// ```
/// use period_models::periods::{DurationType, Period};
///
/// let april = Period::single([2018, 4]).unwrap();
/// assert_eq!(april.start().isoformat(), "2018-04-01T00:00:00");
/// assert_eq!(april.end().isoformat(), "2018-04-30T23:59:59.999999");
/// assert_eq!(april.duration().duration_type(), DurationType::Month);
///
/// let segments = april.get_segments("isoweek", false).unwrap();
/// assert_eq!(segments.n_periods(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Period {
    start: DateEndpoint,
    end: DateEndpoint,
    duration: Duration,
    exclusion_rule: ExclusionRule,
    config: NumericTimeConfig,
}

impl Period {
    /// Creates a builder for a period starting at `start`.
    ///
    /// Without an explicit end, the start definition is reused as the end,
    /// so `[2018]` spans the whole year.
    pub fn builder(start: impl Into<DateDefinition>) -> PeriodBuilder {
        PeriodBuilder::new(start.into())
    }

    /// Creates a period from a start and an end definition with default
    /// settings.
    ///
    /// # Errors
    /// - Decoding errors of either definition
    /// - `PeriodError::InvertedRange` if the end precedes the start
    ///
    /// # Examples
    ///
    /// ```
    /// use period_models::periods::Period;
    /// use period_core::types::PeriodError;
    ///
    /// let period = Period::new([2018, 4, 15], "2018-05").unwrap();
    /// assert_eq!(period.duration().total_days(), 47);
    ///
    /// let inverted = Period::new([2018, 5, 1], [2018, 4, 1]);
    /// assert!(matches!(inverted, Err(PeriodError::InvertedRange { .. })));
    /// ```
    pub fn new(
        start: impl Into<DateDefinition>,
        end: impl Into<DateDefinition>,
    ) -> Result<Self, PeriodError> {
        Self::builder(start).end(end).build()
    }

    /// Creates a period covering exactly the given year, month or day.
    ///
    /// # Errors
    /// Decoding errors of the definition.
    pub fn single(def: impl Into<DateDefinition>) -> Result<Self, PeriodError> {
        Self::builder(def).build()
    }

    /// Period from already decoded endpoints, carrying a rule and config.
    pub(crate) fn from_endpoints(
        start: DateEndpoint,
        end: DateEndpoint,
        exclusion_rule: ExclusionRule,
        config: NumericTimeConfig,
    ) -> Result<Self, PeriodError> {
        let duration = Duration::new(start, end)?;
        Ok(Self {
            start,
            end,
            duration,
            exclusion_rule,
            config,
        })
    }

    /// Full-date period sharing this period's rule and config.
    pub(crate) fn derive(&self, start: Date, end: Date) -> Result<Self, PeriodError> {
        Self::from_endpoints(
            DateEndpoint::from_date(start, Role::Start),
            DateEndpoint::from_date(end, Role::End),
            self.exclusion_rule,
            self.config.clone(),
        )
    }

    /// Returns a copy with a different exclusion rule.
    pub fn with_exclusion_rule(mut self, rule: ExclusionRule) -> Self {
        self.exclusion_rule = rule;
        self
    }

    /// Start endpoint (tcs).
    #[inline]
    pub fn start(&self) -> DateEndpoint {
        self.start
    }

    /// End endpoint (tce).
    #[inline]
    pub fn end(&self) -> DateEndpoint {
        self.end
    }

    /// Duration between start and end.
    #[inline]
    pub fn duration(&self) -> &Duration {
        &self.duration
    }

    /// Exclusion rule applied when segmenting.
    #[inline]
    pub fn exclusion_rule(&self) -> &ExclusionRule {
        &self.exclusion_rule
    }

    /// Numeric time configuration.
    #[inline]
    pub fn config(&self) -> &NumericTimeConfig {
        &self.config
    }

    /// Numeric time unit.
    #[inline]
    pub fn unit(&self) -> &str {
        self.config.unit()
    }

    /// Numeric calendar name.
    #[inline]
    pub fn calendar(&self) -> &str {
        self.config.calendar()
    }

    /// The finer definition granularity of the two endpoints.
    ///
    /// # Examples
    ///
    /// ```
    /// use period_models::periods::Period;
    /// use period_core::types::DefinitionGranularity;
    ///
    /// let period = Period::new("2018", "2018-04").unwrap();
    /// assert_eq!(period.definition_granularity(), DefinitionGranularity::Month);
    /// ```
    pub fn definition_granularity(&self) -> DefinitionGranularity {
        self.start.granularity().max(self.end.granularity())
    }

    /// Identifier `<start>_<end>` with both instants rendered by a strftime
    /// pattern.
    ///
    /// # Errors
    /// `PeriodError::InvalidArgument` if the pattern is malformed or needs
    /// data a naive timestamp does not have (e.g. `%z`).
    ///
    /// # Examples
    ///
    /// ```
    /// use period_models::periods::Period;
    ///
    /// let period = Period::single([2018, 4]).unwrap();
    /// assert_eq!(period.get_id("%Y%m%d").unwrap(), "20180401_20180430");
    /// assert_eq!(period.id(), "20180401T000000_20180430T235959");
    /// ```
    pub fn get_id(&self, format: &str) -> Result<String, PeriodError> {
        let invalid = || PeriodError::InvalidArgument(format!("invalid date format {format:?}"));
        let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(invalid());
        }

        let mut id = String::new();
        write!(
            id,
            "{}_{}",
            self.start.instant().format_with_items(items.iter()),
            self.end.instant().format_with_items(items.iter())
        )
        .map_err(|_| invalid())?;
        Ok(id)
    }

    /// Identifier using the `%Y%m%dT%H%M%S` pattern.
    pub fn id(&self) -> String {
        format!(
            "{}_{}",
            self.start.instant().format(NETCDF_DATETIME_FORMAT),
            self.end.instant().format(NETCDF_DATETIME_FORMAT)
        )
    }

    /// Splits the period into segments of a granularity given by name.
    ///
    /// With `crop_to_period`, segments are intersected with this period so
    /// that none extends past its bounds.
    ///
    /// # Errors
    /// `PeriodError::InvalidSegmentDuration` for an unknown granularity.
    ///
    /// # Examples
    ///
    /// ```
    /// use period_models::periods::Period;
    ///
    /// let period = Period::new([2018, 4, 15], [2018, 5, 15]).unwrap();
    ///
    /// let full = period.get_segments("month", false).unwrap();
    /// assert_eq!(full.segments()[0].date_label(), "2018-04-01 till 2018-04-30");
    ///
    /// let cropped = period.get_segments("month", true).unwrap();
    /// assert_eq!(cropped.segments()[0].date_label(), "2018-04-15 till 2018-04-30");
    /// ```
    pub fn get_segments(
        &self,
        granularity: &str,
        crop_to_period: bool,
    ) -> Result<PeriodIterator, PeriodError> {
        self.split(granularity.parse()?, crop_to_period)
    }

    /// Like [`Period::get_segments`] with a typed granularity.
    ///
    /// # Errors
    /// Only if a segment falls outside the supported date range.
    pub fn split(
        &self,
        granularity: Granularity,
        crop_to_period: bool,
    ) -> Result<PeriodIterator, PeriodError> {
        let mut segments = PeriodIterator::new(self, granularity)?;
        if crop_to_period {
            segments.crop_to_period(self);
        }
        Ok(segments)
    }

    /// netCDF time coverage attributes, with a trailing `Z` if `zulu`.
    ///
    /// # Examples
    ///
    /// ```
    /// use period_models::periods::Period;
    ///
    /// let attrs = Period::single([2018, 4, 1]).unwrap().get_netcdf_attributes(true);
    /// assert_eq!(attrs.time_coverage_start, "20180401T000000Z");
    /// assert_eq!(attrs.time_coverage_end, "20180401T235959Z");
    /// assert_eq!(attrs.time_coverage_duration, "P1D");
    /// ```
    pub fn get_netcdf_attributes(&self, zulu: bool) -> NetcdfAttributes {
        NetcdfAttributes::new(
            self.start.instant(),
            self.end.instant(),
            self.duration.isoformat(),
            zulu,
        )
    }

    /// True if the two periods share at least one calendar date.
    ///
    /// Periods that touch on a single shared date overlap.
    pub fn has_overlap(&self, other: &Period) -> bool {
        self.start.date() <= other.end.date() && self.end.date() >= other.start.date()
    }

    /// Common date range of two periods, or `None` if they do not overlap.
    ///
    /// The result keeps this period's exclusion rule and config and has
    /// day granularity on both ends.
    ///
    /// # Examples
    ///
    /// ```
    /// use period_models::periods::Period;
    ///
    /// let april = Period::single([2018, 4]).unwrap();
    /// let march = Period::single([2018, 3]).unwrap();
    /// assert!(april.intersect(&march).is_none());
    ///
    /// let span = Period::new([2018, 4, 20], [2018, 5, 10]).unwrap();
    /// let common = april.intersect(&span).unwrap();
    /// assert_eq!(common.date_label(), "2018-04-20 till 2018-04-30");
    /// ```
    pub fn intersect(&self, other: &Period) -> Option<Period> {
        if !self.has_overlap(other) {
            return None;
        }
        let start = self.start.date().max(other.start.date());
        let end = self.end.date().min(other.end.date());
        self.derive(start, end).ok()
    }

    /// `"<start instant> till <end instant>"`.
    pub fn label(&self) -> String {
        format!("{} till {}", self.start.instant(), self.end.instant())
    }

    /// `"<start date> till <end date>"`.
    pub fn date_label(&self) -> String {
        format!("{} till {}", self.start.date(), self.end.date())
    }

    /// Midpoint between the start and end instants, rounded to the second.
    pub fn center(&self) -> NaiveDateTime {
        let span = self.end.instant() - self.start.instant();
        let half_seconds = span
            .num_microseconds()
            .map(|us| (0.5 * us as f64 / 1e6).round() as i64)
            .unwrap_or_else(|| span.num_seconds() / 2);
        self.start.instant() + TimeDelta::seconds(half_seconds)
    }

    /// [`Period::center`] as a number under this period's unit and calendar.
    ///
    /// # Errors
    /// Propagates converter errors.
    pub fn center_datenum(&self) -> Result<f64, PeriodError> {
        self.center_datenum_with(&CfTimeConverter)
    }

    /// Like [`Period::center_datenum`] with a caller-supplied converter.
    ///
    /// # Errors
    /// Propagates converter errors.
    pub fn center_datenum_with(
        &self,
        converter: &dyn DateNumberConverter,
    ) -> Result<f64, PeriodError> {
        converter.date_to_number(self.center(), self.unit(), self.calendar())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Period {} - {} ({})",
            self.start.isoformat(),
            self.end.isoformat(),
            self.exclusion_rule
        )
    }
}

/// Builder for [`Period`].
///
/// # Examples
///
/// ```
/// use period_models::periods::Period;
/// use period_core::types::ExclusionRule;
///
/// let period = Period::builder([2023, 10])
///     .end([2024, 10])
///     .exclusion_rule(ExclusionRule::exclude_months([5, 6, 7, 8, 9]).unwrap())
///     .unit("days since 2000-01-01")
///     .build()
///     .unwrap();
///
/// assert_eq!(period.unit(), "days since 2000-01-01");
/// assert_eq!(period.calendar(), "standard");
/// ```
#[derive(Debug, Clone)]
pub struct PeriodBuilder {
    start: DateDefinition,
    end: Option<DateDefinition>,
    exclusion_rule: ExclusionRule,
    unit: Option<String>,
    calendar: Option<String>,
}

impl PeriodBuilder {
    fn new(start: DateDefinition) -> Self {
        Self {
            start,
            end: None,
            exclusion_rule: ExclusionRule::NotSet,
            unit: None,
            calendar: None,
        }
    }

    /// Sets the end definition.
    pub fn end(mut self, end: impl Into<DateDefinition>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Sets the exclusion rule.
    pub fn exclusion_rule(mut self, rule: ExclusionRule) -> Self {
        self.exclusion_rule = rule;
        self
    }

    /// Sets the numeric time unit.
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets the numeric calendar name.
    pub fn calendar(mut self, calendar: impl Into<String>) -> Self {
        self.calendar = Some(calendar.into());
        self
    }

    /// Builds the period.
    ///
    /// # Errors
    /// - Decoding errors of either definition
    /// - `PeriodError::InvertedRange` if the end precedes the start
    ///
    /// Unit and calendar are stored unchecked; a converter that cannot
    /// handle them reports it from [`Period::center_datenum_with`].
    pub fn build(self) -> Result<Period, PeriodError> {
        let mut config = NumericTimeConfig::builder();
        if let Some(unit) = self.unit {
            config = config.unit(unit);
        }
        if let Some(calendar) = self.calendar {
            config = config.calendar(calendar);
        }
        let config = config.build();

        let end = self.end.unwrap_or_else(|| self.start.clone());
        let start = DateEndpoint::new(self.start, Role::Start)?;
        let end = DateEndpoint::new(end, Role::End)?;
        Period::from_endpoints(start, end, self.exclusion_rule, config)
    }
}
