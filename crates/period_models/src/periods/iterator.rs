//! Segmentation of a period into day, isoweek, month or year sub-periods.
//!
//! Segments are computed eagerly when the iterator is built. Every segment
//! inherits the base period's exclusion rule and numeric time config.
//!
//! Exclusion is applied per granularity:
//! - day: dates in an excluded month are skipped
//! - isoweek: weeks whose center falls in an excluded month are skipped
//! - month: excluded months are skipped
//! - year: the rule does not apply

use std::fmt;

use period_core::types::calendar::{enumerate_days, enumerate_months, enumerate_years};
use period_core::types::{DateEndpoint, ExclusionRule, MonthSet, PeriodError, Role};

use super::granularity::Granularity;
use super::period::Period;

/// Ordered, restartable sequence of the segments of a base period.
///
/// Consuming iteration advances an internal cursor; [`PeriodIterator::reset`]
/// rewinds it. Iterating by reference always walks the full current list.
///
/// # Examples
///
/// ```
/// use period_models::periods::{Granularity, Period, PeriodIterator};
///
/// let base = Period::new([2018, 4], [2018, 5]).unwrap();
/// let days = PeriodIterator::new(&base, Granularity::Day).unwrap();
/// assert_eq!(days.n_periods(), 61);
///
/// let weeks: Vec<_> = base.get_segments("isoweek", true).unwrap().collect();
/// assert_eq!(weeks.first().unwrap().date_label(), "2018-04-01 till 2018-04-01");
/// ```
#[derive(Debug, Clone)]
pub struct PeriodIterator {
    base_period: Period,
    granularity: Granularity,
    segments: Vec<Period>,
    cursor: usize,
}

impl PeriodIterator {
    /// Segments `base_period` at the given granularity.
    ///
    /// # Errors
    /// Only if a segment boundary falls outside the supported date range.
    pub fn new(base_period: &Period, granularity: Granularity) -> Result<Self, PeriodError> {
        let segments = match granularity {
            Granularity::Day => day_segments(base_period)?,
            Granularity::IsoWeek => isoweek_segments(base_period)?,
            Granularity::Month => month_segments(base_period)?,
            Granularity::Year => year_segments(base_period)?,
        };

        tracing::debug!(
            base = %base_period.date_label(),
            granularity = %granularity,
            exclusion_rule = %base_period.exclusion_rule(),
            n_periods = segments.len(),
            "Segmented period"
        );

        Ok(Self {
            base_period: base_period.clone(),
            granularity,
            segments,
            cursor: 0,
        })
    }

    /// Intersects every segment with `period`.
    ///
    /// Segments outside `period` are removed, partially overlapping ones
    /// shrink to the overlap. Resets the cursor.
    pub fn crop_to_period(&mut self, period: &Period) -> &mut Self {
        let before = self.segments.len();
        self.segments = self
            .segments
            .iter()
            .filter_map(|segment| segment.intersect(period))
            .collect();
        self.cursor = 0;

        tracing::debug!(
            crop = %period.date_label(),
            before,
            after = self.segments.len(),
            "Cropped segments"
        );
        self
    }

    /// Removes segments whose start or end month is listed.
    ///
    /// A segment survives only if neither its start month nor its end month
    /// is in `months`. One listed end is enough: a week running from
    /// 2018-03-26 to 2018-04-01 is removed by `filter_month([4])` although
    /// six of its days are in March. Resets the cursor.
    ///
    /// # Errors
    /// `PeriodError::InvalidMonth` if any month is outside 1..=12. The
    /// segment list is left untouched in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use period_models::periods::Period;
    ///
    /// let mut months = Period::single([2018]).unwrap().get_segments("month", false).unwrap();
    /// months.filter_month([6, 7, 8]).unwrap();
    /// assert_eq!(months.n_periods(), 9);
    ///
    /// assert!(months.filter_month([13]).is_err());
    /// assert_eq!(months.n_periods(), 9);
    /// ```
    pub fn filter_month<I>(&mut self, months: I) -> Result<&mut Self, PeriodError>
    where
        I: IntoIterator<Item = u32>,
    {
        let months = MonthSet::new(months)?;
        let before = self.segments.len();
        self.segments
            .retain(|s| !months.contains(s.start().month()) && !months.contains(s.end().month()));
        self.cursor = 0;

        tracing::debug!(
            months = ?months.months(),
            before,
            after = self.segments.len(),
            "Filtered segments by month"
        );
        Ok(self)
    }

    /// Number of segments in the current list.
    #[inline]
    pub fn n_periods(&self) -> usize {
        self.segments.len()
    }

    /// True if no segment is left.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The current segment list.
    #[inline]
    pub fn segments(&self) -> &[Period] {
        &self.segments
    }

    /// Copy of the current segment list.
    pub fn to_vec(&self) -> Vec<Period> {
        self.segments.clone()
    }

    /// Granularity the base period was split by.
    #[inline]
    pub fn segment_granularity(&self) -> Granularity {
        self.granularity
    }

    /// Exclusion rule taken from the base period.
    #[inline]
    pub fn exclusion_rule(&self) -> &ExclusionRule {
        self.base_period.exclusion_rule()
    }

    /// The period that was segmented.
    #[inline]
    pub fn base_period(&self) -> &Period {
        &self.base_period
    }

    /// Rewinds the cursor to the first segment.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

fn day_segments(base: &Period) -> Result<Vec<Period>, PeriodError> {
    let rule = base.exclusion_rule();
    enumerate_days(base.start().date(), base.end().date())
        .into_iter()
        .filter(|date| {
            let excluded = rule.contains(*date);
            if excluded {
                tracing::trace!(%date, "Excluded day segment");
            }
            !excluded
        })
        .map(|date| base.derive(date, date))
        .collect()
}

fn isoweek_segments(base: &Period) -> Result<Vec<Period>, PeriodError> {
    let start = base.start().date();
    let n_days = base.end().date() - start + 1;
    let n_weeks = (n_days + 6) / 7;
    let weekday_offset = i64::from(start.iso_weekday()) - 1;

    let mut segments = Vec::with_capacity(usize::try_from(n_weeks).unwrap_or_default());
    for week in 0..n_weeks {
        let monday = start.add_days(week * 7 - weekday_offset)?;
        let sunday = start.add_days((week + 1) * 7 - 1 - weekday_offset)?;
        let segment = base.derive(monday, sunday)?;
        if base.exclusion_rule().contains_instant(segment.center()) {
            tracing::trace!(week = %segment.date_label(), "Excluded isoweek segment");
            continue;
        }
        segments.push(segment);
    }
    Ok(segments)
}

fn month_segments(base: &Period) -> Result<Vec<Period>, PeriodError> {
    let rule = base.exclusion_rule();
    enumerate_months(base.start().date(), base.end().date())
        .into_iter()
        .filter(|(year, month)| {
            let excluded = rule.contains_month(*month);
            if excluded {
                tracing::trace!(year, month, "Excluded month segment");
            }
            !excluded
        })
        .map(|(year, month)| {
            let definition = [year, month as i32];
            calendar_unit(base, &definition)
        })
        .collect()
}

fn year_segments(base: &Period) -> Result<Vec<Period>, PeriodError> {
    enumerate_years(base.start().year(), base.end().year())
        .into_iter()
        .map(|year| calendar_unit(base, &[year]))
        .collect()
}

/// Full calendar month or year, keeping the base period's rule and config.
fn calendar_unit(base: &Period, definition: &[i32]) -> Result<Period, PeriodError> {
    Period::from_endpoints(
        DateEndpoint::new(definition, Role::Start)?,
        DateEndpoint::new(definition, Role::End)?,
        *base.exclusion_rule(),
        base.config().clone(),
    )
}

impl Iterator for PeriodIterator {
    type Item = Period;

    fn next(&mut self) -> Option<Self::Item> {
        let segment = self.segments.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(segment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.segments.len().saturating_sub(self.cursor);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PeriodIterator {}

impl<'a> IntoIterator for &'a PeriodIterator {
    type Item = &'a Period;
    type IntoIter = std::slice::Iter<'a, Period>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl fmt::Display for PeriodIterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PeriodIterator {} by {} ({}, {} periods)",
            self.base_period.date_label(),
            self.granularity,
            self.exclusion_rule(),
            self.n_periods()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::periods::DurationType;
    use period_core::types::DefinitionGranularity;

    fn summer_excluded() -> ExclusionRule {
        ExclusionRule::exclude_months([5, 6, 7, 8, 9]).unwrap()
    }

    #[test]
    fn test_day_segments() {
        let base = Period::new([2018, 4], [2018, 5]).unwrap();
        let days = PeriodIterator::new(&base, Granularity::Day).unwrap();
        assert_eq!(days.n_periods(), 61);
        assert!(days
            .segments()
            .iter()
            .all(|s| s.duration().duration_type() == DurationType::Day));
    }

    #[test]
    fn test_day_segments_with_exclusion() {
        let base = Period::builder([2024, 4, 16])
            .end([2024, 10, 15])
            .exclusion_rule(summer_excluded())
            .build()
            .unwrap();
        let days = base.get_segments("day", false).unwrap();
        assert_eq!(days.n_periods(), 30);
        assert!(days
            .segments()
            .iter()
            .all(|s| !summer_excluded().contains(s.start().date())));
    }

    #[test]
    fn test_isoweek_segments() {
        let base = Period::single([2018, 4]).unwrap();
        let weeks = base.get_segments("isoweek", false).unwrap();
        assert_eq!(weeks.n_periods(), 5);
        for week in &weeks {
            assert!(week.start().is_monday());
            assert!(week.end().is_sunday());
            assert_eq!(week.duration().duration_type(), DurationType::IsoWeek);
        }
        assert_eq!(weeks.segments()[0].date_label(), "2018-03-26 till 2018-04-01");
        assert_eq!(weeks.segments()[4].date_label(), "2018-04-23 till 2018-04-29");
    }

    #[test]
    fn test_isoweek_segments_with_exclusion() {
        let base = Period::builder([2024, 4, 15])
            .end([2024, 10, 13])
            .exclusion_rule(summer_excluded())
            .build()
            .unwrap();
        let weeks = base.get_segments("isoweek", false).unwrap();
        let labels: Vec<String> = weeks.segments().iter().map(Period::date_label).collect();
        assert_eq!(
            labels,
            vec![
                "2024-04-15 till 2024-04-21",
                "2024-04-22 till 2024-04-28",
                "2024-09-30 till 2024-10-06",
                "2024-10-07 till 2024-10-13",
            ]
        );
    }

    #[test]
    fn test_month_segments_with_exclusion() {
        let base = Period::builder([2023, 10])
            .end([2024, 10])
            .exclusion_rule(summer_excluded())
            .build()
            .unwrap();
        let months = base.get_segments("month", false).unwrap();
        let centers: Vec<u32> = months.map(|s| chrono::Datelike::month(&s.center())).collect();
        assert_eq!(centers, vec![10, 11, 12, 1, 2, 3, 4, 10]);
    }

    #[test]
    fn test_month_segments_keep_month_granularity() {
        let base = Period::new([2018, 4, 15], [2018, 5, 15]).unwrap();
        let months = base.get_segments("month", false).unwrap();
        assert_eq!(months.n_periods(), 2);
        for month in &months {
            assert_eq!(month.definition_granularity(), DefinitionGranularity::Month);
            assert_eq!(month.duration().duration_type(), DurationType::Month);
        }
    }

    #[test]
    fn test_year_segments_ignore_exclusion() {
        let rule = ExclusionRule::exclude_months(1..=12).unwrap();
        let base = Period::builder([2018, 4, 15])
            .end([2020, 2, 1])
            .exclusion_rule(rule)
            .build()
            .unwrap();
        let years = base.get_segments("year", false).unwrap();
        let labels: Vec<String> = years.segments().iter().map(Period::date_label).collect();
        assert_eq!(
            labels,
            vec![
                "2018-01-01 till 2018-12-31",
                "2019-01-01 till 2019-12-31",
                "2020-01-01 till 2020-12-31",
            ]
        );
        assert!(years.segments().iter().all(|s| s.exclusion_rule() == &rule));
    }

    #[test]
    fn test_crop_monthly() {
        let base = Period::new([2018, 4, 15], [2018, 5, 15]).unwrap();
        let months = base.get_segments("month", true).unwrap();
        let labels: Vec<String> = months.segments().iter().map(Period::date_label).collect();
        assert_eq!(
            labels,
            vec!["2018-04-15 till 2018-04-30", "2018-05-01 till 2018-05-15"]
        );
    }

    #[test]
    fn test_crop_yearly() {
        let base = Period::new([2018, 4, 15], [2019, 5, 15]).unwrap();
        let years = base.get_segments("year", true).unwrap();
        let labels: Vec<String> = years.segments().iter().map(Period::date_label).collect();
        assert_eq!(
            labels,
            vec!["2018-04-15 till 2018-12-31", "2019-01-01 till 2019-05-15"]
        );
    }

    #[test]
    fn test_crop_daily_is_unchanged() {
        let base = Period::new([2018, 4, 15], [2018, 5, 15]).unwrap();
        let days = base.get_segments("day", true).unwrap();
        assert_eq!(days.n_periods(), 31);
    }

    #[test]
    fn test_crop_to_other_period() {
        let base = Period::single([2018]).unwrap();
        let mut months = base.get_segments("month", false).unwrap();
        months.crop_to_period(&Period::new([2018, 3, 10], [2018, 4, 5]).unwrap());
        let labels: Vec<String> = months.segments().iter().map(Period::date_label).collect();
        assert_eq!(
            labels,
            vec!["2018-03-10 till 2018-03-31", "2018-04-01 till 2018-04-05"]
        );
        assert_eq!(months.base_period(), &base);
    }

    #[test]
    fn test_filter_month() {
        let base = Period::single([2018]).unwrap();
        let mut weeks = base.get_segments("isoweek", false).unwrap();
        let before = weeks.n_periods();

        weeks.filter_month([4]).unwrap();
        assert!(weeks.n_periods() < before);
        for week in &weeks {
            assert_ne!(week.start().month(), 4);
            assert_ne!(week.end().month(), 4);
        }
    }

    #[test]
    fn test_filter_month_straddling_segment_removed() {
        // week of 2018-04-30 to 2018-05-06 touches April
        let base = Period::new([2018, 4, 30], [2018, 5, 13]).unwrap();
        let mut weeks = base.get_segments("isoweek", false).unwrap();
        assert_eq!(weeks.n_periods(), 2);
        weeks.filter_month([4]).unwrap();
        assert_eq!(weeks.n_periods(), 1);
        assert_eq!(weeks.segments()[0].date_label(), "2018-05-07 till 2018-05-13");
    }

    #[test]
    fn test_filter_month_invalid_is_atomic() {
        let mut months = Period::single([2018])
            .unwrap()
            .get_segments("month", false)
            .unwrap();
        assert_eq!(
            months.filter_month([1, 0]).unwrap_err(),
            PeriodError::InvalidMonth { month: 0 }
        );
        assert_eq!(months.n_periods(), 12);
    }

    #[test]
    fn test_cursor_and_reset() {
        let mut months = Period::new([2018, 1], [2018, 3])
            .unwrap()
            .get_segments("month", false)
            .unwrap();
        assert_eq!(months.len(), 3);
        assert_eq!(months.next().unwrap().start().month(), 1);
        assert_eq!(months.len(), 2);

        months.reset();
        let all: Vec<Period> = months.by_ref().collect();
        assert_eq!(all.len(), 3);
        assert!(months.next().is_none());

        // by-reference iteration ignores the cursor
        assert_eq!((&months).into_iter().count(), 3);

        months.filter_month([2]).unwrap();
        assert_eq!(months.next().unwrap().start().month(), 1);
        assert_eq!(months.next().unwrap().start().month(), 3);
        assert!(months.next().is_none());
    }

    #[test]
    fn test_segments_inherit_config() {
        let base = Period::builder([2018, 4])
            .unit("days since 2000-01-01")
            .build()
            .unwrap();
        let days = base.get_segments("day", true).unwrap();
        assert!(days.segments().iter().all(|s| s.unit() == "days since 2000-01-01"));
    }

    #[test]
    fn test_display() {
        let base = Period::single([2018, 4]).unwrap();
        let weeks = base.get_segments("isoweek", false).unwrap();
        assert_eq!(
            weeks.to_string(),
            "PeriodIterator 2018-04-01 till 2018-04-30 by isoweek (Exclude Rule Not Set, 5 periods)"
        );
        assert_eq!(weeks.segment_granularity(), Granularity::IsoWeek);
        assert!(weeks.exclusion_rule().is_not_set());
        assert_eq!(weeks.to_vec().len(), 5);
    }
}
