//! Month exclusion rules for period segmentation.
//!
//! An [`ExclusionRule`] is attached to a period and inherited by every
//! segment derived from it. Segmentation skips dates whose calendar month is
//! excluded.

use std::fmt;

use chrono::{Datelike, NaiveDateTime};

use super::error::PeriodError;
use super::time::Date;

/// Set of calendar months (1..=12) stored as a bitmask.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(into = "Vec<u32>", try_from = "Vec<u32>")
)]
pub struct MonthSet(u16);

impl MonthSet {
    /// Builds a month set, validating every entry.
    ///
    /// # Errors
    /// `PeriodError::InvalidMonth` on the first value outside 1..=12. Nothing
    /// is built in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use period_core::types::exclusion::MonthSet;
    ///
    /// let summer = MonthSet::new([7, 5, 6]).unwrap();
    /// assert_eq!(summer.months(), vec![5, 6, 7]);
    /// assert!(MonthSet::new([0, 1]).is_err());
    /// ```
    pub fn new<I>(months: I) -> Result<Self, PeriodError>
    where
        I: IntoIterator<Item = u32>,
    {
        months.into_iter().try_fold(MonthSet(0), |set, month| {
            if (1..=12).contains(&month) {
                Ok(MonthSet(set.0 | (1 << (month - 1))))
            } else {
                Err(PeriodError::InvalidMonth {
                    month: i64::from(month),
                })
            }
        })
    }

    /// Returns true if `month` is in the set.
    #[inline]
    pub fn contains(&self, month: u32) -> bool {
        (1..=12).contains(&month) && self.0 & (1 << (month - 1)) != 0
    }

    /// Months in ascending order.
    pub fn months(&self) -> Vec<u32> {
        (1..=12).filter(|m| self.contains(*m)).collect()
    }

    /// Returns true if no month is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl From<MonthSet> for Vec<u32> {
    fn from(set: MonthSet) -> Self {
        set.months()
    }
}

impl TryFrom<Vec<u32>> for MonthSet {
    type Error = PeriodError;

    fn try_from(months: Vec<u32>) -> Result<Self, Self::Error> {
        MonthSet::new(months)
    }
}

/// Predicate deciding which dates are dropped during segmentation.
///
/// # Examples
///
/// ```
/// use period_core::types::exclusion::ExclusionRule;
/// use period_core::types::time::Date;
///
/// let rule = ExclusionRule::exclude_months([5, 6, 7, 8, 9]).unwrap();
/// assert!(rule.contains(Date::from_ymd(2015, 6, 10).unwrap()));
/// assert!(!rule.contains(Date::from_ymd(2015, 10, 1).unwrap()));
///
/// assert!(!ExclusionRule::NotSet.contains(Date::from_ymd(2015, 6, 10).unwrap()));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExclusionRule {
    /// Excludes nothing.
    #[default]
    NotSet,
    /// Excludes every date in one of the listed months.
    ExcludeMonths(MonthSet),
}

impl ExclusionRule {
    /// Rule excluding the given months.
    ///
    /// # Errors
    /// `PeriodError::InvalidMonth` if any month is outside 1..=12.
    pub fn exclude_months<I>(months: I) -> Result<Self, PeriodError>
    where
        I: IntoIterator<Item = u32>,
    {
        MonthSet::new(months).map(ExclusionRule::ExcludeMonths)
    }

    /// Returns true if `date` falls in an excluded month.
    #[inline]
    pub fn contains(&self, date: Date) -> bool {
        self.contains_month(date.month())
    }

    /// Returns true if the calendar date of `instant` falls in an excluded month.
    #[inline]
    pub fn contains_instant(&self, instant: NaiveDateTime) -> bool {
        self.contains_month(instant.month())
    }

    /// Returns true if `month` is excluded.
    #[inline]
    pub fn contains_month(&self, month: u32) -> bool {
        match self {
            ExclusionRule::NotSet => false,
            ExclusionRule::ExcludeMonths(set) => set.contains(month),
        }
    }

    /// Excluded months in ascending order (empty when not set).
    pub fn months(&self) -> Vec<u32> {
        match self {
            ExclusionRule::NotSet => Vec::new(),
            ExclusionRule::ExcludeMonths(set) => set.months(),
        }
    }

    /// Returns true for [`ExclusionRule::NotSet`].
    pub fn is_not_set(&self) -> bool {
        matches!(self, ExclusionRule::NotSet)
    }
}

impl fmt::Display for ExclusionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionRule::NotSet => write!(f, "Exclude Rule Not Set"),
            ExclusionRule::ExcludeMonths(set) => write!(f, "ExcludeMonths: {:?}", set.months()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> Date {
        Date::from_ymd(year, month, day).unwrap()
    }

    #[test]
    fn test_invalid_months_rejected() {
        assert_eq!(
            ExclusionRule::exclude_months([0]),
            Err(PeriodError::InvalidMonth { month: 0 })
        );
        assert_eq!(
            ExclusionRule::exclude_months([13]),
            Err(PeriodError::InvalidMonth { month: 13 })
        );
        assert!(ExclusionRule::exclude_months([0, 1, 2]).is_err());
    }

    #[test]
    fn test_single_month() {
        let rule = ExclusionRule::exclude_months([1]).unwrap();
        assert_eq!(rule.months(), vec![1]);
    }

    #[test]
    fn test_months_are_sorted_and_deduplicated() {
        let rule = ExclusionRule::exclude_months([7, 6, 7]).unwrap();
        assert_eq!(rule.months(), vec![6, 7]);
    }

    #[test]
    fn test_empty_list_excludes_nothing() {
        let rule = ExclusionRule::exclude_months(Vec::<u32>::new()).unwrap();
        for month in 1..=12 {
            assert!(!rule.contains_month(month));
        }
    }

    #[test]
    fn test_contains() {
        let rule = ExclusionRule::exclude_months([5, 6, 7, 8, 9]).unwrap();
        assert!(rule.contains(ymd(2015, 5, 1)));
        assert!(rule.contains(ymd(2015, 9, 30)));
        assert!(!rule.contains(ymd(2015, 4, 30)));
        assert!(!rule.contains(ymd(2015, 10, 1)));
        assert!(rule.contains_instant(ymd(2015, 6, 10).end_of_day()));
    }

    #[test]
    fn test_not_set_contains_nothing() {
        let rule = ExclusionRule::default();
        assert!(rule.is_not_set());
        assert!(rule.months().is_empty());
        for month in 1..=12 {
            assert!(!rule.contains(ymd(2020, month, 1)));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ExclusionRule::NotSet.to_string(), "Exclude Rule Not Set");
        let rule = ExclusionRule::exclude_months([6, 7]).unwrap();
        assert_eq!(rule.to_string(), "ExcludeMonths: [6, 7]");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_month_list() {
        let rule = ExclusionRule::exclude_months([6, 7]).unwrap();
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#"{"ExcludeMonths":[6,7]}"#);
        let back: ExclusionRule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);

        let bad: Result<ExclusionRule, _> = serde_json::from_str(r#"{"ExcludeMonths":[13]}"#);
        assert!(bad.is_err());
    }
}
