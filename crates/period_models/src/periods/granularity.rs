//! Segmentation granularity enumeration.

use std::fmt;
use std::str::FromStr;

use period_core::types::PeriodError;

/// Unit used to split a period into segments.
///
/// # Examples
///
/// ```
/// use period_models::periods::Granularity;
///
/// let g: Granularity = "monthly".parse().unwrap();
/// assert_eq!(g, Granularity::Month);
/// assert_eq!(g.iso_token(), Some("P1M"));
/// assert!("quarter".parse::<Granularity>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Granularity {
    /// One calendar day.
    Day,
    /// Monday through Sunday.
    IsoWeek,
    /// One calendar month.
    Month,
    /// One calendar year.
    Year,
}

impl Granularity {
    /// All granularities, finest first.
    pub const ALL: [Granularity; 4] = [
        Granularity::Day,
        Granularity::IsoWeek,
        Granularity::Month,
        Granularity::Year,
    ];

    /// Returns the lowercase name.
    ///
    /// # Examples
    ///
    /// ```
    /// use period_models::periods::Granularity;
    ///
    /// assert_eq!(Granularity::IsoWeek.name(), "isoweek");
    /// assert_eq!(Granularity::Year.name(), "year");
    /// ```
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::IsoWeek => "isoweek",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }

    /// ISO 8601 token of one unit. Isoweeks have none since `P7D` does
    /// not imply Monday alignment.
    #[inline]
    pub fn iso_token(&self) -> Option<&'static str> {
        match self {
            Granularity::Day => Some("P1D"),
            Granularity::IsoWeek => None,
            Granularity::Month => Some("P1M"),
            Granularity::Year => Some("P1Y"),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Granularity {
    type Err = PeriodError;

    /// Parses a granularity, case-insensitively.
    ///
    /// Accepted: `day`/`daily`/`P1D`, `isoweek`/`isoweekly`,
    /// `month`/`monthly`/`P1M`, `year`/`yearly`/`P1Y`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" | "p1d" => Ok(Granularity::Day),
            "isoweek" | "isoweekly" => Ok(Granularity::IsoWeek),
            "month" | "monthly" | "p1m" => Ok(Granularity::Month),
            "year" | "yearly" | "p1y" => Ok(Granularity::Year),
            _ => Err(PeriodError::InvalidSegmentDuration(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        for g in Granularity::ALL {
            assert_eq!(g.name().parse::<Granularity>().unwrap(), g);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("DAY".parse::<Granularity>().unwrap(), Granularity::Day);
        assert_eq!("IsoWeek".parse::<Granularity>().unwrap(), Granularity::IsoWeek);
        assert_eq!("P1m".parse::<Granularity>().unwrap(), Granularity::Month);
        assert_eq!(" yearly ".parse::<Granularity>().unwrap(), Granularity::Year);
    }

    #[test]
    fn test_parse_invalid() {
        for text in ["week", "P7D", "quarterly", ""] {
            assert_eq!(
                text.parse::<Granularity>(),
                Err(PeriodError::InvalidSegmentDuration(text.to_string()))
            );
        }
    }

    #[test]
    fn test_iso_token() {
        assert_eq!(Granularity::Day.iso_token(), Some("P1D"));
        assert_eq!(Granularity::IsoWeek.iso_token(), None);
        assert_eq!(Granularity::Year.iso_token(), Some("P1Y"));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Granularity::Month), "month");
    }
}
