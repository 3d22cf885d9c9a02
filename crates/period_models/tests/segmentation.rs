//! Integration tests for period construction and segmentation.
//!
//! Run with `RUST_LOG=period_models=trace` to see segmentation events.

use chrono::{Datelike, NaiveDate, Timelike};
use period_core::types::{ExclusionRule, PeriodError};
use period_models::periods::{DurationType, Granularity, Period};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn labels(period: &Period, granularity: &str, crop: bool) -> Vec<String> {
    period
        .get_segments(granularity, crop)
        .unwrap()
        .segments()
        .iter()
        .map(Period::date_label)
        .collect()
}

#[test]
fn test_month_round_trip_definitions() {
    let first = NaiveDate::from_ymd_opt(2018, 2, 1).unwrap();
    let last = NaiveDate::from_ymd_opt(2018, 2, 28).unwrap();

    let periods = [
        Period::single([2018, 2]).unwrap(),
        Period::single("2018-02").unwrap(),
        Period::new(first, last).unwrap(),
        Period::new(vec![2018, 2, 1], "2018-02-28").unwrap(),
    ];
    for period in &periods {
        assert_eq!(period.start().date(), periods[0].start().date());
        assert_eq!(period.end().date(), periods[0].end().date());
        assert_eq!(period.duration().duration_type(), DurationType::Month);
    }
}

#[test]
fn test_end_instant_is_last_microsecond() {
    let period = Period::single([2018, 4]).unwrap();
    let end = period.end().instant();
    assert_eq!(end.date(), NaiveDate::from_ymd_opt(2018, 4, 30).unwrap());
    assert_eq!(end.nanosecond(), 999_999_000);
    assert_eq!(end.format("%H:%M:%S").to_string(), "23:59:59");
}

#[test]
fn test_inverted_range() {
    assert!(matches!(
        Period::new([2018, 5, 1], [2018, 4, 1]),
        Err(PeriodError::InvertedRange { .. })
    ));
}

#[test]
fn test_invalid_definitions() {
    assert!(matches!(
        Period::single([2018, 4, 31]),
        Err(PeriodError::InvalidDate { .. })
    ));
    assert!(matches!(
        Period::single(Vec::<i32>::new()),
        Err(PeriodError::InvalidComponentCount { count: 0 })
    ));
    assert!(matches!(
        Period::single([2018, 4, 1, 0]),
        Err(PeriodError::InvalidComponentCount { count: 4 })
    ));
    assert!(matches!(
        Period::single("2018-04-01T00:00:00"),
        Err(PeriodError::InvalidDateDefinition(_))
    ));
}

#[test]
fn test_daily_segments_of_two_months() {
    init_tracing();
    let period = Period::new([2018, 4], [2018, 5]).unwrap();
    let days = period.get_segments("day", false).unwrap();
    assert_eq!(days.n_periods(), 61);
    assert_eq!(days.segments()[0].date_label(), "2018-04-01 till 2018-04-01");
    assert_eq!(days.segments()[60].date_label(), "2018-05-31 till 2018-05-31");
}

#[test]
fn test_isoweeks_of_april_2018() {
    init_tracing();
    let period = Period::single([2018, 4]).unwrap();
    let weeks = period.get_segments("isoweek", false).unwrap();
    assert_eq!(weeks.n_periods(), 5);
    for week in &weeks {
        assert!(week.start().is_monday());
        assert!(week.end().is_sunday());
        assert_eq!(week.duration().isoformat(), "P7D");
    }
}

#[test]
fn test_crop_monthly() {
    let period = Period::new([2018, 4, 15], [2018, 5, 15]).unwrap();
    assert_eq!(
        labels(&period, "month", true),
        vec!["2018-04-15 till 2018-04-30", "2018-05-01 till 2018-05-15"]
    );
    assert_eq!(
        labels(&period, "month", false),
        vec!["2018-04-01 till 2018-04-30", "2018-05-01 till 2018-05-31"]
    );
}

#[test]
fn test_crop_yearly() {
    let period = Period::new([2018, 4, 15], [2019, 5, 15]).unwrap();
    assert_eq!(
        labels(&period, "year", true),
        vec!["2018-04-15 till 2018-12-31", "2019-01-01 till 2019-05-15"]
    );
}

#[test]
fn test_exclusion_monthly_centers() {
    init_tracing();
    let period = Period::builder([2023, 10])
        .end([2024, 10])
        .exclusion_rule(ExclusionRule::exclude_months([5, 6, 7, 8, 9]).unwrap())
        .build()
        .unwrap();
    let months = period.split(Granularity::Month, false).unwrap();
    let centers: Vec<u32> = months.map(|m| m.center().month()).collect();
    assert_eq!(centers, vec![10, 11, 12, 1, 2, 3, 4, 10]);
}

#[test]
fn test_exclusion_isoweek_and_day_counts() {
    let rule = ExclusionRule::exclude_months([5, 6, 7, 8, 9]).unwrap();
    let days = Period::builder([2024, 4, 16])
        .end([2024, 10, 15])
        .exclusion_rule(rule)
        .build()
        .unwrap();
    assert_eq!(days.get_segments("DAY", false).unwrap().n_periods(), 30);

    let weeks = Period::builder([2024, 4, 15])
        .end([2024, 10, 13])
        .exclusion_rule(rule)
        .build()
        .unwrap();
    assert_eq!(weeks.get_segments("isoweek", false).unwrap().n_periods(), 4);
}

#[test]
fn test_intersection_empty() {
    let april = Period::single([2018, 4]).unwrap();
    let march = Period::single([2018, 3]).unwrap();
    assert!(!april.has_overlap(&march));
    assert!(april.intersect(&march).is_none());
}

#[test]
fn test_netcdf_attributes() {
    let period = Period::single([2018, 4, 1]).unwrap();
    let attrs = period.get_netcdf_attributes(true);
    assert_eq!(attrs.get("time_coverage_start"), Some("20180401T000000Z"));
    assert_eq!(attrs.get("time_coverage_end"), Some("20180401T235959Z"));
    assert_eq!(attrs.get("time_coverage_duration"), Some("P1D"));
    assert_eq!(attrs.get("time_coverage_resolution"), Some("P1D"));
}

#[test]
fn test_duration_strings() {
    let cases: [(Period, &str, DurationType); 6] = [
        (Period::single([2018]).unwrap(), "P1Y", DurationType::Year),
        (Period::single([2018, 4]).unwrap(), "P1M", DurationType::Month),
        (Period::single([2018, 4, 1]).unwrap(), "P1D", DurationType::Day),
        (
            Period::new([2018, 4, 1], [2018, 4, 2]).unwrap(),
            "P2D",
            DurationType::Custom,
        ),
        (
            Period::new([2018, 10], [2019, 4]).unwrap(),
            "P7M",
            DurationType::Custom,
        ),
        (
            Period::new([2018, 10], [2020, 9]).unwrap(),
            "P2Y",
            DurationType::Custom,
        ),
    ];
    for (period, iso, kind) in cases {
        assert_eq!(period.duration().isoformat(), iso, "{}", period.date_label());
        assert_eq!(period.duration().duration_type(), kind);
    }
}
