//! netCDF time coverage attributes.

use chrono::NaiveDateTime;

/// Timestamp pattern of `time_coverage_start`/`time_coverage_end`.
pub const NETCDF_DATETIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// The four time coverage attributes of the netCDF attribute convention.
///
/// Duration and resolution both carry the period's ISO 8601 duration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NetcdfAttributes {
    /// Start instant, `YYYYMMDDTHHMMSS[Z]`.
    pub time_coverage_start: String,
    /// End instant, `YYYYMMDDTHHMMSS[Z]`.
    pub time_coverage_end: String,
    /// ISO 8601 duration of the period.
    pub time_coverage_duration: String,
    /// Same value as `time_coverage_duration`.
    pub time_coverage_resolution: String,
}

impl NetcdfAttributes {
    pub(crate) fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        isoformat: String,
        zulu: bool,
    ) -> Self {
        let stamp = |instant: NaiveDateTime| {
            let mut text = instant.format(NETCDF_DATETIME_FORMAT).to_string();
            if zulu {
                text.push('Z');
            }
            text
        };
        Self {
            time_coverage_start: stamp(start),
            time_coverage_end: stamp(end),
            time_coverage_duration: isoformat.clone(),
            time_coverage_resolution: isoformat,
        }
    }

    /// Attribute names and values, in convention order.
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("time_coverage_start", &self.time_coverage_start),
            ("time_coverage_end", &self.time_coverage_end),
            ("time_coverage_duration", &self.time_coverage_duration),
            ("time_coverage_resolution", &self.time_coverage_resolution),
        ]
    }

    /// Looks up an attribute by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries()
            .into_iter()
            .find_map(|(name, value)| (name == key).then_some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn attributes(zulu: bool) -> NetcdfAttributes {
        let day = NaiveDate::from_ymd_opt(2018, 4, 1).unwrap();
        NetcdfAttributes::new(
            day.and_hms_opt(0, 0, 0).unwrap(),
            day.and_hms_micro_opt(23, 59, 59, 999_999).unwrap(),
            "P1D".to_string(),
            zulu,
        )
    }

    #[test]
    fn test_zulu_suffix() {
        let attrs = attributes(true);
        assert_eq!(attrs.time_coverage_start, "20180401T000000Z");
        assert_eq!(attrs.time_coverage_end, "20180401T235959Z");

        let attrs = attributes(false);
        assert_eq!(attrs.time_coverage_start, "20180401T000000");
        assert_eq!(attrs.time_coverage_end, "20180401T235959");
    }

    #[test]
    fn test_lookup() {
        let attrs = attributes(true);
        assert_eq!(attrs.get("time_coverage_duration"), Some("P1D"));
        assert_eq!(attrs.get("time_coverage_resolution"), Some("P1D"));
        assert_eq!(attrs.get("time_coverage_center"), None);
        assert_eq!(attrs.entries().len(), 4);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_keys() {
        let json = serde_json::to_value(attributes(true)).unwrap();
        assert_eq!(json["time_coverage_start"], "20180401T000000Z");
        assert_eq!(json["time_coverage_resolution"], "P1D");
    }
}
