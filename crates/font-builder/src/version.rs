//! Font version metadata.

use chrono::{Datelike, NaiveDate, NaiveTime};
use font_types::{Fixed, LongDateTime};

use crate::error::{Error, Result};

/// Seconds between 1904-01-01 (the sfnt epoch) and 1970-01-01.
const SFNT_EPOCH_OFFSET: i64 = 2_082_844_800;

/// Font version information.
///
/// The version date drives `head.fontRevision`, the version name record and
/// the `created`/`modified` timestamps, so a fixed version yields
/// byte-identical fonts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontVersion {
    /// Version date.
    pub date: NaiveDate,
    /// Version tag (e.g., "2024-01-15" or "2024-01-15.1").
    pub tag: String,
}

impl Default for FontVersion {
    fn default() -> Self {
        Self::new(NaiveDate::default(), "1.000")
    }
}

impl FontVersion {
    /// Create a version from a date and tag.
    pub fn new(date: NaiveDate, tag: impl Into<String>) -> Self {
        Self { date, tag: tag.into() }
    }

    /// Parse a version string (YYYY-MM-DD or YYYY-MM-DD.N) or use today's date.
    pub fn parse(value: Option<&str>) -> Result<Self> {
        match value {
            None => {
                let today = chrono::Local::now().date_naive();
                Ok(Self::new(today, today.format("%Y-%m-%d").to_string()))
            }
            Some(v) => {
                if let Some((date_part, build_num)) = v.rsplit_once('.')
                    && build_num.parse::<u32>().is_ok()
                    && let Ok(parsed) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                {
                    return Ok(Self::new(parsed, v));
                }

                NaiveDate::parse_from_str(v, "%Y-%m-%d")
                    .map(|parsed| Self::new(parsed, v))
                    .map_err(|_| Error::InvalidVersion(v.to_string()))
            }
        }
    }

    /// Get the version string (e.g., "Version 2024-01-15").
    pub fn version_string(&self) -> String {
        format!("Version {}", self.tag)
    }

    /// Compute font revision as YYYY.MMDD.
    pub fn revision(&self) -> Fixed {
        let year = f64::from(self.date.year());
        let month_day = f64::from(self.date.month() * 100 + self.date.day()) / 10000.0;
        Fixed::from_f64(year + month_day)
    }

    /// Midnight UTC of the version date, in seconds since 1904-01-01.
    pub fn timestamp(&self) -> LongDateTime {
        let unix = self.date.and_time(NaiveTime::MIN).and_utc().timestamp();
        LongDateTime::new(unix + SFNT_EPOCH_OFFSET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_none() {
        let version = FontVersion::parse(None).unwrap();
        assert_eq!(version.date, chrono::Local::now().date_naive());
    }

    #[test]
    fn test_parse_version_date() {
        let version = FontVersion::parse(Some("2024-12-01")).unwrap();
        assert_eq!(version.date, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(version.tag, "2024-12-01");
    }

    #[test]
    fn test_parse_version_with_build() {
        let version = FontVersion::parse(Some("2024-12-01.1")).unwrap();
        assert_eq!(version.date, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(version.tag, "2024-12-01.1");
    }

    #[test]
    fn test_parse_version_invalid() {
        assert!(matches!(FontVersion::parse(Some("invalid")), Err(Error::InvalidVersion(_))));
    }

    #[test]
    fn test_revision() {
        let version = FontVersion::new(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(), "2024-01-15");
        assert!((version.revision().to_f64() - 2024.0115).abs() < 0.0001);
    }

    #[test]
    fn test_timestamp_epoch() {
        let version = FontVersion::default();
        assert_eq!(version.timestamp(), LongDateTime::new(SFNT_EPOCH_OFFSET));
        assert_eq!(version.version_string(), "Version 1.000");
    }
}
