//! Date/time inputs for proof entries.
//!
//! Entry constructors accept either an instant the caller already holds or the raw text from a
//! claim map. Text is parsed eagerly so an entry never exists with an unparsed date.

use crate::{HcertError, HcertResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// A date-bearing field value, either already parsed or still in its wire text form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateValue {
    Instant(DateTime<Utc>),
    Text(String),
}

impl DateValue {
    /// Resolves the value to an instant.
    ///
    /// Text is tried as RFC 3339, then as ISO 8601 with a basic offset (`+0200`), then as a
    /// zone-less `YYYY-MM-DDTHH:MM:SS[.f]` (read as UTC), then as a bare `YYYY-MM-DD` at
    /// midnight UTC. A space may stand in for the `T` separator.
    ///
    /// # Errors
    ///
    /// Returns [`HcertError::InvalidDate`] naming `field` if the text matches none of the forms.
    pub fn resolve(self, field: &'static str) -> HcertResult<DateTime<Utc>> {
        match self {
            DateValue::Instant(instant) => Ok(instant),
            DateValue::Text(text) => {
                parse_date_time(&text).ok_or(HcertError::InvalidDate { field, value: text })
            }
        }
    }
}

impl From<DateTime<Utc>> for DateValue {
    fn from(instant: DateTime<Utc>) -> Self {
        DateValue::Instant(instant)
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        DateValue::Instant(start_of_day(date))
    }
}

impl From<String> for DateValue {
    fn from(text: String) -> Self {
        DateValue::Text(text)
    }
}

impl From<&str> for DateValue {
    fn from(text: &str) -> Self {
        DateValue::Text(text.to_owned())
    }
}

pub(crate) fn parse_date_time(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(instant) = DateTime::parse_from_str(text, format) {
            return Some(instant.with_timezone(&Utc));
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(start_of_day)
}

pub(crate) fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_plain_dates_at_midnight_utc() {
        let parsed = DateValue::from("2021-05-29").resolve("dt").expect("date");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2021, 5, 29, 0, 0, 0).unwrap());
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = DateValue::from("2021-05-29T10:30:00+02:00")
            .resolve("sc")
            .expect("rfc3339");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2021, 5, 29, 8, 30, 0).unwrap());
    }

    #[test]
    fn parses_zoneless_date_time_as_utc() {
        let parsed = DateValue::from("2021-05-29T10:30:00.250")
            .resolve("sc")
            .expect("zoneless");
        assert_eq!(
            parsed,
            Utc.with_ymd_and_hms(2021, 5, 29, 10, 30, 0).unwrap()
                + chrono::Duration::milliseconds(250)
        );
    }

    #[test]
    fn parses_basic_offsets() {
        let parsed = DateValue::from("2021-05-30T10:12:22+0200")
            .resolve("sc")
            .expect("basic offset");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2021, 5, 30, 8, 12, 22).unwrap());
    }

    #[test]
    fn parses_space_separated_date_times() {
        let parsed = DateValue::from("2021-05-30 10:12:22")
            .resolve("sc")
            .expect("space separated");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2021, 5, 30, 10, 12, 22).unwrap());

        let parsed = DateValue::from("2021-05-30 10:12:22+01:00")
            .resolve("sc")
            .expect("space separated with offset");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2021, 5, 30, 9, 12, 22).unwrap());
    }

    #[test]
    fn passes_instants_through() {
        let instant = Utc.with_ymd_and_hms(2022, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(DateValue::from(instant).resolve("df").unwrap(), instant);
    }

    #[test]
    fn rejects_unparseable_text() {
        let err = DateValue::from("29.05.2021")
            .resolve("dt")
            .expect_err("should reject");
        assert!(matches!(
            err,
            HcertError::InvalidDate { field: "dt", ref value } if value == "29.05.2021"
        ));
    }
}
