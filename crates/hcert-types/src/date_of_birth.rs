//! Partial-precision date of birth.
//!
//! Health certificates carry the holder's birth date with whatever precision the issuer knew:
//! a year, a year and month, a full date, or nothing at all. The stored value is never
//! completed or guessed; [`DateOfBirth::formatted`] pads the missing parts with `XX` for display.

/// Errors that can occur when creating a [`DateOfBirth`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DateOfBirthError {
    #[error("invalid date of birth: {0}")]
    Invalid(String),
}

/// How much of a [`DateOfBirth`] is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatePrecision {
    /// The date of birth is empty.
    Unknown,
    /// `YYYY`
    Year,
    /// `YYYY-MM`
    YearMonth,
    /// `YYYY-MM-DD`
    Day,
}

/// A birth date matching `(19|20)\d\d(-\d\d){0,2}`, or the empty string.
///
/// Month and day digits are not range-checked; issuers are trusted to send calendar values and
/// the value is only ever displayed, never used for arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateOfBirth(String);

impl DateOfBirth {
    /// Validates `input` against the partial-date grammar.
    ///
    /// # Errors
    ///
    /// Returns [`DateOfBirthError::Invalid`] if `input` is neither empty nor one of
    /// `YYYY`, `YYYY-MM`, `YYYY-MM-DD` with a year in the 1900s or 2000s.
    pub fn new(input: impl Into<String>) -> Result<Self, DateOfBirthError> {
        let value = input.into();
        if precision_of(&value).is_none() {
            return Err(DateOfBirthError::Invalid(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn precision(&self) -> DatePrecision {
        // Construction guarantees the grammar holds.
        precision_of(&self.0).unwrap_or(DatePrecision::Unknown)
    }

    /// Renders the date as `YYYY-MM-DD`, substituting `XX` for unknown month or day.
    ///
    /// An empty date of birth stays empty.
    pub fn formatted(&self) -> String {
        match self.precision() {
            DatePrecision::Year => format!("{}-XX-XX", self.0),
            DatePrecision::YearMonth => format!("{}-XX", self.0),
            DatePrecision::Day | DatePrecision::Unknown => self.0.clone(),
        }
    }
}

fn precision_of(value: &str) -> Option<DatePrecision> {
    let bytes = value.as_bytes();
    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);

    let precision = match bytes.len() {
        0 => return Some(DatePrecision::Unknown),
        4 => DatePrecision::Year,
        7 => DatePrecision::YearMonth,
        10 => DatePrecision::Day,
        _ => return None,
    };

    if !matches!(&bytes[0..2], b"19" | b"20") || !digits(2..4) {
        return None;
    }
    if bytes.len() >= 7 && (bytes[4] != b'-' || !digits(5..7)) {
        return None;
    }
    if bytes.len() == 10 && (bytes[7] != b'-' || !digits(8..10)) {
        return None;
    }

    Some(precision)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_permitted_precision() {
        assert_eq!(
            DateOfBirth::new("").expect("empty").precision(),
            DatePrecision::Unknown
        );
        assert_eq!(
            DateOfBirth::new("1990").expect("year").precision(),
            DatePrecision::Year
        );
        assert_eq!(
            DateOfBirth::new("1990-05").expect("year-month").precision(),
            DatePrecision::YearMonth
        );
        assert_eq!(
            DateOfBirth::new("2001-05-12").expect("full").precision(),
            DatePrecision::Day
        );
    }

    #[test]
    fn formats_missing_parts_with_placeholders() {
        assert_eq!(DateOfBirth::new("1990").unwrap().formatted(), "1990-XX-XX");
        assert_eq!(DateOfBirth::new("1990-05").unwrap().formatted(), "1990-05-XX");
        assert_eq!(
            DateOfBirth::new("1990-05-12").unwrap().formatted(),
            "1990-05-12"
        );
        assert_eq!(DateOfBirth::new("").unwrap().formatted(), "");
    }

    #[test]
    fn rejects_values_outside_the_grammar() {
        for bad in [
            "1890",
            "2100-01-01",
            "90-05-12",
            "1990-5-12",
            "1990/05/12",
            "1990-05-12T00:00:00",
            "199a",
            "1990-05-1x",
            " 1990",
        ] {
            let err = DateOfBirth::new(bad).expect_err("should reject");
            assert_eq!(err, DateOfBirthError::Invalid(bad.to_string()));
        }
    }
}
