//! The certificate holder.

use crate::HcertResult;
use hcert_types::DateOfBirth;

/// Normalised holder identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subject {
    first_name: String,
    last_name: String,
    date_of_birth: DateOfBirth,
}

impl Subject {
    /// Creates a subject, validating `date_of_birth` against the partial-date grammar.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HcertError::InvalidDateOfBirth`] if the date of birth is not empty,
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: impl Into<String>,
    ) -> HcertResult<Self> {
        Ok(Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth: DateOfBirth::new(date_of_birth)?,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn date_of_birth(&self) -> &str {
        self.date_of_birth.as_str()
    }

    /// Date of birth padded to `YYYY-MM-DD` shape with `XX` for unknown parts.
    pub fn formatted_date_of_birth(&self) -> String {
        self.date_of_birth.formatted()
    }
}
