//! Recovery proof entries (`r` array of the hcert payload).

use crate::datetime::{start_of_day, DateValue};
use crate::HcertResult;
use chrono::{DateTime, Days, Utc};
use serde::Deserialize;

/// Input carrier for [`RecoveryEntry::new`].
#[derive(Clone, Debug)]
pub struct RecoveryData {
    pub target: String,
    pub test_date: DateValue,
    pub location_country_code: String,
    pub certificate_valid_from: DateValue,
    pub certificate_valid_until: DateValue,
    pub certificate_issuer: String,
    pub certificate_id: String,
}

/// One recovery statement, established by a positive test on [`RecoveryEntry::test_date`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecoveryEntry {
    target: String,
    test_date: DateTime<Utc>,
    location_country_code: String,
    certificate_valid_from: DateTime<Utc>,
    certificate_valid_until: DateTime<Utc>,
    certificate_issuer: String,
    certificate_id: String,
}

impl RecoveryEntry {
    /// Builds a recovery entry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HcertError::InvalidDate`] if any of the three dates cannot be parsed.
    pub fn new(data: RecoveryData) -> HcertResult<Self> {
        Ok(Self {
            test_date: data.test_date.resolve("fr")?,
            certificate_valid_from: data.certificate_valid_from.resolve("df")?,
            certificate_valid_until: data.certificate_valid_until.resolve("du")?,
            target: data.target,
            location_country_code: data.location_country_code,
            certificate_issuer: data.certificate_issuer,
            certificate_id: data.certificate_id,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Date of the first positive test.
    pub fn test_date(&self) -> DateTime<Utc> {
        self.test_date
    }

    pub fn location_country_code(&self) -> &str {
        &self.location_country_code
    }

    pub fn certificate_valid_from(&self) -> DateTime<Utc> {
        self.certificate_valid_from
    }

    pub fn certificate_valid_until(&self) -> DateTime<Utc> {
        self.certificate_valid_until
    }

    pub fn certificate_issuer(&self) -> &str {
        &self.certificate_issuer
    }

    pub fn certificate_id(&self) -> &str {
        &self.certificate_id
    }

    /// Whether `now` lies outside the validity window.
    ///
    /// The window opens at `certificate_valid_from` and stays open through the whole calendar
    /// day (UTC) of `certificate_valid_until`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now < self.certificate_valid_from || now >= self.validity_end()
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// First instant after the until-day.
    fn validity_end(&self) -> DateTime<Utc> {
        let until_day = self.certificate_valid_until.date_naive();
        until_day
            .checked_add_days(Days::new(1))
            .map(start_of_day)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// Wire representation of an `r` array element.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct RecoveryWire {
    tg: String,
    fr: String,
    co: String,
    df: String,
    du: String,
    is: String,
    ci: String,
}

impl RecoveryWire {
    pub(crate) fn into_entry(self) -> HcertResult<RecoveryEntry> {
        RecoveryEntry::new(RecoveryData {
            target: self.tg,
            test_date: self.fr.into(),
            location_country_code: self.co,
            certificate_valid_from: self.df.into(),
            certificate_valid_until: self.du.into(),
            certificate_issuer: self.is,
            certificate_id: self.ci,
        })
    }
}
