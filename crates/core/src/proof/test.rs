//! Test proof entries (`t` array of the hcert payload).

use crate::constants::{TEST_RESULT_DETECTED, TEST_RESULT_NOT_DETECTED};
use crate::datetime::DateValue;
use crate::HcertResult;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Input carrier for [`TestEntry::new`].
#[derive(Clone, Debug)]
pub struct TestData {
    pub target: String,
    pub test_type: String,
    pub test_name: Option<String>,
    pub test_device_identifier: Option<String>,
    pub test_date: DateValue,
    pub test_result: String,
    pub testing_facility: Option<String>,
    pub location_country_code: String,
    pub certificate_issuer: String,
    pub certificate_id: String,
}

/// One test event.
///
/// The result is kept as its raw code. A code that is neither [`TEST_RESULT_DETECTED`] nor
/// [`TEST_RESULT_NOT_DETECTED`] makes the entry neither positive nor negative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestEntry {
    target: String,
    test_type: String,
    test_name: Option<String>,
    test_device_identifier: Option<String>,
    test_date: DateTime<Utc>,
    test_result: String,
    testing_facility: Option<String>,
    location_country_code: String,
    certificate_issuer: String,
    certificate_id: String,
}

impl TestEntry {
    /// Builds a test entry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HcertError::InvalidDate`] if the sample collection date cannot be parsed.
    pub fn new(data: TestData) -> HcertResult<Self> {
        Ok(Self {
            test_date: data.test_date.resolve("sc")?,
            target: data.target,
            test_type: data.test_type,
            test_name: data.test_name,
            test_device_identifier: data.test_device_identifier,
            test_result: data.test_result,
            testing_facility: data.testing_facility,
            location_country_code: data.location_country_code,
            certificate_issuer: data.certificate_issuer,
            certificate_id: data.certificate_id,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn test_type(&self) -> &str {
        &self.test_type
    }

    /// NAA test name, present for molecular tests.
    pub fn test_name(&self) -> Option<&str> {
        self.test_name.as_deref()
    }

    /// Rapid antigen test device identifier.
    pub fn test_device_identifier(&self) -> Option<&str> {
        self.test_device_identifier.as_deref()
    }

    /// Sample collection instant.
    pub fn test_date(&self) -> DateTime<Utc> {
        self.test_date
    }

    pub fn test_result(&self) -> &str {
        &self.test_result
    }

    pub fn testing_facility(&self) -> Option<&str> {
        self.testing_facility.as_deref()
    }

    pub fn location_country_code(&self) -> &str {
        &self.location_country_code
    }

    pub fn certificate_issuer(&self) -> &str {
        &self.certificate_issuer
    }

    pub fn certificate_id(&self) -> &str {
        &self.certificate_id
    }

    pub fn is_positive(&self) -> bool {
        self.test_result == TEST_RESULT_DETECTED
    }

    pub fn is_negative(&self) -> bool {
        self.test_result == TEST_RESULT_NOT_DETECTED
    }
}

/// Wire representation of a `t` array element.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct TestWire {
    tg: String,
    tt: String,
    #[serde(default)]
    nm: Option<String>,
    #[serde(default)]
    ma: Option<String>,
    sc: String,
    tr: String,
    #[serde(default)]
    tc: Option<String>,
    co: String,
    is: String,
    ci: String,
}

impl TestWire {
    pub(crate) fn into_entry(self) -> HcertResult<TestEntry> {
        if self.tr != TEST_RESULT_DETECTED && self.tr != TEST_RESULT_NOT_DETECTED {
            tracing::warn!(
                "unknown test result code {}, entry is neither positive nor negative",
                self.tr
            );
        }

        TestEntry::new(TestData {
            target: self.tg,
            test_type: self.tt,
            test_name: self.nm,
            test_device_identifier: self.ma,
            test_date: self.sc.into(),
            test_result: self.tr,
            testing_facility: self.tc,
            location_country_code: self.co,
            certificate_issuer: self.is,
            certificate_id: self.ci,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TARGET_COVID_19;
    use crate::HcertError;
    use chrono::TimeZone;

    fn data(test_result: &str) -> TestData {
        TestData {
            target: TARGET_COVID_19.into(),
            test_type: "LP217198-3".into(),
            test_name: None,
            test_device_identifier: Some("1232".into()),
            test_date: "2021-05-30T10:12:22Z".into(),
            test_result: test_result.into(),
            testing_facility: Some("Testzentrum Köln Hbf".into()),
            location_country_code: "DE".into(),
            certificate_issuer: "Robert Koch-Institut".into(),
            certificate_id: "URN:UVCI:01DE/IBMT102/18Q12HTUJ45NO7ZTR2RGAS#C".into(),
        }
    }

    #[test]
    fn not_detected_is_negative() {
        let entry = TestEntry::new(data(TEST_RESULT_NOT_DETECTED)).unwrap();
        assert!(entry.is_negative());
        assert!(!entry.is_positive());
    }

    #[test]
    fn detected_is_positive() {
        let entry = TestEntry::new(data(TEST_RESULT_DETECTED)).unwrap();
        assert!(entry.is_positive());
        assert!(!entry.is_negative());
    }

    #[test]
    fn unknown_result_is_neither_positive_nor_negative() {
        let entry = TestEntry::new(data("123456789")).unwrap();
        assert!(!entry.is_positive());
        assert!(!entry.is_negative());
    }

    #[test]
    fn keeps_optional_fields() {
        let entry = TestEntry::new(data(TEST_RESULT_NOT_DETECTED)).unwrap();
        assert_eq!(entry.test_name(), None);
        assert_eq!(entry.test_device_identifier(), Some("1232"));
        assert_eq!(entry.testing_facility(), Some("Testzentrum Köln Hbf"));
        assert_eq!(
            entry.test_date(),
            Utc.with_ymd_and_hms(2021, 5, 30, 10, 12, 22).unwrap()
        );
    }

    #[test]
    fn rejects_unparseable_test_date() {
        let err = TestEntry::new(TestData {
            test_date: "not a date".into(),
            ..data(TEST_RESULT_NOT_DETECTED)
        })
        .expect_err("bad date");
        assert!(matches!(err, HcertError::InvalidDate { field: "sc", .. }));
    }
}
