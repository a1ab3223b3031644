//! Vaccination proof entries (`v` array of the hcert payload).

use crate::datetime::DateValue;
use crate::{HcertError, HcertResult};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Input carrier for [`VaccinationEntry::new`].
#[derive(Clone, Debug)]
pub struct VaccinationData {
    pub target: String,
    pub vaccine_type: String,
    pub vaccine_product: String,
    pub vaccine_company: String,
    pub doses_received: i64,
    pub doses_required: i64,
    pub vaccination_date: DateValue,
    pub location_country_code: String,
    pub certificate_issuer: String,
    pub certificate_id: String,
}

/// One vaccination event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VaccinationEntry {
    target: String,
    vaccine_type: String,
    vaccine_product: String,
    vaccine_company: String,
    doses_received: u32,
    doses_required: u32,
    vaccination_date: DateTime<Utc>,
    location_country_code: String,
    certificate_issuer: String,
    certificate_id: String,
}

impl VaccinationEntry {
    /// Builds a vaccination entry.
    ///
    /// # Errors
    ///
    /// Returns [`HcertError::InvalidDoseCount`] if either dose count is negative or does not
    /// fit a `u32`, and [`HcertError::InvalidDate`] if the vaccination date cannot be parsed.
    pub fn new(data: VaccinationData) -> HcertResult<Self> {
        Ok(Self {
            doses_received: dose_count("dn", data.doses_received)?,
            doses_required: dose_count("sd", data.doses_required)?,
            vaccination_date: data.vaccination_date.resolve("dt")?,
            target: data.target,
            vaccine_type: data.vaccine_type,
            vaccine_product: data.vaccine_product,
            vaccine_company: data.vaccine_company,
            location_country_code: data.location_country_code,
            certificate_issuer: data.certificate_issuer,
            certificate_id: data.certificate_id,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn vaccine_type(&self) -> &str {
        &self.vaccine_type
    }

    pub fn vaccine_product(&self) -> &str {
        &self.vaccine_product
    }

    pub fn vaccine_company(&self) -> &str {
        &self.vaccine_company
    }

    pub fn doses_received(&self) -> u32 {
        self.doses_received
    }

    pub fn doses_required(&self) -> u32 {
        self.doses_required
    }

    pub fn vaccination_date(&self) -> DateTime<Utc> {
        self.vaccination_date
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

    /// True once the received doses reach the number the series requires.
    pub fn is_fully_vaccinated(&self) -> bool {
        self.doses_received >= self.doses_required
    }
}

fn dose_count(field: &'static str, value: i64) -> HcertResult<u32> {
    u32::try_from(value).map_err(|_| HcertError::InvalidDoseCount { field, value })
}

/// Wire representation of a `v` array element.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct VaccinationWire {
    tg: String,
    vp: String,
    mp: String,
    ma: String,
    dn: i64,
    sd: i64,
    dt: String,
    co: String,
    is: String,
    ci: String,
}

impl VaccinationWire {
    pub(crate) fn into_entry(self) -> HcertResult<VaccinationEntry> {
        VaccinationEntry::new(VaccinationData {
            target: self.tg,
            vaccine_type: self.vp,
            vaccine_product: self.mp,
            vaccine_company: self.ma,
            doses_received: self.dn,
            doses_required: self.sd,
            vaccination_date: self.dt.into(),
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
    use chrono::TimeZone;

    fn data(doses_received: i64, doses_required: i64) -> VaccinationData {
        VaccinationData {
            target: TARGET_COVID_19.into(),
            vaccine_type: "1119349007".into(),
            vaccine_product: "EU/1/20/1528".into(),
            vaccine_company: "ORG-100030215".into(),
            doses_received,
            doses_required,
            vaccination_date: "2021-05-29".into(),
            location_country_code: "DE".into(),
            certificate_issuer: "Robert Koch-Institut".into(),
            certificate_id: "URN:UVCI:01DE/IZ12345A/5CWLU12RNOB9RXSEOP6FG8#W".into(),
        }
    }

    #[test]
    fn complete_series_is_fully_vaccinated() {
        assert!(VaccinationEntry::new(data(2, 2)).unwrap().is_fully_vaccinated());
        assert!(VaccinationEntry::new(data(3, 2)).unwrap().is_fully_vaccinated());
    }

    #[test]
    fn partial_series_is_not_fully_vaccinated() {
        let entry = VaccinationEntry::new(data(1, 2)).unwrap();
        assert!(!entry.is_fully_vaccinated());
        assert_eq!(entry.doses_received(), 1);
        assert_eq!(entry.doses_required(), 2);
    }

    #[test]
    fn parses_vaccination_date_text() {
        let entry = VaccinationEntry::new(data(2, 2)).unwrap();
        assert_eq!(
            entry.vaccination_date(),
            Utc.with_ymd_and_hms(2021, 5, 29, 0, 0, 0).unwrap()
        );
        assert_eq!(entry.vaccine_product(), "EU/1/20/1528");
        assert_eq!(entry.location_country_code(), "DE");
    }

    #[test]
    fn accepts_a_parsed_vaccination_date() {
        let when = Utc.with_ymd_and_hms(2021, 6, 1, 9, 0, 0).unwrap();
        let entry = VaccinationEntry::new(VaccinationData {
            vaccination_date: when.into(),
            ..data(2, 2)
        })
        .unwrap();
        assert_eq!(entry.vaccination_date(), when);
    }

    #[test]
    fn rejects_negative_dose_counts() {
        let err = VaccinationEntry::new(data(-1, 2)).expect_err("negative dn");
        assert!(matches!(
            err,
            HcertError::InvalidDoseCount {
                field: "dn",
                value: -1
            }
        ));

        let err = VaccinationEntry::new(data(1, -2)).expect_err("negative sd");
        assert!(matches!(err, HcertError::InvalidDoseCount { field: "sd", .. }));
    }

    #[test]
    fn rejects_unparseable_vaccination_date() {
        let err = VaccinationEntry::new(VaccinationData {
            vaccination_date: "yesterday".into(),
            ..data(2, 2)
        })
        .expect_err("bad date");
        assert!(matches!(err, HcertError::InvalidDate { field: "dt", .. }));
    }
}
