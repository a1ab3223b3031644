//! Health certificate model and claim normalisation.
//!
//! An upstream decoder turns the signed CWT into a claim map keyed by claim numbers rendered
//! as strings. This module validates that map once and freezes it into a [`HealthCertificate`]:
//!
//! ```text
//! {
//!   "1": "DE",                      issuer
//!   "6": 1622316073,                issued at (optional)
//!   "4": 1643356073,                expires at (optional)
//!   "-260": { "1": {                hcert / EU DCC v1
//!     "ver": "1.0.0",
//!     "nam": { "gn": "...", "fn": "..." },
//!     "dob": "1964-08-12",
//!     "v" | "t" | "r": [ { ... } ]
//!   } }
//! }
//! ```
//!
//! Only one proof kind is read, checked in the order `v`, `t`, `r`, and only the first element
//! of its array is modelled.

use crate::constants::{CLAIM_HCERT, HCERT_EU_DCC_V1};
use crate::proof::recovery::RecoveryWire;
use crate::proof::test::TestWire;
use crate::proof::vaccination::VaccinationWire;
use crate::proof::{RecoveryEntry, TestEntry, VaccinationEntry};
use crate::subject::Subject;
use crate::version::check_version;
use crate::{HcertError, HcertResult};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

// ============================================================================
// Public domain-level types
// ============================================================================

/// The single proof a certificate carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Proof {
    None,
    Vaccination(VaccinationEntry),
    Test(TestEntry),
    Recovery(RecoveryEntry),
}

/// A validated, immutable EU digital COVID certificate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HealthCertificate {
    issuer: String,
    issued_at: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
    subject: Subject,
    proof: Proof,
}

impl HealthCertificate {
    pub fn new(
        issuer: impl Into<String>,
        issued_at: Option<DateTime<Utc>>,
        expires_at: Option<DateTime<Utc>>,
        subject: Subject,
        proof: Proof,
    ) -> Self {
        Self {
            issuer: issuer.into(),
            issued_at,
            expires_at,
            subject,
            proof,
        }
    }

    /// Normalises a decoded claim map into a certificate.
    ///
    /// # Errors
    ///
    /// Returns [`HcertError`] if:
    /// - the payload `ver` is not a `1.x` version ([`HcertError::UnsupportedVersion`]),
    /// - a required claim is absent ([`HcertError::MissingClaim`]) or has the wrong type
    ///   ([`HcertError::InvalidClaim`]),
    /// - `dob` does not match the partial-date grammar ([`HcertError::InvalidDateOfBirth`]),
    /// - an entry date cannot be parsed ([`HcertError::InvalidDate`]),
    /// - a dose count is negative ([`HcertError::InvalidDoseCount`]),
    /// - a CWT timestamp is out of range ([`HcertError::InvalidTimestamp`]).
    pub fn parse_hcert_v1(claims: Value) -> HcertResult<Self> {
        let wire = serde_path_to_error::deserialize::<_, ClaimsWire>(claims)
            .map_err(|err| claim_error("", err))?;
        wire_to_domain(wire)
    }

    /// Like [`HealthCertificate::parse_hcert_v1`], reading the claim map from JSON text.
    pub fn parse_hcert_v1_json(json: &str) -> HcertResult<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let wire = serde_path_to_error::deserialize::<_, ClaimsWire>(&mut deserializer)
            .map_err(|err| claim_error("", err))?;
        wire_to_domain(wire)
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.issued_at
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn proof(&self) -> &Proof {
        &self.proof
    }

    pub fn vaccination_entries(&self) -> &[VaccinationEntry] {
        match &self.proof {
            Proof::Vaccination(entry) => std::slice::from_ref(entry),
            _ => &[],
        }
    }

    pub fn test_entries(&self) -> &[TestEntry] {
        match &self.proof {
            Proof::Test(entry) => std::slice::from_ref(entry),
            _ => &[],
        }
    }

    pub fn recovery_entries(&self) -> &[RecoveryEntry] {
        match &self.proof {
            Proof::Recovery(entry) => std::slice::from_ref(entry),
            _ => &[],
        }
    }

    /// True only if an expiry claim exists and `now` is past it.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at < now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
struct ClaimsWire {
    #[serde(rename = "1")]
    issuer: String,
    #[serde(rename = "6", default)]
    issued_at: Option<NumericDate>,
    #[serde(rename = "4", default)]
    expires_at: Option<NumericDate>,
    #[serde(rename = "-260")]
    hcert: HcertWire,
}

/// CWT NumericDate: seconds since the epoch, possibly fractional.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumericDate {
    Seconds(i64),
    Fractional(f64),
}

impl NumericDate {
    /// Whole seconds; fractional values are truncated towards zero.
    fn seconds(&self) -> i64 {
        match *self {
            NumericDate::Seconds(seconds) => seconds,
            // `as` saturates, an out of range value is then rejected by `timestamp`.
            NumericDate::Fractional(seconds) => seconds.trunc() as i64,
        }
    }
}

#[derive(Debug, Deserialize)]
struct HcertWire {
    #[serde(rename = "1")]
    payload: PayloadWire,
}

#[derive(Debug, Deserialize)]
struct PayloadWire {
    ver: String,
    nam: NameWire,
    dob: String,
    // Kept raw so that only the selected proof kind is validated.
    #[serde(default)]
    v: Option<Value>,
    #[serde(default)]
    t: Option<Value>,
    #[serde(default)]
    r: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct NameWire {
    gn: String,
    #[serde(rename = "fn")]
    family: String,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: ClaimsWire) -> HcertResult<HealthCertificate> {
    let payload = wire.hcert.payload;
    check_version(&payload.ver)?;

    let present = [&payload.v, &payload.t, &payload.r]
        .iter()
        .filter(|kind| kind.is_some())
        .count();
    if present > 1 {
        tracing::warn!("hcert payload carries {present} proof kinds, only the first is used");
    }

    let proof = if let Some(v) = payload.v {
        Proof::Vaccination(first_entry::<VaccinationWire>("v", v)?.into_entry()?)
    } else if let Some(t) = payload.t {
        Proof::Test(first_entry::<TestWire>("t", t)?.into_entry()?)
    } else if let Some(r) = payload.r {
        Proof::Recovery(first_entry::<RecoveryWire>("r", r)?.into_entry()?)
    } else {
        Proof::None
    };

    // Some issuers put a time of day into the date-only dob field; keep the date part.
    let dob = match payload.dob.split_once('T') {
        Some((date, _)) => {
            tracing::warn!("stripping time component from dob {}", payload.dob);
            date
        }
        None => payload.dob.as_str(),
    };
    let subject = Subject::new(payload.nam.gn, payload.nam.family, dob)?;

    let certificate = HealthCertificate::new(
        wire.issuer,
        wire.issued_at
            .map(|ts| timestamp("iat", ts.seconds()))
            .transpose()?,
        wire.expires_at
            .map(|ts| timestamp("exp", ts.seconds()))
            .transpose()?,
        subject,
        proof,
    );

    tracing::debug!(
        "normalised hcert {} from issuer {}",
        payload.ver,
        certificate.issuer()
    );

    Ok(certificate)
}

fn first_entry<T: DeserializeOwned>(key: &str, raw: Value) -> HcertResult<T> {
    let path = format!("{CLAIM_HCERT}.{HCERT_EU_DCC_V1}.{key}");

    let items = match raw {
        Value::Array(items) => items,
        other => {
            return Err(HcertError::InvalidClaim {
                path,
                reason: format!("expected an array, found {other}"),
            })
        }
    };

    if items.len() > 1 {
        tracing::warn!(
            "{path} holds {} entries, only the first is modelled",
            items.len()
        );
    }

    let path = format!("{path}[0]");
    let first = items
        .into_iter()
        .next()
        .ok_or_else(|| HcertError::MissingClaim { path: path.clone() })?;

    serde_path_to_error::deserialize(first).map_err(|err| claim_error(&path, err))
}

fn timestamp(claim: &'static str, value: i64) -> HcertResult<DateTime<Utc>> {
    DateTime::from_timestamp(value, 0).ok_or(HcertError::InvalidTimestamp { claim, value })
}

/// Translate a deserialisation failure into a lookup error carrying the claim path.
fn claim_error(prefix: &str, err: serde_path_to_error::Error<serde_json::Error>) -> HcertError {
    let inner_path = err.path().to_string();
    let source = err.into_inner();

    let mut path = prefix.to_string();
    if inner_path != "." && !inner_path.is_empty() {
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(&inner_path);
    }

    let message = source.to_string();
    let missing = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split_once('`'))
        .map(|(field, _)| field);

    match missing {
        Some(field) => {
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(field);
            HcertError::MissingClaim { path }
        }
        None => HcertError::InvalidClaim {
            path: if path.is_empty() { "<root>".into() } else { path },
            reason: message,
        },
    }
}
