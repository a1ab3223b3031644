//! Coverage resolution.
//!
//! Answers "does this certificate show the holder is protected against `target`, counting only
//! the proof kinds the caller accepts?" and "until when?".
//!
//! Every query has an `_at` form taking the evaluation instant. The plain forms read the clock
//! once and delegate, so a single decision never mixes two different "now" values.

use crate::certificate::HealthCertificate;
use crate::{HcertError, HcertResult};
use chrono::{DateTime, Utc};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// Coverage expiry reported when no entry matches.
pub const NO_COVERAGE: DateTime<Utc> = DateTime::UNIX_EPOCH;

/// Which kind of proof a certificate carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProofKind {
    None,
    Vaccination,
    Test,
    Recovery,
}

impl ProofKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProofKind::None => "none",
            ProofKind::Vaccination => "vaccination",
            ProofKind::Test => "test",
            ProofKind::Recovery => "recovery",
        }
    }
}

impl fmt::Display for ProofKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of accepted proof kinds.
///
/// Kinds are always checked in the order vaccination, test, recovery regardless of how the set
/// was built. The empty set accepts nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ProofKinds(u8);

impl ProofKinds {
    pub const NONE: Self = Self(0b000);
    pub const VACCINATION: Self = Self(0b001);
    pub const TEST: Self = Self(0b010);
    pub const RECOVERY: Self = Self(0b100);
    pub const ALL: Self = Self(0b111);

    pub fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for ProofKinds {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ProofKinds {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Parses a comma separated list of `vaccination`, `test`, `recovery`, `all` or `none`.
impl FromStr for ProofKinds {
    type Err = HcertError;

    fn from_str(s: &str) -> HcertResult<Self> {
        let mut kinds = ProofKinds::NONE;
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            kinds |= match part.to_ascii_lowercase().as_str() {
                "vaccination" | "v" => ProofKinds::VACCINATION,
                "test" | "t" => ProofKinds::TEST,
                "recovery" | "r" => ProofKinds::RECOVERY,
                "all" => ProofKinds::ALL,
                "none" => ProofKinds::NONE,
                other => {
                    return Err(HcertError::InvalidInput(format!(
                        "unknown proof kind '{other}'"
                    )))
                }
            };
        }
        Ok(kinds)
    }
}

impl HealthCertificate {
    /// The kind of proof this certificate carries.
    ///
    /// With `fully_vaccinated_only`, an incomplete vaccination series is not reported as
    /// [`ProofKind::Vaccination`]; the lookup falls through to test, then recovery, then
    /// [`ProofKind::None`].
    pub fn proof_type(&self, fully_vaccinated_only: bool) -> ProofKind {
        if let Some(vaccination) = self.vaccination_entries().first() {
            if !fully_vaccinated_only || vaccination.is_fully_vaccinated() {
                return ProofKind::Vaccination;
            }
        }

        if !self.test_entries().is_empty() {
            return ProofKind::Test;
        }

        if !self.recovery_entries().is_empty() {
            return ProofKind::Recovery;
        }

        ProofKind::None
    }

    /// Whether the certificate covers `target` with one of the accepted proof kinds at `now`.
    ///
    /// An expired certificate covers nothing. Otherwise a fully vaccinated, negative test or
    /// unexpired recovery entry for `target` is enough.
    pub fn is_covered_at(&self, target: &str, kinds: ProofKinds, now: DateTime<Utc>) -> bool {
        if self.is_expired_at(now) {
            return false;
        }

        self.eligible_expiries(target, kinds, now).next().is_some()
    }

    pub fn is_covered(&self, target: &str, kinds: ProofKinds) -> bool {
        self.is_covered_at(target, kinds, Utc::now())
    }

    /// Latest expiry among the entries that would make [`HealthCertificate::is_covered_at`] true.
    ///
    /// Vaccination and test entries contribute the certificate's own expiry, recovery entries
    /// their `certificate_valid_until`. The certificate-level expiry gate is not applied here.
    /// If nothing matches the Unix epoch is returned; callers must read it as "no coverage".
    pub fn coverage_expiry_date_at(
        &self,
        target: &str,
        kinds: ProofKinds,
        now: DateTime<Utc>,
    ) -> DateTime<Utc> {
        self.eligible_expiries(target, kinds, now)
            .flatten()
            .fold(NO_COVERAGE, Ord::max)
    }

    pub fn coverage_expiry_date(&self, target: &str, kinds: ProofKinds) -> DateTime<Utc> {
        self.coverage_expiry_date_at(target, kinds, Utc::now())
    }

    /// One item per eligible entry, in vaccination, test, recovery order, carrying the expiry it
    /// contributes (`None` when the certificate has no expiry claim).
    fn eligible_expiries<'a>(
        &'a self,
        target: &'a str,
        kinds: ProofKinds,
        now: DateTime<Utc>,
    ) -> impl Iterator<Item = Option<DateTime<Utc>>> + 'a {
        let expires_at = self.expires_at();

        let vaccinations = self
            .vaccination_entries()
            .iter()
            .filter(move |_| kinds.contains(ProofKinds::VACCINATION))
            .filter(move |entry| entry.target() == target && entry.is_fully_vaccinated())
            .map(move |_| expires_at);

        let tests = self
            .test_entries()
            .iter()
            .filter(move |_| kinds.contains(ProofKinds::TEST))
            .filter(move |entry| entry.target() == target && entry.is_negative())
            .map(move |_| expires_at);

        let recoveries = self
            .recovery_entries()
            .iter()
            .filter(move |_| kinds.contains(ProofKinds::RECOVERY))
            .filter(move |entry| entry.target() == target && !entry.is_expired_at(now))
            .map(|entry| Some(entry.certificate_valid_until()));

        vaccinations.chain(tests).chain(recoveries)
    }
}
