//! Coverage evaluation service.
//!
//! Wraps the coverage queries of [`HealthCertificate`] behind a configured policy so that a
//! host (CLI, verification service) evaluates every certificate against one target and one set
//! of accepted proof kinds, at one instant.

use crate::certificate::HealthCertificate;
use crate::config::CoverageConfig;
use crate::coverage::{ProofKind, NO_COVERAGE};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Outcome of evaluating one certificate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageDecision {
    /// Whether the certificate covers the configured target.
    pub covered: bool,
    /// The proof kind the certificate carries.
    pub proof_type: ProofKind,
    /// Latest coverage expiry, `None` when no entry matches or no expiry is known.
    pub expires_at: Option<DateTime<Utc>>,
    /// The instant the decision was taken at.
    pub evaluated_at: DateTime<Utc>,
}

/// Pure coverage evaluation - no decoding or signature concerns
#[derive(Clone)]
pub struct CoverageService {
    cfg: Arc<CoverageConfig>,
}

impl CoverageService {
    pub fn new(cfg: Arc<CoverageConfig>) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &CoverageConfig {
        &self.cfg
    }

    /// Evaluates `certificate` at `now`.
    pub fn evaluate(&self, certificate: &HealthCertificate, now: DateTime<Utc>) -> CoverageDecision {
        let target = self.cfg.target().as_str();
        let accepted = self.cfg.accepted();

        let covered = certificate.is_covered_at(target, accepted, now);
        let proof_type = certificate.proof_type(self.cfg.fully_vaccinated_only());
        let expiry = certificate.coverage_expiry_date_at(target, accepted, now);
        let expires_at = (expiry != NO_COVERAGE).then_some(expiry);

        tracing::debug!(
            "evaluated certificate from {}: covered={} type={} expires_at={:?}",
            certificate.issuer(),
            covered,
            proof_type,
            expires_at
        );

        CoverageDecision {
            covered,
            proof_type,
            expires_at,
            evaluated_at: now,
        }
    }

    /// Evaluates `certificate` at the current instant.
    pub fn evaluate_now(&self, certificate: &HealthCertificate) -> CoverageDecision {
        self.evaluate(certificate, Utc::now())
    }
}
