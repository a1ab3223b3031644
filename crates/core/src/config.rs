//! Coverage configuration.
//!
//! The disease target and accepted proof kinds are resolved once at process startup and passed
//! into [`crate::CoverageService`]. Evaluation never reads environment variables.

use crate::constants::TARGET_COVID_19;
use crate::coverage::ProofKinds;
use crate::{HcertError, HcertResult};
use hcert_types::NonEmptyText;

/// Coverage policy resolved at startup.
#[derive(Clone, Debug)]
pub struct CoverageConfig {
    target: NonEmptyText,
    accepted: ProofKinds,
    fully_vaccinated_only: bool,
}

impl CoverageConfig {
    /// Create a new `CoverageConfig`.
    pub fn new(
        target: impl AsRef<str>,
        accepted: ProofKinds,
        fully_vaccinated_only: bool,
    ) -> HcertResult<Self> {
        let target = NonEmptyText::new(target)
            .map_err(|_| HcertError::InvalidInput("target cannot be empty".into()))?;

        if accepted.is_empty() {
            tracing::warn!("coverage config accepts no proof kinds, nothing will be covered");
        }

        Ok(Self {
            target,
            accepted,
            fully_vaccinated_only,
        })
    }

    /// Disease target code, trimmed.
    pub fn target(&self) -> &NonEmptyText {
        &self.target
    }

    pub fn accepted(&self) -> ProofKinds {
        self.accepted
    }

    pub fn fully_vaccinated_only(&self) -> bool {
        self.fully_vaccinated_only
    }
}

/// Parse the disease target from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`TARGET_COVID_19`].
pub fn target_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| TARGET_COVID_19.to_string())
}

/// Parse the accepted proof kinds from an optional string value.
///
/// If `value` is `None` or empty/whitespace, every proof kind is accepted.
pub fn accepted_proofs_from_env_value(value: Option<String>) -> HcertResult<ProofKinds> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<ProofKinds>()).transpose()?;

    Ok(parsed.unwrap_or(ProofKinds::ALL))
}
