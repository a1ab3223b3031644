//! Constants used throughout the hcert core crate.
//!
//! Claim keys are the CWT claim numbers rendered as strings, which is how an upstream CBOR
//! decoder hands integer map keys over as JSON.

/// CWT claim key for the issuer (`iss`).
pub const CLAIM_ISSUER: &str = "1";

/// CWT claim key for the expiry instant (`exp`), Unix seconds.
pub const CLAIM_EXPIRES_AT: &str = "4";

/// CWT claim key for the issued-at instant (`iat`), Unix seconds.
pub const CLAIM_ISSUED_AT: &str = "6";

/// CWT claim key of the hcert container.
pub const CLAIM_HCERT: &str = "-260";

/// Key of the EU digital COVID certificate v1 payload inside the hcert container.
pub const HCERT_EU_DCC_V1: &str = "1";

/// Semantic version requirement the payload `ver` field must satisfy.
pub const SUPPORTED_VERSION_REQ: &str = "^1.0.0";

/// SNOMED CT code of the COVID-19 disease target.
pub const TARGET_COVID_19: &str = "840539006";

/// Test result code meaning "detected".
pub const TEST_RESULT_DETECTED: &str = "260373001";

/// Test result code meaning "not detected".
pub const TEST_RESULT_NOT_DETECTED: &str = "260415000";
