use hcert_types::DateOfBirthError;

#[derive(Debug, thiserror::Error)]
pub enum HcertError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid hcert version: {0}")]
    UnsupportedVersion(String),
    #[error("missing claim: {path}")]
    MissingClaim { path: String },
    #[error("invalid claim at {path}: {reason}")]
    InvalidClaim { path: String, reason: String },
    #[error("invalid {claim} timestamp: {value}")]
    InvalidTimestamp { claim: &'static str, value: i64 },

    #[error(transparent)]
    InvalidDateOfBirth(#[from] DateOfBirthError),
    #[error("invalid date for {field}: {value}")]
    InvalidDate { field: &'static str, value: String },
    #[error("invalid dose count for {field}: {value}")]
    InvalidDoseCount { field: &'static str, value: i64 },

    #[error("failed to read trust list: {0}")]
    TrustStoreRead(std::io::Error),
    #[error("failed to parse trust list: {0}")]
    TrustStoreParse(String),
    #[error("invalid certificate data for kid {kid}: {reason}")]
    InvalidCertificateData { kid: String, reason: String },
    #[error("failed to parse PEM: {0}")]
    PemParse(::pem::PemError),
}

pub type HcertResult<T> = std::result::Result<T, HcertError>;
