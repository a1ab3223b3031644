//! # hcert Core
//!
//! Claim normalisation and coverage resolution for EU digital COVID certificates (hcert).
//!
//! This crate turns an already decoded CWT claim map into an immutable [`HealthCertificate`]
//! and answers coverage questions against it:
//! - Claim normalisation: version check, subject, and one typed proof entry
//! - Coverage resolution: proof type, `is_covered`, coverage expiry
//! - Trust anchors: the boundary type handed to signature verifiers, and a file-backed store
//!
//! **No transport or crypto concerns**: COSE/CBOR decoding, base45/zlib, and signature
//! verification belong to the caller.

pub mod certificate;
pub mod config;
pub mod constants;
pub mod coverage;
pub mod datetime;
pub mod error;
pub mod proof;
pub mod service;
pub mod subject;
pub mod trust;
pub mod version;

pub use certificate::{HealthCertificate, Proof};
pub use config::CoverageConfig;
pub use coverage::{ProofKind, ProofKinds, NO_COVERAGE};
pub use datetime::DateValue;
pub use error::{HcertError, HcertResult};
pub use proof::{
    RecoveryData, RecoveryEntry, TestData, TestEntry, VaccinationData, VaccinationEntry,
};
pub use service::{CoverageDecision, CoverageService};
pub use subject::Subject;
pub use trust::{FileTrustStore, StaticTrustStore, TrustAnchor, TrustStore};

// Re-export validated value types used in the public API
pub use hcert_types::{DateOfBirth, DatePrecision, NonEmptyText};
