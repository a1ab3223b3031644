//! Typed proof entries.
//!
//! A certificate proves one of three things about its holder: vaccination, a test, or recovery.
//! Each kind has its own entry type carrying the fields of the hcert value set and the
//! predicate the coverage engine uses to decide whether the entry counts:
//! - [`VaccinationEntry::is_fully_vaccinated`]
//! - [`TestEntry::is_negative`]
//! - [`RecoveryEntry::is_expired_at`]
//!
//! Categorical codes (targets, vaccine products, test types, ...) are kept verbatim. Mapping them
//! to display names is left to callers.

pub mod recovery;
pub mod test;
pub mod vaccination;

pub use recovery::{RecoveryData, RecoveryEntry};
pub use test::{TestData, TestEntry};
pub use vaccination::{VaccinationData, VaccinationEntry};
