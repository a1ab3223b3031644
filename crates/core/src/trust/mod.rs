//! Trust anchors.
//!
//! A trust anchor describes one issuer's signing certificate as published in a national or EU
//! trust list. This crate does not verify signatures; it only carries anchors from a
//! [`TrustStore`] to whatever verifier wraps the coverage engine.

mod anchor;
mod file_store;

pub use anchor::{find_by_kid, TrustAnchor};
pub use file_store::FileTrustStore;

use crate::HcertResult;

/// Source of trust anchors.
pub trait TrustStore {
    /// Returns every anchor the store currently knows.
    fn fetch_trust_anchors(&self) -> HcertResult<Vec<TrustAnchor>>;
}

/// A store over anchors that were fetched elsewhere.
#[derive(Clone, Debug, Default)]
pub struct StaticTrustStore {
    anchors: Vec<TrustAnchor>,
}

impl StaticTrustStore {
    pub fn new(anchors: Vec<TrustAnchor>) -> Self {
        Self { anchors }
    }
}

impl TrustStore for StaticTrustStore {
    fn fetch_trust_anchors(&self) -> HcertResult<Vec<TrustAnchor>> {
        Ok(self.anchors.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn static_store_returns_its_anchors() {
        let timestamp = Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap();
        let anchors = vec![
            TrustAnchor::new("DSC", "DE", "DEsVUSvpFAE=", "", "sig", "thumb", timestamp),
            TrustAnchor::new("DSC", "AT", "d0ff60xaR1k=", "", "sig", "thumb", timestamp),
        ];
        let store = StaticTrustStore::new(anchors.clone());

        let fetched = store.fetch_trust_anchors().unwrap();
        assert_eq!(fetched, anchors);
        assert_eq!(find_by_kid(&fetched, "d0ff60xaR1k=").len(), 1);
    }

    #[test]
    fn empty_static_store_is_not_an_error() {
        let store = StaticTrustStore::default();
        assert!(store.fetch_trust_anchors().unwrap().is_empty());
    }
}
