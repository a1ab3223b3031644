//! Trust list stored as a JSON file.
//!
//! The document mirrors the DSC list published by national gateways:
//!
//! ```json
//! {
//!   "certificates": [
//!     {
//!       "certificateType": "DSC",
//!       "country": "DE",
//!       "kid": "DEsVUSvpFAE=",
//!       "rawData": "MIIGXjCCBBagAwIBAgIQXg7NBunD5eaLpO3Fg9REnzA9Bgk...",
//!       "signature": "MEQCIHq...",
//!       "thumbprint": "0c4e6b...",
//!       "timestamp": "2021-05-20T12:05:24+02:00"
//!     }
//!   ]
//! }
//! ```
//!
//! `rawData` is base64 DER and is handed on wrapped in PEM armour.

use super::anchor::wrap_certificate;
use super::{TrustAnchor, TrustStore};
use crate::datetime::parse_date_time;
use crate::{HcertError, HcertResult};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Trust store backed by a JSON trust list on disk. The file is re-read on every fetch.
#[derive(Clone, Debug)]
pub struct FileTrustStore {
    path: PathBuf,
}

impl FileTrustStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TrustStore for FileTrustStore {
    fn fetch_trust_anchors(&self) -> HcertResult<Vec<TrustAnchor>> {
        let text = std::fs::read_to_string(&self.path).map_err(HcertError::TrustStoreRead)?;

        let mut deserializer = serde_json::Deserializer::from_str(&text);
        let list: TrustListWire = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|err| {
                HcertError::TrustStoreParse(format!("{} at {}", err.inner(), err.path()))
            })?;

        let anchors = list
            .certificates
            .into_iter()
            .map(wire_to_anchor)
            .collect::<HcertResult<Vec<_>>>()?;

        tracing::info!(
            "loaded {} trust anchors from {}",
            anchors.len(),
            self.path.display()
        );

        Ok(anchors)
    }
}

#[derive(Debug, Deserialize)]
struct TrustListWire {
    certificates: Vec<TrustAnchorWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrustAnchorWire {
    certificate_type: String,
    country: String,
    kid: String,
    raw_data: String,
    signature: String,
    thumbprint: String,
    timestamp: String,
}

fn wire_to_anchor(wire: TrustAnchorWire) -> HcertResult<TrustAnchor> {
    let raw_data: String = wire.raw_data.split_whitespace().collect();
    let der = general_purpose::STANDARD
        .decode(raw_data)
        .map_err(|e| HcertError::InvalidCertificateData {
            kid: wire.kid.clone(),
            reason: format!("rawData is not base64: {e}"),
        })?;

    let timestamp = parse_date_time(&wire.timestamp).ok_or_else(|| {
        HcertError::TrustStoreParse(format!(
            "invalid timestamp for kid {}: {}",
            wire.kid, wire.timestamp
        ))
    })?;

    Ok(TrustAnchor::new(
        wire.certificate_type,
        wire.country,
        wire.kid,
        wrap_certificate(der),
        wire.signature,
        wire.thumbprint,
        timestamp,
    ))
}
