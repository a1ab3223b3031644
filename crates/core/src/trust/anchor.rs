use crate::{HcertError, HcertResult};
use chrono::{DateTime, Utc};
use pem::{EncodeConfig, LineEnding, Pem};

const CERTIFICATE_TAG: &str = "CERTIFICATE";

/// One issuer's key material and trust-list metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrustAnchor {
    certificate_type: String,
    country: String,
    kid: String,
    certificate: String,
    signature: String,
    thumbprint: String,
    timestamp: DateTime<Utc>,
}

impl TrustAnchor {
    /// Creates an anchor. `certificate` is the PEM armoured X.509 certificate.
    pub fn new(
        certificate_type: impl Into<String>,
        country: impl Into<String>,
        kid: impl Into<String>,
        certificate: impl Into<String>,
        signature: impl Into<String>,
        thumbprint: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            certificate_type: certificate_type.into(),
            country: country.into(),
            kid: kid.into(),
            certificate: certificate.into(),
            signature: signature.into(),
            thumbprint: thumbprint.into(),
            timestamp,
        }
    }

    pub fn certificate_type(&self) -> &str {
        &self.certificate_type
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Key identifier as carried in the COSE header of signed certificates.
    pub fn kid(&self) -> &str {
        &self.kid
    }

    /// PEM armoured certificate.
    pub fn certificate(&self) -> &str {
        &self.certificate
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn thumbprint(&self) -> &str {
        &self.thumbprint
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// DER bytes of the certificate, with the PEM armour removed.
    pub fn certificate_der(&self) -> HcertResult<Vec<u8>> {
        let parsed = pem::parse(&self.certificate).map_err(HcertError::PemParse)?;
        if parsed.tag != CERTIFICATE_TAG {
            return Err(HcertError::InvalidCertificateData {
                kid: self.kid.clone(),
                reason: format!("expected PEM tag {CERTIFICATE_TAG}, found {}", parsed.tag),
            });
        }
        Ok(parsed.contents)
    }
}

/// Anchors whose key identifier equals `kid`.
///
/// Trust lists may publish several certificates under one kid (for example across a key
/// rollover), so every match is returned.
pub fn find_by_kid<'a>(anchors: &'a [TrustAnchor], kid: &str) -> Vec<&'a TrustAnchor> {
    anchors.iter().filter(|anchor| anchor.kid == kid).collect()
}

/// Wraps DER certificate bytes in `CERTIFICATE` PEM armour.
pub(crate) fn wrap_certificate(der: Vec<u8>) -> String {
    let pem = Pem {
        tag: CERTIFICATE_TAG.to_string(),
        contents: der,
    };
    pem::encode_config(
        &pem,
        EncodeConfig {
            line_ending: LineEnding::LF,
        },
    )
}
