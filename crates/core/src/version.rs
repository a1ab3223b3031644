//! hcert payload version compatibility.

use crate::constants::SUPPORTED_VERSION_REQ;
use crate::{HcertError, HcertResult};
use semver::{Prerelease, Version, VersionReq};

/// Checks the payload `ver` field against [`SUPPORTED_VERSION_REQ`].
///
/// `ver` is normalised before matching: a leading `v` is dropped, short forms (`1`, `1.3`)
/// are padded with zero components and a fourth numeric component (`1.0.0.0`) is dropped.
/// A pre-release of a supported version (`1.3.0-rc1`) is accepted.
///
/// # Errors
///
/// Returns [`HcertError::UnsupportedVersion`] if `ver` is not a version or falls outside the
/// supported major version.
pub fn check_version(ver: &str) -> HcertResult<Version> {
    let requirement = VersionReq::parse(SUPPORTED_VERSION_REQ)
        .map_err(|e| HcertError::InvalidInput(format!("bad version requirement: {e}")))?;

    let version = Version::parse(&normalize_version(ver))
        .map_err(|_| HcertError::UnsupportedVersion(ver.to_string()))?;

    // Caret requirements skip pre-releases unless the requirement names one.
    let mut release = version.clone();
    release.pre = Prerelease::EMPTY;
    if !requirement.matches(&release) {
        return Err(HcertError::UnsupportedVersion(ver.to_string()));
    }

    Ok(version)
}

fn normalize_version(ver: &str) -> String {
    let ver = ver.trim();
    let ver = ver.strip_prefix(['v', 'V']).unwrap_or(ver);
    let core_len = ver.find(['-', '+']).unwrap_or(ver.len());
    let (core, suffix) = ver.split_at(core_len);

    let parts: Vec<&str> = core.split('.').collect();
    let core = match parts.as_slice() {
        [major] => format!("{major}.0.0"),
        [major, minor] => format!("{major}.{minor}.0"),
        [major, minor, patch, build]
            if !build.is_empty() && build.bytes().all(|b| b.is_ascii_digit()) =>
        {
            format!("{major}.{minor}.{patch}")
        }
        _ => core.to_string(),
    };
    format!("{core}{suffix}")
}
