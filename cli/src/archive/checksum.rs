//! SHA-256 sidecar files for finished archives.
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::PackageError;

/// Compute the lowercase hex SHA-256 digest of the file at `path`.
///
/// # Errors
///
/// Returns [`PackageError::Io`] if the file cannot be read.
pub fn compute_sha256(path: &Path) -> Result<String, PackageError> {
    let bytes = std::fs::read(path).map_err(PackageError::io(path))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let result = hasher.finalize();
    let mut hex = String::with_capacity(64);
    for b in &result {
        // write! to a String is infallible; unwrap_or(()) makes that explicit.
        write!(hex, "{b:02x}").unwrap_or(());
    }
    Ok(hex)
}

/// Path of the checksum file written next to `archive`.
#[must_use]
pub fn checksum_path(archive: &Path) -> PathBuf {
    let mut name = archive.as_os_str().to_owned();
    name.push(".sha256");
    PathBuf::from(name)
}

/// Write `<archive>.sha256` in `sha256sum` format and return the digest.
///
/// # Errors
///
/// Returns [`PackageError::Io`] if the archive cannot be read or the
/// checksum file cannot be written.
pub fn write_checksum_file(archive: &Path) -> Result<String, PackageError> {
    let digest = compute_sha256(archive)?;
    let file_name = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let sidecar = checksum_path(archive);
    std::fs::write(&sidecar, format!("{digest}  {file_name}\n"))
        .map_err(PackageError::io(&sidecar))?;
    Ok(digest)
}
