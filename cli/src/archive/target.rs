//! Archive target naming: suffix and root directory derivation.
use std::path::{Path, PathBuf};

use super::compression::Compression;

/// Return `target` with the compression suffix appended, unless its file
/// name already contains `.tar`.
#[must_use]
pub fn resolve_target(target: &Path, compression: Compression) -> PathBuf {
    let has_tar_suffix = target
        .file_name()
        .is_some_and(|name| name.to_string_lossy().contains(".tar"));
    if has_tar_suffix {
        return target.to_path_buf();
    }
    let mut name = target.as_os_str().to_owned();
    name.push(compression.suffix());
    PathBuf::from(name)
}

/// Default archive root name: the target file name up to its first `.tar`.
///
/// `dist/foo-1.0.tar.gz` yields `foo-1.0`. Returns `None` when nothing is
/// left of the file name.
#[must_use]
pub fn root_name_from_target(target: &Path) -> Option<String> {
    let name = target.file_name()?.to_string_lossy();
    let stem = name.split(".tar").next().unwrap_or_default();
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}
