//! Distribution tarballs built from filtered source trees.
//!
//! [`collect_members`] decides what goes into the archive; [`package`] writes
//! it. Every member is stored as `<root_name>/<relative path>`, and only
//! files are stored: directories are implied by their members' paths.
pub mod checksum;
pub mod compression;
pub mod target;

use std::collections::{BTreeSet, HashSet};
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::PackageError;
use crate::logging::Log;

pub use compression::Compression;

/// Everything needed to package one archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageConfig {
    /// Files and directories to include, in order.
    pub source_roots: Vec<PathBuf>,
    /// Directory that relative source roots are resolved against; member
    /// paths are relative to it.
    pub base_dir: PathBuf,
    /// Extensions (with or without the leading dot) of walked files to drop.
    pub excluded_extensions: BTreeSet<String>,
    /// Directory names whose subtrees are never visited.
    pub excluded_dirs: BTreeSet<String>,
    /// Top-level directory every member is stored under.
    pub root_name: String,
    /// Compression of the archive stream.
    pub compression: Compression,
    /// Store fixed mtime and ownership in tar headers.
    pub reproducible: bool,
    /// Write a `.sha256` file next to the archive.
    pub checksum: bool,
}

impl PackageConfig {
    /// Create a config with no exclusions, gzip compression, and the working
    /// directory as base.
    #[must_use]
    pub fn new(root_name: impl Into<String>, source_roots: Vec<PathBuf>) -> Self {
        Self {
            source_roots,
            base_dir: PathBuf::from("."),
            excluded_extensions: BTreeSet::new(),
            excluded_dirs: BTreeSet::new(),
            root_name: root_name.into(),
            compression: Compression::default(),
            reproducible: false,
            checksum: false,
        }
    }

    /// Return `true` if a walked file named `name` is dropped by extension.
    ///
    /// The extension is the text after the last dot of the name; a name whose
    /// only dot is the leading one (`.bashrc`) has no extension.
    #[must_use]
    pub fn is_excluded_file(&self, name: &OsStr) -> bool {
        let Some(ext) = Path::new(name).extension() else {
            return false;
        };
        let ext = ext.to_string_lossy();
        self.excluded_extensions
            .iter()
            .any(|excluded| excluded.trim_start_matches('.') == ext)
    }

    /// Return `true` if a directory named `name` is pruned from the walk.
    #[must_use]
    pub fn is_excluded_dir(&self, name: &OsStr) -> bool {
        self.excluded_dirs
            .iter()
            .any(|excluded| OsStr::new(excluded) == name)
    }
}

/// One file scheduled for the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Where the file is read from.
    pub source: PathBuf,
    /// Path stored in the archive, prefixed with the root name.
    pub archive_path: PathBuf,
}

/// Outcome of a successful [`package`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSummary {
    /// Archive that was written.
    pub target: PathBuf,
    /// Number of files stored.
    pub member_count: usize,
    /// SHA-256 of the archive when a checksum file was requested.
    pub checksum: Option<String>,
}

/// Resolve, walk, and filter the source roots into an ordered member list.
///
/// All roots are checked before any walking starts. Explicitly named files
/// are always included; files found by walking a directory are filtered by
/// extension, and excluded directory names are pruned below each root.
/// A relative path is collected at most once even if several roots reach it.
///
/// # Errors
///
/// Returns [`PackageError::NotFound`] for a missing root,
/// [`PackageError::Walk`] or [`PackageError::Io`] when the tree cannot be
/// read, and [`PackageError::InvalidMemberPath`] for roots containing `..`
/// or a root name that is not a plain relative path.
pub fn collect_members(config: &PackageConfig) -> Result<Vec<Member>, PackageError> {
    let root_name = validate_root_name(&config.root_name)?;
    let roots = config
        .source_roots
        .iter()
        .map(|root| {
            let full = config.base_dir.join(root);
            match fs::metadata(&full) {
                Ok(meta) => Ok((root, full, meta)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Err(PackageError::NotFound(full)),
                Err(e) => Err(PackageError::io(full)(e)),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    let mut members = Vec::new();
    let mut push = |relative: PathBuf, source: &Path| -> Result<(), PackageError> {
        let relative = normalize_member_path(&relative)?;
        if seen.insert(relative.clone()) {
            members.push(Member {
                source: source.to_path_buf(),
                archive_path: root_name.join(relative),
            });
        }
        Ok(())
    };

    for (root, full, meta) in roots {
        let root_relative = relative_root(root, &config.base_dir);

        if meta.is_file() {
            push(root_relative, &full)?;
            continue;
        }
        if !meta.is_dir() {
            continue;
        }

        let walker = WalkDir::new(&full)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                !(entry.depth() > 0
                    && entry.file_type().is_dir()
                    && config.is_excluded_dir(entry.file_name()))
            });
        for entry in walker {
            let entry = entry?;
            // Links to directories are neither walked nor stored.
            let is_dir = entry.file_type().is_dir()
                || (entry.path_is_symlink() && entry.path().is_dir());
            if is_dir || config.is_excluded_file(entry.file_name()) {
                continue;
            }
            let below = entry
                .path()
                .strip_prefix(&full)
                .unwrap_or_else(|_| Path::new(entry.file_name()));
            push(root_relative.join(below), entry.path())?;
        }
    }

    Ok(members)
}

/// Express `root` relative to `base_dir` when it is an absolute path inside
/// it.
///
/// The lexical comparison is tried first, then the canonical forms of both
/// paths, so a relative `base_dir` such as `.` still matches. Absolute roots
/// outside `base_dir` are returned unchanged; their root component is dropped
/// later by [`normalize_member_path`].
fn relative_root(root: &Path, base_dir: &Path) -> PathBuf {
    if !root.is_absolute() {
        return root.to_path_buf();
    }
    if let Ok(stripped) = root.strip_prefix(base_dir) {
        return stripped.to_path_buf();
    }
    if let (Ok(base), Ok(canonical)) = (fs::canonicalize(base_dir), fs::canonicalize(root))
        && let Ok(stripped) = canonical.strip_prefix(&base)
    {
        return stripped.to_path_buf();
    }
    root.to_path_buf()
}

/// Check that the archive root name is a plain relative path.
///
/// A root name that is empty, absolute, or contains `.`/`..` would place
/// members outside the extraction directory.
fn validate_root_name(name: &str) -> Result<PathBuf, PackageError> {
    let path = Path::new(name);
    let plain = !name.is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
    if plain {
        Ok(path.to_path_buf())
    } else {
        Err(PackageError::InvalidMemberPath(path.to_path_buf()))
    }
}

/// Keep only the normal components of a member path.
///
/// `.` and root/prefix components are dropped; `..` is rejected.
fn normalize_member_path(path: &Path) -> Result<PathBuf, PackageError> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => {
                return Err(PackageError::InvalidMemberPath(path.to_path_buf()));
            }
        }
    }
    Ok(out)
}

/// Write the archive for `config` to `target`.
///
/// Missing source roots are reported before `target` is created. The parent
/// directory of `target` is created when missing. A failure after that point
/// may leave a partial archive behind.
///
/// # Errors
///
/// Returns any error from [`collect_members`], and [`PackageError::Io`] when
/// the archive or its checksum file cannot be written.
pub fn package(
    config: &PackageConfig,
    target: &Path,
    log: &dyn Log,
) -> Result<PackageSummary, PackageError> {
    let members = collect_members(config)?;

    log.stage(&format!("Creating archive {}", target.display()));
    log.debug(&format!(
        "{} members, {}, root '{}'",
        members.len(),
        config.compression.label(),
        config.root_name
    ));

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(PackageError::io(parent))?;
    }
    let file = fs::File::create(target).map_err(PackageError::io(target))?;

    let mut builder = tar::Builder::new(compression::ArchiveWriter::new(
        file,
        config.compression,
    ));
    builder.mode(if config.reproducible {
        tar::HeaderMode::Deterministic
    } else {
        tar::HeaderMode::Complete
    });
    // Symlinks are stored as links, so dangling ones do not abort the write.
    builder.follow_symlinks(false);

    for member in &members {
        log.debug(&format!(
            "adding {} as {}",
            member.source.display(),
            member.archive_path.display()
        ));
        builder
            .append_path_with_name(&member.source, &member.archive_path)
            .map_err(PackageError::io(&member.source))?;
    }

    builder
        .into_inner()
        .and_then(compression::ArchiveWriter::finish)
        .map_err(PackageError::io(target))?;

    let checksum = if config.checksum {
        let digest = checksum::write_checksum_file(target)?;
        log.info(&format!("sha256 {digest}"));
        Some(digest)
    } else {
        None
    };

    Ok(PackageSummary {
        target: target.to_path_buf(),
        member_count: members.len(),
        checksum,
    })
}
