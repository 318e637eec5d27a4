//! Disttar command implementation.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use crate::archive::target::{resolve_target, root_name_from_target};
use crate::archive::{self, Compression, PackageConfig, PackageSummary};
use crate::cli::{DisttarOpts, GlobalOpts};
use crate::config::{DisttarSettings, Settings};
use crate::error::{ResbundleError, UsageError};
use crate::logging::Log;

/// A fully resolved disttar invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisttarRequest {
    /// Archive path, including the compression suffix.
    pub target: PathBuf,
    /// What to package and how.
    pub config: PackageConfig,
    /// Only list members.
    pub dry_run: bool,
}

impl DisttarRequest {
    /// Merge command-line options over settings-file defaults.
    ///
    /// Scalar flags override the settings file; exclusion lists are combined.
    /// An unrecognised format name falls back to an uncompressed tar with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::NoRootName`] if no root name is given and none
    /// can be derived from the target.
    pub fn from_args(
        opts: &DisttarOpts,
        settings: &DisttarSettings,
        log: &dyn Log,
    ) -> Result<Self, ResbundleError> {
        let format = opts.format.as_deref().unwrap_or(&settings.format);
        if !Compression::is_known_name(format) {
            log.warn(&format!(
                "unknown archive format '{format}', writing an uncompressed tar"
            ));
        }
        let compression = Compression::from_name(format);
        let target = resolve_target(&opts.target, compression);

        let root_name = match &opts.root_name {
            Some(name) => name.clone(),
            None => root_name_from_target(&target)
                .ok_or_else(|| UsageError::NoRootName(target.clone()))?,
        };

        let mut config = PackageConfig::new(root_name, opts.sources.clone());
        if let Some(dir) = &opts.directory {
            config.base_dir.clone_from(dir);
        }
        config.excluded_extensions = settings
            .exclude_exts
            .iter()
            .chain(&opts.exclude_ext)
            .cloned()
            .collect();
        config.excluded_dirs = settings
            .exclude_dirs
            .iter()
            .chain(&opts.exclude_dir)
            .cloned()
            .collect();
        config.compression = compression;
        config.reproducible = opts.reproducible || settings.reproducible;
        config.checksum = opts.checksum || settings.checksum;

        Ok(Self {
            target,
            config,
            dry_run: opts.dry_run,
        })
    }
}

/// Package the archive, or only list its members on a dry run.
///
/// Returns `None` for a dry run.
///
/// # Errors
///
/// Returns a [`PackageError`](crate::error::PackageError) wrapped in
/// [`ResbundleError`] if collecting or writing fails.
pub fn execute(
    request: &DisttarRequest,
    log: &dyn Log,
) -> Result<Option<PackageSummary>, ResbundleError> {
    if request.dry_run {
        let members = archive::collect_members(&request.config)?;
        log.stage(&format!("Would create archive {}", request.target.display()));
        for member in &members {
            log.dry_run(&format!(
                "would add {} as {}",
                member.source.display(),
                member.archive_path.display()
            ));
        }
        log.info(&format!("{} members", members.len()));
        return Ok(None);
    }

    Ok(Some(archive::package(
        &request.config,
        &request.target,
        log,
    )?))
}

/// Run the disttar command.
///
/// # Errors
///
/// Returns an error if the settings file cannot be loaded, a source root is
/// missing, or the archive cannot be written. A failed run may leave a
/// partial archive at the target path.
pub fn run(global: &GlobalOpts, opts: &DisttarOpts, log: &dyn Log) -> Result<()> {
    let settings = Settings::load(global.config.as_deref())?;
    let request = DisttarRequest::from_args(opts, &settings.disttar, log)?;

    let summary = execute(&request, log)
        .with_context(|| format!("packaging {} failed", request.target.display()))?;
    if let Some(summary) = summary {
        log.info(&format!(
            "{} files in {}",
            summary.member_count,
            summary.target.display()
        ));
    }
    Ok(())
}
