//! Domain-specific error types for the resbundle build steps.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! The core modules return typed errors (e.g., [`EmbedError`], [`PackageError`])
//! while command handlers at the CLI boundary convert them to [`anyhow::Error`]
//! via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! ResbundleError
//! ├── Usage(UsageError)      bad or missing arguments
//! ├── Embed(EmbedError)      empty input, stream I/O
//! └── Package(PackageError)  missing roots, walk and archive I/O
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for resbundle.
///
/// Aggregates domain-specific sub-errors and is convertible to
/// [`anyhow::Error`] for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum ResbundleError {
    /// Invalid or incomplete command-line arguments.
    #[error("Usage error: {0}")]
    Usage(#[from] UsageError),

    /// Failure while embedding a byte stream.
    #[error("Embed error: {0}")]
    Embed(#[from] EmbedError),

    /// Failure while packaging a distribution archive.
    #[error("Package error: {0}")]
    Package(#[from] PackageError),
}

/// Errors caused by arguments that clap accepted but that are still unusable.
#[derive(Error, Debug)]
pub enum UsageError {
    /// The symbol name is not a valid C identifier.
    #[error("Invalid symbol name '{0}': must be a C identifier")]
    InvalidSymbol(String),

    /// No symbol was given and none can be derived from the stream paths.
    #[error("A symbol name is required when both input and output are standard streams")]
    SymbolRequired,

    /// The archive root name cannot be derived from the target path.
    #[error("Cannot derive an archive root name from '{}'", .0.display())]
    NoRootName(PathBuf),
}

/// Errors that arise while embedding a byte stream as a source array.
#[derive(Error, Debug)]
pub enum EmbedError {
    /// The input stream contained no bytes.
    #[error("Input is empty: at least one byte is required")]
    EmptyInput,

    /// Reading the input or writing the output failed.
    #[error("IO error on {stream}: {source}")]
    Io {
        /// Display name of the stream (`<stdin>`, `<stdout>` or a path).
        stream: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise while collecting or writing a distribution archive.
#[derive(Error, Debug)]
pub enum PackageError {
    /// A declared source root does not exist.
    #[error("Source not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A read or write failed during the walk or the archive write.
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// A member path climbs out of its source root with `..`.
    #[error("Invalid member path {}: parent components are not allowed", .0.display())]
    InvalidMemberPath(PathBuf),
}

impl ResbundleError {
    /// Process exit code for this error: `2` for usage errors, `1` otherwise.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            Self::Embed(_) | Self::Package(_) => 1,
        }
    }
}

impl PackageError {
    /// Build a closure that wraps an [`std::io::Error`] with `path`.
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
