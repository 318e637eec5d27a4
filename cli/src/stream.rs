//! File-or-standard-stream arguments.
use std::fmt;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Marker that selects stdin or stdout instead of a file.
pub const STANDARD_STREAM_MARKER: &str = "-";

/// An input or output location given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamArg {
    /// A filesystem path.
    Path(PathBuf),
    /// Stdin when reading, stdout when writing.
    Standard,
}

impl StreamArg {
    /// Parse a command-line value; `-` selects the standard stream.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty value.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "" => Err("path must not be empty".to_string()),
            STANDARD_STREAM_MARKER => Ok(Self::Standard),
            other => Ok(Self::Path(PathBuf::from(other))),
        }
    }

    /// Return the path, or `None` for a standard stream.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Path(p) => Some(p),
            Self::Standard => None,
        }
    }

    /// Read the whole stream into memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn read_all(&self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        match self {
            Self::Path(p) => {
                fs::File::open(p)?.read_to_end(&mut buf)?;
            }
            Self::Standard => {
                io::stdin().lock().read_to_end(&mut buf)?;
            }
        }
        Ok(buf)
    }

    /// Open the stream for writing, truncating a file target.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(&self) -> io::Result<Box<dyn Write>> {
        Ok(match self {
            Self::Path(p) => Box::new(BufWriter::new(fs::File::create(p)?)),
            Self::Standard => Box::new(io::stdout().lock()),
        })
    }

    /// Display name used in messages.
    #[must_use]
    pub fn describe(&self, standard: &str) -> String {
        match self {
            Self::Path(p) => p.display().to_string(),
            Self::Standard => standard.to_string(),
        }
    }
}

impl fmt::Display for StreamArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Standard => f.write_str(STANDARD_STREAM_MARKER),
        }
    }
}
