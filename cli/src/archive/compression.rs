//! Output compression for distribution archives.
use std::fs::File;
use std::io::{self, BufWriter, Write};

use bzip2::write::BzEncoder;
use flate2::write::GzEncoder;

/// Compression applied to the tar stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// Plain `.tar`.
    None,
    /// gzip, `.tar.gz`.
    #[default]
    Gzip,
    /// bzip2, `.tar.bz2`.
    Bzip2,
}

impl Compression {
    /// Map a format name to a compression.
    ///
    /// `gz`/`gzip` and `bz2`/`bzip2` select the compressed formats; every
    /// other value, including typos, produces an uncompressed tar.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "gz" | "gzip" => Self::Gzip,
            "bz2" | "bzip2" => Self::Bzip2,
            _ => Self::None,
        }
    }

    /// Return `true` if `name` deliberately selects a format, i.e. it is a
    /// recognised compression name, `none`, or empty.
    #[must_use]
    pub fn is_known_name(name: &str) -> bool {
        let name = name.trim().to_ascii_lowercase();
        matches!(
            name.as_str(),
            "" | "none" | "tar" | "gz" | "gzip" | "bz2" | "bzip2"
        )
    }

    /// File suffix of archives written with this compression.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::None => ".tar",
            Self::Gzip => ".tar.gz",
            Self::Bzip2 => ".tar.bz2",
        }
    }

    /// Human-readable name for log output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "uncompressed",
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
        }
    }
}

/// Sink for the tar stream that applies the configured compression.
pub(crate) enum ArchiveWriter {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
    Bzip2(BzEncoder<BufWriter<File>>),
}

impl ArchiveWriter {
    /// Wrap `file` in the encoder for `compression`.
    pub(crate) fn new(file: File, compression: Compression) -> Self {
        let file = BufWriter::new(file);
        match compression {
            Compression::None => Self::Plain(file),
            Compression::Gzip => Self::Gzip(GzEncoder::new(file, flate2::Compression::default())),
            Compression::Bzip2 => Self::Bzip2(BzEncoder::new(file, bzip2::Compression::default())),
        }
    }

    /// Write the compressor trailer and flush everything to the file.
    pub(crate) fn finish(self) -> io::Result<()> {
        let mut file = match self {
            Self::Plain(w) => w,
            Self::Gzip(enc) => enc.finish()?,
            Self::Bzip2(enc) => enc.finish()?,
        };
        file.flush()
    }
}

impl Write for ArchiveWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(w) => w.write(buf),
            Self::Gzip(w) => w.write(buf),
            Self::Bzip2(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(w) => w.flush(),
            Self::Gzip(w) => w.flush(),
            Self::Bzip2(w) => w.flush(),
        }
    }
}
