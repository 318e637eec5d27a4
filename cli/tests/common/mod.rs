// Shared helpers for integration tests.
//
// Provides a temporary source tree with a fluent builder, a recording `Log`
// implementation, and readers that list the members of a produced archive.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use resbundle_cli::archive::Compression;
use resbundle_cli::logging::Log;

/// An isolated source tree backed by a [`tempfile::TempDir`].
pub struct SourceTree {
    /// Temporary directory holding the tree; deleted on drop.
    pub root: tempfile::TempDir,
}

impl SourceTree {
    /// Path to the tree root.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Absolute path of `relative` inside the tree.
    pub fn join(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }
}

/// Fluent builder for [`SourceTree`].
pub struct SourceTreeBuilder {
    tree: SourceTree,
}

impl SourceTreeBuilder {
    /// Begin building an empty tree.
    pub fn new() -> Self {
        Self {
            tree: SourceTree {
                root: tempfile::tempdir().expect("create temp dir"),
            },
        }
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn with_file(self, relative: &str, content: &[u8]) -> Self {
        let path = self.tree.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, content).expect("write file");
        self
    }

    /// Create an empty directory at `relative`.
    pub fn with_dir(self, relative: &str) -> Self {
        std::fs::create_dir_all(self.tree.join(relative)).expect("create dir");
        self
    }

    /// Finish building and return the tree.
    pub fn build(self) -> SourceTree {
        self.tree
    }
}

/// The `{a.txt, b.o, sub/c.txt, .svn/d}` tree used by the packaging tests.
pub fn sample_tree() -> SourceTree {
    SourceTreeBuilder::new()
        .with_file("a.txt", b"alpha\n")
        .with_file("b.o", b"\x7fELF")
        .with_file("sub/c.txt", b"gamma\n")
        .with_file(".svn/d", b"svn metadata")
        .build()
}

/// A [`Log`] that keeps every message as `"<level>: <msg>"`.
#[derive(Debug, Default)]
pub struct RecordingLog {
    lines: Mutex<Vec<String>>,
}

impl RecordingLog {
    fn push(&self, level: &str, msg: &str) {
        self.lines
            .lock()
            .expect("log lock")
            .push(format!("{level}: {msg}"));
    }

    /// All recorded lines in order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("log lock").clone()
    }
}

impl Log for RecordingLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push("dry_run", msg);
    }
}

/// Open `path` and undo `compression`.
fn open_decoded(path: &Path, compression: Compression) -> Box<dyn Read> {
    let file = File::open(path).expect("open archive");
    match compression {
        Compression::None => Box::new(file),
        Compression::Gzip => Box::new(flate2::read::GzDecoder::new(file)),
        Compression::Bzip2 => Box::new(bzip2::read::BzDecoder::new(file)),
    }
}

/// Sorted `(path, contents)` of every entry in the archive.
pub fn archive_entries(path: &Path, compression: Compression) -> Vec<(String, Vec<u8>)> {
    let mut archive = tar::Archive::new(open_decoded(path, compression));
    let mut entries: Vec<(String, Vec<u8>)> = archive
        .entries()
        .expect("read entries")
        .map(|entry| {
            let mut entry = entry.expect("entry");
            assert!(
                entry.header().entry_type().is_file(),
                "only regular files are stored"
            );
            let name = entry
                .path()
                .expect("entry path")
                .to_string_lossy()
                .replace('\\', "/");
            let mut data = Vec::new();
            entry.read_to_end(&mut data).expect("entry data");
            (name, data)
        })
        .collect();
    entries.sort();
    entries
}

/// Sorted member paths of the archive.
pub fn archive_paths(path: &Path, compression: Compression) -> Vec<String> {
    archive_entries(path, compression)
        .into_iter()
        .map(|(name, _)| name)
        .collect()
}
