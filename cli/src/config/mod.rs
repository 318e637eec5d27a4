//! Optional `resbundle.toml` settings shared by both build steps.
//!
//! Values in the file act as defaults; command-line flags override scalar
//! values and extend list values.
pub mod toml_loader;

use anyhow::{Result, bail};
use serde::Deserialize;
use std::path::Path;

use crate::embed::{DEFAULT_ARRAY_TYPE, DEFAULT_SIZE_TYPE};

/// Settings file looked up in the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "resbundle.toml";

/// Compression used by `disttar` when neither file nor flag chooses one.
pub const DEFAULT_FORMAT: &str = "gz";

/// Contents of a settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Defaults for `resbundle embed`.
    pub embed: EmbedSettings,
    /// Defaults for `resbundle disttar`.
    pub disttar: DisttarSettings,
}

/// `[embed]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmbedSettings {
    /// Prefix declarations with `static`.
    #[serde(rename = "static")]
    pub is_static: bool,
    /// Emit the `<symbol>_len` declaration.
    pub with_length: bool,
    /// Element type of the generated array.
    pub array_type: String,
    /// Type of the length declaration.
    pub size_type: String,
}

impl Default for EmbedSettings {
    fn default() -> Self {
        Self {
            is_static: false,
            with_length: false,
            array_type: DEFAULT_ARRAY_TYPE.to_string(),
            size_type: DEFAULT_SIZE_TYPE.to_string(),
        }
    }
}

/// `[disttar]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisttarSettings {
    /// Compression name (`gz`, `bz2`, anything else means none).
    pub format: String,
    /// File extensions left out of the archive.
    pub exclude_exts: Vec<String>,
    /// Directory names pruned from the walk.
    pub exclude_dirs: Vec<String>,
    /// Write tar headers with fixed metadata.
    pub reproducible: bool,
    /// Write a `.sha256` file next to the archive.
    pub checksum: bool,
}

impl Default for DisttarSettings {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            exclude_exts: Vec::new(),
            exclude_dirs: Vec::new(),
            reproducible: false,
            checksum: false,
        }
    }
}

impl Settings {
    /// Load settings from `explicit`, or from [`DEFAULT_SETTINGS_FILE`] in the
    /// working directory when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file is missing, or if the file
    /// cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) if !path.exists() => {
                bail!("Settings file not found: {}", path.display())
            }
            Some(path) => toml_loader::load_config(path),
            None => toml_loader::load_config(Path::new(DEFAULT_SETTINGS_FILE)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn write_settings(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_SETTINGS_FILE);
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn defaults_match_builtin_values() {
        let settings = Settings::default();
        assert_eq!(settings.embed.array_type, "char");
        assert_eq!(settings.embed.size_type, "size_t");
        assert_eq!(settings.disttar.format, "gz");
        assert!(settings.disttar.exclude_exts.is_empty());
    }

    #[test]
    fn parses_both_sections() {
        let (_dir, path) = write_settings(
            "[embed]\nstatic = true\nwith_length = true\narray_type = \"const gchar\"\n\n\
             [disttar]\nformat = \"bz2\"\nexclude_exts = [\".o\"]\nexclude_dirs = [\".svn\"]\n",
        );
        let settings = Settings::load(Some(&path)).unwrap();
        assert!(settings.embed.is_static);
        assert!(settings.embed.with_length);
        assert_eq!(settings.embed.array_type, "const gchar");
        assert_eq!(settings.embed.size_type, "size_t");
        assert_eq!(settings.disttar.format, "bz2");
        assert_eq!(settings.disttar.exclude_exts, vec![".o"]);
        assert_eq!(settings.disttar.exclude_dirs, vec![".svn"]);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let (_dir, path) = write_settings("[disttar]\nchecksum = true\n");
        let settings = Settings::load(Some(&path)).unwrap();
        assert!(settings.disttar.checksum);
        assert_eq!(settings.disttar.format, "gz");
        assert_eq!(settings.embed, EmbedSettings::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let (_dir, path) = write_settings("[disttar]\nformats = \"gz\"\n");
        assert!(Settings::load(Some(&path)).is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Settings file not found"));
    }
}
