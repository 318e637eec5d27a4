//! Embed command implementation.
use anyhow::{Context as _, Result};
use std::io::Write as _;

use crate::cli::{EmbedOpts, GlobalOpts};
use crate::config::{EmbedSettings, Settings};
use crate::embed::{self, EmbedOptions, StorageQualifier};
use crate::error::{EmbedError, ResbundleError, UsageError};
use crate::logging::Log;
use crate::stream::StreamArg;

/// A fully resolved embed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedRequest {
    /// Where the bytes are read from.
    pub input: StreamArg,
    /// Where the declaration is written.
    pub output: StreamArg,
    /// Array symbol name, already validated.
    pub symbol: String,
    /// Rendering options.
    pub options: EmbedOptions,
}

impl EmbedRequest {
    /// Merge command-line options over settings-file defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`UsageError`] if the symbol is invalid or cannot be derived.
    pub fn from_args(opts: &EmbedOpts, settings: &EmbedSettings) -> Result<Self, ResbundleError> {
        let symbol = match &opts.symbol {
            Some(symbol) => {
                embed::validate_symbol(symbol)?;
                symbol.clone()
            }
            None => opts
                .output
                .path()
                .or_else(|| opts.input.path())
                .and_then(embed::derive_symbol)
                .ok_or(UsageError::SymbolRequired)?,
        };

        let options = EmbedOptions {
            with_length: opts.with_length || settings.with_length,
            storage: StorageQualifier::from_flag(opts.is_static || settings.is_static),
            array_type: opts
                .array_type
                .clone()
                .unwrap_or_else(|| settings.array_type.clone()),
            size_type: opts
                .size_type
                .clone()
                .unwrap_or_else(|| settings.size_type.clone()),
        };

        Ok(Self {
            input: opts.input.clone(),
            output: opts.output.clone(),
            symbol,
            options,
        })
    }
}

/// Read the input, render it, and only then open and write the output.
///
/// Returns the number of bytes embedded.
///
/// # Errors
///
/// Returns [`EmbedError::EmptyInput`] for an empty input and
/// [`EmbedError::Io`] when a stream cannot be read or written.
pub fn execute(request: &EmbedRequest) -> Result<usize, ResbundleError> {
    let bytes = request.input.read_all().map_err(|source| EmbedError::Io {
        stream: request.input.describe("<stdin>"),
        source,
    })?;
    let text = embed::embed(&bytes, &request.symbol, &request.options)?;

    let write_err = |source| EmbedError::Io {
        stream: request.output.describe("<stdout>"),
        source,
    };
    let mut out = request.output.create().map_err(write_err)?;
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(write_err)?;
    Ok(bytes.len())
}

/// Run the embed command.
///
/// # Errors
///
/// Returns an error if the settings file, the arguments, or either stream is
/// unusable, or if the input is empty.
pub fn run(global: &GlobalOpts, opts: &EmbedOpts, log: &dyn Log) -> Result<()> {
    let settings = Settings::load(global.config.as_deref())?;
    let request = EmbedRequest::from_args(opts, &settings.embed)?;
    log.debug(&format!(
        "embedding {} into {} as '{}'",
        request.input.describe("<stdin>"),
        request.output.describe("<stdout>"),
        request.symbol
    ));

    let count = execute(&request)
        .with_context(|| format!("embedding {} failed", request.input.describe("<stdin>")))?;
    log.debug(&format!("wrote {count} bytes as {}", request.symbol));
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn opts(input: &str, output: &str, symbol: Option<&str>) -> EmbedOpts {
        EmbedOpts {
            input: StreamArg::parse(input).unwrap(),
            output: StreamArg::parse(output).unwrap(),
            symbol: symbol.map(String::from),
            is_static: false,
            with_length: false,
            array_type: None,
            size_type: None,
        }
    }

    #[test]
    fn symbol_derived_from_output_path() {
        let request =
            EmbedRequest::from_args(&opts("ui.glade", "build/ui.h", None), &EmbedSettings::default())
                .unwrap();
        assert_eq!(request.symbol, "ui_h_data");
    }

    #[test]
    fn symbol_derived_from_input_when_output_is_stdout() {
        let request =
            EmbedRequest::from_args(&opts("icon.png", "-", None), &EmbedSettings::default())
                .unwrap();
        assert_eq!(request.symbol, "icon_png_data");
    }

    #[test]
    fn symbol_required_for_two_standard_streams() {
        let err = EmbedRequest::from_args(&opts("-", "-", None), &EmbedSettings::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ResbundleError::Usage(UsageError::SymbolRequired)
        ));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn invalid_explicit_symbol_is_usage_error() {
        let err = EmbedRequest::from_args(
            &opts("a.bin", "a.h", Some("not-valid")),
            &EmbedSettings::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ResbundleError::Usage(UsageError::InvalidSymbol(_))
        ));
    }

    #[test]
    fn settings_supply_defaults_and_flags_override() {
        let settings = EmbedSettings {
            is_static: true,
            with_length: false,
            array_type: "const gchar".to_string(),
            size_type: "gsize".to_string(),
        };
        let mut args = opts("a.bin", "a.h", Some("blob"));
        args.with_length = true;
        args.size_type = Some("size_t".to_string());
        let request = EmbedRequest::from_args(&args, &settings).unwrap();
        assert_eq!(request.options.storage, StorageQualifier::Static);
        assert!(request.options.with_length);
        assert_eq!(request.options.array_type, "const gchar");
        assert_eq!(request.options.size_type, "size_t");
    }

    #[test]
    fn execute_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("abc.txt");
        let output = dir.path().join("abc.h");
        std::fs::write(&input, b"ABC").unwrap();
        let request = EmbedRequest {
            input: StreamArg::Path(input),
            output: StreamArg::Path(output.clone()),
            symbol: "foo".to_string(),
            options: EmbedOptions::default(),
        };
        assert_eq!(execute(&request).unwrap(), 3);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "char foo[] = {0x41, 0x42, 0x43};\n"
        );
    }

    #[test]
    fn execute_empty_input_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.bin");
        let output = dir.path().join("empty.h");
        std::fs::write(&input, b"").unwrap();
        let request = EmbedRequest {
            input: StreamArg::Path(input),
            output: StreamArg::Path(output.clone()),
            symbol: "empty".to_string(),
            options: EmbedOptions::default(),
        };
        let err = execute(&request).unwrap_err();
        assert!(matches!(err, ResbundleError::Embed(EmbedError::EmptyInput)));
        assert!(!output.exists(), "output must not be created");
    }

    #[test]
    fn execute_missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let request = EmbedRequest {
            input: StreamArg::Path(dir.path().join("missing.bin")),
            output: StreamArg::Path(dir.path().join("out.h")),
            symbol: "x".to_string(),
            options: EmbedOptions::default(),
        };
        let err = execute(&request).unwrap_err();
        assert!(
            matches!(&err, ResbundleError::Embed(EmbedError::Io { stream, .. }) if stream.ends_with("missing.bin")),
            "{err}"
        );
    }
}
