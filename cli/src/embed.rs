//! Embedding arbitrary bytes into a generated C array declaration.
//!
//! The generated fragment has the exact form
//!
//! ```text
//! [static ]<array-type> <symbol>[] = {0xHH, 0xHH, ..., 0xHH};
//! [static ]<size-type> <symbol>_len = <length>;
//! ```
//!
//! where the second line is only present when a length symbol is requested.
use std::fmt::Write as _;
use std::path::Path;

use crate::error::{EmbedError, UsageError};

/// Default element type of the generated array.
pub const DEFAULT_ARRAY_TYPE: &str = "char";

/// Default type of the generated length symbol.
pub const DEFAULT_SIZE_TYPE: &str = "size_t";

/// Suffix appended to the symbol name for the length declaration.
pub const LENGTH_SUFFIX: &str = "_len";

/// Suffix appended to a symbol name derived from a file name.
pub const DERIVED_SYMBOL_SUFFIX: &str = "_data";

/// Storage qualifier applied to every generated declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageQualifier {
    /// Ordinary external linkage.
    #[default]
    None,
    /// `static`: visible only inside the including translation unit.
    Static,
}

impl StorageQualifier {
    /// Map a boolean `static` flag to a qualifier.
    #[must_use]
    pub const fn from_flag(is_static: bool) -> Self {
        if is_static { Self::Static } else { Self::None }
    }

    const fn prefix(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Static => "static ",
        }
    }
}

/// Rendering options for one embed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedOptions {
    /// Also declare `<symbol>_len` holding the byte count.
    pub with_length: bool,
    /// Storage qualifier for both declarations.
    pub storage: StorageQualifier,
    /// Element type of the array.
    pub array_type: String,
    /// Type of the length symbol.
    pub size_type: String,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            with_length: false,
            storage: StorageQualifier::None,
            array_type: DEFAULT_ARRAY_TYPE.to_string(),
            size_type: DEFAULT_SIZE_TYPE.to_string(),
        }
    }
}

/// Render `input` as a source fragment declaring `symbol`.
///
/// The caller should not open its output until this succeeds, so that an
/// empty input never leaves a truncated file behind.
///
/// # Errors
///
/// Returns [`EmbedError::EmptyInput`] when `input` has no bytes.
pub fn embed(input: &[u8], symbol: &str, options: &EmbedOptions) -> Result<String, EmbedError> {
    let Some((last, rest)) = input.split_last() else {
        return Err(EmbedError::EmptyInput);
    };
    let qualifier = options.storage.prefix();

    // "0xHH, " is at most six bytes per element.
    let mut out = String::with_capacity(input.len() * 6 + symbol.len() * 2 + 64);
    // write! to a String is infallible; unwrap_or(()) makes that explicit.
    write!(out, "{qualifier}{} {symbol}[] = {{", options.array_type).unwrap_or(());
    for byte in rest {
        write!(out, "{byte:#x}, ").unwrap_or(());
    }
    writeln!(out, "{last:#x}}};").unwrap_or(());

    if options.with_length {
        writeln!(
            out,
            "{qualifier}{} {symbol}{LENGTH_SUFFIX} = {};",
            options.size_type,
            input.len()
        )
        .unwrap_or(());
    }
    Ok(out)
}

/// Return `true` if `name` is a valid C identifier.
#[must_use]
pub fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Check an explicitly supplied symbol name.
///
/// # Errors
///
/// Returns [`UsageError::InvalidSymbol`] if `name` is not a C identifier.
pub fn validate_symbol(name: &str) -> Result<(), UsageError> {
    if is_c_identifier(name) {
        Ok(())
    } else {
        Err(UsageError::InvalidSymbol(name.to_string()))
    }
}

/// Derive a symbol name from a file path: `ui/main.glade` → `main_glade_data`.
///
/// Returns `None` if the path has no file name.
#[must_use]
pub fn derive_symbol(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    let mut symbol: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if symbol.starts_with(|c: char| c.is_ascii_digit()) {
        symbol.insert(0, '_');
    }
    symbol.push_str(DERIVED_SYMBOL_SUFFIX);
    Some(symbol)
}
