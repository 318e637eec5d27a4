//! Command: print version information.

/// Version reported by the binary.
///
/// `RESBUNDLE_VERSION` is set by `build.rs` from the environment or
/// `git describe`; the crate version is the fallback.
#[must_use]
pub fn version() -> &'static str {
    option_env!("RESBUNDLE_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the resbundle version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("resbundle {}", version());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
