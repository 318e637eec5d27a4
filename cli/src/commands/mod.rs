//! Subcommand orchestration at the CLI boundary.
//!
//! Each command merges its command-line options over the settings file,
//! runs the core step, and converts typed errors into [`anyhow::Error`].
pub mod disttar;
pub mod embed;
pub mod version;
