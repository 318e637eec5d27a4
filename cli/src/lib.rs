//! Build-time resource embedding and distribution packaging.
//!
//! Two independent build steps share one binary:
//!
//! - **[`embed`]**: turn a byte stream into a C array declaration, optionally
//!   with a `<symbol>_len` companion and `static` storage
//! - **[`archive`]**: collect filtered source trees into a plain, gzip, or
//!   bzip2 tarball under a single root directory
//!
//! [`commands`] wires both to the CLI defined in [`cli`], using defaults from
//! the optional settings file handled by [`config`].
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod archive;
pub mod cli;
pub mod commands;
pub mod config;
pub mod embed;
pub mod error;
pub mod logging;
pub mod stream;
