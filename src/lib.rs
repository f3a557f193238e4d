//! Core library for `blockchainincubator`.
//!
//! The binary is a thin launcher: it parses flags (`cli`), merges an optional
//! XML config (`config`), and hands the result to [`launcher::launch`], which
//! calls the application's `run(input, output)` exactly once.
//!
//! The application itself ([`incubator::App`]) streams the input to the output
//! durably. It sits behind the [`launcher::Runner`] trait so the launcher can be
//! exercised with any other implementation.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod incubator;
pub mod launcher;
pub mod output;
pub mod platform;
pub mod shutdown;

pub use config::{Config, LogLevel, default_config_path, path_has_symlink_ancestor};
pub use errors::IncubatorError;
pub use incubator::{App, Sink, Source, TransferSummary};
pub use launcher::{EXIT_FAILURE, EXIT_INTERRUPTED, EXIT_SUCCESS, Runner, launch};
