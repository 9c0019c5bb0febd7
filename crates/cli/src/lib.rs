//! Command implementations for the `pt-tools` binary.
//!
//! `main.rs` only parses arguments; each subcommand lives here so it can be
//! exercised directly from tests.

pub mod commands;

pub use commands::{init_logging, write_output};
