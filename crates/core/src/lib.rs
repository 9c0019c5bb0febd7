//! pt-tools-core
//!
//! Core library behind the `pt-tools` command line: a PrimeTime timing-report
//! summarizer and a Tcl-list to cfg converter.
//!
//! The summarizer is a straight pipeline:
//! report text -> [`report`] parser -> [`blocks`] resolution -> [`summary`]
//! aggregation -> text or JSON rendering. [`services`] wires the stages to
//! files so every frontend behaves the same.

pub mod blocks;
pub mod config;
pub mod input;
pub mod report;
pub mod services;
pub mod summary;
pub mod tcl_cfg;

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
