//! Timing-path records extracted from PrimeTime `report_timing` output.
//!
//! The parser lives in [`parser`]; this module holds the record types it
//! produces and the recoverable error for blocks it has to drop.

pub mod parser;

use serde::Serialize;
use thiserror::Error;

pub use parser::{parse_report, PathParser};

/// Path group used when a block carries no `Path Group:` line.
pub const UNKNOWN_PATH_GROUP: &str = "*";

/// One timing path, as read from a single `Startpoint:` .. `slack` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathRecord {
    /// Hierarchical startpoint instance (e.g. `m_misc/m_abuf/inst/reg_q`).
    pub startpoint: String,
    /// Hierarchical endpoint instance.
    pub endpoint: String,
    pub path_group: String,
    /// `max` (setup) or `min` (hold) from the `Path Type:` line.
    pub path_type: Option<String>,
    /// Signed slack. A printed `-0.000` is kept as negative zero.
    pub slack: f64,
    pub data_arrival: Option<f64>,

    /// Launch clock from `(... clocked by CLK)` on the startpoint line.
    pub start_clock: Option<String>,
    /// Capture clock from the endpoint line.
    pub end_clock: Option<String>,
    /// First propagated clock network delay in the launch section.
    pub launch_clock_delay: Option<f64>,
    /// First propagated clock network delay after `data arrival time`.
    pub capture_clock_delay: Option<f64>,
    /// Number of sensitized output-pin stages; `None` when none were marked.
    pub stage_count: Option<u32>,
    /// Startpoint clock pin (`<startpoint>/CP`).
    pub start_pin: String,
    /// Endpoint data pin, taken from the point table when present.
    pub end_pin: String,
}

impl PathRecord {
    /// True for negative slack, including a printed `-0.000`.
    pub fn is_violation(&self) -> bool {
        self.slack < 0.0 || (self.slack == 0.0 && self.slack.is_sign_negative())
    }

    /// Capture minus launch clock network delay, when both are known.
    pub fn skew(&self) -> Option<f64> {
        match (self.launch_clock_delay, self.capture_clock_delay) {
            (Some(launch), Some(capture)) => Some(capture - launch),
            _ => None,
        }
    }
}

/// Why a path block was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingEndpoint,
    /// Another `Startpoint:` or end of input arrived before the slack line.
    MissingSlack,
    /// The slack line carried no numeric value.
    UnparsableSlack,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            SkipReason::MissingEndpoint => "no Endpoint: line",
            SkipReason::MissingSlack => "no slack line",
            SkipReason::UnparsableSlack => "slack line has no value",
        };
        f.write_str(text)
    }
}

/// A malformed path block that was excluded from the results.
///
/// Skipping is recoverable: parsing carries on with the next block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("skipping path block at line {line} (startpoint {startpoint}): {reason}")]
pub struct SkippedBlock {
    /// 1-based line of the block's `Startpoint:` line.
    pub line: usize,
    pub startpoint: String,
    pub reason: SkipReason,
}
