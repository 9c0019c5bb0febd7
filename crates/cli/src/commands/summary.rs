use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pt_tools_core::config::ToolsConfig;
use pt_tools_core::services::summarize::{summarize_report, SummaryRequest};
use pt_tools_core::summary::render_text;

use crate::commands::write_output;

/// Summarize a timing report into `output` (stdout when `None`).
///
/// Config-file rules come first; command-line rules are appended after them.
pub fn summary_command(
    report: &Path,
    output: Option<&Path>,
    block_map: Vec<String>,
    block_map_files: Vec<PathBuf>,
    range_groups: Vec<String>,
    json: bool,
    config: Option<&Path>,
) -> Result<()> {
    let settings = ToolsConfig::load_optional(config)?.summary;

    let request = SummaryRequest {
        report: report.to_path_buf(),
        block_map: settings.block_map.into_iter().chain(block_map).collect(),
        block_map_files: settings.block_map_files.into_iter().chain(block_map_files).collect(),
        range_groups: settings.range_groups.into_iter().chain(range_groups).collect(),
    };
    let run = summarize_report(&request)
        .with_context(|| format!("Failed to summarize {}", report.display()))?;

    if !run.skipped.is_empty() {
        log::warn!(
            "{} path block(s) skipped; summary covers the remaining {} paths",
            run.skipped.len(),
            run.summary.total_paths
        );
    }

    let text = if json {
        let mut body = serde_json::to_string_pretty(&run.summary)
            .context("Failed to serialize summary to JSON")?;
        body.push('\n');
        body
    } else {
        render_text(&run.summary)
    };
    write_output(output, &text)
}
