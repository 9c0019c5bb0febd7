use std::path::PathBuf;

use anyhow::Result;

use crate::blocks::{load_block_map_file, BlockMapping, BlockRule, MappingError};
use crate::input::{open_report, LossyLines, ReportError};
use crate::report::{parse_report, SkippedBlock};
use crate::summary::{summarize, RangeGroup, RangeGroups, Summary};

/// Everything needed to summarize one report.
#[derive(Debug, Clone, Default)]
pub struct SummaryRequest {
    pub report: PathBuf,
    /// Inline `prefix=name` rules.
    pub block_map: Vec<String>,
    pub block_map_files: Vec<PathBuf>,
    /// `[LABEL=]a,b,c` path-group categories.
    pub range_groups: Vec<String>,
}

/// Result of one summarizer run.
#[derive(Debug)]
pub struct SummaryRun {
    pub summary: Summary,
    /// Path blocks left out of the summary.
    pub skipped: Vec<SkippedBlock>,
    /// Mapping rules and range-group values that were ignored.
    pub ignored_rules: Vec<String>,
}

/// Build the block mapping from inline entries and mapping files.
///
/// Malformed rules are logged and returned as messages; an unreadable file
/// is an error.
pub fn build_block_mapping(
    entries: &[String],
    files: &[PathBuf],
) -> Result<(BlockMapping, Vec<String>), MappingError> {
    let mut rules = Vec::new();
    let mut ignored = Vec::new();
    let mut note = |err: MappingError| {
        log::warn!("ignoring rule: {err}");
        ignored.push(err.to_string());
    };

    for entry in entries {
        match BlockRule::parse_assignment(entry) {
            Ok(rule) => rules.push(rule),
            Err(err) => note(err),
        }
    }
    for file in files {
        let (file_rules, errors) = load_block_map_file(file)?;
        log::debug!("loaded {} block rules from {}", file_rules.len(), file.display());
        rules.extend(file_rules);
        errors.into_iter().for_each(&mut note);
    }

    Ok((BlockMapping::new(rules), ignored))
}

/// Parse `--range-groups` values, logging and returning the ones that are empty.
pub fn build_range_groups(values: &[String]) -> (RangeGroups, Vec<String>) {
    let mut groups = Vec::new();
    let mut ignored = Vec::new();
    for raw in values {
        match RangeGroup::parse(raw) {
            Some(group) => groups.push(group),
            None => {
                let message = format!("range group {raw:?} names no path groups");
                log::warn!("ignoring {message}");
                ignored.push(message);
            }
        }
    }
    (RangeGroups::new(groups), ignored)
}

/// Summarize report lines that are already in memory.
pub fn summarize_lines<L>(
    lines: L,
    mapping: &BlockMapping,
    range_groups: &RangeGroups,
) -> (Summary, Vec<SkippedBlock>)
where
    L: IntoIterator,
    L::Item: AsRef<str>,
{
    let mut skipped = Vec::new();
    let records = parse_report(lines).filter_map(|item| match item {
        Ok(record) => Some(record),
        Err(skip) => {
            log::warn!("{skip}");
            skipped.push(skip);
            None
        }
    });
    let summary = summarize(records, mapping, range_groups);
    (summary, skipped)
}

/// Read, parse and summarize the report named in `request`.
pub fn summarize_report(request: &SummaryRequest) -> Result<SummaryRun> {
    let (mapping, mut ignored_rules) =
        build_block_mapping(&request.block_map, &request.block_map_files)?;
    let (range_groups, ignored_groups) = build_range_groups(&request.range_groups);
    ignored_rules.extend(ignored_groups);
    log::info!("using {} block mapping rules", mapping.len());

    let reader = open_report(&request.report)?;
    let mut read_error = None;
    let (summary, skipped) = {
        let lines = LossyLines::new(reader).map_while(|line| match line {
            Ok(line) => Some(line),
            Err(err) => {
                read_error = Some(err);
                None
            }
        });
        summarize_lines(lines, &mapping, &range_groups)
    };
    if let Some(source) = read_error {
        return Err(ReportError::Read { path: request.report.clone(), source }.into());
    }

    log::info!(
        "{}: {} paths summarized, {} violating, {} blocks skipped",
        request.report.display(),
        summary.total_paths,
        summary.violations,
        skipped.len()
    );
    Ok(SummaryRun { summary, skipped, ignored_rules })
}
