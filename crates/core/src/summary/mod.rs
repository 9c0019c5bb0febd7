//! Aggregation of path records into the `wo_io.rpt.summary` tables.
//!
//! Records are folded into a [`SummaryBuilder`] one at a time and finalized
//! into a [`Summary`]. The block / path-group table and the startpoint
//! listing keep first-seen order; the other keyed tables are sorted by key.
//! Identical input always yields identical output.

pub mod bins;
pub mod render;

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::blocks::BlockMapping;
use crate::report::PathRecord;

pub use render::render_text;

/// Label used for a missing clock name.
pub const NO_CLOCK: &str = "-";

/// A set of path groups reported under one merged label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeGroup {
    pub label: String,
    pub members: Vec<String>,
}

impl RangeGroup {
    /// Parse `a,b,c` or `LABEL=a,b,c`. Without an explicit label the member
    /// list itself (`a,b,c`) becomes the label. Returns `None` when no member
    /// names are given.
    pub fn parse(text: &str) -> Option<Self> {
        let (label, list) = match text.split_once('=') {
            Some((label, list)) => (Some(label.trim()), list),
            None => (None, text),
        };
        let members: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect();
        if members.is_empty() {
            return None;
        }
        let label = match label {
            Some(l) if !l.is_empty() => l.to_string(),
            _ => members.join(","),
        };
        Some(Self { label, members })
    }
}

/// Path-group normalization for the grouped tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RangeGroups {
    groups: Vec<RangeGroup>,
}

impl RangeGroups {
    pub fn new(groups: impl IntoIterator<Item = RangeGroup>) -> Self {
        Self { groups: groups.into_iter().collect() }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Label a raw path group is reported under. The first category that
    /// lists the group wins.
    pub fn label_for<'a>(&'a self, path_group: &'a str) -> &'a str {
        self.groups
            .iter()
            .find(|g| g.members.iter().any(|m| m == path_group))
            .map(|g| g.label.as_str())
            .unwrap_or(path_group)
    }
}

/// A path record annotated with the blocks of its two ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedPath {
    #[serde(flatten)]
    pub record: PathRecord,
    pub start_block: String,
    pub end_block: String,
}

impl AnnotatedPath {
    pub fn resolve(record: PathRecord, mapping: &BlockMapping) -> Self {
        let start_block = mapping.resolve(&record.startpoint).to_string();
        let end_block = mapping.resolve(&record.endpoint).to_string();
        Self { record, start_block, end_block }
    }
}

/// Running statistics for one table row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tally {
    pub paths: usize,
    pub violations: usize,
    /// Minimum slack seen.
    pub worst_slack: f64,
    /// Maximum slack seen.
    pub best_slack: f64,
    /// Sum of negative slacks.
    pub total_negative_slack: f64,
}

impl Default for Tally {
    fn default() -> Self {
        Self {
            paths: 0,
            violations: 0,
            worst_slack: 0.0,
            best_slack: 0.0,
            total_negative_slack: 0.0,
        }
    }
}

impl Tally {
    pub fn add(&mut self, path: &PathRecord) {
        if self.paths == 0 {
            self.worst_slack = path.slack;
            self.best_slack = path.slack;
        } else {
            self.worst_slack = self.worst_slack.min(path.slack);
            self.best_slack = self.best_slack.max(path.slack);
        }
        self.paths += 1;
        if path.is_violation() {
            self.total_negative_slack = if self.violations == 0 {
                path.slack
            } else {
                self.total_negative_slack + path.slack
            };
            self.violations += 1;
        }
    }
}

/// Insertion-ordered tally table.
#[derive(Debug)]
struct Ordered<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K: Clone + Eq + Hash, V: Default> Ordered<K, V> {
    fn new() -> Self {
        Self { index: HashMap::new(), entries: Vec::new() }
    }

    fn entry(&mut self, key: K) -> &mut V {
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, V::default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }

    fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}

/// One row of the block / path-group table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockGroupRow {
    pub block: String,
    pub group: String,
    pub worst_slack: f64,
    pub paths: usize,
    pub violations: usize,
}

/// Histogram bin with its count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinCount {
    pub label: String,
    pub count: usize,
}

/// Violation statistics keyed by one name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedRow {
    pub name: String,
    pub violations: usize,
    pub worst_slack: f64,
    pub total_slack: f64,
}

/// Violation statistics keyed by a (from, to) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairRow {
    pub from: String,
    pub to: String,
    pub violations: usize,
    pub worst_slack: f64,
    pub total_slack: f64,
}

/// All-path statistics for one path group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStatsRow {
    pub name: String,
    pub paths: usize,
    pub worst_slack: f64,
    pub total_negative_slack: f64,
    pub violations: usize,
    pub best_slack: f64,
}

/// Number of paths reported with one `Path Type:` (`max`, `min`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathTypeRow {
    pub path_type: String,
    pub paths: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageRow {
    pub stages: u32,
    pub violations: usize,
}

/// A violating endpoint under its startpoint in the detail listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointEntry {
    pub end_pin: String,
    pub slack: f64,
    pub stage_count: u32,
    pub clock: String,
    pub clock_network_delay: f64,
    pub skew: f64,
}

/// Violating paths that share a startpoint pin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartpointEntry {
    pub start_pin: String,
    pub violations: usize,
    pub worst_slack: f64,
    pub max_stage_count: u32,
    pub clock: String,
    pub clock_network_delay: f64,
    pub endpoints: Vec<EndpointEntry>,
}

/// All summary tables for one report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_paths: usize,
    pub violations: usize,
    /// Worst negative slack; 0 when nothing violates.
    pub wns: f64,
    /// Total negative slack.
    pub tns: f64,
    /// Largest slack over all paths; `None` for an empty report.
    pub best_slack: Option<f64>,
    pub block_groups: Vec<BlockGroupRow>,
    /// Sorted by path group; covers every path.
    pub group_stats: Vec<GroupStatsRow>,
    /// Sorted by path type; paths without a `Path Type:` line are not counted.
    pub path_types: Vec<PathTypeRow>,
    pub slack_histogram: Vec<BinCount>,
    pub skew_histogram: Vec<BinCount>,
    pub path_groups: Vec<NamedRow>,
    pub clock_pairs: Vec<PairRow>,
    pub block_pairs: Vec<PairRow>,
    pub stage_counts: Vec<StageRow>,
    pub startpoints: Vec<StartpointEntry>,
}

/// Folds annotated paths into summary tables.
pub struct SummaryBuilder<'a> {
    range_groups: &'a RangeGroups,
    overall: Tally,
    block_groups: Ordered<(String, String), Tally>,
    group_stats: BTreeMap<String, Tally>,
    path_types: BTreeMap<String, usize>,
    path_groups: BTreeMap<String, Tally>,
    clock_pairs: BTreeMap<(String, String), Tally>,
    block_pairs: BTreeMap<(String, String), Tally>,
    violating: Vec<AnnotatedPath>,
}

impl<'a> SummaryBuilder<'a> {
    pub fn new(range_groups: &'a RangeGroups) -> Self {
        Self {
            range_groups,
            overall: Tally::default(),
            block_groups: Ordered::new(),
            group_stats: BTreeMap::new(),
            path_types: BTreeMap::new(),
            path_groups: BTreeMap::new(),
            clock_pairs: BTreeMap::new(),
            block_pairs: BTreeMap::new(),
            violating: Vec::new(),
        }
    }

    pub fn add(&mut self, path: AnnotatedPath) {
        let record = &path.record;
        let group = self.range_groups.label_for(&record.path_group).to_string();

        self.overall.add(record);
        self.block_groups.entry((path.start_block.clone(), group.clone())).add(record);
        self.group_stats.entry(group.clone()).or_default().add(record);
        if let Some(path_type) = &record.path_type {
            *self.path_types.entry(path_type.clone()).or_default() += 1;
        }

        if !record.is_violation() {
            return;
        }
        self.path_groups.entry(group).or_default().add(record);
        self.clock_pairs.entry(clock_pair(record)).or_default().add(record);
        self.block_pairs
            .entry((path.start_block.clone(), path.end_block.clone()))
            .or_default()
            .add(record);
        self.violating.push(path);
    }

    pub fn finish(self) -> Summary {
        let wns = if self.overall.violations == 0 {
            0.0
        } else {
            self.violating.iter().map(|p| p.record.slack).fold(f64::INFINITY, f64::min)
        };

        let mut block_groups: Vec<BlockGroupRow> = self
            .block_groups
            .into_entries()
            .into_iter()
            .map(|((block, group), t)| BlockGroupRow {
                block,
                group,
                worst_slack: t.worst_slack,
                paths: t.paths,
                violations: t.violations,
            })
            .collect();
        // Rows of one block sit together, blocks in first-seen order.
        let mut block_rank: HashMap<String, usize> = HashMap::new();
        for row in &block_groups {
            let next = block_rank.len();
            block_rank.entry(row.block.clone()).or_insert(next);
        }
        block_groups.sort_by_key(|row| block_rank.get(&row.block).copied().unwrap_or(0));

        let group_stats = self
            .group_stats
            .into_iter()
            .map(|(name, t)| GroupStatsRow {
                name,
                paths: t.paths,
                worst_slack: t.worst_slack,
                total_negative_slack: t.total_negative_slack,
                violations: t.violations,
                best_slack: t.best_slack,
            })
            .collect();

        let path_types = self
            .path_types
            .into_iter()
            .map(|(path_type, paths)| PathTypeRow { path_type, paths })
            .collect();

        let path_groups = self
            .path_groups
            .into_iter()
            .map(|(name, t)| NamedRow {
                name,
                violations: t.violations,
                worst_slack: t.worst_slack,
                total_slack: t.total_negative_slack,
            })
            .collect();

        Summary {
            total_paths: self.overall.paths,
            violations: self.overall.violations,
            wns,
            tns: self.overall.total_negative_slack,
            best_slack: (self.overall.paths > 0).then_some(self.overall.best_slack),
            block_groups,
            group_stats,
            path_types,
            slack_histogram: slack_histogram(&self.violating),
            skew_histogram: skew_histogram(&self.violating),
            path_groups,
            clock_pairs: pair_rows(self.clock_pairs),
            block_pairs: pair_rows(self.block_pairs),
            stage_counts: stage_counts(&self.violating),
            startpoints: startpoint_listing(&self.violating),
        }
    }
}

/// Resolve blocks for every record and build the summary in one go.
pub fn summarize<I>(records: I, mapping: &BlockMapping, range_groups: &RangeGroups) -> Summary
where
    I: IntoIterator<Item = PathRecord>,
{
    let mut builder = SummaryBuilder::new(range_groups);
    for record in records {
        builder.add(AnnotatedPath::resolve(record, mapping));
    }
    builder.finish()
}

fn clock_pair(record: &PathRecord) -> (String, String) {
    (
        record.start_clock.clone().unwrap_or_else(|| NO_CLOCK.to_string()),
        record.end_clock.clone().unwrap_or_else(|| NO_CLOCK.to_string()),
    )
}

fn pair_rows(table: BTreeMap<(String, String), Tally>) -> Vec<PairRow> {
    table
        .into_iter()
        .map(|((from, to), t)| PairRow {
            from,
            to,
            violations: t.violations,
            worst_slack: t.worst_slack,
            total_slack: t.total_negative_slack,
        })
        .collect()
}

fn slack_histogram(violating: &[AnnotatedPath]) -> Vec<BinCount> {
    let bins = bins::slack_bins();
    let mut counts = vec![0usize; bins.len()];
    for path in violating {
        if let Some(idx) = bins::slack_bin_index(&bins, path.record.slack) {
            counts[idx] += 1;
        }
    }
    bins.into_iter().zip(counts).map(|(bin, count)| BinCount { label: bin.label, count }).collect()
}

fn skew_histogram(violating: &[AnnotatedPath]) -> Vec<BinCount> {
    let bins = bins::skew_bins();
    let mut counts = vec![0usize; bins.len()];
    for skew in violating.iter().filter_map(|p| p.record.skew()) {
        if let Some(idx) = bins::skew_bin_index(&bins, skew) {
            counts[idx] += 1;
        }
    }
    bins.into_iter().zip(counts).map(|(bin, count)| BinCount { label: bin.label, count }).collect()
}

fn stage_counts(violating: &[AnnotatedPath]) -> Vec<StageRow> {
    let mut counts: HashMap<u32, usize> = HashMap::new();
    for stages in violating.iter().filter_map(|p| p.record.stage_count) {
        *counts.entry(stages).or_default() += 1;
    }
    let mut rows: Vec<StageRow> =
        counts.into_iter().map(|(stages, violations)| StageRow { stages, violations }).collect();
    rows.sort_by_key(|row| row.stages);
    rows
}

fn startpoint_listing(violating: &[AnnotatedPath]) -> Vec<StartpointEntry> {
    let mut by_start: Ordered<String, Vec<&PathRecord>> = Ordered::new();
    for path in violating {
        by_start.entry(path.record.start_pin.clone()).push(&path.record);
    }

    let mut entries: Vec<StartpointEntry> = by_start
        .into_entries()
        .into_iter()
        .map(|(start_pin, mut records)| {
            let worst_slack = records.iter().map(|r| r.slack).fold(f64::INFINITY, f64::min);
            let max_stage_count =
                records.iter().map(|r| r.stage_count.unwrap_or(0)).max().unwrap_or(0);
            let clock_network_delay =
                records.iter().find_map(|r| r.launch_clock_delay).unwrap_or(0.0);
            let clock = records
                .first()
                .and_then(|r| r.start_clock.clone())
                .unwrap_or_else(|| NO_CLOCK.to_string());

            records.sort_by(|a, b| a.slack.total_cmp(&b.slack));
            let endpoints = records
                .into_iter()
                .map(|r| EndpointEntry {
                    end_pin: r.end_pin.clone(),
                    slack: r.slack,
                    stage_count: r.stage_count.unwrap_or(0),
                    clock: r.end_clock.clone().unwrap_or_else(|| NO_CLOCK.to_string()),
                    clock_network_delay: r.capture_clock_delay.unwrap_or(0.0),
                    skew: r.skew().unwrap_or(0.0),
                })
                .collect::<Vec<_>>();

            StartpointEntry {
                start_pin,
                violations: endpoints.len(),
                worst_slack,
                max_stage_count,
                clock,
                clock_network_delay,
                endpoints,
            }
        })
        .collect();

    // Most violations first, then worst slack; ties keep first-seen order.
    entries.sort_by(|a, b| {
        b.violations.cmp(&a.violations).then(a.worst_slack.total_cmp(&b.worst_slack))
    });
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_group_parse_accepts_optional_label() {
        let plain = RangeGroup::parse("in2reg, reg2out").unwrap();
        assert_eq!(plain.label, "in2reg,reg2out");
        assert_eq!(plain.members, vec!["in2reg", "reg2out"]);

        let labeled = RangeGroup::parse("io=in2reg,reg2out").unwrap();
        assert_eq!(labeled.label, "io");

        assert!(RangeGroup::parse(" , ").is_none());
    }

    #[test]
    fn label_for_falls_back_to_raw_group() {
        let groups = RangeGroups::new(RangeGroup::parse("io=in2reg,reg2out"));
        assert_eq!(groups.label_for("reg2out"), "io");
        assert_eq!(groups.label_for("clk_core"), "clk_core");
    }
}
