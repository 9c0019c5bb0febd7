//! Fixed-width text rendering of a [`Summary`].

use super::Summary;

const RULE_30_20: &str = " ------------------------------  --------------------";
const RULE_GROUP: &str = " ------------------------------  --------------------  --------------------  --------------------";
const RULE_CLOCK: &str = " --------------------  --------------------  --------------------  --------------------  --------------------";
const RULE_BLOCK: &str = " ------------------------------  ------------------------------  --------------------  --------------------  --------------------";
const RULE_BLOCK_GROUP: &str = " ------------------------------  ------------------------------  --------------------  --------------------";
const RULE_GROUP_STATS: &str = " ------------------------------  ----------  ------------  ------------  ------------  ------------";

/// Render the summary in the `wo_io.rpt.summary` layout. The result always
/// ends with a newline.
pub fn render_text(s: &Summary) -> String {
    let total = s.violations;
    let mut out = String::new();

    out.push('\n');
    out.push_str(" violation range                      # of violations\n");
    out.push_str(&format!("{RULE_30_20}\n"));
    for bin in &s.slack_histogram {
        out.push_str(&format!("{:<30}  {:>21}\n", bin.label, bin.count));
    }
    out.push_str(&format!("{RULE_30_20}\n"));
    out.push_str(&format!(" total{total:>47}\n"));
    out.push_str(&format!("{RULE_30_20}\n"));
    out.push_str(&format!(" WNS:{:>48.3}\n", s.wns));
    out.push_str(&format!(" TNS:{:>48.3}\n\n", s.tns));

    out.push_str(" original skew range                  # of violations\n");
    out.push_str(&format!("{RULE_30_20}\n"));
    for bin in &s.skew_histogram {
        out.push_str(&format!("{:<30}  {:>21}\n", bin.label, bin.count));
    }
    out.push_str(&format!("{RULE_30_20}\n"));
    out.push_str(&format!(" total{total:>47}\n\n"));

    out.push_str(
        " path group                           # of violations           worst slack           total slack\n",
    );
    out.push_str(&format!("{RULE_GROUP}\n"));
    for row in &s.path_groups {
        out.push_str(&format!(
            " {:<30}  {:>20}  {:>20.3}  {:>20.3}\n",
            row.name, row.violations, row.worst_slack, row.total_slack
        ));
    }
    out.push_str(&format!("{RULE_GROUP}\n"));
    out.push_str(&format!(" *{:<30}  {:>20}  {:>20.3}  {:>20.3}\n\n", "", total, s.wns, s.tns));

    out.push_str(
        " startpoint clock      endpoint clock             # of violations           worst slack           total slack\n",
    );
    out.push_str(&format!("{RULE_CLOCK}\n"));
    for row in &s.clock_pairs {
        out.push_str(&format!(
            " {:<20}{:<20}{:>20}{:>20.3}{:>20.3}\n",
            row.from, row.to, row.violations, row.worst_slack, row.total_slack
        ));
    }
    out.push_str(&format!("{RULE_CLOCK}\n"));
    out.push_str(&format!(
        " {:<21}{:<20}{:>20}{:>20.3}{:>20.3}\n\n",
        "*", "*", total, s.wns, s.tns
    ));

    out.push_str(
        " startpoint block                endpoint block                       # of violations           worst slack           total slack\n",
    );
    out.push_str(&format!("{RULE_BLOCK}\n"));
    for row in &s.block_pairs {
        out.push_str(&format!(
            " {:<30}{:<30}{:>20}{:>20.3}{:>20.3}\n",
            row.from, row.to, row.violations, row.worst_slack, row.total_slack
        ));
    }
    out.push_str(&format!("{RULE_BLOCK}\n"));
    out.push_str(&format!(
        " {:<31}{:<31}{:>20}{:>20.3}{:>20.3}\n\n",
        "*", "*", total, s.wns, s.tns
    ));

    // Block / path-group table covers every parsed path, not only violations.
    out.push_str(&format!(
        " {:<30}  {:<30}  {:>20}  {:>20}\n",
        "block", "path group", "worst slack", "# of paths"
    ));
    out.push_str(&format!("{RULE_BLOCK_GROUP}\n"));
    for row in &s.block_groups {
        out.push_str(&format!(
            " {:<30}  {:<30}  {:>20.3}  {:>20}\n",
            row.block, row.group, row.worst_slack, row.paths
        ));
    }
    out.push_str(&format!("{RULE_BLOCK_GROUP}\n"));
    out.push_str(&format!(" {:<30}  {:<30}  {:>20}  {:>20}\n\n", "*", "*", "", s.total_paths));

    out.push_str(&format!(
        " {:<30}  {:>10}  {:>12}  {:>12}  {:>12}  {:>12}\n",
        "path group", "# of paths", "worst slack", "total slack", "violations", "best slack"
    ));
    out.push_str(&format!("{RULE_GROUP_STATS}\n"));
    for row in &s.group_stats {
        out.push_str(&format!(
            " {:<30}  {:>10}  {:>12.3}  {:>12.3}  {:>12}  {:>12.3}\n",
            row.name,
            row.paths,
            row.worst_slack,
            row.total_negative_slack,
            row.violations,
            row.best_slack
        ));
    }
    out.push_str(&format!("{RULE_GROUP_STATS}\n\n"));

    out.push_str(&format!(" {:<30}  {:>20}\n", "path type", "# of paths"));
    out.push_str(&format!("{RULE_30_20}\n"));
    for row in &s.path_types {
        out.push_str(&format!(" {:<30}  {:>20}\n", row.path_type, row.paths));
    }
    out.push_str(&format!("{RULE_30_20}\n"));
    let best = s.best_slack.map_or_else(|| "n/a".to_string(), |b| format!("{b:.3}"));
    out.push_str(&format!(" {:<30}  {:>20}\n\n", "best slack", best));

    out.push_str(" stage count                          # of violations\n");
    out.push_str(&format!("{RULE_30_20}\n"));
    for row in &s.stage_counts {
        out.push_str(&format!("{:>31}{:>22}\n", row.stages, row.violations));
    }
    out.push_str(&format!("{RULE_30_20}\n"));
    out.push_str(&format!(" total{total:>47}\n\n"));

    out.push_str(
        "<# of violations>\t<startpoint> <slack> (<stage_count>) (<clock>:<clock_network_delay>)\n",
    );
    out.push_str(
        "\t\t\t<endpoint>   <slack> (<stage_count>) (<clock>:<clock_network_delay>) (<skew>)\n\n",
    );

    for entry in &s.startpoints {
        out.push_str(&format!(
            "{}\t{} {:.3} ({}) ({}:{:.3})\n",
            entry.violations,
            entry.start_pin,
            entry.worst_slack,
            entry.max_stage_count,
            entry.clock,
            entry.clock_network_delay
        ));
        for ep in &entry.endpoints {
            out.push_str(&format!(
                "\t{} {:.3} ({}) ({}:{:.3}) ({:.3})\n",
                ep.end_pin, ep.slack, ep.stage_count, ep.clock, ep.clock_network_delay, ep.skew
            ));
        }
    }

    out
}
