//! Fixed histogram bins used by the violation summary.

/// Magnitudes (ns) of the violation-range edges, from 0 toward -5.
const SLACK_EDGES: [f64; 32] = [
    0.000, 0.002, 0.004, 0.006, 0.008, 0.010, 0.015, 0.020, 0.030, 0.040, 0.050, 0.060, 0.070,
    0.080, 0.090, 0.100, 0.110, 0.120, 0.130, 0.140, 0.150, 0.160, 0.170, 0.180, 0.190, 0.200,
    0.300, 0.400, 0.500, 1.000, 2.000, 5.000,
];

/// One histogram bin. `None` bounds are open-ended.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub lo: Option<f64>,
    pub hi: Option<f64>,
    pub label: String,
}

/// Violation-range bins. A bin counts `lo < slack <= hi`; the last one counts
/// everything at or below -5.000 ns.
pub fn slack_bins() -> Vec<Bin> {
    let mut bins: Vec<Bin> = SLACK_EDGES
        .windows(2)
        .map(|w| Bin {
            lo: Some(-w[1]),
            hi: Some(-w[0]),
            label: format!(" -{:.3}ns < -{:.3}ns", w[0], w[1]),
        })
        .collect();
    let last = SLACK_EDGES[SLACK_EDGES.len() - 1];
    bins.push(Bin { lo: None, hi: Some(-last), label: format!(" -{last:.3}ns <") });
    bins
}

/// Original-skew bins. A bin counts `lo <= skew < hi`.
pub fn skew_bins() -> Vec<Bin> {
    let table: [(Option<f64>, Option<f64>, &str); 14] = [
        (None, Some(-5.0), "        < -5.0ns"),
        (Some(-5.0), Some(-2.0), " -5.0ns < -2.0ns"),
        (Some(-2.0), Some(-1.0), " -2.0ns < -1.0ns"),
        (Some(-1.0), Some(-0.5), " -1.0ns < -0.5ns"),
        (Some(-0.5), Some(-0.2), " -0.5ns < -0.2ns"),
        (Some(-0.2), Some(-0.1), " -0.2ns < -0.1ns"),
        (Some(-0.1), Some(0.0), " -0.1ns <  0.0ns"),
        (Some(0.0), Some(0.1), "  0.0ns < +0.1ns"),
        (Some(0.1), Some(0.2), " +0.1ns < +0.2ns"),
        (Some(0.2), Some(0.5), " +0.2ns < +0.5ns"),
        (Some(0.5), Some(1.0), " +0.5ns < +1.0ns"),
        (Some(1.0), Some(2.0), " +1.0ns < +2.0ns"),
        (Some(2.0), Some(5.0), " +2.0ns < +5.0ns"),
        (Some(5.0), None, " +5.0ns <"),
    ];
    table.into_iter().map(|(lo, hi, label)| Bin { lo, hi, label: label.to_string() }).collect()
}

/// Index of the slack bin holding `slack`, using `(lo, hi]` bounds.
pub fn slack_bin_index(bins: &[Bin], slack: f64) -> Option<usize> {
    bins.iter().position(|bin| match (bin.lo, bin.hi) {
        (Some(lo), Some(hi)) => slack > lo && slack <= hi,
        (None, Some(hi)) => slack <= hi,
        (Some(lo), None) => slack > lo,
        (None, None) => true,
    })
}

/// Index of the skew bin holding `skew`, using `[lo, hi)` bounds.
pub fn skew_bin_index(bins: &[Bin], skew: f64) -> Option<usize> {
    bins.iter().position(|bin| match (bin.lo, bin.hi) {
        (Some(lo), Some(hi)) => skew >= lo && skew < hi,
        (None, Some(hi)) => skew < hi,
        (Some(lo), None) => skew >= lo,
        (None, None) => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slack_bin_labels_match_report_convention() {
        let bins = slack_bins();
        assert_eq!(bins.len(), 32);
        assert_eq!(bins[0].label, " -0.000ns < -0.002ns");
        assert_eq!(bins[1].label, " -0.002ns < -0.004ns");
        assert_eq!(bins[31].label, " -5.000ns <");
    }

    #[test]
    fn slack_bins_are_closed_at_the_upper_edge() {
        let bins = slack_bins();
        assert_eq!(slack_bin_index(&bins, -0.0), Some(0));
        assert_eq!(slack_bin_index(&bins, -0.001), Some(0));
        assert_eq!(slack_bin_index(&bins, -0.002), Some(1));
        assert_eq!(slack_bin_index(&bins, -0.003), Some(1));
        assert_eq!(slack_bin_index(&bins, -5.0), Some(31));
        assert_eq!(slack_bin_index(&bins, -12.5), Some(31));
    }

    #[test]
    fn skew_bins_are_closed_at_the_lower_edge() {
        let bins = skew_bins();
        assert_eq!(skew_bin_index(&bins, -7.0), Some(0));
        assert_eq!(skew_bin_index(&bins, 0.0), Some(7));
        assert_eq!(skew_bin_index(&bins, -0.05), Some(6));
        assert_eq!(skew_bin_index(&bins, 5.0), Some(13));
    }
}
