use std::fs;
use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use predicates::prelude::*;
use tempfile::tempdir;

const REPORT: &str = include_str!("../../core/tests/fixtures/wo_io.rpt");
const EXPECTED: &str = include_str!("../../core/tests/fixtures/wo_io.rpt.summary");

const PARTIAL_REPORT: &str = "\
  Startpoint: top/u_a/r1 (rising edge-triggered flip-flop clocked by clk)
  Endpoint: top/u_b/r2 (rising edge-triggered flip-flop clocked by clk)
  Path Group: clk
  slack (VIOLATED)                                                 -0.1000

  Startpoint: other/u_c/r3 (rising edge-triggered flip-flop clocked by clk)
  Path Group: clk
  slack (VIOLATED)                                                 -0.9000
";

/// `summary` with a mapping writes the reference summary to `-o`.
#[test]
fn summary_writes_reference_output_file() {
    let dir = tempdir().expect("tempdir");
    let report = dir.path().join("wo_io.rpt");
    let output = dir.path().join("out.summary");
    fs::write(&report, REPORT).expect("write report");

    assert_cmd::cargo::cargo_bin_cmd!("pt-tools")
        .arg("summary")
        .arg(&report)
        .arg("--block-map")
        .arg("m_misc/m_abuf/=m_abuf")
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout("");

    assert_eq!(fs::read_to_string(&output).expect("read summary"), EXPECTED);
}

/// Without `-o` the summary goes to stdout.
#[test]
fn summary_defaults_to_stdout() {
    let dir = tempdir().expect("tempdir");
    let report = dir.path().join("wo_io.rpt");
    let map = dir.path().join("block_map.txt");
    fs::write(&report, REPORT).expect("write report");
    fs::write(&map, "# hierarchy overrides\nm_misc/m_abuf/ -> m_abuf\n").expect("write map");

    assert_cmd::cargo::cargo_bin_cmd!("pt-tools")
        .arg("summary")
        .arg(&report)
        .arg("--block-map-file")
        .arg(&map)
        .assert()
        .success()
        .stdout(EXPECTED);
}

/// Compressed input is decompressed transparently.
#[test]
fn summary_reads_gzipped_report() {
    let dir = tempdir().expect("tempdir");
    let report = dir.path().join("wo_io.rpt.gz");
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(REPORT.as_bytes()).expect("compress");
    fs::write(&report, encoder.finish().expect("finish")).expect("write gz");

    assert_cmd::cargo::cargo_bin_cmd!("pt-tools")
        .arg("summary")
        .arg(&report)
        .arg("--block-map=m_misc/m_abuf/=m_abuf")
        .assert()
        .success()
        .stdout(EXPECTED);
}

/// Two runs over the same input produce identical bytes.
#[test]
fn summary_is_idempotent() {
    let dir = tempdir().expect("tempdir");
    let report = dir.path().join("wo_io.rpt");
    fs::write(&report, REPORT).expect("write report");

    let run = || {
        assert_cmd::cargo::cargo_bin_cmd!("pt-tools")
            .arg("summary")
            .arg(&report)
            .arg("--range-groups")
            .arg("io=in2reg,reg2out")
            .output()
            .expect("run pt-tools")
            .stdout
    };
    let first = run();
    assert!(!first.is_empty());
    assert_eq!(first, run());
}

/// A block missing its endpoint is skipped with a warning; the run succeeds.
#[test]
fn summary_skips_malformed_block_with_warning() {
    let dir = tempdir().expect("tempdir");
    let report = dir.path().join("partial.rpt");
    fs::write(&report, PARTIAL_REPORT).expect("write report");

    assert_cmd::cargo::cargo_bin_cmd!("pt-tools")
        .arg("summary")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?m)^ top\s+clk\s+-0\.100\s+1$").expect("valid regex"))
        .stdout(predicate::str::contains("other").not())
        .stderr(predicate::str::contains("skipping path block at line 6"));
}

/// `--quiet` silences the skip warning but keeps the exit status.
#[test]
fn summary_quiet_suppresses_warnings() {
    let dir = tempdir().expect("tempdir");
    let report = dir.path().join("partial.rpt");
    fs::write(&report, PARTIAL_REPORT).expect("write report");

    assert_cmd::cargo::cargo_bin_cmd!("pt-tools")
        .env_remove("RUST_LOG")
        .arg("--quiet")
        .arg("summary")
        .arg(&report)
        .assert()
        .success()
        .stderr("");
}

/// A malformed `--block-map` is reported and ignored.
#[test]
fn summary_ignores_bad_block_map_argument() {
    let dir = tempdir().expect("tempdir");
    let report = dir.path().join("wo_io.rpt");
    fs::write(&report, REPORT).expect("write report");

    assert_cmd::cargo::cargo_bin_cmd!("pt-tools")
        .arg("summary")
        .arg(&report)
        .arg("--block-map")
        .arg("no-separator")
        .assert()
        .success()
        .stderr(predicate::str::contains("malformed block mapping"));
}

/// JSON output carries the same totals as the text summary.
#[test]
fn summary_emits_json() {
    let dir = tempdir().expect("tempdir");
    let report = dir.path().join("wo_io.rpt");
    fs::write(&report, REPORT).expect("write report");

    let output = assert_cmd::cargo::cargo_bin_cmd!("pt-tools")
        .arg("summary")
        .arg(&report)
        .arg("--json")
        .output()
        .expect("run pt-tools");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["total_paths"], 5);
    assert_eq!(value["violations"], 4);
    assert_eq!(value["block_groups"][0]["block"], "m_misc");
}

/// A missing report is fatal.
#[test]
fn summary_fails_for_missing_report() {
    let dir = tempdir().expect("tempdir");

    assert_cmd::cargo::cargo_bin_cmd!("pt-tools")
        .arg("summary")
        .arg(dir.path().join("absent.rpt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open report"));
}

/// A missing mapping file is fatal.
#[test]
fn summary_fails_for_missing_mapping_file() {
    let dir = tempdir().expect("tempdir");
    let report = dir.path().join("wo_io.rpt");
    fs::write(&report, REPORT).expect("write report");

    assert_cmd::cargo::cargo_bin_cmd!("pt-tools")
        .arg("summary")
        .arg(&report)
        .arg("--block-map-file")
        .arg(dir.path().join("absent_map.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read block mapping file"));
}

/// The converter reproduces the documented round trip.
#[test]
fn tcl_to_cfg_round_trip() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("liblist.tcl");
    let output = dir.path().join("liblist.cfg");
    fs::write(&input, "set liblist(LEF_STD) [list \\\n    /path/a \\\n    /path/b] ;\n")
        .expect("write tcl");

    assert_cmd::cargo::cargo_bin_cmd!("pt-tools")
        .arg("tcl-to-cfg")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--section", "liblist"])
        .args(["--author", "sunnyy@alchip.com"])
        .args(["--created", "2026-02-12"])
        .args(["--name-width", "13"])
        .args(["--indent-width", "18"])
        .assert()
        .success();

    let expected = "\
[liblist]
# Author: sunnyy@alchip.com
# Created: 2026-02-12

LEF_STD       = /path/a
                  /path/b
";
    assert_eq!(fs::read_to_string(&output).expect("read cfg"), expected);
}

/// Config-file converter settings apply unless overridden on the command line.
#[test]
fn tcl_to_cfg_uses_config_file() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("liblist.tcl");
    let config = dir.path().join("pt_tools.yaml");
    fs::write(&input, "set liblist(DB) [list /db/a.db]\n").expect("write tcl");
    fs::write(&config, "tcl_to_cfg:\n  section: from_config\n  author: cfg@example.com\n")
        .expect("write config");

    assert_cmd::cargo::cargo_bin_cmd!("pt-tools")
        .arg("tcl-to-cfg")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .args(["--author", "cli@example.com"])
        .args(["--created", "2026-02-12"])
        .assert()
        .success()
        .stdout(
            "[from_config]\n# Author: cli@example.com\n# Created: 2026-02-12\n\nDB           = /db/a.db\n",
        );
}

/// Unknown subcommands are rejected by clap.
#[test]
fn unknown_subcommand_fails() {
    assert_cmd::cargo::cargo_bin_cmd!("pt-tools").arg("frobnicate").assert().failure();
}
