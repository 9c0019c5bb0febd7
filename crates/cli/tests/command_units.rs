use std::path::Path;

use pt_tools::commands::{
    log_level, resolve_cfg_options, summary_command, tcl_to_cfg_command, CfgOverrides,
};
use pt_tools::write_output;
use pt_tools_core::config::ToolsConfig;
use tempfile::tempdir;

#[test]
fn log_level_defaults_to_warn() {
    assert_eq!(log_level(0, false), "warn");
}

#[test]
fn log_level_rises_with_verbosity() {
    assert_eq!(log_level(1, false), "info");
    assert_eq!(log_level(2, false), "debug");
    assert_eq!(log_level(7, false), "trace");
}

#[test]
fn quiet_wins_over_verbose() {
    assert_eq!(log_level(3, true), "error");
}

#[test]
fn write_output_writes_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("out.txt");
    write_output(Some(&path), "hello\n").expect("write");
    assert_eq!(std::fs::read_to_string(&path).expect("read back"), "hello\n");
}

#[test]
fn write_output_reports_unwritable_path() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("missing_dir").join("out.txt");
    let err = write_output(Some(Path::new(&path)), "x").unwrap_err();
    assert!(err.to_string().contains("Failed to write output"), "unexpected error: {err}");
}

#[test]
fn summary_command_writes_text_with_config_rules() {
    let dir = tempdir().expect("tempdir");
    let report = dir.path().join("wo_io.rpt");
    let config = dir.path().join("pt_tools.json");
    let output = dir.path().join("out.summary");
    std::fs::write(&report, include_str!("../../core/tests/fixtures/wo_io.rpt")).expect("report");
    std::fs::write(&config, r#"{"summary": {"block_map": ["m_misc/m_abuf/=m_abuf"]}}"#)
        .expect("config");

    summary_command(
        &report,
        Some(&output),
        Vec::new(),
        Vec::new(),
        Vec::new(),
        false,
        Some(&config),
    )
    .expect("summary");

    let text = std::fs::read_to_string(&output).expect("read back");
    assert_eq!(text, include_str!("../../core/tests/fixtures/wo_io.rpt.summary"));
}

#[test]
fn summary_command_rejects_unknown_config_keys() {
    let dir = tempdir().expect("tempdir");
    let report = dir.path().join("wo_io.rpt");
    let config = dir.path().join("pt_tools.yaml");
    std::fs::write(&report, include_str!("../../core/tests/fixtures/wo_io.rpt")).expect("report");
    std::fs::write(&config, "summary:\n  colour: blue\n").expect("config");

    let result =
        summary_command(&report, None, Vec::new(), Vec::new(), Vec::new(), false, Some(&config));
    assert!(result.is_err());
}

#[test]
fn resolve_cfg_options_prefers_command_line() {
    let mut config = ToolsConfig::default();
    config.tcl_to_cfg.section = Some("from_file".into());
    config.tcl_to_cfg.name_width = Some(20);

    let overrides = CfgOverrides {
        section: Some("from_cli".into()),
        created: Some("2026-02-12".into()),
        ..CfgOverrides::default()
    };
    let options = resolve_cfg_options(overrides, &config);

    assert_eq!(options.section, "from_cli");
    assert_eq!(options.name_width, 20);
    assert_eq!(options.indent_width, 16);
    assert_eq!(options.author, "sunnyy@alchip.com");
    assert_eq!(options.created, "2026-02-12");
}

#[test]
fn tcl_to_cfg_command_reports_missing_input() {
    let dir = tempdir().expect("tempdir");
    let err = tcl_to_cfg_command(
        &dir.path().join("absent.tcl"),
        None,
        CfgOverrides::default(),
        None,
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("Failed to convert"), "unexpected error: {err:#}");
}
