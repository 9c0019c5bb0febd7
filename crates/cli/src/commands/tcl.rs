use std::path::Path;

use anyhow::{Context, Result};
use pt_tools_core::config::ToolsConfig;
use pt_tools_core::services::convert::convert_tcl_file;
use pt_tools_core::tcl_cfg::CfgOptions;

use crate::commands::write_output;

/// Command-line overrides for the converter. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CfgOverrides {
    pub section: Option<String>,
    pub author: Option<String>,
    pub created: Option<String>,
    pub name_width: Option<usize>,
    pub indent_width: Option<usize>,
}

/// Resolve converter options: command line, then config file, then defaults.
pub fn resolve_cfg_options(overrides: CfgOverrides, config: &ToolsConfig) -> CfgOptions {
    let file = config.tcl_to_cfg.clone();
    let defaults = CfgOptions::default();
    CfgOptions {
        section: overrides.section.or(file.section).unwrap_or(defaults.section),
        author: overrides.author.or(file.author).unwrap_or(defaults.author),
        created: overrides.created.unwrap_or(defaults.created),
        name_width: overrides.name_width.or(file.name_width).unwrap_or(defaults.name_width),
        indent_width: overrides
            .indent_width
            .or(file.indent_width)
            .unwrap_or(defaults.indent_width),
    }
}

/// Convert a Tcl list file to cfg text in `output` (stdout when `None`).
pub fn tcl_to_cfg_command(
    input: &Path,
    output: Option<&Path>,
    overrides: CfgOverrides,
    config: Option<&Path>,
) -> Result<()> {
    let config = ToolsConfig::load_optional(config)?;
    let options = resolve_cfg_options(overrides, &config);
    let text = convert_tcl_file(input, &options)
        .with_context(|| format!("Failed to convert {}", input.display()))?;
    write_output(output, &text)
}
