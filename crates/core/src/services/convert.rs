use std::path::Path;

use anyhow::{Context, Result};

use crate::tcl_cfg::{parse_tcl_lists, render_cfg, CfgOptions};

/// Convert the Tcl file at `input` to cfg text.
///
/// Invalid UTF-8 is replaced rather than rejected. A file without any list
/// assignment still produces the section header.
pub fn convert_tcl_file(input: &Path, options: &CfgOptions) -> Result<String> {
    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let tcl = String::from_utf8_lossy(&bytes);

    let lists = parse_tcl_lists(&tcl);
    if lists.is_empty() {
        log::warn!("{}: no `set name(KEY) [list ...]` statements found", input.display());
    } else {
        log::info!("{}: converting {} list assignments", input.display(), lists.len());
    }
    Ok(render_cfg(&lists, options))
}
