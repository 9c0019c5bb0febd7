//! Convert Tcl list assignments into an INI-like `.cfg` section.
//!
//! Only the fixed idiom below is understood; everything else in the file is
//! ignored.
//!
//! ```text
//! set liblist(LEF_STD) [list \
//!     /path/a \
//!     /path/b] ;
//! ```
//!
//! becomes
//!
//! ```text
//! [liblist]
//! # Author: sunnyy@alchip.com
//! # Created: 2026-02-12
//!
//! LEF_STD      = /path/a
//!                 /path/b
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub const DEFAULT_SECTION: &str = "liblist";
pub const DEFAULT_AUTHOR: &str = "sunnyy@alchip.com";
pub const DEFAULT_NAME_WIDTH: usize = 12;
pub const DEFAULT_INDENT_WIDTH: usize = 16;

static LIST_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)set\s+\w+\((?P<key>[^)]+)\)\s+\[list(?P<body>.*?)\]\s*;?")
        .expect("valid regex")
});

/// One `set name(KEY) [list ...]` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TclList {
    pub key: String,
    pub items: Vec<String>,
}

/// Rendering options for the cfg output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CfgOptions {
    pub section: String,
    pub author: String,
    /// Date written to the `# Created:` line.
    pub created: String,
    /// Column width the key is left-justified to.
    pub name_width: usize,
    /// Indent of continuation items.
    pub indent_width: usize,
}

impl Default for CfgOptions {
    fn default() -> Self {
        Self {
            section: DEFAULT_SECTION.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            created: today(),
            name_width: DEFAULT_NAME_WIDTH,
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

/// Today's local date as `YYYY-MM-DD`.
pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Find every list assignment in `tcl`, skipping `#` comment lines.
///
/// Statements with an empty list are returned with no items.
pub fn parse_tcl_lists(tcl: &str) -> Vec<TclList> {
    let cleaned: Vec<&str> =
        tcl.lines().filter(|line| !line.trim_start().starts_with('#')).collect();
    let cleaned = cleaned.join("\n");

    LIST_ASSIGNMENT
        .captures_iter(&cleaned)
        .map(|c| TclList { key: c["key"].trim().to_string(), items: list_items(&c["body"]) })
        .collect()
}

/// Split a list body into items, dropping line continuations and a trailing `;`.
fn list_items(body: &str) -> Vec<String> {
    body.lines()
        .map(|raw| {
            let line = raw.trim();
            let line = line.strip_suffix('\\').map(str::trim_end).unwrap_or(line);
            line.strip_suffix(';').map(str::trim_end).unwrap_or(line)
        })
        .flat_map(str::split_whitespace)
        .map(str::to_string)
        .collect()
}

/// Render parsed lists as a cfg section. Lists without items are left out.
pub fn render_cfg(lists: &[TclList], options: &CfgOptions) -> String {
    let mut lines: Vec<String> = vec![
        format!("[{}]", options.section),
        format!("# Author: {}", options.author),
        format!("# Created: {}", options.created),
        String::new(),
    ];

    let pad = " ".repeat(options.indent_width);
    for list in lists {
        let Some((first, rest)) = list.items.split_first() else {
            log::warn!("skipping {}: empty list", list.key);
            continue;
        };
        lines.push(format!("{:<width$} = {}", list.key, first, width = options.name_width));
        lines.extend(rest.iter().map(|item| format!("{pad}{item}")));
        lines.push(String::new());
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Parse and render in one step.
pub fn tcl_to_cfg(tcl: &str, options: &CfgOptions) -> String {
    render_cfg(&parse_tcl_lists(tcl), options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> CfgOptions {
        CfgOptions { created: "2026-02-12".to_string(), ..CfgOptions::default() }
    }

    #[test]
    fn single_line_lists_are_parsed() {
        let lists = parse_tcl_lists("set liblist(DB) [list /a/x.db /a/y.db];\n");
        assert_eq!(
            lists,
            vec![TclList {
                key: "DB".to_string(),
                items: vec!["/a/x.db".to_string(), "/a/y.db".to_string()]
            }]
        );
    }

    #[test]
    fn commented_statements_are_ignored() {
        let tcl = "# set liblist(OLD) [list /old]\nset liblist(NEW) [list /new]\n";
        let lists = parse_tcl_lists(tcl);
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].key, "NEW");
    }

    #[test]
    fn empty_lists_are_left_out_of_the_output() {
        let text = tcl_to_cfg("set liblist(EMPTY) [list ]\n", &options());
        assert_eq!(text, "[liblist]\n# Author: sunnyy@alchip.com\n# Created: 2026-02-12\n");
    }

    #[test]
    fn default_widths_pad_key_to_twelve_columns() {
        let text = tcl_to_cfg("set liblist(LIB) [list /a /b]\n", &options());
        assert!(text.ends_with("\nLIB          = /a\n                /b\n"), "got {text:?}");
    }

    #[test]
    fn statements_are_separated_by_one_blank_line() {
        let tcl = "set l(A) [list /a]\nset l(B) [list /b]\n";
        let text = tcl_to_cfg(tcl, &options());
        assert!(text.contains("/a\n\nB "), "got {text:?}");
    }

    #[test]
    fn today_is_iso_formatted() {
        let date = today();
        assert_eq!(date.len(), 10);
        assert_eq!(date.as_bytes()[4], b'-');
        assert_eq!(date.as_bytes()[7], b'-');
    }
}
