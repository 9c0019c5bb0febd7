use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use pt_tools::commands::{summary_command, tcl_to_cfg_command, CfgOverrides};
use pt_tools::init_logging;

/// Text utilities for PrimeTime timing reports and Tcl library lists.
///
/// This CLI is a thin wrapper around `pt-tools-core`; all parsing and
/// rendering lives in the library.
#[derive(Parser, Debug)]
#[command(
    name = "pt-tools",
    version,
    about = "PrimeTime report summarizer and Tcl-to-cfg converter",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors. Wins over --verbose.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a PrimeTime `report_timing` report (plain or .gz).
    ///
    /// Produces violation histograms, per path group / clock / block tables and
    /// a per-startpoint listing. Malformed path blocks are skipped with a warning.
    Summary {
        /// Timing report to read.
        report: PathBuf,

        /// Output file. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Block mapping file with `prefix -> name` lines (repeatable).
        #[arg(long = "block-map-file", value_name = "PATH")]
        block_map_files: Vec<PathBuf>,

        /// Inline block mapping `prefix=name` (repeatable). Longest prefix wins.
        #[arg(long = "block-map", value_name = "PREFIX=NAME")]
        block_map: Vec<String>,

        /// Path groups to report under one label: `a,b,c` or `LABEL=a,b,c` (repeatable).
        #[arg(long = "range-groups", value_name = "[LABEL=]GROUPS")]
        range_groups: Vec<String>,

        /// Emit JSON instead of the fixed-width text summary.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Optional YAML/JSON config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Convert `set name(KEY) [list ...]` statements into a .cfg section.
    TclToCfg {
        /// Tcl file to read.
        input: PathBuf,

        /// Output file. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Section header name [default: liblist].
        #[arg(long)]
        section: Option<String>,

        /// Author written to the header comment.
        #[arg(long)]
        author: Option<String>,

        /// Created date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        created: Option<String>,

        /// Width of the variable-name column [default: 12].
        #[arg(long)]
        name_width: Option<usize>,

        /// Indent of continuation lines [default: 16].
        #[arg(long)]
        indent_width: Option<usize>,

        /// Optional YAML/JSON config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Summary {
            report,
            output,
            block_map_files,
            block_map,
            range_groups,
            json,
            config,
        } => summary_command(
            &report,
            output.as_deref(),
            block_map,
            block_map_files,
            range_groups,
            json,
            config.as_deref(),
        )?,
        Command::TclToCfg {
            input,
            output,
            section,
            author,
            created,
            name_width,
            indent_width,
            config,
        } => {
            let overrides = CfgOverrides { section, author, created, name_width, indent_width };
            tcl_to_cfg_command(&input, output.as_deref(), overrides, config.as_deref())?
        }
    }

    Ok(())
}
