use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Write `text` to `output`, or to stdout when no path is given.
pub fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("Failed to write output to {}", path.display())),
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(text.as_bytes()).context("Failed to write to stdout")?;
            handle.flush().context("Failed to flush stdout")
        }
    }
}

/// Pick the default log filter from `-v`/`-q` counts.
pub fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize env_logger on stderr. `RUST_LOG` still takes precedence.
pub fn init_logging(verbose: u8, quiet: bool) {
    let env = env_logger::Env::default().default_filter_or(log_level(verbose, quiet));
    let _ = env_logger::Builder::from_env(env).format_timestamp(None).try_init();
}
