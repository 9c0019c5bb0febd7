//! Block resolution: map hierarchical instance names to logical design blocks.
//!
//! Without rules a name resolves to its first hierarchy component
//! (`m_misc/m_abuf/inst/reg_q` -> `m_misc`). Rules override that with a
//! longest-prefix match against the full instance path:
//!
//! ```text
//! m_misc/m_max_buf/ -> m_max_buf
//! m_misc/m_abuf/    -> m_abuf
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems with individual mapping rules or mapping files.
#[derive(Debug, Error)]
pub enum MappingError {
    /// A rule that could not be understood. Reported and ignored.
    #[error("{source_name}:{line}: malformed block mapping {text:?}: {message}")]
    Malformed { source_name: String, line: usize, text: String, message: &'static str },

    /// A mapping file that could not be read at all.
    #[error("Failed to read block mapping file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One `prefix -> block` rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRule {
    /// Hierarchy prefix, always ending in `/`.
    pub prefix: String,
    pub block: String,
}

impl BlockRule {
    /// Build a rule, normalizing the prefix to a hierarchy boundary.
    pub fn new(prefix: &str, block: &str) -> Self {
        let prefix = prefix.trim();
        let prefix =
            if prefix.ends_with('/') { prefix.to_string() } else { format!("{prefix}/") };
        Self { prefix, block: block.trim().to_string() }
    }

    /// Parse a command-line style `prefix=name` entry.
    pub fn parse_assignment(entry: &str) -> Result<Self, MappingError> {
        let malformed = |message| MappingError::Malformed {
            source_name: "--block-map".to_string(),
            line: 1,
            text: entry.to_string(),
            message,
        };
        let (prefix, block) =
            entry.split_once('=').ok_or_else(|| malformed("expected prefix=name"))?;
        Self::checked(prefix, block).map_err(malformed)
    }

    fn checked(prefix: &str, block: &str) -> Result<Self, &'static str> {
        if prefix.trim().is_empty() {
            return Err("empty prefix");
        }
        if block.trim().is_empty() {
            return Err("empty block name");
        }
        Ok(Self::new(prefix, block))
    }
}

/// Parse mapping-file text.
///
/// Accepts `prefix -> name` and the whitespace-separated `prefix name` form.
/// Blank lines and `#` comments are ignored. Malformed lines are returned
/// separately so one bad rule never discards the rest.
pub fn parse_block_map(text: &str, source_name: &str) -> (Vec<BlockRule>, Vec<MappingError>) {
    let mut rules = Vec::new();
    let mut errors = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parsed = match line.split_once("->") {
            Some((prefix, block)) => BlockRule::checked(prefix, block),
            None => {
                let mut parts = line.split_whitespace();
                match (parts.next(), parts.next()) {
                    (Some(prefix), Some(block)) => BlockRule::checked(prefix, block),
                    _ => Err("expected 'prefix -> name'"),
                }
            }
        };
        match parsed {
            Ok(rule) => rules.push(rule),
            Err(message) => errors.push(MappingError::Malformed {
                source_name: source_name.to_string(),
                line: idx + 1,
                text: raw.to_string(),
                message,
            }),
        }
    }

    (rules, errors)
}

/// Read and parse a mapping file. An unreadable file is an error; malformed
/// lines are returned alongside the good rules.
pub fn load_block_map_file(
    path: &Path,
) -> Result<(Vec<BlockRule>, Vec<MappingError>), MappingError> {
    let bytes =
        fs::read(path).map_err(|source| MappingError::Read { path: path.to_path_buf(), source })?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(parse_block_map(&text, &path.display().to_string()))
}

/// Ordered rule set resolved by longest prefix.
///
/// Rules are kept sorted by descending prefix length; the sort is stable so
/// equal-length prefixes keep their declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlockMapping {
    rules: Vec<BlockRule>,
}

impl BlockMapping {
    pub fn new(rules: impl IntoIterator<Item = BlockRule>) -> Self {
        let mut rules: Vec<BlockRule> = rules.into_iter().collect();
        rules.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn rules(&self) -> &[BlockRule] {
        &self.rules
    }

    /// Resolve a hierarchical name to its block.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.rules
            .iter()
            .find(|rule| name.starts_with(rule.prefix.as_str()))
            .map(|rule| rule.block.as_str())
            .unwrap_or_else(|| default_block(name))
    }
}

/// First hierarchy component, or the whole name when it has none.
pub fn default_block(name: &str) -> &str {
    name.split_once('/').map(|(top, _)| top).unwrap_or(name)
}
