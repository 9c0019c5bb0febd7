//! Optional tool configuration file.
//!
//! YAML (`.yaml`/`.yml`) or JSON (`.json`). Both sections are optional:
//!
//! ```yaml
//! summary:
//!   block_map:
//!     - m_misc/m_abuf/=m_abuf
//!   block_map_files:
//!     - block_map.txt
//!   range_groups:
//!     - io=in2reg,reg2out
//! tcl_to_cfg:
//!   section: liblist
//!   author: someone@example.com
//!   name_width: 14
//!   indent_width: 18
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to parse JSON config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported config format for {0}; expected .yaml, .yml or .json")]
    UnsupportedFormat(PathBuf),
}

/// Settings for the report summarizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SummarySettings {
    /// Inline `prefix=name` rules.
    pub block_map: Vec<String>,
    /// Mapping files; relative paths resolve against the config file's directory.
    pub block_map_files: Vec<PathBuf>,
    /// `[LABEL=]a,b,c` path-group categories.
    pub range_groups: Vec<String>,
}

/// Settings for the Tcl-to-cfg converter. Unset fields fall back to the
/// built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CfgSettings {
    pub section: Option<String>,
    pub author: Option<String>,
    pub name_width: Option<usize>,
    pub indent_width: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub summary: SummarySettings,
    pub tcl_to_cfg: CfgSettings,
}

impl ToolsConfig {
    /// Load a config file, choosing the parser by extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_string();
        if !matches!(ext.as_str(), "yaml" | "yml" | "json") {
            return Err(ConfigError::UnsupportedFormat(path.to_path_buf()));
        }

        let body = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let mut config: ToolsConfig = if ext == "json" {
            serde_json::from_str(&body)
                .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })?
        } else {
            serde_yaml::from_str(&body)
                .map_err(|source| ConfigError::Yaml { path: path.to_path_buf(), source })?
        };

        if let Some(base) = path.parent() {
            config.summary.block_map_files = config
                .summary
                .block_map_files
                .into_iter()
                .map(|p| if p.is_absolute() { p } else { base.join(p) })
                .collect();
        }
        Ok(config)
    }

    /// Load when a path is given, otherwise return the empty config.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}
