use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Extension of the documentation file that sits next to a compiled unit.
    pub documentation_extension: String,
    /// Tag name of documented-member blocks.
    pub member_element: String,
    /// Surface malformed per-owner sources as errors instead of treating the
    /// owner as undocumented.
    pub strict_owner_sources: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            documentation_extension: "xml".to_string(),
            member_element: "member".to_string(),
            strict_owner_sources: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_dir: PathBuf,
    pub to_stderr: bool,
    /// Used when `RUST_LOG` is not set.
    pub default_filter: String,
}

impl LoggingConfig {
    pub fn default_log_dir() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".memberdoc").join("logs")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: Self::default_log_dir(),
            to_stderr: false,
            default_filter: "info".to_string(),
        }
    }
}
