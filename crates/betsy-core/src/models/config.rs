//! Configuration structures for Betsy tooling.

use chrono::Offset;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::customer::OrderType;
use crate::error::{BetsyError, Result};

/// Main configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BetsyConfig {
    /// Spreadsheet endpoint configuration.
    pub remote: RemoteSettings,

    /// Customer text parser configuration.
    pub parser: ParserConfig,

    /// Sales form defaults.
    pub sales: SalesConfig,

    /// Statistics configuration.
    pub stats: StatsConfig,
}

/// Spreadsheet script endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    /// Deployment URL of the spreadsheet script. Empty means not configured.
    pub script_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Interval between list refreshes in seconds.
    pub poll_interval_secs: u64,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            script_url: String::new(),
            timeout_secs: 30,
            poll_interval_secs: 30,
        }
    }
}

/// Customer text parser settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Lines longer than this are treated as an address by the positional fallback.
    pub address_min_length: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            address_min_length: 50,
        }
    }
}

/// Sales form defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesConfig {
    /// Apply IVA unless told otherwise.
    pub apply_iva_by_default: bool,

    /// Order type for new sales.
    pub default_order_type: OrderType,
}

/// Statistics settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// UTC offset used to decide which calendar day a sale belongs to.
    pub utc_offset_hours: i32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: -6,
        }
    }
}

impl StatsConfig {
    /// The configured offset, clamped to a valid range.
    pub fn offset(&self) -> chrono::FixedOffset {
        let hours = self.utc_offset_hours.clamp(-23, 23);
        chrono::FixedOffset::east_opt(hours * 3600).unwrap_or_else(|| chrono::Utc.fix())
    }
}

impl BetsyConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The script URL, or an error when it has not been configured.
    pub fn script_url(&self) -> Result<&str> {
        let url = self.remote.script_url.trim();
        if url.is_empty() {
            return Err(BetsyError::Config("script URL not configured".to_string()));
        }
        Ok(url)
    }
}
