//! Configuration structures for the receipt pipeline.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::error::{Result, SlipscanError};

/// Main configuration for slipscan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlipscanConfig {
    /// Receipt parsing configuration.
    pub parsing: ParsingConfig,

    /// Category classifier configuration.
    pub classifier: ClassifierConfig,

    /// Text source configuration.
    pub source: SourceConfig,
}

/// Receipt parsing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Descriptions shorter than this (in characters) are dropped.
    pub min_description_chars: usize,

    /// Trimmed lines shorter than this are skipped before tokenizing.
    pub min_line_chars: usize,

    /// Date used when the document contains none. Defaults to today.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_date: Option<NaiveDate>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            min_description_chars: 4,
            min_line_chars: 3,
            fallback_date: None,
        }
    }
}

/// Category classifier configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Keywords added on top of the built-in table.
    pub extra_keywords: BTreeMap<Category, Vec<String>>,
}

/// Text source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// A PDF counts as text-based only with more embedded characters than this.
    pub min_pdf_text_chars: usize,

    /// Largest input file accepted, in bytes.
    pub max_file_bytes: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            min_pdf_text_chars: 50,
            max_file_bytes: 10 * 1024 * 1024,
        }
    }
}

impl SlipscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| SlipscanError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| SlipscanError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default location of the configuration file under `config_dir`.
    pub fn default_path(config_dir: &Path) -> PathBuf {
        config_dir.join("slipscan").join("config.json")
    }
}
