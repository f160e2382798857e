use crate::error::TableError;
use crate::strategy::StrategyKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Tuning knobs for one extraction run. Every field has a default, so a
/// config file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Strategies tried in order; the first that finds a table wins.
    pub standard: Vec<StrategyKind>,
    /// Fallback strategies, tried only when the standard ones find nothing.
    pub aggressive: Vec<StrategyKind>,
    pub run_aggressive: bool,
    /// Per-document time limit.
    pub deadline_secs: Option<u64>,
    pub cluster_tolerance: f64,
    /// Share of lines that must be blank at an offset for it to split columns.
    pub space_threshold: f64,
    /// Similarity between neighbouring lines that opens a fallback section.
    pub similarity_anchor: f64,
    /// Similarity to the first line that keeps a fallback section growing.
    pub similarity_extend: f64,
    pub min_section_lines: usize,
    pub sniff_pages: usize,
    pub sniff_min_keywords: usize,
    pub structured_min_line_len: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        ExtractConfig {
            standard: vec![
                StrategyKind::Native,
                StrategyKind::BankStatement,
                StrategyKind::GlyphLayout,
            ],
            aggressive: vec![StrategyKind::TextLines, StrategyKind::Structured],
            run_aggressive: true,
            deadline_secs: None,
            cluster_tolerance: 5.0,
            space_threshold: 0.6,
            similarity_anchor: 0.5,
            similarity_extend: 0.3,
            min_section_lines: 3,
            sniff_pages: 3,
            sniff_min_keywords: 3,
            structured_min_line_len: 10,
        }
    }
}

impl ExtractConfig {
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<ExtractConfig, TableError> {
    let content = std::fs::read_to_string(path).map_err(|e| TableError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse a config from a JSON string.
pub fn parse_config(json: &str, source: &Path) -> Result<ExtractConfig, TableError> {
    let config: ExtractConfig =
        serde_json::from_str(json).map_err(|e| TableError::ConfigLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<ExtractConfig, TableError> {
    let config: ExtractConfig = serde_json::from_str(json).map_err(TableError::Json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a config is usable.
pub fn validate_config(config: &ExtractConfig) -> Result<(), TableError> {
    if config.standard.is_empty() {
        return Err(TableError::ConfigInvalid(
            "standard strategies must not be empty".into(),
        ));
    }

    let mut seen = HashSet::new();
    for kind in config.standard.iter().chain(&config.aggressive) {
        if !seen.insert(*kind) {
            return Err(TableError::ConfigInvalid(format!(
                "strategy '{kind}' is listed more than once"
            )));
        }
    }

    if !(config.cluster_tolerance.is_finite() && config.cluster_tolerance > 0.0) {
        return Err(TableError::ConfigInvalid(format!(
            "cluster_tolerance must be positive, got {}",
            config.cluster_tolerance
        )));
    }

    for (name, value) in [
        ("space_threshold", config.space_threshold),
        ("similarity_anchor", config.similarity_anchor),
        ("similarity_extend", config.similarity_extend),
    ] {
        if !(value > 0.0 && value <= 1.0) {
            return Err(TableError::ConfigInvalid(format!(
                "{name} must be in (0, 1], got {value}"
            )));
        }
    }

    if config.min_section_lines < 2 {
        return Err(TableError::ConfigInvalid(
            "min_section_lines must be at least 2".into(),
        ));
    }

    if config.sniff_pages == 0 || config.sniff_min_keywords == 0 {
        return Err(TableError::ConfigInvalid(
            "sniff_pages and sniff_min_keywords must be at least 1".into(),
        ));
    }

    if config.deadline_secs == Some(0) {
        return Err(TableError::ConfigInvalid(
            "deadline_secs must be at least 1 when set".into(),
        ));
    }

    Ok(())
}
