use serde::Deserialize;

use crate::ConfigError;

/// Tuning knobs for matching and rewriting.
///
/// Every field has a default, so an empty TOML document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Layers of parentheses, lambda bodies and single-`return` blocks a
    /// pattern may look through.
    pub unwrap_depth: usize,
    /// First number tried when a new name needs a numeric suffix.
    pub suffix_start: u32,
    /// Whether large trees are matched on the rayon thread pool.
    pub parallel: bool,
    /// Minimum number of candidate nodes before the walk fans out.
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { unwrap_depth: 4, suffix_start: 2, parallel: true, parallel_threshold: 256 }
    }
}

impl EngineConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
