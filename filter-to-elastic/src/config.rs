use crate::date_format::DEFAULT_DATE_FORMAT;
use crate::query::ScoreMode;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// How LIKE is translated for attributes missing from the schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LikeMode {
    #[default]
    QueryString,
    Regex,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EncoderConfig {
    #[serde(default = "default_date_format")]
    pub default_date_format: String,
    #[serde(default)]
    pub nested_score_mode: ScoreMode,
    #[serde(default)]
    pub unknown_like_mode: LikeMode,
    #[serde(default = "default_url_decode")]
    pub url_decode_view_params: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            default_date_format: default_date_format(),
            nested_score_mode: ScoreMode::default(),
            unknown_like_mode: LikeMode::default(),
            url_decode_view_params: default_url_decode(),
        }
    }
}

impl EncoderConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

// Default functions
fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_url_decode() -> bool {
    true
}
