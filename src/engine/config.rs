//! Engine configuration types

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::Deserialize;

use crate::engine::constants::DEFAULT_MAX_SENTENCE_LENGTH;

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Path to a model JSON file; the built-in model is used when absent
    pub model_path: Option<PathBuf>,
    /// Whether `parse` segments multi-sentence input (default true)
    #[serde(default = "default_split_sentences")]
    pub split_sentences: bool,
    /// Maximum tokens per sentence before the sentence is rejected
    #[serde(default = "default_max_sentence_length")]
    pub max_sentence_length: usize,
}

impl ParserConfig {
    /// Load a configuration from a YAML file
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(anyhow!("Config file not found: {}", path.display()));
        }

        let yaml = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;

        serde_yaml::from_str(&yaml)
            .map_err(|e| anyhow!("Invalid YAML config in {}: {}", path.display(), e))
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            split_sentences: default_split_sentences(),
            max_sentence_length: default_max_sentence_length(),
        }
    }
}

fn default_split_sentences() -> bool {
    true
}

fn default_max_sentence_length() -> usize {
    DEFAULT_MAX_SENTENCE_LENGTH
}
