//! Application configuration

use crate::cli::Cli;
use annotext_classifiers::AnnotatorConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Journal file
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Tokenizer dictionary; the built-in one is used when unset
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,

    #[serde(default)]
    pub annotator: AnnotatorConfig,
}

impl AppConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config {}", config_path))?;
            Self::from_yaml(&content)
                .with_context(|| format!("Invalid config {}", config_path))?
        } else {
            Self::default()
        };

        if let Some(store) = &cli.store {
            config.store_path = store.clone();
        }

        if let Some(lexicon) = &cli.lexicon {
            config.lexicon_path = Some(lexicon.clone());
        }

        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.annotator.validate()?;
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            lexicon_path: None,
            annotator: AnnotatorConfig::default(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./annotext.jsonl")
}
