//! YAML configuration file support.
//!
//! One file configures every corpus run: where the corpus stores live, how
//! sentences are tokenized, how the vocabulary is reduced and how the
//! similarity graph is built.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! corpora: ["news", "wiki"]
//!
//! store:
//!   backend: redb
//!   directory: ./data
//!
//! tokenizer:
//!   edit_umlauts: true
//!   filter: ignore_cases
//!
//! reduction:
//!   method: percent
//!   percent: 0.5
//!
//! similarity:
//!   threshold: 0.3
//!   minimum_match_length: 2
//!
//! pipeline:
//!   update_word_counts: true
//!   update_similarities: true
//!
//! logging:
//!   level: info
//!   json: false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use canonical::TokenizeConfig;
use frequency::{CountConfig, ReductionPolicy};
use serde::{Deserialize, Serialize};
use similarity::SimilarityConfig;
use store::StoreConfig;
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration for a sentgraph run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentgraphConfig {
    /// Configuration format version
    pub version: String,

    /// Corpus names; each one maps to its own store.
    #[serde(default)]
    pub corpora: Vec<String>,

    #[serde(default)]
    pub store: StoreYamlConfig,

    #[serde(default)]
    pub tokenizer: TokenizerYamlConfig,

    #[serde(default)]
    pub reduction: ReductionYamlConfig,

    #[serde(default)]
    pub similarity: SimilarityYamlConfig,

    #[serde(default)]
    pub pipeline: PipelineYamlConfig,

    #[serde(default)]
    pub logging: LoggingYamlConfig,
}

impl SentgraphConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: SentgraphConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        if self.corpora.is_empty() {
            return Err(ConfigLoadError::Validation(
                "corpora must name at least one corpus".to_string(),
            ));
        }
        for corpus in &self.corpora {
            validate_corpus_name(corpus)?;
        }

        self.reduction.validate()?;
        self.similarity.validate()?;
        self.pipeline.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

impl Default for SentgraphConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            corpora: Vec::new(),
            store: StoreYamlConfig::default(),
            tokenizer: TokenizerYamlConfig::default(),
            reduction: ReductionYamlConfig::default(),
            similarity: SimilarityYamlConfig::default(),
            pipeline: PipelineYamlConfig::default(),
            logging: LoggingYamlConfig::default(),
        }
    }
}

// Corpus names become file names.
fn validate_corpus_name(name: &str) -> Result<(), ConfigLoadError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && name != "."
        && name != "..";
    if valid {
        Ok(())
    } else {
        Err(ConfigLoadError::Validation(format!(
            "invalid corpus name {name:?}; use ASCII letters, digits, '_', '-' or '.'"
        )))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    #[default]
    Redb,
    InMemory,
}

/// Store YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreYamlConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Directory holding one `<corpus>.redb` file per corpus.
    #[serde(default = "default_store_directory")]
    pub directory: PathBuf,
}

impl StoreYamlConfig {
    pub fn store_config(&self, corpus: &str) -> StoreConfig {
        match self.backend {
            StoreBackend::Redb => StoreConfig::redb(self.directory.join(format!("{corpus}.redb"))),
            StoreBackend::InMemory => StoreConfig::in_memory(),
        }
    }
}

impl Default for StoreYamlConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            directory: default_store_directory(),
        }
    }
}

/// Case handling applied while tokenizing and counting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TokenFilter {
    #[default]
    Off,
    /// Lowercase every sentence before tokenizing.
    IgnoreCases,
    /// Count only capitalized words.
    OnlyNouns,
}

/// Tokenizer YAML configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct TokenizerYamlConfig {
    #[serde(default)]
    pub edit_umlauts: bool,

    #[serde(default)]
    pub filter: TokenFilter,
}

impl TokenizerYamlConfig {
    pub fn tokenize_config(&self) -> TokenizeConfig {
        TokenizeConfig::new()
            .with_ignore_cases(self.filter == TokenFilter::IgnoreCases)
            .with_edit_umlauts(self.edit_umlauts)
    }

    pub fn count_config(&self) -> CountConfig {
        CountConfig::new().with_only_nouns(self.filter == TokenFilter::OnlyNouns)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReductionMethod {
    #[default]
    Off,
    /// Confidence-band search over `percent` of the vocabulary.
    Percent,
    /// Fixed `lower_freq..=higher_freq` range.
    Frequency,
}

/// Vocabulary reduction YAML configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ReductionYamlConfig {
    #[serde(default)]
    pub method: ReductionMethod,

    #[serde(default)]
    pub percent: Option<f64>,

    #[serde(default)]
    pub lower_freq: Option<u64>,

    #[serde(default)]
    pub higher_freq: Option<u64>,
}

impl ReductionYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.policy().map(|_| ())
    }

    /// The reduction policy this section describes.
    pub fn policy(&self) -> Result<ReductionPolicy, ConfigLoadError> {
        match self.method {
            ReductionMethod::Off => Ok(ReductionPolicy::Off),
            ReductionMethod::Percent => match self.percent {
                Some(percent) if percent.is_finite() => Ok(ReductionPolicy::Percent(percent)),
                _ => Err(ConfigLoadError::Validation(
                    "reduction.percent must be a finite number when method is percent".to_string(),
                )),
            },
            ReductionMethod::Frequency => match (self.lower_freq, self.higher_freq) {
                (Some(lower), Some(upper)) if lower <= upper => {
                    Ok(ReductionPolicy::Range { lower, upper })
                }
                (Some(lower), Some(upper)) => Err(ConfigLoadError::Validation(format!(
                    "reduction.lower_freq ({lower}) must not exceed reduction.higher_freq ({upper})"
                ))),
                _ => Err(ConfigLoadError::Validation(
                    "reduction.lower_freq and reduction.higher_freq are required when method is frequency"
                        .to_string(),
                )),
            },
        }
    }
}

/// Similarity YAML configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SimilarityYamlConfig {
    #[serde(default)]
    pub threshold: f64,

    #[serde(default)]
    pub minimum_match_length: usize,

    #[serde(default)]
    pub use_parallel: bool,

    #[serde(default = "default_buckets")]
    pub distribution_buckets: usize,
}

impl SimilarityYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if !self.threshold.is_finite() {
            return Err(ConfigLoadError::Validation(
                "similarity.threshold must be a finite number".to_string(),
            ));
        }
        if self.distribution_buckets == 0 {
            return Err(ConfigLoadError::Validation(
                "similarity.distribution_buckets must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn similarity_config(&self) -> SimilarityConfig {
        SimilarityConfig::new()
            .with_threshold(self.threshold)
            .with_minimum_match_length(self.minimum_match_length)
            .with_parallel(self.use_parallel)
    }
}

impl Default for SimilarityYamlConfig {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            minimum_match_length: 0,
            use_parallel: false,
            distribution_buckets: default_buckets(),
        }
    }
}

/// Which steps run for every corpus.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineYamlConfig {
    #[serde(default = "true_value")]
    pub update_word_counts: bool,

    #[serde(default = "true_value")]
    pub update_similarities: bool,

    /// Load at most this many sentences (lowest ids first).
    #[serde(default)]
    pub sentence_limit: Option<usize>,
}

impl PipelineYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.sentence_limit == Some(0) {
            return Err(ConfigLoadError::Validation(
                "pipeline.sentence_limit must be >= 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PipelineYamlConfig {
    fn default() -> Self {
        Self {
            update_word_counts: true,
            update_similarities: true,
            sentence_limit: None,
        }
    }
}

/// Logging YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingYamlConfig {
    /// `EnvFilter` directive, e.g. `info` or `sentgraph=debug,similarity=info`.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

impl LoggingYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        tracing_subscriber::EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|err| ConfigLoadError::Validation(format!("logging.level: {err}")))
    }
}

impl Default for LoggingYamlConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_store_directory() -> PathBuf {
    PathBuf::from("./data")
}

fn default_buckets() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn true_value() -> bool {
    true
}
