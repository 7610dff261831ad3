use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::errors::ProcessingError;
use crate::manuscript::{AnnotationOptions, Chunker, DEFAULT_MAX_CHUNK_CHARS};
use crate::terminology::{GlossaryEntry, TerminologyRuleSet, TransformationRule};
use crate::translation::{BatchScheduler, DEFAULT_BATCH_SIZE, DEFAULT_INSTRUCTION};
use crate::validation::ValidationPolicy;

/// Application configuration module
/// This module handles loading, validating and saving the pipeline settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    #[serde(default)]
    pub chunking: ChunkingConfig,

    #[serde(default)]
    pub batching: BatchingConfig,

    #[serde(default)]
    pub annotation: AnnotationConfig,

    #[serde(default)]
    pub validation: ValidationPolicy,

    /// Optional replacement of the built-in source rule set
    #[serde(default)]
    pub terminology: TerminologyConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Segmentation settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChunkingConfig {
    /// Maximum chunk size in characters
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: default_max_chunk_chars(),
        }
    }
}

/// Batch export settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BatchingConfig {
    /// Chunks per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Instruction attached to every batch
    #[serde(default = "default_instruction")]
    pub instruction: String,
}

impl Default for BatchingConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            instruction: default_instruction(),
        }
    }
}

/// Annotation scheduling settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnnotationConfig {
    /// Annotate chunks on the rayon thread pool
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Minimum chunk count before annotating in parallel
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

/// Terminology overrides; unset parts fall back to the built-in source preset
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct TerminologyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<TransformationRule>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glossary: Option<Vec<GlossaryEntry>>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "he".to_string()
}

fn default_target_language() -> String {
    "de".to_string()
}

fn default_max_chunk_chars() -> usize {
    DEFAULT_MAX_CHUNK_CHARS
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_instruction() -> String {
    DEFAULT_INSTRUCTION.to_string()
}

fn default_true() -> bool {
    true
}

fn default_parallel_threshold() -> usize {
    64
}

impl Config {
    /// Load the configuration at `path`, writing the defaults there first if
    /// the file does not exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let _source_name = crate::language_utils::get_language_name(&self.source_language)?;
        let _target_name = crate::language_utils::get_language_name(&self.target_language)?;
        if !crate::language_utils::is_hebrew(&self.source_language) {
            warn!(
                "Source language '{}' is not Hebrew; gematria values will be zero",
                self.source_language
            );
        }

        if self.chunking.max_chunk_chars == 0 {
            return Err(anyhow!("chunking.max_chunk_chars must be greater than zero"));
        }
        if self.batching.batch_size == 0 {
            return Err(anyhow!("batching.batch_size must be at least 1"));
        }

        self.validation.validate()?;
        self.rule_set().context("Invalid terminology configuration")?;

        Ok(())
    }

    /// Source rule set with any configured overrides applied
    pub fn rule_set(&self) -> Result<TerminologyRuleSet, ProcessingError> {
        let preset = TerminologyRuleSet::source_manuscript();
        let rules = match &self.terminology.rules {
            Some(rules) => rules.clone(),
            None => preset.rules().to_vec(),
        };
        let glossary = match &self.terminology.glossary {
            Some(glossary) => glossary.clone(),
            None => preset.glossary().to_vec(),
        };
        TerminologyRuleSet::new(rules, glossary)
    }

    pub fn chunker(&self) -> Result<Chunker, ProcessingError> {
        Chunker::new(self.chunking.max_chunk_chars)
    }

    pub fn batch_scheduler(&self) -> Result<BatchScheduler, ProcessingError> {
        Ok(BatchScheduler::new(self.batching.batch_size)?.with_instruction(self.batching.instruction.clone()))
    }

    pub fn annotation_options(&self) -> AnnotationOptions {
        AnnotationOptions {
            parallel: self.annotation.parallel,
            parallel_threshold: self.annotation.parallel_threshold,
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            chunking: ChunkingConfig::default(),
            batching: BatchingConfig::default(),
            annotation: AnnotationConfig::default(),
            validation: ValidationPolicy::default(),
            terminology: TerminologyConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
