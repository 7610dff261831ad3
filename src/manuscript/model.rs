/*!
 * Chunk records and the manuscript analysis document.
 *
 * These types are the JSON interface between the pipeline and whatever
 * handles translation downstream.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::ProcessingError;
use crate::numerals::GematriaValues;
use crate::terminology::KeyTerm;

const CHUNK_ID_PREFIX: &str = "CHUNK_";

/// Stable sequence number of a chunk, rendered as `CHUNK_0001`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChunkId(u32);

impl ChunkId {
    /// Ids are 1-based
    pub fn new(sequence: u32) -> Result<Self, ProcessingError> {
        if sequence == 0 {
            return Err(ProcessingError::invalid_parameter("chunk id", "ids start at 1"));
        }
        Ok(Self(sequence))
    }

    pub fn sequence(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:04}", CHUNK_ID_PREFIX, self.0)
    }
}

impl FromStr for ChunkId {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().strip_prefix(CHUNK_ID_PREFIX).ok_or_else(|| {
            ProcessingError::invalid_parameter("chunk id", format!("'{}' lacks the {} prefix", s, CHUNK_ID_PREFIX))
        })?;
        let sequence = digits.parse::<u32>().map_err(|e| {
            ProcessingError::invalid_parameter("chunk id", format!("'{}': {}", s, e))
        })?;
        Self::new(sequence)
    }
}

impl TryFrom<String> for ChunkId {
    type Error = ProcessingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChunkId> for String {
    fn from(id: ChunkId) -> Self {
        id.to_string()
    }
}

/// Annotations computed once when the chunk is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Length of the original text in characters
    pub length: usize,
    /// Whitespace-separated word count of the original text
    pub words: usize,
    pub gematria: GematriaValues,
    /// Terminology rewrite log
    #[serde(rename = "wwaq_changes")]
    pub changes: Vec<String>,
    pub key_terms: Vec<KeyTerm>,
    pub created: DateTime<Utc>,
}

/// Set on a chunk when a translation is merged in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationMetadata {
    pub translated: bool,
    pub date: DateTime<Utc>,
    /// Result of the terminology policy check on the translation
    pub validated: bool,
}

/// A bounded, sentence-respecting segment of the manuscript.
///
/// The original text is fixed at creation; only the translation fields can
/// change afterwards, and only through a merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    id: ChunkId,
    original: String,
    transformed: String,
    metadata: ChunkMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    translation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    translation_metadata: Option<TranslationMetadata>,
}

impl Chunk {
    pub(crate) fn new(id: ChunkId, original: String, transformed: String, metadata: ChunkMetadata) -> Self {
        Self {
            id,
            original,
            transformed,
            metadata,
            translation: None,
            translation_metadata: None,
        }
    }

    pub fn id(&self) -> ChunkId {
        self.id
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn transformed(&self) -> &str {
        &self.transformed
    }

    pub fn metadata(&self) -> &ChunkMetadata {
        &self.metadata
    }

    pub fn gematria(&self) -> &GematriaValues {
        &self.metadata.gematria
    }

    pub fn key_terms(&self) -> &[KeyTerm] {
        &self.metadata.key_terms
    }

    pub fn translation(&self) -> Option<&str> {
        self.translation.as_deref()
    }

    pub fn translation_metadata(&self) -> Option<&TranslationMetadata> {
        self.translation_metadata.as_ref()
    }

    pub fn is_translated(&self) -> bool {
        self.translation_metadata.as_ref().is_some_and(|m| m.translated)
    }

    pub(crate) fn record_translation(&mut self, translation: String, metadata: TranslationMetadata) {
        self.translation = Some(translation);
        self.translation_metadata = Some(metadata);
    }
}

/// Whole-manuscript aggregates
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_chunks: usize,
    pub total_words: usize,
    pub total_gematria: u64,
    /// Integer mean of the standard values, 0 without chunks
    pub average_gematria: u64,
    /// Occurrences per glossary term over all chunks
    pub key_terms_frequency: BTreeMap<String, usize>,
    /// Number of chunks that logged each change entry
    pub wwaq_transformations: BTreeMap<String, usize>,
}

impl AnalysisSummary {
    pub fn from_chunks(chunks: &[Chunk]) -> Self {
        let total_gematria: u64 = chunks.iter().map(|c| c.gematria().standard).sum();
        let mut key_terms_frequency = BTreeMap::new();
        let mut wwaq_transformations = BTreeMap::new();

        for chunk in chunks {
            for term in chunk.key_terms() {
                *key_terms_frequency.entry(term.term.clone()).or_insert(0) += term.count;
            }
            for change in &chunk.metadata().changes {
                *wwaq_transformations.entry(change.clone()).or_insert(0) += 1;
            }
        }

        Self {
            total_chunks: chunks.len(),
            total_words: chunks.iter().map(|c| c.metadata().words).sum(),
            total_gematria,
            average_gematria: if chunks.is_empty() {
                0
            } else {
                total_gematria / chunks.len() as u64
            },
            key_terms_frequency,
            wwaq_transformations,
        }
    }
}

/// Analysis document for one manuscript file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManuscriptAnalysis {
    pub file: String,
    pub analysis: AnalysisSummary,
    pub chunks: Vec<Chunk>,
}

impl ManuscriptAnalysis {
    pub fn new(file: &str, chunks: Vec<Chunk>) -> Self {
        Self {
            file: file.to_string(),
            analysis: AnalysisSummary::from_chunks(&chunks),
            chunks,
        }
    }

    pub fn chunk(&self, id: ChunkId) -> Option<&Chunk> {
        self.chunks.iter().find(|c| c.id() == id)
    }

    pub fn translated_count(&self) -> usize {
        self.chunks.iter().filter(|c| c.is_translated()).count()
    }
}
