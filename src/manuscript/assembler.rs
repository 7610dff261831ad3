/*!
 * Builds annotated chunk records from raw manuscript text.
 *
 * Each chunk is annotated independently (transformation, gematria, key
 * terms), so large manuscripts are annotated on the rayon pool. Results are
 * collected in segment order, which keeps chunk ids monotonic.
 */

use chrono::{DateTime, Utc};
use log::{debug, info};
use rayon::prelude::*;

use crate::errors::ProcessingError;
use crate::numerals::GematriaCalculator;
use crate::terminology::{KeyTermExtractor, TerminologyRuleSet, TransformationEngine};

use super::chunker::Chunker;
use super::model::{Chunk, ChunkId, ChunkMetadata, ManuscriptAnalysis};

/// Options controlling how annotation is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationOptions {
    /// Whether to annotate on the rayon thread pool
    pub parallel: bool,
    /// Minimum number of chunks before going parallel
    pub parallel_threshold: usize,
}

impl Default for AnnotationOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 64,
        }
    }
}

/// Combines the chunker with the per-chunk annotators
pub struct AnnotationAssembler<'a> {
    rules: &'a TerminologyRuleSet,
    chunker: Chunker,
    calculator: GematriaCalculator,
    options: AnnotationOptions,
}

impl<'a> AnnotationAssembler<'a> {
    pub fn new(rules: &'a TerminologyRuleSet, chunker: Chunker) -> Self {
        Self {
            rules,
            chunker,
            calculator: GematriaCalculator::new(),
            options: AnnotationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AnnotationOptions) -> Self {
        self.options = options;
        self
    }

    /// Segment and annotate `text`
    pub fn assemble(&self, text: &str) -> Result<Vec<Chunk>, ProcessingError> {
        let segments = self.chunker.split(text);
        let created = Utc::now();

        let chunks = if self.options.parallel && segments.len() >= self.options.parallel_threshold {
            debug!("Annotating {} chunks in parallel", segments.len());
            segments
                .into_par_iter()
                .enumerate()
                .map(|(index, segment)| self.build_chunk(sequence_id(index)?, segment, created))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            segments
                .into_iter()
                .enumerate()
                .map(|(index, segment)| self.build_chunk(sequence_id(index)?, segment, created))
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(chunks)
    }

    /// Build the analysis document for one manuscript
    pub fn analyze(&self, file: &str, text: &str) -> Result<ManuscriptAnalysis, ProcessingError> {
        let chunks = self.assemble(text)?;
        let analysis = ManuscriptAnalysis::new(file, chunks);
        info!(
            "Analyzed {}: {} chunks, {} words, total gematria {}",
            file,
            analysis.analysis.total_chunks,
            analysis.analysis.total_words,
            analysis.analysis.total_gematria
        );
        Ok(analysis)
    }

    /// Annotate a single chunk
    pub fn build_chunk(
        &self,
        id: ChunkId,
        original: String,
        created: DateTime<Utc>,
    ) -> Result<Chunk, ProcessingError> {
        let transformation = TransformationEngine::new(self.rules).apply(&original);
        let key_terms = KeyTermExtractor::new(self.rules.glossary()).extract(&original);
        let metadata = ChunkMetadata {
            length: original.chars().count(),
            words: original.split_whitespace().count(),
            gematria: self.calculator.calculate(&original),
            changes: transformation.changes,
            key_terms,
            created,
        };

        Ok(Chunk::new(id, original, transformation.text, metadata))
    }
}

fn sequence_id(index: usize) -> Result<ChunkId, ProcessingError> {
    let sequence = u32::try_from(index + 1)
        .map_err(|_| ProcessingError::invalid_parameter("chunk count", "too many chunks"))?;
    ChunkId::new(sequence)
}
