/*!
 * Manuscript segmentation and annotation.
 *
 * - `chunker`: sentence-respecting segmentation
 * - `model`: chunk records and the analysis document
 * - `assembler`: turns raw text into annotated chunks
 */

pub mod assembler;
pub mod chunker;
pub mod model;

pub use assembler::{AnnotationAssembler, AnnotationOptions};
pub use chunker::{Chunker, DEFAULT_MAX_CHUNK_CHARS};
pub use model::{AnalysisSummary, Chunk, ChunkId, ChunkMetadata, ManuscriptAnalysis, TranslationMetadata};
