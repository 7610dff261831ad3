/*!
 * Translation batches.
 *
 * Chunks are partitioned into fixed-capacity batches of consecutive records.
 * Each batch carries a read-only projection of its chunks (transformed text,
 * standard gematria as a hint, key terms) plus the instruction handed to
 * whoever translates it.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::ProcessingError;
use crate::manuscript::{Chunk, ChunkId};
use crate::terminology::KeyTerm;

/// Default number of chunks per batch
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Default instruction attached to every batch
pub const DEFAULT_INSTRUCTION: &str = "Übersetzungsanweisung für Ez Chajim:

1. Schreibweise:
   - immer \"Qabbala\" und \"Qawana\" (mit Q)
   - niemals \"zerstören\" oder \"zerbrechen\", sondern \"wandeln\" oder \"auflösen\"

2. Fachbegriffe:
   - hebräische Begriffe beibehalten und auf Deutsch erläutern,
     z.B. \"die Sefirot (göttliche Emanationen)\"

3. Gematria:
   - die angegebenen Zahlenwerte beachten und auf bedeutsame Werte hinweisen

4. Stil:
   - textnah und würdevoll übersetzen";

/// One chunk as seen by the translator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    pub id: ChunkId,
    /// Transformed text of the chunk
    pub text: String,
    pub gematria_hint: u64,
    pub key_terms: Vec<KeyTerm>,
}

impl From<&Chunk> for BatchItem {
    fn from(chunk: &Chunk) -> Self {
        Self {
            id: chunk.id(),
            text: chunk.transformed().to_string(),
            gematria_hint: chunk.gematria().standard,
            key_terms: chunk.key_terms().to_vec(),
        }
    }
}

/// A unit of translation work. Immutable once scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    batch_id: String,
    chunk_ids: Vec<ChunkId>,
    instruction: String,
    chunks: Vec<BatchItem>,
}

impl Batch {
    pub fn batch_id(&self) -> &str {
        &self.batch_id
    }

    pub fn chunk_ids(&self) -> &[ChunkId] {
        &self.chunk_ids
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn items(&self) -> &[BatchItem] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunk_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunk_ids.is_empty()
    }
}

/// Partitions chunk sequences into batches
#[derive(Debug, Clone)]
pub struct BatchScheduler {
    capacity: usize,
    instruction: String,
}

impl BatchScheduler {
    pub fn new(capacity: usize) -> Result<Self, ProcessingError> {
        if capacity == 0 {
            return Err(ProcessingError::invalid_parameter(
                "batch_size",
                "must be at least 1",
            ));
        }
        Ok(Self {
            capacity,
            instruction: DEFAULT_INSTRUCTION.to_string(),
        })
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Batch `chunks` in order; `ceil(len / capacity)` batches
    pub fn schedule(&self, chunks: &[Chunk]) -> Vec<Batch> {
        let batches: Vec<Batch> = chunks
            .chunks(self.capacity)
            .enumerate()
            .map(|(index, slice)| Batch {
                batch_id: format!("BATCH_{:03}", index + 1),
                chunk_ids: slice.iter().map(Chunk::id).collect(),
                instruction: self.instruction.clone(),
                chunks: slice.iter().map(BatchItem::from).collect(),
            })
            .collect();

        debug!(
            "Scheduled {} chunks into {} batches of up to {}",
            chunks.len(),
            batches.len(),
            self.capacity
        );
        batches
    }
}

impl Default for BatchScheduler {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_BATCH_SIZE,
            instruction: DEFAULT_INSTRUCTION.to_string(),
        }
    }
}
