/*!
 * Merging returned translations into chunk records.
 *
 * Translations arrive as a JSON object mapping chunk ids to text. Keys are
 * parsed leniently (`CHUNK_7` and `CHUNK_0007` name the same chunk); keys
 * that name no chunk are reported back instead of failing the merge.
 */

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::manuscript::{Chunk, ChunkId, TranslationMetadata};

use super::service::TranslationValidator;

/// Translation mapping keys matched against a chunk sequence
#[derive(Debug, Clone, Default)]
pub(crate) struct Resolution<'a> {
    pub matched: BTreeMap<ChunkId, &'a str>,
    /// Keys that are malformed, duplicate, or name no chunk; sorted
    pub unknown_ids: Vec<String>,
}

pub(crate) fn resolve_translations<'a>(
    chunks: &[Chunk],
    translations: &'a BTreeMap<String, String>,
) -> Resolution<'a> {
    let known: HashSet<ChunkId> = chunks.iter().map(Chunk::id).collect();
    let mut resolution = Resolution::default();

    for (key, text) in translations {
        match key.parse::<ChunkId>() {
            Ok(id) if known.contains(&id) && !resolution.matched.contains_key(&id) => {
                resolution.matched.insert(id, text.as_str());
            }
            _ => resolution.unknown_ids.push(key.clone()),
        }
    }

    resolution
}

/// What a merge did
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MergeOutcome {
    pub merged: usize,
    /// Merged translations that passed the terminology check
    pub conforming: usize,
    pub unknown_ids: Vec<String>,
}

/// Attach translations to their chunks.
///
/// Chunks absent from the mapping are left untouched. `validated` in the
/// recorded metadata is the terminology conformance of the translation.
pub fn merge_translations(
    chunks: &mut [Chunk],
    translations: &BTreeMap<String, String>,
    validator: &TranslationValidator,
    date: DateTime<Utc>,
) -> MergeOutcome {
    let resolution = resolve_translations(chunks, translations);
    let mut outcome = MergeOutcome::default();

    for chunk in chunks.iter_mut() {
        let Some(translation) = resolution.matched.get(&chunk.id()) else {
            continue;
        };
        let validated = validator.is_conform(translation);
        chunk.record_translation(
            translation.to_string(),
            TranslationMetadata {
                translated: true,
                date,
                validated,
            },
        );
        outcome.merged += 1;
        if validated {
            outcome.conforming += 1;
        }
    }

    if !resolution.unknown_ids.is_empty() {
        warn!(
            "Ignoring {} translation(s) for unknown chunk ids: {}",
            resolution.unknown_ids.len(),
            resolution.unknown_ids.join(", ")
        );
    }
    debug!("Merged {} translations, {} conforming", outcome.merged, outcome.conforming);

    outcome.unknown_ids = resolution.unknown_ids;
    outcome
}
