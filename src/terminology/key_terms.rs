/*!
 * Glossary term occurrences.
 */

use serde::{Deserialize, Serialize};

use crate::numerals::GematriaCalculator;

use super::rules::GlossaryEntry;

/// Occurrence record of one glossary term in one chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyTerm {
    /// Glossary key as it appears in the source
    #[serde(rename = "hebrew")]
    pub term: String,
    #[serde(rename = "translation")]
    pub gloss: String,
    /// Non-overlapping occurrences in the chunk's original text
    pub count: usize,
    /// Standard gematria of the term itself
    #[serde(rename = "gematria")]
    pub weight: u64,
}

/// Scans text against a glossary.
///
/// Terms are matched independently, so a term contained in another term is
/// reported on its own as well.
#[derive(Debug, Clone, Copy)]
pub struct KeyTermExtractor<'a> {
    glossary: &'a [GlossaryEntry],
    calculator: GematriaCalculator,
}

impl<'a> KeyTermExtractor<'a> {
    pub fn new(glossary: &'a [GlossaryEntry]) -> Self {
        Self {
            glossary,
            calculator: GematriaCalculator::new(),
        }
    }

    /// Key terms found in `text`, in glossary order
    pub fn extract(&self, text: &str) -> Vec<KeyTerm> {
        self.glossary
            .iter()
            .filter_map(|entry| {
                let count = text.matches(entry.term.as_str()).count();
                (count > 0).then(|| KeyTerm {
                    term: entry.term.clone(),
                    gloss: entry.gloss.clone(),
                    count,
                    weight: self.calculator.standard(&entry.term),
                })
            })
            .collect()
    }
}
