/*!
 * Terminology normalization.
 *
 * - `rules`: rule sets (ordered literal/structural rules plus a glossary)
 * - `engine`: applies a rule set and logs what changed
 * - `key_terms`: glossary term occurrences per chunk
 */

pub mod engine;
pub mod key_terms;
pub mod rules;

pub use engine::{Transformation, TransformationEngine};
pub use key_terms::{KeyTerm, KeyTermExtractor};
pub use rules::{GlossaryEntry, RuleKind, TerminologyRuleSet, TransformationRule};
