/*!
 * Validation of returned translations.
 *
 * This module checks translations before they are merged into the chunk
 * records:
 *
 * - `service`: the four per-chunk checks and whole-document summaries
 * - `length`: character ratio bounds
 * - `style`: advisory style hints
 * - `merge`: attaching translations to chunks
 * - `structure`: zero-value guard for exported documents
 */

pub mod length;
pub mod merge;
pub mod service;
pub mod structure;
pub mod style;

pub use length::{LengthIssue, LengthValidator};
pub use merge::{merge_translations, MergeOutcome};
pub use service::{
    ChunkValidation, TranslationValidator, ValidationChecks, ValidationPolicy, ValidationReport,
    ValidationSummary,
};
pub use structure::find_zero_values;
pub use style::{style_warnings, StyleWarning};
