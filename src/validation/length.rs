/*!
 * Length plausibility of translations.
 *
 * The ratio is measured in characters (Unicode scalar values) of the
 * translation over the original chunk text, with inclusive bounds.
 */

use std::fmt;

/// Default minimum length ratio (translation / original)
pub const DEFAULT_MIN_LENGTH_RATIO: f64 = 0.5;

/// Default maximum length ratio (translation / original)
pub const DEFAULT_MAX_LENGTH_RATIO: f64 = 2.0;

/// Why a length check failed
#[derive(Debug, Clone, PartialEq)]
pub enum LengthIssue {
    /// Nothing to compare against
    EmptyOriginal,
    TranslationTooShort {
        ratio: f64,
        min_ratio: f64,
        original_len: usize,
        translated_len: usize,
    },
    TranslationTooLong {
        ratio: f64,
        max_ratio: f64,
        original_len: usize,
        translated_len: usize,
    },
}

impl fmt::Display for LengthIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthIssue::EmptyOriginal => write!(f, "Original text is empty"),
            LengthIssue::TranslationTooShort {
                ratio,
                min_ratio,
                original_len,
                translated_len,
            } => write!(
                f,
                "Translation too short: ratio {:.2} < {:.2} ({} -> {} chars)",
                ratio, min_ratio, original_len, translated_len
            ),
            LengthIssue::TranslationTooLong {
                ratio,
                max_ratio,
                original_len,
                translated_len,
            } => write!(
                f,
                "Translation too long: ratio {:.2} > {:.2} ({} -> {} chars)",
                ratio, max_ratio, original_len, translated_len
            ),
        }
    }
}

/// Checks the translation/original character ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthValidator {
    min_ratio: f64,
    max_ratio: f64,
}

impl LengthValidator {
    pub fn new(min_ratio: f64, max_ratio: f64) -> Self {
        Self { min_ratio, max_ratio }
    }

    /// Ratio of translated to original characters, `None` for an empty original
    pub fn calculate_ratio(original: &str, translated: &str) -> Option<f64> {
        let original_len = original.chars().count();
        if original_len == 0 {
            return None;
        }
        Some(translated.chars().count() as f64 / original_len as f64)
    }

    /// `Ok(ratio)` when the ratio lies within bounds
    pub fn check(&self, original: &str, translated: &str) -> Result<f64, LengthIssue> {
        let ratio = Self::calculate_ratio(original, translated).ok_or(LengthIssue::EmptyOriginal)?;
        let original_len = original.chars().count();
        let translated_len = translated.chars().count();

        if ratio < self.min_ratio {
            return Err(LengthIssue::TranslationTooShort {
                ratio,
                min_ratio: self.min_ratio,
                original_len,
                translated_len,
            });
        }
        if ratio > self.max_ratio {
            return Err(LengthIssue::TranslationTooLong {
                ratio,
                max_ratio: self.max_ratio,
                original_len,
                translated_len,
            });
        }
        Ok(ratio)
    }
}

impl Default for LengthValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LENGTH_RATIO, DEFAULT_MAX_LENGTH_RATIO)
    }
}
