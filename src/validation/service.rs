/*!
 * Translation validation.
 *
 * Every proposed translation is run through four checks (content,
 * terminology conformance, key-term preservation, length plausibility).
 * A translation is valid only when all four pass; the report carries the
 * individual outcomes as well.
 */

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::ProcessingError;
use crate::manuscript::{Chunk, ChunkId};
use crate::terminology::{TerminologyRuleSet, Transformation, TransformationEngine};

use super::length::{LengthValidator, DEFAULT_MAX_LENGTH_RATIO, DEFAULT_MIN_LENGTH_RATIO};
use super::merge::resolve_translations;
use super::style::{style_warnings, StyleWarning};

/// Validation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    /// Spellings a conforming translation must not contain (case-insensitive)
    #[serde(default = "default_banned_variants")]
    pub banned_variants: Vec<String>,

    /// Minimum acceptable length ratio
    #[serde(default = "default_min_ratio")]
    pub length_ratio_min: f64,

    /// Maximum acceptable length ratio
    #[serde(default = "default_max_ratio")]
    pub length_ratio_max: f64,

    /// Refuse to export documents containing zero values
    #[serde(default)]
    pub reject_zero_values: bool,
}

fn default_banned_variants() -> Vec<String> {
    ["kabbala", "kawana", "zerstör", "zerbrech"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_min_ratio() -> f64 {
    DEFAULT_MIN_LENGTH_RATIO
}

fn default_max_ratio() -> f64 {
    DEFAULT_MAX_LENGTH_RATIO
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            banned_variants: default_banned_variants(),
            length_ratio_min: default_min_ratio(),
            length_ratio_max: default_max_ratio(),
            reject_zero_values: false,
        }
    }
}

impl ValidationPolicy {
    pub fn validate(&self) -> Result<(), ProcessingError> {
        if !(self.length_ratio_min > 0.0 && self.length_ratio_min <= self.length_ratio_max) {
            return Err(ProcessingError::invalid_parameter(
                "validation.length_ratio",
                format!(
                    "expected 0 < min <= max, got min {} and max {}",
                    self.length_ratio_min, self.length_ratio_max
                ),
            ));
        }
        if self.banned_variants.iter().any(|v| v.trim().is_empty()) {
            return Err(ProcessingError::invalid_parameter(
                "validation.banned_variants",
                "entries must not be empty",
            ));
        }
        Ok(())
    }
}

/// Outcome of each individual check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationChecks {
    pub has_content: bool,
    pub wwaq_conform: bool,
    pub maintains_key_terms: bool,
    pub reasonable_length: bool,
}

impl ValidationChecks {
    pub fn all_passed(&self) -> bool {
        self.has_content && self.wwaq_conform && self.maintains_key_terms && self.reasonable_length
    }
}

/// Validation result for one translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub checks: ValidationChecks,
    /// Human-readable reasons for failed checks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

/// Report for one chunk of a whole-document validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkValidation {
    pub id: ChunkId,
    #[serde(flatten)]
    pub report: ValidationReport,
}

/// Whole-document validation result
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub validated: usize,
    pub failed: usize,
    /// Chunks without a translation
    pub missing: usize,
    /// Mapping keys that match no chunk
    pub unknown_ids: Vec<String>,
    pub reports: Vec<ChunkValidation>,
}

impl ValidationSummary {
    pub fn summary(&self) -> String {
        format!(
            "Validation: {} valid, {} failed, {} missing, {} unknown ids",
            self.validated,
            self.failed,
            self.missing,
            self.unknown_ids.len()
        )
    }
}

/// Checks proposed translations against the policy
pub struct TranslationValidator {
    policy: ValidationPolicy,
    banned_lowercase: Vec<String>,
    length_validator: LengthValidator,
    orthography: TerminologyRuleSet,
}

impl TranslationValidator {
    pub fn new() -> Self {
        Self::with_policy(ValidationPolicy::default())
    }

    pub fn with_policy(policy: ValidationPolicy) -> Self {
        let banned_lowercase = policy
            .banned_variants
            .iter()
            .map(|v| v.to_lowercase())
            .collect();
        let length_validator = LengthValidator::new(policy.length_ratio_min, policy.length_ratio_max);

        Self {
            policy,
            banned_lowercase,
            length_validator,
            orthography: TerminologyRuleSet::target_orthography(),
        }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Banned variants present in `translation`
    pub fn banned_variants_in(&self, translation: &str) -> Vec<&str> {
        let lowered = translation.to_lowercase();
        self.banned_lowercase
            .iter()
            .filter(|variant| lowered.contains(variant.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Terminology conformance of `translation`
    pub fn is_conform(&self, translation: &str) -> bool {
        self.banned_variants_in(translation).is_empty()
    }

    /// Run all checks on one translation
    pub fn validate(&self, chunk: &Chunk, translation: &str) -> ValidationReport {
        let mut issues = Vec::new();

        let has_content = !translation.trim().is_empty();
        if !has_content {
            issues.push("Translation is empty".to_string());
        }

        let banned = self.banned_variants_in(translation);
        let wwaq_conform = banned.is_empty();
        if !wwaq_conform {
            issues.push(format!("Banned spellings: {}", banned.join(", ")));
        }

        let lost_terms: Vec<&str> = chunk
            .key_terms()
            .iter()
            .filter(|t| !translation.contains(t.term.as_str()) && !translation.contains(t.gloss.as_str()))
            .map(|t| t.term.as_str())
            .collect();
        let maintains_key_terms = lost_terms.is_empty();
        if !maintains_key_terms {
            issues.push(format!("Key terms missing: {}", lost_terms.join(", ")));
        }

        let reasonable_length = match self.length_validator.check(chunk.original(), translation) {
            Ok(_) => true,
            Err(issue) => {
                issues.push(issue.to_string());
                false
            }
        };

        let checks = ValidationChecks {
            has_content,
            wwaq_conform,
            maintains_key_terms,
            reasonable_length,
        };
        debug!("Validated {}: {:?}", chunk.id(), checks);

        ValidationReport {
            is_valid: checks.all_passed(),
            checks,
            issues,
        }
    }

    /// Validate every supplied translation against its chunk
    pub fn validate_all(
        &self,
        chunks: &[Chunk],
        translations: &BTreeMap<String, String>,
    ) -> ValidationSummary {
        let resolution = resolve_translations(chunks, translations);
        let mut summary = ValidationSummary::default();

        for chunk in chunks {
            match resolution.matched.get(&chunk.id()) {
                Some(translation) => {
                    let report = self.validate(chunk, translation);
                    if report.is_valid {
                        summary.validated += 1;
                    } else {
                        summary.failed += 1;
                    }
                    summary.reports.push(ChunkValidation {
                        id: chunk.id(),
                        report,
                    });
                }
                None => summary.missing += 1,
            }
        }

        summary.unknown_ids = resolution.unknown_ids;
        summary
    }

    /// Apply the target orthography to a translation
    pub fn suggest_corrections(&self, translation: &str) -> Transformation {
        TransformationEngine::new(&self.orthography).apply(translation)
    }

    /// Advisory style hints; never affect validity
    pub fn style_warnings(&self, translation: &str) -> Vec<StyleWarning> {
        style_warnings(translation)
    }
}

impl Default for TranslationValidator {
    fn default() -> Self {
        Self::new()
    }
}
