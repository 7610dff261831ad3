/*!
 * Advisory style checks on German translations.
 */

use serde::{Deserialize, Serialize};

/// Anthropomorphic phrasings and the wording to use instead
const ANTHROPOMORPHIC_PHRASES: &[(&str, &str)] = &[
    ("Gott will", "es ist der göttliche Wille"),
    ("Gott denkt", "in der göttlichen Weisheit liegt"),
    ("Gott fühlt", "die göttliche Eigenschaft offenbart sich"),
    ("der Herr sagt", "es steht geschrieben"),
    ("Er wünscht", "der göttliche Wille richtet sich auf"),
    ("Seine Hand", "die göttliche Kraft"),
];

/// One phrasing to reconsider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleWarning {
    pub phrase: String,
    pub suggestion: String,
}

/// Anthropomorphic phrases found in `translation`, case-insensitive
pub fn style_warnings(translation: &str) -> Vec<StyleWarning> {
    let lowered = translation.to_lowercase();
    ANTHROPOMORPHIC_PHRASES
        .iter()
        .filter(|(phrase, _)| lowered.contains(&phrase.to_lowercase()))
        .map(|(phrase, suggestion)| StyleWarning {
            phrase: phrase.to_string(),
            suggestion: suggestion.to_string(),
        })
        .collect()
}
