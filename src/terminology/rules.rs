/*!
 * Terminology rule sets.
 *
 * A rule set is an ordered list of rewrite rules plus a glossary of compound
 * terms. It is built once per run and shared read-only by every chunk.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ProcessingError;

/// How a rule's pattern is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Plain substring replacement
    #[default]
    Literal,
    /// The pattern's letters in order, with any whitespace between them
    Structural,
}

/// A single rewrite rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationRule {
    pub pattern: String,
    pub replacement: String,
    #[serde(default)]
    pub kind: RuleKind,
}

impl TransformationRule {
    pub fn literal(pattern: &str, replacement: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
            kind: RuleKind::Literal,
        }
    }

    pub fn structural(pattern: &str, replacement: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
            kind: RuleKind::Structural,
        }
    }

    /// Identity rules protect an already-correct spelling and never rewrite
    pub fn is_identity(&self) -> bool {
        self.pattern == self.replacement
    }
}

/// A compound source term and its gloss
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub term: String,
    pub gloss: String,
}

impl GlossaryEntry {
    pub fn new(term: &str, gloss: &str) -> Self {
        Self {
            term: term.to_string(),
            gloss: gloss.to_string(),
        }
    }
}

/// A structural rule with its matcher compiled
#[derive(Debug, Clone)]
pub(crate) struct StructuralMatcher {
    pub(crate) rule: TransformationRule,
    pub(crate) regex: Regex,
    /// Letters joined with `-`, used in change log entries
    pub(crate) label: String,
}

impl StructuralMatcher {
    fn compile(rule: TransformationRule) -> Result<Self, ProcessingError> {
        let letters: Vec<char> = rule.pattern.chars().filter(|c| !c.is_whitespace()).collect();
        if letters.is_empty() {
            return Err(ProcessingError::invalid_parameter(
                "pattern",
                "structural rule pattern has no letters",
            ));
        }

        let source = letters
            .iter()
            .map(|c| regex::escape(&c.to_string()))
            .collect::<Vec<_>>()
            .join(r"\s*");
        let regex = Regex::new(&source)
            .map_err(|e| ProcessingError::InvalidRule(format!("{}: {}", rule.pattern, e)))?;
        let label = letters
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("-");

        Ok(Self { rule, regex, label })
    }
}

/// Immutable rule table and glossary
#[derive(Debug, Clone)]
pub struct TerminologyRuleSet {
    rules: Vec<TransformationRule>,
    structural: Vec<StructuralMatcher>,
    glossary: Vec<GlossaryEntry>,
}

impl TerminologyRuleSet {
    /// Build a rule set, compiling structural rules up front.
    ///
    /// Rules keep their declaration order. Empty patterns and empty glossary
    /// terms are rejected.
    pub fn new(
        rules: Vec<TransformationRule>,
        glossary: Vec<GlossaryEntry>,
    ) -> Result<Self, ProcessingError> {
        if let Some(rule) = rules.iter().find(|r| r.pattern.trim().is_empty()) {
            return Err(ProcessingError::invalid_parameter(
                "pattern",
                format!("empty pattern in rule with replacement '{}'", rule.replacement),
            ));
        }
        if let Some(entry) = glossary.iter().find(|g| g.term.is_empty()) {
            return Err(ProcessingError::invalid_parameter(
                "glossary",
                format!("empty term for gloss '{}'", entry.gloss),
            ));
        }

        let structural = rules
            .iter()
            .filter(|r| r.kind == RuleKind::Structural)
            .cloned()
            .map(StructuralMatcher::compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rules,
            structural,
            glossary,
        })
    }

    /// Rules normalizing the Hebrew source text, with the Ez Chajim glossary
    pub fn source_manuscript() -> Self {
        SOURCE_MANUSCRIPT.clone()
    }

    /// Rules normalizing German translations (Q spelling, no "zer-" verbs)
    pub fn target_orthography() -> Self {
        TARGET_ORTHOGRAPHY.clone()
    }

    /// All rules in declaration order
    pub fn rules(&self) -> &[TransformationRule] {
        &self.rules
    }

    /// Literal rules in declaration order
    pub fn literal_rules(&self) -> impl Iterator<Item = &TransformationRule> {
        self.rules.iter().filter(|r| r.kind == RuleKind::Literal)
    }

    pub(crate) fn structural_matchers(&self) -> &[StructuralMatcher] {
        &self.structural
    }

    pub fn glossary(&self) -> &[GlossaryEntry] {
        &self.glossary
    }

    /// Same rules with a different glossary
    pub fn with_glossary(mut self, glossary: Vec<GlossaryEntry>) -> Result<Self, ProcessingError> {
        if glossary.iter().any(|g| g.term.is_empty()) {
            return Err(ProcessingError::invalid_parameter("glossary", "empty term"));
        }
        self.glossary = glossary;
        Ok(self)
    }
}

static SOURCE_MANUSCRIPT: Lazy<TerminologyRuleSet> = Lazy::new(|| {
    let rules = vec![
        TransformationRule::literal("כבלה", "קבלה"),
        TransformationRule::literal("קבלה", "קבלה"),
        TransformationRule::literal("כוונה", "קוונה"),
        TransformationRule::literal("קוונה", "קוונה"),
        TransformationRule::literal("צמצום", "צמצום"),
        TransformationRule::literal("אין סוף", "אין סוף"),
        TransformationRule::structural("כבלה", "קבלה"),
    ];
    let glossary = vec![
        GlossaryEntry::new("עץ חיים", "Baum des Lebens"),
        GlossaryEntry::new("ספירות", "Sefirot"),
        GlossaryEntry::new("פרצופים", "Parzufim"),
        GlossaryEntry::new("עולמות", "Welten"),
        GlossaryEntry::new("אצילות", "Azilut"),
        GlossaryEntry::new("בריאה", "Briah"),
        GlossaryEntry::new("יצירה", "Jezirah"),
        GlossaryEntry::new("עשיה", "Asijah"),
    ];
    TerminologyRuleSet::new(rules, glossary).expect("built-in source rule set compiles")
});

// Longer spellings come first so that e.g. "Kabbalah" is not half-rewritten
// by the "Kabbala" rule.
const TARGET_LITERALS: &[(&str, &str)] = &[
    // K -> Q
    ("Kabbalah", "Qabbala"),
    ("kabbalah", "qabbala"),
    ("Kabbala", "Qabbala"),
    ("kabbala", "qabbala"),
    ("Kavanah", "Qawana"),
    ("kavanah", "qawana"),
    ("Kawana", "Qawana"),
    ("kawana", "qawana"),
    ("Klippot", "Qlipot"),
    ("klippot", "qlipot"),
    ("Klipot", "Qlipot"),
    ("klipot", "qlipot"),
    ("Klipa", "Qlipa"),
    ("klipa", "qlipa"),
    ("Kelim", "Qelim"),
    ("kelim", "qelim"),
    ("Keter", "Qeter"),
    ("keter", "qeter"),
    ("Kadmon", "Qadmon"),
    ("kadmon", "qadmon"),
    ("Kedusha", "Qeduscha"),
    ("kedusha", "qeduscha"),
    // v -> w
    ("Gevurah", "Gewura"),
    ("gevurah", "gewura"),
    ("Gevura", "Gewura"),
    ("gevura", "gewura"),
    // double s
    ("Chesed", "Chessed"),
    ("chesed", "chessed"),
    ("Yesod", "Jessod"),
    ("yesod", "jessod"),
    ("Jesod", "Jessod"),
    ("jesod", "jessod"),
    // no final h
    ("Torah", "Tora"),
    ("torah", "tora"),
    ("Binah", "Bina"),
    ("binah", "bina"),
    ("Chochmah", "Chochma"),
    ("chochmah", "chochma"),
    ("Shekinah", "Schechina"),
    ("shekinah", "schechina"),
    ("Shekhina", "Schechina"),
    ("shekhina", "schechina"),
    ("Halakhah", "Halacha"),
    ("halakhah", "halacha"),
    // z -> s
    ("Ze'ir Anpin", "Se'ir Anpin"),
    ("ze'ir anpin", "se'ir anpin"),
    ("Zeir Anpin", "Se'ir Anpin"),
    ("zeir anpin", "se'ir anpin"),
    // tz -> z
    ("Tzimtzum", "Zimzum"),
    ("tzimtzum", "zimzum"),
    ("Atzilut", "Azilut"),
    ("atzilut", "azilut"),
    ("Tikkun", "Tiqqun"),
    ("tikkun", "tiqqun"),
    // abbreviations
    ("S\"A", "SA"),
    ("Z\"A", "SA"),
    ("A\"A", "AA"),
    ("A\"K", "AQ"),
    // "zer-" verbs
    ("zerbrechen", "bersten"),
    ("Zerbrechen", "Bersten"),
    ("zerbrochen", "geborsten"),
    ("Zerbrochen", "Geborsten"),
    ("zerbricht", "berstet"),
    ("Zerbricht", "Berstet"),
    ("zerstören", "wandeln"),
    ("Zerstören", "Wandeln"),
    ("zerstört", "gewandelt"),
    ("Zerstört", "Gewandelt"),
    ("Zerstörung", "Wandlung"),
    ("zerreißen", "trennen"),
    ("Zerreißen", "Trennen"),
    ("zerrissen", "getrennt"),
    ("Zerrissen", "Getrennt"),
    ("zerschlagen", "transformieren"),
    ("Zerschlagen", "Transformieren"),
    ("zerfallen", "sich auflösen"),
    ("Zerfallen", "Sich auflösen"),
    ("zersetzen", "umwandeln"),
    ("Zersetzen", "Umwandeln"),
    ("zersplittern", "sich teilen"),
    ("Zersplittern", "Sich teilen"),
];

static TARGET_ORTHOGRAPHY: Lazy<TerminologyRuleSet> = Lazy::new(|| {
    let rules = TARGET_LITERALS
        .iter()
        .map(|(pattern, replacement)| TransformationRule::literal(pattern, replacement))
        .collect();
    TerminologyRuleSet::new(rules, Vec::new()).expect("built-in target rule set compiles")
});
