/*!
 * Tests for rule sets, the transformation engine and key terms
 */

use ezchajim::terminology::{
    GlossaryEntry, KeyTermExtractor, TerminologyRuleSet, TransformationEngine, TransformationRule,
};

#[test]
fn test_apply_withSourcePreset_shouldRewriteAndLog() {
    let rules = TerminologyRuleSet::source_manuscript();
    let result = TransformationEngine::new(&rules).apply("הכוונה בלימוד הכבלה");

    assert_eq!(result.text, "הקוונה בלימוד הקבלה");
    assert_eq!(
        result.changes,
        vec!["כבלה → קבלה (1x)".to_string(), "כוונה → קוונה (1x)".to_string()]
    );
}

#[test]
fn test_apply_withSpacedCompound_shouldCollapseIt() {
    let rules = TerminologyRuleSet::source_manuscript();
    let result = TransformationEngine::new(&rules).apply("לימוד כ ב ל ה וכבלה");

    assert_eq!(result.text, "לימוד קבלה וקבלה");
    assert_eq!(result.changes[0], "כבלה → קבלה (1x)");
    assert_eq!(result.changes[1], "כ-ב-ל-ה → קבלה (spaced, 1x)");
}

#[test]
fn test_apply_withNoMatches_shouldReturnInputUnchanged() {
    let rules = TerminologyRuleSet::source_manuscript();
    let result = TransformationEngine::new(&rules).apply("שלום עולם");

    assert_eq!(result.text, "שלום עולם");
    assert!(result.is_unchanged());
}

#[test]
fn test_apply_withIdentityRules_shouldNeverLog() {
    let rules = TerminologyRuleSet::source_manuscript();
    let result = TransformationEngine::new(&rules).apply("קבלה קוונה צמצום אין סוף");
    assert!(result.changes.is_empty());
}

#[test]
fn test_apply_twice_shouldBeIdempotentForPresets() {
    let inputs = [
        ("source", TerminologyRuleSet::source_manuscript(), "הכוונה בלימוד הכ בלה, כבלה וקבלה"),
        (
            "target",
            TerminologyRuleSet::target_orthography(),
            "Die Kabbalah lehrt die Kavanah; Gevurah und Chesed; zerstören, Tzimtzum.",
        ),
    ];
    for (name, rules, input) in inputs {
        let engine = TransformationEngine::new(&rules);
        let once = engine.apply(input);
        let twice = engine.apply(&once.text);
        assert_eq!(twice.text, once.text, "{} preset", name);
        assert!(twice.changes.is_empty(), "{} preset logged {:?}", name, twice.changes);
    }
}

#[test]
fn test_apply_withTargetPreset_shouldUseQSpelling() {
    let rules = TerminologyRuleSet::target_orthography();
    let result = TransformationEngine::new(&rules).apply("Kabbalah und Keter, zerstört.");
    assert_eq!(result.text, "Qabbala und Qeter, gewandelt.");
}

#[test]
fn test_customRuleSet_shouldApplyInDeclarationOrder() {
    let rules = TerminologyRuleSet::new(
        vec![
            TransformationRule::literal("ab", "x"),
            TransformationRule::literal("x", "y"),
        ],
        vec![],
    )
    .unwrap();
    let result = TransformationEngine::new(&rules).apply("ab");

    assert_eq!(result.text, "y");
    assert_eq!(result.changes, vec!["ab → x (1x)".to_string(), "x → y (1x)".to_string()]);
}

#[test]
fn test_extract_shouldCountOccurrencesInOriginal() {
    let rules = TerminologyRuleSet::source_manuscript();
    let terms = KeyTermExtractor::new(rules.glossary()).extract("הספירות והעולמות, הספירות.");

    let names: Vec<&str> = terms.iter().map(|t| t.term.as_str()).collect();
    assert_eq!(names, vec!["ספירות", "עולמות"]);
    assert_eq!(terms[0].count, 2);
    assert_eq!(terms[1].gloss, "Welten");
}

#[test]
fn test_withGlossary_shouldRejectEmptyTerms() {
    let rules = TerminologyRuleSet::source_manuscript();
    assert!(rules.clone().with_glossary(vec![GlossaryEntry::new("", "x")]).is_err());
    assert_eq!(
        rules.with_glossary(vec![GlossaryEntry::new("אור", "Licht")]).unwrap().glossary().len(),
        1
    );
}

#[test]
fn test_targetOrthography_shouldRewriteTermsButNotEverydayNouns() {
    let rules = TerminologyRuleSet::target_orthography();
    let result = TransformationEngine::new(&rules).apply("Die Kelim und die Klipot im Klima der Klinik.");

    assert_eq!(result.text, "Die Qelim und die Qlipot im Klima der Klinik.");
    assert_eq!(
        result.changes,
        vec!["Klipot → Qlipot (1x)".to_string(), "Kelim → Qelim (1x)".to_string()]
    );
}
