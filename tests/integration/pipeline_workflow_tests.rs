/*!
 * End-to-end pipeline over in-memory text
 */

use chrono::Utc;
use std::collections::BTreeMap;

use ezchajim::app_config::Config;
use ezchajim::app_controller::Controller;
use ezchajim::manuscript::{ChunkId, ManuscriptAnalysis};
use ezchajim::validation::merge_translations;

use crate::common;

fn controller(max_chunk_chars: usize, batch_size: usize) -> Controller {
    let mut config = Config::default();
    config.chunking.max_chunk_chars = max_chunk_chars;
    config.batching.batch_size = batch_size;
    Controller::with_config(config).unwrap()
}

fn translations() -> BTreeMap<String, String> {
    [
        ("CHUNK_0001", "Der Baum des Lebens ist für die, die ihn halten."),
        ("CHUNK_0002", "Die Sefirot sind zehn und nicht neun, zehn und nicht elf."),
        ("CHUNK_0003", "Die Kawana beim Studium der Kabbala ist Anhaftung an den Namen."),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[test]
fn test_analyze_withSampleManuscript_shouldAnnotateThreeChunks() {
    common::init_logging();
    let analysis = controller(60, 10)
        .analyze_text("sample.txt", common::SAMPLE_MANUSCRIPT)
        .unwrap();

    assert_eq!(analysis.chunks.len(), 3);
    assert_eq!(analysis.chunks[0].key_terms()[0].term, "עץ חיים");
    assert_eq!(analysis.chunks[0].key_terms()[0].weight, 228);
    assert_eq!(analysis.chunks[1].key_terms()[0].term, "ספירות");
    assert_eq!(
        analysis.chunks[2].transformed(),
        "הקוונה בלימוד הקבלה היא דבקות בשם."
    );
    assert_eq!(
        analysis.chunks[2].metadata().changes,
        vec!["כבלה → קבלה (1x)".to_string(), "כוונה → קוונה (1x)".to_string()]
    );
    // The original keeps the unnormalized spelling
    assert!(analysis.chunks[2].original().contains("הכבלה"));
}

#[test]
fn test_analysisJson_shouldUseExportFieldNames() {
    let analysis = controller(60, 10)
        .analyze_text("sample.txt", common::SAMPLE_MANUSCRIPT)
        .unwrap();
    let json = serde_json::to_value(&analysis).unwrap();

    assert_eq!(json["file"], "sample.txt");
    assert_eq!(json["analysis"]["total_chunks"], 3);
    assert_eq!(json["chunks"][0]["id"], "CHUNK_0001");
    assert_eq!(json["chunks"][0]["metadata"]["key_terms"][0]["hebrew"], "עץ חיים");
    assert_eq!(json["chunks"][0]["metadata"]["key_terms"][0]["translation"], "Baum des Lebens");
    assert!(json["chunks"][2]["metadata"]["wwaq_changes"].is_array());
    assert!(json["chunks"][0].get("translation").is_none());

    let reparsed: ManuscriptAnalysis = serde_json::from_value(json).unwrap();
    assert_eq!(reparsed, analysis);
}

#[test]
fn test_batches_shouldCarryTransformedText() {
    let controller = controller(60, 2);
    let analysis = controller
        .analyze_text("sample.txt", common::SAMPLE_MANUSCRIPT)
        .unwrap();
    let batches = controller.config().batch_scheduler().unwrap().schedule(&analysis.chunks);

    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].batch_id(), "BATCH_001");
    assert_eq!(batches[1].len(), 1);
    assert_eq!(batches[1].items()[0].text, "הקוונה בלימוד הקבלה היא דבקות בשם.");
    assert_eq!(batches[0].items()[0].gematria_hint, analysis.chunks[0].gematria().standard);
}

#[test]
fn test_validateAll_shouldFlagBannedSpellings() {
    let controller = controller(60, 10);
    let analysis = controller
        .analyze_text("sample.txt", common::SAMPLE_MANUSCRIPT)
        .unwrap();
    let validator = ezchajim::validation::TranslationValidator::with_policy(
        controller.config().validation.clone(),
    );

    let summary = validator.validate_all(&analysis.chunks, &translations());

    assert_eq!(summary.validated, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.missing, 0);
    let failed = &summary.reports[2];
    assert!(!failed.report.checks.wwaq_conform);
    assert!(failed.report.checks.reasonable_length);

    let corrected = validator.suggest_corrections(&translations()["CHUNK_0003"]);
    assert_eq!(
        corrected.text,
        "Die Qawana beim Studium der Qabbala ist Anhaftung an den Namen."
    );
    assert!(validator.validate(&analysis.chunks[2], &corrected.text).is_valid);
}

#[test]
fn test_merge_shouldRecordConformanceAndKeepCounts() {
    let controller = controller(60, 10);
    let mut analysis = controller
        .analyze_text("sample.txt", common::SAMPLE_MANUSCRIPT)
        .unwrap();
    let validator = ezchajim::validation::TranslationValidator::new();

    let mut mapping = translations();
    mapping.insert("CHUNK_0042".to_string(), "Niemand".to_string());
    let outcome = merge_translations(&mut analysis.chunks, &mapping, &validator, Utc::now());

    assert_eq!(outcome.merged, 3);
    assert_eq!(outcome.conforming, 2);
    assert_eq!(outcome.unknown_ids, vec!["CHUNK_0042".to_string()]);
    assert_eq!(analysis.translated_count(), 3);
    assert!(analysis.chunks[0].translation_metadata().unwrap().validated);
    assert!(!analysis.chunks[2].translation_metadata().unwrap().validated);
    let second = analysis.chunk(ChunkId::new(2).unwrap()).unwrap();
    assert_eq!(second.translation(), Some(translations()["CHUNK_0002"].as_str()));

    let json = serde_json::to_value(&analysis).unwrap();
    assert_eq!(json["chunks"][0]["translation_metadata"]["translated"], true);
}
