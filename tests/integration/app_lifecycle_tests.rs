/*!
 * Controller over manuscripts on disk
 */

use std::collections::BTreeMap;
use std::fs;

use ezchajim::app_config::Config;
use ezchajim::app_controller::Controller;
use ezchajim::file_utils::FileManager;
use ezchajim::manuscript::ManuscriptAnalysis;
use ezchajim::translation::Batch;

use crate::common;

fn small_chunk_controller() -> Controller {
    let mut config = Config::default();
    config.chunking.max_chunk_chars = 60;
    config.batching.batch_size = 2;
    Controller::with_config(config).unwrap()
}

fn write_translations(dir: &std::path::Path, pairs: &[(&str, &str)]) -> std::path::PathBuf {
    let mapping: BTreeMap<&str, &str> = pairs.iter().copied().collect();
    let path = dir.join("translations.json");
    fs::write(&path, serde_json::to_string_pretty(&mapping).unwrap()).unwrap();
    path
}

#[test]
fn test_analyzeFile_shouldWriteAnalysisJson() {
    common::init_logging();
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_manuscript(temp_dir.path(), "ez_chajim.txt").unwrap();
    let controller = small_chunk_controller();

    let output = tokio_test::block_on(controller.analyze_file(&input, temp_dir.path(), false))
        .unwrap()
        .unwrap();

    assert_eq!(output, temp_dir.path().join("ez_chajim.analysis.json"));
    let analysis: ManuscriptAnalysis = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(analysis.file, "ez_chajim.txt");
    assert_eq!(analysis.chunks.len(), 3);
}

#[test]
fn test_analyzeFile_withExistingOutput_shouldSkipUnlessForced() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_manuscript(temp_dir.path(), "ez_chajim.txt").unwrap();
    let controller = small_chunk_controller();

    tokio_test::block_on(controller.analyze_file(&input, temp_dir.path(), false)).unwrap();
    let skipped = tokio_test::block_on(controller.analyze_file(&input, temp_dir.path(), false)).unwrap();
    let forced = tokio_test::block_on(controller.analyze_file(&input, temp_dir.path(), true)).unwrap();

    assert!(skipped.is_none());
    assert!(forced.is_some());
}

#[test]
fn test_analyzeFile_withMissingInput_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let controller = small_chunk_controller();
    let missing = temp_dir.path().join("missing.txt");
    assert!(tokio_test::block_on(controller.analyze_file(&missing, temp_dir.path(), false)).is_err());
}

#[test]
fn test_analyzeFolder_shouldProcessEveryManuscript() {
    let temp_dir = common::create_temp_dir().unwrap();
    let nested = temp_dir.path().join("band_2");
    fs::create_dir_all(&nested).unwrap();
    common::create_test_manuscript(temp_dir.path(), "band_1.txt").unwrap();
    common::create_test_manuscript(&nested, "band_2.md").unwrap();
    common::create_test_file(temp_dir.path(), "notes.json", "{}").unwrap();
    let controller = small_chunk_controller();

    let summary = tokio_test::block_on(controller.analyze_folder(temp_dir.path(), false)).unwrap();
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.failed, 0);
    assert!(nested.join("band_2.analysis.json").exists());

    let again = tokio_test::block_on(controller.analyze_folder(temp_dir.path(), false)).unwrap();
    assert_eq!(again.skipped, 2);
}

#[test]
fn test_analyzeFolder_withoutManuscripts_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let controller = small_chunk_controller();
    assert!(tokio_test::block_on(controller.analyze_folder(temp_dir.path(), false)).is_err());
}

#[test]
fn test_exportBatches_shouldWriteOneFilePerBatch() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_manuscript(temp_dir.path(), "ez_chajim.txt").unwrap();
    let controller = small_chunk_controller();
    let analysis_path = tokio_test::block_on(controller.analyze_file(&input, temp_dir.path(), false))
        .unwrap()
        .unwrap();
    let batch_dir = temp_dir.path().join("batches");

    let paths = tokio_test::block_on(controller.export_batches(&analysis_path, &batch_dir)).unwrap();

    assert_eq!(paths, vec![batch_dir.join("BATCH_001.json"), batch_dir.join("BATCH_002.json")]);
    let second: Batch = serde_json::from_str(&fs::read_to_string(&paths[1]).unwrap()).unwrap();
    assert_eq!(second.chunk_ids()[0].to_string(), "CHUNK_0003");
}

#[test]
fn test_exportBatches_withZeroGuard_shouldRejectZeroValues() {
    let temp_dir = common::create_temp_dir().unwrap();
    // Latin text has no letter values, so every gematria hint is zero
    let input = common::create_test_file(temp_dir.path(), "latin.txt", "Lorem ipsum dolor sit amet.").unwrap();
    let controller = Controller::with_config(Config::default()).unwrap();
    let analysis_path = tokio_test::block_on(controller.analyze_file(&input, temp_dir.path(), false))
        .unwrap()
        .unwrap();

    let mut config = Config::default();
    config.validation.reject_zero_values = true;
    let guarded = Controller::with_config(config).unwrap();
    let result = tokio_test::block_on(guarded.export_batches(&analysis_path, &temp_dir.path().join("batches")));

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("zero values"));
}

#[test]
fn test_validateTranslations_shouldSummarizeWithoutWriting() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_manuscript(temp_dir.path(), "ez_chajim.txt").unwrap();
    let controller = small_chunk_controller();
    let analysis_path = tokio_test::block_on(controller.analyze_file(&input, temp_dir.path(), false))
        .unwrap()
        .unwrap();
    let before = fs::read_to_string(&analysis_path).unwrap();
    let translations = write_translations(
        temp_dir.path(),
        &[
            ("CHUNK_0001", "Der Baum des Lebens ist für die, die ihn halten."),
            ("CHUNK_9", "Unbekannt."),
        ],
    );

    let summary =
        tokio_test::block_on(controller.validate_translations(&analysis_path, &translations)).unwrap();

    assert_eq!(summary.validated, 1);
    assert_eq!(summary.missing, 2);
    assert_eq!(summary.unknown_ids, vec!["CHUNK_9".to_string()]);
    assert_eq!(fs::read_to_string(&analysis_path).unwrap(), before);
}

#[test]
fn test_merge_shouldWriteMergedDocument() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_manuscript(temp_dir.path(), "ez_chajim.txt").unwrap();
    let controller = small_chunk_controller();
    let analysis_path = tokio_test::block_on(controller.analyze_file(&input, temp_dir.path(), false))
        .unwrap()
        .unwrap();
    let translations = write_translations(
        temp_dir.path(),
        &[("CHUNK_0002", "Die Sefirot sind zehn und nicht neun, zehn und nicht elf.")],
    );

    let (output, outcome) =
        tokio_test::block_on(controller.merge(&analysis_path, &translations, None)).unwrap();

    assert_eq!(output, temp_dir.path().join("ez_chajim.analysis.merged.json"));
    assert_eq!(outcome.merged, 1);
    let merged: ManuscriptAnalysis = tokio_test::block_on(FileManager::read_json(&output)).unwrap();
    assert_eq!(merged.translated_count(), 1);
    assert!(merged.chunks[1].is_translated());
    assert!(!merged.chunks[0].is_translated());
}

#[test]
fn test_normalizeFile_shouldApplyTargetOrthography() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(
        temp_dir.path(),
        "uebersetzung.txt",
        "Die Kabbalah lehrt, dass die Welten nicht zerstört werden.",
    )
    .unwrap();
    let controller = small_chunk_controller();

    let (output, result) = tokio_test::block_on(controller.normalize_file(&input, None)).unwrap();

    assert_eq!(output, temp_dir.path().join("uebersetzung.normalized.txt"));
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "Die Qabbala lehrt, dass die Welten nicht gewandelt werden."
    );
    assert_eq!(result.changes.len(), 2);
}

#[test]
fn test_schedule_shouldSpreadChunksOverFortyNineDays() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_manuscript(temp_dir.path(), "ez_chajim.txt").unwrap();
    let controller = small_chunk_controller();
    let analysis_path = tokio_test::block_on(controller.analyze_file(&input, temp_dir.path(), false))
        .unwrap()
        .unwrap();

    let schedule = tokio_test::block_on(controller.schedule(&analysis_path)).unwrap();

    assert_eq!(schedule.days().len(), 49);
    assert_eq!(schedule.chunks_for(3).unwrap()[0].to_string(), "CHUNK_0003");
    assert!(schedule.chunks_for(4).unwrap().is_empty());
}
