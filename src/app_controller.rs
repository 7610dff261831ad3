use anyhow::{anyhow, Context, Result};
use futures::future::try_join_all;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::{AppError, ProcessingError};
use crate::file_utils::FileManager;
use crate::manuscript::{AnnotationAssembler, ManuscriptAnalysis};
use crate::terminology::{TerminologyRuleSet, Transformation, TransformationEngine};
use crate::translation::{Batch, StudySchedule, STUDY_DAYS};
use crate::validation::{
    find_zero_values, merge_translations, MergeOutcome, TranslationValidator, ValidationSummary,
};

// @module: Application controller for manuscript processing

/// Outcome of processing a folder of manuscripts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller tying the pipeline stages to files
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Source rule set built once from the configuration
    rules: TerminologyRuleSet,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| AppError::Config(format!("{:#}", e)))
            .context("Configuration validation failed")?;
        let rules = config.rule_set()?;
        Ok(Self { config, rules })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rules(&self) -> &TerminologyRuleSet {
        &self.rules
    }

    fn validator(&self) -> TranslationValidator {
        TranslationValidator::with_policy(self.config.validation.clone())
    }

    /// Segment and annotate text in memory
    pub fn analyze_text(&self, file_name: &str, text: &str) -> Result<ManuscriptAnalysis> {
        let assembler = AnnotationAssembler::new(&self.rules, self.config.chunker()?)
            .with_options(self.config.annotation_options());
        Ok(assembler.analyze(file_name, text)?)
    }

    /// Analyze one manuscript and write `<stem>.analysis.json` into
    /// `output_dir`. Returns `None` when the output exists and
    /// `force_overwrite` is off.
    pub async fn analyze_file(
        &self,
        input_file: &Path,
        output_dir: &Path,
        force_overwrite: bool,
    ) -> Result<Option<PathBuf>> {
        if !input_file.is_file() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = FileManager::generate_output_path(input_file, output_dir, "analysis", "json");
        if output_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, analysis already exists (use -f to force overwrite)", input_file);
            return Ok(None);
        }

        let text = FileManager::read_to_string(input_file).await?;
        let file_name = input_file
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_default();

        // Annotation is CPU-bound; keep it off the async workers
        let rules = self.rules.clone();
        let chunker = self.config.chunker()?;
        let options = self.config.annotation_options();
        let analysis = tokio::task::spawn_blocking(move || {
            AnnotationAssembler::new(&rules, chunker)
                .with_options(options)
                .analyze(&file_name, &text)
        })
        .await
        .context("Annotation task failed")??;

        self.write_document(&output_path, &analysis).await?;
        info!("Analysis written to {:?}", output_path);
        Ok(Some(output_path))
    }

    /// Analyze every manuscript below `input_dir`, writing each analysis
    /// next to its input
    pub async fn analyze_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<FolderSummary> {
        let manuscripts = FileManager::find_manuscripts(input_dir)?;
        if manuscripts.is_empty() {
            return Err(anyhow!("No manuscript files found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(manuscripts.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));

        let mut summary = FolderSummary::default();
        for manuscript in &manuscripts {
            let file_name = manuscript
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Analyzing: {}", file_name));

            let output_dir = manuscript.parent().unwrap_or(input_dir);
            match self.analyze_file(manuscript, output_dir, force_overwrite).await {
                Ok(Some(_)) => summary.processed += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    summary.failed += 1;
                }
            }
            folder_pb.inc(1);
        }
        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed: {} processed, {} skipped, {} errors",
            summary.processed, summary.skipped, summary.failed
        );
        Ok(summary)
    }

    /// Write one `BATCH_nnn.json` per batch into `output_dir`
    pub async fn export_batches(&self, analysis_path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let analysis: ManuscriptAnalysis = FileManager::read_json(analysis_path).await?;
        let batches = self.config.batch_scheduler()?.schedule(&analysis.chunks);
        FileManager::ensure_dir(output_dir)?;

        for batch in &batches {
            self.guard_zero_values(batch)?;
        }

        let writes = batches.iter().map(|batch: &Batch| {
            let path = output_dir.join(format!("{}.json", batch.batch_id()));
            async move {
                FileManager::write_json(&path, batch).await?;
                debug!("Wrote {} ({} chunks)", path.display(), batch.len());
                Ok::<PathBuf, anyhow::Error>(path)
            }
        });
        let paths = try_join_all(writes).await?;

        info!("Exported {} batches to {:?}", paths.len(), output_dir);
        Ok(paths)
    }

    /// Check a translation mapping against an analysis without changing it
    pub async fn validate_translations(
        &self,
        analysis_path: &Path,
        translations_path: &Path,
    ) -> Result<ValidationSummary> {
        let analysis: ManuscriptAnalysis = FileManager::read_json(analysis_path).await?;
        let translations: BTreeMap<String, String> = FileManager::read_json(translations_path).await?;

        let validator = self.validator();
        let summary = validator.validate_all(&analysis.chunks, &translations);
        for report in summary.reports.iter().filter(|r| !r.report.is_valid) {
            warn!("{}: {}", report.id, report.report.issues.join("; "));
        }
        for (id, translation) in &translations {
            for warning in validator.style_warnings(translation) {
                info!("{}: consider '{}' instead of '{}'", id, warning.suggestion, warning.phrase);
            }
        }

        info!("{}", summary.summary());
        Ok(summary)
    }

    /// Merge a translation mapping into an analysis and write the result to
    /// `output_path` (default `<stem>.merged.json` beside the analysis)
    pub async fn merge(
        &self,
        analysis_path: &Path,
        translations_path: &Path,
        output_path: Option<PathBuf>,
    ) -> Result<(PathBuf, MergeOutcome)> {
        let mut analysis: ManuscriptAnalysis = FileManager::read_json(analysis_path).await?;
        let translations: BTreeMap<String, String> = FileManager::read_json(translations_path).await?;

        let outcome = merge_translations(
            &mut analysis.chunks,
            &translations,
            &self.validator(),
            chrono::Utc::now(),
        );

        let output_path = output_path.unwrap_or_else(|| {
            let dir = analysis_path.parent().unwrap_or(Path::new("."));
            FileManager::generate_output_path(analysis_path, dir, "merged", "json")
        });
        self.write_document(&output_path, &analysis).await?;

        info!(
            "Merged {} translations ({} conforming), {}/{} chunks translated",
            outcome.merged,
            outcome.conforming,
            analysis.translated_count(),
            analysis.chunks.len()
        );
        Ok((output_path, outcome))
    }

    /// Apply the target orthography to a translated text file
    pub async fn normalize_file(&self, input_file: &Path, output_path: Option<PathBuf>) -> Result<(PathBuf, Transformation)> {
        let text = FileManager::read_to_string(input_file).await?;
        let orthography = TerminologyRuleSet::target_orthography();
        let result = TransformationEngine::new(&orthography).apply(&text);

        let output_path = output_path.unwrap_or_else(|| {
            let dir = input_file.parent().unwrap_or(Path::new("."));
            let extension = input_file
                .extension()
                .map(|e| e.to_string_lossy().to_string())
                .unwrap_or_else(|| "txt".to_string());
            FileManager::generate_output_path(input_file, dir, "normalized", &extension)
        });
        FileManager::write_to_file(&output_path, &result.text).await?;

        for change in &result.changes {
            debug!("{}", change);
        }
        info!("Normalized {:?}: {} rule(s) applied", input_file, result.changes.len());
        Ok((output_path, result))
    }

    /// Build the 49-day study plan for an analysis
    pub async fn schedule(&self, analysis_path: &Path) -> Result<StudySchedule> {
        let analysis: ManuscriptAnalysis = FileManager::read_json(analysis_path).await?;
        let ids: Vec<_> = analysis.chunks.iter().map(|c| c.id()).collect();
        Ok(StudySchedule::distribute(&ids, STUDY_DAYS)?)
    }

    async fn write_document<T: Serialize>(&self, path: &Path, document: &T) -> Result<()> {
        self.guard_zero_values(document)?;
        FileManager::write_json(path, document).await
    }

    /// Refuse documents containing zero values when the policy asks for it
    fn guard_zero_values<T: Serialize>(&self, document: &T) -> Result<()> {
        if !self.config.validation.reject_zero_values {
            return Ok(());
        }
        let value = serde_json::to_value(document).context("Failed to serialize document")?;
        let zeros = find_zero_values(&value);
        if zeros.is_empty() {
            return Ok(());
        }
        Err(ProcessingError::invalid_parameter(
            "document",
            format!("zero values at {}", zeros.join(", ")),
        )
        .into())
    }
}
