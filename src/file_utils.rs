use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::AppError;

// @module: File and directory utilities

/// Extensions treated as manuscript text
const MANUSCRIPT_EXTENSIONS: &[&str] = &["txt", "md"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: Output path next to the input, e.g. `text.analysis.json`
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        suffix: &str,
        extension: &str,
    ) -> PathBuf {
        let stem = input_file.as_ref().file_stem().unwrap_or_default();
        let output_filename = format!("{}.{}.{}", stem.to_string_lossy(), suffix, extension);
        output_dir.as_ref().join(output_filename)
    }

    /// Find files with one of the given extensions below `dir`, sorted by path
    pub fn find_files<P: AsRef<Path>>(dir: P, extensions: &[&str]) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }
            let matches = path.extension().is_some_and(|ext| {
                let ext = ext.to_string_lossy();
                extensions.iter().any(|wanted| ext.eq_ignore_ascii_case(wanted))
            });
            if matches {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Manuscript text files below `dir`, skipping files this tool wrote
    pub fn find_manuscripts<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        Ok(Self::find_files(dir, MANUSCRIPT_EXTENSIONS)?
            .into_iter()
            .filter(|p| {
                !p.file_name()
                    .is_some_and(|name| name.to_string_lossy().contains(".normalized."))
            })
            .collect())
    }

    /// Read a UTF-8 file to a string
    pub async fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        tokio::fs::read_to_string(path.as_ref())
            .await
            .map_err(AppError::from)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file, creating parent directories
    pub async fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        tokio::fs::write(path, content)
            .await
            .map_err(AppError::from)
            .with_context(|| format!("Failed to write to file: {:?}", path))
    }

    /// Deserialize a JSON document
    pub async fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
        let content = Self::read_to_string(path.as_ref()).await?;
        serde_json::from_str(&content)
            .map_err(AppError::from)
            .with_context(|| format!("Failed to parse JSON: {:?}", path.as_ref()))
    }

    /// Serialize a JSON document, pretty-printed
    pub async fn write_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(value)
            .map_err(AppError::from)
            .context("Failed to serialize JSON")?;
        Self::write_to_file(path, &content).await
    }
}
