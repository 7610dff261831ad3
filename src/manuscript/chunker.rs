/*!
 * Sentence-respecting segmentation of manuscript text.
 */

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ProcessingError;

/// Default maximum chunk size in characters
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 500;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// A sentence terminator followed by whitespace
static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?:]\s+").unwrap());

/// Splits text into units of at most `max_chars` characters.
///
/// Units end only after a sentence terminator. A single sentence longer than
/// the limit becomes its own oversized unit.
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    max_chars: usize,
}

impl Chunker {
    pub fn new(max_chars: usize) -> Result<Self, ProcessingError> {
        if max_chars == 0 {
            return Err(ProcessingError::invalid_parameter(
                "max_chunk_chars",
                "must be greater than zero",
            ));
        }
        Ok(Self { max_chars })
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Trim and collapse every whitespace run to one space
    pub fn normalize(text: &str) -> String {
        WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
    }

    /// Sentences of already-normalized text, each keeping its terminator and
    /// the space after it
    pub fn sentences(normalized: &str) -> Vec<&str> {
        let mut pieces = Vec::new();
        let mut start = 0;
        for separator in SENTENCE_BREAK.find_iter(normalized) {
            pieces.push(&normalized[start..separator.end()]);
            start = separator.end();
        }
        if start < normalized.len() {
            pieces.push(&normalized[start..]);
        }
        pieces
    }

    /// Segment `text`. Joining the result with single spaces gives back the
    /// normalized text.
    pub fn split(&self, text: &str) -> Vec<String> {
        let normalized = Self::normalize(text);
        let mut units = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        for piece in Self::sentences(&normalized) {
            let piece_len = piece.chars().count();
            if current_len + piece_len > self.max_chars {
                if !current.is_empty() {
                    units.push(current.trim().to_string());
                }
                if piece_len > self.max_chars {
                    warn!(
                        "Sentence of {} chars exceeds the {} char limit, keeping it as its own chunk",
                        piece_len, self.max_chars
                    );
                }
                current = piece.to_string();
                current_len = piece_len;
            } else {
                current.push_str(piece);
                current_len += piece_len;
            }
        }

        if !current.is_empty() {
            units.push(current.trim().to_string());
        }

        debug!("Split {} chars into {} chunks", normalized.chars().count(), units.len());
        units
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHUNK_CHARS,
        }
    }
}
