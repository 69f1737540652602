//! Recursive, boundary-aware text splitting.
//!
//! Text is split on the first separator that occurs in it, each separator
//! staying attached to the start of the piece that follows. Pieces still too
//! long are split again with the remaining separators; small pieces are merged
//! back together into chunks of at most `chunk_size` characters, with about
//! `chunk_overlap` characters carried over between neighbors.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Configuration for the splitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    /// Maximum chunk length in characters.
    pub chunk_size: usize,

    /// Characters shared between consecutive chunks.
    pub chunk_overlap: usize,

    /// Separators in priority order. An empty string splits into characters.
    pub separators: Vec<String>,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 50,
            separators: ["\n\n", "\n", " ", ""]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl SplitterConfig {
    /// Set the chunk size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the overlap.
    pub fn with_chunk_overlap(mut self, chunk_overlap: usize) -> Self {
        self.chunk_overlap = chunk_overlap;
        self
    }
}

/// Splits documents into overlapping chunks.
#[derive(Debug, Clone, Default)]
pub struct RecursiveCharacterSplitter {
    config: SplitterConfig,
}

impl RecursiveCharacterSplitter {
    /// Create a splitter with the default 500/50 configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a splitter with custom configuration.
    pub fn with_config(config: SplitterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }

    /// Split `text` into trimmed, non-empty chunks.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        let separators: Vec<&str> = self.config.separators.iter().map(String::as_str).collect();
        let mut chunks = Vec::new();
        self.split_recursive(text, &separators, &mut chunks);
        chunks
    }

    fn split_recursive(&self, text: &str, separators: &[&str], chunks: &mut Vec<String>) {
        // Pick the first separator present in the text; "" always matches.
        let mut separator = separators.last().copied().unwrap_or("");
        let mut remaining: &[&str] = &[];
        for (i, &candidate) in separators.iter().enumerate() {
            if candidate.is_empty() {
                separator = candidate;
                remaining = &[];
                break;
            }
            if text.contains(candidate) {
                separator = candidate;
                remaining = &separators[i + 1..];
                break;
            }
        }

        let mut good: Vec<&str> = Vec::new();
        for piece in split_keep_separator(text, separator) {
            if char_len(piece) < self.config.chunk_size {
                good.push(piece);
                continue;
            }

            if !good.is_empty() {
                self.merge_splits(&good, chunks);
                good.clear();
            }
            if remaining.is_empty() {
                push_trimmed(piece, chunks);
            } else {
                self.split_recursive(piece, remaining, chunks);
            }
        }

        if !good.is_empty() {
            self.merge_splits(&good, chunks);
        }
    }

    fn merge_splits(&self, pieces: &[&str], chunks: &mut Vec<String>) {
        let chunk_size = self.config.chunk_size;
        let overlap = self.config.chunk_overlap;

        let mut current: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;

        for piece in pieces {
            let len = char_len(piece);
            if total + len > chunk_size {
                if total > chunk_size {
                    warn!("Created a chunk of size {total}, which is longer than {chunk_size}");
                }
                if !current.is_empty() {
                    push_trimmed(&current.iter().copied().collect::<String>(), chunks);
                    while total > overlap || (total + len > chunk_size && total > 0) {
                        match current.pop_front() {
                            Some(front) => total -= char_len(front),
                            None => break,
                        }
                    }
                }
            }
            current.push_back(piece);
            total += len;
        }

        if !current.is_empty() {
            push_trimmed(&current.iter().copied().collect::<String>(), chunks);
        }
    }
}

/// Split on `separator`, keeping it at the start of each following piece.
fn split_keep_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return text
            .char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect();
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    for (index, _) in text.match_indices(separator) {
        if index > start {
            pieces.push(&text[start..index]);
        }
        start = index;
    }
    if start < text.len() {
        pieces.push(&text[start..]);
    }
    pieces
}

fn push_trimmed(text: &str, chunks: &mut Vec<String>) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
