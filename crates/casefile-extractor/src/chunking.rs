//! Splitting input documents into units
//!
//! Chunk modes cut the text into fixed-width character slices. Pages mode
//! looks for blocks delimited by `=== START OF PAGE <n> ON PDF <name> ===` and
//! the matching `=== END OF PAGE <n> ON PDF <name> ===` marker.

use crate::config::InputMode;
use casefile_domain::Unit;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, warn};

static PAGE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"=== START OF PAGE (\d+) ON PDF (.+?) ===").expect("valid page start regex")
});

/// Split `text` into units according to `mode`
pub fn split_units(mode: InputMode, text: &str, max_chunk_size: usize) -> Vec<Unit> {
    match mode {
        InputMode::Html | InputMode::Text => TextChunker::new(max_chunk_size).chunk(text),
        InputMode::Pages => PageSplitter.split(text),
    }
}

/// Fixed-width character chunker
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    max_chunk_size: usize,
}

impl TextChunker {
    /// Create a new text chunker; a size of 0 is treated as 1
    pub fn new(max_chunk_size: usize) -> Self {
        Self {
            max_chunk_size: max_chunk_size.max(1),
        }
    }

    /// Cut `text` into slices of at most `max_chunk_size` characters
    ///
    /// Boundaries always fall between characters, never inside a UTF-8
    /// sequence. Empty input yields no units.
    pub fn chunk(&self, text: &str) -> Vec<Unit> {
        let mut units = Vec::new();
        let mut start = 0;
        let mut count = 0;

        for (offset, _) in text.char_indices() {
            if count == self.max_chunk_size {
                units.push(Unit::chunk(units.len(), &text[start..offset]));
                start = offset;
                count = 0;
            }
            count += 1;
        }

        if start < text.len() {
            units.push(Unit::chunk(units.len(), &text[start..]));
        }

        debug!(chunks = units.len(), max_chunk_size = self.max_chunk_size, "Chunked input");
        units
    }
}

/// Splitter for page-delimited OCR output
#[derive(Debug, Clone, Copy, Default)]
pub struct PageSplitter;

impl PageSplitter {
    /// Extract every well-formed page block, in document order
    ///
    /// The unit text is the whole block, markers included. A start marker
    /// whose end marker never appears is skipped. Repeated page numbers are
    /// kept.
    pub fn split(&self, text: &str) -> Vec<Unit> {
        let mut units = Vec::new();
        let mut seen = HashSet::new();
        let mut pos = 0;

        while let Some(caps) = PAGE_START.captures_at(text, pos) {
            let Some(start) = caps.get(0) else { break };
            let number = &caps[1];
            let name = &caps[2];
            let end_marker = format!("=== END OF PAGE {} ON PDF {} ===", number, name);

            let Some(offset) = text[start.end()..].find(&end_marker) else {
                warn!(page = number, pdf = name, "Page start marker has no matching end marker, skipping");
                pos = start.end();
                continue;
            };
            let block_end = start.end() + offset + end_marker.len();

            match number.parse::<usize>() {
                Ok(page) => {
                    if !seen.insert(page) {
                        warn!(page, pdf = name, "Duplicate page number in input");
                    }
                    units.push(Unit::page(page, &text[start.start()..block_end]));
                }
                Err(e) => warn!(page = number, error = %e, "Unusable page number, skipping"),
            }
            pos = block_end;
        }

        debug!(pages = units.len(), "Split input into pages");
        units
    }
}
