//! Response parsing: splits raw model text into a clean answer body and the
//! structured source citations carried in fenced `metadata` blocks.
//!
//! The upstream QA service gives no guarantee the blocks are well formed;
//! everything here degrades to "fewer fields" rather than an error.

pub mod humanize;

pub use humanize::humanize_filename;

use crate::model::Source;
use lazy_static::lazy_static;
use regex::Regex;

/// Placeholder filename the original metadata emitters fall back to; sources
/// carrying it are dropped rather than surfaced as citations.
const UNKNOWN_DOCUMENT: &str = "Unknown Document";

lazy_static! {
    static ref METADATA_BLOCK: Regex = Regex::new(r"(?s)```metadata\s+(.+?)```").unwrap();
    /// Known field keys; `document_id` aliases `filename`, `page_number`
    /// aliases `page_num`. Values run until the next known key on the line.
    static ref FIELD_KEY: Regex = Regex::new(
        r"(?i)\b(filename|document_id|human_readable|page_num|page_number|sheet_number|section)\s*:"
    )
    .unwrap();
    static ref EXCESS_NEWLINES: Regex = Regex::new(r"\n{3,}").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub clean_response: String,
    pub sources: Vec<Source>,
}

/// Extract all `metadata` blocks from `response`, returning the cleaned text
/// and the sources that had a usable filename.
///
/// Parsing text with no blocks returns the trimmed input and no sources.
pub fn parse_sources(response: &str) -> ParsedResponse {
    let mut sources = Vec::new();

    for block in METADATA_BLOCK.captures_iter(response) {
        let fields = BlockFields::scan(&block[1]);

        let filename = match fields.filename {
            Some(f) if !f.is_empty() && f != UNKNOWN_DOCUMENT => f,
            _ => continue,
        };
        let human_readable = fields
            .human_readable
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| humanize_filename(&filename));

        sources.push(Source {
            filename,
            human_readable,
            page_num: fields.page_num,
            sheet_number: fields.sheet_number,
            section: fields.section.unwrap_or_default(),
        });
    }

    let without_blocks = METADATA_BLOCK.replace_all(response, "");
    let clean_response = EXCESS_NEWLINES
        .replace_all(&without_blocks, "\n\n")
        .trim()
        .to_string();

    ParsedResponse {
        clean_response,
        sources,
    }
}

#[derive(Default)]
struct BlockFields {
    filename: Option<String>,
    human_readable: Option<String>,
    page_num: u32,
    sheet_number: u32,
    section: Option<String>,
}

impl BlockFields {
    /// Line-oriented scan; within a line, a value ends where the next known
    /// key begins (blocks may pack all keys onto one line or use one per
    /// line). First occurrence of each field wins.
    fn scan(block: &str) -> Self {
        let mut fields = Self::default();
        for line in block.lines() {
            let matches: Vec<_> = FIELD_KEY.find_iter(line).collect();
            for (i, m) in matches.iter().enumerate() {
                let value_start = m.end();
                let value_end = matches.get(i + 1).map_or(line.len(), |next| next.start());
                let value = line[value_start..value_end].trim();
                let key = line[m.start()..m.end()]
                    .trim_end_matches(':')
                    .trim()
                    .to_lowercase();
                fields.set(&key, value);
            }
        }
        fields
    }

    fn set(&mut self, key: &str, value: &str) {
        match key {
            "filename" | "document_id" => {
                if self.filename.is_none() {
                    self.filename = Some(value.to_string());
                }
            }
            "human_readable" => {
                if self.human_readable.is_none() {
                    self.human_readable = Some(value.to_string());
                }
            }
            "page_num" | "page_number" => {
                if self.page_num == 0 {
                    self.page_num = parse_u32_or_zero(value);
                }
            }
            "sheet_number" => {
                if self.sheet_number == 0 {
                    self.sheet_number = parse_u32_or_zero(value);
                }
            }
            "section" => {
                if self.section.is_none() {
                    self.section = Some(value.to_string());
                }
            }
            _ => {}
        }
    }
}

/// Numeric fields that fail to parse default to 0 ("absent").
fn parse_u32_or_zero(value: &str) -> u32 {
    value
        .split_whitespace()
        .next()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
