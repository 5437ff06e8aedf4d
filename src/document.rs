use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ParserConfig;
use crate::extract::{ExtractError, Page, PageExtractor};
use crate::merge::{clean_page, merge_paragraphs};
use crate::metadata::{extract_metadata, Metadata};
use crate::outline::{build_outline, OutlineNode};
use crate::sections::extract_sections;
use crate::tables::{normalize_tables, roster_from_pages, RosterEntry, TableRecord};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionText {
    pub full_text: String,
    pub main_text: String,
    pub facts: String,
    pub reasoning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedDocument {
    pub filename: String,
    pub metadata: Metadata,
    pub content: SectionText,
    pub structured_reasoning: Vec<OutlineNode>,
    pub tables: Vec<TableRecord>,
    /// Cleaned page lines fed to the merger.
    #[serde(skip)]
    pub source_lines: Vec<String>,
    /// Roster rows, written to their own record.
    #[serde(skip)]
    pub roster: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseFailure {
    pub filename: String,
    pub error: String,
}

/// Result of parsing one document. Serializes as either the full record or
/// `{ "filename", "error" }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ParseOutcome {
    Parsed(ParsedDocument),
    Failed(ParseFailure),
}

impl ParseOutcome {
    pub fn failed(filename: &str, err: &ExtractError) -> Self {
        ParseOutcome::Failed(ParseFailure {
            filename: filename.to_string(),
            error: format!("PDF parsing failed: {}", err),
        })
    }

    pub fn filename(&self) -> &str {
        match self {
            ParseOutcome::Parsed(doc) => &doc.filename,
            ParseOutcome::Failed(f) => &f.filename,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ParseOutcome::Failed(_))
    }
}

/// Base name of a document path.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Cleaned lines of all pages in order.
pub fn page_lines(pages: &[Page]) -> Vec<String> {
    pages.iter().flat_map(|p| clean_page(&p.text)).collect()
}

#[derive(Debug, Clone, Default)]
pub struct DecisionParser {
    config: ParserConfig,
}

impl DecisionParser {
    pub fn new(config: ParserConfig) -> Self {
        DecisionParser { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Extract and structure one document. Extractor failures come back as
    /// a `Failed` outcome; nothing else can fail.
    pub fn parse(&self, path: &Path, extractor: &dyn PageExtractor) -> ParseOutcome {
        let filename = file_name_of(path);
        match extractor.extract(path) {
            Ok(pages) => ParseOutcome::Parsed(self.parse_pages(&filename, &pages)),
            Err(err) => ParseOutcome::failed(&filename, &err),
        }
    }

    /// Structure already extracted pages.
    pub fn parse_pages(&self, filename: &str, pages: &[Page]) -> ParsedDocument {
        let source_lines = page_lines(pages);
        let paragraphs = merge_paragraphs(&source_lines);
        let full_text = paragraphs.join("\n");

        let metadata = extract_metadata(&full_text, self.config.date_window);
        let sections = extract_sections(&full_text, &self.config.issuer);
        let structured_reasoning = build_outline(&sections.reasoning);

        ParsedDocument {
            filename: filename.to_string(),
            metadata,
            content: SectionText {
                full_text,
                main_text: sections.main_text,
                facts: sections.facts,
                reasoning: sections.reasoning,
            },
            structured_reasoning,
            tables: normalize_tables(pages),
            source_lines,
            roster: self.roster(filename, pages),
        }
    }

    /// Roster rows of the document's tables, empty when disabled. A file
    /// named 只有第二種 lists only the second category.
    pub fn roster(&self, filename: &str, pages: &[Page]) -> Vec<RosterEntry> {
        if !self.config.roster {
            return Vec::new();
        }
        let default_category = filename.contains("只有第二種").then_some(2);
        roster_from_pages(filename, pages, default_category)
    }
}
