//! Structuring engine for administrative decision documents.
//!
//! Page text goes in, a [`ParsedDocument`] comes out: case metadata, the
//! 主文/事實/理由 sections and an outline tree rebuilt from the numbering
//! of the reasoning section.

pub mod casenum;
pub mod classify;
pub mod config;
pub mod document;
pub mod emit;
pub mod extract;
pub mod merge;
pub mod metadata;
pub mod outline;
pub mod sections;
pub mod tables;

pub use casenum::{sequence_gaps, CaseKind, CaseNumber};
pub use classify::line_level;
pub use config::{default_config, load_config, validate_config, ConfigError, ParserConfig, RunConfig};
pub use document::{file_name_of, page_lines, DecisionParser, ParseFailure, ParseOutcome, ParsedDocument, SectionText};
pub use emit::{emit_record, sha256_hex, EmitError, EmitPaths};
pub use extract::{check_deps, enumerate_inputs, DepsResult, EnumerateError, ExtractError, JsonPagesExtractor, Page, PageExtractor, PopplerExtractor};
pub use merge::{clean_page, is_footer_line, merge_paragraphs};
pub use metadata::{extract_metadata, Metadata};
pub use outline::{build_outline, render_outline, OutlineBuilder, OutlineNode};
pub use sections::{extract_sections, Sections};
pub use tables::{normalize_header, normalize_tables, roster_from_pages, split_values, FieldValue, RosterEntry, TableRecord};
