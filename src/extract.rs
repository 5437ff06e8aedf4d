use std::path::{Path, PathBuf};
use std::process::Command;

use globwalk::GlobWalkerBuilder;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Text and raw table grids of one page, as handed over by an extractor.
/// A `null` text or cell reads as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
    #[serde(default, deserialize_with = "grids_with_null_cells")]
    pub tables: Vec<Vec<Vec<String>>>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn grids_with_null_cells<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Vec<Vec<String>>>, D::Error> {
    let grids: Option<Vec<Vec<Vec<Option<String>>>>> = Option::deserialize(d)?;
    Ok(grids
        .unwrap_or_default()
        .into_iter()
        .map(|grid| {
            grid.into_iter()
                .map(|row| row.into_iter().map(Option::unwrap_or_default).collect())
                .collect()
        })
        .collect())
}

impl Page {
    pub fn from_text(text: impl Into<String>) -> Self {
        Page { text: text.into(), tables: Vec::new() }
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("FileNotFound: {0}")]
    FileNotFound(String),
    #[error("EncryptedPDF: {0}")]
    EncryptedPdf(String),
    #[error("DecodeError: {0}")]
    Decode(String),
    #[error("ExtractError: {0}")]
    Other(String),
}

/// Source of per-page text and tables for one document.
pub trait PageExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<Page>, ExtractError>;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DepsResult {
    pub ok: bool,
    pub missing: Vec<String>,
}

/// Check the Poppler tools used for PDF input.
/// - Required: pdftotext
/// - Optional: pdfinfo (page count, enables per-page extraction)
pub fn check_deps() -> DepsResult {
    let mut missing = Vec::new();

    let has_pdftotext = which::which("pdftotext").is_ok();
    if !has_pdftotext {
        missing.push("pdftotext".to_string());
    }
    if which::which("pdfinfo").is_err() {
        missing.push("pdfinfo".to_string());
    }

    DepsResult { ok: has_pdftotext, missing }
}

#[derive(Debug, Error)]
pub enum EnumerateError {
    #[error("NoFilesFound")]
    NoFilesFound { guidance: String },
}

/// Enumerate input documents using a glob pattern (e.g. "./input/**/*.pdf").
/// Returns a sorted list of paths.
pub fn enumerate_inputs(glob_pattern: &str) -> Result<Vec<PathBuf>, EnumerateError> {
    let root = if Path::new(glob_pattern).is_absolute() { "/" } else { "." };
    let pat = glob_pattern.strip_prefix("./").unwrap_or(glob_pattern);
    let mut paths: Vec<PathBuf> = GlobWalkerBuilder::from_patterns(root, &[pat])
        .case_insensitive(true)
        .follow_links(false)
        .build()
        .map_err(|_| EnumerateError::NoFilesFound { guidance: folder_guidance(glob_pattern) })?
        .filter_map(|e| e.ok())
        .map(|e| e.path().to_path_buf())
        .filter(|p| p.is_file())
        .collect();

    paths.sort();

    if paths.is_empty() {
        return Err(EnumerateError::NoFilesFound { guidance: folder_guidance(glob_pattern) });
    }
    Ok(paths)
}

fn folder_guidance(pattern: &str) -> String {
    format!(
        "No documents match {}\n\
         Place decision PDFs (or *.pages.json page dumps) under ./input/, e.g.\n  \
         ./input/促轉司字第1號.pdf\n  \
         ./input/促轉復查字第3號.pages.json",
        pattern
    )
}

fn is_encryption_error(stderr: &[u8]) -> bool {
    let err = String::from_utf8_lossy(stderr).to_lowercase();
    err.contains("encrypt") || err.contains("password")
}

/// Page text through Poppler's `pdftotext`. Yields no tables.
#[derive(Debug, Clone, Default)]
pub struct PopplerExtractor {
    pub layout: bool,
}

impl PopplerExtractor {
    pub fn new(layout: bool) -> Self {
        PopplerExtractor { layout }
    }

    fn page_count(&self, path: &Path) -> Result<Option<usize>, ExtractError> {
        if which::which("pdfinfo").is_err() {
            return Ok(None);
        }
        let out = match Command::new("pdfinfo").arg(path).output() {
            Ok(out) => out,
            Err(_) => return Ok(None),
        };
        if !out.status.success() {
            if is_encryption_error(&out.stderr) {
                return Err(ExtractError::EncryptedPdf(path.display().to_string()));
            }
            return Ok(None);
        }
        let s = String::from_utf8_lossy(&out.stdout);
        Ok(s.lines()
            .find_map(|line| line.strip_prefix("Pages:"))
            .and_then(|rest| rest.trim().parse::<usize>().ok()))
    }

    fn run_pdftotext(&self, path: &Path, page: Option<usize>) -> Result<String, ExtractError> {
        let mut cmd = Command::new("pdftotext");
        if self.layout {
            cmd.arg("-layout");
        }
        cmd.arg("-q").arg("-enc").arg("UTF-8");
        if let Some(i) = page {
            cmd.arg("-nopgbrk");
            cmd.arg("-f").arg(i.to_string());
            cmd.arg("-l").arg(i.to_string());
        }
        cmd.arg(path);
        cmd.arg("-"); // write to stdout

        let out = cmd.output().map_err(|e| ExtractError::Other(e.to_string()))?;
        if !out.status.success() {
            if is_encryption_error(&out.stderr) {
                return Err(ExtractError::EncryptedPdf(path.display().to_string()));
            }
            return Err(match page {
                Some(i) => ExtractError::Other(format!("pdftotext failed on page {}", i)),
                None => ExtractError::Other("pdftotext failed".into()),
            });
        }
        String::from_utf8(out.stdout).map_err(|e| ExtractError::Decode(e.to_string()))
    }
}

impl PageExtractor for PopplerExtractor {
    /// Per-page extraction when pdfinfo reports a page count; otherwise a
    /// single pass split on form feeds.
    fn extract(&self, path: &Path) -> Result<Vec<Page>, ExtractError> {
        if !path.exists() {
            return Err(ExtractError::FileNotFound(path.display().to_string()));
        }

        if let Some(n_pages) = self.page_count(path)? {
            let mut pages = Vec::with_capacity(n_pages);
            for i in 1..=n_pages {
                pages.push(Page::from_text(self.run_pdftotext(path, Some(i))?));
            }
            return Ok(pages);
        }

        let s = self.run_pdftotext(path, None)?;
        let mut pages: Vec<Page> = s.split('\u{000C}').map(Page::from_text).collect();
        // drop trailing empty page if any
        while matches!(pages.last(), Some(last) if last.text.trim().is_empty()) {
            pages.pop();
        }
        Ok(pages)
    }
}

#[derive(Deserialize)]
struct WrappedPages {
    pages: Vec<Page>,
}

/// Pages dumped by an external extractor as a JSON array (optionally under a
/// `"pages"` key) of `{ "text": ..., "tables": [[[cell, ...], ...], ...] }`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPagesExtractor;

impl PageExtractor for JsonPagesExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<Page>, ExtractError> {
        let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ExtractError::FileNotFound(path.display().to_string()),
            _ => ExtractError::Other(e.to_string()),
        })?;
        let pages = if raw.trim_start().starts_with('{') {
            serde_json::from_str::<WrappedPages>(&raw).map(|w| w.pages)
        } else {
            serde_json::from_str::<Vec<Page>>(&raw)
        };
        pages.map_err(|e| ExtractError::Decode(e.to_string()))
    }
}
