use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extract::Page;

/// A table grid found on a page (1-based page number).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableRecord {
    pub page: usize,
    pub data: Vec<Vec<String>>,
}

fn clean_cell(cell: &str) -> String {
    cell.trim().replace('\n', "")
}

/// Trim every cell and drop embedded newlines, keeping page numbers.
pub fn normalize_tables(pages: &[Page]) -> Vec<TableRecord> {
    let mut out = Vec::new();
    for (idx, page) in pages.iter().enumerate() {
        for grid in &page.tables {
            let data: Vec<Vec<String>> = grid.iter().map(|row| row.iter().map(|c| clean_cell(c)).collect()).collect();
            out.push(TableRecord { page: idx + 1, data });
        }
    }
    out
}

// Header substring -> field. Checked in order, first hit wins.
const HEADER_MAP: [(&str, &str); 19] = [
    ("序號", "id"),
    ("姓名", "name"),
    ("裁判機關", "court"),
    ("原裁判機關", "court"),
    ("裁判法院", "court"),
    ("原裁判法院", "court"),
    ("審判機關", "court"),
    ("機關", "court"),
    ("裁判字號", "case_id"),
    ("原裁判字號", "case_id"),
    ("裁判案由", "crime"),
    ("原裁判案由", "crime"),
    ("罪名", "crime"),
    ("判決", "sentence"),
    ("刑期", "sentence"),
    ("原裁判刑度", "sentence"),
    ("補償內容", "compensation"),
    ("撤銷之內容", "revocation_content"),
    ("備註", "note"),
];

const MULTI_VALUED: [&str; 4] = ["crime", "sentence", "case_id", "court"];

static RE_SLASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"[／/]\s*[,，]?\s*").unwrap());
static RE_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[、，,；;\n]+").unwrap());

/// Map header cells onto canonical field names.
pub fn normalize_header<S: AsRef<str>>(header: &[S]) -> Vec<String> {
    header
        .iter()
        .map(|h| {
            let h = clean_cell(h.as_ref());
            HEADER_MAP
                .iter()
                .find(|(key, _)| h.contains(key))
                .map(|(_, field)| field.to_string())
                .unwrap_or(h)
        })
        .collect()
}

/// Split a multi-valued cell such as "詐欺／,竊盜、強盜" into its parts.
pub fn split_values(text: &str) -> Vec<String> {
    let unified = RE_SLASH.replace_all(text, ";");
    RE_SEPARATORS
        .split(&unified)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| p.to_string())
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multi(Vec<String>),
}

/// One person listed in a roster table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterEntry {
    pub source: String,
    pub category: u8,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl RosterEntry {
    pub fn name(&self) -> Option<&str> {
        match self.fields.get("name") {
            Some(FieldValue::Single(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

fn page_category(text: &str) -> Option<u8> {
    if text.contains("公告名冊（一）") {
        Some(1)
    } else if text.contains("公告名冊（二）") || text.contains("公告名冊(二)") {
        Some(2)
    } else {
        None
    }
}

fn is_header_row(row: &[String]) -> bool {
    let joined: String = row.concat();
    joined.contains("姓名") || joined.contains("序號")
}

/// Turn roster tables into one entry per listed person.
///
/// A table whose first row names 姓名 or 序號 sets the header for itself and
/// for following headerless tables (tables continued across pages). The
/// category comes from the 公告名冊 marker in the page text unless
/// `default_category` is given.
pub fn roster_from_pages(source: &str, pages: &[Page], default_category: Option<u8>) -> Vec<RosterEntry> {
    let mut out = Vec::new();
    let mut category = default_category;
    let mut header: Vec<String> = Vec::new();

    for page in pages {
        if default_category.is_none() {
            if let Some(c) = page_category(&page.text) {
                category = Some(c);
            }
        }
        for grid in &page.tables {
            let Some(first) = grid.first() else { continue };
            let rows = if is_header_row(first) {
                header = normalize_header(first);
                &grid[1..]
            } else if header.is_empty() {
                continue;
            } else {
                &grid[..]
            };

            for row in rows {
                if row.iter().all(|c| c.trim().is_empty()) {
                    continue;
                }
                let mut fields = BTreeMap::new();
                for (field, cell) in header.iter().zip(row.iter()) {
                    let val = cell.trim();
                    let value = if MULTI_VALUED.contains(&field.as_str()) {
                        FieldValue::Multi(split_values(val))
                    } else {
                        FieldValue::Single(val.to_string())
                    };
                    fields.insert(field.clone(), value);
                }
                let entry = RosterEntry { source: source.to_string(), category: category.unwrap_or(1), fields };
                if entry.name().is_some_and(|n| !n.is_empty() && n != "姓名") {
                    out.push(entry);
                }
            }
        }
    }
    out
}
