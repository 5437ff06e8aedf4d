use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub(crate) static RE_MAIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"主\s*文").unwrap());
pub(crate) static RE_MAIN_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"事\s*實|理\s*由").unwrap());
static RE_FACTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"事\s*實").unwrap());
static RE_REASONING: Lazy<Regex> = Lazy::new(|| Regex::new(r"理\s*由").unwrap());
static RE_LABEL_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[:：]?\s*").unwrap());
// Closing block: issuance date or an attached table
static RE_CUTOFF: Lazy<Regex> = Lazy::new(|| Regex::new(r"中\s*華\s*民\s*國\s*\d+\s*年|附\s*表[:：]").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sections {
    pub main_text: String,
    pub facts: String,
    pub reasoning: String,
}

/// Text after the first `start` label up to the next `end` marker (or end of
/// text when `end` is None), label and surrounding whitespace removed.
/// None when the label is missing or no `end` marker follows it.
pub(crate) fn labeled_block<'a>(text: &'a str, start: &Regex, end: Option<&Regex>) -> Option<&'a str> {
    let label = start.find(text)?;
    let body_start = label.end();
    let body_end = match end {
        Some(re) => re.find_at(text, body_start)?.start(),
        None => text.len(),
    };
    let body = &text[body_start..body_end];
    let tail = RE_LABEL_TAIL.find(body).map(|m| m.end()).unwrap_or(0);
    Some(body[tail..].trim())
}

/// Cut the reasoning before the signature block, the issuance date or an
/// attached table, whichever comes first.
fn truncate_reasoning<'a>(reasoning: &'a str, issuer: &str) -> &'a str {
    let by_issuer = if issuer.is_empty() { None } else { reasoning.find(issuer) };
    let by_marker = RE_CUTOFF.find(reasoning).map(|m| m.start());
    let cut = match (by_issuer, by_marker) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
    match cut {
        Some(pos) => reasoning[..pos].trim(),
        None => reasoning,
    }
}

/// Split merged text into 主文, 事實 and 理由. Missing sections are empty.
pub fn extract_sections(text: &str, issuer: &str) -> Sections {
    let main_text = labeled_block(text, &RE_MAIN, Some(&*RE_MAIN_END)).unwrap_or_default();
    let facts = labeled_block(text, &RE_FACTS, Some(&*RE_REASONING)).unwrap_or_default();
    let reasoning = labeled_block(text, &RE_REASONING, None)
        .map(|r| truncate_reasoning(r, issuer))
        .unwrap_or_default();

    Sections {
        main_text: main_text.to_string(),
        facts: facts.to_string(),
        reasoning: reasoning.to_string(),
    }
}
