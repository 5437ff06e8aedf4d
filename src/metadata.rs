use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::sections::{labeled_block, RE_MAIN, RE_MAIN_END};

static RE_CASE_NO: Lazy<Regex> = Lazy::new(|| Regex::new(r"促\s*轉\s*.*?\s*字\s*第\s*\d+\s*號").unwrap());
static RE_REVIEW_APPLICANT: Lazy<Regex> = Lazy::new(|| Regex::new(r"復查申請人[:：]\s*([^\n]+)").unwrap());
static RE_PETITIONER: Lazy<Regex> = Lazy::new(|| Regex::new(r"聲請人[:：]\s*([^\n]+)").unwrap());
static RE_SUBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([\w、]+)\s*受").unwrap());
static RE_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"中\s*華\s*民\s*國\s*(\d+)\s*年\s*(\d+)\s*月\s*(\d+)\s*日").unwrap());
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const REVIEW_STOPS: [&str; 7] = ["復查申請人因", "有關", "受", "因", "為", "，", "。"];
const PETITION_STOPS: [&str; 6] = ["有關", "受", "因", "為", "，", "。"];
const EX_OFFICIO: &str = "依職權調查";

/// Identifying fields of a decision; a field that cannot be found is None.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metadata {
    pub case_no: Option<String>,
    pub applicant: Option<String>,
    pub subject: Option<String>,
    pub date: Option<String>,
}

type Candidate = fn(&str) -> Option<String>;

const APPLICANT_CANDIDATES: [Candidate; 3] = [review_applicant, petitioner, ex_officio];

fn cut_at_stops(raw: &str, stops: &[&str]) -> Option<String> {
    let raw = raw.trim();
    let end = stops.iter().filter_map(|s| raw.find(s)).min().unwrap_or(raw.len());
    let name = raw[..end].trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn review_applicant(text: &str) -> Option<String> {
    let cap = RE_REVIEW_APPLICANT.captures(text)?;
    cut_at_stops(&cap[1], &REVIEW_STOPS)
}

fn petitioner(text: &str) -> Option<String> {
    let cap = RE_PETITIONER.captures(text)?;
    cut_at_stops(&cap[1], &PETITION_STOPS)
}

fn ex_officio(text: &str) -> Option<String> {
    text.contains(EX_OFFICIO).then(|| EX_OFFICIO.to_string())
}

fn case_no(text: &str) -> Option<String> {
    let m = RE_CASE_NO.find(text)?;
    Some(RE_WS.replace_all(m.as_str(), "").into_owned())
}

fn subject_from_main_text(text: &str) -> Option<String> {
    let main = labeled_block(text, &RE_MAIN, Some(&*RE_MAIN_END))?;
    let cap = RE_SUBJECT.captures(main)?;
    let subject = cap[1].trim();
    (!subject.is_empty()).then(|| subject.to_string())
}

/// The last `window` characters of `text` (all of it when shorter).
fn tail_chars(text: &str, window: usize) -> &str {
    if window == 0 {
        return "";
    }
    match text.char_indices().rev().nth(window - 1) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}

fn issuance_date(text: &str, window: usize) -> Option<String> {
    let cap = RE_DATE.captures(tail_chars(text, window))?;
    Some(format!("中華民國{}年{}月{}日", &cap[1], &cap[2], &cap[3]))
}

/// Recover case number, applicant, subject and issuance date from merged
/// text. The date is only looked for in the last `date_window` characters.
///
/// When no subject is named in 主文 and the case number is a 復查 number,
/// the applicant is taken as the subject. This is a heuristic for review
/// decisions; documents naming several parties can get it wrong.
pub fn extract_metadata(text: &str, date_window: usize) -> Metadata {
    let case_no = case_no(text);
    let applicant = APPLICANT_CANDIDATES.iter().find_map(|c| c(text));
    let mut subject = subject_from_main_text(text);
    if subject.is_none() && case_no.as_deref().is_some_and(|c| c.contains("復查")) {
        subject = applicant.clone();
    }
    let date = issuance_date(text, date_window);

    Metadata { case_no, applicant, subject, date }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_cut_at_earliest_phrase() {
        assert_eq!(cut_at_stops("王小明為聲請有關事項", &PETITION_STOPS).as_deref(), Some("王小明"));
        assert_eq!(cut_at_stops("因故", &PETITION_STOPS), None);
    }

    #[test]
    fn tail_counts_characters_not_bytes() {
        assert_eq!(tail_chars("甲乙丙丁", 2), "丙丁");
        assert_eq!(tail_chars("甲乙", 5), "甲乙");
        assert_eq!(tail_chars("甲乙", 0), "");
    }

    #[test]
    fn empty_review_applicant_falls_through() {
        let text = "復查申請人：因故\n聲請人：陳大文";
        assert_eq!(APPLICANT_CANDIDATES.iter().find_map(|c| c(text)).as_deref(), Some("陳大文"));
    }
}
