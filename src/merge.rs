use once_cell::sync::Lazy;
use regex::Regex;

use crate::classify::is_heading;

// Page numbers left behind by the extractor: "12", "PAGE 3", "page3"
static RE_FOOTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*(?:PAGE\s*)?\d+\s*$").unwrap());
static RE_SECTION_KEYWORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:主\s*文|理\s*由|據\s*上\s*論\s*結)").unwrap());

const TERMINALS: [char; 3] = ['。', '：', ':'];

pub fn is_footer_line(line: &str) -> bool {
    RE_FOOTER.is_match(line)
}

/// Trim every line of one page and drop blanks and page-number footers.
pub fn clean_page(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !is_footer_line(l))
        .map(|l| l.to_string())
        .collect()
}

fn starts_paragraph(line: &str) -> bool {
    is_heading(line) || RE_SECTION_KEYWORD.is_match(line)
}

/// Rebuild logical paragraphs from wrapped lines.
///
/// A line opens a new paragraph when it carries a heading marker or a
/// section keyword, or when the paragraph so far ends in 。/：/:.
/// Anything else is a continuation and is appended with no separator.
pub fn merge_paragraphs<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut out = Vec::new();
    let mut iter = lines.iter().map(|l| l.as_ref());
    let Some(first) = iter.next() else {
        return out;
    };

    let mut current = first.to_string();
    for line in iter {
        let ends_terminal = current.trim_end().ends_with(TERMINALS);
        if starts_paragraph(line) || ends_terminal {
            out.push(std::mem::replace(&mut current, line.to_string()));
        } else {
            current.push_str(line);
        }
    }
    out.push(current);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_shapes() {
        assert!(is_footer_line("12"));
        assert!(is_footer_line("  PAGE 3 "));
        assert!(is_footer_line("page7"));
        assert!(!is_footer_line("第3頁"));
        assert!(!is_footer_line("3."));
    }

    #[test]
    fn keyword_lines_split_even_mid_sentence() {
        let lines = ["本件聲請", "理 由", "據上論結，決定如主文"];
        let merged = merge_paragraphs(&lines);
        assert_eq!(merged, vec!["本件聲請", "理 由", "據上論結，決定如主文"]);
    }
}
