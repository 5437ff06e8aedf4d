use once_cell::sync::Lazy;
use regex::Regex;

// 一、 二. 十一、
static RE_LEVEL1: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[一二三四五六七八九十]+[、､.．]").unwrap());
// (一) （二）
static RE_LEVEL2: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[(（][一二三四五六七八九十]+[)）]").unwrap());
// 1. 2、
static RE_LEVEL3: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+[、､.．]").unwrap());
// (1) （2）
static RE_LEVEL4: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[(（][0-9]+[)）]").unwrap());

/// Outline level of a single line: 1..=4 for the four numbering shapes,
/// 0 for body text. Leading and trailing whitespace is ignored.
pub fn line_level(line: &str) -> u8 {
    let line = line.trim();
    if RE_LEVEL1.is_match(line) {
        1
    } else if RE_LEVEL2.is_match(line) {
        2
    } else if RE_LEVEL3.is_match(line) {
        3
    } else if RE_LEVEL4.is_match(line) {
        4
    } else {
        0
    }
}

/// True when the line opens a numbered heading of any level.
pub fn is_heading(line: &str) -> bool {
    line_level(line) > 0
}
