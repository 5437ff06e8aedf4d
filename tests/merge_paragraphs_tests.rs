use decision_parser::{clean_page, merge_paragraphs, page_lines, Page};

#[test]
fn wrapped_line_joins_without_separator() {
    let merged = merge_paragraphs(&["前句未完", "續接內容。"]);
    assert_eq!(merged, vec!["前句未完續接內容。"]);
}

#[test]
fn terminal_punctuation_and_markers_start_paragraphs() {
    let lines = [
        "本會認為：",
        "聲請人所述",
        "尚非可採。",
        "其次",
        "一、程序",
        "部分",
        "（一）細目",
        "1.要點",
        "(2)子點",
        "主 文",
        "據上論結，",
        "爰決定如",
        "主文。",
        "說明:",
        "完",
    ];
    let merged = merge_paragraphs(&lines);
    assert_eq!(
        merged,
        vec![
            "本會認為：",
            "聲請人所述尚非可採。",
            "其次",
            "一、程序部分",
            "（一）細目",
            "1.要點",
            "(2)子點",
            "主 文",
            "據上論結，爰決定如",
            "主文。",
            "說明:",
            "完",
        ]
    );
}

#[test]
fn merging_is_idempotent() {
    let lines = ["甲", "乙。", "丙", "一、丁", "戊", "（一）己：", "庚"];
    let once = merge_paragraphs(&lines);
    let twice = merge_paragraphs(&once);
    assert_eq!(once, twice);
}

#[test]
fn merging_keeps_every_character() {
    let lines = ["前句", "未完", "。後", "一、標題", "內容：", "(1)細項", "尾"];
    let merged = merge_paragraphs(&lines);
    assert_eq!(merged.concat(), lines.concat());
}

#[test]
fn empty_input_gives_no_paragraphs() {
    let empty: [&str; 0] = [];
    assert!(merge_paragraphs(&empty).is_empty());
}

#[test]
fn footers_and_blanks_are_dropped_per_page() {
    assert_eq!(clean_page("  第一行  \n\n 3 \nPAGE 4\n第二行"), vec!["第一行", "第二行"]);
    let pages = vec![Page::from_text("甲\n1"), Page::from_text(""), Page::from_text("乙\nPage 2")];
    assert_eq!(page_lines(&pages), vec!["甲", "乙"]);
}
