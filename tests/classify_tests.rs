use decision_parser::line_level;

#[test]
fn four_numbering_shapes() {
    assert_eq!(line_level("一、程序部分"), 1);
    assert_eq!(line_level("十二.其他"), 1);
    assert_eq!(line_level("（一）聲請意旨"), 2);
    assert_eq!(line_level("(二)本會見解"), 2);
    assert_eq!(line_level("1.按國家安全法"), 3);
    assert_eq!(line_level("23、經查"), 3);
    assert_eq!(line_level("（1）卷證"), 4);
    assert_eq!(line_level("(10)附件"), 4);
    assert_eq!(line_level("  一、前後空白  "), 1);
}

#[test]
fn body_text_is_level_zero() {
    for line in ["本件聲請人", "一", "（一", "1", "(a)", "壹、外", "", "   ", "第一、二點", "１．全形數字"] {
        assert_eq!(line_level(line), 0, "{:?}", line);
    }
}

#[test]
fn every_string_maps_into_range() {
    let samples = [
        "", "\u{0}", "(", "（", "）", "、", "一、", "（一）", "1.", "(1)", "一二三四五六七八九十、",
        "((1))", "(一)(1)", "1(1)", "🙂", "\n", "\t一、", "Ⅳ. roman", "一、\n二、",
    ];
    for s in samples {
        assert!(line_level(s) <= 4);
    }
    // every prefix of a mixed line, cut at char boundaries
    let mixed = "（十一）1.(2)一、內文。";
    for (i, _) in mixed.char_indices() {
        assert!(line_level(&mixed[..i]) <= 4);
        assert!(line_level(&mixed[i..]) <= 4);
    }
}
