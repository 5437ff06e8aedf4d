use std::path::Path;

use decision_parser::{DecisionParser, ExtractError, Page, PageExtractor, ParseOutcome, ParserConfig};

struct Broken;

impl PageExtractor for Broken {
    fn extract(&self, _path: &Path) -> Result<Vec<Page>, ExtractError> {
        Err(ExtractError::Other("cannot open".into()))
    }
}

struct Fixed(Vec<Page>);

impl PageExtractor for Fixed {
    fn extract(&self, _path: &Path) -> Result<Vec<Page>, ExtractError> {
        Ok(self.0.clone())
    }
}

fn sample_pages() -> Vec<Page> {
    vec![
        Page::from_text("促進轉型正義委員會決定書\n促轉司字第12號\n聲請人：王小明\n住臺北市\n主 文\n王小明受臺灣警備總司令部\n判決有罪，撤銷之。\n1"),
        Page {
            text: "理 由\n一、程序部分：\n本件聲請\n符合規定。\n（一）依法：\n說明一\n二、實體部分\n（一）經查\n1.甲\n(1)乙\n促進轉型正義委員會\n中華民國111年3月15日\n2".to_string(),
            tables: vec![vec![
                vec![" 姓名 ".to_string(), "裁判\n案由".to_string()],
                vec!["王小明".to_string(), "叛亂".to_string()],
            ]],
        },
    ]
}

#[test]
fn extractor_failure_becomes_error_record() {
    let outcome = DecisionParser::default().parse(Path::new("/data/bad.pdf"), &Broken);
    assert!(outcome.is_failed());
    assert_eq!(outcome.filename(), "bad.pdf");
    let v = serde_json::to_value(&outcome).unwrap();
    assert_eq!(v, serde_json::json!({"filename": "bad.pdf", "error": "PDF parsing failed: ExtractError: cannot open"}));
}

#[test]
fn full_pipeline() {
    let outcome = DecisionParser::default().parse(Path::new("in/促轉司字第12號.pdf"), &Fixed(sample_pages()));
    let ParseOutcome::Parsed(doc) = outcome else { panic!("expected parsed document") };

    assert_eq!(doc.filename, "促轉司字第12號.pdf");
    assert_eq!(doc.metadata.case_no.as_deref(), Some("促轉司字第12號"));
    assert_eq!(doc.metadata.applicant.as_deref(), Some("王小明住臺北市"));
    assert_eq!(doc.metadata.subject.as_deref(), Some("王小明"));
    assert_eq!(doc.metadata.date.as_deref(), Some("中華民國111年3月15日"));

    assert_eq!(doc.content.main_text, "王小明受臺灣警備總司令部判決有罪，撤銷之。");
    assert_eq!(doc.content.facts, "");
    assert!(doc.content.reasoning.starts_with("一、程序部分："));
    assert!(doc.content.reasoning.ends_with("(1)乙"));
    assert!(!doc.content.full_text.lines().any(|l| l == "1" || l == "2"));

    let titles: Vec<&str> = doc.structured_reasoning.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["一、程序部分：", "二、實體部分"]);
    assert_eq!(doc.structured_reasoning[0].content, vec!["本件聲請符合規定。"]);
    assert_eq!(doc.structured_reasoning[0].children[0].content, vec!["說明一"]);
    let deep = &doc.structured_reasoning[1].children[0].children[0].children[0];
    assert_eq!((deep.title.as_str(), deep.level), ("(1)乙", 4));

    assert_eq!(doc.tables.len(), 1);
    assert_eq!(doc.tables[0].page, 2);
    assert_eq!(doc.tables[0].data[0], vec!["姓名", "裁判案由"]);
}

#[test]
fn serialized_record_shape() {
    let doc = DecisionParser::default().parse_pages("a.pdf", &sample_pages());
    let v = serde_json::to_value(&doc).unwrap();
    let keys: Vec<&str> = v.as_object().unwrap().keys().map(|k| k.as_str()).collect();
    for k in ["filename", "metadata", "content", "structured_reasoning", "tables"] {
        assert!(keys.contains(&k), "missing {}", k);
    }
    assert!(v.get("error").is_none());
    for k in ["case_no", "applicant", "subject", "date"] {
        assert!(v["metadata"].get(k).is_some());
    }
    for k in ["full_text", "main_text", "facts", "reasoning"] {
        assert!(v["content"][k].is_string());
    }
    assert_eq!(v["structured_reasoning"][0]["text"], "一、程序部分：");
    assert_eq!(v["tables"][0]["data"][1][1], "叛亂");

    let back: ParseOutcome = serde_json::from_value(v).unwrap();
    assert!(!back.is_failed());
}

#[test]
fn absent_metadata_serializes_as_null() {
    let doc = DecisionParser::default().parse_pages("blank.pdf", &[]);
    let v = serde_json::to_value(&doc).unwrap();
    assert_eq!(v["metadata"], serde_json::json!({"case_no": null, "applicant": null, "subject": null, "date": null}));
    assert_eq!(v["structured_reasoning"], serde_json::json!([]));
    assert_eq!(v["content"]["full_text"], "");
}

#[test]
fn issuer_is_configurable() {
    let cfg = ParserConfig { issuer: "某某委員會".to_string(), ..ParserConfig::default() };
    let pages = vec![Page::from_text("理由\n一、甲。\n某某委員會\n主任委員")];
    let parser = DecisionParser::new(cfg);
    assert_eq!(parser.config().issuer, "某某委員會");
    let doc = parser.parse_pages("x.pdf", &pages);
    assert_eq!(doc.content.reasoning, "一、甲。");
}

#[test]
fn roster_and_source_lines_ride_along_unserialized() {
    let doc = DecisionParser::default().parse_pages("x.pdf", &sample_pages());
    assert_eq!(doc.roster.len(), 1);
    assert_eq!(doc.roster[0].name(), Some("王小明"));
    assert_eq!(doc.source_lines.first().map(String::as_str), Some("促進轉型正義委員會決定書"));
    assert!(!doc.source_lines.iter().any(|l| l == "1" || l == "2"));

    let v = serde_json::to_value(&doc).unwrap();
    assert!(v.get("roster").is_none());
    assert!(v.get("source_lines").is_none());
}
