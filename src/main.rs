use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use decision_parser::{
    check_deps, default_config, emit_record, enumerate_inputs, file_name_of, load_config, render_outline, sequence_gaps,
    CaseKind, CaseNumber, DecisionParser, EnumerateError, JsonPagesExtractor, PageExtractor, ParseOutcome,
    PopplerExtractor,
};

fn is_pages_dump(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

fn output_stem(fname: &str) -> String {
    let lower = fname.to_ascii_lowercase();
    for ext in [".pages.json", ".json", ".pdf"] {
        if lower.ends_with(ext) {
            return fname[..fname.len() - ext.len()].to_string();
        }
    }
    fname.to_string()
}

fn write_step(dir: &str, name: &str, body: &str) {
    let _ = fs::create_dir_all(dir);
    let path = format!("{}/{}", dir, name);
    if let Err(e) = fs::write(&path, body) {
        eprintln!(
            "{}",
            serde_json::json!({
                "tool":"dump_steps",
                "file": path,
                "error": e.to_string()
            })
        );
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let dump_steps = args.iter().any(|a| a == "--dump-steps");
    let mut config_path = String::from("decisions.yaml");
    if let Some(pos) = args.iter().position(|a| a == "--config") {
        if let Some(val) = args.get(pos + 1) {
            if !val.starts_with("--") {
                config_path = val.clone();
            }
        }
    }

    // 1) Config: file if present, built-in defaults otherwise
    let cfg = if Path::new(&config_path).exists() {
        match load_config(Path::new(&config_path)) {
            Ok(c) => c,
            Err(e) => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "tool": "load_config",
                        "file": config_path,
                        "error": e.to_string(),
                        "error_code": 3
                    })
                );
                std::process::exit(3);
            }
        }
    } else {
        default_config()
    };
    eprintln!(
        "{}",
        serde_json::json!({
            "tool":"load_config",
            "file": config_path,
            "status":"ok",
            "input_glob": cfg.input_glob(),
            "output_dir": cfg.output_dir(),
            "issuer": cfg.parser.issuer
        })
    );

    // 2) Inputs
    let input_glob = cfg.input_glob();
    let files = match enumerate_inputs(&input_glob) {
        Ok(files) => files,
        Err(EnumerateError::NoFilesFound { guidance }) => {
            eprintln!(
                "{}",
                serde_json::json!({
                    "tool":"enumerate_inputs",
                    "error":"NoFilesFound",
                    "error_code":1
                })
            );
            eprintln!("{}", guidance);
            std::process::exit(1);
        }
    };
    eprintln!("{}", serde_json::json!({"tool":"enumerate_inputs", "count": files.len()}));

    // 3) Poppler is only needed when there are PDFs to read
    if files.iter().any(|f| !is_pages_dump(f)) {
        let deps = check_deps();
        if !deps.ok {
            eprintln!(
                "{}",
                serde_json::json!({
                    "tool":"check_deps",
                    "missing": deps.missing,
                    "error_code": 2
                })
            );
            eprintln!("Dependency missing. Install Poppler, e.g.:\n  sudo apt install poppler-utils");
            std::process::exit(2);
        }
        eprintln!("{}", serde_json::json!({"tool":"check_deps", "status":"ok", "missing": deps.missing}));
    }

    let parser = DecisionParser::new(cfg.parser.clone());
    let poppler = PopplerExtractor::new(cfg.parser.layout);
    let base_output = cfg.output_dir();
    let mut failures = 0usize;
    let mut numbers: BTreeMap<CaseKind, Vec<u32>> = BTreeMap::new();

    // 4) Extract -> structure -> emit, one document at a time
    for file in files {
        let fname = file_name_of(&file);
        let stem = output_stem(&fname);
        let extractor: &dyn PageExtractor = if is_pages_dump(&file) { &JsonPagesExtractor } else { &poppler };

        let doc = match parser.parse(&file, extractor) {
            ParseOutcome::Parsed(doc) => doc,
            failed @ ParseOutcome::Failed(_) => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "tool":"parse_document",
                        "file": file,
                        "outcome": failed,
                        "error_code": 4
                    })
                );
                failures += 1;
                continue;
            }
        };
        eprintln!(
            "{}",
            serde_json::json!({
                "tool":"parse_document",
                "file": file,
                "lines": doc.source_lines.len(),
                "metadata": doc.metadata,
                "outline_roots": doc.structured_reasoning.len(),
                "tables": doc.tables.len()
            })
        );
        if let Some(case_no) = &doc.metadata.case_no {
            let cn = CaseNumber::parse(case_no);
            if let Some(n) = cn.number {
                numbers.entry(cn.kind).or_default().push(n);
            }
        }

        if dump_steps {
            let ad = format!("{}/artifacts/{}", base_output, stem);
            write_step(&ad, "step1_extract.txt", &doc.source_lines.join("\n"));
            write_step(&ad, "step2_merge.txt", &doc.content.full_text);
            write_step(&ad, "step3_outline.txt", &render_outline(&doc.structured_reasoning));
        }

        match emit_record(&doc, &base_output, &stem) {
            Ok(paths) => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "tool":"emit_files",
                        "file": file,
                        "json_path": paths.json_path,
                        "sha256": paths.sha256
                    })
                );
            }
            Err(e) => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "tool":"emit_files",
                        "file": file,
                        "error": e.to_string(),
                        "error_code": 6
                    })
                );
                std::process::exit(6);
            }
        }

        let roster = &doc.roster;
        if !roster.is_empty() {
            let roster_stem = format!("{}.roster", stem);
            match emit_record(roster, &base_output, &roster_stem) {
                Ok(paths) => eprintln!(
                    "{}",
                    serde_json::json!({"tool":"emit_files", "file": file, "json_path": paths.json_path, "rows": roster.len()})
                ),
                Err(e) => {
                    eprintln!(
                        "{}",
                        serde_json::json!({"tool":"emit_files", "file": file, "error": e.to_string(), "error_code": 6})
                    );
                    std::process::exit(6);
                }
            }
        }
    }

    // 5) Numbering gaps per series
    for (kind, nums) in &numbers {
        eprintln!(
            "{}",
            serde_json::json!({
                "tool":"case_sequence",
                "kind": kind,
                "min": nums.iter().min(),
                "max": nums.iter().max(),
                "missing": sequence_gaps(nums)
            })
        );
    }

    if failures > 0 {
        eprintln!("{}", serde_json::json!({"tool":"summary", "failed": failures, "error_code": 4}));
        std::process::exit(4);
    }
}
