use std::fs;
use std::os::unix::fs::PermissionsExt;

use decision_parser::check_deps;

fn fake_tool(dir: &std::path::Path, name: &str) {
    let bin = dir.join(name);
    fs::write(&bin, "#!/bin/sh\nexit 0\n").unwrap();
    let mut perms = fs::metadata(&bin).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&bin, perms).unwrap();
}

// PATH is process-wide, so both cases run in one test.
#[test]
fn check_deps_follows_path() {
    let empty = tempfile::tempdir().unwrap();
    std::env::set_var("PATH", empty.path());
    let res = check_deps();
    assert!(!res.ok, "missing pdftotext should not be ok");
    assert!(res.missing.iter().any(|m| m == "pdftotext"));
    assert!(res.missing.iter().any(|m| m == "pdfinfo"));

    let td = tempfile::tempdir().unwrap();
    fake_tool(td.path(), "pdftotext");
    std::env::set_var("PATH", td.path());
    let res = check_deps();
    assert!(res.ok, "pdftotext present should yield ok");
    assert_eq!(res.missing, vec!["pdfinfo".to_string()]);
}
