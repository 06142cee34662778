use std::fs;

use hook_order_core::{AliasTable, HookKind};
use tempfile::TempDir;

use super::*;

const OUT_OF_ORDER: &str = "test.afterAll(() => {});\ntest.beforeAll(() => {});\n";

#[test]
fn lint_file_reports_violation() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("a.spec.ts");
    fs::write(&path, OUT_OF_ORDER).unwrap();

    let report = lint_file(&path, &CheckOptions::default(), false).unwrap();
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].current, HookKind::BeforeAll);
    assert_eq!(report.violations[0].previous, HookKind::AfterAll);
    assert_eq!(report.fixed, 0);
    // Checking never touches the file.
    assert_eq!(fs::read_to_string(&path).unwrap(), OUT_OF_ORDER);
}

#[test]
fn lint_file_fix_rewrites_in_place() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("a.spec.js");
    fs::write(&path, OUT_OF_ORDER).unwrap();

    let report = lint_file(&path, &CheckOptions::default(), true).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.fixed, 1);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "test.beforeAll(() => {});\ntest.afterAll(() => {});\n"
    );
}

#[test]
fn lint_file_uses_aliases() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("a.test.js");
    fs::write(&path, "it.afterEach(() => {});\nit.beforeEach(() => {});\n").unwrap();

    let plain = lint_file(&path, &CheckOptions::default(), false).unwrap();
    assert!(plain.is_clean());

    let aliased = CheckOptions {
        aliases: AliasTable::with_aliases("test", ["it"]),
        ..CheckOptions::default()
    };
    let report = lint_file(&path, &aliased, false).unwrap();
    assert_eq!(report.violations.len(), 1);
}

#[test]
fn lint_file_rejects_unknown_extension() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("notes.txt");
    fs::write(&path, OUT_OF_ORDER).unwrap();
    let err = lint_file(&path, &CheckOptions::default(), false).unwrap_err();
    assert!(format!("{err:#}").contains("Unsupported file extension 'txt'"));
}

#[test]
fn lint_files_preserves_order() {
    let tmp = TempDir::new().unwrap();
    let mut paths = Vec::new();
    for i in 0..8 {
        let path = tmp.path().join(format!("s{i}.spec.ts"));
        let code = if i % 2 == 0 { OUT_OF_ORDER } else { "test.beforeAll(() => {});\n" };
        fs::write(&path, code).unwrap();
        paths.push(path);
    }

    let run = lint_files(&paths, &CheckOptions::default(), false);
    assert!(!run.has_failures());
    let reports = run.reports;
    let got: Vec<&PathBuf> = reports.iter().map(|r| &r.path).collect();
    assert_eq!(got, paths.iter().collect::<Vec<_>>());
    for (i, report) in reports.iter().enumerate() {
        assert_eq!(report.is_clean(), i % 2 == 1);
    }
}

#[test]
fn lint_files_keeps_reports_when_one_file_fails() {
    let tmp = TempDir::new().unwrap();
    let good = tmp.path().join("a.spec.ts");
    let binary = tmp.path().join("b.spec.ts");
    fs::write(&good, OUT_OF_ORDER).unwrap();
    fs::write(&binary, b"test.beforeAll(\xff\xfe);\n").unwrap();
    let paths = vec![good.clone(), binary, tmp.path().join("gone.spec.ts")];

    let run = lint_files(&paths, &CheckOptions::default(), true);
    assert_eq!(run.reports.len(), 1);
    assert_eq!(run.reports[0].path, good);
    assert_eq!(run.reports[0].fixed, 1);
    assert_eq!(run.failures.len(), 2);
    for err in &run.failures {
        assert!(format!("{err:#}").contains("failed to read"));
    }
    assert_eq!(
        fs::read_to_string(&good).unwrap(),
        "test.beforeAll(() => {});\ntest.afterAll(() => {});\n"
    );
}
