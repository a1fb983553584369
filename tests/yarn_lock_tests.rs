use std::collections::HashSet;
use std::path::{Path, PathBuf};

use lockscope::export::{export_all, export_to_string, ExportData, ExportFormat};
use lockscope::parser::{parse_file, parse_str, parse_tree, Dependency, ParseError, Value};
use lockscope::scan::{scan, summarize, ScanOptions};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn parses_long_lockfile() {
    let deps = parse_file(&fixture("long_yarn.lock")).unwrap().unwrap();

    assert_eq!(deps.len(), 53);
    assert_eq!(deps.first().unwrap().name, "accepts");
    assert_eq!(deps.last().unwrap().name, "vary");
}

#[test]
fn long_lockfile_records_are_unique() {
    let deps = parse_file(&fixture("long_yarn.lock")).unwrap().unwrap();
    let unique: HashSet<&Dependency> = deps.iter().collect();
    assert_eq!(unique.len(), deps.len());
}

#[test]
fn long_lockfile_keeps_distinct_versions_of_one_package() {
    let deps = parse_file(&fixture("long_yarn.lock")).unwrap().unwrap();

    let http_errors: Vec<_> = deps
        .iter()
        .filter(|d| d.name == "http-errors")
        .filter_map(|d| d.version.as_deref())
        .collect();
    assert_eq!(http_errors, vec!["1.7.2", "1.7.3"]);
}

#[test]
fn long_lockfile_multi_key_entries_collapse() {
    let content = std::fs::read_to_string(fixture("long_yarn.lock")).unwrap();
    let tree = parse_tree(&content).unwrap().unwrap();

    // Four blocks declare two descriptors each.
    assert_eq!(tree.len(), 57);
    assert_eq!(tree["statuses@>= 1.5.0 < 2"], tree["statuses@~1.5.0"]);

    let deps = parse_str(&content).unwrap().unwrap();
    let statuses: Vec<_> = deps.iter().filter(|d| d.name == "statuses").collect();
    assert_eq!(statuses, vec![&Dependency::new("statuses", Some("1.5.0"))]);
}

#[test]
fn long_lockfile_tree_has_nested_dependencies() {
    let content = std::fs::read_to_string(fixture("long_yarn.lock")).unwrap();
    let tree = parse_tree(&content).unwrap().unwrap();

    let express = tree["express@^4.17.1"].as_map().unwrap();
    let deps = express["dependencies"].as_map().unwrap();
    assert_eq!(deps.len(), 30);
    assert_eq!(deps["vary"], Value::String("~1.1.2".to_string()));
    match &express["resolved"] {
        // Colons are stripped from quoted strings.
        Value::String(url) => {
            assert!(url.starts_with("https//registry.yarnpkg.com/express/-/express-4.17.1.tgz#"))
        }
        other => panic!("unexpected resolved value: {:?}", other),
    }
}

#[test]
fn unsupported_lockfile_returns_none() {
    let result = parse_file(&fixture("invalid_yarn.lock")).unwrap();
    assert!(result.is_none());
}

#[test]
fn missing_file_is_an_error() {
    let result = parse_file(&fixture("does_not_exist.lock"));
    assert!(matches!(result, Err(ParseError::Io(_))));
}

#[test]
fn header_only_document_is_empty() {
    assert_eq!(parse_str("# yarn lockfile v1\n\n").unwrap(), Some(vec![]));
}

#[test]
fn crlf_lockfile_matches_lf_lockfile() {
    let lf = std::fs::read_to_string(fixture("long_yarn.lock")).unwrap();
    let crlf = lf.replace('\n', "\r\n");

    assert_eq!(parse_str(&crlf).unwrap(), parse_str(&lf).unwrap());
}

#[test]
fn long_lockfile_exports_to_all_formats() {
    let deps = parse_file(&fixture("long_yarn.lock")).unwrap().unwrap();
    let data = ExportData::new("long_yarn.lock", deps);

    let json = export_to_string(ExportFormat::Json, &data).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["summary"]["total_dependencies"], 53);
    assert_eq!(parsed["summary"]["unique_packages"], 49);

    let csv = export_to_string(ExportFormat::Csv, &data).unwrap();
    assert_eq!(csv.lines().count(), 54);
    assert!(csv.contains("ms,2.0.0,true"));

    let md = export_to_string(ExportFormat::Markdown, &data).unwrap();
    assert!(md.contains("- **inherits**: 2.0.3, 2.0.4"));
}

#[test]
fn scan_exports_every_lockfile_as_one_document() {
    let dir = tempfile::tempdir().unwrap();
    let long = std::fs::read_to_string(fixture("long_yarn.lock")).unwrap();
    for (relative, content) in [
        ("yarn.lock", "# yarn lockfile v1\n\nms@2.0.0:\n  version \"2.0.0\"\n"),
        ("packages/server/yarn.lock", long.as_str()),
    ] {
        let path = dir.path().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    let summary = summarize(scan(dir.path(), &ScanOptions::default()));
    assert_eq!(summary.reports.len(), 2);
    assert_eq!(summary.failed, 0);

    let mut json = Vec::new();
    export_all(ExportFormat::Json, &summary.reports, &mut json).unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&json).unwrap();
    let reports = parsed.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["summary"]["total_dependencies"], 53);
    assert_eq!(reports[1]["summary"]["total_dependencies"], 1);

    let mut csv = Vec::new();
    export_all(ExportFormat::Csv, &summary.reports, &mut csv).unwrap();
    let csv = String::from_utf8(csv).unwrap();
    let header_count = csv.lines().filter(|l| l.ends_with("multiple_versions")).count();
    assert_eq!(header_count, 1);
    assert_eq!(csv.lines().count(), 1 + 53 + 1);
    assert!(csv
        .lines()
        .last()
        .unwrap()
        .ends_with("yarn.lock,ms,2.0.0,false"));
}
