use pretty_assertions::assert_eq;
use sourcelines::config::Config;
use sourcelines::error::ReportError;
use sourcelines::pipeline::{BatchSummary, JsonLinesSink};
use sourcelines::report::{discover_reports, HighlightKind};
use sourcelines::{AnalysisReport, DecoratorKind, LineRecord, SourceLines};
use std::fs;
use tempfile::TempDir;

const REPORT: &str = r#"{
  "files": [
    {
      "path": "src/main.rs",
      "source": "fn main() {\n    println!(\"hi\");\n}",
      "coverage": [{ "line": 2, "has_hits": true, "hits": true }],
      "highlightings": [
        { "range": { "start_line": 1, "start_offset": 0, "end_line": 1, "end_offset": 2 }, "kind": "KEYWORD" },
        { "range": { "start_line": 2, "start_offset": 13, "end_line": 2, "end_offset": 17 }, "kind": "STRING" }
      ],
      "symbols": [
        { "declaration": { "start_line": 1, "start_offset": 3, "end_line": 1, "end_offset": 7 } }
      ],
      "changesets": [
        { "line": 1, "author": "ana", "revision": "abc123", "date": 1500000000000 },
        { "line": 2, "author": "ana", "date": 1600000000000 }
      ],
      "new_lines": [2]
    },
    {
      "path": "src/lib.rs",
      "source": "pub mod a;",
      "highlightings": [
        { "range": { "start_line": 1, "start_offset": 0, "end_line": 1, "end_offset": 99 }, "kind": "KEYWORD" }
      ]
    }
  ]
}"#;

fn write_report(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_and_decorate() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_report(&temp_dir, "report.json", REPORT);
    let sourcelines = SourceLines::new(temp_dir.path())?;

    let report = sourcelines.load_report(&path)?;
    assert_eq!(report.files.len(), 2);
    assert_eq!(report.files[0].highlightings[1].kind, HighlightKind::String);

    let mut records: Vec<LineRecord> = Vec::new();
    let main_rs = report.files.into_iter().next().unwrap();
    let summary = sourcelines.decorate(main_rs, &mut records)?;

    assert_eq!(summary.line_count, 3);
    assert_eq!(records[0].highlighting.as_deref(), Some("0,2=k"));
    assert_eq!(records[0].symbols.as_deref(), Some("3,7=1"));
    assert_eq!(records[0].scm_revision.as_deref(), Some("abc123"));
    assert_eq!(records[1].highlighting.as_deref(), Some("13,17=s"));
    assert_eq!(records[1].line_hits, Some(true));
    assert_eq!(records[1].is_new, Some(true));
    assert_eq!(records[2].is_new, Some(false));
    assert_eq!(summary.latest_change.map(|c| c.date), Some(1_600_000_000_000));
    assert_eq!(
        summary.latest_change_with_revision.and_then(|c| c.revision),
        Some("abc123".to_string())
    );
    Ok(())
}

#[test]
fn test_json_lines_for_batch() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_report(&temp_dir, "report.json", REPORT);
    let sourcelines = SourceLines::new(temp_dir.path())?;

    let report = AnalysisReport::load(&path)?;
    let outcomes = sourcelines.decorate_all(report, |path| JsonLinesSink::new(Vec::new(), path));
    let batch = BatchSummary::from_outcomes(&outcomes);

    assert_eq!(batch.files, 2);
    assert_eq!(batch.lines, 4);
    assert_eq!(batch.files_with_errors, 1);
    assert_eq!(batch.errors_by_kind.get(&DecoratorKind::Highlighting), Some(&1));

    let lib_rs = outcomes
        .into_iter()
        .find(|outcome| outcome.path == "src/lib.rs")
        .unwrap();
    let output = String::from_utf8(lib_rs.sink.into_inner())?;
    insta::assert_snapshot!(output.trim_end(), @r#"{"path":"src/lib.rs","line":1,"source":"pub mod a;"}"#);
    Ok(())
}

#[test]
fn test_disabled_decorator_from_config_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_report(&temp_dir, "report.json", REPORT);
    let mut config = Config::init(temp_dir.path())?;
    config.set("decorators.scm", "false")?;

    let sourcelines = SourceLines::new(temp_dir.path())?;
    assert!(!sourcelines.config().decorators.scm);

    let report = sourcelines.load_report(&path)?;
    let mut records: Vec<LineRecord> = Vec::new();
    let main_rs = report.files.into_iter().next().unwrap();
    let summary = sourcelines.decorate(main_rs, &mut records)?;

    assert!(records.iter().all(|r| r.scm_author.is_none()));
    assert_eq!(summary.latest_change, None);
    Ok(())
}

#[test]
fn test_unknown_highlight_kind_fails_loading() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_report(
        &temp_dir,
        "bad.json",
        &REPORT.replace("\"STRING\"", "\"CPP_DOC\""),
    );

    let error = AnalysisReport::load(&path).unwrap_err();
    assert!(matches!(error, ReportError::Parse { .. }));
    assert!(error.to_string().contains("Unknown highlighting kind: CPP_DOC"));
}

#[test]
fn test_missing_report() {
    let temp_dir = TempDir::new().unwrap();
    let error = AnalysisReport::load(temp_dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(error, ReportError::Read { .. }));
}

#[test]
fn test_discover_reports_in_directory() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    fs::create_dir_all(temp_dir.path().join("module"))?;
    write_report(&temp_dir, "b.json", REPORT);
    write_report(&temp_dir, "module/a.json", REPORT);
    write_report(&temp_dir, "notes.txt", "not a report");

    let reports = discover_reports(temp_dir.path())?;
    assert_eq!(
        reports,
        vec![
            temp_dir.path().join("b.json"),
            temp_dir.path().join("module/a.json"),
        ]
    );

    let single = discover_reports(temp_dir.path().join("b.json"))?;
    assert_eq!(single.len(), 1);
    Ok(())
}
