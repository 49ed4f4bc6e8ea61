use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use snippet_locator::Snippet;

#[derive(Debug, Serialize)]
pub struct ReportMeta {
    pub generated_at: String,
    pub transcript: String,
    pub word_count: usize,
    pub narrative_count: usize,
    /// Narratives with both boundaries located, before overlap removal.
    pub located_count: usize,
    pub snippet_count: usize,
    pub buffer_seconds: f64,
}

#[derive(Debug, Serialize)]
pub struct SnippetReport {
    pub meta: ReportMeta,
    pub snippets: Vec<Snippet>,
}

/// Renders the report once, then writes it to `out` or to stdout.
pub fn emit_report(report: &SnippetReport, out: Option<&Path>) -> Result<(), String> {
    let mut rendered = serde_json::to_string_pretty(report)
        .map_err(|err| format!("report serialization failed: {err}"))?;
    rendered.push('\n');

    let Some(path) = out else {
        return io::stdout()
            .lock()
            .write_all(rendered.as_bytes())
            .map_err(|err| format!("writing report to stdout failed: {err}"));
    };

    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .map_err(|err| format!("cannot create '{}': {err}", dir.display()))?,
        _ => {}
    }
    fs::write(path, rendered).map_err(|err| format!("cannot write '{}': {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SnippetReport {
        SnippetReport {
            meta: ReportMeta {
                generated_at: "2024-01-01T00:00:00+00:00".to_string(),
                transcript: "talk.json".to_string(),
                word_count: 10,
                narrative_count: 2,
                located_count: 1,
                snippet_count: 1,
                buffer_seconds: 1.0,
            },
            snippets: Vec::new(),
        }
    }

    #[test]
    fn emit_report_creates_missing_directories() {
        let dir = std::env::temp_dir().join("snippet_spans_report_test");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("report.json");

        emit_report(&report(), Some(path.as_path())).expect("report is written");

        let written = fs::read_to_string(&path).expect("report exists");
        assert!(written.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(&written).expect("valid json");
        assert_eq!(value["meta"]["located_count"], 1);
        assert_eq!(value["snippets"], serde_json::json!([]));
        let _ = fs::remove_dir_all(&dir);
    }
}
