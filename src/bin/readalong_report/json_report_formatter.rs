use std::fs;
use std::path::Path;

use readalong_rs::TimelineReport;

/// Pretty JSON with a trailing newline, shared by file and stdout output.
pub fn render(report: &TimelineReport) -> Result<String, String> {
    let mut json = serde_json::to_string_pretty(report)
        .map_err(|err| format!("Failed to serialize timeline report: {err}"))?;
    json.push('\n');
    Ok(json)
}

pub fn write_report(path: &Path, report: &TimelineReport) -> Result<(), String> {
    let json = render(report)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|err| format!("Failed to create '{}': {err}", parent.display()))?;
    }
    fs::write(path, json)
        .map_err(|err| format!("Failed to write timeline report '{}': {err}", path.display()))?;
    tracing::info!(path = %path.display(), spans = report.meta.span_count, "timeline report written");
    Ok(())
}

pub fn print_report(report: &TimelineReport) -> Result<(), String> {
    print!("{}", render(report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use readalong_rs::{build_timeline_report, segment, ReportMeta};

    use super::*;

    fn report() -> TimelineReport {
        let transcript = "A short transcript that still has more than ten words inside it.";
        build_timeline_report(
            &segment(transcript),
            Some(6.0),
            None,
            ReportMeta {
                generated_at: "2026-01-01T00:00:00Z".to_string(),
                source: "inline",
                transcript_bytes: transcript.len(),
            },
        )
    }

    #[test]
    fn written_file_matches_rendered_json() {
        let dir = std::env::temp_dir().join(format!("readalong_report_{}", std::process::id()));
        let path = dir.join("nested").join("report.json");
        let report = report();

        write_report(&path, &report).expect("report written");
        let on_disk = fs::read_to_string(&path).expect("report readable");
        assert_eq!(on_disk, render(&report).expect("rendered"));
        assert!(on_disk.ends_with("}\n"));

        let value: serde_json::Value = serde_json::from_str(&on_disk).expect("valid JSON");
        assert_eq!(value["meta"]["span_count"], 1);
        let _ = fs::remove_dir_all(&dir);
    }
}
