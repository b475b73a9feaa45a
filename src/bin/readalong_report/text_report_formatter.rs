use readalong_rs::session::format_timestamp;
use readalong_rs::TimelineReport;

const PREVIEW_CHARS: usize = 60;

pub fn render(report: &TimelineReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} | spans: {} | total weight: {:.2}",
        report.meta.source, report.meta.span_count, report.meta.total_weight
    ));
    if let Some(duration) = report.meta.duration_seconds {
        out.push_str(&format!(" | duration: {}", format_timestamp(duration)));
    }
    out.push('\n');

    for span in &report.spans {
        let window = match (span.start_seconds, span.end_seconds) {
            (Some(start), Some(end)) => {
                format!("{:>6} -{:>6}", format_timestamp(start), format_timestamp(end))
            }
            _ => format!("{:>14}", format!("{}..{}", span.start, span.end)),
        };
        out.push_str(&format!(
            "{:>4}  {}  {:>6.2}  {:>5.1}%  {}\n",
            span.index,
            window,
            span.weight,
            span.share * 100.0,
            preview(&span.text)
        ));
    }

    if let Some(probe) = &report.probe {
        let active = probe
            .active_index
            .map(|i| i.to_string())
            .unwrap_or_else(|| "none".to_string());
        out.push_str(&format!(
            "active at {}: {active}\n",
            format_timestamp(probe.at_seconds)
        ));
    }
    out
}

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(PREVIEW_CHARS - 3).collect();
    format!("{cut}...")
}
