use serde::Serialize;

use crate::alignment::pacing::count_words;
use crate::alignment::progress::{active_index, span_timeline, total_weight};
use crate::types::Span;

pub const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct TimelineReport {
    pub schema_version: u32,
    pub meta: Meta,
    pub spans: Vec<SpanReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe: Option<ProbeReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub source: String,
    pub transcript_bytes: usize,
    pub span_count: usize,
    pub total_weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpanReport {
    pub index: usize,
    pub start: usize,
    pub end: usize,
    pub word_count: usize,
    pub weight: f64,
    /// Share of the total weight, in `[0, 1]`.
    pub share: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_seconds: Option<f64>,
    pub text: String,
}

/// Which span is active at a given playback time.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub at_seconds: f64,
    pub active_index: Option<usize>,
}

pub struct ReportMeta<'a> {
    pub generated_at: String,
    pub source: &'a str,
    pub transcript_bytes: usize,
}

pub fn build_timeline_report(
    spans: &[Span],
    duration_seconds: Option<f64>,
    probe_seconds: Option<f64>,
    meta: ReportMeta<'_>,
) -> TimelineReport {
    let total = total_weight(spans);
    let timeline = duration_seconds
        .map(|d| span_timeline(spans, d))
        .unwrap_or_default();

    let span_reports = spans
        .iter()
        .enumerate()
        .map(|(index, span)| {
            let timing = timeline.get(index);
            SpanReport {
                index,
                start: span.start,
                end: span.end,
                word_count: count_words(&span.text),
                weight: span.weight,
                share: span.weight / total,
                start_seconds: timing.map(|t| t.start_seconds),
                end_seconds: timing.map(|t| t.end_seconds),
                text: span.text.clone(),
            }
        })
        .collect();

    let probe = probe_seconds.map(|at_seconds| ProbeReport {
        at_seconds,
        active_index: active_index(spans, at_seconds, duration_seconds.unwrap_or(0.0)),
    });

    TimelineReport {
        schema_version: REPORT_SCHEMA_VERSION,
        meta: Meta {
            generated_at: meta.generated_at,
            source: meta.source.to_string(),
            transcript_bytes: meta.transcript_bytes,
            span_count: spans.len(),
            total_weight: spans.iter().map(|s| s.weight).sum(),
            duration_seconds,
        },
        spans: span_reports,
        probe,
    }
}
