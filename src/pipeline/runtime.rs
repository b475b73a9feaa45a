use crate::alignment::progress::span_timeline;
use crate::config::ReadAlongConfig;
use crate::pipeline::traits::{PacingModel, ProgressMapper, SentenceSegmenter};
use crate::types::{Span, SpanTiming};

pub struct ReadAlongEngine {
    config: ReadAlongConfig,
    segmenter: Box<dyn SentenceSegmenter>,
    pacing: Box<dyn PacingModel>,
    mapper: Box<dyn ProgressMapper>,
}

pub(crate) struct ReadAlongEngineParts {
    pub config: ReadAlongConfig,
    pub segmenter: Box<dyn SentenceSegmenter>,
    pub pacing: Box<dyn PacingModel>,
    pub mapper: Box<dyn ProgressMapper>,
}

impl ReadAlongEngine {
    pub(crate) fn from_parts(parts: ReadAlongEngineParts) -> Self {
        Self {
            config: parts.config,
            segmenter: parts.segmenter,
            pacing: parts.pacing,
            mapper: parts.mapper,
        }
    }

    pub fn config(&self) -> &ReadAlongConfig {
        &self.config
    }

    pub fn segment(&self, transcript: &str) -> Vec<Span> {
        self.segmenter.segment(transcript, self.pacing.as_ref())
    }

    pub fn weight(&self, raw_slice: &str) -> f64 {
        self.pacing.weight(raw_slice)
    }

    pub fn active_index(
        &self,
        spans: &[Span],
        current_seconds: f64,
        duration_seconds: f64,
    ) -> Option<usize> {
        self.mapper
            .active_index(spans, current_seconds, duration_seconds)
            .map(|idx| idx.min(spans.len().saturating_sub(1)))
    }

    pub fn seek_seconds(&self, spans: &[Span], index: usize, duration_seconds: f64) -> Option<f64> {
        if !duration_seconds.is_finite() || duration_seconds <= 0.0 {
            return None;
        }
        self.mapper
            .seek_seconds(spans, index, duration_seconds)
            .filter(|t| t.is_finite())
            .map(|t| t.clamp(0.0, duration_seconds))
    }

    pub fn timeline(&self, spans: &[Span], duration_seconds: f64) -> Vec<SpanTiming> {
        span_timeline(spans, duration_seconds)
    }
}
