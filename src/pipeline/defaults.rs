use crate::alignment::pacing::span_weight;
use crate::alignment::progress::{active_index, seek_seconds};
use crate::alignment::segmentation::segment;
use crate::config::{PauseUnits, ReadAlongConfig};
use crate::pipeline::traits::{PacingModel, ProgressMapper, SentenceSegmenter};
use crate::types::Span;

/// Word count plus punctuation pauses, priced by a [`PauseUnits`] table.
pub struct PunctuationPacing {
    units: PauseUnits,
}

impl PunctuationPacing {
    pub fn new(units: PauseUnits) -> Self {
        Self { units }
    }

    pub fn units(&self) -> &PauseUnits {
        &self.units
    }
}

impl Default for PunctuationPacing {
    fn default() -> Self {
        Self::new(PauseUnits::default())
    }
}

impl PacingModel for PunctuationPacing {
    fn weight(&self, raw_slice: &str) -> f64 {
        span_weight(raw_slice, &self.units)
    }
}

/// Splits on newlines and sentence-ending punctuation, then folds spans
/// under `min_span_words` into their successor.
pub struct BoundarySegmenter {
    min_span_words: usize,
}

impl BoundarySegmenter {
    pub fn new(min_span_words: usize) -> Self {
        Self { min_span_words }
    }
}

impl Default for BoundarySegmenter {
    fn default() -> Self {
        Self::new(ReadAlongConfig::DEFAULT_MIN_SPAN_WORDS)
    }
}

impl SentenceSegmenter for BoundarySegmenter {
    fn segment(&self, transcript: &str, pacing: &dyn PacingModel) -> Vec<Span> {
        segment(transcript, self.min_span_words, |raw| pacing.weight(raw))
    }
}

pub struct WeightedProgressMapper;

impl ProgressMapper for WeightedProgressMapper {
    fn active_index(
        &self,
        spans: &[Span],
        current_seconds: f64,
        duration_seconds: f64,
    ) -> Option<usize> {
        active_index(spans, current_seconds, duration_seconds)
    }

    fn seek_seconds(&self, spans: &[Span], index: usize, duration_seconds: f64) -> Option<f64> {
        seek_seconds(spans, index, duration_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_pacing_weight() {
        let pacing = PunctuationPacing::default();
        let expected = span_weight("Hello, world.", &PauseUnits::default());
        assert_eq!(pacing.weight("Hello, world."), expected);
    }

    #[test]
    fn punctuation_pacing_uses_injected_units() {
        let loud_commas = PunctuationPacing::new(PauseUnits {
            comma: 5.0,
            ..PauseUnits::default()
        });
        let default = PunctuationPacing::default();
        assert!((loud_commas.weight("a, b") - default.weight("a, b") - 4.65).abs() < 1e-9);
        assert_eq!(loud_commas.units().comma, 5.0);
    }

    #[test]
    fn boundary_segmenter_segment() {
        let segmenter = BoundarySegmenter::new(0);
        let pacing = PunctuationPacing::default();
        let spans = segmenter.segment("One. Two.", &pacing);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].weight, pacing.weight("One."));
    }

    #[test]
    fn boundary_segmenter_defaults_to_ten_word_floor() {
        let segmenter = BoundarySegmenter::default();
        let spans = segmenter.segment("One. Two.", &PunctuationPacing::default());
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn weighted_progress_mapper_round_trip() {
        let mapper = WeightedProgressMapper;
        let spans = BoundarySegmenter::new(0).segment(
            "First sentence here. Second one is a little longer. Third.",
            &PunctuationPacing::default(),
        );
        let t = mapper.seek_seconds(&spans, 1, 30.0).expect("valid index");
        let idx = mapper.active_index(&spans, t, 30.0).expect("non-empty");
        assert!(idx == 0 || idx == 1 || idx == 2);
        assert_eq!(mapper.active_index(&spans, 30.0, 30.0), Some(2));
    }
}
