use crate::config::ReadAlongConfig;
use crate::error::ReadAlongError;
use crate::pipeline::defaults::{BoundarySegmenter, PunctuationPacing, WeightedProgressMapper};
use crate::pipeline::runtime::{ReadAlongEngine, ReadAlongEngineParts};
use crate::pipeline::traits::{PacingModel, ProgressMapper, SentenceSegmenter};

pub struct ReadAlongBuilder {
    config: ReadAlongConfig,
    segmenter: Option<Box<dyn SentenceSegmenter>>,
    pacing: Option<Box<dyn PacingModel>>,
    mapper: Option<Box<dyn ProgressMapper>>,
}

impl ReadAlongBuilder {
    pub fn new(config: ReadAlongConfig) -> Self {
        Self {
            config,
            segmenter: None,
            pacing: None,
            mapper: None,
        }
    }

    pub fn with_segmenter(mut self, segmenter: Box<dyn SentenceSegmenter>) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    pub fn with_pacing_model(mut self, pacing: Box<dyn PacingModel>) -> Self {
        self.pacing = Some(pacing);
        self
    }

    pub fn with_progress_mapper(mut self, mapper: Box<dyn ProgressMapper>) -> Self {
        self.mapper = Some(mapper);
        self
    }

    /// A non-default word floor that a custom segmenter will not see.
    fn ignored_span_floor(&self) -> Option<usize> {
        let floor = self.config.min_span_words;
        (self.segmenter.is_some() && floor != ReadAlongConfig::DEFAULT_MIN_SPAN_WORDS)
            .then_some(floor)
    }

    pub fn build(self) -> Result<ReadAlongEngine, ReadAlongError> {
        self.config.validate()?;
        if let Some(min_span_words) = self.ignored_span_floor() {
            tracing::warn!(
                min_span_words,
                "custom segmenter supplied; configured min_span_words is not applied"
            );
        }

        tracing::info!(
            min_span_words = self.config.min_span_words,
            custom_segmenter = self.segmenter.is_some(),
            custom_pacing = self.pacing.is_some(),
            custom_mapper = self.mapper.is_some(),
            "read-along engine ready"
        );

        let config = self.config;
        Ok(ReadAlongEngine::from_parts(ReadAlongEngineParts {
            segmenter: self
                .segmenter
                .unwrap_or_else(|| Box::new(BoundarySegmenter::new(config.min_span_words))),
            pacing: self
                .pacing
                .unwrap_or_else(|| Box::new(PunctuationPacing::new(config.pauses.clone()))),
            mapper: self
                .mapper
                .unwrap_or_else(|| Box::new(WeightedProgressMapper)),
            config,
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::PauseUnits;
    use crate::types::Span;

    use super::*;

    struct EvenSplitter;

    impl SentenceSegmenter for EvenSplitter {
        fn segment(&self, transcript: &str, pacing: &dyn PacingModel) -> Vec<Span> {
            let mut offset = 0;
            transcript
                .split(' ')
                .filter_map(|word| {
                    let start = offset;
                    offset += word.len() + 1;
                    (!word.is_empty()).then(|| Span {
                        text: word.to_string(),
                        start,
                        end: start + word.len(),
                        weight: pacing.weight(word),
                    })
                })
                .collect()
        }
    }

    struct FlatPacing;

    impl PacingModel for FlatPacing {
        fn weight(&self, _raw_slice: &str) -> f64 {
            1.0
        }
    }

    #[test]
    fn builder_defaults_follow_config() {
        let engine = ReadAlongBuilder::new(ReadAlongConfig {
            min_span_words: 0,
            ..ReadAlongConfig::default()
        })
        .build()
        .expect("default config is valid");
        let spans = engine.segment("One. Two.");
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn builder_accepts_custom_parts() {
        let engine = ReadAlongBuilder::new(ReadAlongConfig::default())
            .with_segmenter(Box::new(EvenSplitter))
            .with_pacing_model(Box::new(FlatPacing))
            .build()
            .expect("build should succeed");
        let spans = engine.segment("alpha beta gamma delta");
        assert_eq!(spans.len(), 4);
        assert!(spans.iter().all(|s| s.weight == 1.0));
        assert_eq!(engine.active_index(&spans, 5.0, 10.0), Some(1));
    }

    #[test]
    fn only_an_explicit_floor_is_reported_as_ignored() {
        let default_floor =
            ReadAlongBuilder::new(ReadAlongConfig::default()).with_segmenter(Box::new(EvenSplitter));
        assert_eq!(default_floor.ignored_span_floor(), None);

        let explicit = ReadAlongConfig {
            min_span_words: 4,
            ..ReadAlongConfig::default()
        };
        assert_eq!(ReadAlongBuilder::new(explicit.clone()).ignored_span_floor(), None);
        let custom = ReadAlongBuilder::new(explicit).with_segmenter(Box::new(EvenSplitter));
        assert_eq!(custom.ignored_span_floor(), Some(4));
    }

    #[test]
    fn build_fails_on_invalid_pause_units() {
        let config = ReadAlongConfig {
            pauses: PauseUnits {
                comma: f64::NAN,
                ..PauseUnits::default()
            },
            ..ReadAlongConfig::default()
        };
        let result = ReadAlongBuilder::new(config).build();
        assert!(matches!(result, Err(ReadAlongError::InvalidConfig { .. })));
    }
}
