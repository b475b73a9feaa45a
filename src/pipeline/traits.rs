use crate::types::Span;

pub trait PacingModel: Send + Sync {
    /// Spoken-time cost of a raw, untrimmed transcript slice. Must be > 0.
    fn weight(&self, raw_slice: &str) -> f64;
}

pub trait SentenceSegmenter: Send + Sync {
    fn segment(&self, transcript: &str, pacing: &dyn PacingModel) -> Vec<Span>;
}

pub trait ProgressMapper: Send + Sync {
    fn active_index(&self, spans: &[Span], current_seconds: f64, duration_seconds: f64)
        -> Option<usize>;

    fn seek_seconds(&self, spans: &[Span], index: usize, duration_seconds: f64) -> Option<f64>;
}
