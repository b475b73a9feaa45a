use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Span {
    /// Trimmed display text.
    pub text: String,
    /// Byte offset into the original transcript, inclusive.
    pub start: usize,
    /// Byte offset into the original transcript, exclusive.
    pub end: usize,
    /// Estimated spoken-time cost; always strictly positive.
    pub weight: f64,
}

impl Span {
    /// Appends `next` to this span, joining the texts with a single space.
    pub(crate) fn absorb(&mut self, next: Span) {
        self.text.push(' ');
        self.text.push_str(&next.text);
        self.end = next.end;
        self.weight += next.weight;
    }
}

/// Estimated playback window of one span, `[start_seconds, end_seconds)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpanTiming {
    pub index: usize,
    pub start_seconds: f64,
    pub end_seconds: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackSnapshot {
    pub current_time: f64,
    pub duration: f64,
    pub is_playing: bool,
}
