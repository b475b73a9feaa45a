pub mod alignment;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod scroll;
pub mod session;
pub mod types;

pub use alignment::pacing::{count_pauses, count_words, span_weight, PauseCounts};
pub use alignment::progress::{active_index, seek_seconds, span_timeline};
pub use alignment::report::{build_timeline_report, ReportMeta, TimelineReport};
pub use config::{PauseUnits, ReadAlongConfig, ScrollConfig, SessionConfig};
pub use error::ReadAlongError;
pub use pipeline::builder::ReadAlongBuilder;
pub use pipeline::runtime::ReadAlongEngine;
pub use pipeline::traits::{PacingModel, ProgressMapper, SentenceSegmenter};
pub use scroll::{
    FrameHandle, FrameScheduler, ManualFrameScheduler, MotionPreference, ScrollTick,
    ScrollViewport, SmoothScroller,
};
pub use session::{PlaybackElement, ReadAlongSession, TranscriptViewport, ViewMode};
pub use types::{PlaybackSnapshot, Span, SpanTiming};

/// Segments `transcript` with the default pause table and a 10-word floor.
pub fn segment(transcript: &str) -> Vec<Span> {
    let units = PauseUnits::default();
    alignment::segmentation::segment(
        transcript,
        ReadAlongConfig::DEFAULT_MIN_SPAN_WORDS,
        |raw| span_weight(raw, &units),
    )
}
