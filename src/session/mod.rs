//! View-side synchronization: keeps the highlighted span, the auto-scroll
//! target and click-to-seek consistent with the playback clock.

mod playback;

pub use playback::{available_speeds, clamp_rate, format_timestamp, PlaybackElement, ALL_SPEEDS};

use crate::config::SessionConfig;
use crate::pipeline::runtime::ReadAlongEngine;
use crate::scroll::{reading_band_offset, ScrollTick, ScrollViewport, SmoothScroller};
use crate::types::{PlaybackSnapshot, Span};

/// Transcript container that can report where each rendered span sits.
pub trait TranscriptViewport: ScrollViewport {
    /// Top edge of span `index` in content coordinates, if it is rendered.
    fn span_top(&self, index: usize) -> Option<f64>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Current and next span only; nothing scrolls.
    #[default]
    Focus,
    /// Every span, with the viewport eased towards the active one.
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptStatus {
    Missing,
    Unsplittable,
    Ready { span_count: usize },
}

impl TranscriptStatus {
    /// Informational text shown in place of the transcript, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Missing => Some("No transcript found."),
            Self::Unsplittable => Some("Couldn't split transcript into sentences."),
            Self::Ready { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanEmphasis {
    Active,
    /// Inactive while audio is playing.
    Dimmed,
    /// Inactive while paused.
    Resting,
}

impl SpanEmphasis {
    pub fn opacity(self) -> f64 {
        match self {
            Self::Active => 1.0,
            Self::Dimmed => 0.82,
            Self::Resting => 0.95,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanView<'a> {
    pub index: usize,
    pub text: &'a str,
    pub emphasis: SpanEmphasis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusLines<'a> {
    pub current: &'a str,
    pub next: &'a str,
}

pub struct ReadAlongSession {
    engine: ReadAlongEngine,
    config: SessionConfig,
    transcript: String,
    spans: Vec<Span>,
    layout_generation: u64,
    playback: PlaybackSnapshot,
    active: Option<usize>,
    mode: ViewMode,
    highlight: bool,
    auto_scroll: bool,
    scroll_anchor: Option<usize>,
    muted: bool,
    rate: f64,
    scroller: SmoothScroller,
}

impl ReadAlongSession {
    pub fn new(engine: ReadAlongEngine, scroller: SmoothScroller) -> Self {
        let config = engine.config().session.clone();
        Self {
            engine,
            config,
            transcript: String::new(),
            spans: Vec::new(),
            layout_generation: 0,
            playback: PlaybackSnapshot::default(),
            active: None,
            mode: ViewMode::default(),
            highlight: true,
            auto_scroll: true,
            scroll_anchor: None,
            muted: false,
            rate: 1.0,
            scroller,
        }
    }

    /// Replaces the transcript. Old spans and any layout derived from them are
    /// invalid once this returns.
    pub fn set_transcript(&mut self, transcript: impl Into<String>) {
        self.transcript = transcript.into();
        self.spans = self.engine.segment(&self.transcript);
        self.layout_generation += 1;
        self.scroller.cancel();
        self.scroll_anchor = None;
        self.refresh_active();
        tracing::debug!(
            spans = self.spans.len(),
            generation = self.layout_generation,
            "session: transcript replaced"
        );
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Bumped whenever spans are replaced; hosts drop per-span layout when it
    /// changes.
    pub fn layout_generation(&self) -> u64 {
        self.layout_generation
    }

    pub fn playback(&self) -> PlaybackSnapshot {
        self.playback
    }

    pub fn status(&self) -> TranscriptStatus {
        if self.transcript.is_empty() {
            TranscriptStatus::Missing
        } else if self.spans.is_empty() {
            TranscriptStatus::Unsplittable
        } else {
            TranscriptStatus::Ready {
                span_count: self.spans.len(),
            }
        }
    }

    pub fn summary(&self) -> String {
        let active = self
            .active
            .map(|i| (i + 1).to_string())
            .unwrap_or_else(|| "\u{2014}".to_string());
        format!("sentences: {} \u{2022} active: {}", self.spans.len(), active)
    }

    pub fn on_loaded_metadata(&mut self, duration: f64) {
        self.playback.duration = if duration.is_finite() { duration } else { 0.0 };
        self.refresh_active();
    }

    pub fn on_time_update(&mut self, current_time: f64) -> Option<usize> {
        self.playback.current_time = current_time;
        self.refresh_active();
        self.active
    }

    /// Pulls clock state from the player for hosts without media events.
    pub fn sync_from<P>(&mut self, player: &P) -> Option<usize>
    where
        P: PlaybackElement + ?Sized,
    {
        let duration = player.duration();
        self.playback.duration = if duration.is_finite() { duration } else { 0.0 };
        self.playback.is_playing = !player.is_paused();
        self.on_time_update(player.current_time())
    }

    pub fn on_play(&mut self) {
        self.playback.is_playing = true;
    }

    /// Also used for the `ended` notification.
    pub fn on_pause(&mut self) {
        self.playback.is_playing = false;
    }

    fn refresh_active(&mut self) {
        self.active = self.engine.active_index(
            &self.spans,
            self.playback.current_time,
            self.playback.duration,
        );
    }

    pub fn view_mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if mode != ViewMode::Full {
            self.scroller.cancel();
        }
        self.mode = mode;
        self.scroll_anchor = None;
    }

    pub fn highlight_enabled(&self) -> bool {
        self.highlight
    }

    pub fn set_highlight(&mut self, enabled: bool) {
        self.highlight = enabled;
    }

    pub fn auto_scroll_enabled(&self) -> bool {
        self.auto_scroll
    }

    pub fn set_auto_scroll(&mut self, enabled: bool) {
        if !enabled {
            self.scroller.cancel();
        }
        self.auto_scroll = enabled;
        self.scroll_anchor = None;
    }

    pub fn focus_lines(&self) -> FocusLines<'_> {
        let line = |i: usize| self.spans.get(i).map(|s| s.text.as_str()).unwrap_or("");
        match self.active {
            Some(i) => FocusLines {
                current: line(i),
                next: line(i + 1),
            },
            None => FocusLines {
                current: "",
                next: "",
            },
        }
    }

    pub fn span_views(&self) -> Vec<SpanView<'_>> {
        self.spans
            .iter()
            .enumerate()
            .map(|(index, span)| {
                let emphasis = if self.highlight && self.active == Some(index) {
                    SpanEmphasis::Active
                } else if self.playback.is_playing {
                    SpanEmphasis::Dimmed
                } else {
                    SpanEmphasis::Resting
                };
                SpanView {
                    index,
                    text: &span.text,
                    emphasis,
                }
            })
            .collect()
    }

    /// Points the scroll controller at the active span. Runs once per active
    /// span change; returns the new target when one was set.
    pub fn sync_scroll<V>(&mut self, viewport: &mut V) -> Option<f64>
    where
        V: TranscriptViewport + ?Sized,
    {
        if !self.auto_scroll || self.mode != ViewMode::Full {
            self.scroller.cancel();
            return None;
        }
        let active = self.active?;
        if self.scroll_anchor == Some(active) {
            return None;
        }
        let top = viewport.span_top(active)?;
        let target = reading_band_offset(viewport, top, self.config.reading_band);
        self.scroller.set_target(viewport, target);
        self.scroll_anchor = Some(active);
        Some(target)
    }

    /// Animation frame callback.
    pub fn tick_scroll<V>(&mut self, viewport: &mut V) -> ScrollTick
    where
        V: ScrollViewport + ?Sized,
    {
        self.scroller.tick(viewport)
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroller.is_easing()
    }

    /// Seeks to `seconds`, clamped to `[0, duration]`. Returns the applied time.
    pub fn seek<P>(&mut self, player: &mut P, seconds: f64) -> f64
    where
        P: PlaybackElement + ?Sized,
    {
        let duration = if self.playback.duration.is_finite() {
            self.playback.duration.max(0.0)
        } else {
            0.0
        };
        let clamped = if seconds.is_finite() {
            seconds.clamp(0.0, duration)
        } else {
            0.0
        };
        player.seek(clamped);
        self.on_time_update(clamped);
        clamped
    }

    pub fn skip<P>(&mut self, player: &mut P, delta_seconds: f64) -> f64
    where
        P: PlaybackElement + ?Sized,
    {
        let target = self.playback.current_time + delta_seconds;
        self.seek(player, target)
    }

    pub fn skip_forward<P>(&mut self, player: &mut P) -> f64
    where
        P: PlaybackElement + ?Sized,
    {
        self.skip(player, self.config.skip_seconds)
    }

    pub fn skip_back<P>(&mut self, player: &mut P) -> f64
    where
        P: PlaybackElement + ?Sized,
    {
        self.skip(player, -self.config.skip_seconds)
    }

    /// Click-to-seek. Ignored until the audio duration is known.
    pub fn seek_to_span<P>(&mut self, player: &mut P, index: usize) -> Option<f64>
    where
        P: PlaybackElement + ?Sized,
    {
        let duration = self.playback.duration;
        if !duration.is_finite() || duration <= 0.0 {
            return None;
        }
        let seconds = self.engine.seek_seconds(&self.spans, index, duration)?;
        Some(self.seek(player, seconds))
    }

    pub fn toggle_play<P>(&mut self, player: &mut P)
    where
        P: PlaybackElement + ?Sized,
    {
        if player.is_paused() {
            player.play();
        } else {
            player.pause();
        }
    }

    pub fn progress_percent(&self) -> f64 {
        let PlaybackSnapshot {
            current_time,
            duration,
            ..
        } = self.playback;
        if !(duration > 0.0 && duration.is_finite()) || !current_time.is_finite() {
            return 0.0;
        }
        (current_time / duration * 100.0).clamp(0.0, 100.0)
    }

    pub fn time_label(&self) -> String {
        format!(
            "{} / {}",
            format_timestamp(self.playback.current_time),
            format_timestamp(self.playback.duration)
        )
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn speeds(&self) -> Vec<f64> {
        available_speeds(self.config.max_speed)
    }

    pub fn set_rate<P>(&mut self, player: &mut P, rate: f64)
    where
        P: PlaybackElement + ?Sized,
    {
        if !rate.is_finite() || rate <= 0.0 {
            return;
        }
        self.rate = clamp_rate(rate, self.config.max_speed);
        player.set_playback_rate(self.rate);
    }

    /// Plan change. A rate the new plan no longer allows drops to the fastest
    /// one it does.
    pub fn set_max_speed<P>(&mut self, player: &mut P, max_speed: f64)
    where
        P: PlaybackElement + ?Sized,
    {
        self.config.max_speed = max_speed;
        let rate = clamp_rate(self.rate, max_speed);
        if rate != self.rate {
            self.rate = rate;
            player.set_playback_rate(rate);
        }
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn toggle_mute<P>(&mut self, player: &mut P)
    where
        P: PlaybackElement + ?Sized,
    {
        self.muted = !self.muted;
        player.set_muted(self.muted);
    }
}
