use crate::types::{Span, SpanTiming};

/// Total weight used as the denominator of every progress computation.
pub fn total_weight(spans: &[Span]) -> f64 {
    let total: f64 = spans.iter().map(|s| s.weight).sum();
    if total > 0.0 {
        total
    } else {
        1.0
    }
}

/// Maps playback time to the span currently being spoken.
///
/// Returns `None` only when there are no spans. An unusable duration or time
/// (still loading, NaN, infinite) maps to the first span.
pub fn active_index(spans: &[Span], current_seconds: f64, duration_seconds: f64) -> Option<usize> {
    if spans.is_empty() {
        return None;
    }
    if !duration_seconds.is_finite() || duration_seconds <= 0.0 || !current_seconds.is_finite() {
        tracing::debug!(
            current_seconds,
            duration_seconds,
            "progress: degenerate playback clock, pinning to first span"
        );
        return Some(0);
    }

    let progress = (current_seconds / duration_seconds).clamp(0.0, 1.0);
    let target = progress * total_weight(spans);

    let mut acc = 0.0;
    for (i, span) in spans.iter().enumerate() {
        acc += span.weight;
        if acc >= target {
            return Some(i);
        }
    }
    // Floating-point overshoot past the final cumulative bound.
    Some(spans.len() - 1)
}

/// Inverse of [`active_index`]: the playback time at which span `index`
/// starts.
pub fn seek_seconds(spans: &[Span], index: usize, duration_seconds: f64) -> Option<f64> {
    if index >= spans.len() || !duration_seconds.is_finite() || duration_seconds <= 0.0 {
        return None;
    }
    let before: f64 = spans[..index].iter().map(|s| s.weight).sum();
    Some(before / total_weight(spans) * duration_seconds)
}

/// Estimated `[start, end)` playback window of every span.
pub fn span_timeline(spans: &[Span], duration_seconds: f64) -> Vec<SpanTiming> {
    if spans.is_empty() || !duration_seconds.is_finite() || duration_seconds <= 0.0 {
        return Vec::new();
    }
    let total = total_weight(spans);
    let mut acc = 0.0;
    spans
        .iter()
        .enumerate()
        .map(|(index, span)| {
            let start_seconds = acc / total * duration_seconds;
            acc += span.weight;
            let end_seconds = (acc / total * duration_seconds).min(duration_seconds);
            SpanTiming {
                index,
                start_seconds,
                end_seconds,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(weights: &[f64]) -> Vec<Span> {
        let mut offset = 0;
        weights
            .iter()
            .enumerate()
            .map(|(i, &weight)| {
                let text = format!("span {i}");
                let start = offset;
                offset += text.len() + 1;
                Span {
                    end: start + text.len(),
                    text,
                    start,
                    weight,
                }
            })
            .collect()
    }

    #[test]
    fn empty_spans_have_no_active_index() {
        assert_eq!(active_index(&[], 3.0, 10.0), None);
        assert_eq!(seek_seconds(&[], 0, 10.0), None);
        assert!(span_timeline(&[], 10.0).is_empty());
    }

    #[test]
    fn degenerate_clock_pins_first_span() {
        let s = spans(&[1.0, 2.0]);
        assert_eq!(active_index(&s, 5.0, 0.0), Some(0));
        assert_eq!(active_index(&s, 5.0, -1.0), Some(0));
        assert_eq!(active_index(&s, 5.0, f64::NAN), Some(0));
        assert_eq!(active_index(&s, 5.0, f64::INFINITY), Some(0));
        assert_eq!(active_index(&s, f64::NAN, 10.0), Some(0));
    }

    #[test]
    fn boundaries_map_to_first_and_last() {
        let s = spans(&[3.0, 1.0, 2.5, 4.0]);
        assert_eq!(active_index(&s, 0.0, 60.0), Some(0));
        assert_eq!(active_index(&s, 60.0, 60.0), Some(3));
        assert_eq!(active_index(&s, -4.0, 60.0), Some(0));
        assert_eq!(active_index(&s, 600.0, 60.0), Some(3));
    }

    #[test]
    fn weights_decide_the_active_span() {
        // Cumulative bounds: 1, 4, 5 out of 5.
        let s = spans(&[1.0, 3.0, 1.0]);
        assert_eq!(active_index(&s, 1.0, 10.0), Some(0));
        assert_eq!(active_index(&s, 2.1, 10.0), Some(1));
        assert_eq!(active_index(&s, 7.9, 10.0), Some(1));
        assert_eq!(active_index(&s, 8.1, 10.0), Some(2));
    }

    #[test]
    fn mapping_is_monotonic() {
        let s = spans(&[0.7, 2.2, 1.3, 0.05, 5.0, 1.1]);
        let mut last = 0;
        for step in 0..=1_000 {
            let t = step as f64 * 0.042;
            let idx = active_index(&s, t, 42.0).expect("non-empty");
            assert!(idx >= last, "index went backwards at t={t}");
            last = idx;
        }
        assert_eq!(last, s.len() - 1);
    }

    #[test]
    fn seek_is_consistent_with_forward_mapping() {
        let s = spans(&[0.7, 2.2, 1.3, 0.05, 5.0, 1.1]);
        for i in 0..s.len() {
            let t = seek_seconds(&s, i, 42.0).expect("valid index");
            let idx = active_index(&s, t, 42.0).expect("non-empty");
            assert!(
                idx + 1 >= i && idx <= i + 1,
                "span {i} seeks to {t}, maps back to {idx}"
            );
        }
    }

    #[test]
    fn seek_rejects_out_of_range_and_unknown_duration() {
        let s = spans(&[1.0, 1.0]);
        assert_eq!(seek_seconds(&s, 2, 10.0), None);
        assert_eq!(seek_seconds(&s, 1, 0.0), None);
        assert_eq!(seek_seconds(&s, 1, 10.0), Some(5.0));
    }

    #[test]
    fn timeline_covers_the_whole_duration() {
        let s = spans(&[1.0, 2.0, 1.0]);
        let timeline = span_timeline(&s, 20.0);
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline[0].start_seconds, 0.0);
        assert_eq!(timeline[0].end_seconds, 5.0);
        assert_eq!(timeline[1].start_seconds, 5.0);
        assert_eq!(timeline[1].end_seconds, 15.0);
        assert_eq!(timeline[2].end_seconds, 20.0);
        for pair in timeline.windows(2) {
            assert_eq!(pair[0].end_seconds, pair[1].start_seconds);
        }
    }
}
