use crate::alignment::pacing::count_words;
use crate::types::Span;

/// Splits a transcript into sentence-like spans and merges spans shorter than
/// `min_span_words` into their successor.
///
/// `weigh` is called once per raw, untrimmed slice; merged spans carry the sum
/// of their parts.
pub fn segment<F>(transcript: &str, min_span_words: usize, weigh: F) -> Vec<Span>
where
    F: Fn(&str) -> f64,
{
    if transcript.trim().is_empty() {
        return Vec::new();
    }

    let raw = split_raw_spans(transcript, &weigh);
    let raw_count = raw.len();
    let spans = merge_short_spans(raw, min_span_words);
    tracing::debug!(
        raw_spans = raw_count,
        merged_spans = spans.len(),
        min_span_words,
        "segmentation: transcript split"
    );
    spans
}

fn split_raw_spans<F>(transcript: &str, weigh: &F) -> Vec<Span>
where
    F: Fn(&str) -> f64,
{
    let mut spans = Vec::new();
    let mut start = 0usize;
    let mut prev: Option<char> = None;
    let mut chars = transcript.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        let end = idx + c.len_utf8();
        let is_boundary = match c {
            '\n' => true,
            '.' | '!' | '?' => {
                let closes = match next {
                    Some(n) => n.is_whitespace(),
                    None => true,
                };
                let decimal = prev.is_some_and(|p| p.is_ascii_digit())
                    && next.is_some_and(|n| n.is_ascii_digit());
                closes && !decimal
            }
            _ => false,
        };
        if is_boundary {
            push_trimmed(transcript, start, end, weigh, &mut spans);
            start = end;
        }
        prev = Some(c);
    }

    if start < transcript.len() {
        push_trimmed(transcript, start, transcript.len(), weigh, &mut spans);
    }
    spans
}

fn push_trimmed<F>(transcript: &str, raw_start: usize, raw_end: usize, weigh: &F, out: &mut Vec<Span>)
where
    F: Fn(&str) -> f64,
{
    let raw = &transcript[raw_start..raw_end];
    let text = raw.trim();
    if text.is_empty() {
        return;
    }
    let left_trim = raw.len() - raw.trim_start().len();
    let right_trim = raw.len() - raw.trim_end().len();
    out.push(Span {
        text: text.to_string(),
        start: raw_start + left_trim,
        end: raw_end - right_trim,
        weight: weigh(raw),
    });
}

fn merge_short_spans(raw: Vec<Span>, min_span_words: usize) -> Vec<Span> {
    let mut merged = Vec::with_capacity(raw.len());
    let mut pending: Option<Span> = None;

    for span in raw {
        let current = match pending.take() {
            Some(mut short) => {
                tracing::debug!(
                    short_text = short.text.as_str(),
                    into_start = span.start,
                    "segmentation: merging short span into successor"
                );
                short.absorb(span);
                short
            }
            None => span,
        };
        if count_words(&current.text) < min_span_words {
            pending = Some(current);
        } else {
            merged.push(current);
        }
    }

    // Trailing span stays even when it is still under the floor.
    if let Some(rest) = pending {
        merged.push(rest);
    }
    merged
}
