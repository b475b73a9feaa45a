use crate::config::PauseUnits;

/// Punctuation occurrences that cost a pause when spoken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PauseCounts {
    pub commas: usize,
    pub semicolons: usize,
    pub colons: usize,
    /// `.`, `!` and `?` left over once ellipsis dots are removed.
    pub end_stops: usize,
    pub ellipses: usize,
    pub quotes: usize,
    pub dashes: usize,
    pub newlines: usize,
    pub paragraph_breaks: usize,
}

impl PauseCounts {
    pub fn cost(&self, units: &PauseUnits) -> f64 {
        self.commas as f64 * units.comma
            + self.semicolons as f64 * units.semicolon
            + self.colons as f64 * units.colon
            + self.end_stops as f64 * units.end_stop
            + self.ellipses as f64 * units.ellipsis
            + self.quotes as f64 * units.quote
            + self.dashes as f64 * units.dash
            + self.newlines as f64 * units.newline
            + self.paragraph_breaks as f64 * units.paragraph_break
    }
}

/// Estimated spoken-time cost of a raw (untrimmed) transcript slice.
pub fn span_weight(raw: &str, units: &PauseUnits) -> f64 {
    let words = count_words(raw) as f64;
    let pauses = count_pauses(raw).cost(units);
    let chars = raw.trim().chars().count() as f64;
    let nudge = (chars / units.length_nudge_chars).min(units.length_nudge_cap);
    (words + pauses + nudge).max(units.min_weight)
}

/// Counts alphanumeric runs. An apostrophe between two alphanumerics keeps
/// the run going, so contractions count once.
pub fn count_words(text: &str) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut count = 0;
    let mut in_word = false;
    for (i, &c) in chars.iter().enumerate() {
        if c.is_alphanumeric() {
            if !in_word {
                count += 1;
                in_word = true;
            }
            continue;
        }
        let joins_contraction = in_word
            && is_apostrophe(c)
            && chars.get(i + 1).is_some_and(|next| next.is_alphanumeric());
        if !joins_contraction {
            in_word = false;
        }
    }
    count
}

pub fn count_pauses(raw: &str) -> PauseCounts {
    let chars: Vec<char> = raw.chars().collect();
    let mut counts = PauseCounts::default();
    let mut raw_stops = 0usize;
    let mut newline_run = 0usize;

    for (i, &c) in chars.iter().enumerate() {
        match c {
            ',' => counts.commas += 1,
            ';' => counts.semicolons += 1,
            ':' => counts.colons += 1,
            '.' | '!' | '?' => raw_stops += 1,
            '\u{2026}' => counts.ellipses += 1,
            '\u{2014}' | '\u{2013}' => counts.dashes += 1,
            '"' | '\u{201C}' | '\u{201D}' => counts.quotes += 1,
            '\'' | '\u{2018}' | '\u{2019}' => {
                let inside_word = i > 0
                    && chars[i - 1].is_alphanumeric()
                    && chars.get(i + 1).is_some_and(|next| next.is_alphanumeric());
                if !inside_word {
                    counts.quotes += 1;
                }
            }
            _ => {}
        }

        if c == '\n' {
            newline_run += 1;
        } else if !c.is_whitespace() {
            close_newline_run(&mut counts, newline_run);
            newline_run = 0;
        }
    }
    close_newline_run(&mut counts, newline_run);

    let dotted_ellipses = raw.matches("...").count();
    counts.ellipses += dotted_ellipses;
    counts.end_stops = raw_stops.saturating_sub(dotted_ellipses * 3);
    counts.dashes += raw.matches("--").count();
    counts
}

fn close_newline_run(counts: &mut PauseCounts, run: usize) {
    match run {
        0 => {}
        1 => counts.newlines += 1,
        _ => counts.paragraph_breaks += 1,
    }
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}
