/// Host audio element. Only numeric time reads and writes are required.
pub trait PlaybackElement {
    fn current_time(&self) -> f64;
    fn duration(&self) -> f64;
    fn is_paused(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, seconds: f64);
    fn set_playback_rate(&mut self, rate: f64);
    fn set_muted(&mut self, muted: bool);
}

pub const ALL_SPEEDS: [f64; 10] = [1.0, 1.25, 1.5, 2.0, 2.5, 3.0, 3.5, 5.0, 7.5, 10.0];

/// Speeds offered by the rate menu for a plan allowing up to `max_speed`.
pub fn available_speeds(max_speed: f64) -> Vec<f64> {
    ALL_SPEEDS
        .iter()
        .copied()
        .filter(|&s| s <= max_speed)
        .collect()
}

/// Keeps `rate` when the plan allows it, otherwise falls back to the fastest
/// allowed speed (never below 1x).
pub fn clamp_rate(rate: f64, max_speed: f64) -> f64 {
    if rate <= max_speed {
        return rate;
    }
    available_speeds(max_speed)
        .last()
        .copied()
        .unwrap_or(1.0)
        .max(1.0)
}

/// `m:ss`, with `0:00` for negative or non-finite input.
pub fn format_timestamp(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}
