use std::time::{Duration, Instant};

/// Characters per word used when the text has no tokens to count.
pub const AVERAGE_WORD_LENGTH: f64 = 5.0;

/// Start/finish timestamps of one typing session and the WPM frozen at finish.
#[derive(Clone, Debug, Default)]
pub struct SessionClock {
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
    wpm: f64,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn start(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Stops the clock and freezes the WPM computed from `reference`.
    /// Calling it again returns the frozen value untouched.
    pub fn finish(&mut self, now: Instant, reference: &str) -> f64 {
        if self.finished_at.is_some() {
            return self.wpm;
        }
        // finished implies started
        self.start(now);
        self.finished_at = Some(now);
        self.wpm = words_per_minute(word_count(reference), self.elapsed(now));
        self.wpm
    }

    pub fn current_wpm(&self, now: Instant, typed: &str) -> f64 {
        if self.is_finished() {
            return self.wpm;
        }
        if !self.is_started() {
            return 0.0;
        }
        words_per_minute(word_count(typed), self.elapsed(now))
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.saturating_duration_since(start),
            (Some(start), None) => now.saturating_duration_since(start),
            _ => Duration::ZERO,
        }
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<Instant> {
        self.finished_at
    }

    pub fn wpm(&self) -> f64 {
        self.wpm
    }
}

/// Whitespace-separated tokens; text with no tokens at all (only whitespace) counts `chars / 5`.
pub fn word_count(text: &str) -> f64 {
    let tokens = text.split_whitespace().count();
    if tokens > 0 {
        tokens as f64
    } else {
        text.chars().count() as f64 / AVERAGE_WORD_LENGTH
    }
}

fn words_per_minute(words: f64, elapsed: Duration) -> f64 {
    let minutes = elapsed.as_secs_f64() / 60.0;
    if minutes <= 0.0 || words <= 0.0 {
        return 0.0;
    }
    let wpm = words / minutes;
    if wpm.is_finite() { wpm } else { 0.0 }
}
