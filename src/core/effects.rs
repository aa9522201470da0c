//! Cosmetic timed effects
//!
//! Loading messages, the toast slot and the score count-up. None of these
//! spawn anything: each is a value read against `tokio::time::Instant`, so it
//! stops existing when its owner drops it and follows paused time in tests.

use std::time::Duration;

use tokio::time::Instant;

use crate::roast::Language;

static LOADING_MESSAGES_ENGLISH: [&str; 6] = [
    "Analyzing failures...",
    "Judging life choices...",
    "Laughing at the font...",
    "Finding the typos...",
    "Preparing the roast...",
    "Consulting the roast gods...",
];

static LOADING_MESSAGES_HINDI: [&str; 6] = [
    "Resume padh raha hoon...",
    "Hasi rokna mushkil hai...",
    "Bezzati loading...",
    "Chappal taiyaar hai...",
    "Bhai sahab, ye kya hai?",
    "Sharam aa rahi hai...",
];

pub fn loading_messages(language: Language) -> &'static [&'static str; 6] {
    match language {
        Language::English => &LOADING_MESSAGES_ENGLISH,
        Language::Hindi => &LOADING_MESSAGES_HINDI,
    }
}

/// Cycles through the loading phrases
#[derive(Debug, Clone)]
pub struct LoadingTicker {
    messages: &'static [&'static str; 6],
    index: usize,
}

impl LoadingTicker {
    pub fn new(language: Language) -> Self {
        Self {
            messages: loading_messages(language),
            index: 0,
        }
    }

    pub fn current(&self) -> &'static str {
        self.messages[self.index]
    }

    /// Move to the next phrase, wrapping around
    pub fn advance(&mut self) -> &'static str {
        self.index = (self.index + 1) % self.messages.len();
        self.current()
    }
}

/// Single-slot notification that expires on its own
///
/// Posting while a message is visible replaces it and restarts the countdown.
#[derive(Debug, Clone)]
pub struct Toast {
    ttl: Duration,
    slot: Option<(String, Instant)>,
}

impl Toast {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, slot: None }
    }

    pub fn post(&mut self, message: impl Into<String>) {
        self.slot = Some((message.into(), Instant::now()));
    }

    /// The visible message, if any
    pub fn current(&self) -> Option<&str> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<&str> {
        match &self.slot {
            Some((message, posted)) if now.saturating_duration_since(*posted) < self.ttl => {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    /// When the visible message disappears
    pub fn expires_at(&self) -> Option<Instant> {
        self.slot.as_ref().map(|(_, posted)| *posted + self.ttl)
    }
}

/// Linear count-up from 0 to a score
///
/// Display only: `target()` is the real value and is available from the
/// start.
#[derive(Debug, Clone, Copy)]
pub struct ScoreCounter {
    target: i64,
    duration: Duration,
    started: Instant,
}

impl ScoreCounter {
    pub fn start(target: i64, duration: Duration) -> Self {
        Self {
            target,
            duration,
            started: Instant::now(),
        }
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn value(&self) -> i64 {
        self.value_at(Instant::now())
    }

    pub fn value_at(&self, now: Instant) -> i64 {
        if self.target <= 0 || self.duration.is_zero() {
            return self.target;
        }

        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= self.duration {
            return self.target;
        }

        let shown = (self.target as u128 * elapsed.as_nanos()) / self.duration.as_nanos();
        shown as i64
    }

    pub fn is_finished_at(&self, now: Instant) -> bool {
        self.value_at(now) == self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[test]
    fn test_loading_ticker_cycles() {
        let mut ticker = LoadingTicker::new(Language::English);
        assert_eq!(ticker.current(), "Analyzing failures...");

        let seen: Vec<_> = (0..6).map(|_| ticker.advance()).collect();
        assert_eq!(seen[0], "Judging life choices...");
        assert_eq!(seen[5], "Analyzing failures...");

        let ticker = LoadingTicker::new(Language::Hindi);
        assert_eq!(ticker.current(), "Resume padh raha hoon...");
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_expires() {
        let mut toast = Toast::new(Duration::from_millis(3000));
        assert!(toast.current().is_none());

        toast.post("A");
        assert_eq!(toast.current(), Some("A"));

        advance(Duration::from_millis(2999)).await;
        assert_eq!(toast.current(), Some("A"));

        advance(Duration::from_millis(1)).await;
        assert!(toast.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_replacement_restarts_countdown() {
        let mut toast = Toast::new(Duration::from_millis(3000));
        toast.post("A");

        advance(Duration::from_millis(2000)).await;
        toast.post("B");
        assert_eq!(toast.current(), Some("B"));
        assert_eq!(toast.expires_at(), Some(Instant::now() + Duration::from_millis(3000)));

        // A would have expired here
        advance(Duration::from_millis(1500)).await;
        assert_eq!(toast.current(), Some("B"));

        advance(Duration::from_millis(1500)).await;
        assert!(toast.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_score_counts_up_linearly() {
        let counter = ScoreCounter::start(42, Duration::from_millis(1500));
        assert_eq!(counter.target(), 42);
        assert_eq!(counter.value(), 0);

        advance(Duration::from_millis(750)).await;
        assert_eq!(counter.value(), 21);

        advance(Duration::from_millis(750)).await;
        assert_eq!(counter.value(), 42);
        assert!(counter.is_finished_at(Instant::now()));

        advance(Duration::from_secs(10)).await;
        assert_eq!(counter.value(), 42);
    }

    #[tokio::test(start_paused = true)]
    async fn test_score_counter_edge_values() {
        assert_eq!(ScoreCounter::start(0, Duration::from_millis(1500)).value(), 0);
        assert_eq!(ScoreCounter::start(-5, Duration::from_millis(1500)).value(), -5);
        assert_eq!(ScoreCounter::start(100, Duration::ZERO).value(), 100);
    }
}
