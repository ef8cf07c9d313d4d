//! Debounced search input.
//!
//! Every keystroke restarts the timer. A term is committed only when the
//! timer runs out without another keystroke arriving.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::debug;

/// Quiet period before a typed search term is applied.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Timer state for one search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDebounce {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Default for SearchDebounce {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}

impl SearchDebounce {
    /// Debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a keystroke at `now`, replacing any pending term.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some((text.into(), now + self.delay));
    }

    /// When the pending term will commit.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Take the pending term if its timer has run out by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.pending.take() {
            Some((term, deadline)) if deadline <= now => Some(term),
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// Drop the pending term.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Forward debounced terms from `input` to `output` until either side closes.
///
/// A term still pending when `input` closes is dropped.
pub async fn run_search_debounce(
    mut input: mpsc::Receiver<String>,
    output: mpsc::Sender<String>,
    delay: Duration,
) {
    let mut debounce = SearchDebounce::new(delay);
    loop {
        let deadline = debounce.deadline();
        tokio::select! {
            biased;
            received = input.recv() => match received {
                Some(text) => debounce.input(text, Instant::now()),
                None => {
                    debounce.cancel();
                    break;
                }
            },
            () = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                let Some(term) = debounce.poll(Instant::now()) else {
                    continue;
                };
                debug!(term_len = term.chars().count(), "search term committed");
                if output.send(term).await.is_err() {
                    break;
                }
            }
        }
    }
}
