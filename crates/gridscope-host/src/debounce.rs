//! Debouncing for search-as-you-type.
//!
//! The engine recomputes from scratch on every call; a caller typing into
//! a search box settles each keystroke through a [`Debouncer`] and only
//! runs the pipeline for values that survived the quiet period.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Quiet period before a value settles.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

/// Lets only the latest of a burst of values through.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Default for Debouncer {
    fn default() -> Self {
        Debouncer::new(DEFAULT_DELAY)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits out the delay and returns `value`, unless a newer call
    /// started meanwhile, in which case `None`.
    pub async fn settle<T>(&self, value: T) -> Option<T> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        if self.generation.load(Ordering::SeqCst) == ticket {
            Some(value)
        } else {
            log::trace!("debounced value superseded");
            None
        }
    }
}
