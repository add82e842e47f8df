//! Single-slot debouncing of a stream of input values.
//!
//! Raw values arrive faster than they are worth acting on (one per keystroke). The
//! [`Debouncer`] holds on to the most recent value and only hands it out once the input
//! has been quiet for the settle period. Every new value restarts the one and only
//! deadline, so a superseded value is never emitted.
//!
//! ```text
//! events:   l   le  lea                     lean
//!           |---|---|------- 300ms -------->|---...
//! settled:                              "lea"
//! ```
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use usersearch::searching::debounce::{DebounceEvent, Debouncer};
//!
//! # tokio_test::block_on(async {
//! let (events, mut debouncer) = Debouncer::channel(Duration::from_millis(10), 16);
//! events.send(DebounceEvent::Update("l")).await.unwrap();
//! events.send(DebounceEvent::Update("le")).await.unwrap();
//! events.send(DebounceEvent::Update("lea")).await.unwrap();
//! drop(events);
//!
//! assert_eq!(debouncer.next_settled().await, Some("lea"));
//! assert_eq!(debouncer.next_settled().await, None);
//! # });
//! ```

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};

/// Default quiet period before a value is considered settled.
pub const DEFAULT_SETTLE_PERIOD: Duration = Duration::from_millis(300);

/// One raw input change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceEvent<T> {
    /// Replace the pending value and restart the settle timer.
    Update(T),
    /// Drop any pending value and emit this one without waiting.
    Immediate(T),
}

/// What woke the debounce loop.
enum Wake<T> {
    Event(Option<DebounceEvent<T>>),
    Elapsed,
}

/// Coalesces [`DebounceEvent`]s into settled values.
///
/// There is at most one live deadline at any time. Receiving an `Update` overwrites both
/// the pending value and the deadline, which cancels the previous firing. When the
/// sending side closes, a still-pending value is flushed immediately and the next call
/// returns `None`.
#[derive(Debug)]
pub struct Debouncer<T> {
    settle_period: Duration,
    events: mpsc::Receiver<DebounceEvent<T>>,
    pending: Option<T>,
    deadline: Option<Instant>,
    closed: bool,
}

impl<T> Debouncer<T> {
    pub fn new(settle_period: Duration, events: mpsc::Receiver<DebounceEvent<T>>) -> Self {
        Self {
            settle_period,
            events,
            pending: None,
            deadline: None,
            closed: false,
        }
    }

    /// Creates a debouncer together with the sender that feeds it.
    ///
    /// # Arguments
    ///
    /// * `settle_period` - Quiet time required before a value is emitted
    /// * `buffer` - Capacity of the underlying channel
    pub fn channel(settle_period: Duration, buffer: usize) -> (mpsc::Sender<DebounceEvent<T>>, Self) {
        let (tx, rx) = mpsc::channel(buffer);
        (tx, Self::new(settle_period, rx))
    }

    pub fn settle_period(&self) -> Duration {
        self.settle_period
    }

    /// Whether a value is waiting for its deadline.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Waits for the next settled value.
    ///
    /// # Returns
    ///
    /// * `Some(value)` - The last value seen before the input went quiet for the settle
    ///   period, an `Immediate` value, or a value flushed because the input closed
    /// * `None` - The input is closed and nothing is pending
    pub async fn next_settled(&mut self) -> Option<T> {
        loop {
            if self.closed {
                self.deadline = None;
                return self.pending.take();
            }

            let wake = match self.deadline {
                Some(deadline) => {
                    tokio::select! {
                        event = self.events.recv() => Wake::Event(event),
                        _ = time::sleep_until(deadline) => Wake::Elapsed,
                    }
                }
                None => Wake::Event(self.events.recv().await),
            };

            match wake {
                Wake::Event(Some(DebounceEvent::Update(value))) => {
                    self.pending = Some(value);
                    self.deadline = Some(Instant::now() + self.settle_period);
                }
                Wake::Event(Some(DebounceEvent::Immediate(value))) => {
                    self.pending = None;
                    self.deadline = None;
                    return Some(value);
                }
                Wake::Event(None) => {
                    self.closed = true;
                }
                Wake::Elapsed => {
                    self.deadline = None;
                    if let Some(value) = self.pending.take() {
                        return Some(value);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTLE: Duration = DEFAULT_SETTLE_PERIOD;

    async fn drain(debouncer: &mut Debouncer<&'static str>) -> Vec<&'static str> {
        let mut settled = Vec::new();
        while let Some(value) = debouncer.next_settled().await {
            settled.push(value);
        }
        settled
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_updates_emit_last_value_once() {
        let (tx, mut debouncer) = Debouncer::channel(SETTLE, 16);
        let start = Instant::now();
        for value in ["l", "le", "lea"] {
            tx.send(DebounceEvent::Update(value)).await.unwrap();
        }

        assert_eq!(debouncer.next_settled().await, Some("lea"));
        assert!(start.elapsed() >= SETTLE);
        assert!(!debouncer.has_pending());

        drop(tx);
        assert_eq!(debouncer.next_settled().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_updates_within_window_restart_the_timer() {
        let (tx, mut debouncer) = Debouncer::channel(SETTLE, 16);
        tokio::spawn(async move {
            tx.send(DebounceEvent::Update("l")).await.unwrap();
            time::sleep(Duration::from_millis(200)).await;
            tx.send(DebounceEvent::Update("le")).await.unwrap();
            time::sleep(Duration::from_millis(200)).await;
            tx.send(DebounceEvent::Update("lea")).await.unwrap();
            // keep the sender alive past the settle period
            time::sleep(Duration::from_millis(1_000)).await;
        });

        let start = Instant::now();
        assert_eq!(debouncer.next_settled().await, Some("lea"));
        // 400ms of typing plus one full settle period after the last value
        assert!(start.elapsed() >= Duration::from_millis(700));
        assert_eq!(debouncer.next_settled().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gap_longer_than_settle_emits_each() {
        let (tx, mut debouncer) = Debouncer::channel(SETTLE, 16);
        tokio::spawn(async move {
            tx.send(DebounceEvent::Update("a")).await.unwrap();
            tx.send(DebounceEvent::Update("ab")).await.unwrap();
            time::sleep(Duration::from_millis(500)).await;
            tx.send(DebounceEvent::Update("abc")).await.unwrap();
            time::sleep(Duration::from_millis(500)).await;
        });

        assert_eq!(drain(&mut debouncer).await, vec!["ab", "abc"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_discards_pending() {
        let (tx, mut debouncer) = Debouncer::channel(SETTLE, 16);
        tx.send(DebounceEvent::Update("lea")).await.unwrap();
        tx.send(DebounceEvent::Immediate("")).await.unwrap();

        let start = Instant::now();
        assert_eq!(debouncer.next_settled().await, Some(""));
        assert_eq!(start.elapsed(), Duration::ZERO);

        drop(tx);
        assert_eq!(debouncer.next_settled().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_flushes_pending_value() {
        let (tx, mut debouncer) = Debouncer::channel(SETTLE, 16);
        tx.send(DebounceEvent::Update("bre")).await.unwrap();
        drop(tx);

        assert_eq!(drain(&mut debouncer).await, vec!["bre"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_without_input() {
        let (tx, mut debouncer) = Debouncer::<&str>::channel(SETTLE, 1);
        drop(tx);
        assert_eq!(debouncer.next_settled().await, None);
        assert_eq!(debouncer.settle_period(), SETTLE);
    }
}
